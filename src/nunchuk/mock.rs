//! Mock bus and delay for testing.
//!
//! [`MockBus`] records every primitive call and replays scripted
//! acknowledgements and response frames, so the driver and session logic can
//! be exercised without hardware. [`MockDelay`] records requested delays
//! instead of sleeping.

use std::collections::VecDeque;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::nunchuk::bus::{BusError, TwoWireBus};

/// One recorded bus primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    Begin(u8),
    Write(u8),
    End,
    Request { address: u8, len: usize },
    Read,
}

/// Scripted two-wire bus
///
/// `end_transmission` pops the next queued status (acknowledged when the
/// queue is empty). `request_from` pops the next queued response and reports
/// its length as the available count, whatever length was requested; with no
/// response queued it reports 0.
#[derive(Debug, Default)]
pub struct MockBus {
    ops: Vec<BusOp>,
    end_results: VecDeque<Result<(), BusError>>,
    responses: VecDeque<Vec<u8>>,
    rx: VecDeque<u8>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of a future `end_transmission`
    pub fn queue_end_result(&mut self, result: Result<(), BusError>) -> &mut Self {
        self.end_results.push_back(result);
        self
    }

    /// Queue the bytes delivered by a future `request_from`
    pub fn queue_response(&mut self, bytes: &[u8]) -> &mut Self {
        self.responses.push_back(bytes.to_vec());
        self
    }

    /// Every primitive call so far, in order
    pub fn ops(&self) -> &[BusOp] {
        &self.ops
    }

    /// The bytes written so far, across all transmissions
    pub fn written_bytes(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                BusOp::Write(byte) => Some(*byte),
                _ => None,
            })
            .collect()
    }

    /// Number of `write` calls so far
    pub fn write_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, BusOp::Write(_))).count()
    }

    /// Number of `request_from` calls so far
    pub fn request_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, BusOp::Request { .. })).count()
    }

    /// Clear the call log (scripted results are kept)
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl TwoWireBus for MockBus {
    fn begin_transmission(&mut self, address: u8) {
        trace!("[MOCK BUS] begin 0x{:02X}", address);
        self.ops.push(BusOp::Begin(address));
    }

    fn write(&mut self, byte: u8) {
        trace!("[MOCK BUS] write 0x{:02X}", byte);
        self.ops.push(BusOp::Write(byte));
    }

    fn end_transmission(&mut self) -> Result<(), BusError> {
        self.ops.push(BusOp::End);
        let result = self.end_results.pop_front().unwrap_or(Ok(()));
        trace!("[MOCK BUS] end -> {:?}", result);
        result
    }

    fn request_from(&mut self, address: u8, len: usize) -> usize {
        self.ops.push(BusOp::Request { address, len });
        self.rx = self.responses.pop_front().unwrap_or_default().into();
        trace!("[MOCK BUS] request {} from 0x{:02X} -> {}", len, address, self.rx.len());
        self.rx.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.ops.push(BusOp::Read);
        self.rx.pop_front()
    }
}

/// Delay source that records instead of sleeping
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    delays: Vec<Duration>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested delays, in order
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Sum of all requested delays
    pub fn total(&self) -> Duration {
        self.delays.iter().sum()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays.push(Duration::from_nanos(u64::from(ns)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_bus_defaults_to_ack_and_empty_reads() {
        let mut bus = MockBus::new();
        bus.begin_transmission(0x52);
        bus.write(0x00);
        assert_eq!(bus.end_transmission(), Ok(()));
        assert_eq!(bus.request_from(0x52, 6), 0);
        assert_eq!(bus.read(), None);
    }

    #[test]
    fn mock_bus_replays_script() {
        let mut bus = MockBus::new();
        bus.queue_end_result(Err(BusError::AddressNack)).queue_response(&[1, 2, 3]);

        assert_eq!(bus.end_transmission(), Err(BusError::AddressNack));
        assert_eq!(bus.request_from(0x52, 6), 3);
        assert_eq!(bus.read(), Some(1));
        assert_eq!(bus.read(), Some(2));
        assert_eq!(bus.read(), Some(3));
        assert_eq!(bus.read(), None);
    }

    #[test]
    fn mock_delay_records() {
        let mut delay = MockDelay::new();
        delay.delay_ms(10);
        delay.delay_us(100);
        assert_eq!(delay.delays(), &[Duration::from_millis(10), Duration::from_micros(100)]);
        assert_eq!(delay.total(), Duration::from_micros(10_100));
    }
}
