//! Nunchuk driver
//!
//! This module implements the handshake and the request/decode cycle. The
//! driver does not own the bus: every operation borrows a [`TwoWireBus`] for
//! the duration of one exchange, so a caller that shares the bus can hold its
//! lock around a single call.

use embedded_hal::delay::DelayNs;
use log::{debug, trace};
use thiserror::Error;

use crate::nunchuk::bus::{transmit, BusError, TwoWireBus};
use crate::nunchuk::constants::*;
use crate::nunchuk::types::NunchukReading;

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    /// Handshake not performed, or the last one failed
    #[default]
    Uninitialized,
    /// Handshake completed, frames can be polled
    Ready,
}

/// The two failure kinds a caller can observe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Handshake,
    Read,
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NunchukError {
    /// A handshake write (step 1 or 2) was not acknowledged
    #[error("handshake step {step} not acknowledged: {source}")]
    Handshake { step: u8, source: BusError },

    /// The frame request write was not acknowledged
    #[error("frame request not acknowledged: {0}")]
    Request(#[source] BusError),

    /// The device answered with a byte count other than 6
    #[error("expected 6 bytes, device returned {received}")]
    FrameLength { received: usize },
}

impl NunchukError {
    /// Which of the two failure kinds this error belongs to
    pub fn kind(&self) -> FailureKind {
        match self {
            NunchukError::Handshake { .. } => FailureKind::Handshake,
            NunchukError::Request(_) | NunchukError::FrameLength { .. } => FailureKind::Read,
        }
    }
}

/// Nunchuk driver
///
/// Holds the delay source, the last successfully decoded reading and the
/// handshake state.
pub struct Nunchuk<D> {
    delay: D,
    reading: NunchukReading,
    state: DriverState,
}

impl<D: DelayNs> Nunchuk<D> {
    /// Create a driver in the `Uninitialized` state with a zeroed reading
    pub fn new(delay: D) -> Self {
        Self {
            delay,
            reading: NunchukReading::default(),
            state: DriverState::Uninitialized,
        }
    }

    /// Perform the handshake, returning `true` on success
    pub fn initialize<B: TwoWireBus + ?Sized>(&mut self, bus: &mut B) -> bool {
        self.try_initialize(bus).is_ok()
    }

    /// Perform the two-step handshake
    ///
    /// Must be called once the bus is up and before polling. A failed step
    /// aborts immediately and leaves the driver `Uninitialized`; retrying is
    /// up to the caller.
    pub fn try_initialize<B: TwoWireBus + ?Sized>(&mut self, bus: &mut B) -> Result<(), NunchukError> {
        self.state = DriverState::Uninitialized;

        for (step, frame) in [(1, HANDSHAKE_FRAME_1), (2, HANDSHAKE_FRAME_2)] {
            debug!("Handshake step {}: {:02X?}", step, frame);
            transmit(bus, NUNCHUK_ADDRESS, &frame).map_err(|source| {
                debug!("Handshake step {} failed: {}", step, source);
                NunchukError::Handshake { step, source }
            })?;
            self.delay.delay_ms(SETTLE_DELAY_MS);
        }

        self.state = DriverState::Ready;
        debug!("Nunchuk ready");
        Ok(())
    }

    /// Request and decode one frame, returning `true` on success
    pub fn poll<B: TwoWireBus + ?Sized>(&mut self, bus: &mut B) -> bool {
        self.try_poll(bus).is_ok()
    }

    /// Request and decode one frame
    ///
    /// On failure the stored reading is left exactly as it was.
    pub fn try_poll<B: TwoWireBus + ?Sized>(&mut self, bus: &mut B) -> Result<NunchukReading, NunchukError> {
        transmit(bus, NUNCHUK_ADDRESS, &REQUEST_FRAME).map_err(NunchukError::Request)?;

        self.delay.delay_us(TURNAROUND_DELAY_US);

        let available = bus.request_from(NUNCHUK_ADDRESS, FRAME_LEN);
        if available != FRAME_LEN {
            debug!("Frame request returned {} bytes", available);
            return Err(NunchukError::FrameLength { received: available });
        }

        let mut frame = [0u8; FRAME_LEN];
        for (received, slot) in frame.iter_mut().enumerate() {
            *slot = bus.read().ok_or(NunchukError::FrameLength { received })?;
        }

        self.reading = NunchukReading::decode(&frame);
        trace!("Frame {:02X?} -> {:?}", frame, self.reading);
        Ok(self.reading)
    }

    /// Last successfully decoded reading
    pub fn reading(&self) -> NunchukReading {
        self.reading
    }

    /// Current handshake state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// True once the handshake has completed
    pub fn is_ready(&self) -> bool {
        self.state == DriverState::Ready
    }

    /// Forget the handshake so the next caller re-initializes; the reading is kept
    pub fn reset(&mut self) {
        self.state = DriverState::Uninitialized;
    }

    /// Delay source, for callers that pace retries on the same clock
    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    /// Give the delay source back
    pub fn release(self) -> D {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let handshake = NunchukError::Handshake { step: 1, source: BusError::AddressNack };
        assert_eq!(handshake.kind(), FailureKind::Handshake);
        assert_eq!(NunchukError::Request(BusError::DataNack).kind(), FailureKind::Read);
        assert_eq!(NunchukError::FrameLength { received: 3 }.kind(), FailureKind::Read);
    }

    #[test]
    fn test_error_messages() {
        let err = NunchukError::Handshake { step: 2, source: BusError::AddressNack };
        assert_eq!(err.to_string(), "handshake step 2 not acknowledged: address not acknowledged");

        let err = NunchukError::FrameLength { received: 0 };
        assert_eq!(err.to_string(), "expected 6 bytes, device returned 0");
    }
}
