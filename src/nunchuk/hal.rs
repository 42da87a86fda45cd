//! embedded-hal bus adapter
//!
//! [`HalBus`] exposes any `embedded_hal::i2c::I2c` implementation through the
//! [`TwoWireBus`] primitives, buffering bytes between `begin_transmission` and
//! `end_transmission` the way a classic two-wire library does.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};
use log::debug;

use crate::nunchuk::bus::{BusError, TwoWireBus};

/// Size of the transmit and receive buffers (bytes)
pub const BUFFER_LEN: usize = 32;

/// [`TwoWireBus`] over an embedded-hal I2C peripheral
///
/// The peripheral must already be configured (pins, clock); this adapter only
/// issues transactions.
pub struct HalBus<I2C> {
    i2c: I2C,
    address: u8,
    tx: [u8; BUFFER_LEN],
    tx_len: usize,
    tx_overflow: bool,
    rx: [u8; BUFFER_LEN],
    rx_len: usize,
    rx_pos: usize,
}

impl<I2C: I2c> HalBus<I2C> {
    /// Wrap a configured I2C peripheral
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: 0,
            tx: [0; BUFFER_LEN],
            tx_len: 0,
            tx_overflow: false,
            rx: [0; BUFFER_LEN],
            rx_len: 0,
            rx_pos: 0,
        }
    }

    /// Give the peripheral back
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Bytes still waiting in the receive buffer
    pub fn available(&self) -> usize {
        self.rx_len - self.rx_pos
    }
}

impl<I2C: I2c> TwoWireBus for HalBus<I2C> {
    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.tx_len = 0;
        self.tx_overflow = false;
    }

    fn write(&mut self, byte: u8) {
        match self.tx.get_mut(self.tx_len) {
            Some(slot) => {
                *slot = byte;
                self.tx_len += 1;
            }
            None => self.tx_overflow = true,
        }
    }

    fn end_transmission(&mut self) -> Result<(), BusError> {
        if self.tx_overflow {
            return Err(BusError::DataTooLong);
        }

        self.i2c
            .write(self.address, &self.tx[..self.tx_len])
            .map_err(|e| {
                debug!("I2C write to 0x{:02X} failed: {:?}", self.address, e.kind());
                map_error_kind(e.kind())
            })
    }

    fn request_from(&mut self, address: u8, len: usize) -> usize {
        let len = len.min(BUFFER_LEN);
        self.rx_pos = 0;
        self.rx_len = 0;

        match self.i2c.read(address, &mut self.rx[..len]) {
            Ok(()) => {
                self.rx_len = len;
                len
            }
            Err(e) => {
                debug!("I2C read of {} bytes from 0x{:02X} failed: {:?}", len, address, e.kind());
                0
            }
        }
    }

    fn read(&mut self) -> Option<u8> {
        if self.rx_pos >= self.rx_len {
            return None;
        }
        let byte = self.rx[self.rx_pos];
        self.rx_pos += 1;
        Some(byte)
    }
}

/// Map an embedded-hal error kind onto the end-of-transmission taxonomy
fn map_error_kind(kind: ErrorKind) -> BusError {
    match kind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => BusError::AddressNack,
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => BusError::DataNack,
        _ => BusError::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            map_error_kind(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
            BusError::AddressNack
        );
        assert_eq!(
            map_error_kind(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)),
            BusError::DataNack
        );
        assert_eq!(
            map_error_kind(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown)),
            BusError::Other
        );
        assert_eq!(map_error_kind(ErrorKind::ArbitrationLoss), BusError::Other);
        assert_eq!(map_error_kind(ErrorKind::Bus), BusError::Other);
    }
}
