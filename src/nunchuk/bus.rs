//! Two-wire bus abstraction
//!
//! The driver talks to the Nunchuk through this trait. Implementations are
//! expected to be started and configured by the host before use; nothing in
//! this crate initializes a bus.

use thiserror::Error;

/// Failure reported by a transport when ending a transmission
///
/// Each variant corresponds to one of the conventional non-zero
/// end-of-transmission status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    #[error("transmission exceeds the transmit buffer")]
    DataTooLong,

    #[error("address not acknowledged")]
    AddressNack,

    #[error("data byte not acknowledged")]
    DataNack,

    #[error("bus error")]
    Other,

    #[error("bus timed out")]
    Timeout,
}

impl BusError {
    /// Numeric status code (always non-zero)
    pub fn status_code(&self) -> u8 {
        match self {
            BusError::DataTooLong => 1,
            BusError::AddressNack => 2,
            BusError::DataNack => 3,
            BusError::Other => 4,
            BusError::Timeout => 5,
        }
    }

    /// Convert a raw end-of-transmission status (0 = acknowledged)
    ///
    /// Unknown non-zero codes are reported as [`BusError::Other`].
    pub fn check_status(code: u8) -> Result<(), BusError> {
        match code {
            0 => Ok(()),
            1 => Err(BusError::DataTooLong),
            2 => Err(BusError::AddressNack),
            3 => Err(BusError::DataNack),
            5 => Err(BusError::Timeout),
            _ => Err(BusError::Other),
        }
    }
}

/// Blocking two-wire bus transport
///
/// # Invariants
///
/// - The bus is already initialized when any method is called
/// - Calls between `begin_transmission` and `end_transmission` belong to a
///   single write; callers sharing the bus must not interleave them
/// - Addresses are 7-bit
pub trait TwoWireBus {
    /// Begin a write transmission to `address`
    fn begin_transmission(&mut self, address: u8);

    /// Queue one byte for the current transmission
    fn write(&mut self, byte: u8);

    /// Send the queued bytes, `Ok` when the device acknowledged
    fn end_transmission(&mut self) -> Result<(), BusError>;

    /// Request `len` bytes from `address`, returning how many are available
    fn request_from(&mut self, address: u8, len: usize) -> usize;

    /// Take the next received byte, `None` when the receive buffer is empty
    fn read(&mut self) -> Option<u8>;
}

impl<B: TwoWireBus + ?Sized> TwoWireBus for &mut B {
    fn begin_transmission(&mut self, address: u8) {
        (**self).begin_transmission(address)
    }

    fn write(&mut self, byte: u8) {
        (**self).write(byte)
    }

    fn end_transmission(&mut self) -> Result<(), BusError> {
        (**self).end_transmission()
    }

    fn request_from(&mut self, address: u8, len: usize) -> usize {
        (**self).request_from(address, len)
    }

    fn read(&mut self) -> Option<u8> {
        (**self).read()
    }
}

/// Write a complete frame to `address` as one transmission
pub fn transmit<B: TwoWireBus + ?Sized>(bus: &mut B, address: u8, frame: &[u8]) -> Result<(), BusError> {
    bus.begin_transmission(address);
    for &byte in frame {
        bus.write(byte);
    }
    bus.end_transmission()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_round_trip() {
        for error in [
            BusError::DataTooLong,
            BusError::AddressNack,
            BusError::DataNack,
            BusError::Other,
            BusError::Timeout,
        ] {
            assert_ne!(error.status_code(), 0);
            assert_eq!(BusError::check_status(error.status_code()), Err(error));
        }
    }

    #[test]
    fn test_zero_status_is_ack() {
        assert_eq!(BusError::check_status(0), Ok(()));
    }

    #[test]
    fn test_unknown_status_is_other() {
        assert_eq!(BusError::check_status(42), Err(BusError::Other));
    }
}
