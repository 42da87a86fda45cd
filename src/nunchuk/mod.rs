//! Nunchuk controller support
//!
//! This module provides the complete Nunchuk integration:
//! - Two-wire bus abstraction and an embedded-hal adapter
//! - Handshake and frame request protocol
//! - Frame decoding
//! - Mock bus and delay for tests

pub mod constants;
pub mod types;
pub mod bus;
pub mod hal;
pub mod driver;
pub mod mock;

// Re-export commonly used items
pub use constants::*;
pub use types::*;
pub use bus::*;
pub use hal::HalBus;
pub use driver::*;
pub use mock::{BusOp, MockBus, MockDelay};
