//! nunchuk-rs: Wii Nunchuk driver for two-wire (I2C) buses
//!
//! This library performs the Nunchuk handshake, polls 6-byte frames and
//! decodes them into joystick, button and accelerometer readings. The bus is
//! supplied by the host, already initialized.

pub mod config;
pub mod nunchuk;
pub mod session;

// Re-export commonly used items
pub use config::Config;
pub use nunchuk::{ButtonType, BusError, HalBus, Nunchuk, NunchukError, NunchukReading, TwoWireBus};
pub use session::{NunchukEvent, NunchukSession};
