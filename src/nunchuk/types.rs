//! Nunchuk type definitions
//!
//! This module defines the decoded reading snapshot and the button identifiers
//! used throughout the nunchuk module.

use serde::{Deserialize, Serialize};

use crate::nunchuk::constants::{BUTTON_C_MASK, BUTTON_Z_MASK, FRAME_LEN, PACKED_BYTE_INDEX};

/// Nunchuk buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonType {
    C,
    Z,
}

/// Decoded Nunchuk state snapshot
///
/// Values are raw: joystick axes are 8-bit (0..=255) and accelerometer axes
/// are 10-bit (0..=1023). The bit operations in [`NunchukReading::decode`]
/// keep every field inside its range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NunchukReading {
    joy_x: u8,
    joy_y: u8,
    button_c: bool,
    button_z: bool,
    accel_x: u16,
    accel_y: u16,
    accel_z: u16,
}

impl NunchukReading {
    /// Decode one 6-byte response frame
    ///
    /// Bytes 0-1 hold the joystick, bytes 2-4 the top 8 bits of each
    /// accelerometer axis, and byte 5 packs the two low bits of each axis
    /// (bits 2-3 X, 4-5 Y, 6-7 Z) plus the active-low buttons (bit 0 Z,
    /// bit 1 C).
    pub fn decode(frame: &[u8; FRAME_LEN]) -> Self {
        let packed = frame[PACKED_BYTE_INDEX];

        Self {
            joy_x: frame[0],
            joy_y: frame[1],
            accel_x: accel_axis(frame[2], packed >> 2),
            accel_y: accel_axis(frame[3], packed >> 4),
            accel_z: accel_axis(frame[4], packed >> 6),
            button_z: (packed & BUTTON_Z_MASK) == 0,
            button_c: (packed & BUTTON_C_MASK) == 0,
        }
    }

    /// Joystick X axis (0..=255)
    pub fn joy_x(&self) -> u8 {
        self.joy_x
    }

    /// Joystick Y axis (0..=255)
    pub fn joy_y(&self) -> u8 {
        self.joy_y
    }

    /// True while C is pressed
    pub fn button_c(&self) -> bool {
        self.button_c
    }

    /// True while Z is pressed
    pub fn button_z(&self) -> bool {
        self.button_z
    }

    /// Accelerometer X axis (0..=1023)
    pub fn accel_x(&self) -> u16 {
        self.accel_x
    }

    /// Accelerometer Y axis (0..=1023)
    pub fn accel_y(&self) -> u16 {
        self.accel_y
    }

    /// Accelerometer Z axis (0..=1023)
    pub fn accel_z(&self) -> u16 {
        self.accel_z
    }

    /// Joystick position as `(x, y)`
    pub fn joystick(&self) -> (u8, u8) {
        (self.joy_x, self.joy_y)
    }

    /// Accelerometer axes as `(x, y, z)`
    pub fn acceleration(&self) -> (u16, u16, u16) {
        (self.accel_x, self.accel_y, self.accel_z)
    }

    /// Whether the given button is held in this snapshot
    pub fn is_pressed(&self, button: ButtonType) -> bool {
        match button {
            ButtonType::C => self.button_c,
            ButtonType::Z => self.button_z,
        }
    }
}

/// Rebuild a 10-bit axis from its high byte and the low bits shifted into place
fn accel_axis(high: u8, low: u8) -> u16 {
    (u16::from(high) << 2) | u16::from(low & 0x03)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed() {
        let reading = NunchukReading::default();
        assert_eq!(reading.joystick(), (0, 0));
        assert_eq!(reading.acceleration(), (0, 0, 0));
        assert!(!reading.button_c());
        assert!(!reading.button_z());
    }

    #[test]
    fn test_decode_reference_frame() {
        let reading = NunchukReading::decode(&[0x80, 0x40, 0xAA, 0xBB, 0xCC, 0b1101_0101]);

        assert_eq!(reading.joy_x(), 128);
        assert_eq!(reading.joy_y(), 64);
        assert_eq!(reading.accel_x(), 681);
        assert_eq!(reading.accel_y(), 749);
        assert_eq!(reading.accel_z(), 819);
        assert!(!reading.button_z());
        assert!(reading.button_c());
    }

    #[test]
    fn test_accel_low_bits() {
        let reading = NunchukReading::decode(&[0, 0, 0xFF, 0, 0, 0b0000_1000]);
        assert_eq!(reading.accel_x(), 1022);
        assert_eq!(reading.accel_y(), 0);
        assert_eq!(reading.accel_z(), 0);
    }

    #[test]
    fn test_accel_full_scale() {
        let reading = NunchukReading::decode(&[0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(reading.acceleration(), (1023, 1023, 1023));
    }

    #[test]
    fn test_buttons_are_active_low() {
        let both_held = NunchukReading::decode(&[0, 0, 0, 0, 0, 0b0000_0000]);
        assert!(both_held.button_z());
        assert!(both_held.button_c());

        let none_held = NunchukReading::decode(&[0, 0, 0, 0, 0, 0b0000_0011]);
        assert!(!none_held.button_z());
        assert!(!none_held.button_c());

        let z_only = NunchukReading::decode(&[0, 0, 0, 0, 0, 0b0000_0010]);
        assert!(z_only.is_pressed(ButtonType::Z));
        assert!(!z_only.is_pressed(ButtonType::C));

        let c_only = NunchukReading::decode(&[0, 0, 0, 0, 0, 0b0000_0001]);
        assert!(c_only.is_pressed(ButtonType::C));
        assert!(!c_only.is_pressed(ButtonType::Z));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let frame = [0x12, 0xEF, 0x01, 0x7F, 0x80, 0b1010_0110];
        assert_eq!(NunchukReading::decode(&frame), NunchukReading::decode(&frame));
    }

    #[test]
    fn test_button_bits_do_not_leak_into_accel() {
        let released = NunchukReading::decode(&[0, 0, 0x10, 0x20, 0x30, 0b0000_0011]);
        let held = NunchukReading::decode(&[0, 0, 0x10, 0x20, 0x30, 0b0000_0000]);
        assert_eq!(released.acceleration(), held.acceleration());
    }
}
