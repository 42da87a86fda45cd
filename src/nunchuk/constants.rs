//! Nunchuk protocol constants
//!
//! This module contains all the constants needed for Nunchuk communication:
//! - Device address on the two-wire bus
//! - Handshake and request frames
//! - Response frame layout
//! - Timing requirements

// ============================================================================
// Bus Addressing
// ============================================================================

/// Fixed 7-bit bus address of the Nunchuk
pub const NUNCHUK_ADDRESS: u8 = 0x52;

// ============================================================================
// Command Frames
// ============================================================================

/// Handshake step 1: disables the legacy encryption
pub const HANDSHAKE_FRAME_1: [u8; 2] = [0xF0, 0x55];

/// Handshake step 2: switches the device into raw reporting mode
pub const HANDSHAKE_FRAME_2: [u8; 2] = [0xFB, 0x00];

/// "Request next frame" command
pub const REQUEST_FRAME: [u8; 1] = [0x00];

// ============================================================================
// Response Layout
// ============================================================================

/// Size of one response frame in bytes
pub const FRAME_LEN: usize = 6;

/// Byte holding the packed accelerometer low bits and the button bits
pub const PACKED_BYTE_INDEX: usize = 5;

/// Bit 0 of the packed byte, cleared while Z is held
pub const BUTTON_Z_MASK: u8 = 0x01;

/// Bit 1 of the packed byte, cleared while C is held
pub const BUTTON_C_MASK: u8 = 0x02;

// ============================================================================
// Timing Constants
// ============================================================================

/// Settle delay after each handshake write (milliseconds)
pub const SETTLE_DELAY_MS: u32 = 10;

/// Turnaround delay between a request and the data being readable (microseconds)
pub const TURNAROUND_DELAY_US: u32 = 100;
