//! Stream input from a scripted Nunchuk
//!
//! Runs the session against the mock bus: a handshake that needs one retry, a
//! short sequence of frames, a dropped frame, and a button release. No
//! hardware required.

use nunchuk_rs::config::SessionSettings;
use nunchuk_rs::nunchuk::{BusError, MockBus, MockDelay, NunchukReading};
use nunchuk_rs::{NunchukEvent, NunchukSession};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().filter_level(log::LevelFilter::Info).init();

    log::info!("Starting Nunchuk mock streaming example...");

    println!("Nunchuk Mock Streaming Example");
    println!("==============================\n");

    let mut bus = MockBus::new();
    // First handshake attempt is not acknowledged
    bus.queue_end_result(Err(BusError::AddressNack));
    bus.queue_response(&[0x80, 0x80, 0x80, 0x80, 0xB3, 0b0000_0011]) // idle
        .queue_response(&[0xE0, 0x80, 0x80, 0x80, 0xB3, 0b0000_0011]) // stick right
        .queue_response(&[0xE0, 0x80, 0x80, 0x80, 0xB3, 0b0000_0010]) // Z down
        .queue_response(&[0xE0, 0x80, 0x80])                        // dropped frame
        .queue_response(&[0xE0, 0x80, 0x9A, 0x80, 0xB3, 0b0000_0000]) // C + Z, tilted
        .queue_response(&[0x80, 0x80, 0x80, 0x80, 0xB3, 0b0000_0011]); // released

    let settings = SessionSettings {
        retry_delay_ms: 0,
        ..SessionSettings::default()
    };
    let mut session = NunchukSession::new(bus, MockDelay::new(), settings);
    session.connect()?;

    println!("✓ Controller initialized! Replaying frames...\n");

    for cycle in 1..=6 {
        let events = session.poll_once();
        if events.is_empty() {
            println!("[{}] (no change)", cycle);
        }
        for event in &events {
            println!("[{}] {}", cycle, describe(event));
        }
    }

    println!();
    println!("Final reading: {}", format_reading(&session.reading()));
    println!("Stats: {:?}", session.stats());

    Ok(())
}

/// Describe an event on one line
fn describe(event: &NunchukEvent) -> String {
    match event {
        NunchukEvent::Connected => "🎮 Connected".to_string(),
        NunchukEvent::Disconnected => "🎮 Disconnected".to_string(),
        NunchukEvent::ButtonPressed { button } => format!("🎮 {:?} pressed", button),
        NunchukEvent::ButtonReleased { button } => format!("🎮 {:?} released", button),
        NunchukEvent::StickMoved { x, y } => {
            format!("🕹️  Stick: X={:3}, Y={:3} {}", x, y, format_stick_direction(*x, *y))
        }
        NunchukEvent::Motion { x, y, z } => format!("📐 Accel: X={:4}, Y={:4}, Z={:4}", x, y, z),
    }
}

/// Format a reading as a single line
fn format_reading(reading: &NunchukReading) -> String {
    let mut buttons = Vec::new();
    if reading.button_c() { buttons.push("C"); }
    if reading.button_z() { buttons.push("Z"); }

    let (ax, ay, az) = reading.acceleration();
    format!(
        "stick=({}, {}) accel=({}, {}, {}) buttons=[{}]",
        reading.joy_x(), reading.joy_y(), ax, ay, az, buttons.join(" + ")
    )
}

/// Format stick direction as arrows (raw axes, 128 is roughly centred)
fn format_stick_direction(x: u8, y: u8) -> String {
    let mut dir = Vec::new();

    if y > 170 { dir.push("↑"); }
    if y < 86 { dir.push("↓"); }
    if x < 86 { dir.push("←"); }
    if x > 170 { dir.push("→"); }

    if dir.is_empty() {
        String::new()
    } else {
        format!("[{}]", dir.join(""))
    }
}
