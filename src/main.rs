//! Nunchuk reader - Main Application
//!
//! Reads a Nunchuk on a Linux I2C bus and prints its input events.
//!
//! The I2C bus must already be enabled by the OS (e.g. `dtparam=i2c_arm=on`
//! on a Raspberry Pi). Usage: `nunchuk-rs [config.toml]`

use anyhow::Context;
use nunchuk_rs::config::{Config, OutputFormat};
use nunchuk_rs::NunchukEvent;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path),
        None => Config::load_default(),
    }
    .context("failed to load configuration")?;

    run(config)
}

#[cfg(target_os = "linux")]
fn run(config: Config) -> anyhow::Result<()> {
    use linux_embedded_hal::{Delay, I2cdev};
    use nunchuk_rs::{HalBus, NunchukSession};
    use std::sync::atomic::AtomicBool;

    let i2c = I2cdev::new(&config.bus.device)
        .with_context(|| format!("failed to open {}", config.bus.device))?;

    let mut session = NunchukSession::new(HalBus::new(i2c), Delay, config.session.clone());
    session.connect().context("Nunchuk did not acknowledge the handshake")?;

    println!("Listening for input on {}... (Press Ctrl+C to exit)", config.bus.device);

    let format = config.output.format;
    // Never cleared here; a real deployment would clear it from a Ctrl+C handler
    let running = AtomicBool::new(true);
    session.run(&running, |event| print_event(event, format));

    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run(_config: Config) -> anyhow::Result<()> {
    anyhow::bail!("no I2C backend available on this platform (Linux i2c-dev required)")
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn print_event(event: &NunchukEvent, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => log::warn!("Failed to serialize event: {}", e),
        },
        OutputFormat::Text => match event {
            NunchukEvent::Connected => println!("🎮 Connected"),
            NunchukEvent::Disconnected => println!("🎮 Disconnected"),
            NunchukEvent::ButtonPressed { button } => println!("🎮 {:?} pressed", button),
            NunchukEvent::ButtonReleased { button } => println!("🎮 {:?} released", button),
            NunchukEvent::StickMoved { x, y } => println!("🕹️  Stick: X={:3}, Y={:3}", x, y),
            NunchukEvent::Motion { x, y, z } => println!("📐 Accel: X={:4}, Y={:4}, Z={:4}", x, y, z),
        },
    }
}
