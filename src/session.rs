//! High-level Nunchuk session
//!
//! This module owns the caller-side policy the driver leaves open: handshake
//! retries, the polling cadence, re-handshaking after the device stops
//! answering, and turning successive readings into input events.

use crate::config::SessionSettings;
use crate::nunchuk::bus::TwoWireBus;
use crate::nunchuk::driver::{Nunchuk, NunchukError};
use crate::nunchuk::types::{ButtonType, NunchukReading};
use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Nunchuk input events
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NunchukEvent {
    /// Handshake completed
    Connected,
    /// Too many failed polls; the handshake will be redone
    Disconnected,
    ButtonPressed { button: ButtonType },
    ButtonReleased { button: ButtonType },
    StickMoved { x: u8, y: u8 },
    Motion { x: u16, y: u16, z: u16 },
}

/// Poll counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub polls: u64,
    pub successes: u64,
    pub failures: u64,
    pub connects: u64,
    pub disconnects: u64,
}

/// Owns a bus and a driver and polls on a fixed cadence
pub struct NunchukSession<B, D> {
    bus: B,
    driver: Nunchuk<D>,
    settings: SessionSettings,
    /// Last reading reported through events, `None` right after a (re)connect
    last: Option<NunchukReading>,
    consecutive_failures: u32,
    stats: SessionStats,
}

impl<B, D> NunchukSession<B, D>
where
    B: TwoWireBus,
    D: DelayNs,
{
    /// Create a session; the bus must already be initialized
    pub fn new(bus: B, delay: D, settings: SessionSettings) -> Self {
        Self {
            bus,
            driver: Nunchuk::new(delay),
            settings,
            last: None,
            consecutive_failures: 0,
            stats: SessionStats::default(),
        }
    }

    /// Perform the handshake, retrying up to `init_attempts` times
    pub fn connect(&mut self) -> Result<(), NunchukError> {
        let attempts = self.settings.init_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.driver.try_initialize(&mut self.bus) {
                Ok(()) => {
                    info!("✓ Nunchuk connected (attempt {}/{})", attempt, attempts);
                    self.on_connected();
                    return Ok(());
                }
                Err(e) if attempt < attempts => {
                    let pause_ms = u32::try_from(self.settings.retry_delay_ms).unwrap_or(u32::MAX);
                    warn!(
                        "Handshake attempt {}/{} failed: {}, retrying in {} ms",
                        attempt, attempts, e, pause_ms
                    );
                    self.driver.delay_mut().delay_ms(pause_ms);
                    attempt += 1;
                }
                Err(e) => {
                    warn!("Handshake attempt {}/{} failed: {}", attempt, attempts, e);
                    return Err(e);
                }
            }
        }
    }

    /// Run one poll cycle and return the resulting events
    ///
    /// If the driver is not ready a single handshake is attempted first.
    pub fn poll_once(&mut self) -> Vec<NunchukEvent> {
        let mut events = Vec::new();

        if !self.driver.is_ready() {
            match self.driver.try_initialize(&mut self.bus) {
                Ok(()) => {
                    info!("✓ Nunchuk reconnected");
                    self.on_connected();
                    events.push(NunchukEvent::Connected);
                }
                Err(e) => {
                    debug!("Handshake failed: {}", e);
                    return events;
                }
            }
        }

        self.stats.polls += 1;
        match self.driver.try_poll(&mut self.bus) {
            Ok(reading) => {
                self.stats.successes += 1;
                self.consecutive_failures = 0;
                events.extend(diff_readings(self.last.as_ref(), &reading));
                self.last = Some(reading);
            }
            Err(e) => {
                self.stats.failures += 1;
                self.consecutive_failures += 1;
                warn!("Poll failed ({} in a row): {}", self.consecutive_failures, e);

                let limit = self.settings.reinit_after_failures;
                if limit > 0 && self.consecutive_failures >= limit {
                    warn!("Nunchuk not answering after {} polls, redoing handshake", limit);
                    self.driver.reset();
                    self.stats.disconnects += 1;
                    events.push(NunchukEvent::Disconnected);
                }
            }
        }

        for event in &events {
            debug!("Event: {:?}", event);
        }
        events
    }

    /// Poll every `poll_interval_ms` until `running` is cleared
    pub fn run<F>(&mut self, running: &AtomicBool, mut on_event: F)
    where
        F: FnMut(&NunchukEvent),
    {
        let interval = Duration::from_millis(self.settings.poll_interval_ms);
        info!("Polling every {} ms", self.settings.poll_interval_ms);

        while running.load(Ordering::SeqCst) {
            let started = Instant::now();

            for event in self.poll_once() {
                on_event(&event);
            }

            if let Some(remaining) = interval.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }

        info!("Polling stopped ({} polls, {} failed)", self.stats.polls, self.stats.failures);
    }

    /// Last-known-good reading
    pub fn reading(&self) -> NunchukReading {
        self.driver.reading()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn driver(&self) -> &Nunchuk<D> {
        &self.driver
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Split the session back into its bus and driver
    pub fn into_parts(self) -> (B, Nunchuk<D>) {
        (self.bus, self.driver)
    }

    fn on_connected(&mut self) {
        self.stats.connects += 1;
        self.consecutive_failures = 0;
        self.last = None;
    }
}

/// Events describing the change from `previous` to `current`
///
/// With no previous reading everything is reported: the stick position, the
/// acceleration, and a press for every held button.
fn diff_readings(previous: Option<&NunchukReading>, current: &NunchukReading) -> Vec<NunchukEvent> {
    let mut events = Vec::new();

    for button in [ButtonType::C, ButtonType::Z] {
        let was_pressed = previous.map_or(false, |p| p.is_pressed(button));
        match (was_pressed, current.is_pressed(button)) {
            (false, true) => events.push(NunchukEvent::ButtonPressed { button }),
            (true, false) => events.push(NunchukEvent::ButtonReleased { button }),
            _ => {}
        }
    }

    if previous.map(|p| p.joystick()) != Some(current.joystick()) {
        let (x, y) = current.joystick();
        events.push(NunchukEvent::StickMoved { x, y });
    }

    if previous.map(|p| p.acceleration()) != Some(current.acceleration()) {
        let (x, y, z) = current.acceleration();
        events.push(NunchukEvent::Motion { x, y, z });
    }

    events
}
