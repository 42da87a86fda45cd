//! Test to verify the session logs through a full connect/poll/lose cycle

use nunchuk_rs::config::SessionSettings;
use nunchuk_rs::nunchuk::{BusError, MockBus, MockDelay};
use nunchuk_rs::{NunchukEvent, NunchukSession};

fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

#[test]
fn test_session_logs_full_cycle() {
    init_logger();

    let mut bus = MockBus::new();
    bus.queue_end_result(Err(BusError::AddressNack))
        .queue_response(&[0x80, 0x80, 0x80, 0x80, 0x80, 0b0000_0011]);

    let settings = SessionSettings {
        retry_delay_ms: 0,
        reinit_after_failures: 1,
        ..SessionSettings::default()
    };
    let mut session = NunchukSession::new(bus, MockDelay::new(), settings);

    // These should log at info/warn/debug/trace level (visible with RUST_LOG=trace)
    assert!(session.connect().is_ok());
    assert!(!session.poll_once().is_empty());
    assert_eq!(session.poll_once(), vec![NunchukEvent::Disconnected]);

    let stats = session.stats();
    assert_eq!(stats.polls, 2);
    assert_eq!(stats.successes, 1);
    assert_eq!(stats.failures, 1);
    assert_eq!(stats.disconnects, 1);
}

#[test]
fn test_session_into_parts() {
    init_logger();

    let mut bus = MockBus::new();
    bus.queue_response(&[0x10, 0x20, 0x30, 0x40, 0x50, 0b0000_0000]);

    let mut session = NunchukSession::new(bus, MockDelay::new(), SessionSettings::default());
    session.connect().unwrap();
    session.poll_once();

    let (bus, driver) = session.into_parts();
    assert_eq!(bus.request_count(), 1);
    assert!(driver.reading().button_c());
    assert!(driver.reading().button_z());
    assert_eq!(driver.reading().joystick(), (0x10, 0x20));
}
