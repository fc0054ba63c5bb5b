//! Integration tests for start-up: config validation, the bounded wait
//! for the diagnostic channel, and the Started event.

use crate::mock_hw::{MockClock, MockConsole, RecordingSink, leak_trigger};

use luxlink::app::events::AppEvent;
use luxlink::app::service::{AppService, READY_POLL_MS, Readiness};
use luxlink::config::{FrameFormat, SystemConfig, TransmitMode};

#[test]
fn ready_console_returns_immediately() {
    let app = AppService::new(SystemConfig::default(), leak_trigger()).unwrap();
    let clock = MockClock::at(0);
    let mut sink = RecordingSink::new();

    let r = app.await_diagnostics(&MockConsole::ready(), &clock, &mut sink);
    assert_eq!(r, Readiness::Ready);
    assert_eq!(clock.sleeps.get(), 0);
    assert!(sink.events.is_empty());
}

#[test]
fn absent_console_times_out_and_degrades() {
    let app = AppService::new(SystemConfig::default(), leak_trigger()).unwrap();
    let clock = MockClock::at(100);
    let mut sink = RecordingSink::new();

    let r = app.await_diagnostics(&MockConsole::absent(), &clock, &mut sink);
    assert_eq!(r, Readiness::TimedOut);

    let timeout = SystemConfig::default().diag_ready_timeout_ms;
    assert_eq!(clock.sleeps.get(), timeout / READY_POLL_MS);
    assert_eq!(
        sink.events,
        vec![AppEvent::DiagnosticsDegraded { waited_ms: timeout }]
    );
}

#[test]
fn wait_survives_clock_wrap() {
    let app = AppService::new(SystemConfig::default(), leak_trigger()).unwrap();
    let clock = MockClock::at(u32::MAX - 1000);
    let mut sink = RecordingSink::new();

    let r = app.await_diagnostics(&MockConsole::absent(), &clock, &mut sink);
    assert_eq!(r, Readiness::TimedOut);
    // Counter wrapped during the wait.
    assert!(clock.now.get() < 3000);
}

#[test]
fn start_emits_configuration() {
    let config = SystemConfig {
        station_id: 9,
        frame_format: FrameFormat::Text,
        transmit_mode: TransmitMode::Periodic,
        ..SystemConfig::default()
    };
    let mut app = AppService::new(config, leak_trigger()).unwrap();
    let mut sink = RecordingSink::new();
    app.start(42, &mut sink);
    assert_eq!(
        sink.events,
        vec![AppEvent::Started {
            station_id: 9,
            format: FrameFormat::Text,
            mode: TransmitMode::Periodic,
        }]
    );
}

#[test]
fn start_clears_a_stale_trigger() {
    let trigger = leak_trigger();
    trigger.arm(5);
    let mut app = AppService::new(SystemConfig::default(), trigger).unwrap();
    app.start(1000, &mut RecordingSink::new());
    assert!(!trigger.is_pending());
    assert_eq!(trigger.last_transmit_ms(), 1000);
}

#[test]
fn invalid_config_is_rejected() {
    for config in [
        SystemConfig { station_id: 16, ..SystemConfig::default() },
        SystemConfig { sample_period_ms: 0, ..SystemConfig::default() },
        SystemConfig { adc_resolution: 0, ..SystemConfig::default() },
    ] {
        assert!(AppService::new(config, leak_trigger()).is_err());
    }
}
