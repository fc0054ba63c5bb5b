//! Integration tests for the sample → filter → frame → link pipeline.
//!
//! The service is driven one millisecond at a time against mock ports,
//! the same way the firmware loop drives it against real hardware.

use crate::mock_hw::{MockConsole, MockLink, MockSampler, RecordingSink, leak_trigger};

use luxlink::app::service::AppService;
use luxlink::config::{FrameFormat, SystemConfig, TransmitMode, TransmitSource};
use luxlink::protocol::frame::Frame;
use luxlink::protocol::text::decode_text;
use luxlink::sensors::volts_to_lux;
use luxlink::trigger::TransmitTrigger;

struct Rig {
    app: AppService,
    trigger: &'static TransmitTrigger,
    sampler: MockSampler,
    link: MockLink,
    console: MockConsole,
    sink: RecordingSink,
}

impl Rig {
    fn new(config: SystemConfig, voltage: f32) -> Self {
        let trigger = leak_trigger();
        let mut app = AppService::new(config, trigger).unwrap();
        let mut sink = RecordingSink::new();
        app.start(0, &mut sink);
        Self {
            app,
            trigger,
            sampler: MockSampler::new(voltage),
            link: MockLink::new(),
            console: MockConsole::ready(),
            sink,
        }
    }

    fn run(&mut self, from: u32, to: u32) {
        for now in from..=to {
            self.app.poll(
                now,
                &mut self.sampler,
                &mut self.link,
                &mut self.console,
                &mut self.sink,
            );
        }
    }
}

fn periodic(format: FrameFormat) -> SystemConfig {
    SystemConfig {
        transmit_mode: TransmitMode::Periodic,
        frame_format: format,
        ..SystemConfig::default()
    }
}

// ── Periodic binary link ──────────────────────────────────────

#[test]
fn periodic_mode_sends_one_valid_frame_per_second() {
    let mut rig = Rig::new(periodic(FrameFormat::Binary), 1.0);
    rig.run(1, 3000);

    assert_eq!(rig.sampler.reads, 300);
    assert_eq!(rig.app.sample_count(), 300);
    assert_eq!(rig.link.frames.len(), 3);
    assert_eq!(rig.app.frames_sent(), 3);

    let expected = volts_to_lux(1.0).round() as u16;
    let last = Frame::from_bytes(rig.link.frames.last().unwrap()).unwrap();
    assert_eq!(last.station_id, 1);
    assert_eq!(last.value, expected);

    for bytes in &rig.link.frames {
        assert_eq!(bytes.len(), 3);
        assert!(Frame::from_bytes(bytes).is_ok(), "bad CRC on {bytes:02X?}");
    }
}

#[test]
fn frame_events_match_wire_bytes() {
    let mut rig = Rig::new(periodic(FrameFormat::Binary), 1.0);
    rig.run(1, 2000);

    let records = rig.sink.frames();
    assert_eq!(records.len(), rig.link.frames.len());
    for (rec, bytes) in records.iter().zip(&rig.link.frames) {
        let f = Frame::from_bytes(bytes).unwrap();
        assert_eq!((rec.station_id, rec.value), (f.station_id, f.value));
        assert!(!rec.triggered);
        assert_eq!(rec.at_ms % 1000, 0);
    }
}

#[test]
fn smoothed_value_ramps_toward_input() {
    let mut rig = Rig::new(periodic(FrameFormat::Binary), 1.0);
    rig.run(1, 1000);
    // 100 EWMA steps from zero: (1 - 0.95^100) of the input.
    let lux = volts_to_lux(1.0);
    let first = Frame::from_bytes(&rig.link.frames[0]).unwrap().value;
    let expected = (lux * (1.0 - 0.95f32.powi(100))).round() as u16;
    assert_eq!(first, expected);
}

// ── Text link ─────────────────────────────────────────────────

#[test]
fn text_format_sends_eleven_byte_frames_without_echo() {
    let mut rig = Rig::new(periodic(FrameFormat::Text), 1.0);
    rig.run(1, 2000);

    assert_eq!(rig.link.frames.len(), 2);
    for bytes in &rig.link.frames {
        assert_eq!(bytes.len(), 11);
        let f = decode_text(bytes).unwrap();
        assert_eq!(f.station_id, 1);
    }
    // No nibble echo for text frames: only records on the console.
    assert!(!rig.console.out.contains('\n'));
}

// ── Binary echo & diagnostic records ──────────────────────────

#[test]
fn binary_frames_are_echoed_as_nibbles() {
    let mut rig = Rig::new(periodic(FrameFormat::Binary), 1.0);
    rig.run(1, 1000);

    let bytes = &rig.link.frames[0];
    let echo: Vec<String> = bytes
        .iter()
        .map(|b| format!("{:04b} {:04b}", b >> 4, b & 0x0F))
        .collect();
    assert!(rig.console.out.contains(&format!("{}\n", echo.join(" "))));
}

#[test]
fn echo_can_be_disabled() {
    let config = SystemConfig {
        echo_binary: false,
        ..periodic(FrameFormat::Binary)
    };
    let mut rig = Rig::new(config, 1.0);
    rig.run(1, 1000);
    assert_eq!(rig.link.frames.len(), 1);
    assert!(!rig.console.out.contains('\n'));
}

#[test]
fn diagnostic_records_follow_print_cadence() {
    let mut rig = Rig::new(periodic(FrameFormat::Binary), 1.0);
    rig.run(1, 3000);
    assert_eq!(rig.console.records(), 200);
    // Every record is terminated, none carries a newline inside it.
    assert_eq!(rig.console.out.matches(';').count(), 200);
}

#[test]
fn absent_console_gets_nothing_but_link_still_runs() {
    let mut rig = Rig::new(periodic(FrameFormat::Binary), 1.0);
    rig.console = MockConsole::absent();
    rig.run(1, 2000);
    assert!(rig.console.out.is_empty());
    assert_eq!(rig.link.frames.len(), 2);
}

// ── Triggered mode ────────────────────────────────────────────

#[test]
fn triggered_mode_is_silent_without_edges() {
    let mut rig = Rig::new(SystemConfig::default(), 1.0);
    rig.run(1, 5000);
    assert!(rig.link.frames.is_empty());
    assert_eq!(rig.app.sample_count(), 500);
}

#[test]
fn edge_sends_one_frame_a_period_later() {
    let mut rig = Rig::new(SystemConfig::default(), 1.0);
    rig.run(1, 2500);
    // ISR fires at 2500 ms.
    rig.trigger.arm(2500);
    rig.run(2501, 3499);
    assert!(rig.link.frames.is_empty());
    rig.run(3500, 6000);

    let records = rig.sink.frames();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].at_ms, 3500);
    assert!(records[0].triggered);
    assert!(!rig.trigger.is_pending());
}

// ── Transmit source ───────────────────────────────────────────

#[test]
fn raw_source_sends_clamped_lux() {
    let config = SystemConfig {
        transmit_source: TransmitSource::Raw,
        ..periodic(FrameFormat::Binary)
    };
    // 5 V drives the curve past its ceiling.
    let mut rig = Rig::new(config, 5.0);
    rig.run(1, 1000);
    let f = Frame::from_bytes(&rig.link.frames[0]).unwrap();
    assert_eq!(f.value, 999);
}

#[test]
fn steady_input_settles_every_filter() {
    let mut rig = Rig::new(periodic(FrameFormat::Binary), 1.0);
    rig.run(1, 5000);
    let lux = volts_to_lux(1.0);
    let out = rig.app.latest();
    assert!((out.lux - lux).abs() < 1e-3);
    assert!((out.smoothed - lux).abs() / lux < 1e-3);
    assert!((out.fir - lux).abs() / lux < 1e-3);
    assert!((out.notch - lux).abs() / lux < 5e-3);
}

// ── Link failure ──────────────────────────────────────────────

#[test]
fn link_failure_is_counted_not_fatal() {
    let mut rig = Rig::new(periodic(FrameFormat::Binary), 1.0);
    rig.link = MockLink::failing();
    rig.run(1, 3000);
    assert_eq!(rig.app.link_errors(), 3);
    assert_eq!(rig.app.frames_sent(), 0);
    assert!(rig.sink.frames().is_empty());
    // Sampling continued regardless.
    assert_eq!(rig.app.sample_count(), 300);
}
