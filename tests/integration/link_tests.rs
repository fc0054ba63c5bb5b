//! The main loop against a line that needs real time per byte.
//!
//! A 300-baud 8N1 line takes ~34 ms per byte.  The loop only enqueues
//! frames; the pump side is stepped at line speed alongside it, the way
//! the link task drains the queue on the other core.

use crate::mock_hw::{MockConsole, MockLink, MockSampler, RecordingSink, leak_trigger};

use luxlink::app::service::AppService;
use luxlink::config::{FrameFormat, SystemConfig, TransmitMode};
use luxlink::drivers::link_queue::{self, LINK_QUEUE_LEN, LinkPump, QueuedLink};
use luxlink::protocol::frame::{BINARY_FRAME_LEN, Frame};
use luxlink::protocol::text::{TEXT_FRAME_LEN, decode_text};

/// 10 bit times at 300 baud, rounded up.
const BYTE_MS: u32 = 34;

struct SlowRig {
    app: AppService,
    sampler: MockSampler,
    link: QueuedLink<'static>,
    pump: LinkPump<'static, MockLink>,
    console: MockConsole,
    sink: RecordingSink,
    next_byte_at: u32,
}

impl SlowRig {
    fn new(format: FrameFormat) -> Self {
        let config = SystemConfig {
            transmit_mode: TransmitMode::Periodic,
            frame_format: format,
            ..SystemConfig::default()
        };
        let mut app = AppService::new(config, leak_trigger()).unwrap();
        let mut sink = RecordingSink::new();
        app.start(0, &mut sink);
        let (link, pump) = link_queue::channel(MockLink::new());
        Self {
            app,
            sampler: MockSampler::new(1.0),
            link,
            pump,
            console: MockConsole::ready(),
            sink,
            next_byte_at: 0,
        }
    }

    /// Poll every millisecond; the line shifts one byte per `BYTE_MS`
    /// when `line_running`.
    fn run(&mut self, to: u32, line_running: bool) {
        for now in 1..=to {
            self.app.poll(
                now,
                &mut self.sampler,
                &mut self.link,
                &mut self.console,
                &mut self.sink,
            );
            if line_running && now >= self.next_byte_at && self.pump.pump_one().unwrap() {
                self.next_byte_at = now + BYTE_MS;
            }
        }
    }

    fn wire(&self) -> Vec<u8> {
        self.pump.line().frames.concat()
    }
}

#[test]
fn binary_line_time_does_not_steal_sample_ticks() {
    let mut rig = SlowRig::new(FrameFormat::Binary);
    rig.run(10_000, true);

    assert_eq!(rig.app.sample_count(), 1000);
    assert_eq!(rig.sink.samples(), 1000);
    assert_eq!(rig.app.frames_sent(), 10);
    assert_eq!(rig.app.link_errors(), 0);

    // The frame queued at 10 000 ms is still on the wire.
    assert!(rig.pump.backlog() > 0);
    rig.pump.drain();
    let wire = rig.wire();
    assert_eq!(wire.len(), 10 * BINARY_FRAME_LEN);
    for chunk in wire.chunks(BINARY_FRAME_LEN) {
        assert!(Frame::from_bytes(chunk).is_ok(), "bad frame {chunk:02X?}");
    }
}

#[test]
fn text_line_time_does_not_steal_sample_ticks() {
    let mut rig = SlowRig::new(FrameFormat::Text);
    rig.run(10_000, true);

    assert_eq!(rig.app.sample_count(), 1000);
    assert_eq!(rig.app.frames_sent(), 10);

    rig.pump.drain();
    let wire = rig.wire();
    assert_eq!(wire.len(), 10 * TEXT_FRAME_LEN);
    for chunk in wire.chunks(TEXT_FRAME_LEN) {
        assert_eq!(decode_text(chunk).unwrap().station_id, 1);
    }
}

#[test]
fn stalled_line_fills_queue_without_stalling_loop() {
    let mut rig = SlowRig::new(FrameFormat::Binary);
    rig.run(30_000, false);

    let fit = ((LINK_QUEUE_LEN - 1) / BINARY_FRAME_LEN) as u32;
    assert_eq!(rig.app.sample_count(), 3000);
    assert_eq!(rig.app.frames_sent(), fit);
    assert_eq!(rig.app.link_errors(), 30 - fit);

    // Only whole frames were queued.
    rig.pump.drain();
    assert_eq!(rig.wire().len(), fit as usize * BINARY_FRAME_LEN);
}
