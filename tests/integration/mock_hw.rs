//! Mock adapters for integration tests.
//!
//! Each mock records what the service did through its port so tests can
//! assert on the full history without touching ADC, GPIO or UART.

use core::cell::Cell;
use core::fmt::{self, Write};

use luxlink::app::events::{AppEvent, FrameRecord};
use luxlink::app::ports::{Clock, DiagnosticPort, EventSink, FrameSink, LinkError, SamplePort};
use luxlink::sensors::SensorReading;
use luxlink::trigger::TransmitTrigger;

/// Fresh trigger per test; the service needs a `'static` one.
pub fn leak_trigger() -> &'static TransmitTrigger {
    Box::leak(Box::new(TransmitTrigger::new()))
}

// ── MockSampler ───────────────────────────────────────────────

/// Returns a fixed divider voltage on every read.
pub struct MockSampler {
    pub voltage: f32,
    pub reads: u32,
}

impl MockSampler {
    pub fn new(voltage: f32) -> Self {
        Self { voltage, reads: 0 }
    }
}

impl SamplePort for MockSampler {
    fn sample(&mut self) -> SensorReading {
        self.reads += 1;
        SensorReading {
            raw_code: (self.voltage / 5.0 * 1023.0) as u16,
            voltage: self.voltage,
        }
    }
}

// ── MockLink ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockLink {
    pub frames: Vec<Vec<u8>>,
    pub fail: bool,
}

impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            frames: Vec::new(),
            fail: true,
        }
    }
}

impl FrameSink for MockLink {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        if self.fail {
            return Err(LinkError::PinWriteFailed);
        }
        self.frames.push(bytes.to_vec());
        Ok(())
    }
}

// ── MockConsole ───────────────────────────────────────────────

pub struct MockConsole {
    pub ready: bool,
    pub out: String,
}

impl MockConsole {
    pub fn ready() -> Self {
        Self {
            ready: true,
            out: String::new(),
        }
    }

    pub fn absent() -> Self {
        Self {
            ready: false,
            out: String::new(),
        }
    }

    /// Number of `$...;` diagnostic records written.
    pub fn records(&self) -> usize {
        self.out.matches('$').count()
    }
}

impl DiagnosticPort for MockConsole {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        let _ = Write::write_fmt(&mut self.out, args);
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Manual clock; `sleep_ms` advances it.
#[derive(Default)]
pub struct MockClock {
    pub now: Cell<u32>,
    pub sleeps: Cell<u32>,
}

impl MockClock {
    pub fn at(now: u32) -> Self {
        Self {
            now: Cell::new(now),
            sleeps: Cell::new(0),
        }
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }

    fn sleep_ms(&self, ms: u32) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<FrameRecord> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::FrameSent(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    pub fn samples(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Sampled(_)))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
