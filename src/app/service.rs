//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the scheduler, the filter cascade and the selected
//! framer.  It exposes a clean, hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!   SamplePort ──▶ ┌──────────────────────────────┐ ──▶ FrameSink
//!                  │          AppService          │
//!        Clock ──▶ │ Scheduler · Filters · Framer │ ──▶ DiagnosticPort
//!                  └──────────────▲───────────────┘ ──▶ EventSink
//!                                 │
//!                    'static TransmitTrigger ◀── GPIO ISR
//! ```

use log::{debug, info, warn};

use crate::config::{FrameFormat, SystemConfig, TransmitSource};
use crate::filters::{FilterCascade, FilterOutputs};
use crate::protocol::diag::{BinaryEcho, DiagRecord};
use crate::protocol::text::TEXT_VALUE_MAX;
use crate::protocol::{FrameBytes, Framer, framer_for};
use crate::scheduler::{Fired, Scheduler, TransmitCause};
use crate::sensors::{SensorReading, volts_to_lux};
use crate::trigger::TransmitTrigger;

use super::events::{AppEvent, FrameRecord};
use super::ports::{Clock, ConfigError, DiagnosticPort, EventSink, FrameSink, SamplePort};

/// Poll interval of the bounded startup wait.
pub const READY_POLL_MS: u32 = 10;

/// Outcome of [`AppService::await_diagnostics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    /// Timed out; the pipeline runs without a diagnostic host.
    TimedOut,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    scheduler: Scheduler,
    filters: FilterCascade,
    framer: &'static dyn Framer,
    trigger: &'static TransmitTrigger,
    sample_count: u32,
    frames_sent: u32,
    link_errors: u32,
}

impl AppService {
    /// Validate `config` and build the pipeline around `trigger`.
    ///
    /// Does **not** start the cadences — call [`start`](Self::start) next.
    pub fn new(
        config: SystemConfig,
        trigger: &'static TransmitTrigger,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scheduler: Scheduler::new(&config, 0),
            filters: FilterCascade::new(),
            framer: framer_for(config.frame_format),
            trigger,
            config,
            sample_count: 0,
            frames_sent: 0,
            link_errors: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Block until the diagnostic host attaches, for at most
    /// `diag_ready_timeout_ms`.
    pub fn await_diagnostics(
        &self,
        diag: &impl DiagnosticPort,
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> Readiness {
        let start = clock.now_ms();
        loop {
            if diag.is_ready() {
                info!("Diagnostic channel ready");
                return Readiness::Ready;
            }
            let waited_ms = clock.now_ms().wrapping_sub(start);
            if waited_ms >= self.config.diag_ready_timeout_ms {
                warn!(
                    "Diagnostic channel not ready after {} ms, continuing without it",
                    waited_ms
                );
                sink.emit(&AppEvent::DiagnosticsDegraded { waited_ms });
                return Readiness::TimedOut;
            }
            clock.sleep_ms(READY_POLL_MS);
        }
    }

    /// Start every cadence (and the transmit timer) at `now_ms`.
    pub fn start(&mut self, now_ms: u32, sink: &mut impl EventSink) {
        self.scheduler.restart(now_ms, self.trigger);
        sink.emit(&AppEvent::Started {
            station_id: self.config.station_id,
            format: self.framer.format(),
            mode: self.config.transmit_mode,
        });
        info!(
            "AppService started: station={} format={:?} mode={:?}",
            self.config.station_id,
            self.framer.format(),
            self.config.transmit_mode
        );
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// One main-loop iteration at `now_ms`: sample, then transmit, then
    /// print, each only if its cadence fired.
    pub fn poll(
        &mut self,
        now_ms: u32,
        sampler: &mut impl SamplePort,
        link: &mut impl FrameSink,
        diag: &mut impl DiagnosticPort,
        sink: &mut impl EventSink,
    ) -> Fired {
        let fired = self.scheduler.poll(now_ms, self.trigger);

        if fired.sample {
            let outputs = self.process(sampler.sample());
            sink.emit(&AppEvent::Sampled(outputs));
        }

        if let Some(cause) = fired.transmit {
            self.transmit(now_ms, cause, link, diag, sink);
        }

        if fired.print && diag.is_ready() {
            write!(diag, "{}", DiagRecord(&self.filters.latest()));
        }

        fired
    }

    /// Sample step: convert a reading and run it through the cascade.
    pub fn process(&mut self, reading: SensorReading) -> FilterOutputs {
        self.sample_count = self.sample_count.wrapping_add(1);
        let lux = volts_to_lux(reading.voltage);
        self.filters.tick(lux)
    }

    /// Transmit step: frame the selected output and write it to the link.
    fn transmit(
        &mut self,
        now_ms: u32,
        cause: TransmitCause,
        link: &mut impl FrameSink,
        diag: &mut impl DiagnosticPort,
        sink: &mut impl EventSink,
    ) {
        let value = self.transmit_value();
        let station_id = self.config.station_id;
        let bytes: FrameBytes = self.framer.encode(station_id, value);

        if let Err(e) = link.write_bytes(&bytes) {
            self.link_errors = self.link_errors.wrapping_add(1);
            warn!("Link write failed: {}", e);
            return;
        }
        self.frames_sent = self.frames_sent.wrapping_add(1);
        debug!("Frame sent: station={} value={} ({} B)", station_id, value, bytes.len());

        if self.config.echo_binary
            && self.framer.format() == FrameFormat::Binary
            && diag.is_ready()
        {
            writeln!(diag, "{}", BinaryEcho(&bytes));
        }

        sink.emit(&AppEvent::FrameSent(FrameRecord {
            station_id,
            value,
            format: self.framer.format(),
            triggered: cause == TransmitCause::Trigger,
            at_ms: now_ms,
        }));
    }

    // ── Queries ───────────────────────────────────────────────

    /// The configured [`TransmitSource`], rounded and clamped to `0..=999`.
    pub fn transmit_value(&self) -> u16 {
        let o = self.filters.latest();
        let v = match self.config.transmit_source {
            TransmitSource::Raw => o.lux,
            TransmitSource::Smoothed => o.smoothed,
            TransmitSource::Notch => o.notch,
            TransmitSource::Fir => o.fir,
        };
        // NaN saturates to 0 in the cast.
        v.round().clamp(0.0, f32::from(TEXT_VALUE_MAX)) as u16
    }

    /// Outputs of the most recent sample step.
    pub fn latest(&self) -> FilterOutputs {
        self.filters.latest()
    }

    pub fn filters(&self) -> &FilterCascade {
        &self.filters
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    pub fn link_errors(&self) -> u32 {
        self.link_errors
    }
}
