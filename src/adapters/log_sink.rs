//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (ESP-IDF logger on target, so UART / USB-CDC in
//! production).  Per-sample events go out at `trace` level; at 100 Hz
//! anything louder would swamp the console.

use log::{info, trace, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                station_id,
                format,
                mode,
            } => {
                info!(
                    "START | station={} format={:?} mode={:?}",
                    station_id, format, mode
                );
            }
            AppEvent::Sampled(o) => {
                trace!(
                    "SAMPLE | lux={:.3} smoothed={:.3} notch={:.3} fir={:.3}",
                    o.lux, o.smoothed, o.notch, o.fir
                );
            }
            AppEvent::FrameSent(r) => {
                info!(
                    "FRAME | station={} value={} format={:?} {} @{}ms",
                    r.station_id,
                    r.value,
                    r.format,
                    if r.triggered { "triggered" } else { "periodic" },
                    r.at_ms,
                );
            }
            AppEvent::DiagnosticsDegraded { waited_ms } => {
                warn!("DIAG | no host after {}ms, running degraded", waited_ms);
            }
        }
    }
}
