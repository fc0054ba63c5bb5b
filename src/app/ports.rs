//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (ADC, soft serial, diagnostic console, clock, event
//! sinks) implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the pipeline never touches hardware
//! directly and runs unchanged against the mocks in `tests/integration`.

use core::fmt;

use crate::sensors::SensorReading;

// ───────────────────────────────────────────────────────────────
// Sample port (driven adapter: ADC → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one analog read of the LDR divider.
pub trait SamplePort {
    /// Read one code in `[0, resolution - 1]` and its voltage.  Infallible;
    /// a failed hardware read reports code 0.
    fn sample(&mut self) -> SensorReading;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter.  Wraps at `u32::MAX`; every consumer
/// compares timestamps with `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;

    /// Yield for roughly `ms` milliseconds.  Only used by the bounded
    /// startup wait, never by the main loop.
    fn sleep_ms(&self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Frame sink port (driven adapter: domain → secondary link)
// ───────────────────────────────────────────────────────────────

/// Write-side port for encoded frames.  Bytes go out in slice order.
pub trait FrameSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LinkError>;
}

// ───────────────────────────────────────────────────────────────
// Diagnostic port (driven adapter: domain → primary serial)
// ───────────────────────────────────────────────────────────────

/// Primary diagnostic channel: readiness query plus formatted output.
///
/// `write_fmt` has the same shape as `core::fmt::Write::write_fmt`, so
/// `write!(port, ...)` works on any implementor.  Output is best-effort;
/// a channel that drops bytes is not an error.
pub trait DiagnosticPort {
    /// Whether a host is attached and reading.
    fn is_ready(&self) -> bool;

    fn write_fmt(&mut self, args: fmt::Arguments<'_>);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SystemConfig::validate`](crate::config::SystemConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

/// Errors from [`FrameSink`] implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The TX pin refused a level change.
    PinWriteFailed,
    /// Baud rate of zero or too high for the bit timer.
    BadBaud(u32),
    /// The transmit queue cannot take the whole frame.
    QueueFull { needed: usize, free: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinWriteFailed => write!(f, "TX pin write failed"),
            Self::BadBaud(baud) => write!(f, "unsupported baud rate {}", baud),
            Self::QueueFull { needed, free } => {
                write!(f, "link queue full ({} B frame, {} B free)", needed, free)
            }
        }
    }
}
