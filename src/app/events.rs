//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::config::{FrameFormat, TransmitMode};
use crate::filters::FilterOutputs;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started.
    Started {
        station_id: u8,
        format: FrameFormat,
        mode: TransmitMode,
    },

    /// One sample went through the filter cascade.
    Sampled(FilterOutputs),

    /// A frame was handed to the link.
    FrameSent(FrameRecord),

    /// The diagnostic channel never became ready; running without it.
    DiagnosticsDegraded { waited_ms: u32 },
}

/// What went out on the link, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRecord {
    pub station_id: u8,
    pub value: u16,
    pub format: FrameFormat,
    /// Set when the trigger input requested the send.
    pub triggered: bool,
    pub at_ms: u32,
}
