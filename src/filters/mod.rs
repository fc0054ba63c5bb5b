//! Filter cascade — EWMA smoother, notch and FIR sharing one raw history.
//!
//! ```text
//!          ┌──────────────┐
//!  lux ──┬▶│ EWMA (α=.95) │──▶ smoothed
//!        │ └──────────────┘
//!        │ ┌──────────────┐   ┌────────┐
//!        └▶│ raw history  │──▶│ notch  │──▶ notch_output
//!          │ (newest = 0) │   └────────┘
//!          │              │   ┌────────┐
//!          │              │──▶│  FIR   │──▶ fir_output
//!          └──────────────┘   └────────┘
//! ```
//!
//! One shared history keeps each tick O(HISTORY_LEN) with no duplicated
//! state.  Every stage is plain arithmetic on fixed-size buffers.

pub mod ewma;
pub mod fir;
pub mod history;
pub mod notch;

use ewma::Ewma;
use fir::{FIR_TAPS, FirFilter};
use history::History;
use notch::{NOTCH_INPUT_DEPTH, NotchFilter};

/// Length of the shared raw-sample history: `max(3, FIR_TAPS)`.
pub const HISTORY_LEN: usize = if FIR_TAPS > NOTCH_INPUT_DEPTH {
    FIR_TAPS
} else {
    NOTCH_INPUT_DEPTH
};

/// Outputs of one filter tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterOutputs {
    /// Unfiltered illuminance fed into this tick.
    pub lux: f32,
    pub smoothed: f32,
    pub notch: f32,
    pub fir: f32,
}

/// Persistent filter state, owned by the main loop.
#[derive(Debug, Clone)]
pub struct FilterCascade {
    ewma: Ewma,
    raw: History<f32, HISTORY_LEN>,
    notch: NotchFilter,
    fir: FirFilter<FIR_TAPS>,
    latest: FilterOutputs,
}

impl FilterCascade {
    pub fn new() -> Self {
        Self {
            ewma: Ewma::default(),
            raw: History::new(0.0),
            notch: NotchFilter::default(),
            fir: FirFilter::default(),
            latest: FilterOutputs::default(),
        }
    }

    /// Run the cascade for one sample, in fixed order:
    /// smooth, record, notch, FIR.
    pub fn tick(&mut self, lux: f32) -> FilterOutputs {
        let smoothed = self.ewma.update(lux);
        self.raw.push(lux);
        let notch = self.notch.update(&self.raw);
        let fir = self.fir.apply(&self.raw);

        self.latest = FilterOutputs {
            lux,
            smoothed,
            notch,
            fir,
        };
        self.latest
    }

    /// Outputs of the most recent tick (all zero before the first).
    pub fn latest(&self) -> FilterOutputs {
        self.latest
    }

    /// Raw illuminance history, newest first.
    pub fn raw_history(&self) -> &History<f32, HISTORY_LEN> {
        &self.raw
    }

    /// Notch output history, newest first.
    pub fn notch_history(&self) -> &History<f32, 2> {
        self.notch.outputs()
    }
}

impl Default for FilterCascade {
    fn default() -> Self {
        Self::new()
    }
}
