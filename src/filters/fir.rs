//! Finite-impulse-response low-pass filter.
//!
//! Weighted sum over the newest `TAPS` raw samples.  The default table is a
//! 9-tap Hamming-windowed sinc (cutoff 0.12·fs) normalised to unity DC gain,
//! so a constant input passes through unchanged once the history is full.

use super::history::History;

pub const FIR_TAPS: usize = 9;

/// Symmetric low-pass weights; index 0 multiplies the newest sample.
pub const LOWPASS_WEIGHTS: [f32; FIR_TAPS] = [
    0.000_966_75,
    0.021_270_28,
    0.103_926_36,
    0.228_441_14,
    0.290_790_94,
    0.228_441_14,
    0.103_926_36,
    0.021_270_28,
    0.000_966_75,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirFilter<const TAPS: usize> {
    weights: [f32; TAPS],
}

impl<const TAPS: usize> FirFilter<TAPS> {
    pub const fn new(weights: [f32; TAPS]) -> Self {
        Self { weights }
    }

    /// `Σ inputs[i] · weights[i]` for `i < TAPS`.
    pub fn apply<const N: usize>(&self, inputs: &History<f32, N>) -> f32 {
        const { assert!(N >= TAPS, "history shorter than the FIR tap count") };
        self.weights
            .iter()
            .zip(inputs.iter())
            .map(|(w, x)| w * x)
            .sum()
    }

    pub fn weights(&self) -> &[f32; TAPS] {
        &self.weights
    }
}

impl Default for FirFilter<FIR_TAPS> {
    fn default() -> Self {
        Self::new(LOWPASS_WEIGHTS)
    }
}
