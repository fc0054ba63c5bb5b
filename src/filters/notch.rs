//! Second-order recursive notch filter.
//!
//! Rejects periodic interference (mains-coupled flicker) in the LDR signal.
//! The filter holds its own two-deep output history; the input history is
//! the shared raw-sample buffer owned by the cascade.
//!
//! ```text
//! y[n] = b0·y[n-1] + b1·y[n-2] + a0·x[n] + a1·x[n-1] + a2·x[n-2]
//! ```

use super::history::History;

/// Number of past inputs the notch reads.
pub const NOTCH_INPUT_DEPTH: usize = 3;

/// Fixed notch coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotchCoefficients {
    pub b0: f32,
    pub b1: f32,
    pub a0: f32,
    pub a1: f32,
    pub a2: f32,
}

pub const NOTCH_COEFFICIENTS: NotchCoefficients = NotchCoefficients {
    b0: 1.5687,
    b1: -0.9391,
    a0: 0.9695,
    a1: -1.5687,
    a2: 0.9695,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotchFilter {
    coeffs: NotchCoefficients,
    outputs: History<f32, 2>,
}

impl NotchFilter {
    pub const fn new(coeffs: NotchCoefficients) -> Self {
        Self {
            coeffs,
            outputs: History::new(0.0),
        }
    }

    /// Compute the next output from `inputs` (newest first) and record it.
    ///
    /// `inputs` must already contain the current sample at index 0.
    pub fn update<const N: usize>(&mut self, inputs: &History<f32, N>) -> f32 {
        let out = Self::evaluate(&self.coeffs, &self.outputs, inputs);
        self.outputs.push(out);
        out
    }

    /// Pure evaluation of the difference equation; no state is touched.
    pub fn evaluate<const N: usize>(
        c: &NotchCoefficients,
        outputs: &History<f32, 2>,
        inputs: &History<f32, N>,
    ) -> f32 {
        const { assert!(N >= NOTCH_INPUT_DEPTH, "notch needs three input samples") };
        c.b0 * outputs[0] + c.b1 * outputs[1] + c.a0 * inputs[0] + c.a1 * inputs[1] + c.a2 * inputs[2]
    }

    /// Output history, newest first.
    pub fn outputs(&self) -> &History<f32, 2> {
        &self.outputs
    }

    /// Latest output (0 before the first update).
    pub fn output(&self) -> f32 {
        self.outputs.newest()
    }
}

impl Default for NotchFilter {
    fn default() -> Self {
        Self::new(NOTCH_COEFFICIENTS)
    }
}
