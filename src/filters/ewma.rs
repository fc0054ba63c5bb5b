//! Single-pole exponential smoother (EWMA).

/// Weight of the previous accumulator value.
pub const SMOOTHING_ALPHA: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ewma {
    alpha: f32,
    value: f32,
}

impl Ewma {
    /// Accumulator starts at zero, so the first samples ramp up from 0.
    pub const fn new(alpha: f32) -> Self {
        Self { alpha, value: 0.0 }
    }

    /// `value' = alpha * value + (1 - alpha) * input`
    pub fn update(&mut self, input: f32) -> f32 {
        self.value = self.alpha * self.value + (1.0 - self.alpha) * input;
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

impl Default for Ewma {
    fn default() -> Self {
        Self::new(SMOOTHING_ALPHA)
    }
}
