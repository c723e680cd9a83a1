use std::f64::consts::PI;

/// First-order low-pass filter with a per-sample smoothing factor.
///
/// The first sample passes through unchanged and seeds the memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowPassFilter {
    value: Option<f64>,
}

impl LowPassFilter {
    #[must_use]
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// Blend `input` into the memory with weight `alpha` in `(0, 1]`
    pub fn filter(&mut self, input: f64, alpha: f64) -> f64 {
        let filtered = match self.value {
            Some(last) => alpha.mul_add(input - last, last),
            None => input,
        };
        self.value = Some(filtered);
        filtered
    }

    /// Last filtered value
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = None;
    }
}

/// Smoothing factor for a given cutoff frequency (Hz) and time step (s):
/// `1 / (1 + tau / dt)` with `tau = 1 / (2π·cutoff)`
#[must_use]
pub fn smoothing_alpha(cutoff: f64, dt: f64) -> f64 {
    let tau = 1.0 / (2.0 * PI * cutoff);
    1.0 / (1.0 + tau / dt)
}
