//! One-Euro filter - adaptive low-pass filter for pointer jitter.
//!
//! Smooth when the hand is slow (suppresses jitter), responsive when it moves
//! fast (limits lag). Each axis is filtered independently.

use super::low_pass::{smoothing_alpha, LowPassFilter};
use super::PointerFilter;
use crate::constants::{
    DERIVATIVE_CUTOFF, INITIAL_DT, MAX_POINTER_SMOOTHING, MIN_DT, MIN_POINTER_SMOOTHING, SNAPPY_BETA,
    SNAPPY_MIN_CUTOFF, STABLE_BETA, STABLE_MIN_CUTOFF,
};

/// One-Euro tuning derived from the user smoothing level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingProfile {
    /// Minimum cutoff frequency (Hz); lower is smoother at rest
    pub min_cutoff: f64,
    /// Speed coefficient; higher is less lag during fast motion
    pub beta: f64,
}

impl SmoothingProfile {
    /// Linear interpolation between the snappy end (level 1) and the stable
    /// end (level 20). Levels outside `1..=20` are clamped.
    #[must_use]
    pub fn from_level(level: u32) -> Self {
        let clamped = level.clamp(MIN_POINTER_SMOOTHING, MAX_POINTER_SMOOTHING);
        let t = f64::from(clamped - MIN_POINTER_SMOOTHING) / f64::from(MAX_POINTER_SMOOTHING - MIN_POINTER_SMOOTHING);
        Self {
            min_cutoff: t.mul_add(STABLE_MIN_CUTOFF - SNAPPY_MIN_CUTOFF, SNAPPY_MIN_CUTOFF),
            beta: t.mul_add(STABLE_BETA - SNAPPY_BETA, SNAPPY_BETA),
        }
    }
}

/// Single-axis One-Euro filter
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    min_cutoff: f64,
    beta: f64,
    d_cutoff: f64,

    last_timestamp: Option<f64>,
    last_raw: Option<f64>,
    value: LowPassFilter,
    derivative: LowPassFilter,
}

impl OneEuroFilter {
    /// Create a new One-Euro filter
    ///
    /// # Panics
    ///
    /// Panics if any cutoff is not positive or beta is negative
    #[must_use]
    pub fn new(min_cutoff: f64, beta: f64, d_cutoff: f64) -> Self {
        assert!(min_cutoff > 0.0, "Cutoff frequency must be positive");
        assert!(d_cutoff > 0.0, "Cutoff frequency must be positive");
        assert!(beta >= 0.0, "Beta must be non-negative");
        Self {
            min_cutoff,
            beta,
            d_cutoff,
            last_timestamp: None,
            last_raw: None,
            value: LowPassFilter::new(),
            derivative: LowPassFilter::new(),
        }
    }

    /// Filter tuned by a smoothing profile
    #[must_use]
    pub fn with_profile(profile: SmoothingProfile) -> Self {
        Self::new(profile.min_cutoff, profile.beta, DERIVATIVE_CUTOFF)
    }

    /// Retune without losing filter memory
    pub fn set_profile(&mut self, profile: SmoothingProfile) {
        self.min_cutoff = profile.min_cutoff;
        self.beta = profile.beta;
    }

    /// Filter one sample taken at `timestamp` seconds
    pub fn update(&mut self, input: f64, timestamp: f64) -> f64 {
        let dt = match self.last_timestamp {
            Some(last) => (timestamp - last).max(MIN_DT),
            None => INITIAL_DT,
        };
        self.last_timestamp = Some(timestamp);

        let derivative = self.last_raw.map_or(0.0, |last| (input - last) / dt);
        self.last_raw = Some(input);

        let smoothed_derivative = self.derivative.filter(derivative, smoothing_alpha(self.d_cutoff, dt));
        let cutoff = self.beta.mul_add(smoothed_derivative.abs(), self.min_cutoff);

        self.value.filter(input, smoothing_alpha(cutoff, dt))
    }

    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.last_raw = None;
        self.value.reset();
        self.derivative.reset();
    }
}

/// Pair of One-Euro filters for the 2-D pointer
pub struct OneEuroFilter2D {
    x: OneEuroFilter,
    y: OneEuroFilter,
}

impl OneEuroFilter2D {
    #[must_use]
    pub fn new(profile: SmoothingProfile) -> Self {
        Self {
            x: OneEuroFilter::with_profile(profile),
            y: OneEuroFilter::with_profile(profile),
        }
    }
}

impl PointerFilter for OneEuroFilter2D {
    fn apply(&mut self, x: f64, y: f64, timestamp: f64) -> (f64, f64) {
        (self.x.update(x, timestamp), self.y.update(y, timestamp))
    }

    fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }

    fn set_profile(&mut self, profile: SmoothingProfile) {
        self.x.set_profile(profile);
        self.y.set_profile(profile);
    }

    fn name(&self) -> &str {
        "OneEuroFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_endpoints() {
        let snappy = SmoothingProfile::from_level(1);
        assert!((snappy.min_cutoff - 1.5).abs() < 1e-12);
        assert!((snappy.beta - 0.7).abs() < 1e-12);

        let stable = SmoothingProfile::from_level(20);
        assert!((stable.min_cutoff - 0.3).abs() < 1e-12);
        assert!((stable.beta - 0.05).abs() < 1e-12);

        // Out-of-range levels clamp
        assert_eq!(SmoothingProfile::from_level(0), snappy);
        assert_eq!(SmoothingProfile::from_level(99), stable);
    }

    #[test]
    fn test_profile_is_monotonic() {
        let mut last = SmoothingProfile::from_level(1);
        for level in 2..=20 {
            let profile = SmoothingProfile::from_level(level);
            assert!(profile.min_cutoff < last.min_cutoff);
            assert!(profile.beta < last.beta);
            last = profile;
        }
    }

    #[test]
    fn test_first_sample_passes_through() {
        let mut filter = OneEuroFilter::new(1.0, 0.5, 1.0);
        assert_eq!(filter.update(0.42, 3.0), 0.42);
    }

    #[test]
    fn test_constant_input_converges() {
        let mut filter = OneEuroFilter::new(0.3, 0.05, 1.0);
        filter.update(0.0, 0.0);
        let mut out = 0.0;
        for _ in 0..2000 {
            out = filter.update(0.7, 0.0);
        }
        assert!((out - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_faster_motion_has_less_lag() {
        // Same step input, but high beta reacts faster to it
        let mut sluggish = OneEuroFilter::new(0.3, 0.0, 1.0);
        let mut adaptive = OneEuroFilter::new(0.3, 5.0, 1.0);
        sluggish.update(0.0, 0.0);
        adaptive.update(0.0, 0.0);

        let t = 1.0 / 30.0;
        let a = sluggish.update(1.0, t);
        let b = adaptive.update(1.0, t);
        assert!(b > a);
        assert!(b <= 1.0);
    }

    #[test]
    fn test_reset_forgets_memory() {
        let mut filter = OneEuroFilter2D::new(SmoothingProfile::from_level(10));
        filter.apply(0.1, 0.1, 0.0);
        filter.apply(0.2, 0.2, 0.033);
        filter.reset();
        assert_eq!(filter.apply(0.9, 0.8, 5.0), (0.9, 0.8));
    }

    #[test]
    #[should_panic(expected = "Cutoff frequency must be positive")]
    fn test_zero_cutoff_rejected() {
        let _ = OneEuroFilter::new(0.0, 0.5, 1.0);
    }
}
