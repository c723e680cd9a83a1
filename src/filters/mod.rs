//! Signal filtering algorithms for smoothing the pointer.
//!
//! The pointer source (palm center) jitters frame to frame even when the hand
//! is held still. Filters here trade that jitter against lag; the default
//! One-Euro filter adapts its cutoff to the estimated hand velocity.

/// First-order low-pass building block
pub mod low_pass;

/// Velocity-adaptive One-Euro filter
pub mod one_euro;

use crate::Result;
pub use one_euro::SmoothingProfile;

/// Trait for all pointer filters
pub trait PointerFilter: Send {
    /// Filter one normalized sample taken at `timestamp` seconds
    fn apply(&mut self, x: f64, y: f64, timestamp: f64) -> (f64, f64);

    /// Reset filter state
    fn reset(&mut self);

    /// Update tuning from the user smoothing setting
    fn set_profile(&mut self, _profile: SmoothingProfile) {}

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl PointerFilter for NoFilter {
    fn apply(&mut self, x: f64, y: f64, _timestamp: f64) -> (f64, f64) {
        (x, y)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a pointer filter by type name
///
/// # Errors
///
/// Returns `Error::FilterError` for an unknown filter name
pub fn create_filter(filter_type: &str, profile: SmoothingProfile) -> Result<Box<dyn PointerFilter>> {
    match filter_type.to_lowercase().as_str() {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "one_euro" | "oneeuro" | "1euro" => Ok(Box::new(one_euro::OneEuroFilter2D::new(profile))),
        _ => Err(crate::Error::FilterError(format!("Unknown filter type: {filter_type}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter() {
        let mut filter = NoFilter;
        let (x, y) = filter.apply(0.25, 0.75, 0.0);
        assert_eq!(x, 0.25);
        assert_eq!(y, 0.75);
    }

    #[test]
    fn test_create_filter() {
        let profile = SmoothingProfile::from_level(1);
        assert!(create_filter("none", profile).is_ok());
        assert_eq!(create_filter("One_Euro", profile).unwrap().name(), "OneEuroFilter");
        assert!(create_filter("kalman", profile).is_err());
    }
}
