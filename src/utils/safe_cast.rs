//! Checked float to integer conversions for screen and scroll values

/// Clamp and convert f64 to i16 for X11 pixel coordinates
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f64_to_i16_clamp(value: f64, min: i16, max: i16) -> i16 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.round().clamp(f64::from(min), f64::from(max));
    (clamped as i16).clamp(min, max)
}

/// Truncate a scroll amount toward zero, saturating at the i32 range.
/// NaN yields no scroll.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn scroll_amount(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    // `as` saturates for out-of-range floats
    value as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_f64_to_i16_clamp() {
        assert_eq!(f64_to_i16_clamp(50.4, 0, 100), 50);
        assert_eq!(f64_to_i16_clamp(-10.0, 0, 100), 0);
        assert_eq!(f64_to_i16_clamp(150.0, 0, 100), 100);
        assert_eq!(f64_to_i16_clamp(f64::NAN, 0, 100), 0);
        assert_eq!(f64_to_i16_clamp(5.0, 100, 0), 5);
    }

    #[test]
    fn test_scroll_amount() {
        assert_eq!(scroll_amount(39.9), 39);
        assert_eq!(scroll_amount(-39.9), -39);
        assert_eq!(scroll_amount(f64::NAN), 0);
        assert_eq!(scroll_amount(f64::INFINITY), i32::MAX);
    }

    proptest! {
        #[test]
        fn prop_i16_clamp_stays_in_bounds(value in proptest::num::f64::ANY, max in 1i16..4000) {
            let result = f64_to_i16_clamp(value, 0, max);
            prop_assert!((0..=max).contains(&result));
        }
    }
}
