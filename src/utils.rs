//! Timing helpers shared by the gesture controllers.

pub mod safe_cast;

/// Normalize a presentation timestamp; non-finite values become `0.0`
#[must_use]
pub fn normalize_timestamp(seconds: f64) -> f64 {
    if seconds.is_finite() {
        seconds
    } else {
        0.0
    }
}

/// Rate limiter measured on frame timestamps.
///
/// A cooldown that has never fired, or whose last trigger lies in the future
/// (the time base restarted), is expired.
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    period: f64,
    last: Option<f64>,
}

impl Cooldown {
    /// Create an expired cooldown with the given period in seconds
    #[must_use]
    pub const fn new(period: f64) -> Self {
        Self { period, last: None }
    }

    /// Whether an action may fire at `now`
    #[must_use]
    pub fn is_ready(&self, now: f64) -> bool {
        match self.last {
            None => true,
            Some(last) => {
                let elapsed = now - last;
                elapsed < 0.0 || elapsed > self.period
            }
        }
    }

    /// Fire if ready, returning whether the action may proceed
    pub fn try_fire(&mut self, now: f64) -> bool {
        if self.is_ready(now) {
            self.last = Some(now);
            true
        } else {
            false
        }
    }

    /// Expire the cooldown
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// A value that stays valid until a deadline on the frame clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub expires_at: f64,
}

impl<T: Copy> Timed<T> {
    /// Hold `value` for `duration` seconds starting at `now`
    #[must_use]
    pub fn new(value: T, now: f64, duration: f64) -> Self {
        Self {
            value,
            expires_at: now + duration,
        }
    }

    /// The value if still within its hold window at `now`
    #[must_use]
    pub fn get(&self, now: f64) -> Option<T> {
        (now <= self.expires_at).then_some(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(normalize_timestamp(1.25), 1.25);
        assert_eq!(normalize_timestamp(f64::NAN), 0.0);
        assert_eq!(normalize_timestamp(f64::INFINITY), 0.0);
        assert_eq!(normalize_timestamp(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_cooldown_blocks_within_period() {
        let mut cooldown = Cooldown::new(1.0);
        assert!(cooldown.try_fire(10.0));
        assert!(!cooldown.try_fire(10.5));
        assert!(!cooldown.try_fire(11.0)); // strictly greater than the period
        assert!(cooldown.try_fire(11.01));
    }

    #[test]
    fn test_cooldown_reset_and_time_reversal() {
        let mut cooldown = Cooldown::new(1.0);
        assert!(cooldown.try_fire(5.0));
        cooldown.reset();
        assert!(cooldown.try_fire(5.1));

        // Source restarted at zero
        assert!(cooldown.is_ready(0.2));
    }

    #[test]
    fn test_timed_expiry() {
        let held = Timed::new(7_u8, 1.0, 0.5);
        assert_eq!(held.get(1.2), Some(7));
        assert_eq!(held.get(1.5), Some(7));
        assert_eq!(held.get(1.51), None);
    }
}
