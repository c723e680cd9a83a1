//! Thumb-index pinch detection with Schmitt-trigger hysteresis.

use crate::landmarks::{HandGeometry, LandmarkSnapshot};
use crate::utils::Cooldown;

/// Pinch state tracker.
///
/// A pinch starts when the thumb-index distance drops below `start` hand
/// scales and ends only once it rises above `release`. Each start that is
/// allowed to click and lies outside the click cooldown yields one click.
#[derive(Debug, Clone)]
pub struct PinchController {
    start: f64,
    release: f64,
    active: bool,
    cooldown: Cooldown,
}

impl PinchController {
    /// Create a pinch controller
    ///
    /// # Panics
    ///
    /// Panics unless `0 < start < release`
    #[must_use]
    pub fn new(start: f64, release: f64, click_cooldown: f64) -> Self {
        assert!(start > 0.0 && start < release, "Pinch start must be positive and below release");
        Self {
            start,
            release,
            active: false,
            cooldown: Cooldown::new(click_cooldown),
        }
    }

    /// Thumb-index distance in hand scales, if both tips were detected
    #[must_use]
    pub fn normalized_distance(snapshot: &LandmarkSnapshot, geometry: &HandGeometry) -> Option<f64> {
        Some(snapshot.thumb_tip?.distance(snapshot.index_tip?) / geometry.scale)
    }

    /// Advance the hysteresis with a new distance.
    ///
    /// Returns `true` when a click should be emitted. While `may_click` is
    /// false the pinch state still tracks the hand but no click results.
    pub fn update(&mut self, distance: f64, timestamp: f64, may_click: bool) -> bool {
        if self.active {
            if distance > self.release {
                self.active = false;
            }
            return false;
        }

        if distance >= self.start {
            return false;
        }

        self.active = true;
        may_click && self.cooldown.try_fire(timestamp)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.cooldown.reset();
    }
}
