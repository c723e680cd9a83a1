//! Scroll velocity extraction from vertical wrist motion.

use crate::constants::{MIN_DT, SCROLL_SPEED_UNIT, SCROLL_VELOCITY_DEADZONE, SCROLL_VELOCITY_SCALE};
use crate::utils::safe_cast::scroll_amount;

/// Direction of the last emitted scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Wrist moving up in the image
    Up,
    /// Wrist moving down in the image
    Down,
}

/// One scroll command to send to the effector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollStep {
    pub dy: i32,
    pub direction: ScrollDirection,
}

/// Turns wrist motion during a fist/scroll pose into scroll commands
#[derive(Debug, Clone, Default)]
pub struct ScrollController {
    last_sample: Option<(f64, f64)>,
}

impl ScrollController {
    #[must_use]
    pub const fn new() -> Self {
        Self { last_sample: None }
    }

    /// Feed the wrist height at `timestamp`.
    ///
    /// The first sample after a reset only seeds the tracker. Below the
    /// velocity deadzone nothing is emitted but the sample still advances,
    /// keeping `dt` continuous.
    pub fn update(&mut self, wrist_y: f64, timestamp: f64, scroll_speed: f64) -> Option<ScrollStep> {
        let Some((last_y, last_t)) = self.last_sample.replace((wrist_y, timestamp)) else {
            return None;
        };

        let dt = (timestamp - last_t).max(MIN_DT);
        let velocity = (wrist_y - last_y) / dt;
        if velocity.abs() <= SCROLL_VELOCITY_DEADZONE {
            return None;
        }

        let dy = scroll_amount(velocity * SCROLL_VELOCITY_SCALE * (scroll_speed / SCROLL_SPEED_UNIT));
        let direction = if velocity > 0.0 {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        };
        Some(ScrollStep { dy, direction })
    }

    /// Forget the previous sample so the next frame only seeds
    pub fn reset(&mut self) {
        self.last_sample = None;
    }
}
