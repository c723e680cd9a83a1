//! Pointer control: smoothing, deadzone and camera-to-screen mapping.

use log::debug;

use crate::config::{PointerConfig, Settings};
use crate::constants::{DEADZONE_SENSITIVITY_FLOOR, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};
use crate::filters::{create_filter, PointerFilter, SmoothingProfile};
use crate::landmarks::Point;
use crate::Result;

/// Size of the target display in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    pub width: f64,
    pub height: f64,
}

impl ScreenMetrics {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT)
    }
}

/// A point in screen pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera-to-screen mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMapping {
    /// Margin cropped from each side of the camera frame
    pub active_margin: f64,
    /// Invert the horizontal axis (mirrored camera)
    pub mirror_x: bool,
    pub screen: ScreenMetrics,
}

impl ScreenMapping {
    /// Map a normalized camera point to screen pixels.
    ///
    /// The point is cropped to the active rectangle, scaled around its center
    /// by `sensitivity`, clamped to the unit square, then flipped into
    /// top-left screen space (and mirrored horizontally when configured).
    #[must_use]
    pub fn map(&self, point: Point, sensitivity: f64) -> ScreenPoint {
        let span = 1.0 - 2.0 * self.active_margin;
        let nx = (point.x - self.active_margin) / span;
        let ny = (point.y - self.active_margin) / span;

        let cx = ((nx - 0.5) * sensitivity + 0.5).clamp(0.0, 1.0);
        let cy = ((ny - 0.5) * sensitivity + 0.5).clamp(0.0, 1.0);

        let x = if self.mirror_x { 1.0 - cx } else { cx };
        ScreenPoint::new(x * self.screen.width, (1.0 - cy) * self.screen.height)
    }
}

/// Smooths the palm center and turns it into pointer positions
pub struct PointerController {
    filter: Box<dyn PointerFilter>,
    mapping: ScreenMapping,
    deadzone: f64,
    resume_gap: f64,
    last_smoothed: Option<Point>,
    last_update: Option<f64>,
    last_screen_point: Option<ScreenPoint>,
}

impl PointerController {
    /// Create a controller for the given display
    ///
    /// # Errors
    ///
    /// Returns an error if the configured filter name is unknown
    pub fn new(config: &PointerConfig, screen: ScreenMetrics) -> Result<Self> {
        let filter = create_filter(&config.filter, SmoothingProfile::from_level(1))?;
        Ok(Self {
            filter,
            mapping: ScreenMapping {
                active_margin: config.active_margin,
                mirror_x: config.mirror_x,
                screen,
            },
            deadzone: config.deadzone,
            resume_gap: config.resume_gap,
            last_smoothed: None,
            last_update: None,
            last_screen_point: None,
        })
    }

    /// Process one pointer frame, returning the screen position to move to
    pub fn update(&mut self, source: Point, timestamp: f64, settings: &Settings) -> ScreenPoint {
        let smoothed = self.smooth(source, timestamp, settings);
        let target = self.map_to_screen(smoothed, settings.sensitivity);
        self.last_screen_point = Some(target);
        target
    }

    /// Filter the source point and apply the post-filter deadzone
    pub fn smooth(&mut self, source: Point, timestamp: f64, settings: &Settings) -> Point {
        if let Some(last) = self.last_update {
            let elapsed = timestamp - last;
            if elapsed < 0.0 || elapsed > self.resume_gap {
                debug!("Pointer resumed after {elapsed:.3}s, resetting filters");
                self.filter.reset();
                self.last_smoothed = None;
            }
        }
        self.last_update = Some(timestamp);

        self.filter
            .set_profile(SmoothingProfile::from_level(settings.pointer_smoothing));
        let (x, y) = self.filter.apply(source.x, source.y, timestamp);
        let filtered = Point::new(x, y);

        let Some(last) = self.last_smoothed else {
            self.last_smoothed = Some(filtered);
            return filtered;
        };

        let deadzone = self.deadzone / settings.sensitivity.max(DEADZONE_SENSITIVITY_FLOOR);
        if filtered.distance(last) < deadzone {
            return last;
        }

        self.last_smoothed = Some(filtered);
        filtered
    }

    #[must_use]
    pub fn map_to_screen(&self, point: Point, sensitivity: f64) -> ScreenPoint {
        self.mapping.map(point, sensitivity)
    }

    /// Last position emitted as a pointer move
    #[must_use]
    pub const fn last_screen_point(&self) -> Option<ScreenPoint> {
        self.last_screen_point
    }

    #[must_use]
    pub const fn mapping(&self) -> &ScreenMapping {
        &self.mapping
    }

    pub fn reset(&mut self) {
        self.filter.reset();
        self.last_smoothed = None;
        self.last_update = None;
        self.last_screen_point = None;
    }
}
