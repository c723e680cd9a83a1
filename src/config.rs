//! Configuration management for the gesture control pipeline

use crate::constants::{
    DEFAULT_ACTIVE_MARGIN, DEFAULT_CLICK_COOLDOWN, DEFAULT_CLICK_FLASH, DEFAULT_CONFIRMATION_FRAMES,
    DEFAULT_MIN_CONFIDENCE, DEFAULT_NAVIGATION_COOLDOWN, DEFAULT_PINCH_RELEASE, DEFAULT_PINCH_START,
    DEFAULT_POINTER_DEADZONE, DEFAULT_POINTER_SMOOTHING, DEFAULT_RESUME_GAP, DEFAULT_SCREEN_HEIGHT,
    DEFAULT_SCREEN_WIDTH, DEFAULT_SCROLL_LABEL_HOLD, DEFAULT_SCROLL_SPEED, DEFAULT_SENSITIVITY,
    MAX_POINTER_SMOOTHING, MAX_SCROLL_SPEED, MAX_SENSITIVITY, MIN_POINTER_SMOOTHING, MIN_SCROLL_SPEED,
    MIN_SENSITIVITY,
};
use crate::filters::{create_filter, SmoothingProfile};
use crate::pointer::ScreenMetrics;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// User-tunable settings
    pub settings: Settings,

    /// Gesture timing and thresholds
    pub gestures: GestureConfig,

    /// Pointer smoothing and mapping
    pub pointer: PointerConfig,

    /// Hand-pose detector parameters
    pub detector: DetectorConfig,

    /// Fallback display geometry
    pub screen: ScreenConfig,

    /// Input effector selection
    pub effector: EffectorConfig,
}

/// Settings exposed to the UI and adjustable at runtime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pointer sensitivity multiplier (0.5-3.0)
    pub sensitivity: f64,

    /// Scroll speed (1-50)
    pub scroll_speed: f64,

    /// Pointer smoothing level, 1 = snappy, 20 = stable
    pub pointer_smoothing: u32,
}

impl Settings {
    /// Copy of these settings forced into their valid ranges
    #[must_use]
    pub fn clamped(self) -> Self {
        let sensitivity = if self.sensitivity.is_finite() {
            self.sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY)
        } else {
            DEFAULT_SENSITIVITY
        };
        let scroll_speed = if self.scroll_speed.is_finite() {
            self.scroll_speed.clamp(MIN_SCROLL_SPEED, MAX_SCROLL_SPEED)
        } else {
            DEFAULT_SCROLL_SPEED
        };
        Self {
            sensitivity,
            scroll_speed,
            pointer_smoothing: self
                .pointer_smoothing
                .clamp(MIN_POINTER_SMOOTHING, MAX_POINTER_SMOOTHING),
        }
    }
}

/// Gesture debouncing, cooldowns and pinch thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Repeats required before a candidate is confirmed
    pub confirmation_frames: u32,

    /// Minimum time between navigation actions in seconds
    pub navigation_cooldown: f64,

    /// Minimum time between clicks in seconds
    pub click_cooldown: f64,

    /// How long the overlay shows "Click" in seconds
    pub click_flash: f64,

    /// How long the overlay keeps the last scroll direction in seconds
    pub scroll_label_hold: f64,

    /// Pinch starts below this distance (hand scales)
    pub pinch_start: f64,

    /// Pinch ends above this distance (hand scales)
    pub pinch_release: f64,
}

/// Pointer smoothing and camera-to-screen mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Filter type: "one_euro" or "none"
    pub filter: String,

    /// Invert horizontal axis for a mirrored camera
    pub mirror_x: bool,

    /// Margin cropped from each edge of the camera frame (0.0-0.5)
    pub active_margin: f64,

    /// Post-filter deadzone in normalized units at sensitivity 1
    pub deadzone: f64,

    /// Pause in seconds after which the filters restart
    pub resume_gap: f64,
}

/// Detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Landmarks below this confidence are treated as absent (0.0-1.0)
    pub min_confidence: f32,
}

/// Display geometry used when the effector cannot report one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f64,
    pub height: f64,
}

/// Input effector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectorConfig {
    /// Backend: "log" or "x11"
    pub backend: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            pointer_smoothing: DEFAULT_POINTER_SMOOTHING,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            confirmation_frames: DEFAULT_CONFIRMATION_FRAMES,
            navigation_cooldown: DEFAULT_NAVIGATION_COOLDOWN,
            click_cooldown: DEFAULT_CLICK_COOLDOWN,
            click_flash: DEFAULT_CLICK_FLASH,
            scroll_label_hold: DEFAULT_SCROLL_LABEL_HOLD,
            pinch_start: DEFAULT_PINCH_START,
            pinch_release: DEFAULT_PINCH_RELEASE,
        }
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            filter: "one_euro".to_string(),
            mirror_x: true,
            active_margin: DEFAULT_ACTIVE_MARGIN,
            deadzone: DEFAULT_POINTER_DEADZONE,
            resume_gap: DEFAULT_RESUME_GAP,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl ScreenConfig {
    #[must_use]
    pub const fn metrics(&self) -> ScreenMetrics {
        ScreenMetrics::new(self.width, self.height)
    }
}

impl Default for EffectorConfig {
    fn default() -> Self {
        Self {
            backend: "log".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        // User settings
        if !(MIN_SENSITIVITY..=MAX_SENSITIVITY).contains(&self.settings.sensitivity) {
            return Err(Error::ConfigError(format!(
                "Sensitivity must be between {MIN_SENSITIVITY} and {MAX_SENSITIVITY}"
            )));
        }
        if !(MIN_SCROLL_SPEED..=MAX_SCROLL_SPEED).contains(&self.settings.scroll_speed) {
            return Err(Error::ConfigError(format!(
                "Scroll speed must be between {MIN_SCROLL_SPEED} and {MAX_SCROLL_SPEED}"
            )));
        }
        if !(MIN_POINTER_SMOOTHING..=MAX_POINTER_SMOOTHING).contains(&self.settings.pointer_smoothing) {
            return Err(Error::ConfigError(format!(
                "Pointer smoothing must be between {MIN_POINTER_SMOOTHING} and {MAX_POINTER_SMOOTHING}"
            )));
        }

        // Gestures
        if self.gestures.confirmation_frames == 0 {
            return Err(Error::ConfigError(
                "Confirmation frames must be greater than 0".to_string(),
            ));
        }
        let durations = [
            ("Navigation cooldown", self.gestures.navigation_cooldown),
            ("Click cooldown", self.gestures.click_cooldown),
            ("Click flash", self.gestures.click_flash),
            ("Scroll label hold", self.gestures.scroll_label_hold),
            ("Resume gap", self.pointer.resume_gap),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::ConfigError(format!("{name} must be a non-negative number of seconds")));
            }
        }
        if !(self.gestures.pinch_start > 0.0 && self.gestures.pinch_start < self.gestures.pinch_release) {
            return Err(Error::ConfigError(
                "Pinch start must be positive and below pinch release".to_string(),
            ));
        }

        // Pointer
        if !(0.0..0.5).contains(&self.pointer.active_margin) {
            return Err(Error::ConfigError(
                "Active margin must be at least 0.0 and below 0.5".to_string(),
            ));
        }
        if !self.pointer.deadzone.is_finite() || self.pointer.deadzone < 0.0 {
            return Err(Error::ConfigError("Pointer deadzone must be non-negative".to_string()));
        }
        if create_filter(&self.pointer.filter, SmoothingProfile::from_level(self.settings.pointer_smoothing)).is_err() {
            return Err(Error::ConfigError(format!(
                "Unknown pointer filter: {}",
                self.pointer.filter
            )));
        }

        // Detector
        if !(0.0..=1.0).contains(&self.detector.min_confidence) {
            return Err(Error::ConfigError(
                "Minimum confidence must be between 0.0 and 1.0".to_string(),
            ));
        }

        // Screen
        if !(self.screen.width > 0.0 && self.screen.height > 0.0) {
            return Err(Error::ConfigError("Screen size must be positive".to_string()));
        }

        // Effector
        if !["log", "x11"].contains(&self.effector.backend.as_str()) {
            return Err(Error::ConfigError(format!(
                "Unknown effector backend: {}",
                self.effector.backend
            )));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Gesture Control Configuration

# User settings
settings:
  sensitivity: 2.0
  scroll_speed: 20.0
  pointer_smoothing: 1

# Gesture recognition
gestures:
  confirmation_frames: 1
  navigation_cooldown: 1.0
  click_cooldown: 0.35
  click_flash: 0.6
  scroll_label_hold: 0.4
  pinch_start: 0.35
  pinch_release: 0.45

# Pointer smoothing and mapping
pointer:
  filter: "one_euro"
  mirror_x: true
  active_margin: 0.1
  deadzone: 0.0015
  resume_gap: 0.5

# Hand detector
detector:
  min_confidence: 0.3

# Fallback screen size
screen:
  width: 1920.0
  height: 1080.0

# Input backend: "log" or "x11"
effector:
  backend: "log"
"#;
