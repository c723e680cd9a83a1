//! Constants used throughout the gesture pipeline

/// Landmarks below this detector confidence are treated as absent
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.3;

/// A finger tip must be farther than this many hand scales from the wrist to count as open
pub const FINGER_OPEN_SCALE: f64 = 1.1;

/// Minimum horizontal index displacement (in hand scales) for a left/right gesture
pub const INDEX_DISPLACEMENT_SCALE: f64 = 0.35;

/// Horizontal displacement must dominate vertical displacement by this factor
pub const INDEX_HORIZONTAL_DOMINANCE: f64 = 1.2;

/// Frames a candidate must repeat before it is confirmed
pub const DEFAULT_CONFIRMATION_FRAMES: u32 = 1;

/// Cooldown between navigate back/forward actions (seconds)
pub const DEFAULT_NAVIGATION_COOLDOWN: f64 = 1.0;

/// Cooldown between pinch clicks (seconds)
pub const DEFAULT_CLICK_COOLDOWN: f64 = 0.35;

/// Duration of the "Click" overlay flash (seconds)
pub const DEFAULT_CLICK_FLASH: f64 = 0.6;

/// How long the last scroll direction keeps labelling the overlay (seconds)
pub const DEFAULT_SCROLL_LABEL_HOLD: f64 = 0.4;

/// Normalized pinch distance below which a pinch starts
pub const DEFAULT_PINCH_START: f64 = 0.35;

/// Normalized pinch distance above which a pinch is released
pub const DEFAULT_PINCH_RELEASE: f64 = 0.45;

/// Smallest time step used for derivatives (seconds)
pub const MIN_DT: f64 = 1.0 / 120.0;

/// Time step assumed for the very first filter sample (seconds)
pub const INITIAL_DT: f64 = 1.0 / 60.0;

/// One-Euro cutoff for the derivative low-pass (Hz)
pub const DERIVATIVE_CUTOFF: f64 = 1.0;

/// Snappy end of the smoothing range
pub const SNAPPY_MIN_CUTOFF: f64 = 1.5;
pub const SNAPPY_BETA: f64 = 0.7;

/// Stable end of the smoothing range
pub const STABLE_MIN_CUTOFF: f64 = 0.3;
pub const STABLE_BETA: f64 = 0.05;

/// Pointer smoothing setting bounds
pub const MIN_POINTER_SMOOTHING: u32 = 1;
pub const MAX_POINTER_SMOOTHING: u32 = 20;

/// Pointer sensitivity bounds
pub const MIN_SENSITIVITY: f64 = 0.5;
pub const MAX_SENSITIVITY: f64 = 3.0;

/// Scroll speed bounds
pub const MIN_SCROLL_SPEED: f64 = 1.0;
pub const MAX_SCROLL_SPEED: f64 = 50.0;

/// Post-filter movement below `deadzone / sensitivity` is suppressed
pub const DEFAULT_POINTER_DEADZONE: f64 = 0.0015;

/// Lower bound on sensitivity when scaling the deadzone
pub const DEADZONE_SENSITIVITY_FLOOR: f64 = 0.1;

/// Margin of the active camera rectangle on each side (normalized)
pub const DEFAULT_ACTIVE_MARGIN: f64 = 0.1;

/// Pointer filters reset after this much time without a pointer update (seconds)
pub const DEFAULT_RESUME_GAP: f64 = 0.5;

/// Wrist velocity below this magnitude does not scroll (normalized units per second)
pub const SCROLL_VELOCITY_DEADZONE: f64 = 0.15;

/// Scroll velocity to pixel scale
pub const SCROLL_VELOCITY_SCALE: f64 = 100.0;

/// Scroll speed setting that maps to a unit multiplier
pub const SCROLL_SPEED_UNIT: f64 = 10.0;

/// Padding added around the hand bounding box, relative to its larger side
pub const HAND_BOUNDS_PADDING: f64 = 0.15;

/// Fallback screen geometry
pub const DEFAULT_SCREEN_WIDTH: f64 = 1920.0;
pub const DEFAULT_SCREEN_HEIGHT: f64 = 1080.0;

/// Default user settings
pub const DEFAULT_SENSITIVITY: f64 = 2.0;
pub const DEFAULT_SCROLL_SPEED: f64 = 20.0;
pub const DEFAULT_POINTER_SMOOTHING: u32 = 1;

/// Pixel scroll delta corresponding to one wheel notch on X11
pub const X11_PIXELS_PER_WHEEL_STEP: i32 = 120;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
