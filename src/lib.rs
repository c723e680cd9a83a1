//! Hand-gesture interpretation pipeline for hands-free pointer control.
//!
//! This library turns per-frame hand landmarks into input actions:
//! - an open palm moves the pointer (One-Euro smoothed, deadzoned)
//! - a thumb-index pinch clicks
//! - a fist or two raised fingers scroll with vertical hand motion
//! - the index finger pointing sideways navigates back or forward
//!
//! The pipeline consists of:
//! 1. Frame admission bounding detector work to one frame in flight
//! 2. Hand-pose detection (external model behind [`detector::HandPoseDetector`])
//! 3. Scale-normalized gesture classification
//! 4. Debouncing into a confirmed gesture state
//! 5. Pointer, scroll and pinch controllers driving an [`effector::InputEffector`]
//! 6. Projection into a UI overlay state
//!
//! # Examples
//!
//! ## Classifying a hand
//!
//! ```
//! use gesture_control::{classifier::{classify, GestureCandidate}, synthetic::HandPose};
//!
//! let hand = HandPose::fist().snapshot();
//! assert_eq!(classify(&hand), GestureCandidate::Fist);
//! ```
//!
//! ## Driving the engine directly
//!
//! ```
//! use gesture_control::{
//!     config::Config,
//!     effector::RecordingEffector,
//!     engine::GestureEngine,
//!     pointer::ScreenMetrics,
//!     synthetic::HandPose,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let mut engine = GestureEngine::new(&config, ScreenMetrics::new(1920.0, 1080.0))?;
//! let mut effector = RecordingEffector::new();
//!
//! let hand = HandPose::open_palm().snapshot();
//! for frame in 0..3 {
//!     let t = f64::from(frame) / 30.0;
//!     engine.process(Some(&hand), t, &config.settings, &mut effector);
//! }
//! assert_eq!(effector.moves().len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the threaded application
//!
//! ```no_run
//! use gesture_control::{
//!     admission::{Frame, FrameSink},
//!     app::GestureApp,
//!     config::Config,
//!     detector::{ScriptedDetector, SyntheticImage},
//!     effector::LogEffector,
//!     synthetic::HandPose,
//! };
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let app = GestureApp::new(&config, ScriptedDetector::new(0.3), LogEffector::new())?;
//! app.enable();
//!
//! let hand = HandPose::open_palm().snapshot();
//! app.submit(Frame::new(SyntheticImage::with_hand(0, &hand, 0.9), 0.0));
//! app.wait_idle(Duration::from_millis(100));
//! println!("Overlay: {}", app.snapshot().overlay.action.title());
//! # Ok(())
//! # }
//! ```

/// Named hand joints and per-frame landmark snapshots
pub mod landmarks;

/// Signal filtering algorithms for smoothing the pointer
pub mod filters;

/// Frame admission and coalescing
pub mod admission;

/// Per-frame gesture classification
pub mod classifier;

/// Candidate debouncing
pub mod state_machine;

/// Pointer smoothing and screen mapping
pub mod pointer;

/// Scroll velocity extraction
pub mod scroll;

/// Pinch click detection
pub mod pinch;

/// UI overlay projection
pub mod overlay;

/// Per-frame gesture pipeline
pub mod engine;

/// Input effector port
pub mod effector;

/// Input effector for X11 systems
pub mod cursor_control;

/// Hand-pose detector port
pub mod detector;

/// Threaded application and published state
pub mod app;

/// Synthetic hands for tests, benchmarks and the demo
pub mod synthetic;

/// Timing helpers and checked conversions
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the pipeline
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
