//! Hand-pose detector port.
//!
//! A detector turns one image into at most one confidence-filtered hand.
//! The model behind it is opaque to the pipeline; its latency may exceed the
//! frame interval and its failures are treated as "no hand".

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::landmarks::{Joint, LandmarkSnapshot, Point};
use crate::{Error, Result};

/// Detects at most one hand in an image
pub trait HandPoseDetector<I>: Send {
    /// Run detection on one image
    ///
    /// # Errors
    ///
    /// Returns `Error::Detector` if inference fails
    fn detect(&mut self, image: &I) -> Result<Option<LandmarkSnapshot>>;
}

impl<I, F> HandPoseDetector<I> for F
where
    F: FnMut(&I) -> Result<Option<LandmarkSnapshot>> + Send,
{
    fn detect(&mut self, image: &I) -> Result<Option<LandmarkSnapshot>> {
        self(image)
    }
}

/// Frame produced by a synthetic capture source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntheticImage {
    /// Capture sequence number
    pub id: u64,
    /// Raw observations the scripted detector will report
    pub observations: Vec<(Joint, Point, f32)>,
    /// Make the detector fail on this image
    pub fail: bool,
}

impl SyntheticImage {
    /// Image showing `hand` with every joint at `confidence`
    #[must_use]
    pub fn with_hand(id: u64, hand: &LandmarkSnapshot, confidence: f32) -> Self {
        let observations = Joint::ALL
            .iter()
            .filter_map(|&joint| hand.get(joint).map(|point| (joint, point, confidence)))
            .collect();
        Self {
            id,
            observations,
            fail: false,
        }
    }

    /// Image with no hand in view
    #[must_use]
    pub fn empty(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing(id: u64) -> Self {
        Self {
            id,
            observations: Vec::new(),
            fail: true,
        }
    }
}

/// Detector that replays the observations carried by synthetic images
pub struct ScriptedDetector {
    min_confidence: f32,
    latency: Duration,
    seen: Arc<Mutex<Vec<u64>>>,
}

impl ScriptedDetector {
    #[must_use]
    pub fn new(min_confidence: f32) -> Self {
        Self {
            min_confidence,
            latency: Duration::ZERO,
            seen: Arc::default(),
        }
    }

    /// Sleep for `latency` on every detection
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Shared log of image ids passed to `detect`, in order
    #[must_use]
    pub fn seen(&self) -> Arc<Mutex<Vec<u64>>> {
        Arc::clone(&self.seen)
    }
}

impl HandPoseDetector<SyntheticImage> for ScriptedDetector {
    fn detect(&mut self, image: &SyntheticImage) -> Result<Option<LandmarkSnapshot>> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        self.seen.lock().push(image.id);

        if image.fail {
            return Err(Error::Detector(format!("Inference failed on frame {}", image.id)));
        }

        let snapshot = LandmarkSnapshot::from_observations(image.observations.iter().copied(), self.min_confidence);
        Ok((!snapshot.is_empty()).then_some(snapshot))
    }
}
