//! Gesture control application: capture-facing sink, worker thread and
//! published state.
//!
//! Frames enter through [`FrameSink::submit`] on the capture thread and are
//! admitted one at a time (see [`crate::admission`]). A single worker thread
//! runs detection and the [`GestureEngine`] for each dispatched frame, then
//! publishes an immutable [`PublishedState`] snapshot for the UI.
//!
//! The capture thread only touches the enabled flag and the admission
//! mutex. The published state lock is never held across a pass.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, info, warn};
use parking_lot::RwLock;

use crate::{
    admission::{AdmissionController, Frame, FrameSink, Ticket},
    config::{Config, Settings},
    detector::HandPoseDetector,
    effector::InputEffector,
    engine::GestureEngine,
    error::{Error, Result},
    overlay::OverlayState,
};

/// Everything the UI layer observes, replaced as a whole
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PublishedState {
    pub enabled: bool,
    pub overlay: OverlayState,
    pub settings: Settings,
    /// Admission generation this state belongs to
    pub generation: u64,
    /// Frames whose result was published in this generation
    pub frames_processed: u64,
}

enum WorkerMessage<I> {
    Process(Ticket<Frame<I>>),
    Shutdown,
}

struct Shared<I> {
    admission: AdmissionController<Frame<I>>,
    /// Mirror of `published.enabled` for the capture thread
    enabled: AtomicBool,
    published: RwLock<PublishedState>,
}

impl<I> Shared<I> {
    fn publish(&self, generation: u64, overlay: OverlayState) {
        let mut published = self.published.write();
        if !published.enabled || published.generation != generation {
            debug!("Dropping overlay from stale generation {generation}");
            return;
        }
        published.overlay = overlay;
        published.frames_processed += 1;
    }
}

/// Cloneable handle the capture thread submits frames through
pub struct FrameSubmitter<I> {
    shared: Arc<Shared<I>>,
    sender: Sender<WorkerMessage<I>>,
}

impl<I> Clone for FrameSubmitter<I> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            sender: self.sender.clone(),
        }
    }
}

impl<I: Send> FrameSink<I> for FrameSubmitter<I> {
    fn submit(&self, frame: Frame<I>) {
        if !self.shared.enabled.load(Ordering::Acquire) {
            return;
        }

        let Some(ticket) = self.shared.admission.admit(frame) else {
            return;
        };

        match self.sender.try_send(WorkerMessage::Process(ticket)) {
            Ok(()) => {}
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => {
                warn!("Gesture worker unavailable, dropping frame");
                self.shared.admission.abort();
            }
        }
    }
}

/// Gesture control application
pub struct GestureApp<I: Send + 'static> {
    submitter: FrameSubmitter<I>,
    worker: Option<JoinHandle<()>>,
}

impl<I: Send + 'static> GestureApp<I> {
    /// Start the worker thread. Control starts disabled.
    ///
    /// The display size is taken from the effector when it knows it, else
    /// from the `screen` section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the worker thread
    /// cannot be spawned
    pub fn new<D, E>(config: &Config, detector: D, effector: E) -> Result<Self>
    where
        D: HandPoseDetector<I> + 'static,
        E: InputEffector + 'static,
    {
        let screen = effector
            .screen_metrics()
            .unwrap_or_else(|| config.screen.metrics());
        let engine = GestureEngine::new(config, screen)?;

        let shared = Arc::new(Shared {
            admission: AdmissionController::new(),
            enabled: AtomicBool::new(false),
            published: RwLock::new(PublishedState {
                enabled: false,
                overlay: OverlayState::idle(),
                settings: config.settings.clamped(),
                generation: 0,
                frames_processed: 0,
            }),
        });

        // At most one dispatched frame is queued at a time, plus shutdown
        let (sender, receiver) = bounded(2);

        let worker = Worker {
            shared: Arc::clone(&shared),
            receiver,
            detector,
            effector,
            engine,
        };
        let handle = thread::Builder::new()
            .name("gesture-worker".to_string())
            .spawn(move || worker.run())
            .map_err(|e| Error::WorkerError(format!("Failed to spawn worker: {e}")))?;

        info!("Gesture control initialized ({:.0}x{:.0})", screen.width, screen.height);

        Ok(Self {
            submitter: FrameSubmitter { shared, sender },
            worker: Some(handle),
        })
    }

    /// Handle for the capture thread
    #[must_use]
    pub fn submitter(&self) -> FrameSubmitter<I> {
        self.submitter.clone()
    }

    pub fn enable(&self) {
        self.set_enabled(true);
    }

    pub fn disable(&self) {
        self.set_enabled(false);
    }

    /// Switch gesture control on or off.
    ///
    /// Either way the admission generation is bumped, so a result from a
    /// frame admitted before the switch is discarded and the engine starts
    /// from a clean state on the next frame.
    pub fn set_enabled(&self, enabled: bool) {
        let shared = &self.submitter.shared;
        let mut published = shared.published.write();
        let generation = shared.admission.reset();
        *published = PublishedState {
            enabled,
            overlay: OverlayState::idle(),
            settings: published.settings,
            generation,
            frames_processed: 0,
        };
        shared.enabled.store(enabled, Ordering::Release);
        drop(published);

        if enabled {
            info!("Gesture control enabled (generation {generation})");
        } else {
            info!("Gesture control disabled");
        }
    }

    /// Replace the user settings, clamping each into its valid range
    pub fn update_settings(&self, settings: Settings) {
        let settings = settings.clamped();
        self.submitter.shared.published.write().settings = settings;
        debug!("Settings updated: {settings:?}");
    }

    /// Atomic copy of the published state
    #[must_use]
    pub fn snapshot(&self) -> PublishedState {
        *self.submitter.shared.published.read()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.submitter.shared.enabled.load(Ordering::Acquire)
    }

    /// Wait until no frame is in flight. Returns `false` on timeout.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.submitter.shared.admission.is_in_flight() {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(1));
        }
        true
    }

    /// Stop the worker thread and wait for it to exit
    pub fn shutdown(&mut self) {
        let Some(handle) = self.worker.take() else {
            return;
        };
        self.disable();
        if self.submitter.sender.send(WorkerMessage::Shutdown).is_err() {
            warn!("Gesture worker already gone");
        }
        if handle.join().is_err() {
            warn!("Gesture worker panicked");
        }
    }
}

impl<I: Send + 'static> FrameSink<I> for GestureApp<I> {
    fn submit(&self, frame: Frame<I>) {
        self.submitter.submit(frame);
    }
}

impl<I: Send + 'static> Drop for GestureApp<I> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct Worker<I, D, E> {
    shared: Arc<Shared<I>>,
    receiver: Receiver<WorkerMessage<I>>,
    detector: D,
    effector: E,
    engine: GestureEngine,
}

impl<I, D, E> Worker<I, D, E>
where
    D: HandPoseDetector<I>,
    E: InputEffector,
{
    fn run(mut self) {
        info!("Gesture worker started");
        while let Ok(WorkerMessage::Process(mut ticket)) = self.receiver.recv() {
            loop {
                self.process(&ticket);
                match self.shared.admission.complete() {
                    Some(next) => ticket = next,
                    None => break,
                }
            }
        }
        info!("Gesture worker stopped");
    }

    fn process(&mut self, ticket: &Ticket<Frame<I>>) {
        let generation = ticket.generation;
        if !self.shared.admission.is_current(generation) {
            debug!("Skipping frame from stale generation {generation}");
            return;
        }

        let hand = match self.detector.detect(&ticket.item.image) {
            Ok(hand) => hand,
            Err(e) => {
                warn!("Hand detection failed: {e}");
                None
            }
        };

        let settings = {
            let published = self.shared.published.read();
            if !published.enabled || published.generation != generation {
                debug!("Discarding stale detection result");
                return;
            }
            published.settings
        };

        self.engine.sync_generation(generation);
        let overlay = self
            .engine
            .process(hand.as_ref(), ticket.item.timestamp, &settings, &mut self.effector);

        // Rechecked under the write lock in case control was switched mid-pass
        self.shared.publish(generation, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{ScriptedDetector, SyntheticImage};
    use crate::effector::RecordingEffector;
    use crate::overlay::OverlayAction;
    use crate::synthetic::HandPose;

    fn app() -> GestureApp<SyntheticImage> {
        GestureApp::new(&Config::default(), ScriptedDetector::new(0.3), RecordingEffector::new()).unwrap()
    }

    #[test]
    fn test_starts_disabled_and_ignores_frames() {
        let app = app();
        let hand = HandPose::open_palm().snapshot();
        app.submit(Frame::new(SyntheticImage::with_hand(0, &hand, 1.0), 0.0));
        assert!(app.wait_idle(Duration::from_secs(1)));
        let state = app.snapshot();
        assert!(!state.enabled);
        assert_eq!(state.overlay.action, OverlayAction::Idle);
        assert_eq!(state.frames_processed, 0);
    }

    #[test]
    fn test_enabled_frame_publishes_overlay() {
        let app = app();
        app.enable();
        let hand = HandPose::open_palm().snapshot();
        app.submit(Frame::new(SyntheticImage::with_hand(0, &hand, 1.0), 0.0));
        assert!(app.wait_idle(Duration::from_secs(1)));
        let state = app.snapshot();
        assert_eq!(state.overlay.action, OverlayAction::Move);
        assert_eq!(state.frames_processed, 1);
    }

    #[test]
    fn test_disable_clears_overlay_and_bumps_generation() {
        let app = app();
        app.enable();
        let before = app.snapshot().generation;
        app.disable();
        let state = app.snapshot();
        assert!(!state.enabled);
        assert_eq!(state.overlay, OverlayState::idle());
        assert!(state.generation > before);
    }

    #[test]
    fn test_update_settings_clamps() {
        let app = app();
        app.update_settings(Settings {
            sensitivity: 9.0,
            scroll_speed: 100.0,
            pointer_smoothing: 99,
        });
        let settings = app.snapshot().settings;
        assert_eq!(settings.sensitivity, 3.0);
        assert_eq!(settings.scroll_speed, 50.0);
        assert_eq!(settings.pointer_smoothing, 20);
    }

    #[test]
    fn test_submit_after_worker_exit_leaves_no_frame_in_flight() {
        let mut app = app();
        app.shutdown();
        app.enable();
        let hand = HandPose::open_palm().snapshot();
        app.submit(Frame::new(SyntheticImage::with_hand(0, &hand, 1.0), 0.0));
        app.submit(Frame::new(SyntheticImage::with_hand(1, &hand, 1.0), 0.033));
        assert!(app.wait_idle(Duration::from_millis(100)));
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut app = app();
        app.shutdown();
        app.shutdown();
    }
}
