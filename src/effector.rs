//! Input effector port and the in-process implementations.
//!
//! The pipeline never inspects the outcome of an action; implementations
//! must log failures themselves and return normally.

use std::sync::Arc;

use log::info;
use parking_lot::Mutex;

use crate::pointer::{ScreenMetrics, ScreenPoint};

/// Executes synthesized input against the host
pub trait InputEffector: Send {
    /// Move the pointer to an absolute screen position
    fn move_mouse(&mut self, point: ScreenPoint);

    /// Primary-button click at a screen position
    fn click(&mut self, point: ScreenPoint);

    /// Scroll by a pixel delta; positive `dy` scrolls up
    fn scroll(&mut self, dx: i32, dy: i32);

    fn navigate_back(&mut self);

    fn navigate_forward(&mut self);

    /// Display geometry, if the backend knows it
    fn screen_metrics(&self) -> Option<ScreenMetrics> {
        None
    }
}

/// One action as seen by an effector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Move(ScreenPoint),
    Click(ScreenPoint),
    Scroll { dx: i32, dy: i32 },
    NavigateBack,
    NavigateForward,
}

/// Effector that only logs what it would do
#[derive(Debug, Default)]
pub struct LogEffector {
    moves: u64,
}

impl LogEffector {
    #[must_use]
    pub const fn new() -> Self {
        Self { moves: 0 }
    }
}

impl InputEffector for LogEffector {
    fn move_mouse(&mut self, point: ScreenPoint) {
        self.moves += 1;
        // Moves arrive every frame; keep the log readable
        if self.moves % 30 == 1 {
            info!("Pointer at ({:.0}, {:.0})", point.x, point.y);
        }
    }

    fn click(&mut self, point: ScreenPoint) {
        info!("Click at ({:.0}, {:.0})", point.x, point.y);
    }

    fn scroll(&mut self, dx: i32, dy: i32) {
        info!("Scroll by ({dx}, {dy})");
    }

    fn navigate_back(&mut self) {
        info!("Navigate back");
    }

    fn navigate_forward(&mut self) {
        info!("Navigate forward");
    }
}

/// Effector that records every action, shareable with the observer
#[derive(Debug, Clone, Default)]
pub struct RecordingEffector {
    actions: Arc<Mutex<Vec<InputAction>>>,
    screen: Option<ScreenMetrics>,
}

impl RecordingEffector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that reports `screen` as its display
    #[must_use]
    pub fn with_screen(screen: ScreenMetrics) -> Self {
        Self {
            actions: Arc::default(),
            screen: Some(screen),
        }
    }

    /// Copy of everything recorded so far
    #[must_use]
    pub fn actions(&self) -> Vec<InputAction> {
        self.actions.lock().clone()
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<InputAction> {
        std::mem::take(&mut *self.actions.lock())
    }

    #[must_use]
    pub fn clicks(&self) -> Vec<ScreenPoint> {
        self.actions
            .lock()
            .iter()
            .filter_map(|action| match action {
                InputAction::Click(point) => Some(*point),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn moves(&self) -> Vec<ScreenPoint> {
        self.actions
            .lock()
            .iter()
            .filter_map(|action| match action {
                InputAction::Move(point) => Some(*point),
                _ => None,
            })
            .collect()
    }

    /// Count of actions matching `predicate`
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&InputAction) -> bool) -> usize {
        self.actions.lock().iter().filter(|action| predicate(action)).count()
    }

    fn record(&self, action: InputAction) {
        self.actions.lock().push(action);
    }
}

impl InputEffector for RecordingEffector {
    fn move_mouse(&mut self, point: ScreenPoint) {
        self.record(InputAction::Move(point));
    }

    fn click(&mut self, point: ScreenPoint) {
        self.record(InputAction::Click(point));
    }

    fn scroll(&mut self, dx: i32, dy: i32) {
        self.record(InputAction::Scroll { dx, dy });
    }

    fn navigate_back(&mut self) {
        self.record(InputAction::NavigateBack);
    }

    fn navigate_forward(&mut self) {
        self.record(InputAction::NavigateForward);
    }

    fn screen_metrics(&self) -> Option<ScreenMetrics> {
        self.screen
    }
}

impl<E: InputEffector + ?Sized> InputEffector for Box<E> {
    fn move_mouse(&mut self, point: ScreenPoint) {
        (**self).move_mouse(point);
    }

    fn click(&mut self, point: ScreenPoint) {
        (**self).click(point);
    }

    fn scroll(&mut self, dx: i32, dy: i32) {
        (**self).scroll(dx, dy);
    }

    fn navigate_back(&mut self) {
        (**self).navigate_back();
    }

    fn navigate_forward(&mut self) {
        (**self).navigate_forward();
    }

    fn screen_metrics(&self) -> Option<ScreenMetrics> {
        (**self).screen_metrics()
    }
}
