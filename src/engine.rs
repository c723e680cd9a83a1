//! Per-frame gesture pipeline.
//!
//! Runs on the worker thread only: classify the hand, debounce, fire
//! transition effects, drive the continuous controllers, detect pinches and
//! project the overlay, all in one synchronous pass per processed frame.

use log::debug;

use crate::classifier::classify_with;
use crate::config::{Config, GestureConfig, Settings};
use crate::effector::InputEffector;
use crate::landmarks::{HandGeometry, LandmarkSnapshot};
use crate::overlay::{OverlayAction, OverlayProjector, OverlayState};
use crate::pinch::PinchController;
use crate::pointer::{PointerController, ScreenMetrics, ScreenPoint};
use crate::scroll::ScrollController;
use crate::state_machine::{GestureState, GestureStateMachine, Transition};
use crate::utils::{normalize_timestamp, Cooldown};
use crate::Result;

/// Gesture interpretation state for one enabled session
pub struct GestureEngine {
    gestures: GestureConfig,
    state_machine: GestureStateMachine,
    pointer: PointerController,
    scroll: ScrollController,
    pinch: PinchController,
    navigation: Cooldown,
    overlay: OverlayProjector,
    generation: Option<u64>,
}

impl GestureEngine {
    /// Create an engine for a display of the given size
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the configuration is invalid
    pub fn new(config: &Config, screen: ScreenMetrics) -> Result<Self> {
        config.validate()?;
        let gestures = config.gestures.clone();
        Ok(Self {
            state_machine: GestureStateMachine::new(gestures.confirmation_frames),
            pointer: PointerController::new(&config.pointer, screen)?,
            scroll: ScrollController::new(),
            pinch: PinchController::new(gestures.pinch_start, gestures.pinch_release, gestures.click_cooldown),
            navigation: Cooldown::new(gestures.navigation_cooldown),
            overlay: OverlayProjector::new(),
            gestures,
            generation: None,
        })
    }

    /// Process one detector result.
    ///
    /// `hand` is `None` when no hand was found or detection failed. A
    /// snapshot with no joint at all counts as no hand. Returns the overlay
    /// for this frame.
    pub fn process<E>(
        &mut self,
        hand: Option<&LandmarkSnapshot>,
        timestamp: f64,
        settings: &Settings,
        effector: &mut E,
    ) -> OverlayState
    where
        E: InputEffector + ?Sized,
    {
        let timestamp = normalize_timestamp(timestamp);

        let Some(hand) = hand.filter(|hand| !hand.is_empty()) else {
            // Debounce counters survive; the next scroll run must reseed
            self.scroll.reset();
            return OverlayState::idle();
        };

        let Some(geometry) = hand.geometry() else {
            debug!("Hand without wrist or knuckle, skipping gestures");
            return self.overlay.project(self.state(), Some(hand), timestamp);
        };

        let candidate = classify_with(hand, &geometry);
        if let Some(transition) = self.state_machine.observe(candidate) {
            self.on_transition(transition, timestamp, effector);
        }

        let state = self.state();
        match state {
            GestureState::Pointer => {
                let target = self.pointer.update(geometry.palm_center(), timestamp, settings);
                effector.move_mouse(target);
            }
            GestureState::Fist | GestureState::Scroll => {
                if let Some(step) = self.scroll.update(geometry.wrist.y, timestamp, settings.scroll_speed) {
                    effector.scroll(0, step.dy);
                    self.overlay
                        .record_scroll(step.direction, timestamp, self.gestures.scroll_label_hold);
                }
            }
            _ => {}
        }

        self.handle_pinch(hand, &geometry, state, timestamp, settings, effector);

        self.overlay.project(state, Some(hand), timestamp)
    }

    fn on_transition<E>(&mut self, transition: Transition, timestamp: f64, effector: &mut E)
    where
        E: InputEffector + ?Sized,
    {
        debug!("Gesture {:?} -> {:?}", transition.from, transition.to);

        match transition.to {
            GestureState::Fist | GestureState::Scroll => self.scroll.reset(),
            GestureState::IndexLeft | GestureState::IndexRight => {
                if !self.navigation.try_fire(timestamp) {
                    debug!("Navigation suppressed by cooldown");
                    return;
                }
                // Mirrored camera: image-left is the user's right
                if transition.to == GestureState::IndexLeft {
                    debug!("Navigate forward");
                    effector.navigate_forward();
                } else {
                    debug!("Navigate back");
                    effector.navigate_back();
                }
            }
            _ => {}
        }
    }

    fn handle_pinch<E>(
        &mut self,
        hand: &LandmarkSnapshot,
        geometry: &HandGeometry,
        state: GestureState,
        timestamp: f64,
        settings: &Settings,
        effector: &mut E,
    ) where
        E: InputEffector + ?Sized,
    {
        let Some(distance) = PinchController::normalized_distance(hand, geometry) else {
            return;
        };

        let may_click = !matches!(state, GestureState::Fist | GestureState::Scroll);
        if !self.pinch.update(distance, timestamp, may_click) {
            return;
        }

        let point = self.click_point(hand, settings);
        debug!("Pinch click at ({:.0}, {:.0})", point.x, point.y);
        effector.click(point);
        self.overlay
            .flash(OverlayAction::Click, timestamp, self.gestures.click_flash);
    }

    fn click_point(&self, hand: &LandmarkSnapshot, settings: &Settings) -> ScreenPoint {
        if let Some(point) = self.pointer.last_screen_point() {
            return point;
        }
        hand.palm_center()
            .or(hand.index_tip)
            .map_or_else(ScreenPoint::default, |p| {
                self.pointer.map_to_screen(p, settings.sensitivity)
            })
    }

    /// Reset all session state if `generation` differs from the one this
    /// engine last processed
    pub fn sync_generation(&mut self, generation: u64) {
        match self.generation {
            Some(current) if current == generation => {}
            Some(current) => {
                debug!("Generation {current} -> {generation}, resetting gesture state");
                self.reset();
                self.generation = Some(generation);
            }
            None => self.generation = Some(generation),
        }
    }

    /// Forget everything learned in this session
    pub fn reset(&mut self) {
        self.state_machine.reset();
        self.pointer.reset();
        self.scroll.reset();
        self.pinch.reset();
        self.navigation.reset();
        self.overlay.reset();
    }

    /// Confirmed gesture
    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state_machine.current()
    }

    #[must_use]
    pub const fn state_machine(&self) -> &GestureStateMachine {
        &self.state_machine
    }

    #[must_use]
    pub const fn pinch_active(&self) -> bool {
        self.pinch.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effector::{InputAction, RecordingEffector};
    use crate::synthetic::HandPose;

    fn engine() -> GestureEngine {
        GestureEngine::new(&Config::default(), ScreenMetrics::default()).unwrap()
    }

    fn feed(engine: &mut GestureEngine, pose: HandPose, t: f64, effector: &mut RecordingEffector) -> OverlayState {
        engine.process(Some(&pose.snapshot()), t, &Settings::default(), effector)
    }

    #[test]
    fn test_pointer_moves_after_confirmation() {
        let mut engine = engine();
        let mut effector = RecordingEffector::new();
        let first = feed(&mut engine, HandPose::open_palm(), 0.0, &mut effector);
        assert_eq!(first.action, OverlayAction::Move);
        assert!(effector.moves().is_empty());

        feed(&mut engine, HandPose::open_palm(), 0.033, &mut effector);
        assert_eq!(engine.state(), GestureState::Pointer);
        assert_eq!(effector.moves().len(), 1);
    }

    #[test]
    fn test_no_hand_is_idle_and_keeps_state() {
        let mut engine = engine();
        let mut effector = RecordingEffector::new();
        feed(&mut engine, HandPose::fist(), 0.0, &mut effector);
        feed(&mut engine, HandPose::fist(), 0.033, &mut effector);
        let overlay = engine.process(None, 0.066, &Settings::default(), &mut effector);
        assert_eq!(overlay, OverlayState::idle());
        assert_eq!(engine.state(), GestureState::Fist);
    }

    #[test]
    fn test_snapshot_without_joints_is_no_hand() {
        let mut engine = engine();
        let mut effector = RecordingEffector::new();
        feed(&mut engine, HandPose::open_palm(), 0.0, &mut effector);
        feed(&mut engine, HandPose::open_palm(), 0.033, &mut effector);
        effector.take();

        let empty = LandmarkSnapshot::from_observations(Vec::new(), 0.3);
        let overlay = engine.process(Some(&empty), 0.066, &Settings::default(), &mut effector);
        assert_eq!(overlay, OverlayState::idle());
        assert_eq!(engine.state(), GestureState::Pointer);
        assert!(effector.actions().is_empty());
    }

    #[test]
    fn test_indeterminate_hand_skips_state_machine() {
        let mut engine = engine();
        let mut effector = RecordingEffector::new();
        let pose = HandPose::open_palm().without(crate::landmarks::Joint::Wrist);
        let overlay = feed(&mut engine, pose, 0.0, &mut effector);
        assert_eq!(overlay.action, OverlayAction::Move);
        assert!(overlay.hand_bounds.is_some());
        assert_eq!(engine.state_machine().pending(), GestureState::Unknown);
        assert_eq!(engine.state_machine().confidence(), 0);
        assert!(effector.actions().is_empty());
    }

    #[test]
    fn test_navigation_direction() {
        let mut engine = engine();
        let mut effector = RecordingEffector::new();
        feed(&mut engine, HandPose::index_left(), 0.0, &mut effector);
        let overlay = feed(&mut engine, HandPose::index_left(), 0.033, &mut effector);
        assert_eq!(overlay.action, OverlayAction::Forward);
        assert_eq!(effector.actions(), vec![InputAction::NavigateForward]);
    }

    #[test]
    fn test_sync_generation_resets_on_change() {
        let mut engine = engine();
        let mut effector = RecordingEffector::new();
        engine.sync_generation(0);
        feed(&mut engine, HandPose::fist(), 0.0, &mut effector);
        feed(&mut engine, HandPose::fist(), 0.033, &mut effector);
        assert_eq!(engine.state(), GestureState::Fist);

        engine.sync_generation(0);
        assert_eq!(engine.state(), GestureState::Fist);

        engine.sync_generation(1);
        assert_eq!(engine.state(), GestureState::Unknown);
        assert_eq!(engine.state_machine().confidence(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.gestures.confirmation_frames = 0;
        assert!(GestureEngine::new(&config, ScreenMetrics::default()).is_err());
    }
}
