//! Projection of pipeline state into what the UI overlay shows.

use crate::landmarks::{LandmarkSnapshot, NormalizedRect, Point};
use crate::scroll::ScrollDirection;
use crate::state_machine::GestureState;
use crate::utils::Timed;

/// Label shown by the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlayAction {
    #[default]
    Idle,
    Move,
    Scroll,
    ScrollUp,
    ScrollDown,
    Back,
    Forward,
    Click,
}

impl OverlayAction {
    /// Human-readable title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Move => "Move",
            Self::Scroll => "Scroll",
            Self::ScrollUp => "Scroll Up",
            Self::ScrollDown => "Scroll Down",
            Self::Back => "Back",
            Self::Forward => "Forward",
            Self::Click => "Click",
        }
    }
}

/// Everything the UI needs to draw the overlay for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayState {
    pub action: OverlayAction,
    pub hand_bounds: Option<NormalizedRect>,
    pub hand_point: Option<Point>,
}

impl OverlayState {
    /// Nothing to draw
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Holds the time-bounded inputs of the overlay (click flash, scroll label)
#[derive(Debug, Clone, Default)]
pub struct OverlayProjector {
    override_action: Option<Timed<OverlayAction>>,
    scroll_direction: Option<Timed<ScrollDirection>>,
}

impl OverlayProjector {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            override_action: None,
            scroll_direction: None,
        }
    }

    /// Replace the computed action with `action` until `now + duration`
    pub fn flash(&mut self, action: OverlayAction, now: f64, duration: f64) {
        self.override_action = Some(Timed::new(action, now, duration));
    }

    /// Keep labelling scrolls with `direction` until `now + hold`
    pub fn record_scroll(&mut self, direction: ScrollDirection, now: f64, hold: f64) {
        self.scroll_direction = Some(Timed::new(direction, now, hold));
    }

    /// Project the overlay for the most recent frame.
    ///
    /// With no hand the result is always `Idle` with empty geometry.
    #[must_use]
    pub fn project(&self, state: GestureState, hand: Option<&LandmarkSnapshot>, now: f64) -> OverlayState {
        let Some(hand) = hand else {
            return OverlayState::idle();
        };

        let action = self
            .override_action
            .and_then(|held| held.get(now))
            .unwrap_or_else(|| self.action_for(state, now));

        OverlayState {
            action,
            hand_bounds: hand.padded_bounds(),
            hand_point: hand.reference_point(),
        }
    }

    fn action_for(&self, state: GestureState, now: f64) -> OverlayAction {
        match state {
            GestureState::Unknown | GestureState::Pointer => OverlayAction::Move,
            GestureState::Fist | GestureState::Scroll => match self.scroll_direction.and_then(|held| held.get(now)) {
                Some(ScrollDirection::Up) => OverlayAction::ScrollUp,
                Some(ScrollDirection::Down) => OverlayAction::ScrollDown,
                None => OverlayAction::Scroll,
            },
            // Mirrored camera: tip toward image-left points to the user's right
            GestureState::IndexLeft => OverlayAction::Forward,
            GestureState::IndexRight => OverlayAction::Back,
        }
    }

    pub fn reset(&mut self) {
        self.override_action = None;
        self.scroll_direction = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::HandPose;

    #[test]
    fn test_no_hand_is_idle() {
        let mut projector = OverlayProjector::new();
        projector.flash(OverlayAction::Click, 0.0, 10.0);
        let overlay = projector.project(GestureState::Pointer, None, 1.0);
        assert_eq!(overlay, OverlayState::idle());
    }

    #[test]
    fn test_state_mapping() {
        let projector = OverlayProjector::new();
        let hand = HandPose::open_palm().snapshot();
        let cases = [
            (GestureState::Unknown, OverlayAction::Move),
            (GestureState::Pointer, OverlayAction::Move),
            (GestureState::Fist, OverlayAction::Scroll),
            (GestureState::Scroll, OverlayAction::Scroll),
            (GestureState::IndexLeft, OverlayAction::Forward),
            (GestureState::IndexRight, OverlayAction::Back),
        ];
        for (state, expected) in cases {
            let overlay = projector.project(state, Some(&hand), 0.0);
            assert_eq!(overlay.action, expected, "state {state:?}");
            assert!(overlay.hand_bounds.is_some());
            assert_eq!(overlay.hand_point, hand.palm_center());
        }
    }

    #[test]
    fn test_click_flash_expires() {
        let mut projector = OverlayProjector::new();
        let hand = HandPose::open_palm().snapshot();
        projector.flash(OverlayAction::Click, 1.0, 0.6);
        assert_eq!(projector.project(GestureState::Pointer, Some(&hand), 1.5).action, OverlayAction::Click);
        assert_eq!(projector.project(GestureState::Pointer, Some(&hand), 1.7).action, OverlayAction::Move);
    }

    #[test]
    fn test_scroll_label_hold() {
        let mut projector = OverlayProjector::new();
        let hand = HandPose::fist().snapshot();
        projector.record_scroll(ScrollDirection::Down, 2.0, 0.4);
        assert_eq!(projector.project(GestureState::Fist, Some(&hand), 2.3).action, OverlayAction::ScrollDown);
        assert_eq!(projector.project(GestureState::Fist, Some(&hand), 2.5).action, OverlayAction::Scroll);
    }
}
