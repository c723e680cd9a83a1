//! Debouncing of per-frame gesture candidates into a confirmed state.

use crate::classifier::GestureCandidate;

/// Confirmed gesture; same alphabet as the per-frame candidates
pub type GestureState = GestureCandidate;

/// A committed change of confirmed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: GestureState,
    pub to: GestureState,
}

/// Candidate debouncer.
///
/// Each observation is compared with the pending candidate of the previous
/// frame; repeats increment a confidence counter and a change restarts it at
/// zero. Once the counter reaches the threshold a differing pending
/// candidate becomes the current state.
#[derive(Debug, Clone)]
pub struct GestureStateMachine {
    threshold: u32,
    pending: GestureState,
    current: GestureState,
    previous: GestureState,
    confidence: u32,
}

impl GestureStateMachine {
    /// Create a state machine confirming after `threshold` repeats
    ///
    /// # Panics
    ///
    /// Panics if threshold is zero
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        assert!(threshold >= 1, "Confirmation threshold must be at least 1");
        Self {
            threshold,
            pending: GestureState::Unknown,
            current: GestureState::Unknown,
            previous: GestureState::Unknown,
            confidence: 0,
        }
    }

    /// Feed one frame's candidate, returning the transition it commits
    pub fn observe(&mut self, candidate: GestureCandidate) -> Option<Transition> {
        if candidate == self.pending {
            self.confidence = self.confidence.saturating_add(1);
        } else {
            self.pending = candidate;
            self.confidence = 0;
        }

        if self.confidence >= self.threshold && self.current != self.pending {
            self.previous = self.current;
            self.current = self.pending;
            return Some(Transition {
                from: self.previous,
                to: self.current,
            });
        }

        None
    }

    #[must_use]
    pub const fn current(&self) -> GestureState {
        self.current
    }

    #[must_use]
    pub const fn previous(&self) -> GestureState {
        self.previous
    }

    #[must_use]
    pub const fn pending(&self) -> GestureState {
        self.pending
    }

    #[must_use]
    pub const fn confidence(&self) -> u32 {
        self.confidence
    }

    /// Back to `Unknown` everywhere with a zero counter
    pub fn reset(&mut self) {
        self.pending = GestureState::Unknown;
        self.current = GestureState::Unknown;
        self.previous = GestureState::Unknown;
        self.confidence = 0;
    }
}

impl Default for GestureStateMachine {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_CONFIRMATION_FRAMES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GestureCandidate::{Fist, Pointer, Scroll, Unknown};

    #[test]
    fn test_confirms_on_second_frame() {
        let mut machine = GestureStateMachine::new(1);
        assert_eq!(machine.observe(Pointer), None);
        assert_eq!(machine.current(), Unknown);
        assert_eq!(
            machine.observe(Pointer),
            Some(Transition {
                from: Unknown,
                to: Pointer
            })
        );
        assert_eq!(machine.current(), Pointer);

        // Staying put commits nothing more
        assert_eq!(machine.observe(Pointer), None);
    }

    #[test]
    fn test_flicker_is_suppressed() {
        let mut machine = GestureStateMachine::new(2);
        for candidate in [Pointer, Fist, Pointer, Fist, Pointer] {
            assert_eq!(machine.observe(candidate), None);
        }
        assert_eq!(machine.current(), Unknown);
        assert_eq!(machine.confidence(), 0);
    }

    #[test]
    fn test_records_previous_state() {
        let mut machine = GestureStateMachine::new(1);
        machine.observe(Pointer);
        machine.observe(Pointer);
        machine.observe(Scroll);
        let transition = machine.observe(Scroll).unwrap();
        assert_eq!(transition.from, Pointer);
        assert_eq!(machine.previous(), Pointer);
        assert_eq!(machine.current(), Scroll);
    }

    #[test]
    fn test_reset() {
        let mut machine = GestureStateMachine::new(1);
        machine.observe(Fist);
        machine.observe(Fist);
        machine.reset();
        assert_eq!(machine.current(), Unknown);
        assert_eq!(machine.previous(), Unknown);
        assert_eq!(machine.pending(), Unknown);
        assert_eq!(machine.confidence(), 0);
    }

    #[test]
    #[should_panic(expected = "Confirmation threshold must be at least 1")]
    fn test_zero_threshold_rejected() {
        let _ = GestureStateMachine::new(0);
    }
}
