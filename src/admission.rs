//! Frame admission with single-slot coalescing.
//!
//! At most one frame is in flight at a time. Frames arriving meanwhile
//! overwrite a single pending slot, so under overload only the newest frame
//! is processed next. Every admitted item is stamped with the generation
//! current at admission; `reset` bumps the generation so results from older
//! tickets can be recognised and dropped.

use parking_lot::Mutex;

/// One captured frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<I> {
    pub image: I,
    /// Presentation timestamp in seconds
    pub timestamp: f64,
}

impl<I> Frame<I> {
    /// Frame with a normalized timestamp
    #[must_use]
    pub fn new(image: I, timestamp: f64) -> Self {
        Self {
            image,
            timestamp: crate::utils::normalize_timestamp(timestamp),
        }
    }
}

/// Receiver of captured frames; called from the capture thread
pub trait FrameSink<I>: Send + Sync {
    /// Hand over one frame. Must not block.
    fn submit(&self, frame: Frame<I>);
}

/// An admitted item tagged with its admission generation
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket<T> {
    pub generation: u64,
    pub item: T,
}

#[derive(Debug)]
struct AdmissionState<T> {
    generation: u64,
    in_flight: bool,
    pending: Option<Ticket<T>>,
}

/// Bookkeeping for the in-flight flag, pending slot and generation
#[derive(Debug)]
pub struct AdmissionController<T> {
    state: Mutex<AdmissionState<T>>,
}

impl<T> Default for AdmissionController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AdmissionController<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(AdmissionState {
                generation: 0,
                in_flight: false,
                pending: None,
            }),
        }
    }

    /// Admit an item.
    ///
    /// Returns the ticket to dispatch immediately when nothing is in flight.
    /// Otherwise the item replaces whatever was pending and `None` is
    /// returned; it will come back from [`complete`](Self::complete).
    pub fn admit(&self, item: T) -> Option<Ticket<T>> {
        let mut state = self.state.lock();
        let ticket = Ticket {
            generation: state.generation,
            item,
        };
        if state.in_flight {
            state.pending = Some(ticket);
            None
        } else {
            state.in_flight = true;
            Some(ticket)
        }
    }

    /// Mark the dispatched ticket as done.
    ///
    /// Returns the pending ticket, which is now in flight, or clears the
    /// in-flight flag when nothing is pending.
    pub fn complete(&self) -> Option<Ticket<T>> {
        let mut state = self.state.lock();
        let next = state.pending.take();
        state.in_flight = next.is_some();
        next
    }

    /// Give up on the dispatched ticket without processing it.
    ///
    /// Clears the in-flight flag and drops anything admitted meanwhile, so
    /// the next admitted item dispatches immediately.
    pub fn abort(&self) {
        let mut state = self.state.lock();
        state.in_flight = false;
        state.pending = None;
    }

    /// Invalidate outstanding work: bump the generation and drop the
    /// pending slot. Returns the new generation.
    pub fn reset(&self) -> u64 {
        let mut state = self.state.lock();
        state.generation = state.generation.wrapping_add(1);
        state.pending = None;
        state.generation
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Whether a result stamped with `generation` is still wanted
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.state.lock().generation == generation
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.state.lock().in_flight
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_dispatches_immediately() {
        let admission = AdmissionController::new();
        let ticket = admission.admit(1).unwrap();
        assert_eq!(ticket, Ticket { generation: 0, item: 1 });
        assert!(admission.is_in_flight());
        assert_eq!(admission.complete(), None);
        assert!(!admission.is_in_flight());
    }

    #[test]
    fn test_burst_coalesces_to_latest() {
        let admission = AdmissionController::new();
        assert!(admission.admit(1).is_some());
        assert!(admission.admit(2).is_none());
        assert!(admission.admit(3).is_none());

        let next = admission.complete().unwrap();
        assert_eq!(next.item, 3);
        assert!(admission.is_in_flight());
        assert_eq!(admission.complete(), None);
    }

    #[test]
    fn test_reset_drops_pending_and_bumps_generation() {
        let admission = AdmissionController::new();
        let first = admission.admit("a").unwrap();
        admission.admit("b");

        assert_eq!(admission.reset(), 1);
        assert!(!admission.has_pending());
        assert!(!admission.is_current(first.generation));

        // The in-flight frame still completes normally
        assert_eq!(admission.complete(), None);
        let fresh = admission.admit("c").unwrap();
        assert_eq!(fresh.generation, 1);
        assert!(admission.is_current(fresh.generation));
    }

    #[test]
    fn test_abort_releases_in_flight_and_pending() {
        let admission = AdmissionController::new();
        assert!(admission.admit(1).is_some());
        assert!(admission.admit(2).is_none());

        admission.abort();
        assert!(!admission.is_in_flight());
        assert!(!admission.has_pending());
        assert_eq!(admission.admit(3).map(|t| t.item), Some(3));
    }

    #[test]
    fn test_frame_timestamp_is_normalized() {
        let frame = Frame::new((), f64::NAN);
        assert_eq!(frame.timestamp, 0.0);
        assert_eq!(Frame::new((), 1.5).timestamp, 1.5);
    }
}
