//! Landmark-to-gesture classification.
//!
//! Classification is a pure function of one snapshot. All distances are
//! measured relative to the hand scale `distance(wrist, middle knuckle)`, so
//! the result does not depend on how far the hand is from the camera, where
//! it sits in the frame, or how it is rotated in the image plane (the
//! left/right gesture aside, which is defined on the image x axis).

use crate::constants::{FINGER_OPEN_SCALE, INDEX_DISPLACEMENT_SCALE, INDEX_HORIZONTAL_DOMINANCE};
use crate::landmarks::{Finger, HandGeometry, LandmarkSnapshot};

/// Gesture suggested by a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureCandidate {
    #[default]
    Unknown,
    /// Open palm, all four fingers extended
    Pointer,
    /// All four fingers curled
    Fist,
    /// Only the index extended, tip toward smaller image x
    IndexLeft,
    /// Only the index extended, tip toward larger image x
    IndexRight,
    /// Index and middle extended
    Scroll,
}

/// Classify a snapshot.
///
/// Returns `Unknown` when wrist or middle knuckle is missing or the hand
/// scale is zero.
#[must_use]
pub fn classify(snapshot: &LandmarkSnapshot) -> GestureCandidate {
    snapshot
        .geometry()
        .map_or(GestureCandidate::Unknown, |geometry| classify_with(snapshot, &geometry))
}

/// Classify a snapshot whose scale anchors are already known
#[must_use]
pub fn classify_with(snapshot: &LandmarkSnapshot, geometry: &HandGeometry) -> GestureCandidate {
    let [index, middle, ring, little] = Finger::ALL.map(|finger| is_finger_open(snapshot, geometry, finger));

    if index && middle && ring && little {
        return GestureCandidate::Pointer;
    }

    if index && !middle && !ring && !little {
        if let Some(direction) = index_direction(snapshot, geometry) {
            return direction;
        }
    }

    if !index && !middle && !ring && !little {
        return GestureCandidate::Fist;
    }

    if index && middle && !ring && !little {
        return GestureCandidate::Scroll;
    }

    GestureCandidate::Unknown
}

/// A finger is open iff its tip is farther from the wrist than its PIP joint
/// and farther than `1.1 × handScale`. Missing joints read as closed.
#[must_use]
pub fn is_finger_open(snapshot: &LandmarkSnapshot, geometry: &HandGeometry, finger: Finger) -> bool {
    let (Some(tip), Some(pip)) = (snapshot.get(finger.tip()), snapshot.get(finger.pip())) else {
        return false;
    };
    let tip_distance = tip.distance(geometry.wrist);
    tip_distance > pip.distance(geometry.wrist) && tip_distance > geometry.scale * FINGER_OPEN_SCALE
}

/// Horizontal pointing direction of the index finger, measured from the
/// middle knuckle. The displacement must be predominantly horizontal and
/// strictly beyond `0.35 × handScale`.
fn index_direction(snapshot: &LandmarkSnapshot, geometry: &HandGeometry) -> Option<GestureCandidate> {
    let tip = snapshot.index_tip?;
    let dx = tip.x - geometry.middle_mcp.x;
    let dy = tip.y - geometry.middle_mcp.y;

    if dx.abs() <= INDEX_HORIZONTAL_DOMINANCE * dy.abs() || dx.abs() <= INDEX_DISPLACEMENT_SCALE * geometry.scale {
        return None;
    }

    Some(if dx < 0.0 {
        GestureCandidate::IndexLeft
    } else {
        GestureCandidate::IndexRight
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{Joint, Point};
    use crate::synthetic::HandPose;

    #[test]
    fn test_basic_poses() {
        assert_eq!(classify(&HandPose::open_palm().snapshot()), GestureCandidate::Pointer);
        assert_eq!(classify(&HandPose::fist().snapshot()), GestureCandidate::Fist);
        assert_eq!(classify(&HandPose::two_fingers().snapshot()), GestureCandidate::Scroll);
    }

    #[test]
    fn test_index_directions() {
        assert_eq!(classify(&HandPose::index_left().snapshot()), GestureCandidate::IndexLeft);
        assert_eq!(classify(&HandPose::index_right().snapshot()), GestureCandidate::IndexRight);
    }

    #[test]
    fn test_index_pointing_up_is_unknown() {
        // Only the index is open but it points along the hand axis
        let snapshot = HandPose::fist().snapshot().with(Joint::IndexTip, Some(Point::new(0.45, 0.45)));
        assert_eq!(classify(&snapshot), GestureCandidate::Unknown);
    }

    #[test]
    fn test_missing_anchor_is_unknown() {
        let snapshot = HandPose::open_palm().snapshot().with(Joint::Wrist, None);
        assert_eq!(classify(&snapshot), GestureCandidate::Unknown);

        let snapshot = HandPose::open_palm().snapshot().with(Joint::MiddleMcp, None);
        assert_eq!(classify(&snapshot), GestureCandidate::Unknown);
    }

    #[test]
    fn test_zero_scale_is_unknown() {
        let snapshot = HandPose::open_palm()
            .snapshot()
            .with(Joint::Wrist, Some(Point::new(0.5, 0.3)))
            .with(Joint::MiddleMcp, Some(Point::new(0.5, 0.3)));
        assert_eq!(classify(&snapshot), GestureCandidate::Unknown);
    }

    #[test]
    fn test_missing_pip_reads_closed() {
        let snapshot = HandPose::open_palm().snapshot().with(Joint::LittlePip, None);
        // Three fingers open, little treated as closed
        assert_eq!(classify(&snapshot), GestureCandidate::Unknown);
    }
}
