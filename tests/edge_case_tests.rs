//! Edge cases: broken timestamps, partial or degenerate hands, extreme settings


use gesture_control::{
    config::Settings,
    detector::{HandPoseDetector, ScriptedDetector, SyntheticImage},
    effector::InputAction,
    landmarks::{Joint, LandmarkSnapshot, Point},
    overlay::OverlayAction,
    state_machine::GestureState,
    synthetic::HandPose,
};
use proptest::prelude::*;
use test_helpers::{Harness, SCREEN};

fn on_screen(action: &InputAction) -> bool {
    match action {
        InputAction::Move(p) | InputAction::Click(p) => {
            p.x.is_finite() && p.y.is_finite() && (0.0..=SCREEN.width).contains(&p.x) && (0.0..=SCREEN.height).contains(&p.y)
        }
        _ => true,
    }
}

#[test]
fn test_non_finite_timestamps() {
    let mut harness = Harness::with_defaults();
    let hand = HandPose::open_palm().snapshot();
    let settings = Settings::default();

    for timestamp in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        harness
            .engine
            .process(Some(&hand), timestamp, &settings, &mut harness.effector);
    }

    let moves = harness.effector.moves();
    assert_eq!(moves.len(), 3);
    assert!(harness.effector.actions().iter().all(on_screen));
}

#[test]
fn test_non_finite_and_low_confidence_landmarks_are_dropped() {
    let observations = vec![
        (Joint::Wrist, Point::new(0.5, 0.2), 0.9),
        (Joint::MiddleMcp, Point::new(f64::NAN, 0.3), 0.9),
        (Joint::IndexTip, Point::new(0.45, f64::INFINITY), 0.9),
        (Joint::ThumbTip, Point::new(0.55, 0.2), 0.1),
        (Joint::LittleTip, Point::new(0.6, 0.45), 0.3),
    ];
    let snapshot = LandmarkSnapshot::from_observations(observations, 0.3);

    assert_eq!(snapshot.wrist, Some(Point::new(0.5, 0.2)));
    assert_eq!(snapshot.middle_mcp, None);
    assert_eq!(snapshot.index_tip, None);
    assert_eq!(snapshot.thumb_tip, None);
    // Confidence equal to the threshold is kept
    assert_eq!(snapshot.little_tip, Some(Point::new(0.6, 0.45)));
    assert!(snapshot.geometry().is_none());
}

#[test]
fn test_hand_without_anchor_shows_overlay_only() {
    let mut harness = Harness::with_defaults();
    let hand = HandPose::open_palm().without(Joint::MiddleMcp).snapshot();

    let overlay = harness.hold(hand, 5);
    assert_eq!(overlay.action, OverlayAction::Move);
    assert!(overlay.hand_bounds.is_some());
    assert_eq!(harness.engine.state(), GestureState::Unknown);
    assert!(harness.effector.actions().is_empty());
}

#[test]
fn test_degenerate_hand_scale() {
    let mut harness = Harness::with_defaults();
    let hand = HandPose::open_palm()
        .with_joint(Joint::MiddleMcp, Point::new(0.5, 0.2))
        .pinching()
        .snapshot();

    harness.hold(hand, 5);
    assert_eq!(harness.engine.state_machine().confidence(), 0);
    assert!(harness.effector.actions().is_empty());
}

#[test]
fn test_confirmed_state_survives_indeterminate_frames() {
    let mut harness = Harness::with_defaults();
    harness.hold(HandPose::fist().snapshot(), 2);
    harness.hold(HandPose::open_palm().without(Joint::Wrist).snapshot(), 3);
    assert_eq!(harness.engine.state(), GestureState::Fist);
}

#[test]
fn test_time_going_backwards_expires_cooldowns() {
    let mut harness = Harness::with_defaults();
    harness.time = 10.0;
    harness.hold(HandPose::index_left().snapshot(), 2);
    harness.hold(HandPose::open_palm().snapshot(), 2);

    // Capture source restarted its clock
    harness.time = 0.5;
    harness.hold(HandPose::index_left().snapshot(), 2);

    assert_eq!(harness.effector.count(|a| *a == InputAction::NavigateForward), 2);
    assert!(harness.effector.actions().iter().all(on_screen));
}

#[test]
fn test_extreme_sensitivity_stays_on_screen() {
    let mut harness = Harness::with_defaults();
    harness.settings = Settings {
        sensitivity: 50.0,
        ..Settings::default()
    };

    for (x, y) in [(0.0, 0.0), (1.0, 1.0), (0.05, 0.95), (0.5, 0.5), (0.99, 0.01)] {
        let hand = HandPose::open_palm().centered_at(Point::new(x, y)).snapshot();
        harness.hold(hand, 3);
    }
    assert!(!harness.effector.moves().is_empty());
    assert!(harness.effector.actions().iter().all(on_screen));

    assert_eq!(harness.settings.clamped().sensitivity, 3.0);
}

#[test]
fn test_hand_outside_frame_bounds_are_clamped() {
    let mut harness = Harness::with_defaults();
    let hand = HandPose::open_palm().translated(0.45, -0.19).snapshot();
    let bounds = harness.step(Some(hand)).hand_bounds.unwrap();

    assert!(bounds.min_x() >= 0.0 && bounds.max_x() <= 1.0 + 1e-9);
    assert!(bounds.min_y() >= 0.0 && bounds.max_y() <= 1.0 + 1e-9);
    assert!(bounds.max_x() > 0.999);
    assert_eq!(bounds.min_y(), 0.0);
}

#[test]
fn test_failing_detector_image() {
    let mut detector = ScriptedDetector::new(0.3);
    assert!(detector.detect(&SyntheticImage::failing(1)).is_err());

    // Every joint below threshold: no hand at all
    let hand = HandPose::open_palm().snapshot();
    assert_eq!(detector.detect(&SyntheticImage::with_hand(2, &hand, 0.29)).unwrap(), None);
}

#[test]
fn test_long_pause_restarts_pointer_without_jump_lag() {
    let mut harness = Harness::with_defaults();
    harness.hold(HandPose::open_palm().centered_at(Point::new(0.3, 0.5)).snapshot(), 3);
    harness.wait(2.0);
    harness.step(Some(HandPose::open_palm().centered_at(Point::new(0.7, 0.5)).snapshot()));

    let moves = harness.effector.moves();
    let last = moves.last().unwrap();
    // Fresh filter lands exactly on the mapped palm: mirrored camera x 0.7 is the left edge
    assert!(last.x < 1.0);
}

fn point_strategy() -> impl Strategy<Value = Option<Point>> {
    prop::option::weighted(0.9, (-0.5..1.5f64, -0.5..1.5f64).prop_map(|(x, y)| Point::new(x, y)))
}

fn snapshot_strategy() -> impl Strategy<Value = Option<LandmarkSnapshot>> {
    prop::option::weighted(
        0.9,
        prop::collection::vec(point_strategy(), Joint::ALL.len()).prop_map(|points| {
            Joint::ALL
                .into_iter()
                .zip(points)
                .fold(LandmarkSnapshot::default(), |snapshot, (joint, point)| snapshot.with(joint, point))
        }),
    )
}

proptest! {
    #[test]
    fn prop_arbitrary_frames_never_leave_the_screen(
        frames in prop::collection::vec((snapshot_strategy(), 0.0..0.2f64), 1..60),
    ) {
        let mut harness = Harness::with_defaults();
        for (hand, gap) in frames {
            let overlay = harness.step(hand);
            harness.wait(gap);
            if let Some(bounds) = overlay.hand_bounds {
                prop_assert!(bounds.min_x() >= 0.0 && bounds.max_x() <= 1.0 + 1e-9);
                prop_assert!(bounds.min_y() >= 0.0 && bounds.max_y() <= 1.0 + 1e-9);
            }
        }
        prop_assert!(harness.effector.actions().iter().all(on_screen));
    }
}
