//! Synthetic hand poses.
//!
//! Used by the scripted detector, the demo binary, tests and benchmarks. The
//! base hand has its wrist at `(0.5, 0.2)` and middle knuckle at `(0.5, 0.3)`
//! (hand scale 0.1); open fingers reach `y = 0.45`, closed fingers curl back
//! below their PIP joints at `y = 0.25`.

use crate::landmarks::{Finger, Joint, LandmarkSnapshot, Point};

const BASE_WRIST: Point = Point::new(0.5, 0.2);
const BASE_MIDDLE_MCP: Point = Point::new(0.5, 0.3);
const BASE_THUMB_TIP: Point = Point::new(0.55, 0.2);
const FINGER_BASE_X: [f64; 4] = [0.45, 0.5, 0.55, 0.6];
const OPEN_TIP_Y: f64 = 0.45;
const CLOSED_TIP_Y: f64 = 0.23;
const PIP_Y: f64 = 0.25;

/// A synthetic hand that can be moved, scaled and rotated rigidly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    snapshot: LandmarkSnapshot,
}

impl HandPose {
    /// Hand with the given open/closed state for index, middle, ring, little
    #[must_use]
    pub fn new(open: [bool; 4]) -> Self {
        let mut snapshot = LandmarkSnapshot::default()
            .with(Joint::Wrist, Some(BASE_WRIST))
            .with(Joint::MiddleMcp, Some(BASE_MIDDLE_MCP))
            .with(Joint::ThumbTip, Some(BASE_THUMB_TIP));

        for ((finger, is_open), x) in Finger::ALL.into_iter().zip(open).zip(FINGER_BASE_X) {
            let tip_y = if is_open { OPEN_TIP_Y } else { CLOSED_TIP_Y };
            snapshot = snapshot
                .with(finger.tip(), Some(Point::new(x, tip_y)))
                .with(finger.pip(), Some(Point::new(x, PIP_Y)));
        }

        Self { snapshot }
    }

    #[must_use]
    pub fn open_palm() -> Self {
        Self::new([true; 4])
    }

    #[must_use]
    pub fn fist() -> Self {
        Self::new([false; 4])
    }

    #[must_use]
    pub fn two_fingers() -> Self {
        Self::new([true, true, false, false])
    }

    /// Index extended sideways toward smaller image x
    #[must_use]
    pub fn index_left() -> Self {
        Self::new([true, false, false, false])
            .with_joint(Joint::IndexTip, Point::new(0.2, 0.3))
            .with_joint(Joint::IndexPip, Point::new(0.42, 0.26))
    }

    /// Index extended sideways toward larger image x
    #[must_use]
    pub fn index_right() -> Self {
        Self::new([true, false, false, false])
            .with_joint(Joint::IndexTip, Point::new(0.8, 0.3))
            .with_joint(Joint::IndexPip, Point::new(0.58, 0.26))
    }

    /// Move a single joint
    #[must_use]
    pub fn with_joint(mut self, joint: Joint, point: Point) -> Self {
        self.snapshot = self.snapshot.with(joint, Some(point));
        self
    }

    /// Drop a joint, as if the detector had low confidence for it
    #[must_use]
    pub fn without(mut self, joint: Joint) -> Self {
        self.snapshot = self.snapshot.with(joint, None);
        self
    }

    /// Place the thumb tip `distance` hand scales to the right of the index tip
    #[must_use]
    pub fn with_pinch_distance(self, distance: f64) -> Self {
        let (Some(index_tip), Some(geometry)) = (self.snapshot.index_tip, self.snapshot.geometry()) else {
            return self;
        };
        self.with_joint(
            Joint::ThumbTip,
            Point::new(index_tip.x + distance * geometry.scale, index_tip.y),
        )
    }

    /// Thumb touching the index tip
    #[must_use]
    pub fn pinching(self) -> Self {
        self.with_pinch_distance(0.1)
    }

    /// Palm center (midpoint of wrist and middle knuckle)
    #[must_use]
    pub fn palm_center(&self) -> Point {
        self.snapshot.palm_center().unwrap_or(BASE_WRIST.midpoint(BASE_MIDDLE_MCP))
    }

    /// Translate every joint
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        self.map_points(|p| Point::new(p.x + dx, p.y + dy))
    }

    /// Translate so the palm center lands on `center`
    #[must_use]
    pub fn centered_at(self, center: Point) -> Self {
        let palm = self.palm_center();
        self.translated(center.x - palm.x, center.y - palm.y)
    }

    /// Scale about the palm center
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        let c = self.palm_center();
        self.map_points(|p| Point::new(c.x + (p.x - c.x) * factor, c.y + (p.y - c.y) * factor))
    }

    /// Rotate about the palm center by `radians`
    #[must_use]
    pub fn rotated(self, radians: f64) -> Self {
        let c = self.palm_center();
        let (sin, cos) = radians.sin_cos();
        self.map_points(|p| {
            let (x, y) = (p.x - c.x, p.y - c.y);
            Point::new(c.x + x * cos - y * sin, c.y + x * sin + y * cos)
        })
    }

    fn map_points(mut self, f: impl Fn(Point) -> Point) -> Self {
        for joint in Joint::ALL {
            if let Some(point) = self.snapshot.get(joint) {
                self.snapshot = self.snapshot.with(joint, Some(f(point)));
            }
        }
        self
    }

    #[must_use]
    pub const fn snapshot(&self) -> LandmarkSnapshot {
        self.snapshot
    }
}

/// Scripted hand motion for the demo binary and the pipeline benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Open palm sweeping from camera x 0.3 to 0.7 over one second
    PalmSweep,
    /// Fist raised then lowered
    Scroll,
    /// Open palm pinching twice
    Pinch,
    /// Index pointing left, open palm, then index pointing right
    Navigate,
}

impl Scenario {
    pub const ALL: [Self; 4] = [Self::PalmSweep, Self::Scroll, Self::Pinch, Self::Navigate];

    /// Length of the script in seconds
    #[must_use]
    pub const fn duration(self) -> f64 {
        match self {
            Self::PalmSweep => 1.0,
            Self::Scroll => 1.6,
            Self::Pinch => 1.6,
            Self::Navigate => 1.8,
        }
    }

    /// Hand visible `t` seconds into the script
    #[must_use]
    pub fn hand_at(self, t: f64) -> Option<LandmarkSnapshot> {
        let pose = match self {
            Self::PalmSweep => {
                let progress = (t / self.duration()).clamp(0.0, 1.0);
                HandPose::open_palm().centered_at(Point::new(0.3 + 0.4 * progress, 0.5))
            }
            Self::Scroll => {
                if t < 0.3 {
                    HandPose::open_palm().centered_at(Point::new(0.5, 0.4))
                } else if t < 0.95 {
                    let rise = (t - 0.3) * 0.5;
                    HandPose::fist().centered_at(Point::new(0.5, 0.4 + rise))
                } else {
                    let fall = (t - 0.95) * 0.5;
                    HandPose::fist().centered_at(Point::new(0.5, 0.725 - fall))
                }
            }
            Self::Pinch => {
                let pinched = (0.4..0.7).contains(&t) || (1.0..1.3).contains(&t);
                let pose = HandPose::open_palm().centered_at(Point::new(0.5, 0.5));
                if pinched {
                    pose.pinching()
                } else {
                    pose.with_pinch_distance(1.0)
                }
            }
            Self::Navigate => {
                if t < 0.6 {
                    HandPose::index_left()
                } else if t < 1.2 {
                    HandPose::open_palm()
                } else if t < 1.8 {
                    HandPose::index_right()
                } else {
                    return None;
                }
            }
        };
        Some(pose.snapshot())
    }
}
