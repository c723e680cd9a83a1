//! Per-frame hand landmark snapshots.
//!
//! Points are normalized to `[0, 1]` image space as delivered by the
//! hand-pose detector (origin bottom-left, y growing upward). Every joint is
//! optional: low-confidence or undetected joints are simply absent, and the
//! named accessors make that a branch callers must handle.

use crate::constants::HAND_BOUNDS_PADDING;

/// A normalized 2-D point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between two points
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Axis-aligned rectangle in normalized image space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the point lies inside or on the edge of the rectangle
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x() && point.x <= self.max_x() && point.y >= self.min_y() && point.y <= self.max_y()
    }
}

/// The hand joints tracked by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    ThumbTip,
    IndexTip,
    MiddleTip,
    RingTip,
    LittleTip,
    IndexPip,
    MiddlePip,
    RingPip,
    LittlePip,
    Wrist,
    MiddleMcp,
}

impl Joint {
    /// Every tracked joint
    pub const ALL: [Self; 11] = [
        Self::ThumbTip,
        Self::IndexTip,
        Self::MiddleTip,
        Self::RingTip,
        Self::LittleTip,
        Self::IndexPip,
        Self::MiddlePip,
        Self::RingPip,
        Self::LittlePip,
        Self::Wrist,
        Self::MiddleMcp,
    ];
}

/// The four non-thumb fingers, in index-to-little order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    pub const ALL: [Self; 4] = [Self::Index, Self::Middle, Self::Ring, Self::Little];

    /// Tip joint of this finger
    #[must_use]
    pub const fn tip(self) -> Joint {
        match self {
            Self::Index => Joint::IndexTip,
            Self::Middle => Joint::MiddleTip,
            Self::Ring => Joint::RingTip,
            Self::Little => Joint::LittleTip,
        }
    }

    /// Proximal interphalangeal joint of this finger
    #[must_use]
    pub const fn pip(self) -> Joint {
        match self {
            Self::Index => Joint::IndexPip,
            Self::Middle => Joint::MiddlePip,
            Self::Ring => Joint::RingPip,
            Self::Little => Joint::LittlePip,
        }
    }
}

/// Immutable snapshot of one detected hand
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LandmarkSnapshot {
    pub thumb_tip: Option<Point>,
    pub index_tip: Option<Point>,
    pub middle_tip: Option<Point>,
    pub ring_tip: Option<Point>,
    pub little_tip: Option<Point>,
    pub index_pip: Option<Point>,
    pub middle_pip: Option<Point>,
    pub ring_pip: Option<Point>,
    pub little_pip: Option<Point>,
    pub wrist: Option<Point>,
    pub middle_mcp: Option<Point>,
}

impl LandmarkSnapshot {
    /// Build a snapshot from raw detector observations.
    ///
    /// Observations below `min_confidence`, or with non-finite coordinates,
    /// are dropped. Later observations of the same joint replace earlier ones.
    pub fn from_observations<I>(observations: I, min_confidence: f32) -> Self
    where
        I: IntoIterator<Item = (Joint, Point, f32)>,
    {
        let mut snapshot = Self::default();
        for (joint, point, confidence) in observations {
            if confidence < min_confidence || !point.x.is_finite() || !point.y.is_finite() {
                continue;
            }
            *snapshot.slot_mut(joint) = Some(point);
        }
        snapshot
    }

    /// Location of a joint, if it was detected
    #[must_use]
    pub const fn get(&self, joint: Joint) -> Option<Point> {
        match joint {
            Joint::ThumbTip => self.thumb_tip,
            Joint::IndexTip => self.index_tip,
            Joint::MiddleTip => self.middle_tip,
            Joint::RingTip => self.ring_tip,
            Joint::LittleTip => self.little_tip,
            Joint::IndexPip => self.index_pip,
            Joint::MiddlePip => self.middle_pip,
            Joint::RingPip => self.ring_pip,
            Joint::LittlePip => self.little_pip,
            Joint::Wrist => self.wrist,
            Joint::MiddleMcp => self.middle_mcp,
        }
    }

    /// Replace a joint, returning the modified snapshot
    #[must_use]
    pub fn with(mut self, joint: Joint, point: Option<Point>) -> Self {
        *self.slot_mut(joint) = point;
        self
    }

    fn slot_mut(&mut self, joint: Joint) -> &mut Option<Point> {
        match joint {
            Joint::ThumbTip => &mut self.thumb_tip,
            Joint::IndexTip => &mut self.index_tip,
            Joint::MiddleTip => &mut self.middle_tip,
            Joint::RingTip => &mut self.ring_tip,
            Joint::LittleTip => &mut self.little_tip,
            Joint::IndexPip => &mut self.index_pip,
            Joint::MiddlePip => &mut self.middle_pip,
            Joint::RingPip => &mut self.ring_pip,
            Joint::LittlePip => &mut self.little_pip,
            Joint::Wrist => &mut self.wrist,
            Joint::MiddleMcp => &mut self.middle_mcp,
        }
    }

    /// All detected points
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        Joint::ALL.iter().filter_map(move |&joint| self.get(joint))
    }

    /// Whether no joint at all was detected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points().next().is_none()
    }

    /// Scale anchors of the hand, if both wrist and middle knuckle are present
    #[must_use]
    pub fn geometry(&self) -> Option<HandGeometry> {
        HandGeometry::new(self.wrist?, self.middle_mcp?)
    }

    /// Midpoint of wrist and middle knuckle
    #[must_use]
    pub fn palm_center(&self) -> Option<Point> {
        Some(self.wrist?.midpoint(self.middle_mcp?))
    }

    /// Point the overlay marks: palm center, else index tip, else wrist
    #[must_use]
    pub fn reference_point(&self) -> Option<Point> {
        self.palm_center().or(self.index_tip).or(self.wrist)
    }

    /// Bounding box of every detected point, padded by 15% of its larger
    /// side on each edge and clamped to the unit square
    #[must_use]
    pub fn padded_bounds(&self) -> Option<NormalizedRect> {
        let mut points = self.points();
        let first = points.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let pad = (max_x - min_x).max(max_y - min_y) * HAND_BOUNDS_PADDING;
        let left = (min_x - pad).clamp(0.0, 1.0);
        let bottom = (min_y - pad).clamp(0.0, 1.0);
        let right = (max_x + pad).clamp(0.0, 1.0);
        let top = (max_y + pad).clamp(0.0, 1.0);

        Some(NormalizedRect {
            x: left,
            y: bottom,
            width: right - left,
            height: top - bottom,
        })
    }
}

/// Wrist and middle knuckle of a hand plus the scale they define
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandGeometry {
    pub wrist: Point,
    pub middle_mcp: Point,
    /// `distance(wrist, middle_mcp)`; always positive and finite
    pub scale: f64,
}

impl HandGeometry {
    /// Returns `None` for degenerate geometry (zero or non-finite scale)
    #[must_use]
    pub fn new(wrist: Point, middle_mcp: Point) -> Option<Self> {
        let scale = wrist.distance(middle_mcp);
        (scale > 0.0 && scale.is_finite()).then_some(Self {
            wrist,
            middle_mcp,
            scale,
        })
    }

    /// Palm center used as the pointer source
    #[must_use]
    pub fn palm_center(&self) -> Point {
        self.wrist.midpoint(self.middle_mcp)
    }
}
