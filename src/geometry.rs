//! Geometry primitives for the annotation core.
//!
//! All annotation geometry is stored in normalized image space, where the
//! full source image spans [0,1] x [0,1]. The same types also describe
//! pixel-space rectangles (the viewport and the display region), so none of
//! the operations here assume a particular coordinate space.

use serde::{Deserialize, Serialize};

/// A 2D point. Used in both viewport-pixel space and normalized image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// An axis-aligned bounding box, stored as min/max corners.
///
/// Invariant: `min.x <= max.x && min.y <= max.y`. All constructors uphold
/// this; code that mutates the corners directly must too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox2D {
    pub min: Point2D,
    pub max: Point2D,
}

impl BBox2D {
    pub fn new(min: Point2D, max: Point2D) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y, "inverted bbox corners");
        Self { min, max }
    }

    /// The full normalized image: [0,0] - [1,1].
    pub fn unit() -> Self {
        Self::new(Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0))
    }

    /// Build a box from two corner points in any order.
    ///
    /// Takes the componentwise min as `min` and max as `max`, so the result
    /// is independent of which corner was clicked first.
    pub fn from_two_points(a: Point2D, b: Point2D) -> Self {
        Self {
            min: Point2D::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2D::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Build a box from four extreme points ordered
    /// [leftmost, topmost, rightmost, bottommost].
    ///
    /// Callers must validate the ordering first (see
    /// [`validate_extreme_points`]); an unvalidated set can produce an
    /// inverted box.
    pub fn from_extreme_points(pts: &[Point2D; 4]) -> Self {
        Self::new(
            Point2D::new(pts[0].x, pts[1].y),
            Point2D::new(pts[2].x, pts[3].y),
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True if the box has zero width or zero height.
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Check if a point is inside the box. Edges count as inside.
    pub fn contains(&self, pt: &Point2D) -> bool {
        pt.x >= self.min.x && pt.x <= self.max.x && pt.y >= self.min.y && pt.y <= self.max.y
    }

    /// Intersection with another box, or `None` if they do not overlap.
    pub fn intersect(&self, other: &BBox2D) -> Option<BBox2D> {
        let min = Point2D::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Point2D::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        if min.x > max.x || min.y > max.y {
            return None;
        }
        Some(BBox2D { min, max })
    }

    /// A scaled copy of this box, scaling x by `sx` and y by `sy`.
    ///
    /// Used to express a normalized region in source-image pixel units.
    pub fn scale(&self, sx: f64, sy: f64) -> BBox2D {
        BBox2D {
            min: Point2D::new(self.min.x * sx, self.min.y * sy),
            max: Point2D::new(self.max.x * sx, self.max.y * sy),
        }
    }

    /// Clamp a point into the box.
    pub fn clamp_point(&self, pt: Point2D) -> Point2D {
        Point2D::new(
            pt.x.clamp(self.min.x, self.max.x),
            pt.y.clamp(self.min.y, self.max.y),
        )
    }
}

/// Check that four points are a valid extreme-point set for a box.
///
/// The set is valid when each designated extreme coordinate is weakly
/// extremal among the four points on its axis: `pts[0]` leftmost, `pts[1]`
/// topmost, `pts[2]` rightmost, `pts[3]` bottommost.
pub fn validate_extreme_points(pts: &[Point2D; 4]) -> bool {
    if pts[0].x > pts[1].x || pts[0].x > pts[2].x || pts[0].x > pts[3].x {
        return false;
    }
    if pts[1].y > pts[2].y || pts[1].y > pts[3].y {
        return false;
    }
    if pts[2].x < pts[1].x || pts[2].x < pts[3].x {
        return false;
    }
    if pts[3].y < pts[1].y || pts[3].y < pts[2].y {
        return false;
    }
    true
}
