//! Annotation data model.
//!
//! This module provides the core annotation types:
//! - The tagged [`Annotation`] union (per-frame flag, point, two-corner
//!   box, extreme-point box)
//! - [`Frame`], one per input image, owning its annotation list
//! - The export record handed to hosts for persistence

use serde::{Deserialize, Serialize};

use crate::geometry::{BBox2D, Point2D};

/// Note attached to point annotations created by the click machine.
pub const POINT_NOTE_CENTER: &str = "center";

/// A single annotation on a frame, in normalized image space.
///
/// A closed sum type: all dispatch over annotation kinds is exhaustive
/// pattern matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Annotation {
    /// A binary whole-frame tag. At most one per frame, enforced by
    /// toggle semantics.
    PerFrame { value: i32 },
    /// A single point with a free-text note.
    Point { pt: Point2D, note: String },
    /// A box built from two corner clicks.
    TwoPointBox { bbox: BBox2D },
    /// A box derived from four extreme points
    /// [leftmost, topmost, rightmost, bottommost]. The raw points are
    /// retained verbatim for visualization and later validation.
    ExtremeBox {
        bbox: BBox2D,
        extreme_points: [Point2D; 4],
    },
}

impl Annotation {
    /// Create a point annotation with the default note.
    pub fn point(pt: Point2D) -> Self {
        Annotation::Point {
            pt,
            note: POINT_NOTE_CENTER.to_string(),
        }
    }

    /// The bounding box of this annotation, if it has one.
    pub fn bbox(&self) -> Option<BBox2D> {
        match self {
            Annotation::PerFrame { .. } => None,
            Annotation::Point { pt, .. } => Some(BBox2D::new(*pt, *pt)),
            Annotation::TwoPointBox { bbox } => Some(*bbox),
            Annotation::ExtremeBox { bbox, .. } => Some(*bbox),
        }
    }

    pub fn is_per_frame(&self) -> bool {
        matches!(self, Annotation::PerFrame { .. })
    }

    /// Display name of this annotation's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Annotation::PerFrame { .. } => "per-frame",
            Annotation::Point { .. } => "point",
            Annotation::TwoPointBox { .. } => "two-point box",
            Annotation::ExtremeBox { .. } => "extreme box",
        }
    }
}

/// Host-supplied descriptor for one image of the sequence.
///
/// The host owns image decoding; the core only needs the pixel dimensions
/// for the coordinate transform and the name as the persistence key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameImage {
    /// Where the host loads the image from (URL, path, object key).
    pub source: String,
    /// Unique name, also the persistence key. Frames are ordered
    /// lexicographically by name for reproducible navigation.
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// One frame of the sequence and its annotations.
///
/// The annotation list is insertion-ordered; order has no meaning beyond
/// display.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: FrameImage,
    pub annotations: Vec<Annotation>,
}

impl Frame {
    pub fn new(image: FrameImage) -> Self {
        Self {
            image,
            annotations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.image.name
    }

    /// Index of the frame's per-frame annotation, if present.
    pub fn per_frame_index(&self) -> Option<usize> {
        self.annotations.iter().position(Annotation::is_per_frame)
    }
}

/// Read-only export record: one frame's name and annotation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAnnotations {
    pub frame: String,
    pub annotations: Vec<Annotation>,
}

/// Export a set of frame records to pretty-printed JSON.
pub fn to_json(frames: &[FrameAnnotations]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(frames)
}
