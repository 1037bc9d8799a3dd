//! Selection hit-testing.
//!
//! Resolves which annotation sits under the cursor. The result drives both
//! highlight rendering (external) and deletion (internal).

use crate::annotation::Annotation;
use crate::geometry::Point2D;

/// Hit radius for point annotations, in normalized units.
pub const POINT_HIT_RADIUS: f64 = 0.01;

/// Find the annotation under `cursor` (a normalized image-space point).
///
/// The smallest-area containing box wins. Point annotations match within
/// [`POINT_HIT_RADIUS`] and are treated as area zero, so they always
/// outrank boxes. Ties keep the earliest match in scan order. Per-frame
/// annotations are never individually selectable.
///
/// Callers are responsible for returning no selection when the cursor is
/// outside the viewport or the visible region; this function only scans.
pub fn hit_test(annotations: &[Annotation], cursor: Point2D) -> Option<usize> {
    let mut selected = None;
    let mut smallest_area = f64::MAX;

    for (i, ann) in annotations.iter().enumerate() {
        match ann {
            Annotation::PerFrame { .. } => {}
            Annotation::Point { pt, .. } => {
                if pt.distance_squared(&cursor) < POINT_HIT_RADIUS * POINT_HIT_RADIUS
                    && 0.0 < smallest_area
                {
                    selected = Some(i);
                    smallest_area = 0.0;
                }
            }
            Annotation::TwoPointBox { bbox } | Annotation::ExtremeBox { bbox, .. } => {
                if bbox.contains(&cursor) && bbox.area() < smallest_area {
                    selected = Some(i);
                    smallest_area = bbox.area();
                }
            }
        }
    }

    selected
}
