//! Click-sequence state machine for annotation construction.
//!
//! Accumulates normalized click points per active mode and, on the
//! sequence-completing click, validates and emits a finished annotation or
//! discards the buffer. The machine is pure: it never touches the frame,
//! storage, or rendering; the session applies its outcome.

use crate::annotation::Annotation;
use crate::geometry::{self, BBox2D, Point2D};

/// The active annotation construction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotationMode {
    /// A single click toggles the frame's binary per-frame tag.
    PerFrame,
    /// A single click places a point annotation.
    Point,
    /// Two clicks mark opposite corners of a box.
    TwoPointBox,
    /// Four clicks mark the leftmost, topmost, rightmost and bottommost
    /// extent of an object.
    #[default]
    ExtremeBox,
}

impl AnnotationMode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            AnnotationMode::PerFrame => "Per-Frame",
            AnnotationMode::Point => "Point",
            AnnotationMode::TwoPointBox => "Two-Point Box",
            AnnotationMode::ExtremeBox => "Extreme Box",
        }
    }

    /// Get all available modes.
    pub fn all() -> &'static [AnnotationMode] {
        &[
            AnnotationMode::PerFrame,
            AnnotationMode::Point,
            AnnotationMode::TwoPointBox,
            AnnotationMode::ExtremeBox,
        ]
    }

    /// Number of clicks a full sequence takes in this mode.
    pub fn clicks_required(&self) -> usize {
        match self {
            AnnotationMode::PerFrame | AnnotationMode::Point => 1,
            AnnotationMode::TwoPointBox => 2,
            AnnotationMode::ExtremeBox => 4,
        }
    }
}

/// Why an attempted annotation was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Two-point box with coincident corners. User-facing condition.
    EmptyBox,
    /// Extreme points not in [left, top, right, bottom] order. Log-only.
    InvalidExtremePoints,
}

/// Result of feeding one click into the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Mid-sequence click accepted; more clicks needed.
    InProgress,
    /// Sequence complete; the annotation was emitted and the buffer reset.
    Completed(Annotation),
    /// Per-frame mode: the click toggles the frame tag and never occupies
    /// the buffer.
    TogglePerFrame,
    /// Sequence discarded as invalid; the buffer was reset.
    Rejected(RejectReason),
}

/// The in-progress click buffer.
///
/// Cycles Idle -> Accumulating -> Idle; there is no terminal state. The
/// buffer is cleared on completion, discard, cancel, and (by the session)
/// on mode change, frame change, and zoom-key change.
#[derive(Debug, Clone, Default)]
pub struct DrawingState {
    points: Vec<Point2D>,
}

impl DrawingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points accumulated so far, in normalized image space.
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn is_idle(&self) -> bool {
        self.points.is_empty()
    }

    /// Clear the buffer unconditionally.
    pub fn cancel(&mut self) {
        self.points.clear();
    }

    /// Feed one normalized click point into the machine.
    pub fn push_click(&mut self, mode: AnnotationMode, pt: Point2D) -> ClickOutcome {
        if mode == AnnotationMode::PerFrame {
            return ClickOutcome::TogglePerFrame;
        }

        self.points.push(pt);
        log::debug!(
            "Click at ({:.4}, {:.4}), point {}/{} in {} mode",
            pt.x,
            pt.y,
            self.points.len(),
            mode.clicks_required(),
            mode.name()
        );

        if self.points.len() < mode.clicks_required() {
            return ClickOutcome::InProgress;
        }

        let outcome = match mode {
            AnnotationMode::PerFrame => unreachable!("handled above"),
            AnnotationMode::Point => ClickOutcome::Completed(Annotation::point(self.points[0])),
            AnnotationMode::TwoPointBox => self.finish_two_point_box(),
            AnnotationMode::ExtremeBox => self.finish_extreme_box(),
        };
        self.points.clear();
        outcome
    }

    fn finish_two_point_box(&self) -> ClickOutcome {
        let (a, b) = (self.points[0], self.points[1]);
        if a.x == b.x && a.y == b.y {
            log::info!("Empty bbox at ({:.4}, {:.4}). Discarding box.", a.x, a.y);
            return ClickOutcome::Rejected(RejectReason::EmptyBox);
        }
        ClickOutcome::Completed(Annotation::TwoPointBox {
            bbox: BBox2D::from_two_points(a, b),
        })
    }

    fn finish_extreme_box(&self) -> ClickOutcome {
        let pts: [Point2D; 4] = [self.points[0], self.points[1], self.points[2], self.points[3]];
        if !geometry::validate_extreme_points(&pts) {
            log::info!("Points clicked are not valid extreme points. Discarding box.");
            return ClickOutcome::Rejected(RejectReason::InvalidExtremePoints);
        }
        ClickOutcome::Completed(Annotation::ExtremeBox {
            bbox: BBox2D::from_extreme_points(&pts),
            extreme_points: pts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_mode_completes_on_first_click() {
        let mut state = DrawingState::new();
        let outcome = state.push_click(AnnotationMode::Point, Point2D::new(0.3, 0.7));
        match outcome {
            ClickOutcome::Completed(Annotation::Point { pt, note }) => {
                assert_eq!(pt, Point2D::new(0.3, 0.7));
                assert_eq!(note, "center");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(state.is_idle());
    }

    #[test]
    fn test_per_frame_mode_never_buffers() {
        let mut state = DrawingState::new();
        let outcome = state.push_click(AnnotationMode::PerFrame, Point2D::new(0.5, 0.5));
        assert_eq!(outcome, ClickOutcome::TogglePerFrame);
        assert!(state.is_idle());
    }

    #[test]
    fn test_two_point_box_sequence() {
        let mut state = DrawingState::new();
        assert_eq!(
            state.push_click(AnnotationMode::TwoPointBox, Point2D::new(0.6, 0.2)),
            ClickOutcome::InProgress
        );
        assert_eq!(state.points().len(), 1);

        let outcome = state.push_click(AnnotationMode::TwoPointBox, Point2D::new(0.2, 0.8));
        match outcome {
            ClickOutcome::Completed(Annotation::TwoPointBox { bbox }) => {
                assert_eq!(bbox.min, Point2D::new(0.2, 0.2));
                assert_eq!(bbox.max, Point2D::new(0.6, 0.8));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(state.is_idle());
    }

    #[test]
    fn test_two_point_box_rejects_coincident_corners() {
        let mut state = DrawingState::new();
        state.push_click(AnnotationMode::TwoPointBox, Point2D::new(0.3, 0.4));
        let outcome = state.push_click(AnnotationMode::TwoPointBox, Point2D::new(0.3, 0.4));
        assert_eq!(outcome, ClickOutcome::Rejected(RejectReason::EmptyBox));
        assert!(state.is_idle());
    }

    #[test]
    fn test_extreme_box_valid_sequence() {
        let mut state = DrawingState::new();
        let pts = [
            Point2D::new(0.0, 0.5),
            Point2D::new(0.5, 0.0),
            Point2D::new(1.0, 0.5),
            Point2D::new(0.5, 1.0),
        ];
        for pt in &pts[..3] {
            assert_eq!(
                state.push_click(AnnotationMode::ExtremeBox, *pt),
                ClickOutcome::InProgress
            );
        }
        let outcome = state.push_click(AnnotationMode::ExtremeBox, pts[3]);
        match outcome {
            ClickOutcome::Completed(Annotation::ExtremeBox {
                bbox,
                extreme_points,
            }) => {
                assert_eq!(bbox.min, Point2D::new(0.0, 0.0));
                assert_eq!(bbox.max, Point2D::new(1.0, 1.0));
                assert_eq!(extreme_points, pts);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_extreme_box_invalid_ordering_rejected() {
        let mut state = DrawingState::new();
        // First point is not leftmost.
        let pts = [
            Point2D::new(0.5, 0.5),
            Point2D::new(0.0, 0.0),
            Point2D::new(0.3, 0.3),
            Point2D::new(1.0, 1.0),
        ];
        for pt in &pts[..3] {
            state.push_click(AnnotationMode::ExtremeBox, *pt);
        }
        let outcome = state.push_click(AnnotationMode::ExtremeBox, pts[3]);
        assert_eq!(
            outcome,
            ClickOutcome::Rejected(RejectReason::InvalidExtremePoints)
        );
        assert!(state.is_idle());
    }

    #[test]
    fn test_cancel_clears_buffer() {
        let mut state = DrawingState::new();
        state.push_click(AnnotationMode::ExtremeBox, Point2D::new(0.1, 0.5));
        state.push_click(AnnotationMode::ExtremeBox, Point2D::new(0.5, 0.1));
        assert_eq!(state.points().len(), 2);
        state.cancel();
        assert!(state.is_idle());
    }
}
