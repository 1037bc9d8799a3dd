//! Zoom-region state machine.
//!
//! A two-click sequence, parallel to the annotation click machine and
//! mutually exclusive with it: while the zoom key is engaged, clicks feed
//! this machine and redefine the visible region instead of producing an
//! annotation.

use crate::geometry::{BBox2D, Point2D};

/// Result of feeding one corner click into the zoom machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomOutcome {
    /// First corner recorded; waiting for the opposite corner.
    FirstCorner,
    /// Second corner recorded; the new visible region was emitted and the
    /// buffer reset.
    Completed(BBox2D),
    /// The two corners describe a zero-area region; discarded to keep the
    /// coordinate transform's divisions safe.
    Rejected,
}

/// The zoom corner buffer: Idle (0 points) -> OneCorner -> Idle again.
#[derive(Debug, Clone, Default)]
pub struct ZoomState {
    corner: Option<Point2D>,
}

impl ZoomState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.corner.is_none()
    }

    /// The pending first corner, if one has been clicked.
    pub fn pending_corner(&self) -> Option<Point2D> {
        self.corner
    }

    /// Clear any pending corner.
    pub fn cancel(&mut self) {
        self.corner = None;
    }

    /// Feed one normalized corner click into the machine.
    pub fn push_corner(&mut self, pt: Point2D) -> ZoomOutcome {
        let Some(first) = self.corner.take() else {
            self.corner = Some(pt);
            return ZoomOutcome::FirstCorner;
        };

        let region = BBox2D::from_two_points(first, pt);
        if region.is_empty() {
            log::info!("Zero-area zoom region. Discarding.");
            return ZoomOutcome::Rejected;
        }
        log::debug!(
            "Zoom region set to x=[{:.4}, {:.4}], y=[{:.4}, {:.4}]",
            region.min.x,
            region.max.x,
            region.min.y,
            region.max.y
        );
        ZoomOutcome::Completed(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_corners_emit_region() {
        let mut zoom = ZoomState::new();
        assert_eq!(
            zoom.push_corner(Point2D::new(0.6, 0.1)),
            ZoomOutcome::FirstCorner
        );
        assert!(!zoom.is_idle());

        let outcome = zoom.push_corner(Point2D::new(0.2, 0.5));
        let ZoomOutcome::Completed(region) = outcome else {
            panic!("unexpected outcome: {outcome:?}");
        };
        assert_eq!(region.min, Point2D::new(0.2, 0.1));
        assert_eq!(region.max, Point2D::new(0.6, 0.5));
        assert!(zoom.is_idle());
    }

    #[test]
    fn test_degenerate_region_rejected() {
        let mut zoom = ZoomState::new();
        zoom.push_corner(Point2D::new(0.3, 0.2));
        // Same x: zero width.
        assert_eq!(
            zoom.push_corner(Point2D::new(0.3, 0.9)),
            ZoomOutcome::Rejected
        );
        assert!(zoom.is_idle());
    }

    #[test]
    fn test_cancel_clears_pending_corner() {
        let mut zoom = ZoomState::new();
        zoom.push_corner(Point2D::new(0.5, 0.5));
        zoom.cancel();
        assert!(zoom.is_idle());
        // Next click starts a fresh sequence.
        assert_eq!(
            zoom.push_corner(Point2D::new(0.1, 0.1)),
            ZoomOutcome::FirstCorner
        );
    }
}
