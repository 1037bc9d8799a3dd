//! Viewport coordinate transform.
//!
//! Maps pointer positions in viewport-pixel space to normalized [0,1]^2
//! image space and back, accounting for the display region (letterboxed or
//! stretched) and the currently visible sub-rectangle of the image.
//!
//! Extracted as a standalone value type for testability: the session builds
//! one from its current state whenever it needs to transform a point.

use crate::geometry::{BBox2D, Point2D};

/// Snapshot of everything needed to map between viewport and image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    /// Viewport (rendering surface) size in pixels.
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Source image size in pixels.
    pub image_width: f64,
    pub image_height: f64,
    /// Visible sub-rectangle of the image, in normalized image space.
    pub visible_region: BBox2D,
    /// Fit the visible region into the viewport preserving aspect ratio.
    /// When false the image is stretched to fill the viewport.
    pub letterbox: bool,
}

impl ViewportTransform {
    /// Create a transform.
    ///
    /// Preconditions: positive viewport and image dimensions, and a
    /// visible region with positive width and height. The zoom state
    /// machine rejects degenerate regions, so a session never violates
    /// this.
    pub fn new(
        viewport_width: f64,
        viewport_height: f64,
        image_width: f64,
        image_height: f64,
        visible_region: BBox2D,
        letterbox: bool,
    ) -> Self {
        debug_assert!(viewport_width > 0.0 && viewport_height > 0.0);
        debug_assert!(image_width > 0.0 && image_height > 0.0);
        debug_assert!(!visible_region.is_empty());
        Self {
            viewport_width,
            viewport_height,
            image_width,
            image_height,
            visible_region,
            letterbox,
        }
    }

    /// Visible region of the image in source-image pixel units.
    fn visible_pixel_box(&self) -> BBox2D {
        self.visible_region.scale(self.image_width, self.image_height)
    }

    /// Pixel rectangle within the viewport where the image is drawn.
    ///
    /// With letterboxing the rectangle preserves the visible region's
    /// aspect ratio and is centered on the axis with slack; otherwise it
    /// fills the whole viewport.
    pub fn display_box(&self) -> BBox2D {
        if !self.letterbox {
            return BBox2D::new(
                Point2D::new(0.0, 0.0),
                Point2D::new(self.viewport_width, self.viewport_height),
            );
        }

        let visible = self.visible_pixel_box();
        let aspect_viewport = self.viewport_height / self.viewport_width;
        let aspect_visible = visible.height() / visible.width();

        if aspect_viewport >= aspect_visible {
            // Viewport is taller than the visible image region: bars at
            // top and bottom.
            let display_height = self.viewport_width * aspect_visible;
            let start_y = (self.viewport_height - display_height) / 2.0;
            BBox2D::new(
                Point2D::new(0.0, start_y),
                Point2D::new(self.viewport_width, start_y + display_height),
            )
        } else {
            // Viewport is wider: bars at left and right.
            let display_width = self.viewport_height / aspect_visible;
            let start_x = (self.viewport_width - display_width) / 2.0;
            BBox2D::new(
                Point2D::new(start_x, 0.0),
                Point2D::new(start_x + display_width, self.viewport_height),
            )
        }
    }

    /// Convert a viewport-pixel point to normalized image space, clamping
    /// each axis to [0,1].
    pub fn to_image(&self, pt: Point2D) -> Point2D {
        BBox2D::unit().clamp_point(self.to_image_unclamped(pt))
    }

    /// Convert a viewport-pixel point to normalized image space without
    /// clamping. Points outside the display box map outside the visible
    /// region; selection uses this to reject cursors in the letterbox bars.
    pub fn to_image_unclamped(&self, pt: Point2D) -> Point2D {
        let visible = self.visible_pixel_box();
        let display = self.display_box();

        let image_pixel_x =
            visible.min.x + visible.width() * (pt.x - display.min.x) / display.width();
        let image_pixel_y =
            visible.min.y + visible.height() * (pt.y - display.min.y) / display.height();

        Point2D::new(
            image_pixel_x / self.image_width,
            image_pixel_y / self.image_height,
        )
    }

    /// Convert a normalized image-space point to viewport-pixel space.
    ///
    /// No clamping: callers that need the result inside the visible region
    /// clamp first via [`Self::clamp_to_visible_region`].
    pub fn to_viewport(&self, pt: Point2D) -> Point2D {
        let visible = self.visible_pixel_box();
        let display = self.display_box();

        let image_pixel_x = pt.x * self.image_width;
        let image_pixel_y = pt.y * self.image_height;

        let rel_x = (image_pixel_x - visible.min.x) / visible.width();
        let rel_y = (image_pixel_y - visible.min.y) / visible.height();

        Point2D::new(
            display.min.x + rel_x * display.width(),
            display.min.y + rel_y * display.height(),
        )
    }

    /// Clamp a normalized point into the visible region.
    pub fn clamp_to_visible_region(&self, pt: Point2D) -> Point2D {
        self.visible_region.clamp_point(pt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: Point2D, b: Point2D) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
    }

    fn transform(letterbox: bool, visible_region: BBox2D) -> ViewportTransform {
        ViewportTransform::new(800.0, 600.0, 1920.0, 1080.0, visible_region, letterbox)
    }

    #[test]
    fn test_display_box_stretched_fills_viewport() {
        let t = transform(false, BBox2D::unit());
        let display = t.display_box();
        assert_eq!(display.min, Point2D::new(0.0, 0.0));
        assert_eq!(display.max, Point2D::new(800.0, 600.0));
    }

    #[test]
    fn test_display_box_letterbox_wide_image() {
        // 16:9 image in a 4:3 viewport: full width, bars top and bottom.
        let t = transform(true, BBox2D::unit());
        let display = t.display_box();
        assert!((display.width() - 800.0).abs() < EPSILON);
        assert!((display.height() - 450.0).abs() < EPSILON);
        assert!((display.min.y - 75.0).abs() < EPSILON);
        assert!((display.min.x).abs() < EPSILON);
    }

    #[test]
    fn test_display_box_letterbox_tall_region() {
        // Zoom into a tall strip: full height, bars left and right.
        let region = BBox2D::from_two_points(Point2D::new(0.4, 0.0), Point2D::new(0.6, 1.0));
        let t = transform(true, region);
        let display = t.display_box();
        assert!((display.height() - 600.0).abs() < EPSILON);
        assert!(display.width() < 800.0);
        assert!(display.min.x > 0.0);
    }

    #[test]
    fn test_round_trip_letterboxed() {
        let t = transform(true, BBox2D::unit());
        for &(x, y) in &[(0.5, 0.5), (0.1, 0.9), (0.0, 0.0), (1.0, 1.0), (0.33, 0.77)] {
            let pt = Point2D::new(x, y);
            let round = t.to_image(t.to_viewport(pt));
            assert!(approx_eq(pt, round), "{pt:?} -> {round:?}");
        }
    }

    #[test]
    fn test_round_trip_stretched() {
        let t = transform(false, BBox2D::unit());
        for &(x, y) in &[(0.5, 0.5), (0.25, 0.125), (0.9, 0.1)] {
            let pt = Point2D::new(x, y);
            let round = t.to_image(t.to_viewport(pt));
            assert!(approx_eq(pt, round), "{pt:?} -> {round:?}");
        }
    }

    #[test]
    fn test_round_trip_zoomed_region() {
        let region = BBox2D::from_two_points(Point2D::new(0.2, 0.3), Point2D::new(0.7, 0.8));
        for letterbox in [true, false] {
            let t = transform(letterbox, region);
            // Points inside the visible region survive the round trip.
            for &(x, y) in &[(0.25, 0.35), (0.5, 0.5), (0.69, 0.79)] {
                let pt = Point2D::new(x, y);
                let round = t.to_image(t.to_viewport(pt));
                assert!(approx_eq(pt, round), "{pt:?} -> {round:?}");
            }
        }
    }

    #[test]
    fn test_to_image_clamps_to_unit() {
        let t = transform(true, BBox2D::unit());
        // A point in the top letterbox bar clamps to y = 0.
        let pt = t.to_image(Point2D::new(400.0, 0.0));
        assert!(pt.y.abs() < EPSILON);
        assert!(pt.x >= 0.0 && pt.x <= 1.0);
    }

    #[test]
    fn test_to_image_unclamped_outside_display_box() {
        let t = transform(true, BBox2D::unit());
        // The same point is negative in y before clamping.
        let pt = t.to_image_unclamped(Point2D::new(400.0, 0.0));
        assert!(pt.y < 0.0);
    }

    #[test]
    fn test_zoomed_cursor_outside_region_maps_outside() {
        let region = BBox2D::from_two_points(Point2D::new(0.4, 0.4), Point2D::new(0.6, 0.6));
        let t = transform(false, region);
        // Center of the viewport maps to the center of the visible region.
        let center = t.to_image(Point2D::new(400.0, 300.0));
        assert!(approx_eq(center, Point2D::new(0.5, 0.5)));
        // The viewport corner maps to the region corner.
        let corner = t.to_image(Point2D::new(0.0, 0.0));
        assert!(approx_eq(corner, Point2D::new(0.4, 0.4)));
    }

    #[test]
    fn test_clamp_to_visible_region() {
        let region = BBox2D::from_two_points(Point2D::new(0.2, 0.2), Point2D::new(0.8, 0.8));
        let t = transform(true, region);
        let clamped = t.clamp_to_visible_region(Point2D::new(0.05, 0.95));
        assert_eq!(clamped, Point2D::new(0.2, 0.8));
    }
}
