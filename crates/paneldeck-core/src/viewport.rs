//! Viewport transform between host screen space and display space.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.25;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 10.0;
/// Default zoom; small displays are unworkable at 1:1.
pub const DEFAULT_ZOOM: f64 = 2.0;
/// Fit never zooms in past this, even when the viewport would allow it.
const FIT_MAX_ZOOM: f64 = 4.0;

/// Maps between screen coordinates (host surface pixels) and display
/// coordinates (units on the virtual panel being designed).
///
/// The display rectangle is centered in the viewport, then shifted by the
/// pan offset; zoom scales uniformly about the display origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    /// Size of the virtual display, in display units.
    pub display_size: Size,
    /// Size of the host drawing surface, in screen pixels.
    pub viewport_size: Size,
    /// Current zoom level.
    pub zoom: f64,
    /// Pan offset in screen pixels.
    pub pan: Vec2,
}

impl Viewport {
    /// Create a viewport for a display of the given size.
    pub fn new(display_size: Size) -> Self {
        Self {
            display_size,
            viewport_size: Size::new(800.0, 600.0),
            zoom: DEFAULT_ZOOM,
            pan: Vec2::ZERO,
        }
    }

    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
    }

    /// Screen position of the display's top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(
            (self.viewport_size.width - self.display_size.width * self.zoom) / 2.0 + self.pan.x,
            (self.viewport_size.height - self.display_size.height * self.zoom) / 2.0 + self.pan.y,
        )
    }

    /// Display-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin().to_vec2()) * Affine::scale(self.zoom)
    }

    /// Screen-to-display transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.origin().to_vec2())
    }

    /// Convert a screen point to display coordinates.
    pub fn screen_to_display(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a display point to screen coordinates.
    pub fn display_to_screen(&self, display_point: Point) -> Point {
        self.transform() * display_point
    }

    /// Pan by a delta in screen pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Set the zoom level directly, clamped to the allowed range. The view
    /// stays centered on whatever the current pan points at.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Zoom by a factor, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let display_point = self.screen_to_display(screen_point);
        self.zoom = new_zoom;

        // Shift pan so display_point lands back under the cursor
        let new_screen = self.display_to_screen(display_point);
        self.pan += Vec2::new(
            screen_point.x - new_screen.x,
            screen_point.y - new_screen.y,
        );
    }

    /// Zoom so the whole display fits the viewport with some padding,
    /// recentered (pan cleared).
    pub fn fit(&mut self, padding: f64) {
        let avail_w = (self.viewport_size.width - padding * 2.0).max(1.0);
        let avail_h = (self.viewport_size.height - padding * 2.0).max(1.0);
        let zx = avail_w / self.display_size.width;
        let zy = avail_h / self.display_size.height;
        self.zoom = zx.min(zy).min(FIT_MAX_ZOOM).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = Vec2::ZERO;
    }

    /// Reset to the default zoom, recentered.
    pub fn reset(&mut self) {
        self.zoom = DEFAULT_ZOOM;
        self.pan = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        let mut vp = Viewport::new(Size::new(280.0, 240.0));
        vp.set_viewport_size(Size::new(800.0, 600.0));
        vp
    }

    #[test]
    fn test_display_centered() {
        let vp = viewport();
        // 280 * 2 = 560 wide; (800 - 560) / 2 = 120
        let origin = vp.origin();
        assert!((origin.x - 120.0).abs() < f64::EPSILON);
        assert!((origin.y - 60.0).abs() < f64::EPSILON);

        let top_left = vp.display_to_screen(Point::ZERO);
        assert_eq!(top_left, origin);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut vp = viewport();
        vp.pan = Vec2::new(33.0, -7.5);
        vp.zoom = 1.7;

        let screen = Point::new(412.0, 266.0);
        let display = vp.screen_to_display(screen);
        let back = vp.display_to_screen(display);

        assert!((back.x - screen.x).abs() < 1e-10);
        assert!((back.y - screen.y).abs() < 1e-10);
    }

    #[test]
    fn test_pan_shifts_origin() {
        let mut vp = viewport();
        let before = vp.origin();
        vp.pan_by(Vec2::new(10.0, 20.0));
        let after = vp.origin();
        assert!((after.x - before.x - 10.0).abs() < f64::EPSILON);
        assert!((after.y - before.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut vp = viewport();
        vp.zoom_at(Point::ZERO, 0.001);
        assert!((vp.zoom - MIN_ZOOM).abs() < f64::EPSILON);

        vp.zoom = 1.0;
        vp.zoom_at(Point::ZERO, 1000.0);
        assert!((vp.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_at_keeps_cursor_fixed() {
        let mut vp = viewport();
        let cursor = Point::new(500.0, 400.0);
        let before = vp.screen_to_display(cursor);

        vp.zoom_at(cursor, 1.15);
        let after = vp.screen_to_display(cursor);

        assert!((after.x - before.x).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);
    }

    #[test]
    fn test_fit() {
        let mut vp = viewport();
        vp.pan = Vec2::new(50.0, 50.0);
        vp.fit(20.0);
        // (800-40)/280 ≈ 2.71, (600-40)/240 ≈ 2.33 → limited by height
        assert!((vp.zoom - 560.0 / 240.0).abs() < 1e-12);
        assert_eq!(vp.pan, Vec2::ZERO);

        // A huge viewport is capped at the fit maximum
        vp.set_viewport_size(Size::new(4000.0, 4000.0));
        vp.fit(20.0);
        assert!((vp.zoom - 4.0).abs() < f64::EPSILON);
    }
}
