//! Resize handles around a selected element.

use kurbo::{Point, Rect, Vec2};

/// Handle hit radius in screen pixels; divided by zoom for display units.
pub const HANDLE_HIT_RADIUS: f64 = 5.0;

/// Minimum element width/height a resize can produce, in display units.
pub const MIN_ELEMENT_SIZE: f64 = 4.0;

/// The eight resize handles - determines which edges a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    // Corner handles
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    // Edge handles
    Top,
    Bottom,
    Left,
    Right,
}

impl HandleKind {
    /// All handles in hit-test priority order, corners first.
    pub const ALL: [HandleKind; 8] = [
        HandleKind::TopLeft,
        HandleKind::TopRight,
        HandleKind::BottomLeft,
        HandleKind::BottomRight,
        HandleKind::Top,
        HandleKind::Bottom,
        HandleKind::Left,
        HandleKind::Right,
    ];

    pub fn affects_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    pub fn affects_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    pub fn affects_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::Top)
    }

    pub fn affects_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }

    /// Anchor position on a bounding rect.
    pub fn position(self, bounds: Rect) -> Point {
        let mid_x = (bounds.x0 + bounds.x1) / 2.0;
        let mid_y = (bounds.y0 + bounds.y1) / 2.0;
        match self {
            Self::TopLeft => Point::new(bounds.x0, bounds.y0),
            Self::TopRight => Point::new(bounds.x1, bounds.y0),
            Self::BottomLeft => Point::new(bounds.x0, bounds.y1),
            Self::BottomRight => Point::new(bounds.x1, bounds.y1),
            Self::Top => Point::new(mid_x, bounds.y0),
            Self::Bottom => Point::new(mid_x, bounds.y1),
            Self::Left => Point::new(bounds.x0, mid_y),
            Self::Right => Point::new(bounds.x1, mid_y),
        }
    }

    /// CSS-style cursor name hosts can use for feedback.
    pub fn cursor(self) -> &'static str {
        match self {
            Self::TopLeft => "nw-resize",
            Self::TopRight => "ne-resize",
            Self::BottomLeft => "sw-resize",
            Self::BottomRight => "se-resize",
            Self::Top => "n-resize",
            Self::Bottom => "s-resize",
            Self::Left => "w-resize",
            Self::Right => "e-resize",
        }
    }
}

/// Find the handle under a display point, if any. The hit radius is
/// `HANDLE_HIT_RADIUS` screen pixels regardless of zoom.
pub fn hit_handle(bounds: Rect, point: Point, zoom: f64) -> Option<HandleKind> {
    let radius = HANDLE_HIT_RADIUS / zoom;
    HandleKind::ALL.into_iter().find(|kind| {
        let pos = kind.position(bounds);
        (point.x - pos.x).abs() <= radius && (point.y - pos.y).abs() <= radius
    })
}

/// Apply a drag delta to a rect through a handle.
///
/// Width and height are clamped to `MIN_ELEMENT_SIZE`; when a left or top
/// handle hits the clamp the origin shifts so the opposite edge stays put.
/// The result is not snapped; callers apply grid snapping afterwards.
pub fn resize(orig: Rect, handle: HandleKind, delta: Vec2) -> Rect {
    let mut x = orig.x0;
    let mut y = orig.y0;
    let mut w = orig.width();
    let mut h = orig.height();

    if handle.affects_right() {
        w = orig.width() + delta.x;
    }
    if handle.affects_left() {
        x = orig.x0 + delta.x;
        w = orig.width() - delta.x;
    }
    if handle.affects_bottom() {
        h = orig.height() + delta.y;
    }
    if handle.affects_top() {
        y = orig.y0 + delta.y;
        h = orig.height() - delta.y;
    }

    if w < MIN_ELEMENT_SIZE {
        w = MIN_ELEMENT_SIZE;
        if handle.affects_left() {
            x = orig.x1 - MIN_ELEMENT_SIZE;
        }
    }
    if h < MIN_ELEMENT_SIZE {
        h = MIN_ELEMENT_SIZE;
        if handle.affects_top() {
            y = orig.y1 - MIN_ELEMENT_SIZE;
        }
    }

    Rect::new(x, y, x + w, y + h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(10.0, 20.0, 50.0, 60.0);

    #[test]
    fn test_handle_positions() {
        assert_eq!(HandleKind::TopLeft.position(BOUNDS), Point::new(10.0, 20.0));
        assert_eq!(
            HandleKind::BottomRight.position(BOUNDS),
            Point::new(50.0, 60.0)
        );
        assert_eq!(HandleKind::Top.position(BOUNDS), Point::new(30.0, 20.0));
        assert_eq!(HandleKind::Left.position(BOUNDS), Point::new(10.0, 40.0));
    }

    #[test]
    fn test_hit_handle() {
        // At zoom 2 the radius is 2.5 display units
        assert_eq!(
            hit_handle(BOUNDS, Point::new(11.0, 21.0), 2.0),
            Some(HandleKind::TopLeft)
        );
        assert_eq!(
            hit_handle(BOUNDS, Point::new(50.0, 40.0), 2.0),
            Some(HandleKind::Right)
        );
        assert_eq!(hit_handle(BOUNDS, Point::new(30.0, 40.0), 2.0), None);

        // Zooming out widens the display-space radius
        assert_eq!(hit_handle(BOUNDS, Point::new(14.0, 20.0), 2.0), None);
        assert_eq!(
            hit_handle(BOUNDS, Point::new(14.0, 20.0), 0.25),
            Some(HandleKind::TopLeft)
        );
    }

    #[test]
    fn test_resize_right_edge() {
        let r = resize(BOUNDS, HandleKind::Right, Vec2::new(15.0, 99.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 65.0, 60.0));
    }

    #[test]
    fn test_resize_left_edge() {
        let r = resize(BOUNDS, HandleKind::Left, Vec2::new(5.0, 0.0));
        assert_eq!(r, Rect::new(15.0, 20.0, 50.0, 60.0));
    }

    #[test]
    fn test_resize_corner() {
        let r = resize(BOUNDS, HandleKind::BottomRight, Vec2::new(10.0, -5.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 60.0, 55.0));

        let r = resize(BOUNDS, HandleKind::TopLeft, Vec2::new(4.0, 6.0));
        assert_eq!(r, Rect::new(14.0, 26.0, 50.0, 60.0));
    }

    #[test]
    fn test_resize_min_size_clamp() {
        // Dragging the right edge far past the left edge clamps width
        let r = resize(BOUNDS, HandleKind::Right, Vec2::new(-100.0, 0.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 14.0, 60.0));

        // Left handle clamp keeps the right edge fixed
        let r = resize(BOUNDS, HandleKind::Left, Vec2::new(100.0, 0.0));
        assert_eq!(r, Rect::new(46.0, 20.0, 50.0, 60.0));

        // Top handle clamp keeps the bottom edge fixed
        let r = resize(BOUNDS, HandleKind::Top, Vec2::new(0.0, 100.0));
        assert_eq!(r, Rect::new(10.0, 56.0, 50.0, 60.0));
    }
}
