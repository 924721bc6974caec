//! Grid snapping for pointer-driven edits.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default grid size in display units (matches the visual grid).
pub const GRID_SIZE: f64 = 10.0;

/// Grid snapping configuration.
///
/// Applied to every position/size write produced by a pointer gesture.
/// Keyboard nudges intentionally bypass it (see `Session::nudge_selected`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Whether grid snapping is on.
    pub enabled: bool,
    /// Grid spacing in display units.
    pub grid_size: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_size: GRID_SIZE,
        }
    }
}

impl SnapConfig {
    /// Snap a value to the nearest grid multiple, or to the nearest whole
    /// unit when snapping is off. Idempotent either way.
    pub fn snap_value(&self, v: f64) -> f64 {
        if self.enabled && self.grid_size > 0.0 {
            (v / self.grid_size).round() * self.grid_size
        } else {
            v.round()
        }
    }

    /// Snap both axes of a point independently.
    pub fn snap_point(&self, p: Point) -> Point {
        Point::new(self.snap_value(p.x), self.snap_value(p.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        let snap = SnapConfig::default();
        assert_eq!(snap.snap_value(14.0), 10.0);
        assert_eq!(snap.snap_value(15.0), 20.0);
        assert_eq!(snap.snap_value(-4.9), 0.0);
        assert_eq!(snap.snap_value(-5.1), -10.0);
    }

    #[test]
    fn test_snap_disabled_rounds_to_unit() {
        let snap = SnapConfig {
            enabled: false,
            ..Default::default()
        };
        assert_eq!(snap.snap_value(14.4), 14.0);
        assert_eq!(snap.snap_value(14.6), 15.0);
    }

    #[test]
    fn test_snap_idempotent() {
        let grid = SnapConfig::default();
        let free = SnapConfig {
            enabled: false,
            ..Default::default()
        };
        for &v in &[0.0, 3.7, 14.999, -22.5, 1234.56] {
            assert_eq!(grid.snap_value(grid.snap_value(v)), grid.snap_value(v));
            assert_eq!(free.snap_value(free.snap_value(v)), free.snap_value(v));
        }
    }

    #[test]
    fn test_snap_point() {
        let snap = SnapConfig::default();
        let p = snap.snap_point(Point::new(14.0, 16.0));
        assert_eq!(p, Point::new(10.0, 20.0));
    }
}
