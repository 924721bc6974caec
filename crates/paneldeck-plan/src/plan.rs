//! Draw operations and the plans that carry them.

use kurbo::{Point, Rect, RoundedRectRadii};
use peniko::Color;

/// Horizontal anchoring for a [`DrawOp::Text`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Parse the model's `textAlign` property value. Unknown names fall
    /// back to left, matching how documents with stale values render.
    pub fn from_name(name: &str) -> Self {
        match name {
            "center" => TextAlign::Center,
            "right" => TextAlign::Right,
            _ => TextAlign::Left,
        }
    }
}

/// Weight for a [`DrawOp::Text`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Parse the model's `fontWeight` property value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "bold" => FontWeight::Bold,
            _ => FontWeight::Normal,
        }
    }
}

/// One drawing command.
///
/// Plans produced by the builders in [`crate::scene`] are in screen
/// coordinates; element painters emit ops in display coordinates and the
/// base-plan builder maps them. Backends consume ops in order, maintaining
/// a clip stack for [`DrawOp::PushClip`] / [`DrawOp::PopClip`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Erase the whole layer.
    Clear,
    /// Fill a (possibly rounded) rectangle.
    FillRect {
        rect: Rect,
        radii: RoundedRectRadii,
        color: Color,
    },
    /// Stroke a (possibly rounded) rectangle outline. `dash` is an
    /// on/off pair in the plan's units; `None` strokes solid.
    StrokeRect {
        rect: Rect,
        radii: RoundedRectRadii,
        color: Color,
        width: f64,
        dash: Option<[f64; 2]>,
    },
    /// Stroke a straight line segment.
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
    },
    /// Draw a run of text. `anchor` is the top of the first line at the
    /// aligned edge: the left edge for [`TextAlign::Left`], the midpoint
    /// for [`TextAlign::Center`], the right edge for [`TextAlign::Right`].
    /// `size` is the font size in the plan's units.
    Text {
        anchor: Point,
        content: String,
        color: Color,
        size: f64,
        align: TextAlign,
        weight: FontWeight,
    },
    /// Restrict subsequent ops to a (possibly rounded) rectangle.
    PushClip { rect: Rect, radii: RoundedRectRadii },
    /// Undo the most recent [`DrawOp::PushClip`].
    PopClip,
}

/// An ordered list of draw operations for one layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPlan {
    ops: Vec<DrawOp>,
}

impl RenderPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_preserves_order() {
        let mut plan = RenderPlan::new();
        assert!(plan.is_empty());

        plan.push(DrawOp::Clear);
        plan.push(DrawOp::PopClip);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.ops()[0], DrawOp::Clear);
        assert_eq!(plan.into_ops()[1], DrawOp::PopClip);
    }

    #[test]
    fn test_align_and_weight_parsing() {
        assert_eq!(TextAlign::from_name("center"), TextAlign::Center);
        assert_eq!(TextAlign::from_name("right"), TextAlign::Right);
        assert_eq!(TextAlign::from_name("left"), TextAlign::Left);
        assert_eq!(TextAlign::from_name("justify"), TextAlign::Left);

        assert_eq!(FontWeight::from_name("bold"), FontWeight::Bold);
        assert_eq!(FontWeight::from_name("normal"), FontWeight::Normal);
        assert_eq!(FontWeight::from_name("100"), FontWeight::Normal);
    }
}
