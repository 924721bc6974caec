//! Element painters: the pluggable artwork for each element type.
//!
//! A painter draws one element type from its property bag, nothing else.
//! That keeps painters pure functions of the props, so the same painter
//! can serve the editor surface, palette thumbnails, and export.

use crate::plan::{DrawOp, FontWeight, RenderPlan, TextAlign};
use kurbo::{Point, Rect, RoundedRectRadii};
use paneldeck_core::props::Props;

/// Artwork for one element type, in display coordinates.
pub trait ElementPainter: Send + Sync {
    fn paint(&self, props: &Props, out: &mut RenderPlan);
}

/// Painters keyed by element type id.
///
/// Registered separately from the type registry: the registry describes
/// types (defaults, schema), painters draw them, and hosts may supply
/// either without the other.
#[derive(Default)]
pub struct PainterSet {
    painters: Vec<(String, Box<dyn ElementPainter>)>,
}

impl PainterSet {
    /// Empty set; hosts register their own painters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set pre-loaded with painters for the stock types.
    pub fn with_stock_painters() -> Self {
        let mut set = Self::new();
        set.register("filled-rect", Box::new(FilledRectPainter));
        set.register("outline-rect", Box::new(OutlineRectPainter));
        set.register("text-label", Box::new(TextLabelPainter));
        set.register("bar-horizontal", Box::new(HBarPainter));
        set
    }

    /// Register a painter. A duplicate id replaces the earlier entry.
    pub fn register(&mut self, type_id: impl Into<String>, painter: Box<dyn ElementPainter>) {
        let type_id = type_id.into();
        if let Some(slot) = self.painters.iter_mut().find(|(id, _)| *id == type_id) {
            slot.1 = painter;
        } else {
            self.painters.push((type_id, painter));
        }
    }

    pub fn get(&self, type_id: &str) -> Option<&dyn ElementPainter> {
        self.painters
            .iter()
            .find(|(id, _)| id.as_str() == type_id)
            .map(|(_, painter)| painter.as_ref())
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.get(type_id).is_some()
    }
}

/// Element box from the shared geometry props.
fn bounds(props: &Props) -> Rect {
    let x = props.number("x");
    let y = props.number("y");
    Rect::new(x, y, x + props.number("w"), y + props.number("h"))
}

fn fill_color(props: &Props) -> peniko::Color {
    props.color("color").unwrap_or_default().to_color()
}

/// Solid rectangle, optionally rounded.
pub struct FilledRectPainter;

impl ElementPainter for FilledRectPainter {
    fn paint(&self, props: &Props, out: &mut RenderPlan) {
        out.push(DrawOp::FillRect {
            rect: bounds(props),
            radii: props.number("radius").into(),
            color: fill_color(props),
        });
    }
}

/// Rectangle outline, stroked inside the element box.
pub struct OutlineRectPainter;

impl ElementPainter for OutlineRectPainter {
    fn paint(&self, props: &Props, out: &mut RenderPlan) {
        let line_width = props.number("lineWidth");
        let b = bounds(props);
        // Pull the stroke centerline in by half its width so the outline
        // stays inside the element box.
        let rect = Rect::new(
            b.x0 + line_width / 2.0,
            b.y0 + line_width / 2.0,
            b.x1 - line_width / 2.0,
            b.y1 - line_width / 2.0,
        );
        out.push(DrawOp::StrokeRect {
            rect,
            radii: props.number("radius").into(),
            color: fill_color(props),
            width: line_width,
            dash: None,
        });
    }
}

/// Single line of text anchored to the top of the element box.
pub struct TextLabelPainter;

impl ElementPainter for TextLabelPainter {
    fn paint(&self, props: &Props, out: &mut RenderPlan) {
        let b = bounds(props);
        let align = TextAlign::from_name(props.text("textAlign").unwrap_or("left"));
        let anchor = match align {
            TextAlign::Left => Point::new(b.x0, b.y0),
            TextAlign::Center => Point::new(b.center().x, b.y0),
            TextAlign::Right => Point::new(b.x1, b.y0),
        };
        out.push(DrawOp::Text {
            anchor,
            content: props.text("text").unwrap_or_default().to_string(),
            color: fill_color(props),
            size: props.number("fontSize"),
            align,
            weight: FontWeight::from_name(props.text("fontWeight").unwrap_or("normal")),
        });
    }
}

/// Horizontal bar with optional rounded end caps and edge gaps.
pub struct HBarPainter;

impl ElementPainter for HBarPainter {
    fn paint(&self, props: &Props, out: &mut RenderPlan) {
        let b = bounds(props);
        let bar = Rect::new(
            b.x0 + props.number("leftGap"),
            b.y0 + props.number("topGap"),
            b.x1 - props.number("rightGap"),
            b.y1 - props.number("bottomGap"),
        );
        if bar.width() <= 0.0 || bar.height() <= 0.0 {
            return;
        }
        let cap = bar.height() / 2.0;
        let left = if props.text("endCapLeft") == Some("round") { cap } else { 0.0 };
        let right = if props.text("endCapRight") == Some("round") { cap } else { 0.0 };
        out.push(DrawOp::FillRect {
            rect: bar,
            radii: RoundedRectRadii::new(left, right, right, left),
            color: fill_color(props),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paneldeck_core::color::Palette;
    use paneldeck_core::registry::TypeRegistry;

    fn default_props(type_id: &str) -> Props {
        TypeRegistry::with_stock_types()
            .get(type_id)
            .unwrap()
            .default_props
            .clone()
    }

    fn paint(type_id: &str, props: &Props) -> Vec<DrawOp> {
        let set = PainterSet::with_stock_painters();
        let mut plan = RenderPlan::new();
        set.get(type_id).unwrap().paint(props, &mut plan);
        plan.into_ops()
    }

    #[test]
    fn test_filled_rect_artwork() {
        let mut props = default_props("filled-rect");
        props.set("x", 10.0);
        props.set("y", 20.0);
        props.set("radius", 6.0);

        let ops = paint("filled-rect", &props);
        assert_eq!(
            ops,
            vec![DrawOp::FillRect {
                rect: Rect::new(10.0, 20.0, 50.0, 50.0),
                radii: RoundedRectRadii::from_single_radius(6.0),
                color: Palette::ORANGE.to_color(),
            }]
        );
    }

    #[test]
    fn test_outline_rect_strokes_inside_its_box() {
        let ops = paint("outline-rect", &default_props("outline-rect"));
        assert_eq!(
            ops,
            vec![DrawOp::StrokeRect {
                rect: Rect::new(1.0, 1.0, 59.0, 39.0),
                radii: RoundedRectRadii::from_single_radius(4.0),
                color: Palette::BLUE.to_color(),
                width: 2.0,
                dash: None,
            }]
        );
    }

    #[test]
    fn test_text_label_anchors_follow_alignment() {
        let mut props = default_props("text-label");
        props.set("x", 10.0);
        props.set("y", 5.0);

        let ops = paint("text-label", &props);
        let DrawOp::Text { anchor, content, size, align, weight, .. } = &ops[0] else {
            panic!("expected a text op, got {:?}", ops[0]);
        };
        assert_eq!(*anchor, Point::new(10.0, 5.0));
        assert_eq!(content, "LABEL");
        assert_eq!(*size, 14.0);
        assert_eq!(*align, TextAlign::Left);
        assert_eq!(*weight, FontWeight::Bold);

        props.set("textAlign", "center");
        let ops = paint("text-label", &props);
        let DrawOp::Text { anchor, .. } = &ops[0] else {
            panic!("expected a text op");
        };
        // Default width is 80, so the midline sits at x + 40.
        assert_eq!(*anchor, Point::new(50.0, 5.0));

        props.set("textAlign", "right");
        let ops = paint("text-label", &props);
        let DrawOp::Text { anchor, .. } = &ops[0] else {
            panic!("expected a text op");
        };
        assert_eq!(*anchor, Point::new(90.0, 5.0));
    }

    #[test]
    fn test_hbar_gaps_and_end_caps() {
        let mut props = default_props("bar-horizontal");
        props.set("leftGap", 4.0);
        props.set("topGap", 2.0);
        props.set("endCapLeft", "round");

        let ops = paint("bar-horizontal", &props);
        assert_eq!(
            ops,
            vec![DrawOp::FillRect {
                rect: Rect::new(4.0, 2.0, 120.0, 20.0),
                radii: RoundedRectRadii::new(9.0, 0.0, 0.0, 9.0),
                color: Palette::ORANGE.to_color(),
            }]
        );
    }

    #[test]
    fn test_hbar_swallowed_by_gaps_paints_nothing() {
        let mut props = default_props("bar-horizontal");
        props.set("w", 10.0);
        props.set("leftGap", 20.0);
        assert!(paint("bar-horizontal", &props).is_empty());
    }

    #[test]
    fn test_register_replaces_and_get_misses() {
        struct Blank;
        impl ElementPainter for Blank {
            fn paint(&self, _props: &Props, _out: &mut RenderPlan) {}
        }

        let mut set = PainterSet::with_stock_painters();
        assert!(set.get("no-such-type").is_none());

        set.register("filled-rect", Box::new(Blank));
        let mut plan = RenderPlan::new();
        set.get("filled-rect")
            .unwrap()
            .paint(&default_props("filled-rect"), &mut plan);
        assert!(plan.is_empty());
    }
}
