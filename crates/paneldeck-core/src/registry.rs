//! Element type registry.
//!
//! The engine never draws element content itself; each type is an external
//! capability the host registers: default properties plus a property schema
//! here, and a paint function against the plan builder. A few stock
//! descriptors ship for tests and the CLI.

use crate::color::Palette;
use crate::props::{PropSpec, Props};

/// Descriptor for one element type.
#[derive(Debug, Clone)]
pub struct ElementType {
    /// Stable identifier stored in documents (e.g. `"filled-rect"`).
    pub type_id: String,
    /// Display name; also the stem for new element names.
    pub name: String,
    /// Palette grouping for host UIs.
    pub category: String,
    /// Properties a fresh element starts with.
    pub default_props: Props,
    /// Ordered property schema, positional props (`x`/`y`/`w`/`h`) excluded.
    pub schema: Vec<PropSpec>,
}

impl ElementType {
    pub fn new(
        type_id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            type_id: type_id.into(),
            name: name.into(),
            category: category.into(),
            default_props: Props::new(),
            schema: Vec::new(),
        }
    }

    pub fn with_defaults(mut self, props: Props) -> Self {
        self.default_props = props;
        self
    }

    pub fn with_schema(mut self, schema: Vec<PropSpec>) -> Self {
        self.schema = schema;
        self
    }

    /// Schema entry for a property key, if the type declares one.
    pub fn spec(&self, key: &str) -> Option<&PropSpec> {
        self.schema.iter().find(|s| s.key == key)
    }
}

/// The set of element types available to a session.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<ElementType>,
}

impl TypeRegistry {
    /// Empty registry; hosts register their own catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the stock types.
    pub fn with_stock_types() -> Self {
        let mut registry = Self::new();
        registry.register(filled_rect());
        registry.register(outline_rect());
        registry.register(text_label());
        registry.register(bar_horizontal());
        registry
    }

    /// Register a type. A duplicate id replaces the earlier entry.
    pub fn register(&mut self, ty: ElementType) {
        if let Some(existing) = self.types.iter_mut().find(|t| t.type_id == ty.type_id) {
            *existing = ty;
        } else {
            self.types.push(ty);
        }
    }

    pub fn get(&self, type_id: &str) -> Option<&ElementType> {
        self.types.iter().find(|t| t.type_id == type_id)
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.get(type_id).is_some()
    }

    /// All types, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn rect_defaults(w: f64, h: f64) -> Props {
    let mut props = Props::new();
    props.set("x", 0.0);
    props.set("y", 0.0);
    props.set("w", w);
    props.set("h", h);
    props
}

fn filled_rect() -> ElementType {
    let mut props = rect_defaults(40.0, 30.0);
    props.set("color", Palette::ORANGE);
    props.set("radius", 0.0);
    ElementType::new("filled-rect", "Filled Rect", "Indicators")
        .with_defaults(props)
        .with_schema(vec![
            PropSpec::color("color", "Color"),
            PropSpec::number("radius", "Radius").with_range(0.0, 50.0),
        ])
}

fn outline_rect() -> ElementType {
    let mut props = rect_defaults(60.0, 40.0);
    props.set("color", Palette::BLUE);
    props.set("radius", 4.0);
    props.set("lineWidth", 2.0);
    ElementType::new("outline-rect", "Outline Rect", "Indicators")
        .with_defaults(props)
        .with_schema(vec![
            PropSpec::color("color", "Color"),
            PropSpec::number("radius", "Radius").with_range(0.0, 50.0),
            PropSpec::number("lineWidth", "Stroke").with_range(1.0, 10.0),
        ])
}

fn text_label() -> ElementType {
    let mut props = rect_defaults(80.0, 20.0);
    props.set("text", "LABEL");
    props.set("color", Palette::ORANGE);
    props.set("fontSize", 14.0);
    props.set("textAlign", "left");
    props.set("fontWeight", "bold");
    ElementType::new("text-label", "Text Label", "Data Panels")
        .with_defaults(props)
        .with_schema(vec![
            PropSpec::text("text", "Text"),
            PropSpec::color("color", "Color"),
            PropSpec::number("fontSize", "Font Size").with_range(6.0, 72.0),
            PropSpec::select("textAlign", "Align", ["left", "center", "right"]),
            PropSpec::select("fontWeight", "Weight", ["normal", "bold"]),
        ])
}

fn bar_horizontal() -> ElementType {
    let mut props = rect_defaults(120.0, 20.0);
    props.set("color", Palette::ORANGE);
    props.set("endCapLeft", "flat");
    props.set("endCapRight", "flat");
    props.set("topGap", 0.0);
    props.set("bottomGap", 0.0);
    props.set("leftGap", 0.0);
    props.set("rightGap", 0.0);
    ElementType::new("bar-horizontal", "H-Bar", "Structural")
        .with_defaults(props)
        .with_schema(vec![
            PropSpec::color("color", "Color"),
            PropSpec::select("endCapLeft", "Left Cap", ["flat", "round"]),
            PropSpec::select("endCapRight", "Right Cap", ["flat", "round"]),
            PropSpec::number("topGap", "Top Gap").with_range(0.0, 40.0),
            PropSpec::number("bottomGap", "Bottom Gap").with_range(0.0, 40.0),
            PropSpec::number("leftGap", "Left Gap").with_range(0.0, 40.0),
            PropSpec::number("rightGap", "Right Gap").with_range(0.0, 40.0),
        ])
}
