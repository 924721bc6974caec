//! Element property bags and their external schemas.
//!
//! Properties are open maps whose schema is defined per element type by the
//! host's type registry. Values are a closed set of tagged variants rather
//! than raw JSON, so the engine can validate and coerce writes; on the wire
//! they serialize as plain JSON scalars/arrays (`10`, `"#FF9900"`, `true`,
//! `["a", "b"]`) to stay compatible with layout consumers.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One property value.
///
/// Untagged: colors win over plain text when a string parses as `#RRGGBB`,
/// and color lists win over text lists when every entry parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Number(f64),
    Bool(bool),
    Color(Rgb),
    Text(String),
    ColorList(Vec<Rgb>),
    TextList(Vec<String>),
}

impl PropValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgb> {
        match self {
            PropValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<Rgb> for PropValue {
    fn from(c: Rgb) -> Self {
        PropValue::Color(c)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

/// An element's property bag.
///
/// `BTreeMap` keeps serialization deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Numeric property, or 0.0 when absent or mistyped.
    pub fn number(&self, key: &str) -> f64 {
        self.get(key).and_then(PropValue::as_number).unwrap_or(0.0)
    }

    pub fn color(&self, key: &str) -> Option<Rgb> {
        self.get(key).and_then(PropValue::as_color)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_text)
    }

    pub fn bool(&self, key: &str) -> bool {
        self.get(key).and_then(PropValue::as_bool).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, PropValue)> for Props {
    fn from_iter<T: IntoIterator<Item = (String, PropValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Widget kind of a property, as presented by property editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropKind {
    Color,
    Number,
    Text,
    Select,
    Checkbox,
    ColorList,
    TextList,
}

/// Schema entry for one property of an element type.
///
/// Produced by the type registry, consumed by out-of-scope property editors;
/// the engine uses it only to coerce writes in [`PropSpec::coerce`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropSpec {
    pub key: String,
    pub label: String,
    pub kind: PropKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl PropSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: PropKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            min: None,
            max: None,
            options: Vec::new(),
        }
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, PropKind::Number)
    }

    pub fn color(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, PropKind::Color)
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, PropKind::Text)
    }

    pub fn checkbox(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, PropKind::Checkbox)
    }

    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut spec = Self::new(key, label, PropKind::Select);
        spec.options = options.into_iter().map(Into::into).collect();
        spec
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Coerce a candidate value to this spec, or reject it.
    ///
    /// Numbers are clamped to the declared range; hex strings are accepted
    /// where a color is expected; select values must be one of the options.
    pub fn coerce(&self, value: PropValue) -> Option<PropValue> {
        match self.kind {
            PropKind::Number => {
                let n = match value {
                    PropValue::Number(n) => n,
                    PropValue::Text(ref s) => s.trim().parse().ok()?,
                    _ => return None,
                };
                let n = match (self.min, self.max) {
                    (Some(lo), Some(hi)) => n.clamp(lo, hi),
                    (Some(lo), None) => n.max(lo),
                    (None, Some(hi)) => n.min(hi),
                    (None, None) => n,
                };
                Some(PropValue::Number(n))
            }
            PropKind::Color => match value {
                PropValue::Color(c) => Some(PropValue::Color(c)),
                PropValue::Text(s) => Rgb::from_hex(&s).map(PropValue::Color),
                _ => None,
            },
            PropKind::Text => match value {
                PropValue::Text(s) => Some(PropValue::Text(s)),
                PropValue::Number(n) => Some(PropValue::Text(n.to_string())),
                PropValue::Color(c) => Some(PropValue::Text(c.to_hex())),
                _ => None,
            },
            PropKind::Select => match value {
                PropValue::Text(s) if self.options.iter().any(|o| o == &s) => {
                    Some(PropValue::Text(s))
                }
                _ => None,
            },
            PropKind::Checkbox => value.as_bool().map(PropValue::Bool),
            PropKind::ColorList => match value {
                PropValue::ColorList(l) => Some(PropValue::ColorList(l)),
                PropValue::TextList(l) => {
                    let colors: Option<Vec<Rgb>> =
                        l.iter().map(|s| Rgb::from_hex(s)).collect();
                    colors.map(PropValue::ColorList)
                }
                _ => None,
            },
            PropKind::TextList => match value {
                PropValue::TextList(l) => Some(PropValue::TextList(l)),
                PropValue::ColorList(l) => {
                    Some(PropValue::TextList(l.iter().map(|c| c.to_hex()).collect()))
                }
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_plain_json() {
        let mut props = Props::new();
        props.set("x", 10.0);
        props.set("color", Rgb::new(0xFF, 0x99, 0x00));
        props.set("label", "SYS");
        props.set("filled", true);

        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(
            json,
            r##"{"color":"#FF9900","filled":true,"label":"SYS","x":10.0}"##
        );
    }

    #[test]
    fn test_hex_strings_deserialize_as_colors() {
        let props: Props = serde_json::from_str(r##"{"color":"#FF9900","name":"core"}"##).unwrap();
        assert_eq!(props.color("color"), Some(Rgb::new(0xFF, 0x99, 0x00)));
        assert_eq!(props.text("name"), Some("core"));
    }

    #[test]
    fn test_list_deserialization() {
        let props: Props =
            serde_json::from_str(r##"{"bars":["#FF9900","#CC6666"],"rows":["NAV","OPS"]}"##)
                .unwrap();
        assert!(matches!(props.get("bars"), Some(PropValue::ColorList(l)) if l.len() == 2));
        assert!(matches!(props.get("rows"), Some(PropValue::TextList(l)) if l.len() == 2));
    }

    #[test]
    fn test_number_coercion_clamps() {
        let spec = PropSpec::number("w", "Width").with_range(4.0, 280.0);
        assert_eq!(
            spec.coerce(PropValue::Number(1000.0)),
            Some(PropValue::Number(280.0))
        );
        assert_eq!(
            spec.coerce(PropValue::Text("12".into())),
            Some(PropValue::Number(12.0))
        );
        assert_eq!(spec.coerce(PropValue::Bool(true)), None);
    }

    #[test]
    fn test_color_coercion_from_text() {
        let spec = PropSpec::color("color", "Color");
        assert_eq!(
            spec.coerce(PropValue::Text("#ff9900".into())),
            Some(PropValue::Color(Rgb::new(0xFF, 0x99, 0x00)))
        );
        assert_eq!(spec.coerce(PropValue::Text("orange".into())), None);
    }

    #[test]
    fn test_select_rejects_unknown_option() {
        let spec = PropSpec::select("align", "Align", ["left", "right"]);
        assert!(spec.coerce(PropValue::Text("left".into())).is_some());
        assert!(spec.coerce(PropValue::Text("center".into())).is_none());
    }
}
