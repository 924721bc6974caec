//! Layout document: display settings plus an ordered element list.

use crate::color::Rgb;
use crate::props::{PropValue, Props};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of undo states to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// Errors from document (de)serialization.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to parse layout: {0}")]
    Parse(serde_json::Error),
    #[error("failed to encode layout: {0}")]
    Encode(serde_json::Error),
}

/// Unique element identifier, monotonically assigned per document.
pub type ElementId = u64;

/// Physical parameters of the target display panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Display {
    /// Width in display units (panel pixels).
    pub width: f64,
    /// Height in display units (panel pixels).
    pub height: f64,
    /// Corner rounding of the panel outline.
    pub corner_radius: f64,
    /// Background color behind all elements.
    pub bg_color: Rgb,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            width: 280.0,
            height: 240.0,
            corner_radius: 20.0,
            bg_color: Rgb::BLACK,
        }
    }
}

impl Display {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// A single widget placed on the display.
///
/// Geometry lives in `props` under the `x`/`y`/`w`/`h` keys so that every
/// element type shares the same editing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    /// Type identifier resolved against the [`TypeRegistry`](crate::TypeRegistry).
    #[serde(rename = "type")]
    pub type_id: String,
    /// User-facing name shown in layer lists.
    pub name: String,
    pub props: Props,
    pub visible: bool,
    pub locked: bool,
}

impl Element {
    pub fn new(
        id: ElementId,
        type_id: impl Into<String>,
        name: impl Into<String>,
        props: Props,
    ) -> Self {
        Self {
            id,
            type_id: type_id.into(),
            name: name.into(),
            props,
            visible: true,
            locked: false,
        }
    }

    /// Bounding box in display coordinates.
    pub fn bounds(&self) -> Rect {
        let x = self.props.number("x");
        let y = self.props.number("y");
        let w = self.props.number("w");
        let h = self.props.number("h");
        Rect::new(x, y, x + w, y + h)
    }

    /// Write a bounding box back into the geometry props.
    pub fn set_bounds(&mut self, rect: Rect) {
        self.props.set("x", PropValue::Number(rect.x0));
        self.props.set("y", PropValue::Number(rect.y0));
        self.props.set("w", PropValue::Number(rect.width()));
        self.props.set("h", PropValue::Number(rect.height()));
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.props.set("x", PropValue::Number(x));
        self.props.set("y", PropValue::Number(y));
    }

    /// Hit test against the bounding box. Edges count as inside.
    pub fn contains(&self, point: Point) -> bool {
        let b = self.bounds();
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }
}

fn default_next_id() -> ElementId {
    1
}

/// A layout document: the display and its elements, back to front.
///
/// Element order in the vector is the z-order. Undo history captures
/// snapshots of the element list only; display settings are not undoable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub display: Display,
    pub elements: Vec<Element>,
    /// Next id to assign. Never decreases while the document is open, so
    /// ids are not reused even across undo of a delete.
    #[serde(skip, default = "default_next_id")]
    next_id: ElementId,
    /// Undo history stack.
    #[serde(skip)]
    undo_stack: Vec<Vec<Element>>,
    /// Redo history stack.
    #[serde(skip)]
    redo_stack: Vec<Vec<Element>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document with default display settings.
    pub fn new() -> Self {
        Self {
            display: Display::default(),
            elements: Vec::new(),
            next_id: 1,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Allocate a fresh element id, always above every id currently in the
    /// document. Ids are never reused, even after undo or a wipe.
    pub fn allocate_id(&mut self) -> ElementId {
        self.sync_next_id();
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Raise `next_id` above every id currently in the document. Called
    /// after any operation that replaces the element list wholesale.
    fn sync_next_id(&mut self) {
        let max_id = self.elements.iter().map(|e| e.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
    }

    /// Push current state to the undo stack (call before making changes).
    pub fn push_undo(&mut self) {
        self.undo_stack.push(self.elements.clone());

        // Clear redo stack when new changes are made
        self.redo_stack.clear();

        // Limit undo history size
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(snapshot) = self.undo_stack.pop() {
            let current = std::mem::replace(&mut self.elements, snapshot);
            self.redo_stack.push(current);
            self.sync_next_id();
            true
        } else {
            false
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Some(snapshot) = self.redo_stack.pop() {
            let current = std::mem::replace(&mut self.elements, snapshot);
            self.undo_stack.push(current);
            self.sync_next_id();
            true
        } else {
            false
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Add an element on top of the stack.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Remove an element by id.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let idx = self.index_of(id)?;
        Some(self.elements.remove(idx))
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Move an element to the top of the z-order.
    /// Returns false if the id is unknown.
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let el = self.elements.remove(idx);
        self.elements.push(el);
        true
    }

    /// Move an element to the bottom of the z-order.
    /// Returns false if the id is unknown.
    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let el = self.elements.remove(idx);
        self.elements.insert(0, el);
        true
    }

    /// Find the topmost visible element under a display point.
    /// Locked elements are hit; invisible ones never are.
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.visible && e.contains(point))
            .map(|e| e.id)
    }

    /// Find all visible elements whose bounds overlap a rectangle, in
    /// z-order. Touching edges do not count as overlap.
    pub fn elements_in_rect(&self, rect: Rect) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| {
                if !e.visible {
                    return false;
                }
                let b = e.bounds();
                b.x1 > rect.x0 && b.x0 < rect.x1 && b.y1 > rect.y0 && b.y0 < rect.y1
            })
            .map(|e| e.id)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Replace display and elements from another document, keeping undo
    /// history. The previous element list becomes an undo entry.
    pub fn replace_from(&mut self, other: Document) {
        self.push_undo();
        self.display = other.display;
        self.elements = other.elements;
        self.sync_next_id();
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Encode)
    }

    /// Deserialize a document from JSON. The id counter is recomputed from
    /// the highest element id in the data.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let mut doc: Self = serde_json::from_str(json).map_err(DocumentError::Parse)?;
        doc.sync_next_id();
        Ok(doc)
    }
}
