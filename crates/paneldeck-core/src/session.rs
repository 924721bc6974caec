//! Interactive editing session.
//!
//! A [`Session`] owns a document plus the state a host needs to edit it:
//! selection, pointer gestures (move, resize, marquee, pan), keyboard
//! shortcuts, and change notifications. Hosts feed it input events, mutate
//! through its methods, and drain [`SessionEvent`]s to decide what to
//! repaint or persist.

use crate::color::Rgb;
use crate::document::{Display, Document, DocumentError, Element, ElementId};
use crate::handles::{self, HandleKind};
use crate::input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::props::PropValue;
use crate::registry::TypeRegistry;
use crate::snap::SnapConfig;
use crate::viewport::Viewport;
use kurbo::{Point, Rect, Vec2};

/// Wheel zoom factors per scroll notch.
const WHEEL_ZOOM_IN: f64 = 1.15;
const WHEEL_ZOOM_OUT: f64 = 0.85;
/// Zoom step for the explicit zoom in/out controls.
const BUTTON_ZOOM_STEP: f64 = 1.25;
/// Viewport padding per side when fitting the display, in screen pixels.
const FIT_PADDING: f64 = 20.0;
/// Arrow-key nudge distances in display units.
const NUDGE_STEP: f64 = 1.0;
const NUDGE_STEP_FAST: f64 = 10.0;
/// Offset applied to duplicated elements, in display units.
const DUPLICATE_OFFSET: f64 = 10.0;
/// Where new elements land when no drop position is given.
const DEFAULT_DROP: Point = Point::new(10.0, 10.0);

/// Notification raised by a session mutation. Hosts drain these once per
/// frame via [`Session::take_events`] and react (repaint, refresh panels,
/// schedule an autosave). Consecutive duplicates are collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Elements were added, removed, or edited.
    DocumentChanged,
    /// The selection changed, or selected elements moved during a drag.
    SelectionChanged,
    /// Display settings changed.
    DisplayChanged,
    /// The session entered or left read-only mode.
    ReadOnlyChanged(bool),
}

/// Active pointer gesture.
#[derive(Debug, Clone, Default)]
enum Mode {
    #[default]
    Idle,
    /// Dragging selected elements. Origins are display-space positions at
    /// gesture start; locked elements are excluded up front.
    Moving {
        start: Point,
        origins: Vec<(ElementId, Point)>,
    },
    /// Dragging a resize handle. `start` stays in screen space so the
    /// gesture survives zoom changes mid-drag.
    Resizing {
        handle: HandleKind,
        start: Point,
        orig: Rect,
    },
    /// Dragging the view.
    Panning { start: Point, start_pan: Vec2 },
    /// Dragging a selection rectangle.
    Marquee {
        start: Point,
        prior: Vec<ElementId>,
        additive: bool,
    },
}

/// An interactive editing session over one document.
#[derive(Debug, Clone)]
pub struct Session {
    /// The document being edited.
    pub document: Document,
    /// Screen/display coordinate mapping.
    pub viewport: Viewport,
    /// Element types available to this session.
    pub registry: TypeRegistry,
    /// Grid snapping configuration.
    pub snap: SnapConfig,
    /// Whether the base render includes grid lines.
    pub show_grid: bool,
    /// Selected element ids, in selection order.
    selection: Vec<ElementId>,
    /// Element under the pointer while idle.
    hovered: Option<ElementId>,
    /// Last known pointer position, in screen coordinates.
    pointer_position: Point,
    mode: Mode,
    /// Live marquee endpoints in display coordinates (start, current).
    marquee: Option<(Point, Point)>,
    read_only: bool,
    /// Color applied to new elements that declare a `color` property.
    active_color: Option<Rgb>,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create a session over an empty document.
    pub fn new(registry: TypeRegistry) -> Self {
        Self::with_document(Document::new(), registry)
    }

    /// Create a session over an existing document.
    pub fn with_document(document: Document, registry: TypeRegistry) -> Self {
        let viewport = Viewport::new(document.display.size());
        Self {
            document,
            viewport,
            registry,
            snap: SnapConfig::default(),
            show_grid: true,
            selection: Vec::new(),
            hovered: None,
            pointer_position: Point::ZERO,
            mode: Mode::Idle,
            marquee: None,
            read_only: false,
            active_color: None,
            events: Vec::new(),
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    /// Drain the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ----- input dispatch -------------------------------------------------

    /// Route a pointer event to the gesture state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => self.on_pointer_down(position, button, modifiers),
            PointerEvent::Move { position } => self.on_pointer_move(position),
            PointerEvent::Up { position, .. } => {
                self.pointer_position = position;
                self.on_pointer_up();
            }
            PointerEvent::Scroll { position, delta } => self.on_scroll(position, delta),
            PointerEvent::Leave => self.on_pointer_leave(),
        }
    }

    /// Route a keyboard event. Returns true if the session consumed it.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        match event {
            KeyEvent::Pressed { key, modifiers } => self.on_key_down(&key, modifiers),
            KeyEvent::Released { .. } => false,
        }
    }

    /// Begin a pointer gesture. `position` is in screen coordinates.
    pub fn on_pointer_down(&mut self, position: Point, button: MouseButton, modifiers: Modifiers) {
        self.pointer_position = position;

        // Middle/right button or alt-drag pans from anywhere.
        if button != MouseButton::Left || modifiers.alt {
            self.mode = Mode::Panning {
                start: position,
                start_pan: self.viewport.pan,
            };
            return;
        }

        let display_point = self.viewport.screen_to_display(position);

        // Read-only sessions can inspect elements but not edit them.
        if self.read_only {
            match self.document.hit_test(display_point) {
                Some(id) if modifiers.shift || modifiers.ctrl => self.toggle_selected(id),
                id => self.select_only(id),
            }
            return;
        }

        // Resize handles win over element bodies. A locked element still
        // shows handles; grabbing one falls through to a plain click.
        if let Some(handle) = self.hit_test_handle(position) {
            if let Some(element) = self.selected_element() {
                if !element.locked {
                    let orig = element.bounds();
                    self.document.push_undo();
                    self.mode = Mode::Resizing {
                        handle,
                        start: position,
                        orig,
                    };
                    return;
                }
            }
        }

        if let Some(id) = self.document.hit_test(display_point) {
            if modifiers.shift || modifiers.ctrl {
                self.toggle_selected(id);
            } else if !self.is_selected(id) {
                self.select_only(Some(id));
            }

            let origins: Vec<(ElementId, Point)> = self
                .document
                .elements
                .iter()
                .filter(|el| self.selection.contains(&el.id) && !el.locked)
                .map(|el| {
                    let origin = Point::new(el.props.number("x"), el.props.number("y"));
                    (el.id, origin)
                })
                .collect();

            if !origins.is_empty() {
                self.document.push_undo();
                self.mode = Mode::Moving {
                    start: display_point,
                    origins,
                };
            }
            return;
        }

        // Empty space starts a marquee. Shift/ctrl adds to the selection
        // instead of replacing it.
        let additive = modifiers.shift || modifiers.ctrl;
        if !additive {
            self.select_only(None);
        }
        self.mode = Mode::Marquee {
            start: display_point,
            prior: if additive {
                self.selection.clone()
            } else {
                Vec::new()
            },
            additive,
        };
        self.marquee = Some((display_point, display_point));
    }

    /// Advance the active gesture. `position` is in screen coordinates.
    pub fn on_pointer_move(&mut self, position: Point) {
        self.pointer_position = position;

        match self.mode.clone() {
            Mode::Idle => {
                // Track hover for the overlay. While over a handle the
                // current hover is kept so the highlight does not flicker.
                if self.hit_test_handle(position).is_none() {
                    let display_point = self.viewport.screen_to_display(position);
                    self.hovered = self.document.hit_test(display_point);
                }
            }
            Mode::Panning { start, start_pan } => {
                self.viewport.pan = start_pan + (position - start);
            }
            Mode::Moving { start, origins } => {
                let delta = self.viewport.screen_to_display(position) - start;
                for (id, origin) in origins {
                    if let Some(element) = self.document.get_mut(id) {
                        let x = self.snap.snap_value(origin.x + delta.x);
                        let y = self.snap.snap_value(origin.y + delta.y);
                        element.set_position(x, y);
                    }
                }
                self.emit(SessionEvent::SelectionChanged);
            }
            Mode::Resizing { handle, start, orig } => {
                let Some(element) = self.selected_element() else {
                    return;
                };
                let id = element.id;
                // Both endpoints convert at the current zoom, so wheel
                // zooming mid-drag does not jolt the element.
                let delta = self.viewport.screen_to_display(position)
                    - self.viewport.screen_to_display(start);
                let resized = handles::resize(orig, handle, delta);
                let x = self.snap.snap_value(resized.x0);
                let y = self.snap.snap_value(resized.y0);
                let w = self.snap.snap_value(resized.width());
                let h = self.snap.snap_value(resized.height());
                if let Some(element) = self.document.get_mut(id) {
                    element.set_bounds(Rect::new(x, y, x + w, y + h));
                }
                self.emit(SessionEvent::SelectionChanged);
            }
            Mode::Marquee {
                start,
                prior,
                additive,
            } => {
                let current = self.viewport.screen_to_display(position);
                self.marquee = Some((start, current));

                // Recomputed from scratch every move so shrinking the
                // marquee deselects again.
                let rect = Rect::from_points(start, current);
                let mut selection = if additive { prior } else { Vec::new() };
                for id in self.document.elements_in_rect(rect) {
                    if !selection.contains(&id) {
                        selection.push(id);
                    }
                }
                self.selection = selection;
                self.emit(SessionEvent::SelectionChanged);
            }
        }
    }

    /// Finish the active gesture.
    pub fn on_pointer_up(&mut self) {
        let finished_edit = matches!(self.mode, Mode::Moving { .. } | Mode::Resizing { .. });
        self.marquee = None;
        self.mode = Mode::Idle;
        if finished_edit {
            self.emit(SessionEvent::DocumentChanged);
        }
    }

    /// The pointer left the surface; the gesture ends as if released.
    pub fn on_pointer_leave(&mut self) {
        self.on_pointer_up();
        self.hovered = None;
    }

    /// Zoom about the cursor. Works in read-only sessions and mid-gesture;
    /// navigation is never an edit.
    pub fn on_scroll(&mut self, position: Point, delta: Vec2) {
        self.pointer_position = position;
        let factor = if delta.y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.viewport.zoom_at(position, factor);
    }

    /// Handle a key press. Returns true if the session consumed it (hosts
    /// should then suppress their own default handling).
    pub fn on_key_down(&mut self, key: &str, modifiers: Modifiers) -> bool {
        if self.read_only {
            return false;
        }

        match key {
            "Delete" | "Backspace" => return self.delete_selected() > 0,
            "Escape" => {
                // Clears the selection but reports unhandled so hosts can
                // still close panels and the like.
                self.select_only(None);
                return false;
            }
            _ => {}
        }

        if modifiers.command() {
            // Letter keys arrive uppercase when shift is held.
            return match key.to_ascii_lowercase().as_str() {
                "z" if modifiers.shift => {
                    self.redo();
                    true
                }
                "z" => {
                    self.undo();
                    true
                }
                "y" => {
                    self.redo();
                    true
                }
                "d" => {
                    if self.selection.is_empty() {
                        false
                    } else {
                        self.duplicate_selected();
                        true
                    }
                }
                "a" => {
                    self.select_all();
                    true
                }
                _ => false,
            };
        }

        if let Some((dx, dy)) = arrow_delta(key) {
            if self.selection.is_empty() {
                return false;
            }
            let step = if modifiers.shift {
                NUDGE_STEP_FAST
            } else {
                NUDGE_STEP
            };
            self.nudge_selected(dx * step, dy * step);
            return true;
        }

        false
    }

    /// Move selected, non-locked elements by a raw offset. Nudges are not
    /// snapped; the arrows exist for exactly that fine control.
    fn nudge_selected(&mut self, dx: f64, dy: f64) {
        self.document.push_undo();
        for id in self.selection.clone() {
            if let Some(element) = self.document.get_mut(id) {
                if element.locked {
                    continue;
                }
                let x = element.props.number("x") + dx;
                let y = element.props.number("y") + dy;
                element.set_position(x, y);
            }
        }
        self.emit(SessionEvent::SelectionChanged);
        self.emit(SessionEvent::DocumentChanged);
    }

    // ----- element operations ---------------------------------------------

    /// Instantiate a registered type at a display position (snapped) and
    /// select it. Returns None for unknown types or read-only sessions.
    pub fn add_element(&mut self, type_id: &str, at: Option<Point>) -> Option<ElementId> {
        if self.read_only {
            return None;
        }
        let ty = self.registry.get(type_id)?;
        let name_stem = ty.name.clone();
        let mut props = ty.default_props.clone();

        let at = at.unwrap_or(DEFAULT_DROP);
        props.set("x", self.snap.snap_value(at.x));
        props.set("y", self.snap.snap_value(at.y));
        if let Some(color) = self.active_color {
            if props.contains("color") {
                props.set("color", color);
            }
        }

        let id = self.document.allocate_id();
        let element = Element::new(id, type_id, format!("{name_stem} {id}"), props);
        self.document.push_undo();
        self.document.add_element(element);
        self.select_only(Some(id));
        self.emit(SessionEvent::DocumentChanged);
        Some(id)
    }

    /// Delete one element.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        if self.read_only || self.document.get(id).is_none() {
            return false;
        }
        self.document.push_undo();
        self.document.remove_element(id);
        self.hovered = self.hovered.filter(|&h| h != id);
        let was_selected = self.selection.contains(&id);
        self.selection.retain(|&s| s != id);
        self.emit(SessionEvent::DocumentChanged);
        if was_selected {
            self.emit(SessionEvent::SelectionChanged);
        }
        true
    }

    /// Delete every selected element as one undo step. Returns the number
    /// of elements removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.read_only || self.selection.is_empty() {
            return 0;
        }
        self.document.push_undo();
        let ids = std::mem::take(&mut self.selection);
        let mut removed = 0;
        for id in &ids {
            if self.document.remove_element(*id).is_some() {
                removed += 1;
            }
        }
        self.hovered = self.hovered.filter(|h| !ids.contains(h));
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::SelectionChanged);
        removed
    }

    /// Append a copy of `source`, offset and with a fresh id and name.
    /// Visibility and lock state reset on the copy.
    fn offset_copy(&mut self, source: ElementId) -> Option<ElementId> {
        let element = self.document.get(source)?;
        let type_id = element.type_id.clone();
        let name = format!("{} copy", element.name);
        let mut props = element.props.clone();
        let x = props.number("x") + DUPLICATE_OFFSET;
        let y = props.number("y") + DUPLICATE_OFFSET;
        props.set("x", x);
        props.set("y", y);

        let id = self.document.allocate_id();
        self.document.add_element(Element::new(id, type_id, name, props));
        Some(id)
    }

    /// Duplicate one element and select the copy.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        if self.read_only || self.document.get(id).is_none() {
            return None;
        }
        self.document.push_undo();
        let copy = self.offset_copy(id)?;
        self.selection = vec![copy];
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::SelectionChanged);
        Some(copy)
    }

    /// Duplicate the selection as one undo step. The copies become the new
    /// selection.
    pub fn duplicate_selected(&mut self) -> Vec<ElementId> {
        if self.read_only || self.selection.is_empty() {
            return Vec::new();
        }
        self.document.push_undo();
        let mut copies = Vec::new();
        for id in self.selection.clone() {
            if let Some(copy) = self.offset_copy(id) {
                copies.push(copy);
            }
        }
        self.selection = copies.clone();
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::SelectionChanged);
        copies
    }

    /// Set a property, coercing the value against the type's schema when
    /// one declares the key. A rejected value leaves the document untouched.
    pub fn update_prop(&mut self, id: ElementId, key: &str, value: PropValue) -> bool {
        if self.read_only {
            return false;
        }
        let Some(element) = self.document.get(id) else {
            return false;
        };
        let value = match self
            .registry
            .get(&element.type_id)
            .and_then(|ty| ty.spec(key))
        {
            Some(spec) => match spec.coerce(value) {
                Some(value) => value,
                None => return false,
            },
            None => value,
        };

        self.document.push_undo();
        if let Some(element) = self.document.get_mut(id) {
            element.props.set(key, value);
        }
        self.emit(SessionEvent::DocumentChanged);
        true
    }

    /// Show or hide an element. Hidden elements never hit test and are
    /// skipped by the renderer, but keep their selection entry.
    pub fn set_visible(&mut self, id: ElementId, visible: bool) -> bool {
        if self.read_only {
            return false;
        }
        match self.document.get(id) {
            None => return false,
            Some(element) if element.visible == visible => return true,
            Some(_) => {}
        }
        self.document.push_undo();
        if let Some(element) = self.document.get_mut(id) {
            element.visible = visible;
        }
        self.emit(SessionEvent::DocumentChanged);
        true
    }

    /// Lock or unlock an element. Locked elements stay selectable but
    /// ignore move, resize, and nudge.
    pub fn set_locked(&mut self, id: ElementId, locked: bool) -> bool {
        if self.read_only {
            return false;
        }
        match self.document.get(id) {
            None => return false,
            Some(element) if element.locked == locked => return true,
            Some(_) => {}
        }
        self.document.push_undo();
        if let Some(element) = self.document.get_mut(id) {
            element.locked = locked;
        }
        self.emit(SessionEvent::DocumentChanged);
        true
    }

    /// Move an element to the top of the z-order.
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        if self.read_only || self.document.get(id).is_none() {
            return false;
        }
        self.document.push_undo();
        self.document.bring_to_front(id);
        self.emit(SessionEvent::DocumentChanged);
        true
    }

    /// Move an element to the bottom of the z-order.
    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        if self.read_only || self.document.get(id).is_none() {
            return false;
        }
        self.document.push_undo();
        self.document.send_to_back(id);
        self.emit(SessionEvent::DocumentChanged);
        true
    }

    /// Replace the display settings. Display edits apply directly and are
    /// not part of the undo history.
    pub fn update_display(&mut self, display: Display) {
        if self.read_only {
            return;
        }
        self.document.display = display;
        self.viewport.display_size = self.document.display.size();
        self.emit(SessionEvent::DisplayChanged);
    }

    /// Remove every element as one undo step. Allocated ids are never
    /// reused, even after a wipe.
    pub fn clear_all(&mut self) {
        if self.read_only {
            return;
        }
        self.document.push_undo();
        self.document.elements.clear();
        self.selection.clear();
        self.hovered = None;
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::SelectionChanged);
    }

    /// Color applied to new elements that declare a `color` property.
    pub fn set_active_color(&mut self, color: Option<Rgb>) {
        self.active_color = color;
    }

    pub fn active_color(&self) -> Option<Rgb> {
        self.active_color
    }

    // ----- selection ------------------------------------------------------

    /// Replace the selection with at most one element. Ids are not
    /// validated; stale ids simply never resolve.
    pub fn select_only(&mut self, id: Option<ElementId>) {
        self.selection.clear();
        if let Some(id) = id {
            self.selection.push(id);
        }
        self.emit(SessionEvent::SelectionChanged);
    }

    /// Add or remove one element from the selection.
    pub fn toggle_selected(&mut self, id: ElementId) {
        if let Some(index) = self.selection.iter().position(|&s| s == id) {
            self.selection.remove(index);
        } else {
            self.selection.push(id);
        }
        self.emit(SessionEvent::SelectionChanged);
    }

    /// Select every visible, unlocked element.
    pub fn select_all(&mut self) {
        self.selection = self
            .document
            .elements
            .iter()
            .filter(|el| el.visible && !el.locked)
            .map(|el| el.id)
            .collect();
        self.emit(SessionEvent::SelectionChanged);
    }

    pub fn clear_selection(&mut self) {
        self.select_only(None);
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(&id)
    }

    /// Selected ids, in selection order.
    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    /// The selected element, when exactly one is selected and it still
    /// resolves.
    pub fn selected_element(&self) -> Option<&Element> {
        match self.selection.as_slice() {
            [id] => self.document.get(*id),
            _ => None,
        }
    }

    /// Selected elements in z-order.
    pub fn selected_elements(&self) -> Vec<&Element> {
        self.document
            .elements
            .iter()
            .filter(|el| self.selection.contains(&el.id))
            .collect()
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    /// The live marquee rectangle in display coordinates, if one is being
    /// dragged.
    pub fn marquee(&self) -> Option<Rect> {
        self.marquee.map(|(a, b)| Rect::from_points(a, b))
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// Switch read-only mode. Mutating operations, including undo, are
    /// rejected while set.
    pub fn set_read_only(&mut self, read_only: bool) {
        if self.read_only == read_only {
            return;
        }
        self.read_only = read_only;
        self.emit(SessionEvent::ReadOnlyChanged(read_only));
    }

    // ----- history --------------------------------------------------------

    /// Undo the last change. The selection clears; restored element ids may
    /// no longer match what was selected.
    pub fn undo(&mut self) -> bool {
        if self.read_only || !self.document.undo() {
            return false;
        }
        self.selection.clear();
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::SelectionChanged);
        true
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> bool {
        if self.read_only || !self.document.redo() {
            return false;
        }
        self.selection.clear();
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::SelectionChanged);
        true
    }

    // ----- transfer -------------------------------------------------------

    /// Serialize the document for storage or transfer.
    pub fn export_layout(&self) -> Result<String, DocumentError> {
        self.document.to_json()
    }

    /// Replace the document from serialized form. Parsing happens before
    /// any mutation, so a malformed payload leaves the session untouched.
    /// The previous state stays reachable through undo. Loading works in
    /// read-only sessions; only user edits are gated.
    pub fn import_layout(&mut self, json: &str) -> Result<(), DocumentError> {
        let incoming = Document::from_json(json)?;
        self.document.replace_from(incoming);
        self.viewport.display_size = self.document.display.size();
        self.selection.clear();
        self.hovered = None;
        self.emit(SessionEvent::DocumentChanged);
        self.emit(SessionEvent::SelectionChanged);
        self.emit(SessionEvent::DisplayChanged);
        Ok(())
    }

    // ----- hit testing ----------------------------------------------------

    /// Topmost visible element under a screen position.
    pub fn hit_test(&self, screen_point: Point) -> Option<ElementId> {
        let display_point = self.viewport.screen_to_display(screen_point);
        self.document.hit_test(display_point)
    }

    /// Resize handle under a screen position. Handles exist only while
    /// exactly one element is selected.
    pub fn hit_test_handle(&self, screen_point: Point) -> Option<HandleKind> {
        let element = self.selected_element()?;
        let display_point = self.viewport.screen_to_display(screen_point);
        handles::hit_handle(element.bounds(), display_point, self.viewport.zoom)
    }

    /// CSS cursor name for the current pointer position.
    pub fn cursor(&self) -> &'static str {
        if let Some(handle) = self.hit_test_handle(self.pointer_position) {
            return handle.cursor();
        }
        if self.hit_test(self.pointer_position).is_some() {
            return "move";
        }
        "crosshair"
    }

    // ----- view controls --------------------------------------------------

    pub fn zoom_in(&mut self) {
        self.viewport.set_zoom(self.viewport.zoom * BUTTON_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.set_zoom(self.viewport.zoom / BUTTON_ZOOM_STEP);
    }

    /// Fit the whole display in the viewport.
    pub fn zoom_to_fit(&mut self) {
        self.viewport.fit(FIT_PADDING);
    }
}

fn arrow_delta(key: &str) -> Option<(f64, f64)> {
    match key {
        "ArrowUp" => Some((0.0, -1.0)),
        "ArrowDown" => Some((0.0, 1.0)),
        "ArrowLeft" => Some((-1.0, 0.0)),
        "ArrowRight" => Some((1.0, 0.0)),
        _ => None,
    }
}
