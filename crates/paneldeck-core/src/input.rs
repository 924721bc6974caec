//! Input event types for pointer and keyboard handling.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// The platform command key: ctrl, or cmd on macOS hosts.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are in screen coordinates; the session converts to display
/// coordinates as needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Scroll {
        position: Point,
        delta: Vec2,
    },
    /// Pointer left the surface; clears hover state.
    Leave,
}

/// Keyboard event type. Keys use their logical names ("a", "Delete",
/// "ArrowLeft", "Escape").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed { key: String, modifiers: Modifiers },
    Released { key: String },
}
