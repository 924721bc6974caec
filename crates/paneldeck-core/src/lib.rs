//! PanelDeck Core Library
//!
//! Platform-agnostic model and editing logic for the PanelDeck layout
//! designer: the document and its elements, the element type registry,
//! the interactive editing session, and persistence.

pub mod color;
pub mod document;
pub mod handles;
pub mod input;
pub mod props;
pub mod registry;
pub mod session;
pub mod snap;
pub mod storage;
pub mod viewport;

pub use color::{Palette, Rgb};
pub use document::{Display, Document, DocumentError, Element, ElementId};
pub use handles::{HandleKind, HANDLE_HIT_RADIUS, MIN_ELEMENT_SIZE};
pub use input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use props::{PropKind, PropSpec, PropValue, Props};
pub use registry::{ElementType, TypeRegistry};
pub use session::{Session, SessionEvent};
pub use snap::{SnapConfig, GRID_SIZE};
pub use storage::{KvStore, MemoryKv, PersistenceCoordinator, StoreError, StoreResult};
pub use viewport::{Viewport, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
