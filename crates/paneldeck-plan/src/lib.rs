//! PanelDeck Render Plan Library
//!
//! Turns a PanelDeck document plus view state into an ordered list of
//! backend-agnostic draw operations. Base artwork and interaction
//! feedback build as two separate plans so selection changes never force
//! the elements themselves to repaint.

pub mod painter;
pub mod plan;
pub mod scene;

pub use painter::{ElementPainter, PainterSet};
pub use plan::{DrawOp, FontWeight, RenderPlan, TextAlign};
pub use scene::{build_base_plan, build_overlay_plan, PlanContext};
