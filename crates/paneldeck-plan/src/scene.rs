//! Base and overlay plan builders.
//!
//! The base plan carries the display background, grid, and element
//! artwork; the overlay plan carries hover, selection, resize handles,
//! and the live marquee. Hosts rebuild the overlay on every selection or
//! pointer change and the base plan only when the document or view
//! changes. All emitted geometry is in screen coordinates; overlay stroke
//! widths and handle sizes are fixed screen sizes regardless of zoom.

use crate::painter::PainterSet;
use crate::plan::{DrawOp, RenderPlan};
use kurbo::{Point, Rect, RoundedRectRadii};
use paneldeck_core::document::{Document, ElementId};
use paneldeck_core::handles::HandleKind;
use paneldeck_core::session::Session;
use paneldeck_core::snap::GRID_SIZE;
use paneldeck_core::viewport::Viewport;
use peniko::Color;

/// Half the side of a resize handle square, in screen pixels.
const HANDLE_HALF: f64 = 5.0;

/// Everything the plan builders need for one frame.
pub struct PlanContext<'a> {
    pub document: &'a Document,
    pub viewport: &'a Viewport,
    /// Whether the base plan includes grid lines.
    pub show_grid: bool,
    /// Grid line spacing in display units.
    pub grid_size: f64,
    /// Selected element ids, in selection order.
    pub selection: &'a [ElementId],
    pub hovered: Option<ElementId>,
    /// Marquee rectangle in display coordinates, while one is being dragged.
    pub marquee: Option<Rect>,
}

impl<'a> PlanContext<'a> {
    pub fn new(document: &'a Document, viewport: &'a Viewport) -> Self {
        Self {
            document,
            viewport,
            show_grid: true,
            grid_size: GRID_SIZE,
            selection: &[],
            hovered: None,
            marquee: None,
        }
    }

    /// Context mirroring a live editing session, view state included.
    pub fn for_session(session: &'a Session) -> Self {
        Self {
            document: &session.document,
            viewport: &session.viewport,
            show_grid: session.show_grid,
            grid_size: session.snap.grid_size,
            selection: session.selection(),
            hovered: session.hovered(),
            marquee: session.marquee(),
        }
    }

    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    pub fn with_selection(mut self, selection: &'a [ElementId]) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_hovered(mut self, hovered: Option<ElementId>) -> Self {
        self.hovered = hovered;
        self
    }

    pub fn with_marquee(mut self, marquee: Option<Rect>) -> Self {
        self.marquee = marquee;
        self
    }
}

/// Build the base layer: display background, grid, element artwork in
/// ascending z-order, and the display border.
pub fn build_base_plan(ctx: &PlanContext, painters: &PainterSet) -> RenderPlan {
    let display = &ctx.document.display;
    let display_rect = screen_rect(ctx.viewport, display.bounds());
    let corner = display.corner_radius * ctx.viewport.zoom;

    let mut plan = RenderPlan::new();
    plan.push(DrawOp::Clear);
    plan.push(DrawOp::FillRect {
        rect: display_rect,
        radii: corner.into(),
        color: display.bg_color.to_color(),
    });

    // Everything inside the display clips to it, rounded corners included.
    plan.push(DrawOp::PushClip {
        rect: display_rect,
        radii: corner.into(),
    });

    if ctx.show_grid && ctx.grid_size > 0.0 {
        push_grid(&mut plan, ctx);
    }

    for element in &ctx.document.elements {
        if !element.visible {
            continue;
        }
        let Some(painter) = painters.get(&element.type_id) else {
            continue;
        };
        let mut artwork = RenderPlan::new();
        painter.paint(&element.props, &mut artwork);
        for op in artwork.into_ops() {
            plan.push(to_screen(op, ctx.viewport));
        }
    }

    plan.push(DrawOp::PopClip);
    plan.push(DrawOp::StrokeRect {
        rect: display_rect,
        radii: corner.into(),
        color: Color::from_rgba8(255, 255, 255, 38),
        width: 1.0,
        dash: None,
    });
    plan
}

/// Build the overlay layer: hover and selection outlines, resize handles
/// when exactly one element is selected, and the live marquee.
pub fn build_overlay_plan(ctx: &PlanContext) -> RenderPlan {
    let mut plan = RenderPlan::new();
    plan.push(DrawOp::Clear);

    // Hover highlight, unless the element is already selected.
    let hovered = ctx
        .hovered
        .filter(|id| !ctx.selection.contains(id))
        .and_then(|id| ctx.document.get(id))
        .filter(|element| element.visible);
    if let Some(element) = hovered {
        plan.push(DrawOp::StrokeRect {
            rect: screen_rect(ctx.viewport, element.bounds()),
            radii: 0.0.into(),
            color: Color::from_rgba8(255, 153, 0, 102),
            width: 1.0,
            dash: None,
        });
    }

    for &id in ctx.selection {
        let Some(element) = ctx.document.get(id) else {
            continue;
        };
        if !element.visible {
            continue;
        }
        let bounds = element.bounds();
        plan.push(DrawOp::StrokeRect {
            rect: screen_rect(ctx.viewport, bounds),
            radii: 0.0.into(),
            color: Color::from_rgba8(255, 153, 0, 255),
            width: 1.5,
            dash: Some([4.0, 3.0]),
        });
        if ctx.selection.len() == 1 {
            push_handles(&mut plan, ctx.viewport, bounds);
        }
    }

    if let Some(marquee) = ctx.marquee {
        let rect = screen_rect(ctx.viewport, marquee);
        plan.push(DrawOp::FillRect {
            rect,
            radii: 0.0.into(),
            color: Color::from_rgba8(255, 153, 0, 20),
        });
        plan.push(DrawOp::StrokeRect {
            rect,
            radii: 0.0.into(),
            color: Color::from_rgba8(255, 153, 0, 153),
            width: 1.0,
            dash: Some([4.0, 3.0]),
        });
    }
    plan
}

fn push_grid(plan: &mut RenderPlan, ctx: &PlanContext) {
    let display = &ctx.document.display;
    let color = Color::from_rgba8(255, 255, 255, 15);

    let mut gx = ctx.grid_size;
    while gx < display.width {
        plan.push(DrawOp::Line {
            from: ctx.viewport.display_to_screen(Point::new(gx, 0.0)),
            to: ctx.viewport.display_to_screen(Point::new(gx, display.height)),
            color,
            width: 0.5,
        });
        gx += ctx.grid_size;
    }
    let mut gy = ctx.grid_size;
    while gy < display.height {
        plan.push(DrawOp::Line {
            from: ctx.viewport.display_to_screen(Point::new(0.0, gy)),
            to: ctx.viewport.display_to_screen(Point::new(display.width, gy)),
            color,
            width: 0.5,
        });
        gy += ctx.grid_size;
    }
}

fn push_handles(plan: &mut RenderPlan, viewport: &Viewport, bounds: Rect) {
    for handle in HandleKind::ALL {
        let center = viewport.display_to_screen(handle.position(bounds));
        let rect = Rect::new(
            center.x - HANDLE_HALF,
            center.y - HANDLE_HALF,
            center.x + HANDLE_HALF,
            center.y + HANDLE_HALF,
        );
        plan.push(DrawOp::FillRect {
            rect,
            radii: 0.0.into(),
            color: Color::from_rgba8(255, 153, 0, 255),
        });
        plan.push(DrawOp::StrokeRect {
            rect,
            radii: 0.0.into(),
            color: Color::from_rgba8(0, 0, 0, 255),
            width: 1.0,
            dash: None,
        });
    }
}

/// Map a display-space rectangle into screen space.
fn screen_rect(viewport: &Viewport, rect: Rect) -> Rect {
    let p0 = viewport.display_to_screen(Point::new(rect.x0, rect.y0));
    let p1 = viewport.display_to_screen(Point::new(rect.x1, rect.y1));
    Rect::new(p0.x, p0.y, p1.x, p1.y)
}

fn scale_radii(radii: RoundedRectRadii, factor: f64) -> RoundedRectRadii {
    RoundedRectRadii::new(
        radii.top_left * factor,
        radii.top_right * factor,
        radii.bottom_right * factor,
        radii.bottom_left * factor,
    )
}

/// Map a painter op from display space into screen space. Widths, dashes,
/// radii, and font sizes scale with zoom since they are part of the
/// artwork.
fn to_screen(op: DrawOp, viewport: &Viewport) -> DrawOp {
    let zoom = viewport.zoom;
    match op {
        DrawOp::Clear => DrawOp::Clear,
        DrawOp::FillRect { rect, radii, color } => DrawOp::FillRect {
            rect: screen_rect(viewport, rect),
            radii: scale_radii(radii, zoom),
            color,
        },
        DrawOp::StrokeRect { rect, radii, color, width, dash } => DrawOp::StrokeRect {
            rect: screen_rect(viewport, rect),
            radii: scale_radii(radii, zoom),
            color,
            width: width * zoom,
            dash: dash.map(|[on, off]| [on * zoom, off * zoom]),
        },
        DrawOp::Line { from, to, color, width } => DrawOp::Line {
            from: viewport.display_to_screen(from),
            to: viewport.display_to_screen(to),
            color,
            width: width * zoom,
        },
        DrawOp::Text { anchor, content, color, size, align, weight } => DrawOp::Text {
            anchor: viewport.display_to_screen(anchor),
            content,
            color,
            size: size * zoom,
            align,
            weight,
        },
        DrawOp::PushClip { rect, radii } => DrawOp::PushClip {
            rect: screen_rect(viewport, rect),
            radii: scale_radii(radii, zoom),
        },
        DrawOp::PopClip => DrawOp::PopClip,
    }
}
