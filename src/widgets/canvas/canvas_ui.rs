//! Canvas widget - scene painting and pointer wiring.
//!
//! Paint order is the z-invariant: grid dots, then connectors, then
//! structural node boxes, then annotation boxes, then handles, then
//! the empty-canvas placeholder. Connectors are purely derivative -
//! endpoints are recomputed from the store every frame, so they track
//! node moves and resizes for free. Arrows with a missing endpoint are
//! skipped.
//!
//! Input flow per frame: first the active drag/resize is advanced from
//! the previous frame's interaction state (and ended on release or
//! when the pointer leaves the canvas), then per-node hit areas handle
//! new presses and connect clicks.

use eframe::egui::{
    self, pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2,
};
use eframe::epaint::QuadraticBezierShape;

use super::canvas::{CanvasConfig, CanvasState, ConnectGesture, Corner, Interaction};
use super::canvas_events::{ArrowCreatedEvent, ConnectStartedEvent, EditorId};
use crate::entities::graph::GraphState;
use crate::entities::kinds::NodeKind;
use crate::widgets::actions::ActionQueue;

pub type CanvasActions = ActionQueue;

const GRID_DOT_SPACING: f32 = 20.0;
const NODE_ROUNDING: f32 = 8.0;
const CONNECTOR_STROKE: Stroke = Stroke {
    width: 2.0,
    color: Color32::from_rgba_premultiplied(77, 77, 77, 77),
};
const ARROWHEAD_LEN: f32 = 10.0;
const ARROWHEAD_HALF_WIDTH: f32 = 3.5;
const HANDLE_RADIUS: f32 = 5.0;
const HANDLE_HIT: f32 = 14.0;

/// Render one canvas editor into the remaining space of `ui`.
pub fn render<K: NodeKind>(
    ui: &mut Ui,
    editor: EditorId,
    graph: &mut GraphState<K>,
    state: &mut CanvasState,
    config: &CanvasConfig,
) -> CanvasActions {
    let mut actions = CanvasActions::default();

    let (canvas_rect, _bg_response) =
        ui.allocate_exact_size(ui.available_size(), Sense::click());
    let origin = canvas_rect.min;
    let to_screen = |p: Pos2| origin + p.to_vec2();

    let pointer = ui.ctx().input(|i| i.pointer.latest_pos());
    actions.hovered = pointer.map(|p| canvas_rect.contains(p)).unwrap_or(false);

    // Advance the interaction carried over from the previous frame
    // before painting, so the scene reflects this frame's pointer.
    apply_active_interaction(ui, graph, state, canvas_rect, pointer);

    let painter = ui.painter_at(canvas_rect);

    if config.show_grid_dots {
        paint_grid_dots(&painter, canvas_rect);
    }

    // Connectors render behind all node boxes. Dangling endpoints are
    // skipped, never an error.
    for arrow in graph.arrows() {
        let (Some(from), Some(to)) = (graph.node_center(arrow.from), graph.node_center(arrow.to))
        else {
            continue;
        };
        paint_connector(&painter, to_screen(from), to_screen(to));
    }

    // Structural nodes first, annotations above them.
    let mut order: Vec<usize> = (0..graph.nodes().len()).collect();
    order.sort_by_key(|&idx| graph.nodes()[idx].kind.is_annotation());

    for idx in order {
        let node = &graph.nodes()[idx];
        let (id, kind, label) = (node.id, node.kind, node.label.clone());
        let rect = Rect::from_min_size(to_screen(node.pos), node.size);

        let body = ui.interact(rect, ui.id().with(("node", id)), Sense::click_and_drag());
        let shift = ui.input(|i| i.modifiers.shift);

        paint_node_box(ui, &painter, rect, kind, state.dragging() == Some(id));
        if graph.pending_connection() == Some(id) {
            painter.rect_stroke(
                rect.expand(3.0),
                NODE_ROUNDING + 2.0,
                Stroke::new(2.0, Color32::WHITE),
                StrokeKind::Outside,
            );
        }

        if kind.is_annotation() {
            annotation_editor(ui, rect, id, &label, graph);
        } else {
            paint_node_text(ui, &painter, rect, kind, &label);
        }

        // Press starts a drag unless this variant connects via
        // Shift+click and Shift is down.
        if body.drag_started() && state.is_idle() {
            let connecting = config.connect == ConnectGesture::ShiftClick && shift;
            if !connecting {
                if let Some(p) = body.interact_pointer_pos() {
                    state.begin_drag(id, p - rect.min);
                }
            }
        }

        if config.connect == ConnectGesture::ShiftClick && body.clicked() && shift {
            connect_click(graph, id, editor, &mut actions);
        }

        if config.resize_handles {
            resize_handles(ui, &painter, rect, id, state);
        }

        if config.connect == ConnectGesture::Handle {
            connect_handle(ui, &painter, rect, id, editor, graph, &mut actions);
        }
    }

    if graph.is_empty() {
        paint_placeholder(ui, &painter, canvas_rect, config);
    }

    actions
}

fn apply_active_interaction<K: NodeKind>(
    ui: &Ui,
    graph: &mut GraphState<K>,
    state: &mut CanvasState,
    canvas_rect: Rect,
    pointer: Option<Pos2>,
) {
    match state.interaction {
        Interaction::Idle => {}
        Interaction::DragNode { id, grab } => {
            if let Some(p) = pointer {
                graph.set_node_pos(id, ((p - canvas_rect.min) - grab).to_pos2());
            }
        }
        Interaction::ResizeNode { id, edges, last } => {
            if let Some(p) = pointer {
                graph.resize_node(id, edges, p - last);
                state.advance_resize(p);
            }
        }
    }

    // Pointer-up anywhere, or leaving the canvas, ends the gesture.
    let released = ui.ctx().input(|i| i.pointer.any_released());
    let left_canvas = pointer.map(|p| !canvas_rect.contains(p)).unwrap_or(false);
    if !state.is_idle() && (released || left_canvas) {
        state.end();
    }
}

fn connect_click<K: NodeKind>(
    graph: &mut GraphState<K>,
    id: uuid::Uuid,
    editor: EditorId,
    actions: &mut CanvasActions,
) {
    let was_pending = graph.pending_connection();
    if let Some(_arrow) = graph.connect_click(id) {
        if let Some(from) = was_pending {
            actions.send(ArrowCreatedEvent { editor, from, to: id });
        }
    } else if was_pending.is_none() && graph.pending_connection() == Some(id) {
        actions.send(ConnectStartedEvent { editor, node: id });
    }
}

fn paint_grid_dots(painter: &egui::Painter, rect: Rect) {
    let dot = Color32::from_gray(51);
    let mut x = rect.min.x;
    while x < rect.max.x {
        let mut y = rect.min.y;
        while y < rect.max.y {
            painter.circle_filled(pos2(x, y), 1.0, dot);
            y += GRID_DOT_SPACING;
        }
        x += GRID_DOT_SPACING;
    }
}

/// Two chained quadratic segments through the midpoint, with a filled
/// arrowhead at the destination.
fn paint_connector(painter: &egui::Painter, from: Pos2, to: Pos2) {
    let mid = pos2((from.x + to.x) * 0.5, (from.y + to.y) * 0.5);
    let c1 = pos2(mid.x, from.y);
    let c2 = pos2(mid.x, to.y);

    painter.add(QuadraticBezierShape::from_points_stroke(
        [from, c1, mid],
        false,
        Color32::TRANSPARENT,
        CONNECTOR_STROKE,
    ));
    painter.add(QuadraticBezierShape::from_points_stroke(
        [mid, c2, to],
        false,
        Color32::TRANSPARENT,
        CONNECTOR_STROKE,
    ));

    // Arrowhead along the incoming tangent; degenerate (self-loop)
    // curves fall back to a horizontal head
    let dir = to - c2;
    let dir = if dir.length() < 1.0 {
        vec2(1.0, 0.0)
    } else {
        dir.normalized()
    };
    let back = to - dir * ARROWHEAD_LEN;
    let perp = dir.rot90() * ARROWHEAD_HALF_WIDTH;
    painter.add(egui::Shape::convex_polygon(
        vec![to, back + perp, back - perp],
        CONNECTOR_STROKE.color,
        Stroke::NONE,
    ));
}

fn paint_node_box<K: NodeKind>(
    ui: &Ui,
    painter: &egui::Painter,
    rect: Rect,
    kind: K,
    dragged: bool,
) {
    let mut fill = kind.fill();
    let mut stroke_color = kind.stroke();
    if dragged {
        fill = fill.gamma_multiply(0.5);
        stroke_color = stroke_color.gamma_multiply(0.5);
    }
    painter.rect_filled(rect, NODE_ROUNDING, ui.visuals().extreme_bg_color);
    painter.rect_filled(rect, NODE_ROUNDING, fill);
    painter.rect_stroke(
        rect,
        NODE_ROUNDING,
        Stroke::new(2.0, stroke_color),
        StrokeKind::Inside,
    );
}

fn paint_node_text<K: NodeKind>(
    ui: &Ui,
    painter: &egui::Painter,
    rect: Rect,
    kind: K,
    label: &str,
) {
    painter.text(
        rect.min + vec2(12.0, 8.0),
        Align2::LEFT_TOP,
        kind.title().to_uppercase(),
        FontId::proportional(10.0),
        ui.visuals().weak_text_color(),
    );

    let color = ui.visuals().strong_text_color();
    let galley = painter.layout(
        label.to_string(),
        FontId::proportional(13.0),
        color,
        (rect.width() - 24.0).max(8.0),
    );
    painter.galley(rect.min + vec2(12.0, 24.0), galley, color);
}

/// Inline multiline editor for annotation nodes. The box border stays
/// draggable; the editor fills the inner area. The palette placeholder
/// label is shown as a hint, not as content.
fn annotation_editor<K: NodeKind>(
    ui: &mut Ui,
    rect: Rect,
    id: uuid::Uuid,
    label: &str,
    graph: &mut GraphState<K>,
) {
    let mut text = if label == "Text Block" {
        String::new()
    } else {
        label.to_string()
    };

    let response = ui.put(
        rect.shrink(8.0),
        egui::TextEdit::multiline(&mut text)
            .id_salt(("annotation", id))
            .frame(false)
            .hint_text("Enter your text...")
            .font(FontId::proportional(12.0)),
    );
    if response.changed() {
        graph.set_node_label(id, &text);
    }
}

fn resize_handles(
    ui: &mut Ui,
    painter: &egui::Painter,
    rect: Rect,
    id: uuid::Uuid,
    state: &mut CanvasState,
) {
    for corner in Corner::ALL {
        let center = match corner {
            Corner::Nw => rect.left_top(),
            Corner::Ne => rect.right_top(),
            Corner::Sw => rect.left_bottom(),
            Corner::Se => rect.right_bottom(),
        };
        let hit = Rect::from_center_size(center, Vec2::splat(HANDLE_HIT));
        let response = ui.interact(hit, ui.id().with(("resize", id, corner as u8)), Sense::drag());

        if response.drag_started() && state.is_idle() {
            if let Some(p) = response.interact_pointer_pos() {
                state.begin_resize(id, corner, p);
            }
        }

        let color = if response.hovered() {
            Color32::WHITE
        } else {
            Color32::from_gray(200)
        };
        painter.circle_filled(center, HANDLE_RADIUS, color);
    }
}

fn connect_handle<K: NodeKind>(
    ui: &mut Ui,
    painter: &egui::Painter,
    rect: Rect,
    id: uuid::Uuid,
    editor: EditorId,
    graph: &mut GraphState<K>,
    actions: &mut CanvasActions,
) {
    let center = rect.right_center();
    let hit = Rect::from_center_size(center, Vec2::splat(HANDLE_HIT + 2.0));
    let response = ui.interact(hit, ui.id().with(("connect", id)), Sense::click());

    if response.clicked() {
        connect_click(graph, id, editor, actions);
    }

    let pending = graph.pending_connection() == Some(id);
    let (radius, fill, stroke) = if pending {
        (9.0, Color32::from_rgb(250, 204, 21), Color32::from_rgb(234, 179, 8))
    } else if response.hovered() {
        (7.0, ui.visuals().widgets.hovered.bg_fill, Color32::from_gray(160))
    } else {
        (7.0, ui.visuals().extreme_bg_color, Color32::from_gray(120))
    };
    painter.circle_filled(center, radius, fill);
    painter.circle_stroke(center, radius, Stroke::new(2.0, stroke));
}

fn paint_placeholder(
    ui: &Ui,
    painter: &egui::Painter,
    rect: Rect,
    config: &CanvasConfig,
) {
    let center = rect.center();
    painter.text(
        center - vec2(0.0, 14.0),
        Align2::CENTER_CENTER,
        config.placeholder_title,
        FontId::proportional(18.0),
        ui.visuals().strong_text_color(),
    );
    painter.text(
        center + vec2(0.0, 14.0),
        Align2::CENTER_CENTER,
        config.placeholder_body,
        FontId::proportional(13.0),
        ui.visuals().weak_text_color(),
    );
}
