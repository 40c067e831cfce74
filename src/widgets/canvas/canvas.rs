//! Canvas widget - state and configuration.
//!
//! The pointer interaction state machine lives here: exactly one of
//! drag, resize or nothing is active at a time, so the canvas never
//! has two writers fighting over a node. Connect mode is not part of
//! this enum - the pending source is store state (it survives across
//! unrelated drags) and only the *gesture* that feeds it is decided
//! here.
//!
//! Precedence rule for the shared hit area (resolved deliberately, the
//! source pages disagreed): a press on the node body starts a drag
//! unless Shift is held; Shift+click connects. The journey variant's
//! connect handle is its own hit area and never starts a body drag.

use eframe::egui::{Pos2, Vec2};
use uuid::Uuid;

use crate::entities::graph::ResizeEdges;

/// How the user enters connect mode in this editor variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectGesture {
    /// Shift+click on a node body (Workflow Builder).
    ShiftClick,
    /// Click on the dedicated dot at the node's east edge (Journey
    /// Builder).
    Handle,
}

/// Configuration for one canvas instance
#[derive(Clone, Debug)]
pub struct CanvasConfig {
    pub connect: ConnectGesture,
    /// Show corner resize handles (resizable variant only).
    pub resize_handles: bool,
    /// Draw the background dot grid.
    pub show_grid_dots: bool,
    pub placeholder_title: &'static str,
    pub placeholder_body: &'static str,
}

impl CanvasConfig {
    pub fn workflow() -> Self {
        Self {
            connect: ConnectGesture::ShiftClick,
            resize_handles: true,
            show_grid_dots: true,
            placeholder_title: "Design your AI workflow",
            placeholder_body: "Add components from the sidebar and arrange them to visualize your desired AI system",
        }
    }

    pub fn journey() -> Self {
        Self {
            connect: ConnectGesture::Handle,
            resize_handles: false,
            show_grid_dots: true,
            placeholder_title: "Pre-loaded workflow ready",
            placeholder_body: "Add more blocks from the sidebar or click Run Workflow",
        }
    }
}

/// Corner handle being dragged during a resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se];

    pub fn edges(self) -> ResizeEdges {
        match self {
            Corner::Nw => ResizeEdges::NW,
            Corner::Ne => ResizeEdges::NE,
            Corner::Sw => ResizeEdges::SW,
            Corner::Se => ResizeEdges::SE,
        }
    }
}

/// Active pointer interaction - at most one at a time by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    Idle,
    /// Body drag. `grab` is the offset between pointer and node origin
    /// captured at press time, so the node does not jump under the
    /// pointer.
    DragNode { id: Uuid, grab: Vec2 },
    /// Corner resize. `last` is the pointer position of the previous
    /// move; deltas are applied incrementally to avoid drift.
    ResizeNode {
        id: Uuid,
        edges: ResizeEdges,
        last: Pos2,
    },
}

/// Canvas state (persistent between frames)
#[derive(Debug)]
pub struct CanvasState {
    pub interaction: Interaction,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            interaction: Interaction::Idle,
        }
    }
}

impl CanvasState {
    pub fn is_idle(&self) -> bool {
        matches!(self.interaction, Interaction::Idle)
    }

    /// Node currently being dragged, if any (for the translucent
    /// in-flight styling).
    pub fn dragging(&self) -> Option<Uuid> {
        match self.interaction {
            Interaction::DragNode { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Enter the drag state. Ignored unless idle - a resize or another
    /// drag already owns the pointer.
    pub fn begin_drag(&mut self, id: Uuid, grab: Vec2) {
        if self.is_idle() {
            self.interaction = Interaction::DragNode { id, grab };
        }
    }

    /// Enter the resize state. Ignored unless idle.
    pub fn begin_resize(&mut self, id: Uuid, corner: Corner, pointer: Pos2) {
        if self.is_idle() {
            self.interaction = Interaction::ResizeNode {
                id,
                edges: corner.edges(),
                last: pointer,
            };
        }
    }

    /// Advance the resize reference point after applying a delta.
    pub fn advance_resize(&mut self, pointer: Pos2) {
        if let Interaction::ResizeNode { last, .. } = &mut self.interaction {
            *last = pointer;
        }
    }

    /// Pointer released or left the canvas: back to idle,
    /// unconditionally.
    pub fn end(&mut self) {
        self.interaction = Interaction::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    #[test]
    fn test_begin_drag_from_idle() {
        let mut state = CanvasState::default();
        let id = Uuid::new_v4();

        state.begin_drag(id, vec2(5.0, 7.0));
        assert_eq!(state.dragging(), Some(id));
        assert_eq!(
            state.interaction,
            Interaction::DragNode { id, grab: vec2(5.0, 7.0) }
        );
    }

    #[test]
    fn test_drag_excludes_resize() {
        let mut state = CanvasState::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        state.begin_drag(a, vec2(0.0, 0.0));
        state.begin_resize(b, Corner::Se, pos2(10.0, 10.0));

        // The drag keeps ownership of the pointer
        assert_eq!(state.dragging(), Some(a));
    }

    #[test]
    fn test_resize_excludes_drag() {
        let mut state = CanvasState::default();
        let a = Uuid::new_v4();

        state.begin_resize(a, Corner::Nw, pos2(10.0, 10.0));
        state.begin_drag(a, vec2(0.0, 0.0));

        assert!(matches!(
            state.interaction,
            Interaction::ResizeNode { edges, .. } if edges == ResizeEdges::NW
        ));
    }

    #[test]
    fn test_advance_resize_updates_reference() {
        let mut state = CanvasState::default();
        let a = Uuid::new_v4();

        state.begin_resize(a, Corner::Se, pos2(10.0, 10.0));
        state.advance_resize(pos2(24.0, 18.0));

        assert!(matches!(
            state.interaction,
            Interaction::ResizeNode { last, .. } if last == pos2(24.0, 18.0)
        ));
    }

    #[test]
    fn test_end_is_unconditional() {
        let mut state = CanvasState::default();
        state.begin_drag(Uuid::new_v4(), vec2(0.0, 0.0));
        state.end();
        assert!(state.is_idle());

        state.begin_resize(Uuid::new_v4(), Corner::Ne, pos2(0.0, 0.0));
        state.end();
        assert!(state.is_idle());
        state.end();
        assert!(state.is_idle());
    }

    #[test]
    fn test_corner_edge_mapping() {
        assert_eq!(Corner::Nw.edges(), ResizeEdges::NW);
        assert_eq!(Corner::Se.edges(), ResizeEdges::SE);
        assert!(Corner::Ne.edges().north && Corner::Ne.edges().east);
        assert!(Corner::Sw.edges().south && Corner::Sw.edges().west);
    }
}
