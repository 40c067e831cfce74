//! Canvas widget - the interactive node-graph editor surface.
//!
//! `canvas.rs` holds the per-frame widget state and the pointer
//! interaction state machine; `canvas_ui.rs` paints the scene and
//! wires pointer input to the graph store; `canvas_events.rs` defines
//! the events the canvas and its page shell emit.

mod canvas;
pub mod canvas_events;
mod canvas_ui;

pub use canvas::{CanvasConfig, CanvasState, ConnectGesture, Corner, Interaction};
pub use canvas_events::*;
pub use canvas_ui::render;
