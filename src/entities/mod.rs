//! Domain data model - graph store and the per-editor node kinds.

pub mod graph;
pub mod kinds;

pub use graph::{AnchorMode, Arrow, GraphConfig, GraphState, Node, ResizeEdges};
pub use kinds::{BuilderKind, JourneyKind, NodeKind, PaletteGroup};
