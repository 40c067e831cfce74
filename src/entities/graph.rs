//! Graph state store - the authoritative node/arrow collections for one
//! canvas editor instance.
//!
//! The store owns all mutations; widgets call the operations below and
//! render from the accessors. Missing ids are defensive no-ops, every
//! operation is total, and lookups are linear scans (the canvas is
//! designed for tens of nodes).
//!
//! Connection-in-progress ("connect mode") also lives here: at most one
//! node can be marked as the pending arrow source, and `clear()` resets
//! it together with both collections.

use eframe::egui::{pos2, Pos2, Vec2};
use rand::Rng;
use uuid::Uuid;

use super::kinds::NodeKind;

/// A positioned, labeled vertex of the canvas graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<K> {
    pub id: Uuid,
    pub kind: K,
    pub label: String,
    pub pos: Pos2,
    pub size: Vec2,
}

/// Directed edge between two node ids, drawn as a curved connector.
/// Endpoints are resolved at render time; a dangling endpoint means the
/// arrow is skipped, never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arrow {
    pub id: Uuid,
    pub from: Uuid,
    pub to: Uuid,
}

/// Where connectors attach to a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnchorMode {
    /// Geometric center of the node box (resizable variant).
    Center,
    /// Fixed offset from the node origin (fixed-size card variant).
    Offset(Vec2),
}

/// Edges affected by a resize gesture. Corner handles set two of them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeEdges {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl ResizeEdges {
    pub const NW: Self = Self { north: true, west: true, south: false, east: false };
    pub const NE: Self = Self { north: true, east: true, south: false, west: false };
    pub const SW: Self = Self { south: true, west: true, north: false, east: false };
    pub const SE: Self = Self { south: true, east: true, north: false, west: false };
}

/// Per-variant store configuration.
#[derive(Clone, Debug)]
pub struct GraphConfig {
    /// Grid unit for snapping, None disables snapping.
    pub grid: Option<f32>,
    /// Size floor for resize clamping.
    pub min_size: Vec2,
    /// Size assigned to nodes added from the palette.
    pub default_size: Vec2,
    /// Connector attachment rule.
    pub anchor: AnchorMode,
    /// Whether `resize_node` is available in this variant.
    pub resizable: bool,
}

/// One editor's nodes, arrows and pending-connection marker.
pub struct GraphState<K> {
    config: GraphConfig,
    nodes: Vec<Node<K>>,
    arrows: Vec<Arrow>,
    connect_from: Option<Uuid>,
}

impl<K: NodeKind> GraphState<K> {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            arrows: Vec::new(),
            connect_from: None,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Enable or disable grid snapping at runtime (preferences toggle).
    /// Already-placed nodes keep their positions until next moved.
    pub fn set_grid(&mut self, grid: Option<f32>) {
        self.config.grid = grid;
    }

    pub fn nodes(&self) -> &[Node<K>] {
        &self.nodes
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: Uuid) -> Option<&Node<K>> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: Uuid) -> Option<&mut Node<K>> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// First node of the given kind, in insertion order. Used by the
    /// Run action to pick the journey's trigger.
    pub fn first_of_kind(&self, kind: K) -> Option<&Node<K>> {
        self.nodes.iter().find(|n| n.kind == kind)
    }

    /// Round a coordinate to the nearest grid multiple (identity when
    /// the grid is disabled).
    pub fn snap(&self, v: f32) -> f32 {
        match self.config.grid {
            Some(grid) => (v / grid).round() * grid,
            None => v,
        }
    }

    fn snap_pos(&self, p: Pos2) -> Pos2 {
        pos2(self.snap(p.x), self.snap(p.y))
    }

    /// Add a node at a pseudo-random position inside the demo canvas
    /// area, with the variant's default size. Infallible.
    pub fn add_node(&mut self, kind: K, label: impl Into<String>) -> Uuid {
        let mut rng = rand::rng();
        let pos = self.snap_pos(pos2(
            rng.random_range(100.0..500.0),
            rng.random_range(100.0..400.0),
        ));
        self.insert_node(kind, label, pos, self.config.default_size)
    }

    /// Add a node at an explicit position/size. Used by the seeded demo
    /// graphs; positions are expected to be grid-aligned already.
    pub fn seed_node(&mut self, kind: K, label: impl Into<String>, pos: Pos2, size: Vec2) -> Uuid {
        self.insert_node(kind, label, pos, size)
    }

    fn insert_node(&mut self, kind: K, label: impl Into<String>, pos: Pos2, size: Vec2) -> Uuid {
        let id = Uuid::new_v4();
        self.nodes.push(Node {
            id,
            kind,
            label: label.into(),
            pos,
            size,
        });
        id
    }

    /// Move a node, snapping both coordinates when the grid is on.
    /// Non-finite input and unknown ids are ignored.
    pub fn set_node_pos(&mut self, id: Uuid, pos: Pos2) {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return;
        }
        let snapped = self.snap_pos(pos);
        if let Some(node) = self.node_mut(id) {
            node.pos = snapped;
        }
    }

    /// Apply an incremental resize delta to the given edges.
    ///
    /// East/south grow width/height; west/north shrink them and shift
    /// the position by the size change actually realized after snapping
    /// and clamping, so the opposite corner stays pinned even at the
    /// minimum-size floor.
    pub fn resize_node(&mut self, id: Uuid, edges: ResizeEdges, delta: Vec2) {
        if !self.config.resizable {
            return;
        }
        if !delta.x.is_finite() || !delta.y.is_finite() {
            return;
        }
        let grid = self.config.grid;
        let min = self.config.min_size;
        let snap = |v: f32| match grid {
            Some(g) => (v / g).round() * g,
            None => v,
        };

        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return;
        };

        let old = node.size;
        let mut size = old;
        if edges.east {
            size.x = snap(old.x + delta.x);
        }
        if edges.west {
            size.x = snap(old.x - delta.x);
        }
        if edges.south {
            size.y = snap(old.y + delta.y);
        }
        if edges.north {
            size.y = snap(old.y - delta.y);
        }
        size.x = size.x.max(min.x);
        size.y = size.y.max(min.y);

        if edges.west {
            node.pos.x += old.x - size.x;
        }
        if edges.north {
            node.pos.y += old.y - size.y;
        }
        node.size = size;
    }

    /// Replace the label of an annotation ("text") node. Structural
    /// node labels are fixed at creation from their palette template.
    pub fn set_node_label(&mut self, id: Uuid, text: &str) {
        if let Some(node) = self.node_mut(id) {
            if node.kind.is_annotation() {
                node.label = text.to_string();
            }
        }
    }

    /// Append a directed arrow. Parallel arrows between the same pair
    /// are allowed; endpoints are not validated here.
    pub fn add_arrow(&mut self, from: Uuid, to: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.arrows.push(Arrow { id, from, to });
        id
    }

    /// Mark a node as the pending source of a new arrow.
    pub fn begin_connect(&mut self, id: Uuid) {
        if self.node(id).is_some() {
            self.connect_from = Some(id);
        }
    }

    /// Connect-mode click on a node: the first click marks the source,
    /// a click on a distinct node completes the arrow and clears the
    /// marker, a re-click on the source keeps the marker untouched.
    /// Returns the new arrow id when one was created.
    pub fn connect_click(&mut self, id: Uuid) -> Option<Uuid> {
        match self.connect_from {
            None => {
                self.begin_connect(id);
                None
            }
            Some(from) if from != id => {
                self.connect_from = None;
                Some(self.add_arrow(from, id))
            }
            Some(_) => None,
        }
    }

    pub fn pending_connection(&self) -> Option<Uuid> {
        self.connect_from
    }

    /// Drop the pending-connection marker without creating anything.
    pub fn cancel_connect(&mut self) {
        self.connect_from = None;
    }

    /// Empty both collections and the pending marker. Idempotent.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.arrows.clear();
        self.connect_from = None;
    }

    /// Connector attachment point for the node, per the variant's
    /// anchor rule. Recomputed on every call so connectors track moves
    /// and resizes.
    pub fn node_center(&self, id: Uuid) -> Option<Pos2> {
        let node = self.node(id)?;
        Some(match self.config.anchor {
            AnchorMode::Center => node.pos + node.size * 0.5,
            AnchorMode::Offset(off) => node.pos + off,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::kinds::{journey_config, workflow_config, BuilderKind, JourneyKind};
    use eframe::egui::vec2;

    fn workflow() -> GraphState<BuilderKind> {
        GraphState::new(workflow_config())
    }

    #[test]
    fn test_add_node_ids_pairwise_distinct() {
        let mut g = workflow();
        let mut ids = Vec::new();
        for _ in 0..50 {
            ids.push(g.add_node(BuilderKind::Backend, "Server API"));
        }
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(g.nodes().len(), 50);
    }

    #[test]
    fn test_add_node_spawns_in_bounds_and_snapped() {
        let mut g = workflow();
        for _ in 0..20 {
            let id = g.add_node(BuilderKind::Ai, "LLM");
            let node = g.node(id).unwrap();
            // Snapping can round the 100..500 x 100..400 spawn window
            // outward by at most half a grid unit
            assert!(node.pos.x >= 90.0 && node.pos.x <= 510.0);
            assert!(node.pos.y >= 90.0 && node.pos.y <= 410.0);
            assert_eq!(node.pos.x % 20.0, 0.0);
            assert_eq!(node.pos.y % 20.0, 0.0);
            assert_eq!(node.size, vec2(140.0, 80.0));
        }
    }

    #[test]
    fn test_add_and_clear_lifecycle() {
        let mut g = workflow();
        assert!(g.is_empty());

        let id = g.add_node(BuilderKind::Backend, "Server API");
        assert_eq!(g.nodes().len(), 1);
        assert!(g.node(id).is_some());

        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.nodes().len(), 0);
    }

    #[test]
    fn test_set_node_pos_snaps_to_grid() {
        let mut g = workflow();
        let id = g.seed_node(BuilderKind::Frontend, "Chat", pos2(100.0, 100.0), vec2(140.0, 80.0));

        g.set_node_pos(id, pos2(113.0, 147.0));
        let node = g.node(id).unwrap();
        assert_eq!(node.pos, pos2(120.0, 140.0));
    }

    #[test]
    fn test_set_node_pos_unsnapped_without_grid() {
        let mut g: GraphState<JourneyKind> = GraphState::new(journey_config());
        let id = g.add_node(JourneyKind::Action, "Workshop");

        g.set_node_pos(id, pos2(113.5, 147.25));
        assert_eq!(g.node(id).unwrap().pos, pos2(113.5, 147.25));
    }

    #[test]
    fn test_set_node_pos_missing_id_is_noop() {
        let mut g = workflow();
        g.seed_node(BuilderKind::Backend, "Cache", pos2(40.0, 40.0), vec2(140.0, 80.0));

        g.set_node_pos(Uuid::new_v4(), pos2(500.0, 500.0));
        assert_eq!(g.nodes()[0].pos, pos2(40.0, 40.0));
    }

    #[test]
    fn test_set_node_pos_rejects_non_finite() {
        let mut g = workflow();
        let id = g.seed_node(BuilderKind::Backend, "Cache", pos2(40.0, 40.0), vec2(140.0, 80.0));

        g.set_node_pos(id, pos2(f32::NAN, 60.0));
        g.set_node_pos(id, pos2(60.0, f32::INFINITY));
        assert_eq!(g.node(id).unwrap().pos, pos2(40.0, 40.0));
    }

    #[test]
    fn test_resize_southeast_keeps_position() {
        let mut g = workflow();
        let id = g.seed_node(BuilderKind::Backend, "Database", pos2(100.0, 100.0), vec2(140.0, 80.0));

        g.resize_node(id, ResizeEdges::SE, vec2(40.0, 20.0));
        let node = g.node(id).unwrap();
        assert_eq!(node.pos, pos2(100.0, 100.0));
        assert_eq!(node.size, vec2(180.0, 100.0));
    }

    #[test]
    fn test_resize_northwest_pins_southeast_corner() {
        // (100,100) 140x80, NW resize by (-20,-20) with snapping to
        // 20 -> size (160,100), pos (80,80), SE corner fixed at
        // (240,180).
        let mut g = workflow();
        let id = g.seed_node(BuilderKind::Frontend, "Web / Mobile App", pos2(100.0, 100.0), vec2(140.0, 80.0));

        g.resize_node(id, ResizeEdges::NW, vec2(-20.0, -20.0));
        let node = g.node(id).unwrap();
        assert_eq!(node.size, vec2(160.0, 100.0));
        assert_eq!(node.pos, pos2(80.0, 80.0));
        assert_eq!(node.pos + node.size, pos2(240.0, 180.0));
    }

    #[test]
    fn test_resize_floor_invariant() {
        let mut g = workflow();
        let id = g.seed_node(BuilderKind::Ai, "RAG", pos2(200.0, 200.0), vec2(120.0, 80.0));

        for _ in 0..10 {
            g.resize_node(id, ResizeEdges::SE, vec2(-60.0, -60.0));
            let node = g.node(id).unwrap();
            assert!(node.size.x >= 100.0);
            assert!(node.size.y >= 60.0);
        }
        assert_eq!(g.node(id).unwrap().size, vec2(100.0, 60.0));
    }

    #[test]
    fn test_resize_clamped_west_keeps_east_edge() {
        let mut g = workflow();
        let id = g.seed_node(BuilderKind::Backend, "Cache", pos2(100.0, 100.0), vec2(100.0, 60.0));

        // Already at the floor: shrinking from the west must not move
        // the node, so the east edge stays at x=200
        g.resize_node(id, ResizeEdges::NW, vec2(40.0, 40.0));
        let node = g.node(id).unwrap();
        assert_eq!(node.size, vec2(100.0, 60.0));
        assert_eq!(node.pos, pos2(100.0, 100.0));
    }

    #[test]
    fn test_resize_incremental_deltas_accumulate() {
        let mut g = workflow();
        let id = g.seed_node(BuilderKind::Backend, "Database", pos2(100.0, 100.0), vec2(140.0, 80.0));

        g.resize_node(id, ResizeEdges::SE, vec2(20.0, 0.0));
        g.resize_node(id, ResizeEdges::SE, vec2(20.0, 20.0));
        assert_eq!(g.node(id).unwrap().size, vec2(180.0, 100.0));
    }

    #[test]
    fn test_resize_noop_in_fixed_size_variant() {
        let mut g: GraphState<JourneyKind> = GraphState::new(journey_config());
        let id = g.add_node(JourneyKind::Outcome, "Success!");
        let before = g.node(id).unwrap().size;

        g.resize_node(id, ResizeEdges::SE, vec2(40.0, 40.0));
        assert_eq!(g.node(id).unwrap().size, before);
    }

    #[test]
    fn test_label_edit_applies_to_annotation_only() {
        let mut g = workflow();
        let text = g.add_node(BuilderKind::Text, "Text Block");
        let api = g.add_node(BuilderKind::Backend, "Server API");

        g.set_node_label(text, "latency budget: 200ms");
        g.set_node_label(api, "renamed");

        assert_eq!(g.node(text).unwrap().label, "latency budget: 200ms");
        assert_eq!(g.node(api).unwrap().label, "Server API");
    }

    #[test]
    fn test_add_arrow_allows_parallel_edges() {
        let mut g = workflow();
        let a = g.add_node(BuilderKind::Frontend, "User");
        let b = g.add_node(BuilderKind::Backend, "Server API");

        let first = g.add_arrow(a, b);
        let second = g.add_arrow(a, b);
        assert_ne!(first, second);
        assert_eq!(g.arrows().len(), 2);
    }

    #[test]
    fn test_connect_flow_creates_single_arrow() {
        let mut g = workflow();
        let a = g.add_node(BuilderKind::Frontend, "User");
        let b = g.add_node(BuilderKind::Backend, "Server API");

        assert!(g.connect_click(a).is_none());
        assert_eq!(g.pending_connection(), Some(a));

        let arrow = g.connect_click(b);
        assert!(arrow.is_some());
        assert_eq!(g.arrows().len(), 1);
        assert_eq!(g.arrows()[0].from, a);
        assert_eq!(g.arrows()[0].to, b);
        assert_eq!(g.pending_connection(), None);
    }

    #[test]
    fn test_connect_reclick_on_source_keeps_pending() {
        let mut g = workflow();
        let a = g.add_node(BuilderKind::Ai, "Agent");

        g.connect_click(a);
        assert!(g.connect_click(a).is_none());
        assert_eq!(g.pending_connection(), Some(a));
        assert!(g.arrows().is_empty());
    }

    #[test]
    fn test_cancel_connect_creates_nothing() {
        let mut g = workflow();
        let a = g.add_node(BuilderKind::Ai, "Agent");

        g.begin_connect(a);
        g.cancel_connect();
        assert_eq!(g.pending_connection(), None);
        assert!(g.arrows().is_empty());
    }

    #[test]
    fn test_begin_connect_requires_live_node() {
        let mut g = workflow();
        g.begin_connect(Uuid::new_v4());
        assert_eq!(g.pending_connection(), None);
    }

    #[test]
    fn test_clear_is_idempotent_and_resets_pending() {
        let mut g = workflow();
        let a = g.add_node(BuilderKind::Frontend, "User");
        let b = g.add_node(BuilderKind::Backend, "Server API");
        g.add_arrow(a, b);
        g.begin_connect(b);

        g.clear();
        g.clear();
        assert!(g.is_empty());
        assert!(g.arrows().is_empty());
        assert_eq!(g.pending_connection(), None);
    }

    #[test]
    fn test_node_center_tracks_moves_and_resizes() {
        let mut g = workflow();
        let id = g.seed_node(BuilderKind::Backend, "Database", pos2(100.0, 100.0), vec2(140.0, 80.0));
        assert_eq!(g.node_center(id), Some(pos2(170.0, 140.0)));

        g.set_node_pos(id, pos2(200.0, 200.0));
        assert_eq!(g.node_center(id), Some(pos2(270.0, 240.0)));

        g.resize_node(id, ResizeEdges::SE, vec2(20.0, 20.0));
        assert_eq!(g.node_center(id), Some(pos2(280.0, 250.0)));
    }

    #[test]
    fn test_node_center_fixed_offset_anchor() {
        let mut g: GraphState<JourneyKind> = GraphState::new(journey_config());
        let id = g.add_node(JourneyKind::Trigger, "I have a clear AI goal in mind");
        g.set_node_pos(id, pos2(100.0, 200.0));

        assert_eq!(g.node_center(id), Some(pos2(190.0, 260.0)));
    }

    #[test]
    fn test_node_center_missing_id_is_none() {
        let g = workflow();
        assert_eq!(g.node_center(Uuid::new_v4()), None);
    }

    #[test]
    fn test_first_of_kind_insertion_order() {
        let mut g: GraphState<JourneyKind> = GraphState::new(journey_config());
        g.add_node(JourneyKind::Action, "Workshop");
        let t1 = g.add_node(JourneyKind::Trigger, "I have a clear AI goal in mind");
        g.add_node(JourneyKind::Trigger, "I have an AI problem that needs solving");

        assert_eq!(g.first_of_kind(JourneyKind::Trigger).map(|n| n.id), Some(t1));
        assert!(g.first_of_kind(JourneyKind::Outcome).is_none());
    }
}
