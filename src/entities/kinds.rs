//! Per-editor node kind enums, palette templates and seeded demo graphs.
//!
//! Each editor variant has its own closed kind set. The shared
//! `NodeKind` trait is the seam the store and canvas are generic over:
//! it supplies the category title, the box colors and the annotation
//! flag (annotation nodes are user-editable text overlays that stack
//! above structural nodes).

use eframe::egui::{pos2, vec2, Color32};
use serde::{Deserialize, Serialize};

use super::graph::{AnchorMode, GraphConfig, GraphState};

/// Grid unit for the snapping editor variant.
pub const GRID_UNIT: f32 = 20.0;

/// Fixed card size of the journey variant.
pub const JOURNEY_CARD: eframe::egui::Vec2 = vec2(180.0, 72.0);

/// Behavior each editor's kind enum provides to the generic store,
/// canvas and palette.
pub trait NodeKind: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Category label, shown uppercased in node headers and as the
    /// palette group title.
    fn title(&self) -> &'static str;

    /// Box fill color.
    fn fill(&self) -> Color32;

    /// Box border color.
    fn stroke(&self) -> Color32;

    /// Annotation nodes embed a text editor and render above the
    /// structural nodes.
    fn is_annotation(&self) -> bool {
        false
    }
}

/// Workflow Builder kinds - architecture components plus free-text
/// annotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuilderKind {
    Frontend,
    Backend,
    Ai,
    Text,
}

impl NodeKind for BuilderKind {
    fn title(&self) -> &'static str {
        match self {
            BuilderKind::Frontend => "Frontend",
            BuilderKind::Backend => "Backend",
            BuilderKind::Ai => "AI",
            BuilderKind::Text => "Custom",
        }
    }

    fn fill(&self) -> Color32 {
        match self {
            BuilderKind::Frontend => Color32::from_rgba_unmultiplied(59, 130, 246, 26),
            BuilderKind::Backend => Color32::from_rgba_unmultiplied(249, 115, 22, 26),
            BuilderKind::Ai => Color32::from_rgba_unmultiplied(6, 182, 212, 26),
            BuilderKind::Text => Color32::from_rgba_unmultiplied(107, 114, 128, 26),
        }
    }

    fn stroke(&self) -> Color32 {
        match self {
            BuilderKind::Frontend => Color32::from_rgba_unmultiplied(96, 165, 250, 102),
            BuilderKind::Backend => Color32::from_rgba_unmultiplied(251, 146, 60, 102),
            BuilderKind::Ai => Color32::from_rgba_unmultiplied(34, 211, 238, 102),
            BuilderKind::Text => Color32::from_rgba_unmultiplied(156, 163, 175, 102),
        }
    }

    fn is_annotation(&self) -> bool {
        matches!(self, BuilderKind::Text)
    }
}

/// Journey Builder kinds - the consulting funnel stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JourneyKind {
    Trigger,
    Action,
    Outcome,
}

impl NodeKind for JourneyKind {
    fn title(&self) -> &'static str {
        match self {
            JourneyKind::Trigger => "Trigger",
            JourneyKind::Action => "Action",
            JourneyKind::Outcome => "Outcome",
        }
    }

    fn fill(&self) -> Color32 {
        match self {
            JourneyKind::Trigger => Color32::from_rgba_unmultiplied(59, 130, 246, 51),
            JourneyKind::Action => Color32::from_rgba_unmultiplied(34, 197, 94, 51),
            JourneyKind::Outcome => Color32::from_rgba_unmultiplied(168, 85, 247, 51),
        }
    }

    fn stroke(&self) -> Color32 {
        match self {
            JourneyKind::Trigger => Color32::from_rgb(59, 130, 246),
            JourneyKind::Action => Color32::from_rgb(34, 197, 94),
            JourneyKind::Outcome => Color32::from_rgb(168, 85, 247),
        }
    }
}

/// One palette section: a kind plus its addable template labels.
pub struct PaletteGroup<K> {
    pub kind: K,
    pub options: &'static [&'static str],
}

/// Workflow Builder palette content.
pub const WORKFLOW_PALETTE: &[PaletteGroup<BuilderKind>] = &[
    PaletteGroup {
        kind: BuilderKind::Frontend,
        options: &["User", "Chat", "Web / Mobile App"],
    },
    PaletteGroup {
        kind: BuilderKind::Backend,
        options: &["Server API", "Database", "Cache"],
    },
    PaletteGroup {
        kind: BuilderKind::Ai,
        options: &["LLM", "Agent", "RAG"],
    },
    PaletteGroup {
        kind: BuilderKind::Text,
        options: &["Text Block"],
    },
];

/// Journey Builder palette content.
pub const JOURNEY_PALETTE: &[PaletteGroup<JourneyKind>] = &[
    PaletteGroup {
        kind: JourneyKind::Trigger,
        options: &[
            "I feel like missing out on AI, but don't know where to start",
            "I have a clear AI goal in mind",
            "I have an AI problem that needs solving",
        ],
    },
    PaletteGroup {
        kind: JourneyKind::Action,
        options: &[
            "Discovery call",
            "Workshop",
            "Prototype development",
            "Implementation",
        ],
    },
    PaletteGroup {
        kind: JourneyKind::Outcome,
        options: &[
            "Consultation",
            "Building a prototype",
            "Full implementation",
            "Success!",
            "Fail",
        ],
    },
];

/// Store configuration for the Workflow Builder: 20px grid, resizable
/// boxes with a 100x60 floor, connectors anchored at box centers.
pub fn workflow_config() -> GraphConfig {
    GraphConfig {
        grid: Some(GRID_UNIT),
        min_size: vec2(100.0, 60.0),
        default_size: vec2(140.0, 80.0),
        anchor: AnchorMode::Center,
        resizable: true,
    }
}

/// Store configuration for the Journey Builder: free placement, fixed
/// cards, connectors anchored at a fixed offset below the card title.
pub fn journey_config() -> GraphConfig {
    GraphConfig {
        grid: None,
        min_size: JOURNEY_CARD,
        default_size: JOURNEY_CARD,
        anchor: AnchorMode::Offset(vec2(90.0, 60.0)),
        resizable: false,
    }
}

/// Seeded demo architecture shown when the Workflow Builder opens.
pub fn demo_workflow() -> GraphState<BuilderKind> {
    let mut g = GraphState::new(workflow_config());
    let web = g.seed_node(BuilderKind::Frontend, "Web / Mobile App", pos2(100.0, 180.0), vec2(160.0, 100.0));
    let api = g.seed_node(BuilderKind::Backend, "Server API", pos2(340.0, 180.0), vec2(140.0, 80.0));
    let llm = g.seed_node(BuilderKind::Ai, "LLM", pos2(560.0, 100.0), vec2(120.0, 80.0));
    let db = g.seed_node(BuilderKind::Backend, "Database", pos2(760.0, 100.0), vec2(140.0, 80.0));
    let rag = g.seed_node(BuilderKind::Ai, "RAG", pos2(340.0, 320.0), vec2(120.0, 80.0));
    let vector_db = g.seed_node(BuilderKind::Backend, "Database", pos2(340.0, 460.0), vec2(140.0, 80.0));

    g.add_arrow(web, api);
    g.add_arrow(api, llm);
    g.add_arrow(llm, db);
    g.add_arrow(api, rag);
    g.add_arrow(rag, vector_db);
    g
}

/// Seeded demo funnel shown when the Journey Builder opens.
pub fn demo_journey() -> GraphState<JourneyKind> {
    let mut g = GraphState::new(journey_config());
    let goal = g.seed_node(JourneyKind::Trigger, "I have a clear AI goal in mind", pos2(100.0, 200.0), JOURNEY_CARD);
    let call = g.seed_node(JourneyKind::Action, "Discovery call", pos2(400.0, 200.0), JOURNEY_CARD);
    let proto = g.seed_node(JourneyKind::Action, "Prototype development", pos2(700.0, 200.0), JOURNEY_CARD);
    let outcome = g.seed_node(JourneyKind::Outcome, "Building a prototype", pos2(1000.0, 200.0), JOURNEY_CARD);

    g.add_arrow(goal, call);
    g.add_arrow(call, proto);
    g.add_arrow(proto, outcome);
    g
}
