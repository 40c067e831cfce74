//! Events emitted by the canvas widget and its page shell.

use uuid::Uuid;

/// Which editor tab an event refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorId {
    Workflow,
    Journey,
}

impl EditorId {
    pub fn title(self) -> &'static str {
        match self {
            EditorId::Workflow => "AI Workflow Builder",
            EditorId::Journey => "User Journey Builder",
        }
    }
}

/// A node was marked as the pending arrow source.
#[derive(Clone, Debug)]
pub struct ConnectStartedEvent {
    pub editor: EditorId,
    pub node: Uuid,
}

/// Connect mode completed an arrow.
#[derive(Clone, Debug)]
pub struct ArrowCreatedEvent {
    pub editor: EditorId,
    pub from: Uuid,
    pub to: Uuid,
}

/// "Clear Canvas" pressed. `confirmed` is false for the initial press
/// when the confirmation setting is on; the confirmation dialog
/// re-emits with true.
#[derive(Clone, Debug)]
pub struct ClearCanvasEvent {
    pub editor: EditorId,
    pub confirmed: bool,
}

/// "Submit Workflow" pressed (Workflow Builder).
#[derive(Clone, Debug)]
pub struct SubmitWorkflowEvent;

/// "Run Workflow" pressed (Journey Builder).
#[derive(Clone, Debug)]
pub struct RunJourneyEvent;
