//! Application event handling - the single place widget events become
//! store mutations.
//!
//! The frame loop polls the bus and feeds each event through
//! [`handle_app_event`]. Handlers mutate the graphs directly; anything
//! that needs the UI context (opening a dialog, a status message) is
//! returned in [`EventResult`] and executed by the app after the loop,
//! which keeps borrow scopes simple.

use log::debug;

use crate::core::event_bus::{downcast_event, BoxedEvent};
use crate::dialogs::run::RunOutcome;
use crate::entities::graph::GraphState;
use crate::entities::kinds::{BuilderKind, JourneyKind};
use crate::widgets::canvas::{
    ArrowCreatedEvent, ClearCanvasEvent, ConnectStartedEvent, EditorId, RunJourneyEvent,
    SubmitWorkflowEvent,
};
use crate::widgets::palette::AddNodeEvent;

/// Canned consultation pitch shown by the Run action.
const RUN_GREETING: &str = "Let's start with a discovery call! Contact us to discuss your needs.";

/// Result of handling an app event - may contain deferred actions
#[derive(Default)]
pub struct EventResult {
    /// Transient advisory for the status bar.
    pub message: Option<String>,
    /// Open the Submit Workflow dialog.
    pub open_submit: bool,
    /// Open the Run Workflow result card.
    pub run_result: Option<RunOutcome>,
    /// Ask for confirmation before clearing this editor.
    pub confirm_clear: Option<EditorId>,
}

/// Handle a single app event (called from main event loop).
/// Returns Some(result) if event was handled, None otherwise.
pub fn handle_app_event(
    event: &BoxedEvent,
    workflow: &mut GraphState<BuilderKind>,
    journey: &mut GraphState<JourneyKind>,
    confirm_clear: bool,
) -> Option<EventResult> {
    let mut result = EventResult::default();

    // === Palette ===
    if let Some(e) = downcast_event::<AddNodeEvent<BuilderKind>>(event) {
        let id = workflow.add_node(e.kind, e.label.clone());
        debug!("AddNode(workflow): {:?} \"{}\" -> {}", e.kind, e.label, id);
        return Some(result);
    }
    if let Some(e) = downcast_event::<AddNodeEvent<JourneyKind>>(event) {
        let id = journey.add_node(e.kind, e.label.clone());
        debug!("AddNode(journey): {:?} \"{}\" -> {}", e.kind, e.label, id);
        return Some(result);
    }

    // === Page shell actions ===
    if let Some(e) = downcast_event::<ClearCanvasEvent>(event) {
        if confirm_clear && !e.confirmed {
            result.confirm_clear = Some(e.editor);
            return Some(result);
        }
        match e.editor {
            EditorId::Workflow => workflow.clear(),
            EditorId::Journey => journey.clear(),
        }
        debug!("ClearCanvas: {:?}", e.editor);
        result.message = Some("Canvas cleared".to_string());
        return Some(result);
    }
    if downcast_event::<SubmitWorkflowEvent>(event).is_some() {
        if workflow.is_empty() {
            result.message =
                Some("Please add some components to your workflow first!".to_string());
        } else {
            result.open_submit = true;
        }
        return Some(result);
    }
    if downcast_event::<RunJourneyEvent>(event).is_some() {
        match journey.first_of_kind(JourneyKind::Trigger) {
            Some(trigger) => {
                result.run_result = Some(RunOutcome {
                    kind: trigger.kind,
                    label: trigger.label.clone(),
                    content: RUN_GREETING.to_string(),
                });
            }
            None => {
                result.message = Some("Add a trigger node to start the workflow!".to_string());
            }
        }
        return Some(result);
    }

    // === Canvas feedback ===
    if let Some(e) = downcast_event::<ConnectStartedEvent>(event) {
        let label = match e.editor {
            EditorId::Workflow => workflow.node(e.node).map(|n| n.label.clone()),
            EditorId::Journey => journey.node(e.node).map(|n| n.label.clone()),
        };
        if let Some(label) = label {
            result.message = Some(format!("Connecting from \"{label}\"; click another node"));
        }
        return Some(result);
    }
    if let Some(e) = downcast_event::<ArrowCreatedEvent>(event) {
        debug!("ArrowCreated({:?}): {} -> {}", e.editor, e.from, e.to);
        result.message = Some("Nodes connected".to_string());
        return Some(result);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::kinds::{demo_journey, demo_workflow, journey_config, workflow_config};

    fn empty_graphs() -> (GraphState<BuilderKind>, GraphState<JourneyKind>) {
        (
            GraphState::new(workflow_config()),
            GraphState::new(journey_config()),
        )
    }

    #[test]
    fn test_add_node_event_mutates_matching_graph() {
        let (mut workflow, mut journey) = empty_graphs();
        let event: BoxedEvent = Box::new(AddNodeEvent {
            kind: BuilderKind::Backend,
            label: "Server API".to_string(),
        });

        let handled = handle_app_event(&event, &mut workflow, &mut journey, false);
        assert!(handled.is_some());
        assert_eq!(workflow.nodes().len(), 1);
        assert!(journey.is_empty());
    }

    #[test]
    fn test_clear_event_clears_only_target_editor() {
        let mut workflow = demo_workflow();
        let mut journey = demo_journey();
        let event: BoxedEvent = Box::new(ClearCanvasEvent {
            editor: EditorId::Journey,
            confirmed: false,
        });

        handle_app_event(&event, &mut workflow, &mut journey, false);
        assert!(journey.is_empty());
        assert!(!workflow.is_empty());
    }

    #[test]
    fn test_clear_event_defers_when_confirmation_enabled() {
        let mut workflow = demo_workflow();
        let mut journey = demo_journey();
        let event: BoxedEvent = Box::new(ClearCanvasEvent {
            editor: EditorId::Workflow,
            confirmed: false,
        });

        let result = handle_app_event(&event, &mut workflow, &mut journey, true).unwrap();
        assert_eq!(result.confirm_clear, Some(EditorId::Workflow));
        assert!(!workflow.is_empty());

        let confirmed: BoxedEvent = Box::new(ClearCanvasEvent {
            editor: EditorId::Workflow,
            confirmed: true,
        });
        handle_app_event(&confirmed, &mut workflow, &mut journey, true);
        assert!(workflow.is_empty());
    }

    #[test]
    fn test_submit_guard_on_empty_workflow() {
        let (mut workflow, mut journey) = empty_graphs();
        let event: BoxedEvent = Box::new(SubmitWorkflowEvent);

        let result = handle_app_event(&event, &mut workflow, &mut journey, false).unwrap();
        assert!(!result.open_submit);
        assert!(result.message.is_some());
    }

    #[test]
    fn test_submit_opens_dialog_with_nodes() {
        let mut workflow = demo_workflow();
        let mut journey = demo_journey();
        let event: BoxedEvent = Box::new(SubmitWorkflowEvent);

        let result = handle_app_event(&event, &mut workflow, &mut journey, false).unwrap();
        assert!(result.open_submit);
        assert!(result.message.is_none());
    }

    #[test]
    fn test_run_picks_first_trigger() {
        let mut workflow = demo_workflow();
        let mut journey = demo_journey();
        let event: BoxedEvent = Box::new(RunJourneyEvent);

        let result = handle_app_event(&event, &mut workflow, &mut journey, false).unwrap();
        let outcome = result.run_result.unwrap();
        assert_eq!(outcome.kind, JourneyKind::Trigger);
        assert_eq!(outcome.label, "I have a clear AI goal in mind");
        assert!(!outcome.content.is_empty());
    }

    #[test]
    fn test_run_guard_without_trigger() {
        let (mut workflow, mut journey) = empty_graphs();
        journey.add_node(JourneyKind::Action, "Workshop");
        let event: BoxedEvent = Box::new(RunJourneyEvent);

        let result = handle_app_event(&event, &mut workflow, &mut journey, false).unwrap();
        assert!(result.run_result.is_none());
        assert!(result.message.is_some());
    }

    #[test]
    fn test_unknown_event_is_unhandled() {
        let (mut workflow, mut journey) = empty_graphs();

        #[derive(Clone, Debug)]
        struct StrayEvent;
        let event: BoxedEvent = Box::new(StrayEvent);

        assert!(handle_app_event(&event, &mut workflow, &mut journey, false).is_none());
    }
}
