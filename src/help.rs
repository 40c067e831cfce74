//! Static help entries shown in the palette tips box and the F1 overlay.
//!
//! Each editor tab has its own table; global hotkeys are shared.

/// Single help entry (gesture or key binding + description)
#[derive(Clone, Debug)]
pub struct HelpEntry {
    pub key: &'static str,
    pub desc: &'static str,
}

impl HelpEntry {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }
}

/// Global hotkeys shared across both editors
pub const GLOBAL_HELP: &[HelpEntry] = &[
    HelpEntry::new("F1", "Toggle tips"),
    HelpEntry::new("F12", "Toggle Preferences"),
    HelpEntry::new("ESC", "Cancel connection / close dialog / quit"),
];

/// Workflow Builder canvas gestures
pub const WORKFLOW_HELP: &[HelpEntry] = &[
    HelpEntry::new("Drag", "Move a node"),
    HelpEntry::new("Drag corner", "Resize a node"),
    HelpEntry::new("Shift+Click", "Connect two nodes"),
    HelpEntry::new("Grid", "Nodes snap to a 20px grid"),
];

/// Journey Builder canvas gestures
pub const JOURNEY_HELP: &[HelpEntry] = &[
    HelpEntry::new("Drag", "Move a card"),
    HelpEntry::new("Click dot", "Connect two cards"),
    HelpEntry::new("Run", "Play the journey from its trigger"),
];
