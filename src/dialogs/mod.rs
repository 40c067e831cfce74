//! Modal dialogs - preferences, the submit form and the run result card.

pub mod prefs;
pub mod run;
pub mod submit;

pub use prefs::{render_settings_window, AppSettings};
pub use run::{RunDialog, RunOutcome};
pub use submit::{SubmitAction, SubmitDialog};
