//! UI Widgets - modular, reusable UI components
//!
//! Each widget renders into a provided `Ui` and reports back through
//! an [`actions::ActionQueue`] or a dispatch closure.

pub mod actions;
pub mod canvas;
pub mod palette;
pub mod status;
