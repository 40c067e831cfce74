//! Status bar widget.

mod status;

pub use status::{EditorStatus, StatusBar};
