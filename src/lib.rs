//! FLOWPAD - Node-graph canvas editor library
//!
//! Re-exports all modules for use by the binary target.

// Core engine (event bus)
pub mod core;

// App modules
pub mod cli;
pub mod config;
pub mod dialogs;
pub mod entities;
pub mod help;
pub mod main_events;
pub mod widgets;

// Re-export commonly used types
pub use crate::core::event_bus::{downcast_event, BoxedEvent, EventBus};
pub use crate::entities::{Arrow, GraphConfig, GraphState, Node};
