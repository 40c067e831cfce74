//! Core modules independent of any specific widget.

pub mod event_bus;

pub use event_bus::{downcast_event, BoxedEvent, Event, EventBus};
