//! Queued event bus for decoupled widget → app communication.
//!
//! Widgets emit typed events during rendering; the main loop drains the
//! queue once per frame with poll() and dispatches each event through
//! `main_events::handle_app_event`. Ordering is FIFO per emit() call.
//!
//! There is exactly one consumer (the frame loop), so the bus is a
//! plain bounded queue rather than a subscriber registry.

use std::any::Any;
use std::sync::{Arc, Mutex};

use log::warn;

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 1000;

/// Marker trait for events. Events must be Send + Sync + 'static.
pub trait Event: Any + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

// Blanket impl for all qualifying types
impl<T: Any + Send + Sync + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Boxed event for queue storage
pub type BoxedEvent = Box<dyn Event>;

/// Bounded FIFO event queue, cloneable into widgets.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Arc<Mutex<Vec<BoxedEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a typed event for the next poll().
    pub fn emit<E: Event>(&self, event: E) {
        self.push(Box::new(event));
    }

    /// Queue an already-boxed event (for dynamic dispatch from widgets).
    pub fn emit_boxed(&self, event: BoxedEvent) {
        self.push(event);
    }

    fn push(&self, event: BoxedEvent) {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict_count = queue.len() / 2;
            warn!(
                "EventBus queue full ({} events), evicting oldest {}",
                queue.len(),
                evict_count
            );
            queue.drain(0..evict_count);
        }
        queue.push(event);
    }

    /// Drain all queued events for batch processing in the main loop.
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Check queue length
    pub fn queue_len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Helper: downcast BoxedEvent to concrete type
///
/// IMPORTANT: Must explicitly deref to `dyn Event` before calling `as_any()`.
/// Without explicit deref, the blanket impl `Event for Box<dyn Event>` intercepts
/// the call and returns `&dyn Any` containing `Box<dyn Event>` instead of the
/// original type, causing downcast to always fail.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestEvent {
        value: i32,
    }

    #[derive(Clone, Debug)]
    struct OtherEvent {
        msg: String,
    }

    #[test]
    fn test_emit_queues_for_poll() {
        let bus = EventBus::new();

        bus.emit(TestEvent { value: 1 });
        bus.emit(TestEvent { value: 2 });
        bus.emit(OtherEvent { msg: "hello".into() });

        let events = bus.poll();
        assert_eq!(events.len(), 3);

        // Queue is empty after poll
        assert_eq!(bus.poll().len(), 0);
    }

    #[test]
    fn test_poll_preserves_fifo_order() {
        let bus = EventBus::new();
        for v in 0..5 {
            bus.emit(TestEvent { value: v });
        }

        let values: Vec<i32> = bus
            .poll()
            .iter()
            .filter_map(|ev| downcast_event::<TestEvent>(ev).map(|e| e.value))
            .collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_downcast() {
        let bus = EventBus::new();
        bus.emit(TestEvent { value: 42 });

        for ev in bus.poll() {
            if let Some(e) = downcast_event::<TestEvent>(&ev) {
                assert_eq!(e.value, 42);
            } else {
                panic!("downcast failed for queued TestEvent");
            }
        }
    }

    #[test]
    fn test_downcast_wrong_type_is_none() {
        let bus = EventBus::new();
        bus.emit(TestEvent { value: 1 });

        let events = bus.poll();
        assert!(downcast_event::<OtherEvent>(&events[0]).is_none());
    }

    #[test]
    fn test_cloned_handle_shares_queue() {
        let bus = EventBus::new();
        let handle = bus.clone();

        handle.emit(TestEvent { value: 7 });
        assert_eq!(bus.queue_len(), 1);
        assert_eq!(bus.poll().len(), 1);
        assert_eq!(handle.queue_len(), 0);
    }

    #[test]
    fn test_queue_eviction_keeps_newest() {
        let bus = EventBus::new();
        for v in 0..(MAX_QUEUE_SIZE as i32 + 10) {
            bus.emit(TestEvent { value: v });
        }

        let events = bus.poll();
        assert!(events.len() < MAX_QUEUE_SIZE + 10);

        // Newest event survived eviction
        let last = events.last().and_then(|ev| downcast_event::<TestEvent>(ev));
        assert_eq!(last.map(|e| e.value), Some(MAX_QUEUE_SIZE as i32 + 9));
    }
}
