//! Event dispatcher
//!
//! Routes each inbound event to the handlers registered for its type.
//! Handlers run inline on the emitting task, in registration order;
//! an event with no handlers is dropped silently.

use crate::protocol::{EventType, ServerFrame};
use parking_lot::RwLock;
use std::collections::HashMap;

/// An event flowing through the dispatcher
///
/// `Open` and `Closed` are synthesized by the connection layer; everything
/// else wraps a decoded wire frame.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Connection established
    Open,
    /// Connection torn down, with the observed close code
    Closed { code: u16 },
    /// Decoded inbound frame
    Frame(ServerFrame),
}

impl ClientEvent {
    /// The dispatch key for this event
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::Open => EventType::Open,
            Self::Closed { .. } => EventType::Closed,
            Self::Frame(frame) => frame.event_type(),
        }
    }
}

type Handler = Box<dyn Fn(&ClientEvent) + Send + Sync>;

/// Publish/subscribe table keyed by event type
pub struct EventDispatcher {
    handlers: RwLock<HashMap<EventType, Vec<Handler>>>,
}

impl EventDispatcher {
    /// Create a new dispatcher with no registrations
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a handler for an event type
    ///
    /// Multiple handlers per type are allowed; all are invoked in
    /// registration order.
    pub fn on<F>(&self, event_type: EventType, handler: F)
    where
        F: Fn(&ClientEvent) + Send + Sync + 'static,
    {
        self.handlers
            .write()
            .entry(event_type)
            .or_default()
            .push(Box::new(handler));

        tracing::trace!(event_type = %event_type, "handler registered");
    }

    /// Invoke every handler registered for the event's type
    pub fn emit(&self, event: &ClientEvent) {
        let event_type = event.event_type();
        let handlers = self.handlers.read();

        match handlers.get(&event_type) {
            Some(registered) => {
                tracing::trace!(
                    event_type = %event_type,
                    handlers = registered.len(),
                    "dispatching event"
                );
                for handler in registered {
                    handler(event);
                }
            }
            None => {
                tracing::trace!(event_type = %event_type, "no handlers for event");
            }
        }
    }

    /// Number of handlers registered for a type
    #[must_use]
    pub fn handler_count(&self, event_type: EventType) -> usize {
        self.handlers
            .read()
            .get(&event_type)
            .map_or(0, Vec::len)
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("types", &self.handlers.read().len())
            .finish()
    }
}
