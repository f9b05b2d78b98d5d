//! Process-wide publish/subscribe event bus.
//!
//! Handlers receive every published event and do their own dispatch on the
//! variant. Delivery is synchronous on the publishing thread.

use parking_lot::Mutex;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Error payload carried by [`ClientEvent::ErrorOccurred`].
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    /// Underlying failure.
    pub error: Arc<dyn Error + Send + Sync + 'static>,
    /// Human-readable description of what was being attempted.
    pub message: String,
}

impl ErrorEvent {
    /// Wrap an error together with a message.
    pub fn new<E>(error: E, message: impl Into<String>) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            error: Arc::new(error),
            message: message.into(),
        }
    }
}

/// Events flowing between the game client and its subsystems.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// The player joined a new world (or respawned into a different dimension).
    WorldChanged,
    /// The player changed their field of view setting.
    FieldOfViewChanged {
        /// New vertical field of view in degrees.
        fov_degrees: f32,
    },
    /// Something failed somewhere and the user may want to know.
    ErrorOccurred(ErrorEvent),
    /// A chunk column finished loading.
    ChunkLoaded {
        /// Chunk x coordinate.
        x: i32,
        /// Chunk z coordinate.
        z: i32,
    },
    /// The debug screen was shown or hidden.
    DebugScreenToggled,
}

/// Identifies a registered handler so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = dyn Fn(&ClientEvent) + Send + Sync;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Arc<Handler>)>,
}

/// Cheaply clonable handle to a shared bus.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler that is called for every published event.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ClientEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.handlers.push((id, Arc::new(handler)));
        tracing::trace!(subscription = id.0, "event handler registered");
        id
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.lock();
        let before = registry.handlers.len();
        registry.handlers.retain(|(handler_id, _)| *handler_id != id);
        before != registry.handlers.len()
    }

    /// Deliver an event to every current subscriber.
    pub fn publish(&self, event: ClientEvent) {
        // Handlers run without the registry lock so they can publish or (un)subscribe.
        let handlers: Vec<Arc<Handler>> = self
            .registry
            .lock()
            .handlers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler(&event);
        }
    }

    /// Number of registered handlers.
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().handlers.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
