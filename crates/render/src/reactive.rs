use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use quartz_core::{ClientEvent, ErrorEvent, EventBus, SubscriptionId};

use crate::gpu::GpuBackend;
use crate::orchestrator::FrameState;

/// Keeps the orchestrator's renderers and camera in sync with game-state events.
///
/// Holds the bus registration and removes it when dropped, which happens together with
/// the owning [`FrameOrchestrator`](crate::FrameOrchestrator). The handler only keeps a weak
/// reference to the frame state and does nothing once the orchestrator is gone.
#[derive(Debug)]
pub struct ReactiveStateManager {
    bus: EventBus,
    subscription: SubscriptionId,
}

impl ReactiveStateManager {
    pub(crate) fn attach<B: GpuBackend>(bus: &EventBus, state: &Arc<Mutex<FrameState<B>>>) -> Self {
        let publisher = bus.clone();
        let state: Weak<Mutex<FrameState<B>>> = Arc::downgrade(state);
        let subscription = bus.subscribe(move |event| {
            // A publish that snapshotted this handler may outlive the orchestrator.
            let Some(state) = state.upgrade() else {
                return;
            };
            if let Some(error) = apply_event(&state, event) {
                publisher.publish(ClientEvent::ErrorOccurred(error));
            }
        });

        Self {
            bus: bus.clone(),
            subscription,
        }
    }

    /// Registration this manager removes on drop.
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }
}

impl Drop for ReactiveStateManager {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription);
    }
}

/// Apply one event. Returns the error to publish, which the caller must do after
/// the state lock is released.
pub(crate) fn apply_event<B: GpuBackend>(
    state: &Mutex<FrameState<B>>,
    event: &ClientEvent,
) -> Option<ErrorEvent> {
    match event {
        ClientEvent::WorldChanged => {
            let result = state.lock().rebuild_world_renderer();
            match result {
                Ok(()) => {
                    tracing::debug!("world renderer rebuilt");
                    None
                }
                Err(error) => {
                    tracing::error!(
                        critical = true,
                        error = ?error,
                        "failed to rebuild world renderer, keeping the previous one"
                    );
                    Some(ErrorEvent::new(error, "Failed to rebuild world renderer"))
                }
            }
        }
        ClientEvent::FieldOfViewChanged { fov_degrees } => {
            state.lock().camera.set_fov_y(fov_degrees.to_radians());
            tracing::debug!(fov = fov_degrees, "field of view updated");
            None
        }
        _ => None,
    }
}
