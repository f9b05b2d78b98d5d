use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use quartz_core::{ClientEvent, ErrorEvent, EventBus, SubscriptionId};
use serde::Serialize;

/// Records every event published on a bus until dropped.
#[derive(Debug)]
pub struct EventRecorder {
    bus: EventBus,
    subscription: SubscriptionId,
    events: Arc<Mutex<Vec<ClientEvent>>>,
}

impl EventRecorder {
    pub fn attach(bus: &EventBus) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let subscription = bus.subscribe(move |event| sink.lock().push(event.clone()));
        Self {
            bus: bus.clone(),
            subscription,
            events,
        }
    }

    pub fn events(&self) -> Vec<ClientEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Payloads of every `ErrorOccurred` event, in order.
    pub fn errors(&self) -> Vec<ErrorEvent> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                ClientEvent::ErrorOccurred(error) => Some(error.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Write the recorded events to `sink`, one line each.
    pub fn write_to(&self, sink: &mut JsonlSink) -> Result<()> {
        for event in self.events.lock().iter() {
            sink.write(&EventRecord::from_event(event))?;
        }
        Ok(())
    }
}

impl Drop for EventRecorder {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription);
    }
}

/// Flat, serializable view of a [`ClientEvent`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    /// Human-readable kind label.
    pub kind: &'static str,
    /// Free-form payload.
    pub payload: String,
}

impl EventRecord {
    pub fn from_event(event: &ClientEvent) -> Self {
        let (kind, payload) = match event {
            ClientEvent::WorldChanged => ("world_changed", String::new()),
            ClientEvent::FieldOfViewChanged { fov_degrees } => {
                ("fov_changed", fov_degrees.to_string())
            }
            ClientEvent::ErrorOccurred(error) => {
                ("error", format!("{}: {}", error.message, error.error))
            }
            ClientEvent::ChunkLoaded { x, z } => ("chunk_loaded", format!("{x} {z}")),
            ClientEvent::DebugScreenToggled => ("debug_toggled", String::new()),
        };
        Self { kind, payload }
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append a record to the log.
    pub fn write(&mut self, record: &EventRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
