//! Test doubles and fixtures: a recording GPU backend, counting content renderers,
//! an event recorder and game-state builders.

mod backend;
mod events;
mod fixtures;

pub use backend::{
    Counts, CountingFactory, CountingRenderer, Failures, PassKind, RecordedCommands,
    RecordedDrawable, RecordedEncoder, RecordedTarget, RecordingBackend, RecordingLog,
};
pub use events::{EventRecord, EventRecorder, JsonlSink};
pub use fixtures::GameFixture;
