use std::sync::Arc;
use std::thread;

use glam::UVec2;
use parking_lot::Mutex;
use quartz_core::{ClientEvent, EventBus, ManualClock};
use quartz_render::{FrameOrchestrator, FrameOutcome, OrchestratorConfig};
use quartz_testkit::{CountingFactory, EventRecorder, GameFixture, RecordingBackend, RecordingLog};

fn orchestrator(log: &RecordingLog, bus: &EventBus) -> FrameOrchestrator<RecordingBackend> {
    FrameOrchestrator::new(
        RecordingBackend::new(log.clone(), UVec2::new(854, 480)),
        Box::new(CountingFactory::new(log.clone())),
        Arc::new(GameFixture::new().build()),
        bus.clone(),
        Arc::new(ManualClock::new()),
        OrchestratorConfig {
            fov_degrees: 70.0,
            ..OrchestratorConfig::default()
        },
    )
    .expect("orchestrator builds")
}

#[test]
fn initial_fov_comes_from_config() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let orchestrator = orchestrator(&log, &bus);
    assert_eq!(orchestrator.camera().fov_y(), 70f32.to_radians());
}

#[test]
fn fov_change_converts_degrees_to_radians() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let orchestrator = orchestrator(&log, &bus);

    bus.publish(ClientEvent::FieldOfViewChanged { fov_degrees: 90.0 });

    let fov = orchestrator.camera().fov_y();
    assert!((fov - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert_eq!(fov, 90f32.to_radians());
    // No renderer is rebuilt for a field of view change.
    assert_eq!(log.counts().world_builds, 1);
    assert_eq!(log.counts().entity_builds, 1);
}

#[test]
fn world_change_rebuilds_only_the_world_renderer() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let mut orchestrator = orchestrator(&log, &bus);

    bus.publish(ClientEvent::WorldChanged);

    let counts = log.counts();
    assert_eq!(counts.world_builds, 2);
    assert_eq!(counts.entity_builds, 1);

    assert_eq!(orchestrator.draw_frame(), FrameOutcome::Presented);
    assert_eq!(log.last_world_generation(), Some(2));
}

#[test]
fn failed_rebuild_keeps_the_previous_renderer() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let recorder = EventRecorder::attach(&bus);
    let mut orchestrator = orchestrator(&log, &bus);

    log.set_failures(|failures| failures.world_build = true);
    bus.publish(ClientEvent::WorldChanged);

    let errors = recorder.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Failed to rebuild world renderer");

    log.set_failures(|failures| failures.world_build = false);
    assert_eq!(orchestrator.draw_frame(), FrameOutcome::Presented);
    assert_eq!(log.last_world_generation(), Some(1));
}

#[test]
fn unrelated_events_are_ignored() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let orchestrator = orchestrator(&log, &bus);
    let fov = orchestrator.camera().fov_y();

    bus.publish(ClientEvent::ChunkLoaded { x: 3, z: -7 });
    bus.publish(ClientEvent::DebugScreenToggled);

    assert_eq!(log.counts().world_builds, 1);
    assert_eq!(orchestrator.camera().fov_y(), fov);
}

#[test]
fn apply_event_matches_the_subscription() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let orchestrator = orchestrator(&log, &bus);

    orchestrator.apply_event(&ClientEvent::WorldChanged);
    orchestrator.apply_event(&ClientEvent::FieldOfViewChanged { fov_degrees: 60.0 });

    assert_eq!(log.counts().world_builds, 2);
    assert_eq!(orchestrator.camera().fov_y(), 60f32.to_radians());
}

#[test]
fn dropping_the_orchestrator_unsubscribes() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let orchestrator = orchestrator(&log, &bus);
    assert_eq!(bus.subscriber_count(), 1);

    drop(orchestrator);
    assert_eq!(bus.subscriber_count(), 0);

    bus.publish(ClientEvent::WorldChanged);
    assert_eq!(log.counts().world_builds, 1);
}

#[test]
fn orchestrator_dropped_during_delivery_ignores_the_event() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let slot: Arc<Mutex<Option<FrameOrchestrator<RecordingBackend>>>> =
        Arc::new(Mutex::new(None));

    // Registered first, so it runs before the orchestrator's own handler.
    let owner = Arc::clone(&slot);
    bus.subscribe(move |event| {
        if matches!(event, ClientEvent::WorldChanged) {
            owner.lock().take();
        }
    });
    *slot.lock() = Some(orchestrator(&log, &bus));
    assert_eq!(bus.subscriber_count(), 2);

    bus.publish(ClientEvent::WorldChanged);

    assert!(slot.lock().is_none());
    assert_eq!(bus.subscriber_count(), 1);
    assert_eq!(log.counts().world_builds, 1);
}

#[test]
fn events_from_another_thread_apply_between_frames() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let mut orchestrator = orchestrator(&log, &bus);

    let publisher = bus.clone();
    let handle = thread::spawn(move || {
        for _ in 0..10 {
            publisher.publish(ClientEvent::WorldChanged);
        }
    });
    for _ in 0..10 {
        assert_eq!(orchestrator.draw_frame(), FrameOutcome::Presented);
    }
    handle.join().expect("publisher thread");

    assert_eq!(log.counts().world_builds, 11);
    assert_eq!(log.counts().presented, 10);
}
