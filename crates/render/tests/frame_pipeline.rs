use std::sync::Arc;

use glam::{DVec3, UVec2};
use quartz_core::{ClientEvent, EventBus, ManualClock};
use quartz_render::{
    CullMode, DepthCompare, DepthDescriptor, FrameFailure, FrameOrchestrator, FrameOutcome,
    FrontFace, OrchestratorConfig, RasterConfig, RenderError,
};
use quartz_testkit::{CountingFactory, EventRecorder, GameFixture, RecordingBackend, RecordingLog};

fn orchestrator(log: &RecordingLog, bus: &EventBus) -> FrameOrchestrator<RecordingBackend> {
    let game = Arc::new(
        GameFixture::new()
            .position(DVec3::new(8.0, 70.0, -4.0))
            .build(),
    );
    FrameOrchestrator::new(
        RecordingBackend::new(log.clone(), UVec2::new(1280, 720)),
        Box::new(CountingFactory::new(log.clone())),
        game,
        bus.clone(),
        Arc::new(ManualClock::new()),
        OrchestratorConfig::default(),
    )
    .expect("orchestrator builds")
}

#[test]
fn frame_runs_every_stage_in_order() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let mut orchestrator = orchestrator(&log, &bus);
    log.clear_calls();

    assert_eq!(orchestrator.draw_frame(), FrameOutcome::Presented);
    assert_eq!(
        log.calls(),
        [
            "make_commands",
            "current_target",
            "make_encoder",
            "configure_raster",
            "world_pass",
            "entity_pass",
            "current_drawable",
            "end_encoding",
            "present",
            "commit",
        ]
    );
}

#[test]
fn depth_and_raster_state_are_shared_by_all_passes() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let mut orchestrator = orchestrator(&log, &bus);
    orchestrator.draw_frame();
    orchestrator.draw_frame();

    let counts = log.counts();
    assert_eq!(counts.depth_states, 1);
    assert_eq!(counts.raster_configs, 2);
    assert_eq!(
        log.last_depth(),
        Some(DepthDescriptor {
            compare: DepthCompare::LessEqual,
            write_enabled: true,
        })
    );
    assert_eq!(
        log.last_raster(),
        Some(RasterConfig {
            front_face: FrontFace::Ccw,
            cull_mode: CullMode::Front,
        })
    );
}

#[test]
fn world_pass_failure_skips_entities_and_presentation() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let recorder = EventRecorder::attach(&bus);
    let mut orchestrator = orchestrator(&log, &bus);
    log.set_failures(|failures| failures.world_pass = true);

    assert_eq!(
        orchestrator.draw_frame(),
        FrameOutcome::Skipped(FrameFailure::RenderPass { pass: "world" })
    );

    let counts = log.counts();
    assert_eq!(counts.world_passes, 1);
    assert_eq!(counts.entity_passes, 0);
    assert_eq!(counts.drawables, 0);
    assert_eq!(counts.presented, 0);
    assert_eq!(counts.committed, 0);
    // The encoder is still closed so the next frame starts clean.
    assert_eq!(counts.ended, counts.encoders);

    let errors = recorder.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("world"));
}

#[test]
fn entity_pass_failure_skips_presentation() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let recorder = EventRecorder::attach(&bus);
    let mut orchestrator = orchestrator(&log, &bus);
    log.set_failures(|failures| failures.entity_pass = true);

    assert_eq!(
        orchestrator.draw_frame(),
        FrameOutcome::Skipped(FrameFailure::RenderPass { pass: "entity" })
    );
    let counts = log.counts();
    assert_eq!(counts.world_passes, 1);
    assert_eq!(counts.entity_passes, 1);
    assert_eq!(counts.presented, 0);
    assert_eq!(counts.committed, 0);
    assert_eq!(recorder.errors().len(), 1);
}

#[test]
fn acquisition_failure_is_published_and_does_no_work() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let recorder = EventRecorder::attach(&bus);
    let mut orchestrator = orchestrator(&log, &bus);
    let camera_before = orchestrator.camera();

    log.set_failures(|failures| failures.commands = true);
    assert_eq!(
        orchestrator.draw_frame(),
        FrameOutcome::Skipped(FrameFailure::ResourceAcquisition)
    );

    log.set_failures(|failures| {
        failures.commands = false;
        failures.encoder = true;
    });
    assert_eq!(
        orchestrator.draw_frame(),
        FrameOutcome::Skipped(FrameFailure::ResourceAcquisition)
    );

    let counts = log.counts();
    assert_eq!(counts.world_passes, 0);
    assert_eq!(counts.raster_configs, 0);
    assert_eq!(counts.committed, 0);
    assert_eq!(orchestrator.camera().position, camera_before.position);

    let errors = recorder.errors();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|error| error.message == "Failed to acquire frame resources"));
}

#[test]
fn missing_render_target_skips_before_encoding() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let recorder = EventRecorder::attach(&bus);
    let mut orchestrator = orchestrator(&log, &bus);
    let camera_before = orchestrator.camera();

    log.set_failures(|failures| failures.target = true);
    assert_eq!(
        orchestrator.draw_frame(),
        FrameOutcome::Skipped(FrameFailure::ResourceAcquisition)
    );

    let counts = log.counts();
    assert_eq!(counts.targets, 1);
    assert_eq!(counts.encoders, 0);
    assert_eq!(counts.raster_configs, 0);
    assert_eq!(counts.world_passes, 0);
    assert_eq!(counts.ended, 0);
    assert_eq!(counts.committed, 0);
    assert_eq!(orchestrator.camera().position, camera_before.position);
    assert_eq!(orchestrator.timed_frames(), 0);

    let errors = recorder.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Failed to acquire frame resources");
}

#[test]
fn only_frames_that_got_their_resources_are_timed() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let mut orchestrator = orchestrator(&log, &bus);

    log.set_failures(|failures| failures.commands = true);
    orchestrator.draw_frame();
    assert_eq!(orchestrator.timed_frames(), 0);

    log.set_failures(|failures| {
        failures.commands = false;
        failures.world_pass = true;
    });
    orchestrator.draw_frame();
    assert_eq!(orchestrator.timed_frames(), 1);

    log.set_failures(|failures| failures.world_pass = false);
    assert_eq!(orchestrator.draw_frame(), FrameOutcome::Presented);
    assert_eq!(orchestrator.timed_frames(), 2);
}

#[test]
fn missing_drawable_is_a_quiet_skip() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let recorder = EventRecorder::attach(&bus);
    let mut orchestrator = orchestrator(&log, &bus);
    log.set_failures(|failures| failures.drawable = true);

    assert_eq!(
        orchestrator.draw_frame(),
        FrameOutcome::Skipped(FrameFailure::PresentationUnavailable)
    );
    let counts = log.counts();
    assert_eq!(counts.entity_passes, 1);
    assert_eq!(counts.presented, 0);
    assert_eq!(counts.committed, 0);
    assert_eq!(counts.ended, 1);
    assert!(recorder.is_empty());
}

#[test]
fn frames_recover_after_a_skip() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let mut orchestrator = orchestrator(&log, &bus);

    log.set_failures(|failures| failures.target = true);
    assert!(matches!(orchestrator.draw_frame(), FrameOutcome::Skipped(_)));

    log.set_failures(|failures| failures.target = false);
    assert_eq!(orchestrator.draw_frame(), FrameOutcome::Presented);
    assert_eq!(log.counts().committed, 1);
}

#[test]
fn camera_follows_the_smoothed_eye_position() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let mut orchestrator = orchestrator(&log, &bus);
    orchestrator.draw_frame();

    let camera = log.last_camera().expect("a pass ran");
    assert_eq!(camera.camera_pos, [8.0, 71.625, -4.0, 1.0]);
    assert!((orchestrator.camera().aspect() - 1280.0 / 720.0).abs() < 1e-6);
}

#[test]
fn startup_construction_failure_is_returned() {
    let log = RecordingLog::new();
    log.set_failures(|failures| failures.world_build = true);

    let result = FrameOrchestrator::new(
        RecordingBackend::new(log.clone(), UVec2::new(640, 480)),
        Box::new(CountingFactory::new(log.clone())),
        Arc::new(GameFixture::new().build()),
        EventBus::new(),
        Arc::new(ManualClock::new()),
        OrchestratorConfig::default(),
    );

    match result {
        Err(error @ RenderError::Construction { renderer: "world", .. }) => {
            assert_eq!(error.failure(), FrameFailure::Construction);
        }
        other => panic!("expected a world construction error, got {other:?}"),
    }
}

#[test]
fn error_events_do_not_reach_the_renderers() {
    let log = RecordingLog::new();
    let bus = EventBus::new();
    let mut orchestrator = orchestrator(&log, &bus);
    log.set_failures(|failures| failures.world_pass = true);
    orchestrator.draw_frame();

    // The published ErrorOccurred must not trigger a rebuild.
    assert_eq!(log.counts().world_builds, 1);
    bus.publish(ClientEvent::DebugScreenToggled);
    assert_eq!(log.counts().world_builds, 1);
}
