//! Per-frame render pipeline.
//!
//! A frame acquires its GPU objects, refreshes the camera from the player's pose, runs
//! the world pass then the entity pass, and presents. Any failure skips the rest of the
//! frame; nothing propagates to the caller of [`FrameOrchestrator::draw_frame`].

use std::sync::Arc;

use glam::{UVec2, Vec3};
use parking_lot::Mutex;
use quartz_core::{ClientEvent, Clock, ErrorEvent, EventBus, RenderStatistics};
use quartz_world::Game;

use crate::camera::CameraState;
use crate::error::{FrameFailure, RenderError};
use crate::gpu::{
    ContentRenderer, DepthDescriptor, GpuBackend, PassContext, RasterConfig, RenderTarget,
    RendererFactory,
};
use crate::reactive::{self, ReactiveStateManager};
use crate::stats::FrameStatisticsCollector;

/// Player eye height above the feet.
pub const DEFAULT_EYE_HEIGHT: f32 = 1.625;

/// Startup settings for [`FrameOrchestrator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestratorConfig {
    /// Initial vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Camera height above the player's feet, in blocks.
    pub eye_height: f32,
    /// Depth state shared by every pass.
    pub depth: DepthDescriptor,
    /// Rasterizer state applied each frame.
    pub raster: RasterConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            eye_height: DEFAULT_EYE_HEIGHT,
            depth: DepthDescriptor::default(),
            raster: RasterConfig::default(),
        }
    }
}

/// Result of one call to [`FrameOrchestrator::draw_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was committed with a drawable.
    Presented,
    /// The frame was abandoned for the given reason.
    Skipped(FrameFailure),
}

/// State touched by frames and by event handling. Always accessed under one lock.
pub(crate) struct FrameState<B: GpuBackend> {
    pub(crate) backend: B,
    pub(crate) camera: CameraState,
    depth_state: B::DepthState,
    raster: RasterConfig,
    world_renderer: Box<dyn ContentRenderer<B>>,
    entity_renderer: Box<dyn ContentRenderer<B>>,
    factory: Box<dyn RendererFactory<B>>,
    game: Arc<Game>,
    eye_height: f32,
}

impl<B: GpuBackend> FrameState<B> {
    fn encode_frame(&mut self) -> Result<(), RenderError> {
        let FrameState {
            backend,
            camera,
            depth_state,
            raster,
            world_renderer,
            entity_renderer,
            game,
            eye_height,
            ..
        } = self;

        let mut commands = backend.make_commands()?;
        let mut target = backend.current_target()?;
        let mut encoder = backend.make_encoder(&mut commands, &target)?;

        update_camera(camera, game, *eye_height, target.extent());
        backend.configure_raster(&mut encoder, depth_state, raster);

        for (pass, renderer) in [("world", world_renderer), ("entity", entity_renderer)] {
            let mut context = PassContext {
                backend: &*backend,
                target: &target,
                encoder: &mut encoder,
                commands: &mut commands,
                camera: camera.uniform(),
                frustum: camera.frustum(),
            };
            if let Err(source) = renderer.render(&mut context) {
                backend.end_encoding(encoder, &mut commands);
                return Err(RenderError::pass(pass, source));
            }
        }

        let Some(drawable) = backend.current_drawable(&mut target) else {
            backend.end_encoding(encoder, &mut commands);
            return Err(RenderError::NoDrawable);
        };

        backend.end_encoding(encoder, &mut commands);
        backend.present(&mut commands, drawable);
        backend.commit(commands);
        Ok(())
    }

    /// Replace the world renderer. On failure the previous renderer stays in place.
    pub(crate) fn rebuild_world_renderer(&mut self) -> Result<(), RenderError> {
        let renderer = self
            .factory
            .world_renderer(&self.backend, &self.game)
            .map_err(|source| RenderError::construction("world", source))?;
        self.world_renderer = renderer;
        Ok(())
    }
}

fn update_camera(camera: &mut CameraState, game: &Game, eye_height: f32, extent: UVec2) {
    let (position, yaw, pitch) = game.access_player(|player| {
        (
            player.smooth_position.as_vec3(),
            player.rotation.yaw,
            player.rotation.pitch,
        )
    });
    camera.set_position(position + Vec3::new(0.0, eye_height, 0.0));
    camera.set_rotation(yaw, pitch);
    camera.set_aspect(extent.x, extent.y);
    camera.cache_frustum();
}

/// Owns the camera, depth configuration and content renderers, and drives frames.
///
/// World changes and field of view changes published on the bus are applied through
/// the same lock a frame holds, so they only take effect between frames.
pub struct FrameOrchestrator<B: GpuBackend> {
    state: Arc<Mutex<FrameState<B>>>,
    bus: EventBus,
    statistics: FrameStatisticsCollector,
    reactive: ReactiveStateManager,
}

impl<B: GpuBackend> FrameOrchestrator<B> {
    /// Build the depth state and both content renderers, then subscribe to `bus`.
    pub fn new(
        mut backend: B,
        mut factory: Box<dyn RendererFactory<B>>,
        game: Arc<Game>,
        bus: EventBus,
        clock: Arc<dyn Clock>,
        config: OrchestratorConfig,
    ) -> Result<Self, RenderError> {
        let depth_state = backend.make_depth_state(&config.depth)?;
        let world_renderer = factory
            .world_renderer(&backend, &game)
            .map_err(|source| RenderError::construction("world", source))?;
        let entity_renderer = factory
            .entity_renderer(&backend, &game)
            .map_err(|source| RenderError::construction("entity", source))?;

        let camera = CameraState::new(config.fov_degrees.to_radians(), 1.0);
        let state = Arc::new(Mutex::new(FrameState {
            backend,
            camera,
            depth_state,
            raster: config.raster,
            world_renderer,
            entity_renderer,
            factory,
            game,
            eye_height: config.eye_height,
        }));

        let reactive = ReactiveStateManager::attach(&bus, &state);
        tracing::info!(fov = config.fov_degrees, "frame orchestrator ready");

        Ok(Self {
            state,
            bus,
            statistics: FrameStatisticsCollector::new(clock),
            reactive,
        })
    }

    /// Produce one frame. Failures are logged and, except for a missing drawable,
    /// published as [`ClientEvent::ErrorOccurred`].
    pub fn draw_frame(&mut self) -> FrameOutcome {
        self.statistics.begin_frame();
        let result = self.state.lock().encode_frame();

        match result {
            Ok(()) => {
                self.statistics.end_frame();
                FrameOutcome::Presented
            }
            Err(error) => {
                // Frames that never got their resources are not timed.
                if error.failure() == FrameFailure::ResourceAcquisition {
                    self.statistics.cancel_frame();
                } else {
                    self.statistics.end_frame();
                }
                FrameOutcome::Skipped(self.report(error))
            }
        }
    }

    fn report(&self, error: RenderError) -> FrameFailure {
        let failure = error.failure();
        match failure {
            FrameFailure::PresentationUnavailable => {
                tracing::warn!("no drawable available, skipping frame");
            }
            FrameFailure::RenderPass { pass } => {
                tracing::error!(pass, error = ?error, "content pass failed, skipping frame");
            }
            FrameFailure::ResourceAcquisition => {
                tracing::error!(error = ?error, "failed to acquire frame resources, skipping frame");
            }
            FrameFailure::Construction => {
                tracing::error!(error = ?error, "failed to construct renderer, skipping frame");
            }
        }
        let Some(message) = failure.message() else {
            return failure;
        };
        self.bus
            .publish(ClientEvent::ErrorOccurred(ErrorEvent::new(error, message)));
        failure
    }

    /// Apply a state-change event directly, as the bus subscription does.
    pub fn apply_event(&self, event: &ClientEvent) {
        if let Some(error) = reactive::apply_event(&self.state, event) {
            self.bus.publish(ClientEvent::ErrorOccurred(error));
        }
    }

    /// Snapshot of the camera as of the last frame or event.
    pub fn camera(&self) -> CameraState {
        self.state.lock().camera.clone()
    }

    /// Averages over recent frames.
    pub fn statistics(&self) -> RenderStatistics {
        self.statistics.statistics()
    }

    /// Frames currently in the statistics window.
    pub fn timed_frames(&self) -> usize {
        self.statistics.frame_count()
    }

    /// Report the GPU time of a finished frame, in seconds.
    pub fn record_gpu_time(&mut self, seconds: f64) {
        self.statistics.record_gpu_time(seconds);
    }

    /// Run `f` with exclusive access to the backend, between frames.
    pub fn with_backend<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        f(&mut self.state.lock().backend)
    }

    /// Subscription that keeps the frame state in sync with the bus.
    pub fn reactive(&self) -> &ReactiveStateManager {
        &self.reactive
    }

    /// Bus the orchestrator reads events from and reports errors to.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}

impl<B: GpuBackend> std::fmt::Debug for FrameOrchestrator<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameOrchestrator")
            .field("bus", &self.bus)
            .field("statistics", &self.statistics)
            .field("reactive", &self.reactive)
            .finish_non_exhaustive()
    }
}
