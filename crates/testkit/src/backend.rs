//! GPU backend and content renderers that record what the orchestrator asks of them.

use std::sync::Arc;

use glam::UVec2;
use parking_lot::Mutex;
use quartz_render::{
    CameraUniform, ContentRenderer, DepthDescriptor, GpuBackend, PassContext, RasterConfig,
    RenderError, RenderFailure, RenderTarget, RendererFactory,
};
use quartz_world::Game;

/// How many times each backend, renderer and factory entry point ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub depth_states: usize,
    pub commands: usize,
    pub targets: usize,
    pub encoders: usize,
    pub raster_configs: usize,
    pub world_passes: usize,
    pub entity_passes: usize,
    pub drawables: usize,
    pub ended: usize,
    pub presented: usize,
    pub committed: usize,
    pub world_builds: usize,
    pub entity_builds: usize,
}

/// Switches that make the next calls fail until turned off again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Failures {
    pub commands: bool,
    pub target: bool,
    pub encoder: bool,
    pub depth_state: bool,
    /// `current_drawable` returns `None`.
    pub drawable: bool,
    pub world_pass: bool,
    pub entity_pass: bool,
    pub world_build: bool,
    pub entity_build: bool,
}

#[derive(Debug, Default)]
struct LogState {
    counts: Counts,
    failures: Failures,
    calls: Vec<&'static str>,
    last_camera: Option<CameraUniform>,
    last_raster: Option<RasterConfig>,
    last_depth: Option<DepthDescriptor>,
    /// Generation of the world renderer that ran the latest world pass.
    last_world_generation: Option<usize>,
}

/// Shared record of everything the stubs were asked to do. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingLog {
    state: Arc<Mutex<LogState>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> Counts {
        self.state.lock().counts
    }

    /// Every recorded call, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn set_failures(&self, update: impl FnOnce(&mut Failures)) {
        update(&mut self.state.lock().failures);
    }

    /// Camera uniform handed to the latest pass.
    pub fn last_camera(&self) -> Option<CameraUniform> {
        self.state.lock().last_camera
    }

    pub fn last_raster(&self) -> Option<RasterConfig> {
        self.state.lock().last_raster
    }

    pub fn last_depth(&self) -> Option<DepthDescriptor> {
        self.state.lock().last_depth
    }

    pub fn last_world_generation(&self) -> Option<usize> {
        self.state.lock().last_world_generation
    }

    fn record(&self, call: &'static str, update: impl FnOnce(&mut Counts)) -> Failures {
        let mut state = self.state.lock();
        state.calls.push(call);
        update(&mut state.counts);
        tracing::trace!(call, "recorded backend call");
        state.failures
    }
}

/// Command context handed out by [`RecordingBackend`].
#[derive(Debug)]
pub struct RecordedCommands {
    pub id: usize,
}

#[derive(Debug)]
pub struct RecordedTarget {
    pub extent: UVec2,
}

impl RenderTarget for RecordedTarget {
    fn extent(&self) -> UVec2 {
        self.extent
    }
}

#[derive(Debug, Default)]
pub struct RecordedEncoder {
    pub depth: Option<DepthDescriptor>,
    pub raster: Option<RasterConfig>,
}

#[derive(Debug)]
pub struct RecordedDrawable;

/// [`GpuBackend`] that records calls in a [`RecordingLog`] and fails on demand.
#[derive(Debug)]
pub struct RecordingBackend {
    log: RecordingLog,
    extent: UVec2,
}

impl RecordingBackend {
    pub fn new(log: RecordingLog, extent: UVec2) -> Self {
        Self { log, extent }
    }

    pub fn set_extent(&mut self, extent: UVec2) {
        self.extent = extent;
    }
}

impl GpuBackend for RecordingBackend {
    type Commands = RecordedCommands;
    type Target = RecordedTarget;
    type Encoder = RecordedEncoder;
    type Drawable = RecordedDrawable;
    type DepthState = DepthDescriptor;

    fn make_depth_state(
        &mut self,
        descriptor: &DepthDescriptor,
    ) -> Result<Self::DepthState, RenderError> {
        let failures = self.log.record("make_depth_state", |c| c.depth_states += 1);
        if failures.depth_state {
            return Err(RenderError::DepthState("stub failure".into()));
        }
        Ok(*descriptor)
    }

    fn make_commands(&mut self) -> Result<Self::Commands, RenderError> {
        let mut id = 0;
        let failures = self.log.record("make_commands", |c| {
            c.commands += 1;
            id = c.commands;
        });
        if failures.commands {
            return Err(RenderError::CommandContext("stub failure".into()));
        }
        Ok(RecordedCommands { id })
    }

    fn current_target(&mut self) -> Result<Self::Target, RenderError> {
        let failures = self.log.record("current_target", |c| c.targets += 1);
        if failures.target {
            return Err(RenderError::RenderTarget("stub failure".into()));
        }
        Ok(RecordedTarget {
            extent: self.extent,
        })
    }

    fn make_encoder(
        &mut self,
        _commands: &mut Self::Commands,
        _target: &Self::Target,
    ) -> Result<Self::Encoder, RenderError> {
        let failures = self.log.record("make_encoder", |c| c.encoders += 1);
        if failures.encoder {
            return Err(RenderError::Encoder("stub failure".into()));
        }
        Ok(RecordedEncoder::default())
    }

    fn configure_raster(
        &mut self,
        encoder: &mut Self::Encoder,
        depth: &Self::DepthState,
        raster: &RasterConfig,
    ) {
        self.log.record("configure_raster", |c| c.raster_configs += 1);
        encoder.depth = Some(*depth);
        encoder.raster = Some(*raster);

        let mut state = self.log.state.lock();
        state.last_depth = Some(*depth);
        state.last_raster = Some(*raster);
    }

    fn current_drawable(&mut self, _target: &mut Self::Target) -> Option<Self::Drawable> {
        let failures = self.log.record("current_drawable", |c| c.drawables += 1);
        (!failures.drawable).then_some(RecordedDrawable)
    }

    fn end_encoding(&mut self, _encoder: Self::Encoder, _commands: &mut Self::Commands) {
        self.log.record("end_encoding", |c| c.ended += 1);
    }

    fn present(&mut self, _commands: &mut Self::Commands, _drawable: Self::Drawable) {
        self.log.record("present", |c| c.presented += 1);
    }

    fn commit(&mut self, _commands: Self::Commands) {
        self.log.record("commit", |c| c.committed += 1);
    }
}

/// Which content pass a [`CountingRenderer`] stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    World,
    Entity,
}

/// Content renderer that only records that it ran.
#[derive(Debug)]
pub struct CountingRenderer {
    kind: PassKind,
    generation: usize,
    log: RecordingLog,
}

impl CountingRenderer {
    pub fn new(kind: PassKind, generation: usize, log: RecordingLog) -> Self {
        Self {
            kind,
            generation,
            log,
        }
    }
}

impl ContentRenderer<RecordingBackend> for CountingRenderer {
    fn render(
        &mut self,
        pass: &mut PassContext<'_, RecordingBackend>,
    ) -> Result<(), RenderFailure> {
        let failures = match self.kind {
            PassKind::World => self.log.record("world_pass", |c| c.world_passes += 1),
            PassKind::Entity => self.log.record("entity_pass", |c| c.entity_passes += 1),
        };

        {
            let mut state = self.log.state.lock();
            state.last_camera = Some(pass.camera);
            if self.kind == PassKind::World {
                state.last_world_generation = Some(self.generation);
            }
        }

        let failed = match self.kind {
            PassKind::World => failures.world_pass,
            PassKind::Entity => failures.entity_pass,
        };
        if failed {
            return Err(format!("{:?} pass stub failure", self.kind).into());
        }
        Ok(())
    }
}

/// Factory handing out [`CountingRenderer`]s, numbering world renderers from 1.
#[derive(Debug)]
pub struct CountingFactory {
    log: RecordingLog,
}

impl CountingFactory {
    pub fn new(log: RecordingLog) -> Self {
        Self { log }
    }
}

impl RendererFactory<RecordingBackend> for CountingFactory {
    fn world_renderer(
        &mut self,
        _backend: &RecordingBackend,
        _game: &Game,
    ) -> Result<Box<dyn ContentRenderer<RecordingBackend>>, RenderFailure> {
        let mut generation = 0;
        let failures = self.log.record("build_world", |c| {
            c.world_builds += 1;
            generation = c.world_builds;
        });
        if failures.world_build {
            return Err("world build stub failure".into());
        }
        Ok(Box::new(CountingRenderer::new(
            PassKind::World,
            generation,
            self.log.clone(),
        )))
    }

    fn entity_renderer(
        &mut self,
        _backend: &RecordingBackend,
        _game: &Game,
    ) -> Result<Box<dyn ContentRenderer<RecordingBackend>>, RenderFailure> {
        let mut generation = 0;
        let failures = self.log.record("build_entity", |c| {
            c.entity_builds += 1;
            generation = c.entity_builds;
        });
        if failures.entity_build {
            return Err("entity build stub failure".into());
        }
        Ok(Box::new(CountingRenderer::new(
            PassKind::Entity,
            generation,
            self.log.clone(),
        )))
    }
}
