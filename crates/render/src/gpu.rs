//! The boundary between frame orchestration and a graphics API.
//!
//! [`GpuBackend`] hands out the per-frame objects (command context, render target,
//! encoder, drawable) and [`ContentRenderer`]s encode their pass into them. Everything
//! the orchestrator does is expressed through these traits, so it can be driven by the
//! wgpu backend or by a recording stub in tests.

use glam::UVec2;
use quartz_world::Game;

use crate::camera::CameraUniform;
use crate::error::{RenderError, RenderFailure};
use crate::frustum::Frustum;

/// Depth comparison used by the shared depth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthCompare {
    /// Pass when nearer than the stored depth.
    Less,
    /// Pass when nearer than or equal to the stored depth.
    LessEqual,
    /// Pass when farther than the stored depth.
    Greater,
    /// Always pass.
    Always,
}

/// Winding order of front-facing triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontFace {
    /// Counter-clockwise.
    Ccw,
    /// Clockwise.
    Cw,
}

/// Which triangle faces are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// Keep both faces.
    None,
    /// Discard front faces.
    Front,
    /// Discard back faces.
    Back,
}

/// Shared depth/stencil configuration, created once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthDescriptor {
    /// Comparison against the stored depth.
    pub compare: DepthCompare,
    /// Whether passing fragments write their depth.
    pub write_enabled: bool,
}

impl Default for DepthDescriptor {
    fn default() -> Self {
        Self {
            compare: DepthCompare::LessEqual,
            write_enabled: true,
        }
    }
}

/// Rasterizer state applied to every pass of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterConfig {
    /// Winding that counts as front-facing.
    pub front_face: FrontFace,
    /// Faces discarded before rasterization.
    pub cull_mode: CullMode,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            front_face: FrontFace::Ccw,
            cull_mode: CullMode::Front,
        }
    }
}

/// Something that can be rendered into this frame.
pub trait RenderTarget {
    /// Size in physical pixels.
    fn extent(&self) -> UVec2;
}

/// Graphics API used to produce frames.
///
/// Calls for one frame come in this order: `make_commands`, `current_target`,
/// `make_encoder`, `configure_raster`, the content passes, `current_drawable`,
/// `end_encoding`, `present`, `commit`. A frame that aborts after `make_encoder` still
/// gets `end_encoding` but never `present` or `commit`.
pub trait GpuBackend: Send + 'static {
    /// Command submission context for one frame.
    type Commands;
    /// Render target descriptor for one frame.
    type Target: RenderTarget;
    /// Encoder bound to a target.
    type Encoder;
    /// Surface that can be presented.
    type Drawable;
    /// Shared depth/stencil state.
    type DepthState: Send;

    /// Build the depth/stencil state shared by every frame.
    fn make_depth_state(
        &mut self,
        descriptor: &DepthDescriptor,
    ) -> Result<Self::DepthState, RenderError>;

    /// Open the command context for a new frame.
    fn make_commands(&mut self) -> Result<Self::Commands, RenderError>;

    /// The target this frame renders into.
    fn current_target(&mut self) -> Result<Self::Target, RenderError>;

    /// Create the encoder that every content pass of the frame records into.
    fn make_encoder(
        &mut self,
        commands: &mut Self::Commands,
        target: &Self::Target,
    ) -> Result<Self::Encoder, RenderError>;

    /// Bind the shared depth state and rasterizer settings to `encoder`.
    fn configure_raster(
        &mut self,
        encoder: &mut Self::Encoder,
        depth: &Self::DepthState,
        raster: &RasterConfig,
    );

    /// The drawable for this frame, if one is ready.
    fn current_drawable(&mut self, target: &mut Self::Target) -> Option<Self::Drawable>;

    /// Close the encoding scope.
    fn end_encoding(&mut self, encoder: Self::Encoder, commands: &mut Self::Commands);

    /// Schedule presentation of `drawable` once `commands` run.
    fn present(&mut self, commands: &mut Self::Commands, drawable: Self::Drawable);

    /// Submit the frame for execution. Does not wait for completion.
    fn commit(&mut self, commands: Self::Commands);
}

/// Everything a content pass gets to encode with.
pub struct PassContext<'a, B: GpuBackend> {
    /// Backend that produced the frame objects.
    pub backend: &'a B,
    /// Target being rendered into.
    pub target: &'a B::Target,
    /// Encoder shared by all passes of the frame.
    pub encoder: &'a mut B::Encoder,
    /// Command context of the frame.
    pub commands: &'a mut B::Commands,
    /// Camera matrices for this frame.
    pub camera: CameraUniform,
    /// View frustum for culling.
    pub frustum: &'a Frustum,
}

/// One renderer's contribution to a frame (world geometry, entities).
pub trait ContentRenderer<B: GpuBackend>: Send {
    /// Encode this renderer's pass. An error skips the remaining passes of the frame.
    fn render(&mut self, pass: &mut PassContext<'_, B>) -> Result<(), RenderFailure>;
}

/// Builds content renderers at startup and when the world changes.
pub trait RendererFactory<B: GpuBackend>: Send {
    /// Renderer for world geometry. Called again on every world change.
    fn world_renderer(
        &mut self,
        backend: &B,
        game: &Game,
    ) -> Result<Box<dyn ContentRenderer<B>>, RenderFailure>;

    /// Renderer for entities. Built once at startup.
    fn entity_renderer(
        &mut self,
        backend: &B,
        game: &Game,
    ) -> Result<Box<dyn ContentRenderer<B>>, RenderFailure>;
}
