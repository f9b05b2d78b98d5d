#![warn(missing_docs)]
//! Frame orchestration: camera, content passes and presentation.

mod camera;
mod error;
mod frustum;
mod gpu;
mod orchestrator;
mod reactive;
mod stats;
mod wgpu_backend;

pub use camera::{CameraState, CameraUniform};
pub use error::{FrameFailure, RenderError, RenderFailure};
pub use frustum::Frustum;
pub use gpu::{
    ContentRenderer, CullMode, DepthCompare, DepthDescriptor, FrontFace, GpuBackend,
    PassContext, RasterConfig, RenderTarget, RendererFactory,
};
pub use orchestrator::{FrameOrchestrator, FrameOutcome, OrchestratorConfig, DEFAULT_EYE_HEIGHT};
pub use reactive::ReactiveStateManager;
pub use stats::{FrameStatisticsCollector, STATISTICS_WINDOW};
pub use wgpu_backend::{WgpuBackend, WgpuEncoder, WgpuTarget};
