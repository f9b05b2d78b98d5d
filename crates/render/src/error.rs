use std::error::Error as StdError;

use thiserror::Error;

/// Failure reported by a content renderer's pass.
pub type RenderFailure = Box<dyn StdError + Send + Sync + 'static>;

/// Errors raised while building or drawing a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The command submission context could not be created.
    #[error("failed to acquire command context: {0}")]
    CommandContext(String),

    /// No render target is available this frame.
    #[error("failed to acquire render target: {0}")]
    RenderTarget(String),

    /// The encoder for the render target could not be created.
    #[error("failed to create command encoder: {0}")]
    Encoder(String),

    /// The shared depth/stencil state could not be created.
    #[error("failed to create depth state: {0}")]
    DepthState(String),

    /// A content renderer could not be built.
    #[error("failed to construct {renderer} renderer")]
    Construction {
        /// Which renderer failed.
        renderer: &'static str,
        /// Why it failed.
        #[source]
        source: RenderFailure,
    },

    /// A content pass failed while encoding.
    #[error("{pass} pass failed")]
    Pass {
        /// Which pass failed.
        pass: &'static str,
        /// Why it failed.
        #[source]
        source: RenderFailure,
    },

    /// The presentable surface was not ready.
    #[error("no drawable available")]
    NoDrawable,
}

impl RenderError {
    /// A renderer named `renderer` failed to build.
    pub fn construction(renderer: &'static str, source: impl Into<RenderFailure>) -> Self {
        Self::Construction {
            renderer,
            source: source.into(),
        }
    }

    /// The content pass named `pass` failed.
    pub fn pass(pass: &'static str, source: impl Into<RenderFailure>) -> Self {
        Self::Pass {
            pass,
            source: source.into(),
        }
    }

    /// How the frame that hit this error is classified.
    pub fn failure(&self) -> FrameFailure {
        match self {
            Self::CommandContext(_)
            | Self::RenderTarget(_)
            | Self::Encoder(_)
            | Self::DepthState(_) => FrameFailure::ResourceAcquisition,
            Self::Construction { .. } => FrameFailure::Construction,
            Self::Pass { pass, .. } => FrameFailure::RenderPass { pass: *pass },
            Self::NoDrawable => FrameFailure::PresentationUnavailable,
        }
    }
}

/// Why a frame was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFailure {
    /// Command context, render target, encoder or depth state unavailable.
    ResourceAcquisition,
    /// A content pass failed; later passes and presentation were skipped.
    RenderPass {
        /// Name of the failing pass.
        pass: &'static str,
    },
    /// No drawable surface; an expected transient condition.
    PresentationUnavailable,
    /// A renderer could not be (re)built.
    Construction,
}

impl FrameFailure {
    /// Whether the failure is reported on the event bus.
    pub fn is_published(self) -> bool {
        !matches!(self, Self::PresentationUnavailable)
    }

    /// Message carried by the published error event, if there is one.
    pub fn message(self) -> Option<String> {
        match self {
            Self::ResourceAcquisition => Some("Failed to acquire frame resources".to_owned()),
            Self::RenderPass { pass } => Some(format!("Failed to render {pass} pass")),
            Self::Construction => Some("Failed to construct renderer".to_owned()),
            Self::PresentationUnavailable => None,
        }
    }
}
