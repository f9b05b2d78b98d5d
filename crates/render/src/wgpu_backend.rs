//! [`GpuBackend`] on top of wgpu.

use std::sync::Arc;

use anyhow::{Context, Result};
use glam::UVec2;
use winit::window::Window;

use crate::error::RenderError;
use crate::gpu::{
    CullMode, DepthCompare, DepthDescriptor, FrontFace, GpuBackend, RasterConfig, RenderTarget,
};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Window surface, device and depth buffer shared by every frame.
pub struct WgpuBackend {
    /// Window surface the renderer presents into.
    surface: wgpu::Surface<'static>,
    /// Logical GPU device used for issuing commands.
    device: wgpu::Device,
    /// Command queue for submitting work to the GPU.
    queue: wgpu::Queue,
    /// Surface configuration describing swapchain parameters.
    config: wgpu::SurfaceConfiguration,
    depth_texture: wgpu::Texture,
    clear_color: wgpu::Color,
    pending_present: Option<wgpu::SurfaceTexture>,
}

impl WgpuBackend {
    /// Create the surface, device and queue for a window.
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to find suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("quartz device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("Surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo, // VSync
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_texture = create_depth_texture(&device, &config);

        tracing::info!(
            width = config.width,
            height = config.height,
            format = ?surface_format,
            "GPU rendering context initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_texture,
            clear_color: wgpu::Color {
                r: 0.47,
                g: 0.65,
                b: 1.0,
                a: 1.0,
            },
            pending_present: None,
        })
    }

    /// Device that owns every GPU resource.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Queue that frames are submitted to.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Color format of the window surface.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Color the first pass of each frame clears to.
    pub fn set_clear_color(&mut self, color: wgpu::Color) {
        self.clear_color = color;
    }

    /// Resize the surface and depth buffer. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = create_depth_texture(&self.device, &self.config);
    }
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    })
}

/// The swapchain image acquired for a frame.
pub struct WgpuTarget {
    surface_texture: Option<wgpu::SurfaceTexture>,
    size: UVec2,
}

impl WgpuTarget {
    /// Backing texture, until the drawable has been taken for presentation.
    pub fn texture(&self) -> Option<&wgpu::Texture> {
        self.surface_texture.as_ref().map(|frame| &frame.texture)
    }
}

impl RenderTarget for WgpuTarget {
    fn extent(&self) -> UVec2 {
        self.size
    }
}

/// Attachments and pipeline state shared by the passes of one frame.
pub struct WgpuEncoder {
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    clear_color: wgpu::Color,
    clear_pending: bool,
    depth_stencil: Option<wgpu::DepthStencilState>,
    primitive: wgpu::PrimitiveState,
}

impl WgpuEncoder {
    /// Begin a render pass on the frame's attachments. The first pass of the frame
    /// clears color and depth; later passes load them.
    pub fn begin_pass<'a>(
        &'a mut self,
        commands: &'a mut wgpu::CommandEncoder,
        label: &str,
    ) -> wgpu::RenderPass<'a> {
        let clear = std::mem::replace(&mut self.clear_pending, false);
        let this: &'a Self = self;

        let (color_load, depth_load) = if clear {
            (
                wgpu::LoadOp::Clear(this.clear_color),
                wgpu::LoadOp::Clear(1.0),
            )
        } else {
            (wgpu::LoadOp::Load, wgpu::LoadOp::Load)
        };

        commands.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &this.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: color_load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &this.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: depth_load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        })
    }

    /// Depth state pipelines must be built with this frame.
    pub fn depth_stencil(&self) -> Option<&wgpu::DepthStencilState> {
        self.depth_stencil.as_ref()
    }

    /// Rasterizer state pipelines must be built with this frame.
    pub fn primitive(&self) -> wgpu::PrimitiveState {
        self.primitive
    }
}

impl GpuBackend for WgpuBackend {
    type Commands = wgpu::CommandEncoder;
    type Target = WgpuTarget;
    type Encoder = WgpuEncoder;
    type Drawable = wgpu::SurfaceTexture;
    type DepthState = wgpu::DepthStencilState;

    fn make_depth_state(
        &mut self,
        descriptor: &DepthDescriptor,
    ) -> Result<Self::DepthState, RenderError> {
        let depth_compare = match descriptor.compare {
            DepthCompare::Less => wgpu::CompareFunction::Less,
            DepthCompare::LessEqual => wgpu::CompareFunction::LessEqual,
            DepthCompare::Greater => wgpu::CompareFunction::Greater,
            DepthCompare::Always => wgpu::CompareFunction::Always,
        };
        Ok(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: descriptor.write_enabled,
            depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        })
    }

    fn make_commands(&mut self) -> Result<Self::Commands, RenderError> {
        Ok(self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            }))
    }

    fn current_target(&mut self) -> Result<Self::Target, RenderError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(WgpuTarget {
                surface_texture: Some(frame),
                size: UVec2::new(self.config.width, self.config.height),
            }),
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                tracing::debug!(?error, "surface needs reconfiguring");
                self.reconfigure();
                Err(RenderError::RenderTarget(error.to_string()))
            }
            Err(error) => Err(RenderError::RenderTarget(error.to_string())),
        }
    }

    fn make_encoder(
        &mut self,
        _commands: &mut Self::Commands,
        target: &Self::Target,
    ) -> Result<Self::Encoder, RenderError> {
        let texture = target
            .texture()
            .ok_or_else(|| RenderError::Encoder("surface texture already presented".into()))?;

        Ok(WgpuEncoder {
            color_view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            depth_view: self
                .depth_texture
                .create_view(&wgpu::TextureViewDescriptor::default()),
            clear_color: self.clear_color,
            clear_pending: true,
            depth_stencil: None,
            primitive: wgpu::PrimitiveState::default(),
        })
    }

    fn configure_raster(
        &mut self,
        encoder: &mut Self::Encoder,
        depth: &Self::DepthState,
        raster: &RasterConfig,
    ) {
        encoder.depth_stencil = Some(depth.clone());
        encoder.primitive = wgpu::PrimitiveState {
            front_face: match raster.front_face {
                FrontFace::Ccw => wgpu::FrontFace::Ccw,
                FrontFace::Cw => wgpu::FrontFace::Cw,
            },
            cull_mode: match raster.cull_mode {
                CullMode::None => None,
                CullMode::Front => Some(wgpu::Face::Front),
                CullMode::Back => Some(wgpu::Face::Back),
            },
            ..wgpu::PrimitiveState::default()
        };
    }

    fn current_drawable(&mut self, target: &mut Self::Target) -> Option<Self::Drawable> {
        target.surface_texture.take()
    }

    fn end_encoding(&mut self, encoder: Self::Encoder, _commands: &mut Self::Commands) {
        // Every pass borrowed the encoder, so all of them have ended by now.
        drop(encoder);
    }

    fn present(&mut self, _commands: &mut Self::Commands, drawable: Self::Drawable) {
        // wgpu presents after submission; hold the frame until commit.
        self.pending_present = Some(drawable);
    }

    fn commit(&mut self, commands: Self::Commands) {
        self.queue.submit(std::iter::once(commands.finish()));
        if let Some(frame) = self.pending_present.take() {
            frame.present();
        }
    }
}
