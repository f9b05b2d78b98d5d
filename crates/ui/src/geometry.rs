//! Drawable output of the layout tree.

use bytemuck::{Pod, Zeroable};
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Array texture a quad samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureSource {
    /// GUI sprite sheets (icons, widgets), 256x256 per layer.
    Gui,
    /// Font glyphs, one 8x8 glyph per layer.
    Font,
    /// Item icons, one 16x16 icon per layer.
    Items,
}

impl TextureSource {
    /// Size in pixels of one layer of the array texture.
    pub const fn layer_size(self) -> IVec2 {
        match self {
            Self::Gui => IVec2::new(256, 256),
            Self::Font => IVec2::new(8, 8),
            Self::Items => IVec2::new(16, 16),
        }
    }
}

/// Axis-aligned textured rectangle in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    /// Top-left corner on screen.
    pub position: IVec2,
    /// Size on screen.
    pub size: IVec2,
    /// Top-left corner of the sampled region, in texture pixels.
    pub uv_origin: IVec2,
    /// Size of the sampled region, in texture pixels.
    pub uv_size: IVec2,
    /// Array texture layer.
    pub layer: u32,
    /// RGBA multiplier.
    pub tint: [f32; 4],
}

impl Quad {
    /// White tint.
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// Quads sharing one texture source, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryBatch {
    pub texture: TextureSource,
    pub quads: Vec<Quad>,
}

/// Vertex uploaded for GUI rendering.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GuiVertex {
    /// Screen position in physical pixels, origin top-left.
    pub position: [f32; 2],
    /// Normalized texture coordinates within the layer.
    pub uv: [f32; 2],
    pub layer: u32,
    pub tint: [f32; 4],
}

impl GeometryBatch {
    /// Triangle list (six vertices per quad) scaled by the GUI scale factor.
    pub fn vertices(&self, scale: i32) -> Vec<GuiVertex> {
        let layer_size = self.texture.layer_size().as_vec2();
        let scale = scale as f32;
        let mut vertices = Vec::with_capacity(self.quads.len() * 6);

        for quad in &self.quads {
            let min = quad.position.as_vec2() * scale;
            let max = (quad.position + quad.size).as_vec2() * scale;
            let uv_min = quad.uv_origin.as_vec2() / layer_size;
            let uv_max = (quad.uv_origin + quad.uv_size).as_vec2() / layer_size;

            let corner = |x: f32, y: f32, u: f32, v: f32| GuiVertex {
                position: [x, y],
                uv: [u, v],
                layer: quad.layer,
                tint: quad.tint,
            };
            let top_left = corner(min.x, min.y, uv_min.x, uv_min.y);
            let top_right = corner(max.x, min.y, uv_max.x, uv_min.y);
            let bottom_left = corner(min.x, max.y, uv_min.x, uv_max.y);
            let bottom_right = corner(max.x, max.y, uv_max.x, uv_max.y);

            vertices.extend_from_slice(&[
                top_left,
                bottom_left,
                top_right,
                top_right,
                bottom_left,
                bottom_right,
            ]);
        }

        vertices
    }
}

/// Collects quads into batches, starting a new batch whenever the texture changes.
#[derive(Debug, Default)]
pub struct GeometryBuilder {
    batches: Vec<GeometryBatch>,
}

impl GeometryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, texture: TextureSource, quad: Quad) {
        match self.batches.last_mut() {
            Some(batch) if batch.texture == texture => batch.quads.push(quad),
            _ => self.batches.push(GeometryBatch {
                texture,
                quads: vec![quad],
            }),
        }
    }

    pub fn finish(self) -> Vec<GeometryBatch> {
        self.batches
    }
}
