//! View frustum culling.

use glam::{Mat4, Vec3, Vec4};
use quartz_world::{ChunkPos, CHUNK_SIZE_X, CHUNK_SIZE_Z};

/// Height of a chunk column in blocks.
const CHUNK_HEIGHT: f32 = 256.0;

/// Six clip planes extracted from a view-projection matrix.
///
/// Each plane is `(normal, distance)` with the normal pointing into the volume, so a
/// point is inside when `normal · p + distance >= 0` for every plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Vec4; 6],
}

impl Default for Frustum {
    /// A frustum that contains everything.
    fn default() -> Self {
        Self {
            planes: [Vec4::new(0.0, 0.0, 0.0, 1.0); 6],
        }
    }
}

impl Frustum {
    /// Create frustum from view-projection matrix (clip depth 0..1).
    pub fn from_matrix(view_projection: &Mat4) -> Self {
        let x = view_projection.row(0);
        let y = view_projection.row(1);
        let z = view_projection.row(2);
        let w = view_projection.row(3);

        let planes = [w + x, w - x, w + y, w - y, z, w - z].map(normalize_plane);
        Self { planes }
    }

    /// Whether `point` is inside every plane.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
    }

    /// Whether any part of the box may be visible.
    pub fn intersects_aabb(&self, min: Vec3, max: Vec3) -> bool {
        self.planes.iter().all(|plane| {
            let normal = plane.truncate();
            let positive = Vec3::select(normal.cmpge(Vec3::ZERO), max, min);
            normal.dot(positive) + plane.w >= 0.0
        })
    }

    /// Check if a chunk column is visible.
    pub fn is_chunk_visible(&self, chunk: ChunkPos) -> bool {
        let min = Vec3::new(
            (chunk.x * CHUNK_SIZE_X) as f32,
            0.0,
            (chunk.z * CHUNK_SIZE_Z) as f32,
        );
        let max = min + Vec3::new(CHUNK_SIZE_X as f32, CHUNK_HEIGHT, CHUNK_SIZE_Z as f32);
        self.intersects_aabb(min, max)
    }
}

fn normalize_plane(plane: Vec4) -> Vec4 {
    let length = plane.truncate().length();
    if length > f32::EPSILON {
        plane / length
    } else {
        plane
    }
}
