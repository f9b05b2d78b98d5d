//! First-person camera with view and projection matrices.

use glam::{Mat4, Vec3};

use crate::frustum::Frustum;

/// Camera state for one frame, recomputed from the player's pose before the passes run.
#[derive(Debug, Clone)]
pub struct CameraState {
    /// Eye position in world space.
    pub position: Vec3,
    /// Radians. Zero faces south (+Z) and grows towards west.
    pub yaw: f32,
    /// Radians. Positive looks down.
    pub pitch: f32,
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Width over height.
    aspect: f32,
    near: f32,
    far: f32,
    frustum: Frustum,
}

impl CameraState {
    /// Create a camera at the origin facing south.
    pub fn new(fov_y: f32, aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov_y,
            aspect,
            near: 0.05,
            far: 1000.0,
            frustum: Frustum::default(),
        };
        camera.cache_frustum();
        camera
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Set the vertical field of view, in radians.
    pub fn set_fov_y(&mut self, fov_y: f32) {
        self.fov_y = fov_y;
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Update the aspect ratio from a target size. Zero-height targets are ignored.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Move the eye to `position`.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set yaw and pitch, in radians.
    pub fn set_rotation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
    }

    /// Get the forward direction vector.
    pub fn forward(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.sin_cos();
        Vec3::new(-yaw_sin * pitch_cos, -pitch_sin, yaw_cos * pitch_cos).normalize()
    }

    /// Build the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    /// Build the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Build combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Recompute the cached frustum from the current matrices.
    pub fn cache_frustum(&mut self) {
        self.frustum = Frustum::from_matrix(&self.view_projection_matrix());
    }

    /// Frustum as of the last [`cache_frustum`](Self::cache_frustum).
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Matrices for the GPU.
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::from_camera(self)
    }
}

/// Uniform data sent to GPU for camera transforms.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// View-projection matrix
    pub view_proj: [[f32; 4]; 4],
    /// Camera position in world space
    pub camera_pos: [f32; 4],
}

impl CameraUniform {
    /// Create camera uniform from camera.
    pub fn from_camera(camera: &CameraState) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: [camera.position.x, camera.position.y, camera.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn yaw_zero_faces_south() {
        let camera = CameraState::new(FRAC_PI_2, 1.0);
        assert!(approx(camera.forward(), Vec3::Z));
    }

    #[test]
    fn quarter_turn_faces_west_and_positive_pitch_looks_down() {
        let mut camera = CameraState::new(FRAC_PI_2, 1.0);
        camera.set_rotation(FRAC_PI_2, 0.0);
        assert!(approx(camera.forward(), -Vec3::X));

        camera.set_rotation(PI, FRAC_PI_2);
        assert!(approx(camera.forward(), -Vec3::Y));
    }

    #[test]
    fn aspect_comes_from_the_target() {
        let mut camera = CameraState::new(FRAC_PI_2, 1.0);
        camera.set_aspect(1920, 1080);
        assert!((camera.aspect() - 16.0 / 9.0).abs() < 1e-6);

        camera.set_aspect(1920, 0);
        assert!((camera.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn view_projection_is_invertible() {
        let mut camera = CameraState::new(FRAC_PI_2, 16.0 / 9.0);
        camera.set_position(Vec3::new(8.0, 65.6, -3.0));
        camera.set_rotation(0.3, -0.2);
        assert!(camera.view_projection_matrix().determinant().abs() > 0.0);
    }

    #[test]
    fn uniform_carries_the_eye_position() {
        let mut camera = CameraState::new(FRAC_PI_2, 1.0);
        camera.set_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.uniform().camera_pos, [1.0, 2.0, 3.0, 1.0]);
    }
}
