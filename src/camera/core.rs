use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position (w unused).
    pub eye: [f32; 4],
}

impl Camera {
    /// Camera at the start of the corridor with the given projection
    /// options and viewport size.
    #[must_use]
    pub fn new(options: &CameraOptions, width: u32, height: u32) -> Self {
        let eye = Vec3::new(0.0, options.eye_height, 0.0);
        Self {
            eye,
            target: eye - Vec3::Z * options.look_ahead,
            up: Vec3::Y,
            aspect: aspect_ratio(width, height),
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        self.build_projection() * view
    }

    /// Perspective projection with [0,1] depth (wgpu convention).
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Update the aspect ratio after the viewport changed size. Zero-sized
    /// dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = aspect_ratio(width, height);
        }
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.eye = camera.eye.extend(1.0).to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_corridor_origin_looking_down_negative_z() {
        let camera = Camera::new(&CameraOptions::default(), 800, 400);
        assert_eq!(camera.eye, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(camera.target, Vec3::new(0.0, 5.0, -100.0));
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn resize_ignores_zero_dimensions() {
        let mut camera = Camera::new(&CameraOptions::default(), 800, 400);
        camera.resize(0, 300);
        assert_eq!(camera.aspect, 2.0);
        camera.resize(300, 300);
        assert_eq!(camera.aspect, 1.0);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let camera = Camera::new(&CameraOptions::default(), 800, 600);
        let clip = camera.build_matrix() * camera.target.extend(1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
