//! Drawing the city.
//!
//! [`RenderBackend`] is the seam between the frame loop in
//! [`crate::session`] and whatever puts pixels on screen. The wgpu
//! implementation, [`scene_renderer::SceneRenderer`], bakes the static
//! scene into vertex batches once ([`mesh`]) and re-renders it every frame
//! with the current camera and packed lights ([`lights`]).

pub mod lights;
pub mod mesh;
pub mod scene_renderer;

use crate::camera::Camera;
use crate::scene::Scene;

/// A target the session can draw frames into.
pub trait RenderBackend {
    /// Failure to produce a frame.
    type Error;

    /// Upload a scene, replacing any previous one.
    fn load_scene(&mut self, scene: &Scene);

    /// Update the view for the next frame.
    fn set_camera(&mut self, camera: &Camera);

    /// Match the drawable to a new viewport size.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame with the current scene and camera.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when no frame could be produced.
    fn render(&mut self) -> Result<(), Self::Error>;
}
