//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, texture uploads, and the
//! bind-group and pipeline boilerplate shared by the scene renderer.

/// Shared wgpu boilerplate helpers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment and sampled billboard textures.
pub mod texture;
