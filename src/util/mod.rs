//! Shared utilities.
//!
//! Color conversion helpers used by the options defaults, the scene
//! builders, the texture composer, and the renderer.

pub mod color;
