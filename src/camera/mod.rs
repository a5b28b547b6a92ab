//! Camera system for scroll-driven corridor travel.
//!
//! Provides the perspective camera, a damped travel controller with
//! pause/reset, and the transient scroll-energy indicator value.

/// Damped travel controller and its pause state machine.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Decaying scroll energy feeding the speed indicator.
pub mod scroll_energy;

pub use controller::{
    CameraMotionController, CameraState, CommandEffect, MotionState,
    TravelBounds,
};
pub use self::core::{Camera, CameraUniform};
pub use scroll_energy::ScrollEnergy;
