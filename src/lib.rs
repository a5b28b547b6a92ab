// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-driven walk through a procedural night-time city, with
//! information billboards and an accessible text alternative.
//!
//! The camera travels down a long street toward −Z. Wheel and keyboard
//! input set a damped travel target; a slow drift keeps the view moving
//! unless motion is paused (the default under reduced motion). Buildings
//! with lit windows line both sides, and billboards rendered from CPU
//! composed textures stand along the way.
//!
//! # Key entry points
//!
//! - [`session::Session`] - one mounted view: scene, controller, input, UI
//! - [`scene::ProceduralCityBuilder`] and [`scene::BillboardFactory`] -
//!   scene population
//! - [`texture::TextureComposer`] - billboard face rasterization
//! - [`camera::CameraMotionController`] - travel, drift, pause, reset
//! - [`options::Options`] - runtime configuration with TOML presets
//! - [`renderer::RenderBackend`] - where frames go; the wgpu
//!   implementation lives in [`renderer::scene_renderer`]
//!
//! # Architecture
//!
//! Everything is single-threaded and frame-driven. Input events become
//! [`input::CityCommand`]s, the controller applies them as pure state
//! changes, and [`ui`] pushes the resulting labels and indicator values to
//! the host. Each frame the session advances the controller, updates the
//! camera, and hands it to the render backend. The scene is built once at
//! mount and never changes.

pub mod camera;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod session;
pub mod texture;
pub mod ui;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::CityError;
pub use session::Session;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
