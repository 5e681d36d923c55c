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
// Complexity limits (thresholds in clippy.toml)
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

//! Interactive viewer for a single 3D exhibit asset.
//!
//! Vitrine loads one glTF model, lets a visitor orbit and zoom around it,
//! place point annotations on its surface, tour those annotations in order,
//! measure distances between two picked surface points and export a
//! screenshot.
//!
//! # Key entry points
//!
//! - [`engine::ExhibitEngine`] - owns the whole session state and executes
//!   [`engine::ExhibitCommand`]s
//! - [`input::InputProcessor`] - turns raw pointer/key events into commands
//! - [`options::Options`] - runtime configuration (camera, tour, display,
//!   key bindings)
//! - [`picking`] - screen-to-surface ray casting
//!
//! # Architecture
//!
//! Everything runs on one logical thread. The host calls
//! [`engine::ExhibitEngine::tick`] once per display refresh and routes input
//! events through [`engine::ExhibitEngine::execute`] between ticks. The only
//! background work is the one-time model load, which reports progress over a
//! channel drained by `tick`.
//!
//! With the `viewer` feature the crate also provides a winit window and a
//! wgpu renderer ([`viewer::Viewer`]).

pub mod annotation;
pub mod camera;
pub mod engine;
pub mod error;
#[cfg(feature = "viewer")]
pub mod gpu;
pub mod input;
pub mod interaction;
pub mod model;
pub mod options;
pub mod overlay;
pub mod picking;
#[cfg(feature = "viewer")]
pub mod renderer;
pub mod tour;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{
    EngineEffect, ExhibitCommand, ExhibitEngine, FrameOutput, LoadState,
};
pub use error::{InteractionError, VitrineError};
pub use input::{InputEvent, InputProcessor, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
