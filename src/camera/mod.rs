//! Camera system for viewing the exhibit.
//!
//! Provides a perspective camera, an orbit controller (rotate, pan, zoom,
//! turntable spin, fit to bounds) and an eased pose animator.

/// Eased camera flights between poses.
pub mod animator;
/// Orbital camera controller managing rotation, pan and zoom.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;

pub use animator::{CameraAnimator, CameraPose};
pub use controller::OrbitController;
pub use self::core::{Camera, CameraUniform};
