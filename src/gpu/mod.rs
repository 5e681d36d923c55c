//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable instance buffers
//! and render-target textures.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Off-screen color and depth targets.
pub mod texture;
