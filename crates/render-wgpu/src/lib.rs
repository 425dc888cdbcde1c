//! wgpu render backend for the escape-time fractal viewer.
//!
//! The pipeline is built once at startup; after that each frame uploads
//! the current viewport snapshot as uniforms and draws a full-screen quad
//! so the fragment stage evaluates the escape function once per pixel.
//!
//! # Invariants
//! - The renderer never mutates the viewport; it reads a snapshot per frame.
//! - All failure modes are startup-time. The draw path is infallible.

mod context;
mod error;
mod renderer;
mod shaders;

pub use context::GpuContext;
pub use error::RenderError;
pub use renderer::EscapeRenderer;
