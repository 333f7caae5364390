//! OpenGL rendering infrastructure.
//!
//! This module is only available when the `render` feature is enabled.
//! It provides the one-time GL state setup and error check, shader program
//! handling with resolved uniform locations, the static clip-space quad,
//! and the low-resolution pixelation target with its upscaling blit.
//!
//! # Module overview
//!
//! - [`context`] -- One-time GL state configuration and the `check_gl` error check.
//! - [`shader`] -- Shader compilation, linking, and uniform resolution.
//! - [`quad`] -- Clip-space quad constants and GPU geometry.
//! - [`pixelate`] -- Reduced-resolution offscreen target and window blit.

pub mod context;
pub mod pixelate;
pub mod quad;
pub mod shader;

// Re-export key items at the render module level for convenience.
pub use context::{check_gl, configure, BACKGROUND_COLOR};
pub use pixelate::{PixelateTarget, PIXELATE_SCALE};
pub use quad::{QuadGeometry, QUAD_INDEX_COUNT, QUAD_INDICES, QUAD_VERTICES};
pub use shader::{compile_file, compile_shader, link_program, ShaderProgram};
