#![deny(unsafe_code)]
//! Core types for the shadeview shader-preview runner.
//!
//! Provides the keyboard-driven `Camera` state, frame timing (the cyclic
//! `TIME` uniform, FPS reporting, frame pacing), and the GL error taxonomy.
//! With the `render` feature enabled it adds the GL pipeline: one-time
//! state configuration, shader program handling, the clip-space quad, the
//! reduced-resolution pixelation target, and the frame-loop runner with its
//! window-backend seam.

pub mod camera;
pub mod error;
pub mod timing;

#[cfg(feature = "render")]
pub mod render;

#[cfg(feature = "render")]
pub mod runner;

pub use camera::{Camera, CameraInput};
pub use error::{GlErrorKind, PreviewError};

#[cfg(feature = "render")]
pub use runner::{Previewer, WindowBackend};
