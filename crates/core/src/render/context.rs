//! One-time GL state configuration and the reusable error check.
//!
//! Every state-mutating setup call in the pipeline is followed by
//! [`check_gl`], which drains `glGetError` and maps a non-clean status to a
//! fatal [`PreviewError::Gl`]. A GL error after setup indicates a
//! driver/state mismatch the preview cannot recover from.

use crate::error::{GlErrorKind, PreviewError};

/// Background clear color (dark gray, opaque).
pub const BACKGROUND_COLOR: [f32; 4] = [0.125, 0.125, 0.125, 1.0];

/// Checks `glGetError` and fails on any non-clean status.
///
/// # Errors
///
/// Returns [`PreviewError::Gl`] with the mapped [`GlErrorKind`] when the
/// context reports anything but `GL_NO_ERROR`.
#[allow(unsafe_code)]
pub fn check_gl(gl: &glow::Context) -> Result<(), PreviewError> {
    use glow::HasContext;

    // SAFETY: get_error has no preconditions beyond a live context.
    let code = unsafe { gl.get_error() };
    match GlErrorKind::from_raw(code) {
        None => Ok(()),
        Some(kind) => Err(PreviewError::Gl(kind)),
    }
}

/// Applies the fixed GL state the preview renders with: the background
/// clear color and standard alpha blending.
///
/// Called once after context creation, before any resources are built.
///
/// # Errors
///
/// Returns [`PreviewError::Gl`] if the context rejects the state calls.
#[allow(unsafe_code)]
pub fn configure(gl: &glow::Context) -> Result<(), PreviewError> {
    use glow::HasContext;

    let [r, g, b, a] = BACKGROUND_COLOR;

    // SAFETY: glow wraps raw GL calls as unsafe. All arguments here are
    // valid constants; check_gl verifies the context accepted them.
    unsafe {
        gl.clear_color(r, g, b, a);
        gl.enable(glow::BLEND);
        gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
    }

    check_gl(gl)
}
