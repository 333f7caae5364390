//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success (clean window-close shutdown)
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: render error (GL state, shader compile/link, framebuffer)
//! - 11: I/O error (shader source read)
//! - 12: windowing-system or GL context creation error

use shadeview_core::PreviewError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A render-level error (GL state, shader compile/link, framebuffer).
    Render(PreviewError),
    /// An I/O error (shader source read).
    Io(String),
    /// A windowing-system error (GLFW init, window or context creation).
    Window(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render(_) => 10,
            CliError::Io(_) => 11,
            CliError::Window(_) => 12,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Render(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Window(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<PreviewError> for CliError {
    fn from(e: PreviewError) -> Self {
        match e {
            PreviewError::Source { .. } => CliError::Io(e.to_string()),
            other => CliError::Render(other),
        }
    }
}
