//! Error types for the shadeview core.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A non-`GL_NO_ERROR` status reported by `glGetError`, mapped to a named kind.
///
/// The mapping is pure integer matching, so it is usable (and testable)
/// without a live GL context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlErrorKind {
    /// An enum argument was out of range (`GL_INVALID_ENUM`).
    InvalidEnum,
    /// A numeric argument was out of range (`GL_INVALID_VALUE`).
    InvalidValue,
    /// The operation is not allowed in the current state (`GL_INVALID_OPERATION`).
    InvalidOperation,
    /// The framebuffer object is not complete (`GL_INVALID_FRAMEBUFFER_OPERATION`).
    InvalidFramebufferOperation,
    /// Not enough memory to execute the command (`GL_OUT_OF_MEMORY`).
    OutOfMemory,
    /// A code this mapping does not recognize.
    Unknown(u32),
}

// Raw `glGetError` codes. These are ABI-stable across every OpenGL
// implementation, which keeps this module free of the GL bindings; the
// render tests cross-check them against glow's constants.
const GL_NO_ERROR: u32 = 0;
const GL_INVALID_ENUM: u32 = 0x0500;
const GL_INVALID_VALUE: u32 = 0x0501;
const GL_INVALID_OPERATION: u32 = 0x0502;
const GL_OUT_OF_MEMORY: u32 = 0x0505;
const GL_INVALID_FRAMEBUFFER_OPERATION: u32 = 0x0506;

impl GlErrorKind {
    /// Maps a raw `glGetError` code to an error kind.
    ///
    /// Returns `None` for `GL_NO_ERROR`; every other value maps to a kind,
    /// with unrecognized codes preserved in [`GlErrorKind::Unknown`].
    pub fn from_raw(code: u32) -> Option<Self> {
        match code {
            GL_NO_ERROR => None,
            GL_INVALID_ENUM => Some(Self::InvalidEnum),
            GL_INVALID_VALUE => Some(Self::InvalidValue),
            GL_INVALID_OPERATION => Some(Self::InvalidOperation),
            GL_INVALID_FRAMEBUFFER_OPERATION => Some(Self::InvalidFramebufferOperation),
            GL_OUT_OF_MEMORY => Some(Self::OutOfMemory),
            other => Some(Self::Unknown(other)),
        }
    }
}

impl fmt::Display for GlErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnum => write!(f, "GL_INVALID_ENUM"),
            Self::InvalidValue => write!(f, "GL_INVALID_VALUE"),
            Self::InvalidOperation => write!(f, "GL_INVALID_OPERATION"),
            Self::InvalidFramebufferOperation => write!(f, "GL_INVALID_FRAMEBUFFER_OPERATION"),
            Self::OutOfMemory => write!(f, "GL_OUT_OF_MEMORY"),
            Self::Unknown(code) => write!(f, "unknown GL error 0x{code:04X}"),
        }
    }
}

/// Errors produced by preview setup and rendering.
///
/// Every variant is fatal to the preview: a failed shader invalidates the
/// rendering contract for all subsequent frames, so callers propagate these
/// to the process boundary instead of retrying.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// A shader source file could not be read.
    #[error("failed to read shader source {}: {message}", path.display())]
    Source {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// The underlying I/O error text.
        message: String,
    },

    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    Compile {
        /// The shader stage that failed ("vertex" or "fragment").
        stage: &'static str,
        /// The driver's info log describing the error.
        log: String,
    },

    /// A program failed to link.
    #[error("shader link error:\n{0}")]
    Link(String),

    /// The linked program does not declare the vertex-position attribute.
    #[error("vertex attribute not found: {0}")]
    MissingAttribute(&'static str),

    /// `glGetError` reported a non-`GL_NO_ERROR` status after a GL call.
    #[error("GL error: {0}")]
    Gl(GlErrorKind),

    /// The offscreen framebuffer did not report `FRAMEBUFFER_COMPLETE`.
    #[error("framebuffer incomplete: status 0x{0:04X}")]
    FramebufferIncomplete(u32),

    /// A GL object (buffer, shader, program, framebuffer, renderbuffer)
    /// could not be allocated.
    #[error("GL resource allocation failed: {0}")]
    Resource(String),
}
