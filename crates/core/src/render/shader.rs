//! Shader compilation, linking, and uniform resolution.
//!
//! A preview program is a vertex/fragment pair compiled from source files
//! on disk. Compilation and linking are fatal on failure: the driver's info
//! log is captured into the error and there is no retry or hot-reload path.
//! After linking, the locations of the contract uniforms and the
//! vertex-position attribute are resolved by name exactly once and cached
//! for the program's lifetime.

use std::fs;
use std::path::Path;

use glam::Vec3;

use crate::error::PreviewError;

/// Normalized cyclic time in [0, 1).
pub const UNIFORM_TIME: &str = "TIME";
/// Window size in pixels (vec2).
pub const UNIFORM_WINDOW: &str = "WINDOW";
/// Camera eye position (vec3).
pub const UNIFORM_POSITION: &str = "POSITION";
/// Camera aim point (vec3).
pub const UNIFORM_AIM: &str = "AIM";
/// Clip-space vertex position input (vec2).
pub const ATTRIB_POSITION: &str = "VERT_IN_POSITION";

fn stage_name(shader_type: u32) -> &'static str {
    match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

/// Compiles a single shader stage from in-memory source.
///
/// # Errors
///
/// Returns [`PreviewError::Compile`] with the driver's info log if the
/// source fails to compile, or [`PreviewError::Resource`] if the shader
/// object cannot be allocated. The shader object is cleaned up on the
/// failure path.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, PreviewError> {
    use glow::HasContext;

    // SAFETY: glow wraps raw GL calls as unsafe. shader_type is a valid
    // stage constant and source is a valid UTF-8 string; the shader is
    // deleted on the failure path.
    let shader = unsafe { gl.create_shader(shader_type).map_err(PreviewError::Resource)? };

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    let compiled = unsafe { gl.get_shader_compile_status(shader) };

    if compiled {
        Ok(shader)
    } else {
        let log = unsafe { gl.get_shader_info_log(shader) };
        unsafe { gl.delete_shader(shader) };
        Err(PreviewError::Compile {
            stage: stage_name(shader_type),
            log,
        })
    }
}

/// Reads a shader source file and compiles it.
///
/// The source text is held only for the duration of the compile call and
/// released on both the success and failure paths.
///
/// # Errors
///
/// Returns [`PreviewError::Source`] if the file cannot be read, or any
/// error from [`compile_shader`].
pub fn compile_file(
    gl: &glow::Context,
    shader_type: u32,
    path: &Path,
) -> Result<glow::Shader, PreviewError> {
    let source = fs::read_to_string(path).map_err(|e| PreviewError::Source {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    compile_shader(gl, shader_type, &source)
}

/// Links a vertex and fragment shader into a program.
///
/// Both shader objects are deleted after the link attempt regardless of
/// its outcome; a successfully linked program retains its own compiled
/// code.
///
/// # Errors
///
/// Returns [`PreviewError::Link`] with the driver's info log if linking
/// fails, or [`PreviewError::Resource`] if the program object cannot be
/// allocated.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
) -> Result<glow::Program, PreviewError> {
    use glow::HasContext;

    // SAFETY: glow wraps raw GL calls as unsafe. vertex and fragment are
    // valid handles from compile_shader; both are deleted below on every
    // path, and the program is deleted on the failure path.
    let program = match unsafe { gl.create_program() } {
        Ok(program) => program,
        Err(message) => {
            unsafe {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
            }
            return Err(PreviewError::Resource(message));
        }
    };

    unsafe {
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        // The program owns its compiled code from here on.
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);
    }

    let linked = unsafe { gl.get_program_link_status(program) };

    if linked {
        Ok(program)
    } else {
        let log = unsafe { gl.get_program_info_log(program) };
        unsafe { gl.delete_program(program) };
        Err(PreviewError::Link(log))
    }
}

/// Uniform locations resolved once after linking.
///
/// A `None` location means the shader does not declare that uniform;
/// writes to it are silently skipped, so a fragment shader that ignores
/// the camera still previews fine.
#[derive(Debug)]
struct PreviewUniforms {
    time: Option<glow::UniformLocation>,
    window: Option<glow::UniformLocation>,
    position: Option<glow::UniformLocation>,
    aim: Option<glow::UniformLocation>,
}

/// A linked vertex+fragment program with its resolved uniform and
/// attribute locations.
pub struct ShaderProgram {
    program: glow::Program,
    uniforms: PreviewUniforms,
    position_attrib: u32,
}

impl ShaderProgram {
    /// Compiles both stages from source files and links them.
    ///
    /// Uniform locations for `TIME`, `WINDOW`, `POSITION`, and `AIM` and
    /// the location of the `VERT_IN_POSITION` attribute are resolved here,
    /// exactly once, and stay valid for the program's lifetime.
    ///
    /// # Errors
    ///
    /// Returns a read, compile, or link error from the helpers above, or
    /// [`PreviewError::MissingAttribute`] if the vertex shader does not
    /// declare `VERT_IN_POSITION`.
    #[allow(unsafe_code)]
    pub fn from_files(
        gl: &glow::Context,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self, PreviewError> {
        use glow::HasContext;

        let vertex = compile_file(gl, glow::VERTEX_SHADER, vertex_path)?;
        let fragment = match compile_file(gl, glow::FRAGMENT_SHADER, fragment_path) {
            Ok(fragment) => fragment,
            Err(e) => {
                // SAFETY: vertex is a valid handle from a successful compile.
                unsafe { gl.delete_shader(vertex) };
                return Err(e);
            }
        };

        let program = link_program(gl, vertex, fragment)?;

        // SAFETY: program is a valid handle from a successful link; name
        // lookups have no other preconditions.
        let (uniforms, position_attrib) = unsafe {
            let uniforms = PreviewUniforms {
                time: gl.get_uniform_location(program, UNIFORM_TIME),
                window: gl.get_uniform_location(program, UNIFORM_WINDOW),
                position: gl.get_uniform_location(program, UNIFORM_POSITION),
                aim: gl.get_uniform_location(program, UNIFORM_AIM),
            };
            let position_attrib = gl.get_attrib_location(program, ATTRIB_POSITION);
            (uniforms, position_attrib)
        };

        let Some(position_attrib) = position_attrib else {
            unsafe { gl.delete_program(program) };
            return Err(PreviewError::MissingAttribute(ATTRIB_POSITION));
        };

        Ok(Self {
            program,
            uniforms,
            position_attrib,
        })
    }

    /// Makes this program current.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.program is a valid linked program handle.
        unsafe { gl.use_program(Some(self.program)) };
    }

    /// Location of the `VERT_IN_POSITION` attribute, for vertex setup.
    pub fn position_attrib(&self) -> u32 {
        self.position_attrib
    }

    /// Uploads the cyclic `TIME` uniform. Skipped if the shader does not
    /// declare it.
    #[allow(unsafe_code)]
    pub fn set_time(&self, gl: &glow::Context, value: f32) {
        use glow::HasContext;

        if let Some(location) = &self.uniforms.time {
            // SAFETY: location was resolved from this program after linking.
            unsafe { gl.uniform_1_f32(Some(location), value) };
        }
    }

    /// Uploads the `WINDOW` size uniform (done once; the window is fixed-size).
    #[allow(unsafe_code)]
    pub fn set_window(&self, gl: &glow::Context, width: f32, height: f32) {
        use glow::HasContext;

        if let Some(location) = &self.uniforms.window {
            // SAFETY: location was resolved from this program after linking.
            unsafe { gl.uniform_2_f32(Some(location), width, height) };
        }
    }

    /// Uploads the camera `POSITION` uniform.
    #[allow(unsafe_code)]
    pub fn set_position(&self, gl: &glow::Context, value: Vec3) {
        use glow::HasContext;

        if let Some(location) = &self.uniforms.position {
            // SAFETY: location was resolved from this program after linking.
            unsafe { gl.uniform_3_f32(Some(location), value.x, value.y, value.z) };
        }
    }

    /// Uploads the camera `AIM` uniform.
    #[allow(unsafe_code)]
    pub fn set_aim(&self, gl: &glow::Context, value: Vec3) {
        use glow::HasContext;

        if let Some(location) = &self.uniforms.aim {
            // SAFETY: location was resolved from this program after linking.
            unsafe { gl.uniform_3_f32(Some(location), value.x, value.y, value.z) };
        }
    }

    /// Deletes the program, releasing its GPU resources.
    ///
    /// Must be called before dropping the `ShaderProgram` for deterministic
    /// cleanup; GL objects have no destructor of their own.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.program is a valid handle from from_files.
        unsafe { gl.delete_program(self.program) };
    }
}
