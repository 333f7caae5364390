//! The frame loop: input polling, camera updates, uniform upload,
//! offscreen rendering, presentation, and frame pacing.
//!
//! The loop is single-threaded and synchronous. Each iteration drains
//! window events, steps the camera from instantaneous key state, uploads
//! the per-frame uniforms, renders through the pixelation target, presents,
//! and sleeps off whatever remains of the frame budget. The only exit is
//! the window's close flag, checked once per iteration boundary; once set,
//! the loop returns and the owner releases GPU resources in fixed order.

use std::path::Path;
use std::thread;
use std::time::Instant;

use crate::camera::{Camera, CameraInput};
use crate::error::PreviewError;
use crate::render::context::{check_gl, configure};
use crate::render::pixelate::{PixelateTarget, PIXELATE_SCALE};
use crate::render::quad::QuadGeometry;
use crate::render::shader::ShaderProgram;
use crate::timing::{cyclic_time, remaining_budget, FpsCounter, FRAME_BUDGET, TIME_PERIOD};

/// The capability surface the loop needs from the windowing collaborator.
///
/// Object-safe so backends can be swapped behind `&mut dyn WindowBackend`
/// (the tests use a mock; the CLI supplies a GLFW-backed window).
pub trait WindowBackend {
    /// Drains pending window events. The backend's key-event handling sets
    /// the close flag on an Escape press.
    fn poll_events(&mut self);

    /// Whether a close has been requested (Escape or an external request).
    fn should_close(&self) -> bool;

    /// Presents the rendered frame.
    fn swap_buffers(&mut self);

    /// Samples the instantaneous pressed state of the movement keys.
    fn camera_input(&self) -> CameraInput;
}

/// Owns every GPU resource of the preview plus the camera, and drives the
/// per-frame protocol.
///
/// Created once at startup, run until the window closes, then destroyed
/// exactly once -- release happens in reverse creation order, before the
/// windowing subsystem is torn down.
pub struct Previewer {
    program: ShaderProgram,
    quad: QuadGeometry,
    target: PixelateTarget,
    camera: Camera,
    window_width: u32,
    window_height: u32,
}

impl Previewer {
    /// Builds the full GPU resource set for a fixed-size window.
    ///
    /// Configures global GL state, compiles and links the shader pair,
    /// uploads the quad bound to the program's position attribute, builds
    /// the reduced-resolution target, and uploads the one-time `WINDOW`
    /// uniform.
    ///
    /// # Errors
    ///
    /// Any setup failure (source read, compile, link, allocation,
    /// framebuffer completeness, GL state) is returned as a fatal
    /// [`PreviewError`]; the preview has no degraded mode.
    pub fn new(
        gl: &glow::Context,
        vertex_path: &Path,
        fragment_path: &Path,
        window_width: u32,
        window_height: u32,
    ) -> Result<Self, PreviewError> {
        configure(gl)?;

        let program = ShaderProgram::from_files(gl, vertex_path, fragment_path)?;
        program.bind(gl);

        let quad = QuadGeometry::new(gl, program.position_attrib())?;
        let target = PixelateTarget::new(gl, window_width, window_height, PIXELATE_SCALE)?;

        // The window is fixed-size, so WINDOW never needs re-uploading.
        program.set_window(gl, window_width as f32, window_height as f32);
        check_gl(gl)?;

        Ok(Self {
            program,
            quad,
            target,
            camera: Camera::new(),
            window_width,
            window_height,
        })
    }

    /// Runs the frame loop until the window requests close.
    ///
    /// Per iteration: drain events, capture the frame timestamp, log the
    /// once-per-second FPS report, step the camera from key state, upload
    /// `TIME`/`POSITION`/`AIM`, render into the reduced target, blit to the
    /// window, present, and sleep off the rest of the frame budget.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Gl`] if the context reports an error after
    /// the draw or blit; rendering stops on the first failure.
    pub fn run<W: WindowBackend>(
        &mut self,
        gl: &glow::Context,
        window: &mut W,
    ) -> Result<(), PreviewError> {
        let start = Instant::now();
        let mut fps = FpsCounter::new(start);

        while !window.should_close() {
            window.poll_events();

            let frame_start = Instant::now();
            if let Some(sample) = fps.tick(frame_start) {
                log::info!("{:.3} ms/frame", sample.ms_per_frame);
                log::info!("{} frames/sec", sample.frames);
            }

            self.camera.apply(window.camera_input());

            self.program
                .set_time(gl, cyclic_time(frame_start - start, TIME_PERIOD));
            self.program.set_position(gl, self.camera.position);
            self.program.set_aim(gl, self.camera.aim);

            self.target.begin(gl);
            self.quad.draw(gl);
            check_gl(gl)?;

            self.target
                .blit_to_window(gl, self.window_width, self.window_height);
            check_gl(gl)?;

            window.swap_buffers();

            if let Some(rest) = remaining_budget(frame_start.elapsed(), FRAME_BUDGET) {
                thread::sleep(rest);
            }
        }

        Ok(())
    }

    /// Current camera state (position and aim).
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Releases every GPU resource, in reverse creation order.
    ///
    /// Must be called exactly once, before the GL context and window are
    /// torn down.
    pub fn destroy(&self, gl: &glow::Context) {
        self.target.destroy(gl);
        self.quad.destroy(gl);
        self.program.destroy(gl);
    }
}
