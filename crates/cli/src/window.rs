//! GLFW window wrapper: context creation, event drain, key-state polling.
//!
//! This is the windowing collaborator the core loop drives through the
//! `WindowBackend` trait. GLFW errors flow through the `log_errors`
//! callback into the log stream; the only key event the wrapper acts on
//! itself is an Escape press, which sets the window's close flag.

use glfw::{Action, Context, Key};
use shadeview_core::camera::CameraInput;
use shadeview_core::runner::WindowBackend;

use crate::error::CliError;

/// Fixed window width in pixels.
pub const WINDOW_WIDTH: u32 = 1024;

/// Fixed window height in pixels.
pub const WINDOW_HEIGHT: u32 = 768;

/// A fixed-size, non-resizable GLFW window with a 3.3 core-profile GL
/// context and vsync enabled.
pub struct PreviewWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl PreviewWindow {
    /// Initializes GLFW and opens the preview window.
    ///
    /// The context is made current, key polling is enabled, and the swap
    /// interval is set to 1 so presentation stays vsync-capped while the
    /// loop's explicit sleep does the actual pacing.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Window`] if GLFW fails to initialize or the
    /// window cannot be created.
    pub fn new(width: u32, height: u32, title: &str) -> Result<Self, CliError> {
        let mut glfw = glfw::init(glfw::log_errors)
            .map_err(|e| CliError::Window(format!("failed to initialize GLFW: {e}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        glfw.window_hint(glfw::WindowHint::Resizable(false));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or_else(|| CliError::Window("failed to create GLFW window".into()))?;

        window.make_current();
        window.set_key_polling(true);
        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        Ok(Self {
            glfw,
            window,
            events,
        })
    }

    /// Loads the GL function pointers from the current context.
    #[allow(unsafe_code)]
    pub fn load_gl(&mut self) -> glow::Context {
        // SAFETY: the context was made current in new(); the loader returns
        // a valid function pointer or null for names the driver lacks.
        unsafe {
            glow::Context::from_loader_function(|s| self.window.get_proc_address(s) as *const _)
        }
    }
}

impl WindowBackend for PreviewWindow {
    fn poll_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            if let glfw::WindowEvent::Key(Key::Escape, _, Action::Press, _) = event {
                self.window.set_should_close(true);
            }
        }
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn camera_input(&self) -> CameraInput {
        CameraInput {
            forward: self.window.get_key(Key::W) == Action::Press,
            back: self.window.get_key(Key::S) == Action::Press,
            left: self.window.get_key(Key::A) == Action::Press,
            right: self.window.get_key(Key::D) == Action::Press,
        }
    }
}
