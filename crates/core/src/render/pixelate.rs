//! Reduced-resolution offscreen target with an upscaling blit.
//!
//! The preview never draws the quad straight into the window. Each frame
//! renders into a color renderbuffer at `window / PIXELATE_SCALE`, then the
//! whole reduced region is blitted onto the whole window with
//! nearest-neighbor sampling. Upscaling with NEAREST keeps every low-res
//! pixel a crisp block, giving the deliberate pixelation aesthetic
//! independent of the display resolution.
//!
//! Viewport discipline: the viewport must always match the currently bound
//! draw target. `begin` sets the reduced viewport with the offscreen
//! framebuffer; `blit_to_window` restores the full-window viewport with the
//! default framebuffer. Conflating the two silently distorts the output.

use crate::error::PreviewError;
use crate::render::context::check_gl;

/// Factor the window dimensions are divided by for the offscreen target.
pub const PIXELATE_SCALE: u32 = 8;

/// Color renderbuffer + framebuffer pair at the reduced resolution.
///
/// Fixed-size for the whole process lifetime; the window is not resizable.
/// Depth is deliberately absent: the preview is a single full-screen quad.
pub struct PixelateTarget {
    fbo: glow::Framebuffer,
    rbo: glow::Renderbuffer,
    width: i32,
    height: i32,
}

impl PixelateTarget {
    /// Builds the reduced-resolution target for a `window_width` x
    /// `window_height` window.
    ///
    /// Allocates an RGBA8 renderbuffer at `window / scale` (clamped to at
    /// least one pixel per axis), attaches it at color attachment 0, and
    /// verifies framebuffer completeness.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Resource`] if an object cannot be allocated,
    /// [`PreviewError::FramebufferIncomplete`] if the driver rejects the
    /// attachment, or [`PreviewError::Gl`] for any other setup error.
    #[allow(unsafe_code)]
    pub fn new(
        gl: &glow::Context,
        window_width: u32,
        window_height: u32,
        scale: u32,
    ) -> Result<Self, PreviewError> {
        use glow::HasContext;

        let width = (window_width / scale.max(1)).max(1) as i32;
        let height = (window_height / scale.max(1)).max(1) as i32;

        // SAFETY: glow wraps raw GL calls as unsafe. Handles come from
        // successful create_* calls; both objects are deleted if the
        // framebuffer fails its completeness check.
        let (fbo, rbo) = unsafe {
            let rbo = gl.create_renderbuffer().map_err(PreviewError::Resource)?;
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(rbo));
            gl.renderbuffer_storage(glow::RENDERBUFFER, glow::RGBA8, width, height);

            let fbo = match gl.create_framebuffer() {
                Ok(fbo) => fbo,
                Err(message) => {
                    gl.delete_renderbuffer(rbo);
                    return Err(PreviewError::Resource(message));
                }
            };
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
            gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::RENDERBUFFER,
                Some(rbo),
            );

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            gl.bind_renderbuffer(glow::RENDERBUFFER, None);

            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.delete_framebuffer(fbo);
                gl.delete_renderbuffer(rbo);
                return Err(PreviewError::FramebufferIncomplete(status));
            }

            (fbo, rbo)
        };

        check_gl(gl)?;

        Ok(Self {
            fbo,
            rbo,
            width,
            height,
        })
    }

    /// Reduced-resolution width in pixels.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Reduced-resolution height in pixels.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Binds the offscreen framebuffer as the draw target, sets the
    /// viewport to the reduced resolution, and clears the color buffer.
    #[allow(unsafe_code)]
    pub fn begin(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.fbo is a valid, complete framebuffer from new().
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            gl.viewport(0, 0, self.width, self.height);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    /// Upscales the offscreen target onto the default framebuffer.
    ///
    /// Binds the offscreen framebuffer as the read source and the window as
    /// the draw target, restores the full-window viewport, and blits the
    /// entire reduced region onto the entire window with nearest-neighbor
    /// sampling. Blitting bypasses fragment processing, so no blending is
    /// applied.
    #[allow(unsafe_code)]
    pub fn blit_to_window(&self, gl: &glow::Context, window_width: u32, window_height: u32) {
        use glow::HasContext;

        let (dst_width, dst_height) = (window_width as i32, window_height as i32);

        // SAFETY: self.fbo is a valid, complete framebuffer; None is the
        // default window framebuffer.
        unsafe {
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(self.fbo));
            gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, None);
            gl.viewport(0, 0, dst_width, dst_height);
            gl.blit_framebuffer(
                0,
                0,
                self.width,
                self.height,
                0,
                0,
                dst_width,
                dst_height,
                glow::COLOR_BUFFER_BIT,
                glow::NEAREST,
            );
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, None);
        }
    }

    /// Deletes the framebuffer and renderbuffer.
    ///
    /// Must be called before dropping the `PixelateTarget` for deterministic
    /// cleanup; GL objects have no destructor of their own.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: both handles are valid objects from new().
        unsafe {
            gl.delete_framebuffer(self.fbo);
            gl.delete_renderbuffer(self.rbo);
        }
    }
}
