//! Display backend trait
//!
//! The status screen draws into a backend's framebuffer and asks it to
//! flush; it never talks to the bus itself.

use noisewatch_core::traits::DisplayError;

use crate::framebuffer::Framebuffer;

/// Display backend trait
///
/// Implemented by every panel driver that keeps a local framebuffer.
pub trait DisplayBackend {
    /// Bring the panel up
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Local framebuffer
    fn framebuffer(&self) -> &Framebuffer;

    /// Local framebuffer, for drawing
    fn framebuffer_mut(&mut self) -> &mut Framebuffer;

    /// Send the whole framebuffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Pixel dimensions as (width, height)
    fn dimensions(&self) -> (u16, u16) {
        let fb = self.framebuffer();
        (fb.width(), fb.height())
    }

    /// Check if the panel has been initialized
    fn is_ready(&self) -> bool;
}
