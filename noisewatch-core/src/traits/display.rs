//! Status display trait

/// Errors that can occur with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus write to the controller failed
    Communication,
    /// Render area or coordinates outside the framebuffer
    InvalidCoordinates,
    /// Width/height not representable by the framebuffer
    InvalidDimensions,
    /// Supplied data does not match the framebuffer size
    BufferOverflow,
}

/// Trait for the activation counter screen
///
/// The screen layout is fixed: a static label and the activation count.
pub trait StatusDisplay {
    /// Redraw the screen with the given activation count and flush it
    fn show_activations(&mut self, count: u32) -> Result<(), DisplayError>;
}
