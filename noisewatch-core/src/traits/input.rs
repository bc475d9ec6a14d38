//! Button input trait

/// A momentary push button
///
/// Polled once per loop iteration; debouncing is done by the loop's
/// post-action sleep, not by the implementation.
pub trait Button {
    /// Check if the button is held down right now
    fn is_pressed(&self) -> bool;
}
