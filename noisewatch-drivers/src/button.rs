//! Push buttons
//!
//! Momentary buttons wired to ground with the input's pull-up enabled,
//! so a press reads low.

use noisewatch_core::traits::Button;
use noisewatch_hal::InputPin;

/// Active-low momentary button
pub struct ActiveLowButton<P> {
    pin: P,
}

impl<P: InputPin> ActiveLowButton<P> {
    /// Wrap a pulled-up input pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> Button for ActiveLowButton<P> {
    fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }
}
