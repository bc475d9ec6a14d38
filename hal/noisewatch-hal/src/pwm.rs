//! PWM channel abstraction

/// One PWM output channel
///
/// The counter runs from 0 to `top` and wraps; the output is high while
/// the counter is below the compare level. Frequency is set by the clock
/// divider and `top`, the duty cycle by `level / (top + 1)`.
pub trait PwmChannel {
    /// Set the counter wrap value
    fn set_top(&mut self, top: u16);

    /// Set the compare level (0 = always low)
    fn set_level(&mut self, level: u16);

    /// Current compare level
    fn level(&self) -> u16;
}
