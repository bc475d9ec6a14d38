//! Indicator and buzzer traits

/// The pair of status indicators
///
/// "Quiet" lights the quiet indicator and darkens the alarm indicator;
/// "alarm" is the opposite. There is no state with both lit.
pub trait Indicators {
    /// Show the alarm (`true`) or quiet (`false`) configuration
    fn show_alarm(&mut self, alarm: bool);

    /// Check whether the alarm configuration is showing
    fn is_showing_alarm(&self) -> bool;
}

/// Trait for the alarm buzzer
pub trait Buzzer {
    /// Start sounding at the configured pitch and loudness
    fn start(&mut self);

    /// Silence the buzzer
    fn stop(&mut self);

    /// Check if the buzzer is sounding
    fn is_sounding(&self) -> bool;
}
