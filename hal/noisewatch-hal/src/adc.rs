//! Analog input abstraction

/// A single analog input channel
///
/// Returns unsigned raw conversions at the channel's fixed resolution
/// (0..=4095 for a 12-bit converter).
pub trait AnalogInput {
    /// Error type for a failed conversion
    type Error;

    /// Take one blocking conversion
    ///
    /// Takes `&mut self` because ADC reads typically require mutable access.
    fn read_raw(&mut self) -> Result<u16, Self::Error>;

    /// Largest value `read_raw` can return
    fn max_raw(&self) -> u16 {
        4095
    }
}
