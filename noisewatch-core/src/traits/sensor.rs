//! Audio sensor trait

/// Errors that can occur while sampling the microphone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// ADC conversion error
    ConversionError,
}

/// Trait for the analog audio sensor
///
/// Implementations return the raw conversion; the detector owns the
/// voltage math so it can be tested without hardware.
pub trait AudioSensor {
    /// Take one raw sample
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}
