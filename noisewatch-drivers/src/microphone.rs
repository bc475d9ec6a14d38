//! Analog microphone
//!
//! An electret microphone module whose output idles at mid-supply and
//! swings either way with sound pressure. The driver only samples; the
//! detector in noisewatch-core turns samples into voltages.

use noisewatch_core::traits::{AudioSensor, SensorError};
use noisewatch_hal::AnalogInput;

/// Microphone on a single ADC channel
pub struct AnalogMicrophone<A> {
    adc: A,
    /// Conversions taken since construction
    samples: u32,
}

impl<A: AnalogInput> AnalogMicrophone<A> {
    /// Create a microphone reader on the given channel
    pub fn new(adc: A) -> Self {
        Self { adc, samples: 0 }
    }

    /// Largest raw value the channel produces
    pub fn max_raw(&self) -> u16 {
        self.adc.max_raw()
    }

    /// Number of successful conversions
    pub fn samples(&self) -> u32 {
        self.samples
    }
}

impl<A: AnalogInput> AudioSensor for AnalogMicrophone<A> {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        let raw = self
            .adc
            .read_raw()
            .map_err(|_| SensorError::ConversionError)?;
        self.samples = self.samples.wrapping_add(1);
        Ok(raw.min(self.adc.max_raw()))
    }
}
