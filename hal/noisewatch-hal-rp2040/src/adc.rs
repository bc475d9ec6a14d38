//! Blocking ADC reads
//!
//! RP2040 has a single 12-bit ADC; GPIO26 to GPIO29 are its analog inputs.

use embassy_rp::adc::{Adc, Blocking, Channel, Error};
use noisewatch_hal::AnalogInput;

/// One ADC channel read with blocking conversions
///
/// Owns the ADC itself; the alarm samples a single channel.
pub struct RpAnalogInput<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> RpAnalogInput<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogInput for RpAnalogInput<'_> {
    type Error = Error;

    fn read_raw(&mut self) -> Result<u16, Error> {
        self.adc.blocking_read(&mut self.channel)
    }
}
