//! I2C bus

use noisewatch_hal::i2c::{I2cBus, I2cConfig};

/// Build the embassy I2C configuration for a bus speed
pub fn embassy_config(config: &I2cConfig) -> embassy_rp::i2c::Config {
    let mut c = embassy_rp::i2c::Config::default();
    c.frequency = config.frequency;
    c
}

/// Adapter from any blocking embedded-hal I2C master
///
/// Used with `embassy_rp::i2c::I2c<'_, _, Blocking>`.
pub struct RpI2c<T> {
    bus: T,
}

impl<T: embedded_hal::i2c::I2c> RpI2c<T> {
    pub fn new(bus: T) -> Self {
        Self { bus }
    }
}

impl<T: embedded_hal::i2c::I2c> I2cBus for RpI2c<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data)
    }
}
