//! RP2040-specific HAL for the noise alarm firmware
//!
//! This crate implements the noisewatch-hal traits on top of embassy-rp:
//! - GPIO outputs and pulled inputs
//! - Blocking I2C writes
//! - Blocking ADC conversions
//! - PWM slices with a fixed clock divider

#![no_std]

pub mod adc;
pub mod gpio;
pub mod i2c;
pub mod pwm;

pub use adc::RpAnalogInput;
pub use gpio::{RpInput, RpOutput};
pub use i2c::RpI2c;
pub use pwm::{PwmOutput, RpPwm};
