//! Noisewatch Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the alarm needs from a board:
//! digital pins, an I2C bus for the display, one analog input for the
//! microphone and one PWM channel for the buzzer. Chip-specific crates
//! (currently RP2040) implement them so the drivers and the alarm logic
//! can be tested on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  noisewatch-drivers / noisewatch-display│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  noisewatch-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ noisewatch-hal- │
//!            │     rp2040      │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C bus writes
//! - [`adc::AnalogInput`] - Raw analog samples
//! - [`pwm::PwmChannel`] - PWM wrap and compare level

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod i2c;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use gpio::{InputPin, OutputPin};
pub use i2c::I2cBus;
pub use pwm::PwmChannel;
