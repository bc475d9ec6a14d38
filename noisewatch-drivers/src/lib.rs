//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in noisewatch-core on top of the noisewatch-hal pin, ADC and PWM
//! traits:
//!
//! - Analog microphone (raw ADC samples)
//! - PWM buzzer
//! - Quiet/alarm LED pair
//! - Active-low push buttons

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod buzzer;
pub mod indicator;
pub mod microphone;

pub use button::ActiveLowButton;
pub use buzzer::PwmBuzzer;
pub use indicator::StatusLeds;
pub use microphone::AnalogMicrophone;
