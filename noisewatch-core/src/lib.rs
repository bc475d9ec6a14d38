//! Board-agnostic core logic for the noise alarm firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (sensor, indicators, buzzer, buttons, display)
//! - Alarm state machine
//! - Noise detector (voltage conversion and debounce)
//! - Polling loop controller
//! - Configuration types and the embedded config parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod detector;
pub mod state;
pub mod traits;

pub use controller::{AlarmController, ControllerError, TickReport};
pub use detector::{AlarmState, NoiseDetector, SampleOutcome};
