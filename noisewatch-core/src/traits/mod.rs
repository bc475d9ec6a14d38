//! Collaborator traits
//!
//! These traits define the interface between the alarm logic and the
//! hardware-specific implementations in `noisewatch-drivers` and
//! `noisewatch-display`.

pub mod display;
pub mod input;
pub mod outputs;
pub mod sensor;

pub use display::{DisplayError, StatusDisplay};
pub use input::Button;
pub use outputs::{Buzzer, Indicators};
pub use sensor::{AudioSensor, SensorError};
