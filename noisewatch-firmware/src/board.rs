//! Pin assignments for the reference board
//!
//! Pins are taken from `embassy_rp::Peripherals` by name in `main`; these
//! numbers document the wiring and feed the startup log.

/// I2C1 data line to the OLED
pub const I2C_SDA: u8 = 14;
/// I2C1 clock line to the OLED
pub const I2C_SCL: u8 = 15;

/// Microphone output, ADC input 2
pub const MIC: u8 = 28;

/// Buzzer, PWM slice 2 output B
pub const BUZZER: u8 = 21;

/// Disable button (active-low)
pub const BUTTON_DISABLE: u8 = 5;
/// Reset button (active-low)
pub const BUTTON_RESET: u8 = 6;

/// Green LED, lit while quiet
pub const LED_QUIET: u8 = 11;
/// Blue LED, lit while the alarm is active
pub const LED_ALARM: u8 = 12;
