//! PWM outputs
//!
//! Each RP2040 PWM slice has one counter and two outputs (A and B) that
//! share the wrap value and clock divider.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use fixed::traits::ToFixed;
use noisewatch_hal::PwmChannel;

/// Which output of the slice drives the load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmOutput {
    A,
    B,
}

/// One output of a PWM slice
pub struct RpPwm<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
    output: PwmOutput,
}

impl<'d> RpPwm<'d> {
    /// Take over a configured slice, set the integer clock divider and
    /// silence the output
    pub fn new(pwm: Pwm<'d>, output: PwmOutput, clock_divider: u8) -> Self {
        let mut config = PwmConfig::default();
        config.divider = clock_divider.to_fixed();
        config.compare_a = 0;
        config.compare_b = 0;

        let mut channel = Self {
            pwm,
            config,
            output,
        };
        channel.apply();
        channel
    }

    fn apply(&mut self) {
        self.pwm.set_config(&self.config);
    }
}

impl PwmChannel for RpPwm<'_> {
    fn set_top(&mut self, top: u16) {
        self.config.top = top;
        self.apply();
    }

    fn set_level(&mut self, level: u16) {
        match self.output {
            PwmOutput::A => self.config.compare_a = level,
            PwmOutput::B => self.config.compare_b = level,
        }
        self.apply();
    }

    fn level(&self) -> u16 {
        match self.output {
            PwmOutput::A => self.config.compare_a,
            PwmOutput::B => self.config.compare_b,
        }
    }
}
