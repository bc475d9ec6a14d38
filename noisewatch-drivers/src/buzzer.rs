//! PWM buzzer
//!
//! A passive piezo buzzer driven by one PWM channel. The wrap value sets
//! the pitch and stays fixed; sounding and silencing only move the
//! compare level between the configured level and zero.

use noisewatch_core::config::BuzzerConfig;
use noisewatch_core::traits::Buzzer;
use noisewatch_hal::PwmChannel;

/// Buzzer on a PWM channel
pub struct PwmBuzzer<C> {
    channel: C,
    /// Compare level while sounding
    level: u16,
}

impl<C: PwmChannel> PwmBuzzer<C> {
    /// Create a buzzer and program its pitch
    ///
    /// The channel is left silent. The clock divider is a property of the
    /// PWM slice and must already be applied by the caller.
    pub fn new(mut channel: C, config: &BuzzerConfig) -> Self {
        channel.set_top(config.top);
        channel.set_level(0);
        Self {
            channel,
            level: config.level.min(config.top),
        }
    }

    /// Get the underlying channel
    pub fn channel(&self) -> &C {
        &self.channel
    }
}

impl<C: PwmChannel> Buzzer for PwmBuzzer<C> {
    fn start(&mut self) {
        self.channel.set_level(self.level);
    }

    fn stop(&mut self) {
        self.channel.set_level(0);
    }

    fn is_sounding(&self) -> bool {
        self.channel.level() != 0
    }
}
