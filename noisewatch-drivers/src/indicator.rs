//! Status LEDs
//!
//! Two active-high LEDs: one lit while quiet, one lit while the alarm is
//! active. They are always driven as a pair so exactly one is on.

use noisewatch_core::traits::Indicators;
use noisewatch_hal::OutputPin;

/// Quiet/alarm LED pair
pub struct StatusLeds<P> {
    quiet: P,
    alarm: P,
}

impl<P: OutputPin> StatusLeds<P> {
    /// Create the pair in the quiet configuration
    pub fn new(quiet: P, alarm: P) -> Self {
        let mut leds = Self { quiet, alarm };
        leds.show_alarm(false);
        leds
    }
}

impl<P: OutputPin> Indicators for StatusLeds<P> {
    fn show_alarm(&mut self, alarm: bool) {
        self.quiet.set_level(!alarm);
        self.alarm.set_level(alarm);
    }

    fn is_showing_alarm(&self) -> bool {
        self.alarm.is_set_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new(high: bool) -> Self {
            Self { high }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_starts_quiet() {
        let leds = StatusLeds::new(MockPin::new(false), MockPin::new(true));
        assert!(leds.quiet.is_set_high());
        assert!(leds.alarm.is_set_low());
        assert!(!leds.is_showing_alarm());
    }

    #[test]
    fn test_exactly_one_lit() {
        let mut leds = StatusLeds::new(MockPin::new(false), MockPin::new(false));

        leds.show_alarm(true);
        assert!(leds.is_showing_alarm());
        assert!(leds.quiet.is_set_low());
        assert!(leds.alarm.is_set_high());

        leds.show_alarm(false);
        assert!(!leds.is_showing_alarm());
        assert!(leds.quiet.is_set_high());
        assert!(leds.alarm.is_set_low());
    }
}
