//! State machine definition
//!
//! Buzzer and indicator behavior is a function of the current state.

use super::events::Event;

/// Alarm states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Alarm inactive, quiet indicator lit
    #[default]
    Idle,
    /// Alarm active, buzzer sounding
    Triggered,
}

impl State {
    /// Check if the alarm is active
    pub fn is_active(&self) -> bool {
        matches!(self, State::Triggered)
    }

    /// Check if this state sounds the buzzer
    pub fn buzzer_on(&self) -> bool {
        self.is_active()
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Idle, NoiseConfirmed) => Triggered,
            (Triggered, Disable) => Idle,

            // Reset only clears the counter; it never changes state
            (state, ResetCount) => state,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_triggers_on_confirmed_noise() {
        let next = State::Idle.transition(Event::NoiseConfirmed);
        assert_eq!(next, State::Triggered);
        assert!(next.is_active());
        assert!(next.buzzer_on());
    }

    #[test]
    fn test_triggered_ignores_more_noise() {
        let next = State::Triggered.transition(Event::NoiseConfirmed);
        assert_eq!(next, State::Triggered);
    }

    #[test]
    fn test_disable_returns_to_idle() {
        assert_eq!(State::Triggered.transition(Event::Disable), State::Idle);
        // Disabling an idle alarm does nothing
        assert_eq!(State::Idle.transition(Event::Disable), State::Idle);
    }

    #[test]
    fn test_reset_keeps_state() {
        for state in [State::Idle, State::Triggered] {
            assert_eq!(state.transition(Event::ResetCount), state);
        }
    }

    #[test]
    fn test_default_is_idle() {
        assert_eq!(State::default(), State::Idle);
        assert!(!State::default().is_active());
    }
}
