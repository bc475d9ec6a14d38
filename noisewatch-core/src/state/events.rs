//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Enough consecutive loud samples were seen
    NoiseConfirmed,
    /// User pressed the disable button
    Disable,
    /// User pressed the reset button
    ResetCount,
}

impl Event {
    /// Check if this event is user-initiated
    pub fn is_user_event(&self) -> bool {
        matches!(self, Event::Disable | Event::ResetCount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_events() {
        assert!(Event::Disable.is_user_event());
        assert!(Event::ResetCount.is_user_event());
        assert!(!Event::NoiseConfirmed.is_user_event());
    }
}
