//! Alarm state machine
//!
//! The alarm has exactly two states. Transitions are explicit, finite and
//! deterministic; the detector decides when to feed which event.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
