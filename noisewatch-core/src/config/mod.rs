//! Configuration types and parsing
//!
//! Every tunable of the alarm lives in [`AlarmConfig`]. Defaults match the
//! reference board; the firmware overrides them from an embedded
//! `alarm.toml` parsed by [`parse_config`].

pub mod toml;
pub mod types;

pub use self::toml::parse_config;
pub use types::*;

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value could not be parsed or has the wrong type
    InvalidValue,
    /// Key not valid in the current section
    UnknownKey,
    /// Value parsed but outside the accepted range
    OutOfRange,
}
