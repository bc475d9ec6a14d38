//! Minimal TOML parser for the alarm configuration
//!
//! Handles only the subset `alarm.toml` needs and allocates nothing.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs (integer, boolean, basic string)
//! - Integers with `_` separators and `0x` hex prefix
//! - Comments (`# ...`), including trailing comments
//!
//! NOT supported:
//! - Arrays, inline tables, dotted keys
//! - Floats, datetimes, multi-line strings, escape sequences

use heapless::String;

use super::types::{AlarmConfig, MAX_LABEL_LEN};
use super::ConfigError;

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Detector,
    Buzzer,
    Display,
    Timing,
    Screen,
}

/// A parsed right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Integer(i64),
    Bool(bool),
    Str(&'a str),
}

/// Parse TOML text into a validated [`AlarmConfig`]
///
/// Keys that are absent keep their default value.
pub fn parse_config(input: &str) -> Result<AlarmConfig, ConfigError> {
    let mut config = AlarmConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') || line.len() < 2 {
                return Err(ConfigError::InvalidSection);
            }
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, raw) = split_key_value(line).ok_or(ConfigError::InvalidValue)?;
        let value = parse_value(raw)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

/// Drop a trailing `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    match header.trim() {
        "detector" => Ok(Section::Detector),
        "buzzer" => Ok(Section::Buzzer),
        "display" => Ok(Section::Display),
        "timing" => Ok(Section::Timing),
        "screen" => Ok(Section::Screen),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_value(raw: &str) -> Result<Value<'_>, ConfigError> {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        let inner = &raw[1..raw.len() - 1];
        if inner.contains('"') || inner.contains('\\') {
            return Err(ConfigError::InvalidValue);
        }
        return Ok(Value::Str(inner));
    }

    match raw {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => parse_integer(raw)
            .map(Value::Integer)
            .ok_or(ConfigError::InvalidValue),
    }
}

/// Parse a TOML integer: optional sign, optional `0x`, `_` separators
fn parse_integer(raw: &str) -> Option<i64> {
    let (negative, digits) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };

    let (radix, digits) = match digits.strip_prefix("0x") {
        Some(hex) => (16, hex),
        None => (10, digits),
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }

    let mut value: i64 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix)? as i64;
        value = value.checked_mul(radix as i64)?.checked_add(digit)?;
    }

    Some(if negative { -value } else { value })
}

fn as_int<T: TryFrom<i64>>(value: Value<'_>) -> Result<T, ConfigError> {
    match value {
        Value::Integer(i) => T::try_from(i).map_err(|_| ConfigError::OutOfRange),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn as_label(value: Value<'_>) -> Result<String<MAX_LABEL_LEN>, ConfigError> {
    match value {
        Value::Str(s) => {
            let mut label = String::new();
            label.push_str(s).map_err(|_| ConfigError::OutOfRange)?;
            Ok(label)
        }
        _ => Err(ConfigError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: Value<'_>,
    config: &mut AlarmConfig,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Detector, "reference_mv") => config.detector.reference_mv = as_int(value)?,
        (Section::Detector, "max_raw") => config.detector.max_raw = as_int(value)?,
        (Section::Detector, "silence_baseline_mv") => {
            config.detector.silence_baseline_mv = as_int(value)?
        }
        (Section::Detector, "threshold_mv") => config.detector.threshold_mv = as_int(value)?,
        (Section::Detector, "required_detections") => {
            config.detector.required_detections = as_int(value)?
        }

        (Section::Buzzer, "clock_divider") => config.buzzer.clock_divider = as_int(value)?,
        (Section::Buzzer, "top") => config.buzzer.top = as_int(value)?,
        (Section::Buzzer, "level") => config.buzzer.level = as_int(value)?,

        (Section::Display, "address") => config.display.address = as_int(value)?,
        (Section::Display, "width") => config.display.width = as_int(value)?,
        (Section::Display, "height") => config.display.height = as_int(value)?,
        (Section::Display, "i2c_frequency_hz") => {
            config.display.i2c_frequency_hz = as_int(value)?
        }

        (Section::Timing, "sample_interval_ms") => {
            config.timing.sample_interval_ms = as_int(value)?
        }
        (Section::Timing, "debounce_ms") => config.timing.debounce_ms = as_int(value)?,

        (Section::Screen, "label") => config.screen.label = as_label(value)?,

        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED: &str = include_str!("../../../noisewatch-firmware/alarm.toml");

    #[test]
    fn test_shipped_config_parses() {
        let config = parse_config(SHIPPED).unwrap();
        assert_eq!(config.detector.required_detections, 5);
        assert_eq!(config.display.address, 0x3C);
        assert_eq!(config.buzzer.top, 5000);
        assert_eq!(config.timing.debounce_ms, 200);
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), AlarmConfig::default());
        assert_eq!(
            parse_config("# only a comment\n\n").unwrap(),
            AlarmConfig::default()
        );
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            "[detector]\n\
             threshold_mv = 250   # louder room\n\
             required_detections = 3\n",
        )
        .unwrap();
        assert_eq!(config.detector.threshold_mv, 250);
        assert_eq!(config.detector.required_detections, 3);
        assert_eq!(config.detector.reference_mv, 3300);
    }

    #[test]
    fn test_hex_and_separators() {
        let config = parse_config(
            "[display]\naddress = 0x3D\ni2c_frequency_hz = 100_000\n",
        )
        .unwrap();
        assert_eq!(config.display.address, 0x3D);
        assert_eq!(config.display.i2c_frequency_hz, 100_000);
    }

    #[test]
    fn test_label_with_hash() {
        let config = parse_config("[screen]\nlabel = \"Room #2\" # comment\n").unwrap();
        assert_eq!(config.screen.label.as_str(), "Room #2");
    }

    #[test]
    fn test_oversized_values_rejected() {
        assert_eq!(
            parse_config(
                "[detector]\nreference_mv = 5000000\nsilence_baseline_mv = 0\nthreshold_mv = 5000000\n"
            ),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[display]\nwidth = 8\nheight = 1024\n"),
            Err(ConfigError::OutOfRange)
        );
    }

    #[test]
    fn test_label_too_long() {
        let result = parse_config("[screen]\nlabel = \"This label is far too long\"\n");
        assert_eq!(result, Err(ConfigError::OutOfRange));
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[heater]\n"),
            Err(ConfigError::InvalidSection)
        );
        assert_eq!(parse_config("[display\n"), Err(ConfigError::InvalidSection));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_config("[buzzer]\nvolume = 3\n"),
            Err(ConfigError::UnknownKey)
        );
        // Keys outside any section are not accepted
        assert_eq!(parse_config("top = 3\n"), Err(ConfigError::UnknownKey));
    }

    #[test]
    fn test_wrong_value_type() {
        assert_eq!(
            parse_config("[buzzer]\ntop = \"loud\"\n"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[buzzer]\ntop = 5000.5\n"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(parse_config("[buzzer]\ntop\n"), Err(ConfigError::InvalidValue));
    }

    #[test]
    fn test_value_out_of_type_range() {
        assert_eq!(
            parse_config("[buzzer]\ntop = 70000\n"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[detector]\nthreshold_mv = -5\n"),
            Err(ConfigError::OutOfRange)
        );
    }

    #[test]
    fn test_validation_runs_after_parse() {
        assert_eq!(
            parse_config("[display]\nheight = 12\n"),
            Err(ConfigError::OutOfRange)
        );
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("-7"), Some(-7));
        assert_eq!(parse_integer("0xff"), Some(255));
        assert_eq!(parse_integer("1_000"), Some(1000));
        assert_eq!(parse_integer("_1"), None);
        assert_eq!(parse_integer("1_"), None);
        assert_eq!(parse_integer("0x"), None);
        assert_eq!(parse_integer("12a"), None);
        assert_eq!(parse_integer(""), None);
    }
}
