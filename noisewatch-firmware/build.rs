//! Build script for noisewatch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates alarm.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections alarm.toml must contain, with the keys each accepts
const SECTIONS: &[(&str, &[&str])] = &[
    (
        "detector",
        &[
            "reference_mv",
            "max_raw",
            "silence_baseline_mv",
            "threshold_mv",
            "required_detections",
        ],
    ),
    ("buzzer", &["clock_divider", "top", "level"]),
    ("display", &["address", "width", "height", "i2c_frequency_hz"]),
    ("timing", &["sample_interval_ms", "debounce_ms"]),
    ("screen", &["label"]),
];

/// Largest accepted detector voltage in millivolts
const MAX_DETECTOR_MV: i64 = 1_000_000;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Validate alarm.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=alarm.toml");

    let config_path = Path::new("alarm.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read alarm.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in alarm.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let errors = check_structure(&config);
    if !errors.is_empty() {
        fail("Invalid sections in alarm.toml", &errors);
    }

    let errors = check_ranges(&config);
    if !errors.is_empty() {
        fail("Out-of-range values in alarm.toml", &errors);
    }

    println!("cargo:warning=alarm.toml validated successfully");
}

/// Abort the build with a boxed error report
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| {
                let line = if e.len() > 62 {
                    format!("{}...", &e[..59])
                } else {
                    e.clone()
                };
                format!("║  • {:<62} ║", line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Every section present, no unknown sections or keys
fn check_structure(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return vec!["top level must be a table".to_string()],
    };

    for name in root.keys() {
        if !SECTIONS.iter().any(|(section, _)| *section == name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        }
    }

    for (section, keys) in SECTIONS {
        match root.get(*section) {
            Some(toml::Value::Table(table)) => {
                for key in table.keys() {
                    if !keys.contains(&key.as_str()) {
                        errors.push(format!("[{}] unknown key '{}'", section, key));
                    }
                }
            }
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("missing [{}] section", section)),
        }
    }

    errors
}

fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Check each integer lies in `[min, max]` and the cross-field rules hold
fn check_ranges(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let limits: &[(&str, &str, i64, i64)] = &[
        ("detector", "reference_mv", 1, MAX_DETECTOR_MV),
        ("detector", "max_raw", 1, u16::MAX as i64),
        ("detector", "silence_baseline_mv", 0, MAX_DETECTOR_MV),
        ("detector", "threshold_mv", 0, MAX_DETECTOR_MV),
        ("detector", "required_detections", 1, u16::MAX as i64),
        ("buzzer", "clock_divider", 1, u8::MAX as i64),
        ("buzzer", "top", 1, u16::MAX as i64),
        ("buzzer", "level", 0, u16::MAX as i64),
        ("display", "address", 0, 0x7F),
        ("display", "width", 1, 128),
        ("display", "height", 16, 64),
        ("display", "i2c_frequency_hz", 1, 1_000_000),
        ("timing", "sample_interval_ms", 1, u32::MAX as i64),
        ("timing", "debounce_ms", 0, u32::MAX as i64),
    ];

    for &(section, key, min, max) in limits {
        match config.get(section).and_then(|s| s.get(key)) {
            None => {}
            Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
            Some(toml::Value::Integer(_)) => {
                errors.push(format!("[{}] {} must be {}-{}", section, key, min, max))
            }
            Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
        }
    }

    if let Some(height) = int(config, "display", "height") {
        if height % 8 != 0 {
            errors.push("[display] height must be a multiple of 8".to_string());
        }
    }

    if let (Some(top), Some(level)) = (int(config, "buzzer", "top"), int(config, "buzzer", "level")) {
        if level > top {
            errors.push("[buzzer] level must not exceed top".to_string());
        }
    }

    if let (Some(reference), Some(baseline)) = (
        int(config, "detector", "reference_mv"),
        int(config, "detector", "silence_baseline_mv"),
    ) {
        if baseline > reference {
            errors.push("[detector] silence_baseline_mv exceeds reference_mv".to_string());
        }
    }

    match config.get("screen").and_then(|s| s.get("label")) {
        None => {}
        Some(toml::Value::String(label)) => {
            if label.len() > 16 {
                errors.push("[screen] label must be at most 16 bytes".to_string());
            }
            if label.contains('"') || label.contains('\\') {
                errors.push("[screen] label must not contain quotes or escapes".to_string());
            }
        }
        Some(_) => errors.push("[screen] label must be a string".to_string()),
    }

    errors
}
