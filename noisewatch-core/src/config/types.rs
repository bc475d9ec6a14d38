//! Configuration type definitions

use heapless::String;

use super::ConfigError;

/// Maximum length for the screen label
pub const MAX_LABEL_LEN: usize = 16;

/// Largest framebuffer any supported display may need (128x64 / 8)
pub const MAX_DISPLAY_BYTES: usize = 1024;

/// Column count of the SSD1306 controller
pub const MAX_DISPLAY_WIDTH: u16 = 128;

/// Smallest and largest panel height the SSD1306 multiplexer drives
pub const MIN_DISPLAY_HEIGHT: u16 = 16;
pub const MAX_DISPLAY_HEIGHT: u16 = 64;

/// Upper bound for every detector voltage (1000 V)
pub const MAX_DETECTOR_MV: u32 = 1_000_000;

/// Noise detection parameters
///
/// Voltages are integer millivolts; the detector works in microvolts
/// internally so the 0.10 V threshold keeps its precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DetectorConfig {
    /// ADC reference voltage (mV)
    pub reference_mv: u32,
    /// Largest raw ADC value (4095 for 12-bit)
    pub max_raw: u16,
    /// Sensor output with no sound present (mV)
    pub silence_baseline_mv: u32,
    /// Deviation from the baseline that counts as noise (mV, exclusive)
    pub threshold_mv: u32,
    /// Consecutive loud samples needed to trigger the alarm
    pub required_detections: u16,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            reference_mv: 3300,
            max_raw: 4095,
            silence_baseline_mv: 1650,
            threshold_mv: 100,
            required_detections: 5,
        }
    }
}

impl DetectorConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reference_mv == 0 || self.max_raw == 0 || self.required_detections == 0 {
            return Err(ConfigError::OutOfRange);
        }
        if self.reference_mv > MAX_DETECTOR_MV || self.threshold_mv > MAX_DETECTOR_MV {
            return Err(ConfigError::OutOfRange);
        }
        if self.silence_baseline_mv > self.reference_mv {
            return Err(ConfigError::OutOfRange);
        }
        Ok(())
    }
}

/// Buzzer PWM parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BuzzerConfig {
    /// Integer PWM clock divider
    pub clock_divider: u8,
    /// PWM counter wrap value (sets pitch)
    pub top: u16,
    /// Compare level while sounding (sets loudness)
    pub level: u16,
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self {
            clock_divider: 4,
            top: 5000,
            level: 2500,
        }
    }
}

impl BuzzerConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock_divider == 0 || self.top == 0 || self.level > self.top {
            return Err(ConfigError::OutOfRange);
        }
        Ok(())
    }
}

/// OLED display parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// 7-bit I2C address of the controller
    pub address: u8,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels (multiple of 8)
    pub height: u16,
    /// I2C clock in Hz
    pub i2c_frequency_hz: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: 0x3C,
            width: 128,
            height: 64,
            i2c_frequency_hz: 400_000,
        }
    }
}

impl DisplayConfig {
    /// Number of 8-pixel pages
    pub fn pages(&self) -> u16 {
        self.height / 8
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > 0x7F || self.i2c_frequency_hz == 0 {
            return Err(ConfigError::OutOfRange);
        }
        if self.width == 0 || self.width > MAX_DISPLAY_WIDTH {
            return Err(ConfigError::OutOfRange);
        }
        if !(MIN_DISPLAY_HEIGHT..=MAX_DISPLAY_HEIGHT).contains(&self.height)
            || self.height % 8 != 0
        {
            return Err(ConfigError::OutOfRange);
        }
        if self.width as usize * self.pages() as usize > MAX_DISPLAY_BYTES {
            return Err(ConfigError::OutOfRange);
        }
        Ok(())
    }
}

/// Polling loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopTiming {
    /// Sleep at the end of every iteration (ms)
    pub sample_interval_ms: u32,
    /// Extra sleep after a button action (ms)
    pub debounce_ms: u32,
}

impl Default for LoopTiming {
    fn default() -> Self {
        Self {
            sample_interval_ms: 100,
            debounce_ms: 200,
        }
    }
}

impl LoopTiming {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::OutOfRange);
        }
        Ok(())
    }
}

/// Status screen text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenConfig {
    /// Static first line
    pub label: String<MAX_LABEL_LEN>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        let mut label = String::new();
        let _ = label.push_str("Alert System");
        Self { label }
    }
}

/// Complete alarm configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmConfig {
    pub detector: DetectorConfig,
    pub buzzer: BuzzerConfig,
    pub display: DisplayConfig,
    pub timing: LoopTiming,
    pub screen: ScreenConfig,
}

impl AlarmConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.detector.validate()?;
        self.buzzer.validate()?;
        self.display.validate()?;
        self.timing.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(AlarmConfig::default().validate(), Ok(()));
        assert_eq!(AlarmConfig::default().screen.label.as_str(), "Alert System");
    }

    #[test]
    fn test_display_pages() {
        let display = DisplayConfig::default();
        assert_eq!(display.pages(), 8);

        let small = DisplayConfig {
            height: 32,
            ..Default::default()
        };
        assert_eq!(small.pages(), 4);
    }

    #[test]
    fn test_display_rejects_partial_page() {
        let display = DisplayConfig {
            height: 60,
            ..Default::default()
        };
        assert_eq!(display.validate(), Err(ConfigError::OutOfRange));
    }

    #[test]
    fn test_display_rejects_oversized_buffer() {
        let display = DisplayConfig {
            height: 128,
            ..Default::default()
        };
        assert_eq!(display.validate(), Err(ConfigError::OutOfRange));

        let wide = DisplayConfig {
            width: 256,
            height: 8,
            ..Default::default()
        };
        assert_eq!(wide.validate(), Err(ConfigError::OutOfRange));
    }

    #[test]
    fn test_display_height_limits() {
        for height in [8, 72, 1024] {
            let display = DisplayConfig {
                width: 8,
                height,
                ..Default::default()
            };
            assert_eq!(display.validate(), Err(ConfigError::OutOfRange), "{}", height);
        }

        let short = DisplayConfig {
            height: 16,
            ..Default::default()
        };
        assert_eq!(short.validate(), Ok(()));
    }

    #[test]
    fn test_buzzer_level_above_top() {
        let buzzer = BuzzerConfig {
            level: 6000,
            ..Default::default()
        };
        assert_eq!(buzzer.validate(), Err(ConfigError::OutOfRange));
    }

    #[test]
    fn test_detector_needs_one_detection() {
        let detector = DetectorConfig {
            required_detections: 0,
            ..Default::default()
        };
        assert_eq!(detector.validate(), Err(ConfigError::OutOfRange));
    }

    #[test]
    fn test_detector_voltage_limits() {
        let huge_reference = DetectorConfig {
            reference_mv: 5_000_000,
            silence_baseline_mv: 0,
            ..Default::default()
        };
        assert_eq!(huge_reference.validate(), Err(ConfigError::OutOfRange));

        let huge_threshold = DetectorConfig {
            threshold_mv: MAX_DETECTOR_MV + 1,
            ..Default::default()
        };
        assert_eq!(huge_threshold.validate(), Err(ConfigError::OutOfRange));

        let at_limit = DetectorConfig {
            reference_mv: MAX_DETECTOR_MV,
            silence_baseline_mv: MAX_DETECTOR_MV,
            threshold_mv: MAX_DETECTOR_MV,
            ..Default::default()
        };
        assert_eq!(at_limit.validate(), Ok(()));
    }
}
