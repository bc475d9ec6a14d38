//! Noisewatch - Noise-Triggered Alarm Firmware
//!
//! Main firmware binary for RP2040-based boards. Samples a microphone,
//! sounds a buzzer once the room stays loud for several samples in a row
//! and shows the activation count on an SSD1306 OLED.
//!
//! Everything runs in one polling loop on the main task.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::i2c::I2c;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use noisewatch_core::config::{parse_config, AlarmConfig};
use noisewatch_core::controller::AlarmParts;
use noisewatch_core::{AlarmController, AlarmState, SampleOutcome, TickReport};
use noisewatch_display::{AlarmScreen, DisplayBackend, Ssd1306};
use noisewatch_drivers::{ActiveLowButton, AnalogMicrophone, PwmBuzzer, StatusLeds};
use noisewatch_hal::gpio::Pull;
use noisewatch_hal::i2c::I2cConfig;
use noisewatch_hal_rp2040::{i2c, PwmOutput, RpAnalogInput, RpI2c, RpInput, RpOutput, RpPwm};

mod board;

/// Embedded configuration (compiled into firmware)
/// Edit alarm.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../alarm.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Noisewatch firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Status LEDs start in the quiet configuration
    let indicators = StatusLeds::new(
        RpOutput::new(p.PIN_11.into(), false),
        RpOutput::new(p.PIN_12.into(), false),
    );
    info!(
        "LEDs: quiet=GPIO{}, alarm=GPIO{}",
        board::LED_QUIET,
        board::LED_ALARM
    );

    // Buzzer on PWM slice 2, output B
    let pwm = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, PwmConfig::default());
    let buzzer = PwmBuzzer::new(
        RpPwm::new(pwm, PwmOutput::B, config.buzzer.clock_divider),
        &config.buzzer,
    );
    info!(
        "Buzzer: GPIO{}, divider={}, top={}, level={}",
        board::BUZZER,
        config.buzzer.clock_divider,
        config.buzzer.top,
        config.buzzer.level
    );

    // Buttons pull up, pressed = low
    let disable_button = ActiveLowButton::new(RpInput::new(p.PIN_5.into(), Pull::Up));
    let reset_button = ActiveLowButton::new(RpInput::new(p.PIN_6.into(), Pull::Up));
    info!(
        "Buttons: disable=GPIO{}, reset=GPIO{}",
        board::BUTTON_DISABLE,
        board::BUTTON_RESET
    );

    // Microphone on ADC2
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let mic_channel = Channel::new_pin(p.PIN_28, embassy_rp::gpio::Pull::None);
    let sensor = AnalogMicrophone::new(RpAnalogInput::new(adc, mic_channel));
    info!("Microphone: GPIO{}", board::MIC);

    // OLED on I2C1
    let i2c_config = i2c::embassy_config(&I2cConfig {
        frequency: config.display.i2c_frequency_hz,
    });
    let bus = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
    let panel = unwrap!(Ssd1306::new(RpI2c::new(bus), &config.display));
    let mut screen = AlarmScreen::new(panel, &config.screen.label);
    let (width, height) = screen.display().dimensions();
    match screen.start() {
        Ok(()) => info!(
            "Display: {}x{} at {=u8:#x} (SDA=GPIO{}, SCL=GPIO{})",
            width,
            height,
            screen.display().address(),
            board::I2C_SDA,
            board::I2C_SCL
        ),
        Err(e) => error!("Display init failed: {}", e),
    }

    let parts = AlarmParts {
        disable_button,
        reset_button,
        sensor,
        indicators,
        buzzer,
        display: screen,
    };
    let mut controller = AlarmController::new(parts, config.detector, config.timing, Delay);

    if let Err(e) = controller.start() {
        warn!("Initial screen failed: {}", e);
    }

    info!(
        "Monitoring: threshold={}mV around {}mV, {} samples every {}ms",
        config.detector.threshold_mv,
        config.detector.silence_baseline_mv,
        config.detector.required_detections,
        config.timing.sample_interval_ms
    );

    loop {
        match controller.tick() {
            Ok(report) => log_report(&report, controller.alarm()),
            Err(e) => warn!(
                "Loop fault: {} (active={}, activations={})",
                e,
                controller.alarm().is_active(),
                controller.alarm().total_activations
            ),
        }
    }
}

/// Parse the embedded alarm.toml, falling back to defaults
fn load_config() -> AlarmConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded alarm.toml");
            config
        }
        Err(e) => {
            warn!("alarm.toml rejected ({}), using defaults", e);
            AlarmConfig::default()
        }
    }
}

/// Log what a loop iteration changed
fn log_report(report: &TickReport, alarm: &AlarmState) {
    if report.disabled {
        info!("Alarm disabled");
    }
    if report.reset {
        info!("Activation count reset");
    }
    match report.sample {
        Some(SampleOutcome::Triggered { total }) => {
            info!("ALARM: noise confirmed, activation #{}", total)
        }
        Some(SampleOutcome::Loud { consecutive }) if !alarm.is_active() => {
            debug!("Loud sample {}", consecutive)
        }
        _ => {}
    }
}
