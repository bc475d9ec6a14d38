//! Alarm loop controller
//!
//! The controller owns the detector and every collaborator, and runs one
//! iteration of the polling loop per [`AlarmController::tick`]:
//!
//! 1. Disable button (only acts while the alarm is active)
//! 2. Reset button
//! 3. One microphone sample through the detector
//! 4. Sleep for the sample interval
//!
//! Each button action is followed by its own debounce sleep before the
//! next step, so a button press always takes effect before the next sample
//! is evaluated. Everything runs on the caller's context; there is no
//! shared state and no locking.

use embedded_hal::delay::DelayNs;

use crate::config::{DetectorConfig, LoopTiming};
use crate::detector::{AlarmState, NoiseDetector, SampleOutcome};
use crate::traits::{
    AudioSensor, Button, Buzzer, DisplayError, Indicators, SensorError, StatusDisplay,
};

/// Errors reported by a loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    /// Microphone sample could not be taken
    Sensor(SensorError),
    /// Display refresh failed
    Display(DisplayError),
}

impl From<SensorError> for ControllerError {
    fn from(e: SensorError) -> Self {
        ControllerError::Sensor(e)
    }
}

impl From<DisplayError> for ControllerError {
    fn from(e: DisplayError) -> Self {
        ControllerError::Display(e)
    }
}

/// What happened during one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// The disable button silenced an active alarm
    pub disabled: bool,
    /// The reset button cleared the activation count
    pub reset: bool,
    /// Detector result for this iteration's sample
    pub sample: Option<SampleOutcome>,
}

/// Hardware collaborators owned by the controller
pub struct AlarmParts<B, S, O, Z, D> {
    /// Silences an active alarm
    pub disable_button: B,
    /// Clears the activation count
    pub reset_button: B,
    /// Microphone
    pub sensor: S,
    /// Quiet/alarm LEDs
    pub indicators: O,
    /// PWM buzzer
    pub buzzer: Z,
    /// Activation counter screen
    pub display: D,
}

/// Single-context alarm loop
pub struct AlarmController<B, S, O, Z, D, T> {
    parts: AlarmParts<B, S, O, Z, D>,
    detector: NoiseDetector,
    timing: LoopTiming,
    delay: T,
}

impl<B, S, O, Z, D, T> AlarmController<B, S, O, Z, D, T>
where
    B: Button,
    S: AudioSensor,
    O: Indicators,
    Z: Buzzer,
    D: StatusDisplay,
    T: DelayNs,
{
    /// Create a controller with a fresh detector
    pub fn new(
        parts: AlarmParts<B, S, O, Z, D>,
        detector: DetectorConfig,
        timing: LoopTiming,
        delay: T,
    ) -> Self {
        Self {
            parts,
            detector: NoiseDetector::new(detector),
            timing,
            delay,
        }
    }

    /// Put outputs in the quiet configuration and draw the first screen
    pub fn start(&mut self) -> Result<(), ControllerError> {
        self.parts.indicators.show_alarm(false);
        self.parts.buzzer.stop();
        self.refresh_display()?;
        Ok(())
    }

    /// Run one loop iteration
    ///
    /// A sensor or display fault does not cut the iteration short: the
    /// remaining steps and the final sleep still run, then the first fault
    /// is returned.
    pub fn tick(&mut self) -> Result<TickReport, ControllerError> {
        let mut report = TickReport::default();
        let mut fault: Option<ControllerError> = None;

        if self.parts.disable_button.is_pressed() && self.detector.is_active() {
            self.detector.disable();
            self.parts.buzzer.stop();
            self.parts.indicators.show_alarm(false);
            report.disabled = true;
            self.delay.delay_ms(self.timing.debounce_ms);
        }

        if self.parts.reset_button.is_pressed() {
            self.detector.reset();
            if let Err(e) = self.refresh_display() {
                fault.get_or_insert(e.into());
            }
            report.reset = true;
            self.delay.delay_ms(self.timing.debounce_ms);
        }

        match self.parts.sensor.read_raw() {
            Ok(raw) => {
                let outcome = self.detector.process_sample(raw);
                if let SampleOutcome::Triggered { .. } = outcome {
                    self.parts.indicators.show_alarm(true);
                    self.parts.buzzer.start();
                    if let Err(e) = self.refresh_display() {
                        fault.get_or_insert(e.into());
                    }
                }
                report.sample = Some(outcome);
            }
            Err(e) => {
                fault.get_or_insert(e.into());
            }
        }

        self.delay.delay_ms(self.timing.sample_interval_ms);

        match fault {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }

    /// Redraw the activation counter
    pub fn refresh_display(&mut self) -> Result<(), DisplayError> {
        self.parts
            .display
            .show_activations(self.detector.alarm().total_activations)
    }

    /// Current alarm bookkeeping
    pub fn alarm(&self) -> &AlarmState {
        self.detector.alarm()
    }

    /// Borrow the collaborators
    pub fn parts(&self) -> &AlarmParts<B, S, O, Z, D> {
        &self.parts
    }

    /// Mutably borrow the collaborators
    pub fn parts_mut(&mut self) -> &mut AlarmParts<B, S, O, Z, D> {
        &mut self.parts
    }
}
