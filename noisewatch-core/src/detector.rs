//! Noise detector
//!
//! Converts raw microphone samples to a deviation from the silence
//! baseline and debounces them: only `required_detections` loud samples
//! in a row confirm a noise and trigger the alarm.
//!
//! All arithmetic is integer-only. Voltages are carried in microvolts,
//! which keeps the configured millivolt thresholds exact.

use crate::config::DetectorConfig;
use crate::state::{Event, State};

/// Snapshot of the alarm bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmState {
    /// Current state machine state
    pub state: State,
    /// Loud samples seen in a row (reset by any quiet sample)
    pub consecutive_detections: u32,
    /// Idle to Triggered transitions since boot or the last reset
    pub total_activations: u32,
}

impl AlarmState {
    /// Check if the alarm is active
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

/// What a single sample did to the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleOutcome {
    /// Level at or below the threshold; the streak was cleared
    Quiet,
    /// Level above the threshold, alarm not (newly) triggered
    Loud {
        /// Current streak length
        consecutive: u32,
    },
    /// This sample completed the streak and triggered the alarm
    Triggered {
        /// Activation count after this trigger
        total: u32,
    },
}

fn microvolts(mv: u32) -> u64 {
    mv as u64 * 1000
}

/// Debouncing noise detector that owns the alarm state
#[derive(Debug, Clone)]
pub struct NoiseDetector {
    config: DetectorConfig,
    alarm: AlarmState,
}

impl NoiseDetector {
    /// Create a detector in the Idle state with zeroed counters
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            alarm: AlarmState::default(),
        }
    }

    /// Get the current alarm bookkeeping
    pub fn alarm(&self) -> &AlarmState {
        &self.alarm
    }

    /// Check if the alarm is active
    pub fn is_active(&self) -> bool {
        self.alarm.is_active()
    }

    /// Convert a raw sample to microvolts
    ///
    /// `voltage = raw * reference / max_raw`. Samples above `max_raw`
    /// are clamped. The result never exceeds the reference voltage.
    pub fn raw_to_microvolts(&self, raw: u16) -> u64 {
        let raw = raw.min(self.config.max_raw) as u64;
        raw * microvolts(self.config.reference_mv) / self.config.max_raw.max(1) as u64
    }

    /// Deviation of a raw sample from the silence baseline, in microvolts
    pub fn level_microvolts(&self, raw: u16) -> u64 {
        let voltage_uv = self.raw_to_microvolts(raw);
        voltage_uv.abs_diff(microvolts(self.config.silence_baseline_mv))
    }

    /// Check if a raw sample is above the noise threshold
    pub fn is_loud(&self, raw: u16) -> bool {
        self.level_microvolts(raw) > microvolts(self.config.threshold_mv)
    }

    /// Feed one raw sample
    ///
    /// A quiet sample clears the streak. A loud sample extends it, and if
    /// the streak has reached `required_detections` while Idle the alarm
    /// triggers and the activation count goes up by exactly one.
    pub fn process_sample(&mut self, raw: u16) -> SampleOutcome {
        if !self.is_loud(raw) {
            self.alarm.consecutive_detections = 0;
            return SampleOutcome::Quiet;
        }

        self.alarm.consecutive_detections = self.alarm.consecutive_detections.saturating_add(1);

        let confirmed =
            self.alarm.consecutive_detections >= self.config.required_detections as u32;
        if confirmed && self.alarm.state == State::Idle {
            self.alarm.state = self.alarm.state.transition(Event::NoiseConfirmed);
            self.alarm.total_activations = self.alarm.total_activations.saturating_add(1);
            return SampleOutcome::Triggered {
                total: self.alarm.total_activations,
            };
        }

        SampleOutcome::Loud {
            consecutive: self.alarm.consecutive_detections,
        }
    }

    /// Handle the disable signal
    ///
    /// Returns `true` if the alarm was active and is now Idle. The streak
    /// counter is left alone, so a still-loud room re-triggers on the next
    /// loud sample.
    pub fn disable(&mut self) -> bool {
        let was_active = self.alarm.is_active();
        self.alarm.state = self.alarm.state.transition(Event::Disable);
        was_active
    }

    /// Handle the reset signal: zero the activation count in any state
    pub fn reset(&mut self) {
        self.alarm.state = self.alarm.state.transition(Event::ResetCount);
        self.alarm.total_activations = 0;
    }
}
