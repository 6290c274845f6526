//! Analog averager
//!
//! Reads two inputs, scales both, and writes their truncated mean to two
//! outputs. Only the written value is clamped; an input below the
//! calibration window can pull the mean down even when the other input
//! is in range.

use benchloop_hal::{AnalogInput, AnalogOutput};

use super::ControlLoop;
use crate::config::{AveragerConfig, Calibration, ConfigError};
use crate::scale::clamp_output;

/// Mean of two scaled values, clamped for output
///
/// Division truncates toward zero.
pub const fn average_levels(a: i32, b: i32) -> u8 {
    clamp_output((a + b) / 2)
}

/// Averager transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Averager {
    calibration: Calibration,
    config: AveragerConfig,
}

impl Averager {
    /// Create an averager
    pub const fn new(calibration: Calibration, config: AveragerConfig) -> Self {
        Self {
            calibration,
            config,
        }
    }

    /// Channel assignment
    pub const fn config(&self) -> &AveragerConfig {
        &self.config
    }

    /// Input calibration
    pub const fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Output level for one pair of raw samples
    pub const fn poll(&self, samples: [u16; 2]) -> u8 {
        average_levels(
            self.calibration.scale(samples[0]),
            self.calibration.scale(samples[1]),
        )
    }
}

/// Averager bound to an ADC and a DAC
pub struct AveragerLoop<I, O> {
    averager: Averager,
    adc: I,
    dac: O,
}

impl<I: AnalogInput, O: AnalogOutput> AveragerLoop<I, O> {
    /// Create a new averager loop
    ///
    /// Fails when the ADC resolution differs from the one the averager
    /// was calibrated for.
    pub fn new(averager: Averager, adc: I, dac: O) -> Result<Self, ConfigError> {
        if adc.full_scale() != averager.calibration.full_scale() {
            return Err(ConfigError::ResolutionMismatch);
        }
        Ok(Self { averager, adc, dac })
    }

    /// Get access to the ADC
    pub fn adc(&self) -> &I {
        &self.adc
    }

    /// Get access to the DAC
    pub fn dac(&self) -> &O {
        &self.dac
    }
}

impl<I: AnalogInput, O: AnalogOutput> ControlLoop for AveragerLoop<I, O> {
    fn poll(&mut self, _now_ms: u32) {
        let [in0, in1] = self.averager.config.inputs;
        let samples = [self.adc.read(in0), self.adc.read(in1)];
        let level = self.averager.poll(samples);

        for channel in self.averager.config.outputs {
            self.dac.write(channel, level);
        }
    }
}
