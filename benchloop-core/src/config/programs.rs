//! Per-program configuration

use benchloop_hal::{Channel, Level};

/// Errors in program parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Threshold lies outside the scaled range, so the output could never change
    ThresholdOutOfRange,
    /// Square-wave period of zero
    ZeroPeriod,
    /// Input converter full scale differs from the calibration's
    ResolutionMismatch,
}

/// Analog averager channel assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AveragerConfig {
    /// Input channels (A0, A1)
    pub inputs: [Channel; 2],
    /// Output channels, both driven with the same level (DAC0, DAC1)
    pub outputs: [Channel; 2],
}

impl Default for AveragerConfig {
    fn default() -> Self {
        Self {
            inputs: [Channel(0), Channel(1)],
            outputs: [Channel(0), Channel(1)],
        }
    }
}

/// Threshold monitor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// Input channel (A1)
    pub input: Channel,
    /// Threshold on the scaled value (× 10), exceeded strictly
    pub threshold_x10: i32,
    /// Pin level meaning "above threshold"
    pub active: Level,
}

impl MonitorConfig {
    /// Threshold used by the reference bench: 229.5
    pub const DEFAULT_THRESHOLD_X10: i32 = 2295;

    /// Create a monitor configuration, checking the threshold is reachable
    pub const fn new(input: Channel, threshold_x10: i32, active: Level) -> Result<Self, ConfigError> {
        // Must lie inside the calibrated window [0, 255)
        if threshold_x10 < 0 || threshold_x10 >= 2550 {
            return Err(ConfigError::ThresholdOutOfRange);
        }
        Ok(Self {
            input,
            threshold_x10,
            active,
        })
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            input: Channel(1),
            threshold_x10: Self::DEFAULT_THRESHOLD_X10,
            active: Level::High,
        }
    }
}

/// Square-wave generator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseConfig {
    /// Analog output channel (DAC1)
    pub output: Channel,
    /// Time between transitions in ms; a transition fires once elapsed
    /// time strictly exceeds it
    pub period_ms: u32,
    /// Fixed delay after every poll in ms
    pub grain_ms: u32,
    /// Digital pin level for the ACTIVE phase
    pub active: Level,
}

impl PulseConfig {
    /// Reference bench half period in ms
    pub const DEFAULT_PERIOD_MS: u32 = 100;

    /// Reference bench poll delay in ms
    pub const DEFAULT_GRAIN_MS: u32 = 1;

    /// Create a generator configuration
    pub const fn new(
        output: Channel,
        period_ms: u32,
        grain_ms: u32,
        active: Level,
    ) -> Result<Self, ConfigError> {
        if period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(Self {
            output,
            period_ms,
            grain_ms,
            active,
        })
    }
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            output: Channel(1),
            period_ms: Self::DEFAULT_PERIOD_MS,
            grain_ms: Self::DEFAULT_GRAIN_MS,
            active: Level::High,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_threshold_range() {
        assert!(MonitorConfig::new(Channel(1), 2295, Level::High).is_ok());
        assert!(MonitorConfig::new(Channel(1), 0, Level::High).is_ok());
        assert_eq!(
            MonitorConfig::new(Channel(1), -5, Level::High),
            Err(ConfigError::ThresholdOutOfRange)
        );
        assert_eq!(
            MonitorConfig::new(Channel(1), 2550, Level::High),
            Err(ConfigError::ThresholdOutOfRange)
        );
    }

    #[test]
    fn test_pulse_zero_period() {
        assert_eq!(
            PulseConfig::new(Channel(1), 0, 1, Level::High),
            Err(ConfigError::ZeroPeriod)
        );
        let config = PulseConfig::new(Channel(1), 100, 1, Level::High).unwrap();
        assert_eq!(config, PulseConfig::default());
    }
}
