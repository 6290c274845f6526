//! Threshold monitor
//!
//! Drives a digital pin from one scaled input. Pure combinational logic:
//! no hysteresis and no debouncing, so a noisy input sitting on the
//! threshold makes the pin chatter.

use benchloop_hal::{AnalogInput, DigitalOutput, Level};

use super::ControlLoop;
use crate::config::{Calibration, ConfigError, MonitorConfig};

/// Monitor transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Monitor {
    calibration: Calibration,
    config: MonitorConfig,
}

impl Monitor {
    /// Create a monitor
    pub const fn new(calibration: Calibration, config: MonitorConfig) -> Self {
        Self {
            calibration,
            config,
        }
    }

    /// Monitor settings
    pub const fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Input calibration
    pub const fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Check whether a scaled value is above the threshold
    pub const fn exceeds(&self, scaled: i32) -> bool {
        scaled * 10 > self.config.threshold_x10
    }

    /// Pin level for a scaled value
    pub const fn evaluate(&self, scaled: i32) -> Level {
        if self.exceeds(scaled) {
            self.config.active
        } else {
            self.config.active.inverted()
        }
    }

    /// Pin level for one raw sample
    pub const fn poll(&self, sample: u16) -> Level {
        self.evaluate(self.calibration.scale(sample))
    }
}

/// Monitor bound to an ADC and an output pin
pub struct MonitorLoop<I, P> {
    monitor: Monitor,
    adc: I,
    pin: P,
}

impl<I: AnalogInput, P: DigitalOutput> MonitorLoop<I, P> {
    /// Create a new monitor loop
    ///
    /// Fails when the ADC resolution differs from the one the monitor was
    /// calibrated for.
    pub fn new(monitor: Monitor, adc: I, pin: P) -> Result<Self, ConfigError> {
        if adc.full_scale() != monitor.calibration.full_scale() {
            return Err(ConfigError::ResolutionMismatch);
        }
        Ok(Self { monitor, adc, pin })
    }

    /// Get access to the output pin
    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<I: AnalogInput, P: DigitalOutput> ControlLoop for MonitorLoop<I, P> {
    fn poll(&mut self, _now_ms: u32) {
        let sample = self.adc.read(self.monitor.config.input);
        self.pin.set_level(self.monitor.poll(sample));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchloop_hal::Channel;

    struct MockAdc {
        sample: u16,
        last_channel: Option<Channel>,
        full_scale: u16,
    }

    impl AnalogInput for MockAdc {
        fn full_scale(&self) -> u16 {
            self.full_scale
        }

        fn read(&mut self, channel: Channel) -> u16 {
            self.last_channel = Some(channel);
            self.sample
        }
    }

    struct MockPin {
        level: Level,
        writes: u32,
    }

    impl DigitalOutput for MockPin {
        fn set_level(&mut self, level: Level) {
            self.level = level;
            self.writes += 1;
        }

        fn level(&self) -> Level {
            self.level
        }
    }

    fn reference() -> Monitor {
        Monitor::new(Calibration::REFERENCE, MonitorConfig::default())
    }

    #[test]
    fn test_threshold_boundary() {
        let monitor = reference();
        assert_eq!(monitor.evaluate(229), Level::Low);
        assert_eq!(monitor.evaluate(230), Level::High);
        assert_eq!(monitor.evaluate(0), Level::Low);
        assert_eq!(monitor.evaluate(318), Level::High);
    }

    #[test]
    fn test_active_low_pin() {
        let config = MonitorConfig::new(Channel(1), 2295, Level::Low).unwrap();
        let monitor = Monitor::new(Calibration::REFERENCE, config);
        assert_eq!(monitor.evaluate(229), Level::High);
        assert_eq!(monitor.evaluate(230), Level::Low);
    }

    #[test]
    fn test_poll_raw_samples() {
        let monitor = reference();
        // scale(784) = 229, scale(785) = 229, scale(786) = 230
        assert_eq!(monitor.poll(784), Level::Low);
        assert_eq!(monitor.poll(785), Level::Low);
        assert_eq!(monitor.poll(786), Level::High);
    }

    #[test]
    fn test_loop_drives_pin_every_poll() {
        let adc = MockAdc {
            sample: 900,
            last_channel: None,
            full_scale: 1023,
        };
        let pin = MockPin {
            level: Level::Low,
            writes: 0,
        };
        let mut looped = MonitorLoop::new(reference(), adc, pin).unwrap();

        looped.poll(0);
        looped.poll(1);

        assert_eq!(looped.adc.last_channel, Some(Channel(1)));
        assert_eq!(looped.pin().level(), Level::High);
        assert_eq!(looped.pin().writes, 2);
    }

    #[test]
    fn test_loop_rejects_other_resolution() {
        let adc = MockAdc {
            sample: 2048,
            last_channel: None,
            full_scale: 4095,
        };
        let pin = MockPin {
            level: Level::Low,
            writes: 0,
        };
        assert!(matches!(
            MonitorLoop::new(reference(), adc, pin),
            Err(ConfigError::ResolutionMismatch)
        ));
    }
}
