//! Analog output over `embedded_hal::pwm::SetDutyCycle`
//!
//! Boards without a DAC emulate `analogWrite` with PWM: the 8-bit level
//! becomes a duty cycle of `value / 255`. Full scale is driven fully on,
//! zero fully off, so the extremes have no switching edges.

use benchloop_hal::{AnalogOutput, Channel};
use embedded_hal::pwm::SetDutyCycle;

/// Analog output over `N` PWM channels
///
/// Channel `i` drives `channels[i]`; writes to other channels are ignored.
pub struct PwmAnalogOutput<P, const N: usize> {
    channels: [P; N],
}

impl<P: SetDutyCycle, const N: usize> PwmAnalogOutput<P, N> {
    /// Wrap PWM channels, starting them fully off
    pub fn new(mut channels: [P; N]) -> Self {
        for channel in channels.iter_mut() {
            if channel.set_duty_cycle_fully_off().is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("PWM channel failed to start off");
            }
        }
        Self { channels }
    }

    /// Get access to one PWM channel
    pub fn channel(&self, channel: Channel) -> Option<&P> {
        self.channels.get(channel.index())
    }
}

impl<P: SetDutyCycle, const N: usize> AnalogOutput for PwmAnalogOutput<P, N> {
    fn write(&mut self, channel: Channel, value: u8) {
        let Some(pwm) = self.channels.get_mut(channel.index()) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("PWM channel {} not configured", channel);
            return;
        };

        let result = match value {
            0 => pwm.set_duty_cycle_fully_off(),
            u8::MAX => pwm.set_duty_cycle_fully_on(),
            _ => pwm.set_duty_cycle_fraction(u16::from(value), u16::from(u8::MAX)),
        };

        if result.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("PWM duty update failed on channel {}", channel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::{Error, ErrorKind, ErrorType};

    // Mock PWM channel with a 1000-step counter
    struct MockPwm {
        duty: u16,
    }

    impl ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    fn outputs() -> PwmAnalogOutput<MockPwm, 2> {
        PwmAnalogOutput::new([MockPwm { duty: 7 }, MockPwm { duty: 7 }])
    }

    #[test]
    fn test_starts_off() {
        let out = outputs();
        assert_eq!(out.channel(Channel(0)).unwrap().duty, 0);
        assert_eq!(out.channel(Channel(1)).unwrap().duty, 0);
    }

    #[test]
    fn test_duty_scaling() {
        let mut out = outputs();

        out.write(Channel(0), 255);
        assert_eq!(out.channel(Channel(0)).unwrap().duty, 1000);

        // 1000 * 51 / 255 = 200
        out.write(Channel(1), 51);
        assert_eq!(out.channel(Channel(1)).unwrap().duty, 200);

        out.write(Channel(0), 0);
        assert_eq!(out.channel(Channel(0)).unwrap().duty, 0);
    }

    #[test]
    fn test_unknown_channel_ignored() {
        let mut out = outputs();
        out.write(Channel(5), 128);
        assert!(out.channel(Channel(5)).is_none());
        assert_eq!(out.channel(Channel(0)).unwrap().duty, 0);
    }

    // PWM channel whose updates fail while `fail` is set
    struct FlakyPwm {
        duty: u16,
        fail: bool,
    }

    #[derive(Debug)]
    struct FlakyError;

    impl Error for FlakyError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for FlakyPwm {
        type Error = FlakyError;
    }

    impl SetDutyCycle for FlakyPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.fail {
                return Err(FlakyError);
            }
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_failed_start_keeps_channel() {
        let mut out = PwmAnalogOutput::new([FlakyPwm { duty: 7, fail: true }]);
        assert_eq!(out.channel(Channel(0)).unwrap().duty, 7);

        out.channels[0].fail = false;
        out.write(Channel(0), 255);
        assert_eq!(out.channel(Channel(0)).unwrap().duty, 1000);
    }
}
