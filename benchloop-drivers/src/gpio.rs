//! Digital output over `embedded_hal::digital::OutputPin`

use benchloop_hal::{DigitalOutput, Level};
use embedded_hal::digital::{OutputPin, PinState};

/// Digital output pin
///
/// With `inverted` set, logic high drives the wire low (active-low
/// wiring, e.g. an LED to the supply rail).
pub struct PinOutput<P> {
    pin: P,
    inverted: bool,
    level: Level,
}

impl<P: OutputPin> PinOutput<P> {
    /// Wrap a pin and drive it to `initial`
    ///
    /// Create the underlying pin at the matching wire level so the output
    /// does not glitch before the first write.
    pub fn new(pin: P, inverted: bool, initial: Level) -> Self {
        let mut out = Self {
            pin,
            inverted,
            level: initial,
        };
        out.set_level(initial);
        out
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> DigitalOutput for PinOutput<P> {
    fn set_level(&mut self, level: Level) {
        let wire = if self.inverted { level.inverted() } else { level };
        let state = PinState::from(wire.is_high());

        if self.pin.set_state(state).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Digital output write failed");
            return;
        }
        self.level = level;
    }

    fn level(&self) -> Level {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    // Mock pin for testing
    struct MockPin {
        high: bool,
        fail: bool,
    }

    #[derive(Debug)]
    struct MockError;

    impl Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for MockPin {
        type Error = MockError;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.high = true;
            Ok(())
        }
    }

    struct PlainPin(bool);

    impl ErrorType for PlainPin {
        type Error = Infallible;
    }

    impl OutputPin for PlainPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0 = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0 = true;
            Ok(())
        }
    }

    #[test]
    fn test_active_high() {
        let mut out = PinOutput::new(PlainPin(false), false, Level::Low);
        out.set_high();
        assert_eq!(out.level(), Level::High);
        assert!(out.into_inner().0);
    }

    #[test]
    fn test_active_low() {
        let mut out = PinOutput::new(PlainPin(true), true, Level::Low);
        out.set_level(Level::High);
        assert_eq!(out.level(), Level::High);
        assert!(!out.pin.0);

        out.set_low();
        assert!(out.pin.0);
    }

    #[test]
    fn test_failed_write_keeps_level() {
        let mut out = PinOutput::new(
            MockPin {
                high: false,
                fail: false,
            },
            false,
            Level::Low,
        );
        out.set_high();
        assert!(out.pin.high);

        out.pin.fail = true;
        out.set_low();
        assert_eq!(out.level(), Level::High);
        assert!(out.pin.high);
    }

    #[test]
    fn test_active_low_starts_inactive() {
        // Active-low program output idles high
        let out = PinOutput::new(PlainPin(true), false, Level::High);
        assert_eq!(out.level(), Level::High);
        assert!(out.pin.0);

        let out = PinOutput::new(PlainPin(true), true, Level::Low);
        assert_eq!(out.level(), Level::Low);
        assert!(out.pin.0);
    }

    #[test]
    fn test_initial_level_drives_pin() {
        let out = PinOutput::new(PlainPin(true), false, Level::Low);
        assert_eq!(out.level(), Level::Low);
        assert!(!out.into_inner().0);
    }
}
