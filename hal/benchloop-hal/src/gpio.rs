//! Digital output abstraction

/// Logic level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Check if this is the high level
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// The opposite level
    pub const fn inverted(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Digital output pin
///
/// Implementations handle the register writes (or active-low inversion)
/// for the specific board.
pub trait DigitalOutput {
    /// Drive the pin to `level`
    fn set_level(&mut self, level: Level);

    /// Last level written to the pin
    fn level(&self) -> Level;

    /// Set the pin high (logic 1)
    fn set_high(&mut self) {
        self.set_level(Level::High);
    }

    /// Set the pin low (logic 0)
    fn set_low(&mut self) {
        self.set_level(Level::Low);
    }
}

impl<T: DigitalOutput + ?Sized> DigitalOutput for &mut T {
    fn set_level(&mut self, level: Level) {
        (**self).set_level(level)
    }

    fn level(&self) -> Level {
        (**self).level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(Level::High.is_high());
        assert_eq!(Level::Low.inverted(), Level::High);
    }

    struct Latch(Level);

    impl DigitalOutput for Latch {
        fn set_level(&mut self, level: Level) {
            self.0 = level;
        }

        fn level(&self) -> Level {
            self.0
        }
    }

    #[test]
    fn test_default_setters() {
        let mut pin = Latch(Level::Low);
        pin.set_high();
        assert_eq!(pin.level(), Level::High);
        pin.set_low();
        assert_eq!(pin.level(), Level::Low);
    }
}
