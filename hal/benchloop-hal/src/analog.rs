//! Analog channel abstractions
//!
//! Inputs produce raw conversion counts, outputs take 8-bit levels.
//! Channels are addressed by index so one implementation can own every
//! converter channel of a board.

/// Analog channel index
///
/// Index 0 is the first converter channel of the implementation (A0 or
/// DAC0 on Arduino-style boards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(pub u8);

impl Channel {
    /// Channel as an array index
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Analog input (ADC)
pub trait AnalogInput {
    /// Highest count a conversion can return
    ///
    /// For a 10-bit converter this is 1023.
    fn full_scale(&self) -> u16;

    /// Sample one channel and return the raw conversion count
    ///
    /// Takes `&mut self` because starting a conversion mutates the peripheral.
    fn read(&mut self, channel: Channel) -> u16;
}

/// Analog output (DAC or PWM)
pub trait AnalogOutput {
    /// Drive one channel to `value`, where 0 is off and 255 is full scale
    fn write(&mut self, channel: Channel, value: u8);
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn full_scale(&self) -> u16 {
        (**self).full_scale()
    }

    fn read(&mut self, channel: Channel) -> u16 {
        (**self).read(channel)
    }
}

impl<T: AnalogOutput + ?Sized> AnalogOutput for &mut T {
    fn write(&mut self, channel: Channel, value: u8) {
        (**self).write(channel, value)
    }
}
