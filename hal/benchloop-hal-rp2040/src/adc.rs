//! ADC sampling
//!
//! The RP2040 ADC converts with 12 bits. Sketches written against the
//! Arduino API expect `analogRead` to return 10-bit values, so readings
//! are shifted down to a configurable resolution.
//!
//! ADC inputs on the RP2040:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29

use benchloop_hal::{AnalogInput, Channel};
use embassy_rp::adc::{self, Adc, Blocking};

/// Native conversion width of the RP2040 ADC
pub const NATIVE_BITS: u8 = 12;

/// Reduce a native 12-bit conversion to `bits` of resolution
///
/// Widths of 12 or more leave the value untouched.
pub const fn reduce_resolution(raw: u16, bits: u8) -> u16 {
    if bits >= NATIVE_BITS {
        raw
    } else {
        raw >> (NATIVE_BITS - bits)
    }
}

/// Analog input over `N` RP2040 ADC channels
///
/// Capability channel `i` samples `channels[i]`. A failed conversion
/// returns the previous reading of that channel (0 before the first).
pub struct RpAnalogInput<'d, const N: usize> {
    adc: Adc<'d, Blocking>,
    channels: [adc::Channel<'d>; N],
    last: [u16; N],
    bits: u8,
}

impl<'d, const N: usize> RpAnalogInput<'d, N> {
    /// Create an input reading at `bits` of resolution (1-12)
    ///
    /// 10 bits matches Arduino `analogRead`.
    pub fn new(adc: Adc<'d, Blocking>, channels: [adc::Channel<'d>; N], bits: u8) -> Self {
        Self {
            adc,
            channels,
            last: [0; N],
            bits: bits.clamp(1, NATIVE_BITS),
        }
    }
}

impl<const N: usize> AnalogInput for RpAnalogInput<'_, N> {
    fn full_scale(&self) -> u16 {
        (1u16 << self.bits) - 1
    }

    fn read(&mut self, channel: Channel) -> u16 {
        let index = channel.index();
        let Some(input) = self.channels.get_mut(index) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("ADC channel {} not configured", channel);
            return 0;
        };

        match self.adc.blocking_read(input) {
            Ok(raw) => {
                let value = reduce_resolution(raw, self.bits);
                self.last[index] = value;
                value
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("ADC conversion failed on channel {}: {:?}", channel, _e);
                self.last[index]
            }
        }
    }
}
