//! Analog input calibration
//!
//! The analog outputs of the reference board only swing between two
//! reference voltages (0.55 V and 2.75 V on a 3.3 V supply). Inputs are
//! calibrated against the same window so that a loop-back from output to
//! input maps back onto the full `[0, 255]` range.

use crate::scale::{map_range, OUTPUT_MAX, OUTPUT_MIN};

/// Errors in a calibration constant set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Reference voltage is zero
    ZeroReference,
    /// Converter full scale is zero
    ZeroFullScale,
    /// A DAC window voltage lies above the reference voltage
    AboveReference,
    /// The derived input window `[lo, hi]` is empty or inverted
    EmptyRange,
}

/// Input calibration window
///
/// `lo` and `hi` are the raw input counts corresponding to the DAC low
/// and high reference voltages, truncated to whole counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    vref_mv: u16,
    dac_lo_mv: u16,
    dac_hi_mv: u16,
    full_scale: u16,
    lo: i32,
    hi: i32,
}

impl Calibration {
    /// Reference bench setup: 3.3 V supply, 0.55 V - 2.75 V DAC window,
    /// 10-bit input readout
    pub const REFERENCE: Self = match Self::new(3300, 550, 2750, 1023) {
        Ok(calibration) => calibration,
        Err(_) => panic!("reference calibration is invalid"),
    };

    /// Derive the input window from voltages in millivolts
    ///
    /// `full_scale` is the highest raw count of the input converter.
    pub const fn new(
        vref_mv: u16,
        dac_lo_mv: u16,
        dac_hi_mv: u16,
        full_scale: u16,
    ) -> Result<Self, CalibrationError> {
        if vref_mv == 0 {
            return Err(CalibrationError::ZeroReference);
        }
        if full_scale == 0 {
            return Err(CalibrationError::ZeroFullScale);
        }
        if dac_lo_mv > vref_mv || dac_hi_mv > vref_mv {
            return Err(CalibrationError::AboveReference);
        }

        let lo = counts_at(dac_lo_mv, vref_mv, full_scale);
        let hi = counts_at(dac_hi_mv, vref_mv, full_scale);
        if lo >= hi {
            return Err(CalibrationError::EmptyRange);
        }

        Ok(Self {
            vref_mv,
            dac_lo_mv,
            dac_hi_mv,
            full_scale,
            lo,
            hi,
        })
    }

    /// Raw count mapped to scaled value 0
    pub const fn lo(&self) -> i32 {
        self.lo
    }

    /// Raw count mapped to scaled value 255
    pub const fn hi(&self) -> i32 {
        self.hi
    }

    /// Reference voltage in millivolts
    pub const fn vref_mv(&self) -> u16 {
        self.vref_mv
    }

    /// DAC window in millivolts as `(low, high)`
    pub const fn dac_window_mv(&self) -> (u16, u16) {
        (self.dac_lo_mv, self.dac_hi_mv)
    }

    /// Highest raw count of the input converter
    pub const fn full_scale(&self) -> u16 {
        self.full_scale
    }

    /// Map a raw sample onto the output scale
    ///
    /// Not clamped: samples outside `[lo, hi]` extrapolate below 0 or
    /// above 255.
    pub const fn scale(&self, raw: u16) -> i32 {
        map_range(raw as i32, self.lo, self.hi, OUTPUT_MIN, OUTPUT_MAX)
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Raw count for a voltage, truncated
const fn counts_at(mv: u16, vref_mv: u16, full_scale: u16) -> i32 {
    (full_scale as u32 * mv as u32 / vref_mv as u32) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_window() {
        let cal = Calibration::REFERENCE;
        // 1023 / (3.3 / 0.55) = 170.5, 1023 / (3.3 / 2.75) = 852.5
        assert_eq!(cal.lo(), 170);
        assert_eq!(cal.hi(), 852);
        assert_eq!(Calibration::default(), cal);
    }

    #[test]
    fn test_scale_bounds() {
        let cal = Calibration::REFERENCE;
        assert_eq!(cal.scale(170), 0);
        assert_eq!(cal.scale(852), 255);
        assert!(cal.scale(0) < 0);
        assert!(cal.scale(1023) > 255);
    }

    #[test]
    fn test_twelve_bit_window() {
        let cal = Calibration::new(3300, 550, 2750, 4095).unwrap();
        assert_eq!(cal.lo(), 682);
        assert_eq!(cal.hi(), 3412);
    }

    #[test]
    fn test_rejects_bad_constants() {
        assert_eq!(
            Calibration::new(0, 550, 2750, 1023),
            Err(CalibrationError::ZeroReference)
        );
        assert_eq!(
            Calibration::new(3300, 550, 2750, 0),
            Err(CalibrationError::ZeroFullScale)
        );
        assert_eq!(
            Calibration::new(3300, 550, 3400, 1023),
            Err(CalibrationError::AboveReference)
        );
        assert_eq!(
            Calibration::new(3300, 2750, 550, 1023),
            Err(CalibrationError::EmptyRange)
        );
        assert_eq!(
            Calibration::new(3300, 1000, 1000, 1023),
            Err(CalibrationError::EmptyRange)
        );
    }

    #[test]
    fn test_coarse_converter_collapses_window() {
        // A 1-bit readout puts both window edges on count 0
        assert_eq!(
            Calibration::new(3300, 550, 2750, 1),
            Err(CalibrationError::EmptyRange)
        );
        // 3 bits still separates them: 7 * 550 / 3300 = 1, 7 * 2750 / 3300 = 5
        let cal = Calibration::new(3300, 550, 2750, 7).unwrap();
        assert_eq!((cal.lo(), cal.hi()), (1, 5));
    }
}
