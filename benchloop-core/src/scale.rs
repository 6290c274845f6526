//! Linear sample mapping
//!
//! Integer re-mapping with the same arithmetic as the Arduino `map()`
//! helper: 32-bit signed math, division truncating toward zero, and no
//! clamping. Samples outside the input range extrapolate.

/// Lowest level an analog output accepts
pub const OUTPUT_MIN: i32 = 0;

/// Highest level an analog output accepts
pub const OUTPUT_MAX: i32 = 255;

/// Re-map `x` from `[in_lo, in_hi]` onto `[out_lo, out_hi]`
///
/// An empty input range (`in_lo == in_hi`) maps everything to `out_lo`.
pub const fn map_range(x: i32, in_lo: i32, in_hi: i32, out_lo: i32, out_hi: i32) -> i32 {
    let span = in_hi - in_lo;
    if span == 0 {
        return out_lo;
    }
    (x - in_lo) * (out_hi - out_lo) / span + out_lo
}

/// Clamp a computed level into the analog output range
pub const fn clamp_output(level: i32) -> u8 {
    if level < OUTPUT_MIN {
        OUTPUT_MIN as u8
    } else if level > OUTPUT_MAX {
        OUTPUT_MAX as u8
    } else {
        level as u8
    }
}
