//! Millisecond time source

/// Free-running millisecond clock
///
/// The counter wraps at `u32::MAX` (about 49.7 days), so intervals must
/// be measured with [`elapsed_ms`].
pub trait Clock {
    /// Milliseconds since the clock started
    fn now_ms(&self) -> u32;
}

/// Milliseconds from `since` to `now`, correct across one counter wrap
pub const fn elapsed_ms(since: u32, now: u32) -> u32 {
    now.wrapping_sub(since)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_plain() {
        assert_eq!(elapsed_ms(100, 250), 150);
        assert_eq!(elapsed_ms(7, 7), 0);
    }

    #[test]
    fn test_elapsed_across_wrap() {
        assert_eq!(elapsed_ms(u32::MAX - 9, 10), 20);
    }
}
