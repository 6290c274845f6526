//! Millisecond clock on the embassy time driver

use benchloop_hal::Clock;
use embassy_time::Instant;

/// Milliseconds since boot, truncated to 32 bits like Arduino `millis()`
#[derive(Debug, Clone, Copy, Default)]
pub struct RpClock;

impl Clock for RpClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
