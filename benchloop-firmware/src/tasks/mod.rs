//! Embassy tasks
//!
//! One task per firmware image; each owns its loop and never returns.

pub mod averager;
pub mod monitor;
pub mod pulse;

pub use averager::averager_task;
pub use monitor::monitor_task;
pub use pulse::pulse_task;

use benchloop_core::ControlLoop;
use benchloop_hal::Clock;
use defmt::*;
use embassy_futures::yield_now;
use embassy_time::Timer;

/// Polls between heartbeat trace messages
const HEARTBEAT_POLLS: u32 = 100_000;

/// Run a control loop forever
///
/// Loops without an idle delay yield to the executor between polls
/// instead of sleeping.
pub async fn drive<L: ControlLoop, C: Clock>(mut control: L, clock: C) -> ! {
    control.start(clock.now_ms());

    let mut polls: u32 = 0;
    loop {
        control.poll(clock.now_ms());

        match control.idle_ms() {
            0 => yield_now().await,
            ms => Timer::after_millis(u64::from(ms)).await,
        }

        polls = polls.wrapping_add(1);
        if polls % HEARTBEAT_POLLS == 0 {
            trace!("Loop heartbeat: {} polls", polls);
        }
    }
}
