//! Square-wave generator task
//!
//! Runs its own loop instead of [`drive`](super::drive) so that every
//! edge is logged.

use benchloop_core::program::PulseLoop;
use benchloop_core::ControlLoop;
use benchloop_hal::Clock;
use benchloop_hal_rp2040::RpClock;
use defmt::*;
use embassy_time::Timer;

use crate::board::{BoardAnalogOutput, BoardPin};

/// Toggle DAC1 and the pulse pin
#[embassy_executor::task]
pub async fn pulse_task(mut control: PulseLoop<BoardAnalogOutput, BoardPin>) {
    info!("Square-wave task started");

    let clock = RpClock;
    control.start(clock.now_ms());

    loop {
        if let Some(edge) = control.step(clock.now_ms()) {
            debug!(
                "Pulse edge: {:?} at {} ms",
                edge.phase,
                control.state().last_transition_ms
            );
        }
        Timer::after_millis(u64::from(control.idle_ms())).await;
    }
}
