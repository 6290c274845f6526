//! The three control programs
//!
//! Each program is split in two parts:
//!
//! - A pure poll function over plain values (samples in, levels out),
//!   tested without any hardware
//! - A loop runner that owns the hardware capabilities and implements
//!   [`ControlLoop`], driven by the firmware task or the host bench

pub mod averager;
pub mod monitor;
pub mod pulse;

pub use averager::{Averager, AveragerLoop};
pub use monitor::{Monitor, MonitorLoop};
pub use pulse::{Phase, PulseEdge, PulseLoop, PulseState};

/// One program bound to its hardware
///
/// The driver calls [`start`](ControlLoop::start) once, then
/// [`poll`](ControlLoop::poll) forever, waiting
/// [`idle_ms`](ControlLoop::idle_ms) between polls.
pub trait ControlLoop {
    /// One-time setup at `now_ms`
    fn start(&mut self, _now_ms: u32) {}

    /// Run one iteration of the loop body
    fn poll(&mut self, now_ms: u32);

    /// Fixed delay to insert after every poll
    fn idle_ms(&self) -> u32 {
        0
    }
}

impl<T: ControlLoop + ?Sized> ControlLoop for &mut T {
    fn start(&mut self, now_ms: u32) {
        (**self).start(now_ms)
    }

    fn poll(&mut self, now_ms: u32) {
        (**self).poll(now_ms)
    }

    fn idle_ms(&self) -> u32 {
        (**self).idle_ms()
    }
}
