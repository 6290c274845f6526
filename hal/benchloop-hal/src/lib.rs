//! benchloop hardware capability layer
//!
//! This crate defines the capabilities a control loop needs from a board:
//! sample an analog input, drive an analog output, set a digital pin and
//! read a millisecond clock. Chip-specific crates implement them, and the
//! host bench implements them in memory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Control loops (benchloop-core)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  benchloop-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┼───────────────┐
//!         ▼           ▼               ▼
//! ┌─────────────┐ ┌─────────────┐ ┌─────────────┐
//! │ benchloop-  │ │ benchloop-  │ │ core::bench │
//! │  drivers    │ │ hal-rp2040  │ │ (in-memory) │
//! └─────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! # Traits
//!
//! - [`analog::AnalogInput`], [`analog::AnalogOutput`] - ADC / DAC channels
//! - [`gpio::DigitalOutput`] - Digital output pin
//! - [`time::Clock`] - Free-running millisecond clock
//!
//! All operations are infallible: adapters over fallible peripherals decide
//! locally what a failed conversion or write turns into.

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod gpio;
pub mod serial;
pub mod time;

// Re-export key traits at crate root for convenience
pub use analog::{AnalogInput, AnalogOutput, Channel};
pub use gpio::{DigitalOutput, Level};
pub use serial::SerialConfig;
pub use time::Clock;
