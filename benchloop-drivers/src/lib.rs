//! Hardware adapters
//!
//! Implementations of the `benchloop-hal` capabilities on top of the
//! `embedded-hal` 1.0 traits, so any chip HAL with `OutputPin` and
//! `SetDutyCycle` support can host the control loops:
//!
//! - [`gpio::PinOutput`] - digital output with optional active-low wiring
//! - [`pwm::PwmAnalogOutput`] - analog output emulated with PWM duty cycle
//!
//! Peripheral errors stop here: the capabilities are infallible, so a
//! failed write is dropped (and logged with the `defmt` feature).

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;

pub use gpio::PinOutput;
pub use pwm::PwmAnalogOutput;
