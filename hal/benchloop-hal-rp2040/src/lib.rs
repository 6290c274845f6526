//! RP2040 support for the benchloop firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `benchloop-hal` capabilities:
//!
//! - ADC sampling with Arduino-compatible readout resolution
//! - Millisecond clock on top of the embassy time driver
//! - UART line settings for the (otherwise unused) serial port
//!
//! Digital and PWM outputs need no chip-specific code: embassy-rp
//! implements the `embedded-hal` traits, so `benchloop-drivers` adapts
//! them directly.

#![no_std]

pub mod adc;
pub mod clock;
pub mod uart;

pub use adc::RpAnalogInput;
pub use clock::RpClock;
pub use uart::uart_config;
