//! Board-agnostic control loops for the benchloop firmware images
//!
//! This crate contains all application logic that does not depend on a
//! specific board:
//!
//! - Calibration constants and the linear sample mapping
//! - The three programs as pure poll functions (averager, threshold
//!   monitor, square-wave generator)
//! - Loop runners binding each program to hardware capabilities
//! - An in-memory bench for scripted host-side runs

#![no_std]
#![deny(unsafe_code)]

pub mod bench;
pub mod config;
pub mod program;
pub mod scale;

pub use program::ControlLoop;
