//! Configuration types
//!
//! Every value here is a compile-time constant in the firmware images.
//! The defaults reproduce the reference bench setup; the firmware build
//! script can override them from `board.toml`.

pub mod calibration;
pub mod programs;

pub use calibration::{Calibration, CalibrationError};
pub use programs::{AveragerConfig, ConfigError, MonitorConfig, PulseConfig};

pub use benchloop_hal::SerialConfig;
