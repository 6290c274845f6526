//! Board constants and capability types
//!
//! Constants come from `board.toml` through build.rs. Invalid values fail
//! the build twice over: build.rs rejects them, and the `const` items
//! below are evaluated at compile time.
//!
//! Pin assignment (Raspberry Pi Pico):
//!
//! | Signal        | GPIO | Peripheral  |
//! |---------------|------|-------------|
//! | A0            | 26   | ADC0        |
//! | A1            | 27   | ADC1        |
//! | DAC0          | 14   | PWM7 A      |
//! | DAC1          | 15   | PWM7 B      |
//! | Monitor pin   | 16   | GPIO        |
//! | Pulse pin     | 17   | GPIO        |
//! | Serial TX/RX  | 0/1  | UART0       |

use benchloop_core::config::{Calibration, MonitorConfig, PulseConfig, SerialConfig};
use benchloop_drivers::{PinOutput, PwmAnalogOutput};
use benchloop_hal::{Channel, Level};
use benchloop_hal_rp2040::RpAnalogInput;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
}

pub use generated::ADC_BITS;

/// Analog inputs A0 and A1
pub type BoardAnalogInput = RpAnalogInput<'static, 2>;

/// Analog outputs DAC0 and DAC1 (PWM emulated)
pub type BoardAnalogOutput = PwmAnalogOutput<PwmOutput<'static>, 2>;

/// Digital output pin
pub type BoardPin = PinOutput<Output<'static>>;

/// Serial line settings
pub const SERIAL: SerialConfig = SerialConfig::with_baudrate(generated::SERIAL_BAUDRATE);

/// Input calibration window
pub const CALIBRATION: Calibration = match Calibration::new(
    generated::VREF_MV,
    generated::DAC_LO_MV,
    generated::DAC_HI_MV,
    (1u16 << generated::ADC_BITS) - 1,
) {
    Ok(calibration) => calibration,
    Err(_) => panic!("board.toml: invalid [calibration]"),
};

/// Threshold monitor settings (input A1)
pub const MONITOR: MonitorConfig = match MonitorConfig::new(
    Channel(1),
    generated::MONITOR_THRESHOLD_X10,
    active_level(generated::MONITOR_ACTIVE_HIGH),
) {
    Ok(config) => config,
    Err(_) => panic!("board.toml: invalid [monitor]"),
};

/// Square-wave generator settings (output DAC1)
pub const PULSE: PulseConfig = match PulseConfig::new(
    Channel(1),
    generated::PULSE_PERIOD_MS,
    generated::PULSE_GRAIN_MS,
    active_level(generated::PULSE_ACTIVE_HIGH),
) {
    Ok(config) => config,
    Err(_) => panic!("board.toml: invalid [pulse]"),
};

/// Wire level for creating an embassy-rp output pin at `level`
pub const fn gpio_level(level: Level) -> embassy_rp::gpio::Level {
    match level {
        Level::Low => embassy_rp::gpio::Level::Low,
        Level::High => embassy_rp::gpio::Level::High,
    }
}

const fn active_level(active_high: bool) -> Level {
    if active_high {
        Level::High
    } else {
        Level::Low
    }
}
