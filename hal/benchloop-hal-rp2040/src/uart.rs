//! UART line settings
//!
//! RP2040 has two UART peripherals:
//! - UART0: GPIO 0/1, 12/13, 16/17
//! - UART1: GPIO 4/5, 8/9, 20/21, 24/25

use benchloop_hal::serial::{DataBits, Parity, StopBits};
use benchloop_hal::SerialConfig;
use embassy_rp::uart;

/// Convert line settings into an embassy-rp UART configuration
pub fn uart_config(config: &SerialConfig) -> uart::Config {
    let mut uart_config = uart::Config::default();
    uart_config.baudrate = config.baudrate;
    uart_config.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    uart_config.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    uart_config.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    uart_config
}
