//! Threshold monitor image
//!
//! Drives GPIO16 active while the scaled A1 sample exceeds the threshold.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Output, Pull};
use embassy_rp::uart::Uart;
use {defmt_rtt as _, panic_probe as _};

use benchloop_core::program::{Monitor, MonitorLoop};
use benchloop_drivers::PinOutput;
use benchloop_firmware::board;
use benchloop_firmware::tasks;
use benchloop_hal_rp2040::{uart_config, RpAnalogInput};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("benchloop threshold monitor starting...");

    let p = embassy_rp::init(Default::default());

    // Opened for parity with the bench setup; nothing is sent or received
    let _serial = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config(&board::SERIAL));
    info!("Serial opened at {} baud", board::SERIAL.baudrate);

    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let inputs = [
        Channel::new_pin(p.PIN_26, Pull::None),
        Channel::new_pin(p.PIN_27, Pull::None),
    ];
    let adc = RpAnalogInput::new(adc, inputs, board::ADC_BITS);

    let idle = board::MONITOR.active.inverted();
    let pin = PinOutput::new(Output::new(p.PIN_16, board::gpio_level(idle)), false, idle);

    info!(
        "Threshold: {} / 10, active {:?}",
        board::MONITOR.threshold_x10,
        board::MONITOR.active
    );

    let monitor = Monitor::new(board::CALIBRATION, board::MONITOR);
    spawner
        .spawn(tasks::monitor_task(unwrap!(MonitorLoop::new(monitor, adc, pin))))
        .unwrap();

    info!("Threshold monitor running");

    // Keeps the serial port alive; all work happens in the spawned task
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
