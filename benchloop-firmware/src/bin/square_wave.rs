//! Square-wave generator image
//!
//! Toggles DAC1 between 0 and full scale, and GPIO17 with it, each time
//! the configured period has elapsed.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::Uart;
use {defmt_rtt as _, panic_probe as _};

use benchloop_core::program::PulseLoop;
use benchloop_drivers::{PinOutput, PwmAnalogOutput};
use benchloop_firmware::board;
use benchloop_firmware::tasks;
use benchloop_hal_rp2040::uart_config;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("benchloop square-wave generator starting...");

    let p = embassy_rp::init(Default::default());

    // Opened for parity with the bench setup; nothing is sent or received
    let _serial = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config(&board::SERIAL));
    info!("Serial opened at {} baud", board::SERIAL.baudrate);

    let pwm = Pwm::new_output_ab(p.PWM_SLICE7, p.PIN_14, p.PIN_15, PwmConfig::default());
    let (dac0, dac1) = pwm.split();
    let dac = PwmAnalogOutput::new([unwrap!(dac0), unwrap!(dac1)]);

    // The generator starts INACTIVE
    let idle = board::PULSE.active.inverted();
    let pin = PinOutput::new(Output::new(p.PIN_17, board::gpio_level(idle)), false, idle);

    info!(
        "Period: {} ms, grain: {} ms",
        board::PULSE.period_ms,
        board::PULSE.grain_ms
    );

    spawner
        .spawn(tasks::pulse_task(PulseLoop::new(board::PULSE, dac, pin)))
        .unwrap();

    info!("Square-wave generator running");

    // Keeps the serial port alive; all work happens in the spawned task
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
