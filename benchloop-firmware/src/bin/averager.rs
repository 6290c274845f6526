//! Analog averager image
//!
//! Reads A0 and A1, writes the mean of both scaled samples to DAC0 and
//! DAC1.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::Pull;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::Uart;
use {defmt_rtt as _, panic_probe as _};

use benchloop_core::config::AveragerConfig;
use benchloop_core::program::{Averager, AveragerLoop};
use benchloop_drivers::PwmAnalogOutput;
use benchloop_firmware::board;
use benchloop_firmware::tasks;
use benchloop_hal_rp2040::{uart_config, RpAnalogInput};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("benchloop averager starting...");

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

    let pwm = Pwm::new_output_ab(p.PWM_SLICE7, p.PIN_14, p.PIN_15, PwmConfig::default());
    let (dac0, dac1) = pwm.split();
    let dac = PwmAnalogOutput::new([unwrap!(dac0), unwrap!(dac1)]);

    let (dac_lo_mv, dac_hi_mv) = board::CALIBRATION.dac_window_mv();
    info!(
        "Calibration: {} - {} mV of {} mV, {} - {} counts",
        dac_lo_mv,
        dac_hi_mv,
        board::CALIBRATION.vref_mv(),
        board::CALIBRATION.lo(),
        board::CALIBRATION.hi()
    );

    let averager = Averager::new(board::CALIBRATION, AveragerConfig::default());
    spawner
        .spawn(tasks::averager_task(unwrap!(AveragerLoop::new(averager, adc, dac))))
        .unwrap();

    info!("Averager running");

    // Keeps the serial port alive; all work happens in the spawned task
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
