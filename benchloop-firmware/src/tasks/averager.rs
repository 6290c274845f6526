//! Analog averager task

use benchloop_core::program::AveragerLoop;
use benchloop_hal_rp2040::RpClock;
use defmt::*;

use super::drive;
use crate::board::{BoardAnalogInput, BoardAnalogOutput};

/// Average A0 and A1 onto DAC0 and DAC1
#[embassy_executor::task]
pub async fn averager_task(control: AveragerLoop<BoardAnalogInput, BoardAnalogOutput>) {
    info!("Averager task started");
    drive(control, RpClock).await
}
