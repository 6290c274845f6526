//! Threshold monitor task

use benchloop_core::program::MonitorLoop;
use benchloop_hal_rp2040::RpClock;
use defmt::*;

use super::drive;
use crate::board::{BoardAnalogInput, BoardPin};

/// Drive the monitor pin from A1
#[embassy_executor::task]
pub async fn monitor_task(control: MonitorLoop<BoardAnalogInput, BoardPin>) {
    info!("Threshold monitor task started");
    drive(control, RpClock).await
}
