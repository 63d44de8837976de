//! IMU sampling task
//!
//! Samples the head-board MPU-6050 at a fixed period and publishes the
//! latest reading. The head board powers up after the base board, so
//! sampling waits for the bus to settle before the first transaction;
//! starting too early hangs the bus.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_time::{Duration, Ticker, Timer};

use bematist_drivers::imu::Mpu6050;

use crate::channels::IMU_SAMPLE;

/// Head-board settle time after power-up
const BUS_SETTLE: Duration = Duration::from_secs(3);

/// Sampling period
const SAMPLE_PERIOD: Duration = Duration::from_millis(100);

/// IMU task - configures the sensor and publishes periodic samples
#[embassy_executor::task]
pub async fn imu_task(i2c: I2c<'static, Blocking>) {
    Timer::after(BUS_SETTLE).await;

    let mut imu = Mpu6050::new(i2c);
    if imu.setup().is_err() {
        error!("IMU setup failed, sensor dumps will read zero");
        return;
    }
    info!("IMU task started");

    let mut ticker = Ticker::every(SAMPLE_PERIOD);
    loop {
        ticker.next().await;
        match imu.sample() {
            Ok(sample) => IMU_SAMPLE.signal(sample),
            Err(_) => warn!("IMU sample failed"),
        }
    }
}
