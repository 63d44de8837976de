//! Main control task
//!
//! The firmware's single "main context": owns the joint engine, the
//! interpreter, and the playback player, and is the only writer of
//! their state. Each tick it drains pending commands, advances
//! playback, and refreshes the pulse buffer through its handshake.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;
use heapless::String;

use bematist_core::interpreter::{Interpreter, MotionCode};
use bematist_core::joint::JointEngine;
use bematist_core::motion::MotionPlayer;
use bematist_core::telemetry::{self, ImuSample};

use crate::channels::{COMMAND_CHANNEL, IMU_SAMPLE};
use crate::storage::FlashSettings;
use crate::tasks::command::Command;

/// Control tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 20;

/// Heartbeat LED half-period, in ticks
const HEARTBEAT_TICKS: u32 = 25;

/// Control task - command handling, playback stepping, buffer refresh
#[embassy_executor::task]
pub async fn control_task(
    mut engine: JointEngine<'static, FlashSettings<'static>>,
    mut interpreter: Interpreter<MotionPlayer>,
    mut tx: BufferedUartTx,
    mut led: Output<'static>,
) {
    info!("Control task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let mut last_imu = ImuSample::default();
    let mut tick: u32 = 0;

    loop {
        ticker.next().await;

        while let Ok(command) = COMMAND_CHANNEL.try_receive() {
            handle_command(command, &mut engine, &mut interpreter, &mut tx, &last_imu).await;
        }

        if let Some(sample) = IMU_SAMPLE.try_take() {
            last_imu = sample;
        }

        // Start the next queued motion once the current one has run out
        if !interpreter.playback().playing() && interpreter.ready() {
            // Cannot fail: ready() was just checked
            let _ = interpreter.pop_code();
        }
        interpreter.playback_mut().advance();

        engine.update_angle();

        tick = tick.wrapping_add(1);
        if tick % HEARTBEAT_TICKS == 0 {
            led.toggle();
        }
    }
}

async fn handle_command(
    command: Command,
    engine: &mut JointEngine<'static, FlashSettings<'static>>,
    interpreter: &mut Interpreter<MotionPlayer>,
    tx: &mut BufferedUartTx,
    last_imu: &ImuSample,
) {
    match command {
        Command::Play { slot, loop_count } => {
            if interpreter.push_code(MotionCode::new(slot, loop_count)).is_err() {
                warn!("Motion queue full, dropping slot {}", slot);
            }
        }
        Command::Stop => interpreter.reset(),
        Command::SetAngle { joint, angle } => {
            if engine.set_angle(joint, angle).is_err() {
                warn!("Invalid joint id {}", joint);
            }
        }
        Command::SetAngleDiff { joint, diff } => {
            if engine.set_angle_diff(joint, diff).is_err() {
                warn!("Invalid joint id {}", joint);
            }
        }
        Command::SetMin { joint, angle } => {
            if let Err(e) = engine.set_min_angle(joint, angle) {
                warn!("set min failed: {:?}", e);
            }
        }
        Command::SetMax { joint, angle } => {
            if let Err(e) = engine.set_max_angle(joint, angle) {
                warn!("set max failed: {:?}", e);
            }
        }
        Command::SetHome { joint, angle } => {
            if let Err(e) = engine.set_home_angle(joint, angle) {
                warn!("set home failed: {:?}", e);
            }
        }
        Command::ResetSettings => {
            if let Err(e) = engine.reset_settings() {
                warn!("settings reset failed: {:?}", e);
            }
        }
        Command::DumpJoints => {
            let mut out: String<2048> = String::new();
            if telemetry::dump_joints(&mut out, engine.settings()).is_ok() {
                send(tx, out.as_bytes()).await;
            }
        }
        Command::DumpImu => {
            let mut out: String<256> = String::new();
            if telemetry::dump_imu(&mut out, last_imu).is_ok() {
                send(tx, out.as_bytes()).await;
            }
        }
    }
}

async fn send(tx: &mut BufferedUartTx, bytes: &[u8]) {
    if tx.write_all(bytes).await.is_err() {
        warn!("UART write failed");
    }
}
