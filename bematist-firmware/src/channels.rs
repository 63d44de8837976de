//! Inter-task communication channels
//!
//! Parsed commands flow to the control task through a bounded channel;
//! the IMU task publishes its latest sample through a signal, so a slow
//! consumer only ever sees the freshest reading.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use bematist_core::telemetry::ImuSample;

use crate::tasks::command::Command;

/// Channel capacity for parsed serial commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Parsed commands from the serial ingestion task to the control task
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Latest six-axis sample (updated by the IMU task)
pub static IMU_SAMPLE: Signal<CriticalSectionRawMutex, ImuSample> = Signal::new();
