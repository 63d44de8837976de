//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod command;
pub mod control;
pub mod imu;
pub mod pulse;

pub use command::command_task;
pub use control::control_task;
pub use imu::imu_task;
pub use pulse::pulse_task;
