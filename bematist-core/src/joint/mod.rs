//! Joint actuation engine
//!
//! Owns per-joint calibration, the logical-angle to pulse-width mapping,
//! and the producer side of the interrupt-shared pulse buffer.

mod calibration;
mod engine;
mod pulse;

pub use calibration::{
    JointCalibration, INIT_MARKER, INIT_MARKER_ADDRESS, RECORD_SIZE, SETTINGS_HEAD_ADDRESS,
};
pub use engine::{JointEngine, JointError};
pub use pulse::{pulse_width, PulseBuffer, PULSE_MAX, PULSE_MIN, PULSE_NEUTRAL};

/// Number of servo-actuated joints
pub const JOINT_COUNT: usize = 18;

/// Servo update rate in Hz (one pulse buffer cycle per period)
pub const PULSE_FREQ_HZ: u32 = 60;

/// Min commandable angle, tenths of a degree
pub const ANGLE_MIN: i16 = -800;

/// Max commandable angle, tenths of a degree
pub const ANGLE_MAX: i16 = 800;

/// Neutral angle, tenths of a degree
pub const ANGLE_NEUTRAL: i16 = 0;
