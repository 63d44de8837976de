//! Per-joint calibration data and its persisted layout
//!
//! The settings store holds one marker byte followed by one fixed-size
//! record per joint. The marker is the only signal that the store has
//! been initialized; any other value at that address means blank.

use crate::joint::{ANGLE_MAX, ANGLE_MIN, ANGLE_NEUTRAL};

/// Clamp an angle into the hardware angle domain
///
/// Calibration values must stay inside `[ANGLE_MIN, ANGLE_MAX]` or the
/// angle-to-pulse map leaves the hardware pulse range; both the setters
/// and record decoding funnel through this.
pub(crate) const fn clamp_to_domain(angle: i16) -> i16 {
    if angle < ANGLE_MIN {
        ANGLE_MIN
    } else if angle > ANGLE_MAX {
        ANGLE_MAX
    } else {
        angle
    }
}

/// Store address of the init marker byte
pub const INIT_MARKER_ADDRESS: u16 = 0;

/// Marker value distinguishing "initialized" from blank/corrupt storage
pub const INIT_MARKER: u8 = 2;

/// Head address of the joint records, directly after the marker
pub const SETTINGS_HEAD_ADDRESS: u16 = 1;

/// Bytes per joint record: three little-endian `i16` fields
pub const RECORD_SIZE: u16 = 6;

/// Calibrated angle bounds for one joint, tenths of a degree
///
/// The ordering `min <= home <= max` is intended but not enforced by the
/// setters; playback clamping tolerates misordered bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointCalibration {
    /// Lower clamp bound
    pub min_angle: i16,
    /// Upper clamp bound
    pub max_angle: i16,
    /// Rest position, reference for relative moves
    pub home_angle: i16,
}

impl Default for JointCalibration {
    fn default() -> Self {
        Self::new()
    }
}

impl JointCalibration {
    /// Factory defaults: full hardware range, neutral home
    pub const fn new() -> Self {
        Self {
            min_angle: ANGLE_MIN,
            max_angle: ANGLE_MAX,
            home_angle: ANGLE_NEUTRAL,
        }
    }

    /// Store address of the record for the given joint
    pub const fn record_address(joint: u8) -> u16 {
        SETTINGS_HEAD_ADDRESS + joint as u16 * RECORD_SIZE
    }

    /// Serialize to the fixed store record layout
    pub fn encode(&self) -> [u8; RECORD_SIZE as usize] {
        let min = self.min_angle.to_le_bytes();
        let max = self.max_angle.to_le_bytes();
        let home = self.home_angle.to_le_bytes();
        [min[0], min[1], max[0], max[1], home[0], home[1]]
    }

    /// Deserialize from the fixed store record layout
    ///
    /// Fields are clamped into the hardware angle domain so a corrupt
    /// record cannot produce out-of-range pulse widths.
    pub fn decode(record: [u8; RECORD_SIZE as usize]) -> Self {
        Self {
            min_angle: clamp_to_domain(i16::from_le_bytes([record[0], record[1]])),
            max_angle: clamp_to_domain(i16::from_le_bytes([record[2], record[3]])),
            home_angle: clamp_to_domain(i16::from_le_bytes([record[4], record[5]])),
        }
    }

    /// Clamp an angle into this joint's configured bounds
    ///
    /// Checks min first, then max, so misordered bounds never panic
    /// (unlike `i16::clamp`).
    pub fn clamp(&self, angle: i16) -> i16 {
        if angle < self.min_angle {
            self.min_angle
        } else if angle > self.max_angle {
            self.max_angle
        } else {
            angle
        }
    }
}
