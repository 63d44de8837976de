//! Joint actuation engine
//!
//! Persists per-joint calibration through the settings store, converts
//! clamped logical angles to pulse widths, and owns the producer side
//! of the shared pulse buffer. All methods run in the main context;
//! the emission context only ever touches the buffer.

use crate::joint::calibration::{
    clamp_to_domain, JointCalibration, INIT_MARKER, INIT_MARKER_ADDRESS, RECORD_SIZE,
};
use crate::joint::pulse::{pulse_width, PulseBuffer};
use crate::joint::JOINT_COUNT;
use crate::traits::{SettingsStore, StoreError};

/// Errors from joint engine operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JointError {
    /// No joint with the given id exists
    InvalidId,
    /// Settings persistence failed
    Store(StoreError),
}

impl From<StoreError> for JointError {
    fn from(err: StoreError) -> Self {
        JointError::Store(err)
    }
}

/// Calibration owner and pulse producer for all joints
pub struct JointEngine<'b, S: SettingsStore> {
    store: S,
    settings: [JointCalibration; JOINT_COUNT],
    /// Clamped target angles, refreshed into the buffer each tick
    targets: [i16; JOINT_COUNT],
    buffer: &'b PulseBuffer,
}

impl<'b, S: SettingsStore> JointEngine<'b, S> {
    /// Engine with factory-default calibration, not yet loaded
    pub fn new(store: S, buffer: &'b PulseBuffer) -> Self {
        Self {
            store,
            settings: [JointCalibration::new(); JOINT_COUNT],
            targets: [0; JOINT_COUNT],
            buffer,
        }
    }

    /// Load calibration from the store, initializing it on first boot
    ///
    /// Any marker byte other than the expected sentinel is treated as a
    /// blank store: defaults are written for all joints and the marker
    /// is set, making a second call a pure read.
    pub fn load_settings(&mut self) -> Result<(), StoreError> {
        if self.store.read(INIT_MARKER_ADDRESS)? != INIT_MARKER {
            return self.reset_settings();
        }

        for joint in 0..JOINT_COUNT {
            let head = JointCalibration::record_address(joint as u8);
            let mut record = [0u8; RECORD_SIZE as usize];
            for (offset, byte) in record.iter_mut().enumerate() {
                *byte = self.store.read(head + offset as u16)?;
            }
            self.settings[joint] = JointCalibration::decode(record);
        }

        Ok(())
    }

    /// Overwrite all joint records with defaults, regardless of marker state
    pub fn reset_settings(&mut self) -> Result<(), StoreError> {
        self.settings = [JointCalibration::new(); JOINT_COUNT];

        for joint in 0..JOINT_COUNT as u8 {
            self.write_record(joint)?;
        }
        self.store.write(INIT_MARKER_ADDRESS, INIT_MARKER)?;
        self.store.flush()
    }

    /// Calibration table, in joint-id order
    pub fn settings(&self) -> &[JointCalibration; JOINT_COUNT] {
        &self.settings
    }

    /// Min angle of the given joint
    pub fn min_angle(&self, joint: u8) -> Result<i16, JointError> {
        Ok(self.calibration(joint)?.min_angle)
    }

    /// Max angle of the given joint
    pub fn max_angle(&self, joint: u8) -> Result<i16, JointError> {
        Ok(self.calibration(joint)?.max_angle)
    }

    /// Home angle of the given joint
    pub fn home_angle(&self, joint: u8) -> Result<i16, JointError> {
        Ok(self.calibration(joint)?.home_angle)
    }

    /// Set and persist the min angle of the given joint
    ///
    /// The value is clamped into the hardware angle domain.
    /// `min <= home <= max` is deliberately not enforced; see the
    /// calibration type docs.
    pub fn set_min_angle(&mut self, joint: u8, angle: i16) -> Result<(), JointError> {
        self.calibration_mut(joint)?.min_angle = clamp_to_domain(angle);
        self.write_record(joint)?;
        self.store.flush()?;
        Ok(())
    }

    /// Set and persist the max angle of the given joint
    pub fn set_max_angle(&mut self, joint: u8, angle: i16) -> Result<(), JointError> {
        self.calibration_mut(joint)?.max_angle = clamp_to_domain(angle);
        self.write_record(joint)?;
        self.store.flush()?;
        Ok(())
    }

    /// Set and persist the home angle of the given joint
    pub fn set_home_angle(&mut self, joint: u8, angle: i16) -> Result<(), JointError> {
        self.calibration_mut(joint)?.home_angle = clamp_to_domain(angle);
        self.write_record(joint)?;
        self.store.flush()?;
        Ok(())
    }

    /// Command a joint to a logical angle
    ///
    /// The angle is silently clamped into the joint's configured bounds
    /// (clamping is not an error), converted to a pulse width, and
    /// written to the joint's buffer channel.
    pub fn set_angle(&mut self, joint: u8, angle: i16) -> Result<(), JointError> {
        let clamped = self.calibration(joint)?.clamp(angle);
        self.targets[joint as usize] = clamped;
        self.buffer.write_channel(joint as usize, pulse_width(clamped));
        Ok(())
    }

    /// Command a joint relative to its home angle
    pub fn set_angle_diff(&mut self, joint: u8, diff: i16) -> Result<(), JointError> {
        let home = self.home_angle(joint)?;
        self.set_angle(joint, home.saturating_add(diff))
    }

    /// Move every joint to its home angle
    pub fn apply_home(&mut self) {
        for joint in 0..JOINT_COUNT as u8 {
            // Ids are in range by construction
            let _ = self.set_angle_diff(joint, 0);
        }
    }

    /// Periodic full-buffer refresh, called once per main-loop tick
    ///
    /// Recomputes the pulse width for every joint from its current
    /// target. Returns `false` when the emission context is mid-cycle
    /// and the refresh was skipped.
    pub fn update_angle(&mut self) -> bool {
        let mut pulses = [0u16; JOINT_COUNT];
        for (pulse, (target, cal)) in pulses
            .iter_mut()
            .zip(self.targets.iter().zip(self.settings.iter()))
        {
            *pulse = pulse_width(cal.clamp(*target));
        }
        self.buffer.try_refresh(&pulses)
    }

    fn calibration(&self, joint: u8) -> Result<&JointCalibration, JointError> {
        self.settings
            .get(joint as usize)
            .ok_or(JointError::InvalidId)
    }

    fn calibration_mut(&mut self, joint: u8) -> Result<&mut JointCalibration, JointError> {
        self.settings
            .get_mut(joint as usize)
            .ok_or(JointError::InvalidId)
    }

    fn write_record(&mut self, joint: u8) -> Result<(), StoreError> {
        let head = JointCalibration::record_address(joint);
        let record = self.settings[joint as usize].encode();
        for (offset, byte) in record.iter().enumerate() {
            self.store.write(head + offset as u16, *byte)?;
        }
        Ok(())
    }
}
