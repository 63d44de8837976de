//! Debug dump formatting
//!
//! Literal JSON output contracts consumed by host-side tooling. The
//! shapes here are compatibility surfaces - field names, nesting, and
//! ordering must not change.

use core::fmt::{self, Write};

use crate::joint::JointCalibration;

/// One cached six-axis sensor reading, raw register units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImuSample {
    pub acc_x: i16,
    pub acc_y: i16,
    pub acc_z: i16,
    pub gyro_roll: i16,
    pub gyro_pitch: i16,
    pub gyro_yaw: i16,
}

/// Dump the joint calibration table as an ordered JSON list
///
/// ```json
/// [
///     {
///         "max": 800,
///         "min": -800,
///         "home": 0
///     },
///     ...
/// ]
/// ```
pub fn dump_joints<W: Write>(out: &mut W, settings: &[JointCalibration]) -> fmt::Result {
    writeln!(out, "[")?;

    let last = settings.len().saturating_sub(1);
    for (index, cal) in settings.iter().enumerate() {
        writeln!(out, "\t{{")?;
        writeln!(out, "\t\t\"max\": {},", cal.max_angle)?;
        writeln!(out, "\t\t\"min\": {},", cal.min_angle)?;
        writeln!(out, "\t\t\"home\": {}", cal.home_angle)?;
        writeln!(out, "\t}}{}", if index == last { "" } else { "," })?;
    }

    writeln!(out, "]")
}

/// Dump a six-axis sensor sample as a JSON object
///
/// ```json
/// {
///     "Acc X": 0,
///     ...
///     "Gyro Yaw": 0
/// }
/// ```
pub fn dump_imu<W: Write>(out: &mut W, sample: &ImuSample) -> fmt::Result {
    writeln!(out, "{{")?;
    writeln!(out, "\t\"Acc X\": {},", sample.acc_x)?;
    writeln!(out, "\t\"Acc Y\": {},", sample.acc_y)?;
    writeln!(out, "\t\"Acc Z\": {},", sample.acc_z)?;
    writeln!(out, "\t\"Gyro Roll\": {},", sample.gyro_roll)?;
    writeln!(out, "\t\"Gyro Pitch\": {},", sample.gyro_pitch)?;
    writeln!(out, "\t\"Gyro Yaw\": {}", sample.gyro_yaw)?;
    writeln!(out, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    #[test]
    fn test_joint_dump_shape() {
        let settings = [
            JointCalibration {
                min_angle: -300,
                max_angle: 450,
                home_angle: 35,
            },
            JointCalibration::new(),
        ];

        let mut out: String<256> = String::new();
        dump_joints(&mut out, &settings).unwrap();

        assert_eq!(
            out.as_str(),
            "[\n\
             \t{\n\
             \t\t\"max\": 450,\n\
             \t\t\"min\": -300,\n\
             \t\t\"home\": 35\n\
             \t},\n\
             \t{\n\
             \t\t\"max\": 800,\n\
             \t\t\"min\": -800,\n\
             \t\t\"home\": 0\n\
             \t}\n\
             ]\n"
        );
    }

    #[test]
    fn test_joint_dump_covers_all_joints_in_order() {
        use crate::joint::JOINT_COUNT;

        let mut settings = [JointCalibration::new(); JOINT_COUNT];
        for (joint, cal) in settings.iter_mut().enumerate() {
            cal.home_angle = joint as i16;
        }

        let mut out: String<2048> = String::new();
        dump_joints(&mut out, &settings).unwrap();

        assert_eq!(out.matches("\"home\"").count(), JOINT_COUNT);
        let homes: std::vec::Vec<&str> = out
            .lines()
            .filter(|line| line.contains("\"home\""))
            .collect();
        assert!(homes[0].ends_with(": 0"));
        assert!(homes[17].ends_with(": 17"));
    }

    #[test]
    fn test_imu_dump_contract() {
        let sample = ImuSample {
            acc_x: 1,
            acc_y: -2,
            acc_z: 16384,
            gyro_roll: -131,
            gyro_pitch: 0,
            gyro_yaw: 42,
        };

        let mut out: String<256> = String::new();
        dump_imu(&mut out, &sample).unwrap();

        assert_eq!(
            out.as_str(),
            "{\n\
             \t\"Acc X\": 1,\n\
             \t\"Acc Y\": -2,\n\
             \t\"Acc Z\": 16384,\n\
             \t\"Gyro Roll\": -131,\n\
             \t\"Gyro Pitch\": 0,\n\
             \t\"Gyro Yaw\": 42\n\
             }\n"
        );
    }
}
