//! Board-agnostic core logic for the walking robot firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (settings store, motion playback)
//! - Joint actuation engine (calibration, angle-to-pulse mapping)
//! - Interrupt-shared pulse buffer with its cycle handshake
//! - Motion interpreter (bounded request queue, loop arming)
//! - Minimal frame player driving the motion header
//! - Debug dump formatting (literal JSON output contracts)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod interpreter;
pub mod joint;
pub mod motion;
pub mod telemetry;
pub mod traits;
