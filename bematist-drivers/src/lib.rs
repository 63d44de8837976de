//! Hardware driver implementations
//!
//! Drivers are written against `embedded-hal` traits so they stay
//! portable across chip HALs and can be exercised on the host with bus
//! doubles.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod imu;
