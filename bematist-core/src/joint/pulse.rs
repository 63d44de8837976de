//! Interrupt-shared pulse buffer
//!
//! The single point of cross-context shared state: the main context
//! produces pulse widths, the periodic pulse-emission context consumes
//! them channel by channel. The cycle-complete flag is the sole
//! synchronization signal between the two.

use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use crate::joint::{ANGLE_MAX, ANGLE_MIN, JOINT_COUNT};

/// Pulse width commanding the min angle, in emission timer ticks
pub const PULSE_MIN: u16 = 100;

/// Pulse width commanding the max angle, in emission timer ticks
pub const PULSE_MAX: u16 = 550;

/// Pulse width commanding the neutral angle
pub const PULSE_NEUTRAL: u16 = pulse_width(0);

/// Map a logical angle to a hardware pulse width
///
/// A single affine map over the full hardware angle domain; per-joint
/// calibration affects clamping upstream, never the slope or intercept.
/// Callers pass angles already clamped into `[ANGLE_MIN, ANGLE_MAX]`.
pub const fn pulse_width(angle: i16) -> u16 {
    let span = (PULSE_MAX - PULSE_MIN) as i32;
    let domain = (ANGLE_MAX - ANGLE_MIN) as i32;
    let offset = (angle as i32 - ANGLE_MIN as i32) * span / domain;
    PULSE_MIN + offset as u16
}

/// Shared pulse buffer with its cycle handshake
///
/// Single producer (main context), single consumer (pulse emission
/// context). The consumer clears the flag when starting a pass over all
/// channels and sets it after emitting the last one; the producer only
/// performs a full-buffer refresh after observing the flag set.
/// Individual channels may be rewritten at any time - each slot is a
/// single atomic store, so the consumer never observes a torn value.
pub struct PulseBuffer {
    pulses: [AtomicU16; JOINT_COUNT],
    cycle_complete: AtomicBool,
}

impl Default for PulseBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseBuffer {
    /// Buffer with every channel at neutral and the first refresh allowed
    pub const fn new() -> Self {
        Self {
            pulses: [const { AtomicU16::new(PULSE_NEUTRAL) }; JOINT_COUNT],
            cycle_complete: AtomicBool::new(true),
        }
    }

    /// Whether the consumer has finished its current pass
    pub fn cycle_complete(&self) -> bool {
        self.cycle_complete.load(Ordering::Acquire)
    }

    /// Producer: rewrite a single channel
    ///
    /// Safe mid-cycle; the store is atomic per channel.
    pub fn write_channel(&self, joint: usize, pulse: u16) {
        if let Some(slot) = self.pulses.get(joint) {
            slot.store(pulse, Ordering::Relaxed);
        }
    }

    /// Producer: refresh every channel in one batch
    ///
    /// Returns `false` without touching the buffer when the consumer is
    /// mid-cycle; the caller retries on its next tick.
    pub fn try_refresh(&self, pulses: &[u16; JOINT_COUNT]) -> bool {
        if !self.cycle_complete() {
            return false;
        }
        for (slot, &pulse) in self.pulses.iter().zip(pulses) {
            slot.store(pulse, Ordering::Relaxed);
        }
        true
    }

    /// Consumer: mark the start of a new emission pass
    pub fn begin_cycle(&self) {
        self.cycle_complete.store(false, Ordering::Release);
    }

    /// Consumer: read the pulse width for one channel
    pub fn channel(&self, joint: usize) -> u16 {
        self.pulses
            .get(joint)
            .map(|slot| slot.load(Ordering::Relaxed))
            .unwrap_or(PULSE_NEUTRAL)
    }

    /// Consumer: signal that all channels have been emitted
    pub fn finish_cycle(&self) {
        self.cycle_complete.store(true, Ordering::Release);
    }
}
