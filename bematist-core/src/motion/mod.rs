//! Motion playback types
//!
//! A motion is a stored sequence of frames addressed by slot. The header
//! carries the loop/jump control fields the interpreter arms and the
//! playback engine consumes.

mod player;

pub use player::{MotionPlayer, MOTION_SLOTS};

/// Loop/jump control state for the motion currently playing
///
/// Mutated by the interpreter on every dequeue; read continuously by the
/// playback engine while frames advance. Single writer from the main
/// context only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionHeader {
    /// Looping armed for the current motion
    pub use_loop: bool,
    /// First frame of the loop window
    pub loop_begin: u8,
    /// Last frame of the loop window (inclusive)
    pub loop_end: u8,
    /// Remaining loop repeats
    pub loop_count: u8,
    /// Chain to another motion when this one ends
    pub use_jump: bool,
    /// Total frames of the motion currently playing
    pub frame_length: u8,
}

impl MotionHeader {
    /// Header with no motion loaded and no loop/jump state armed
    pub const fn new() -> Self {
        Self {
            use_loop: false,
            loop_begin: 0,
            loop_end: 0,
            loop_count: 0,
            use_jump: false,
            frame_length: 0,
        }
    }
}
