//! Motion playback engine trait
//!
//! The interpreter drives whatever advances motion frames through this
//! seam. The playback engine owns the motion header; the interpreter
//! reads and mutates it directly when a request is dequeued.

use crate::motion::MotionHeader;

/// Playback engine consumed by the interpreter
///
/// `play` must populate `header().frame_length` for the started motion
/// before returning - the interpreter derives the loop window from it.
pub trait MotionPlayback {
    /// Start playing the stored motion in the given slot
    fn play(&mut self, slot: u8);

    /// Halt playback immediately
    ///
    /// Clearing the header's loop/jump state is the playback engine's
    /// responsibility, not the caller's.
    fn stop(&mut self);

    /// Shared motion header, read continuously during playback
    fn header(&self) -> &MotionHeader;

    /// Mutable access to the motion header
    fn header_mut(&mut self) -> &mut MotionHeader;
}
