//! Minimal frame player
//!
//! Walks the frames of the motion selected by the interpreter, honoring
//! the loop window armed in the header. Frame contents (per-joint target
//! angles) are streamed by the caller; this type only tracks position
//! and loop accounting.

use crate::motion::MotionHeader;
use crate::traits::MotionPlayback;

/// Number of addressable slots in the stored motion library
pub const MOTION_SLOTS: usize = 64;

/// Frame-position player implementing the playback seam
#[derive(Debug)]
pub struct MotionPlayer {
    header: MotionHeader,
    /// Frame count per library slot; 0 marks an empty slot
    frame_lengths: [u8; MOTION_SLOTS],
    current_frame: u8,
    playing: bool,
}

impl MotionPlayer {
    /// Player over the given library index (frame count per slot)
    pub const fn new(frame_lengths: [u8; MOTION_SLOTS]) -> Self {
        Self {
            header: MotionHeader::new(),
            frame_lengths,
            current_frame: 0,
            playing: false,
        }
    }

    /// Frame index the playback currently sits on
    pub fn current_frame(&self) -> u8 {
        self.current_frame
    }

    /// Whether a motion is in flight
    pub fn playing(&self) -> bool {
        self.playing
    }

    /// Advance one frame; returns `false` once playback has ended
    ///
    /// Called once per main-loop tick. On reaching the end of the loop
    /// window with looping armed, rewinds to `loop_begin` and burns one
    /// repeat; when the repeat counter hits zero the loop disarms and
    /// the motion runs out to its final frame.
    pub fn advance(&mut self) -> bool {
        if !self.playing {
            return false;
        }

        let last = self.header.frame_length.saturating_sub(1);

        if self.header.use_loop && self.current_frame >= self.header.loop_end {
            if self.header.loop_count > 0 {
                self.header.loop_count -= 1;
            }
            if self.header.loop_count == 0 {
                self.header.use_loop = false;
            } else {
                self.current_frame = self.header.loop_begin;
                return true;
            }
        }

        if self.current_frame >= last {
            self.playing = false;
            return false;
        }

        self.current_frame += 1;
        true
    }
}

impl MotionPlayback for MotionPlayer {
    fn play(&mut self, slot: u8) {
        let frames = self
            .frame_lengths
            .get(slot as usize)
            .copied()
            .unwrap_or(0);

        self.header.frame_length = frames;
        self.current_frame = 0;
        self.playing = frames > 0;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.current_frame = 0;
        self.header.use_loop = false;
        self.header.use_jump = false;
        self.header.loop_count = 0;
    }

    fn header(&self) -> &MotionHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut MotionHeader {
        &mut self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> [u8; MOTION_SLOTS] {
        let mut lengths = [0u8; MOTION_SLOTS];
        lengths[1] = 4;
        lengths[2] = 8;
        lengths
    }

    #[test]
    fn test_play_rewinds_and_loads_frame_length() {
        let mut player = MotionPlayer::new(library());

        player.play(2);
        assert!(player.playing());
        assert_eq!(player.current_frame(), 0);
        assert_eq!(player.header().frame_length, 8);
    }

    #[test]
    fn test_empty_slot_does_not_start() {
        let mut player = MotionPlayer::new(library());

        player.play(5);
        assert!(!player.playing());
    }

    #[test]
    fn test_advance_runs_to_final_frame_without_loop() {
        let mut player = MotionPlayer::new(library());
        player.play(1); // 4 frames

        assert!(player.advance()); // -> 1
        assert!(player.advance()); // -> 2
        assert!(player.advance()); // -> 3 (last)
        assert_eq!(player.current_frame(), 3);
        assert!(!player.advance());
        assert!(!player.playing());
    }

    #[test]
    fn test_loop_window_repeats_then_disarms() {
        let mut player = MotionPlayer::new(library());
        player.play(1); // 4 frames

        let header = player.header_mut();
        header.use_loop = true;
        header.loop_begin = 0;
        header.loop_end = 3;
        header.loop_count = 2;

        // Walk to the end of the window
        for _ in 0..3 {
            assert!(player.advance());
        }
        assert_eq!(player.current_frame(), 3);

        // First wrap burns one repeat
        assert!(player.advance());
        assert_eq!(player.current_frame(), 0);
        assert_eq!(player.header().loop_count, 1);

        for _ in 0..3 {
            assert!(player.advance());
        }

        // Last repeat: loop disarms and the motion ends
        assert!(!player.advance());
        assert!(!player.header().use_loop);
        assert!(!player.playing());
    }

    #[test]
    fn test_stop_clears_loop_state() {
        let mut player = MotionPlayer::new(library());
        player.play(2);
        player.header_mut().use_loop = true;
        player.header_mut().loop_count = 3;

        player.stop();
        assert!(!player.playing());
        assert!(!player.header().use_loop);
        assert_eq!(player.header().loop_count, 0);
    }
}
