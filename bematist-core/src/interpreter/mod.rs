//! Motion interpreter
//!
//! Buffers playback requests from the command source and drives the
//! looped/jumped playback state on the motion header when a request is
//! dequeued. Readiness is fully determined by queue occupancy.

mod queue;

pub use queue::{CodeQueue, QueueError};

use crate::traits::MotionPlayback;

/// Default request queue size (usable capacity is one less)
pub const QUEUE_SIZE: usize = 32;

/// One queued playback request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionCode {
    /// Index into the stored motion library
    pub slot: u8,
    /// Repeat count; 0 plays the motion once
    pub loop_count: u8,
}

impl MotionCode {
    /// Request for the given slot and repeat count
    pub const fn new(slot: u8, loop_count: u8) -> Self {
        Self { slot, loop_count }
    }
}

/// FIFO of motion requests feeding the playback engine
pub struct Interpreter<P: MotionPlayback, const N: usize = QUEUE_SIZE> {
    queue: CodeQueue<N>,
    playback: P,
}

impl<P: MotionPlayback, const N: usize> Interpreter<P, N> {
    /// Interpreter over the given playback engine, queue empty
    pub fn new(playback: P) -> Self {
        Self {
            queue: CodeQueue::new(),
            playback,
        }
    }

    /// Whether a request is waiting to be dequeued
    pub fn ready(&self) -> bool {
        self.queue.ready()
    }

    /// Enqueue a playback request
    ///
    /// Fails with [`QueueError::Full`] at capacity; the command source
    /// owns retry/backpressure policy.
    pub fn push_code(&mut self, code: MotionCode) -> Result<(), QueueError> {
        self.queue.push(code)
    }

    /// Dequeue the oldest request and start it
    ///
    /// Starts playback of the request's slot, then updates the header:
    /// a nonzero repeat count arms looping over the full motion unless
    /// looping is already armed, in which case the existing window is
    /// kept. The jump flag is always cleared and the remaining-repeat
    /// counter is always overwritten with the request's count - so a
    /// second looped request re-counts without re-ranging the window.
    pub fn pop_code(&mut self) -> Result<(), QueueError> {
        let code = self.queue.pop()?;

        self.playback.play(code.slot);

        let header = self.playback.header_mut();
        if code.loop_count != 0 {
            if !header.use_loop {
                header.use_loop = true;
                header.loop_begin = 0;
                header.loop_end = header.frame_length.saturating_sub(1);
            }
        } else {
            header.use_loop = false;
        }

        header.use_jump = false;
        header.loop_count = code.loop_count;

        Ok(())
    }

    /// Discard all queued requests and halt playback
    ///
    /// The header's loop/jump fields are left for the playback engine
    /// to clear on `stop()`.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.playback.stop();
    }

    /// The playback engine behind this interpreter
    pub fn playback(&self) -> &P {
        &self.playback
    }

    /// Mutable access to the playback engine
    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::MotionHeader;
    use std::vec::Vec;

    /// Playback double recording calls; frame_length fixed per slot
    struct FakePlayback {
        header: MotionHeader,
        played: Vec<u8>,
        stopped: bool,
    }

    impl FakePlayback {
        fn new() -> Self {
            Self {
                header: MotionHeader::new(),
                played: Vec::new(),
                stopped: false,
            }
        }
    }

    impl MotionPlayback for FakePlayback {
        fn play(&mut self, slot: u8) {
            self.played.push(slot);
            self.header.frame_length = 20;
        }

        fn stop(&mut self) {
            self.stopped = true;
        }

        fn header(&self) -> &MotionHeader {
            &self.header
        }

        fn header_mut(&mut self) -> &mut MotionHeader {
            &mut self.header
        }
    }

    #[test]
    fn test_pop_plays_in_fifo_order() {
        let mut interp: Interpreter<_, 8> = Interpreter::new(FakePlayback::new());

        for slot in [3, 1, 4, 1, 5] {
            interp.push_code(MotionCode::new(slot, 0)).unwrap();
        }
        while interp.ready() {
            interp.pop_code().unwrap();
        }
        assert_eq!(interp.playback().played, [3, 1, 4, 1, 5]);
    }

    #[test]
    fn test_pop_on_empty_fails_without_playing() {
        let mut interp: Interpreter<_, 8> = Interpreter::new(FakePlayback::new());

        assert_eq!(interp.pop_code(), Err(QueueError::Empty));
        assert!(interp.playback().played.is_empty());
    }

    #[test]
    fn test_first_looped_pop_arms_full_motion_window() {
        let mut interp: Interpreter<_, 8> = Interpreter::new(FakePlayback::new());
        interp.push_code(MotionCode::new(2, 3)).unwrap();

        interp.pop_code().unwrap();
        let header = interp.playback().header();
        assert!(header.use_loop);
        assert_eq!(header.loop_begin, 0);
        assert_eq!(header.loop_end, 19);
        assert_eq!(header.loop_count, 3);
        assert!(!header.use_jump);
    }

    #[test]
    fn test_second_looped_pop_recounts_without_reranging() {
        let mut interp: Interpreter<_, 8> = Interpreter::new(FakePlayback::new());
        interp.push_code(MotionCode::new(2, 3)).unwrap();
        interp.push_code(MotionCode::new(6, 7)).unwrap();

        interp.pop_code().unwrap();
        // Simulate the playback engine part-way through the window
        interp.playback_mut().header_mut().loop_begin = 0;
        interp.playback_mut().header_mut().loop_end = 19;

        interp.pop_code().unwrap();
        let header = interp.playback().header();
        assert!(header.use_loop);
        // Window untouched, counter overwritten
        assert_eq!(header.loop_begin, 0);
        assert_eq!(header.loop_end, 19);
        assert_eq!(header.loop_count, 7);
    }

    #[test]
    fn test_non_looped_pop_disarms_looping() {
        let mut interp: Interpreter<_, 8> = Interpreter::new(FakePlayback::new());
        interp.push_code(MotionCode::new(2, 3)).unwrap();
        interp.push_code(MotionCode::new(6, 0)).unwrap();

        interp.pop_code().unwrap();
        interp.pop_code().unwrap();

        let header = interp.playback().header();
        assert!(!header.use_loop);
        assert_eq!(header.loop_count, 0);
        assert!(!header.use_jump);
    }

    #[test]
    fn test_pop_always_clears_jump_flag() {
        let mut interp: Interpreter<_, 8> = Interpreter::new(FakePlayback::new());
        interp.playback_mut().header_mut().use_jump = true;
        interp.push_code(MotionCode::new(1, 2)).unwrap();

        interp.pop_code().unwrap();
        assert!(!interp.playback().header().use_jump);
    }

    #[test]
    fn test_reset_discards_queue_and_stops_playback() {
        let mut interp: Interpreter<_, 4> = Interpreter::new(FakePlayback::new());
        interp.push_code(MotionCode::new(1, 1)).unwrap();
        interp.pop_code().unwrap();
        interp.push_code(MotionCode::new(2, 0)).unwrap();

        interp.reset();
        assert!(!interp.ready());
        assert!(interp.playback().stopped);
        // Queued-but-not-played request is discarded, not run
        assert_eq!(interp.playback().played, [1]);
        // Header loop fields are the playback engine's to clear
        assert!(interp.playback().header().use_loop);

        // Full capacity is available again
        for slot in 0..3 {
            interp.push_code(MotionCode::new(slot, 0)).unwrap();
        }
        assert_eq!(
            interp.push_code(MotionCode::new(9, 0)),
            Err(QueueError::Full)
        );
    }

    #[test]
    fn test_queue_scenario_capacity_four() {
        let mut interp: Interpreter<_, 4> = Interpreter::new(FakePlayback::new());

        assert!(interp.push_code(MotionCode::new(1, 0)).is_ok());
        assert!(interp.push_code(MotionCode::new(2, 3)).is_ok());
        assert!(interp.push_code(MotionCode::new(9, 0)).is_ok());
        assert_eq!(
            interp.push_code(MotionCode::new(9, 0)),
            Err(QueueError::Full)
        );

        interp.pop_code().unwrap();
        assert_eq!(interp.playback().played, [1]);
        assert!(!interp.playback().header().use_loop);

        interp.pop_code().unwrap();
        assert_eq!(interp.playback().played, [1, 2]);
        let header = interp.playback().header();
        assert!(header.use_loop);
        assert_eq!(header.loop_begin, 0);
        assert_eq!(header.loop_end, header.frame_length - 1);
        assert_eq!(header.loop_count, 3);
    }
}
