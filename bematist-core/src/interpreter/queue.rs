//! Bounded circular queue of motion codes
//!
//! Power-of-two capacity with masked indices. One slot stays unused so
//! `begin == end` always means empty; usable capacity is `N - 1`.

use crate::interpreter::MotionCode;

/// Errors from queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// Queue already holds `N - 1` entries
    Full,
    /// No entry to dequeue
    Empty,
}

/// Fixed-capacity FIFO of pending motion requests
#[derive(Debug)]
pub struct CodeQueue<const N: usize> {
    codes: [MotionCode; N],
    begin: usize,
    end: usize,
}

impl<const N: usize> Default for CodeQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CodeQueue<N> {
    const MASK: usize = {
        assert!(N.is_power_of_two(), "queue capacity must be a power of two");
        N - 1
    };

    /// Empty queue
    pub const fn new() -> Self {
        Self {
            codes: [MotionCode::new(0, 0); N],
            begin: 0,
            end: 0,
        }
    }

    /// Whether at least one entry is queued
    pub fn ready(&self) -> bool {
        self.begin != self.end
    }

    /// Number of queued entries
    pub fn len(&self) -> usize {
        self.end.wrapping_sub(self.begin) & Self::MASK
    }

    /// Whether the queue holds no entries
    pub fn is_empty(&self) -> bool {
        !self.ready()
    }

    /// Enqueue a code; fails when the queue is at capacity
    ///
    /// No internal retry - backpressure is the caller's policy.
    pub fn push(&mut self, code: MotionCode) -> Result<(), QueueError> {
        if (self.end + 1) & Self::MASK == self.begin {
            return Err(QueueError::Full);
        }

        self.codes[self.end] = code;
        self.end = (self.end + 1) & Self::MASK;
        Ok(())
    }

    /// Dequeue the oldest code
    pub fn pop(&mut self) -> Result<MotionCode, QueueError> {
        if !self.ready() {
            return Err(QueueError::Empty);
        }

        let code = self.codes[self.begin];
        self.begin = (self.begin + 1) & Self::MASK;
        Ok(code)
    }

    /// Discard all queued entries without running them
    pub fn clear(&mut self) {
        self.begin = 0;
        self.end = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec::Vec;

    #[test]
    fn test_capacity_is_one_less_than_size() {
        let mut queue: CodeQueue<4> = CodeQueue::new();

        for slot in 0..3 {
            queue.push(MotionCode::new(slot, 0)).unwrap();
        }
        assert_eq!(queue.push(MotionCode::new(9, 0)), Err(QueueError::Full));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_pop_on_empty_queue_leaves_indices_unchanged() {
        let mut queue: CodeQueue<8> = CodeQueue::new();

        assert_eq!(queue.pop(), Err(QueueError::Empty));
        assert!(!queue.ready());

        queue.push(MotionCode::new(1, 0)).unwrap();
        queue.pop().unwrap();
        assert_eq!(queue.pop(), Err(QueueError::Empty));
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_wraparound_preserves_order() {
        let mut queue: CodeQueue<4> = CodeQueue::new();

        // Cycle through the ring several times
        for round in 0u8..10 {
            queue.push(MotionCode::new(round, 0)).unwrap();
            queue.push(MotionCode::new(round + 100, 0)).unwrap();
            assert_eq!(queue.pop().unwrap().slot, round);
            assert_eq!(queue.pop().unwrap().slot, round + 100);
        }
    }

    #[test]
    fn test_clear_empties_and_restores_capacity() {
        let mut queue: CodeQueue<4> = CodeQueue::new();
        queue.push(MotionCode::new(1, 0)).unwrap();
        queue.push(MotionCode::new(2, 0)).unwrap();

        queue.clear();
        assert!(!queue.ready());

        for slot in 0..3 {
            queue.push(MotionCode::new(slot, 0)).unwrap();
        }
        assert_eq!(queue.push(MotionCode::new(9, 0)), Err(QueueError::Full));
    }

    proptest! {
        /// FIFO law: any overflow-free push sequence pops back in order
        #[test]
        fn test_fifo_order(slots in proptest::collection::vec(any::<u8>(), 0..8)) {
            let mut queue: CodeQueue<8> = CodeQueue::new();
            for &slot in &slots {
                queue.push(MotionCode::new(slot, 0)).unwrap();
            }

            let mut popped = Vec::new();
            while let Ok(code) = queue.pop() {
                popped.push(code.slot);
            }
            prop_assert_eq!(popped, slots);
        }

        /// Interleaved pushes and pops stay consistent with a model queue
        #[test]
        fn test_matches_model_queue(ops in proptest::collection::vec((any::<bool>(), any::<u8>()), 0..64)) {
            let mut queue: CodeQueue<4> = CodeQueue::new();
            let mut model: Vec<u8> = Vec::new();

            for (is_push, slot) in ops {
                if is_push {
                    match queue.push(MotionCode::new(slot, 0)) {
                        Ok(()) => model.push(slot),
                        Err(QueueError::Full) => prop_assert_eq!(model.len(), 3),
                        Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                    }
                } else {
                    match queue.pop() {
                        Ok(code) => prop_assert_eq!(code.slot, model.remove(0)),
                        Err(QueueError::Empty) => prop_assert!(model.is_empty()),
                        Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                    }
                }
                prop_assert_eq!(queue.len(), model.len());
            }
        }
    }
}
