//! Leaf index allocation.
//!
//! Fresh indices come from a monotonic counter; released indices go to a
//! FIFO queue and are handed out again before the counter advances. The
//! counter never moves backwards, so it measures how many slots have ever
//! been allocated rather than how many are active.

use crate::{errors::AccessControlError, log::debug};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexAllocator {
    counter: u64,
    capacity: u64,
    free_queue: VecDeque<u64>,
}

impl IndexAllocator {
    pub fn new(capacity: u64) -> Self {
        Self { counter: 0, capacity, free_queue: VecDeque::new() }
    }

    /// Rebuilds an allocator from persisted parts. Callers validate the
    /// parts against the tree first.
    pub(crate) fn from_parts(counter: u64, capacity: u64, free_queue: VecDeque<u64>) -> Self {
        Self { counter, capacity, free_queue }
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// True once every index has been handed out at least once.
    pub fn is_exhausted(&self) -> bool {
        self.counter == self.capacity
    }

    pub fn free_indices(&self) -> impl Iterator<Item = u64> + '_ {
        self.free_queue.iter().copied()
    }

    pub fn free_len(&self) -> usize {
        self.free_queue.len()
    }

    /// The index the next [`allocate`](Self::allocate) will return.
    pub fn peek(&self) -> Result<u64, AccessControlError> {
        if let Some(index) = self.free_queue.front() {
            return Ok(*index);
        }
        if self.counter < self.capacity {
            return Ok(self.counter);
        }
        Err(AccessControlError::TreeFull)
    }

    pub fn allocate(&mut self) -> Result<u64, AccessControlError> {
        if let Some(index) = self.free_queue.pop_front() {
            debug!("Reusing freed index {index}, {} left in queue", self.free_queue.len());
            return Ok(index);
        }
        if self.counter < self.capacity {
            let index = self.counter;
            self.counter += 1;
            return Ok(index);
        }
        Err(AccessControlError::TreeFull)
    }

    /// Queues `index` for reuse. Releasing an index that is already queued
    /// is a caller bug.
    pub fn release(&mut self, index: u64) {
        debug_assert!(index < self.counter, "released index {index} was never allocated");
        debug_assert!(!self.free_queue.contains(&index), "index {index} released twice");
        self.free_queue.push_back(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_indices_are_sequential() {
        let mut allocator = IndexAllocator::new(4);
        assert_eq!(allocator.peek(), Ok(0));
        assert_eq!(allocator.allocate(), Ok(0));
        assert_eq!(allocator.allocate(), Ok(1));
        assert_eq!(allocator.counter(), 2);
        assert!(!allocator.is_exhausted());
    }

    #[test]
    fn test_released_indices_reused_fifo() {
        let mut allocator = IndexAllocator::new(8);
        for _ in 0..4 {
            allocator.allocate().unwrap();
        }
        allocator.release(1);
        allocator.release(2);
        assert_eq!(allocator.free_indices().collect::<Vec<_>>(), vec![1, 2]);

        assert_eq!(allocator.peek(), Ok(1));
        assert_eq!(allocator.allocate(), Ok(1));
        assert_eq!(allocator.allocate(), Ok(2));
        assert_eq!(allocator.allocate(), Ok(4));
        assert_eq!(allocator.counter(), 5);
    }

    #[test]
    fn test_reuse_does_not_move_counter() {
        let mut allocator = IndexAllocator::new(4);
        allocator.allocate().unwrap();
        allocator.allocate().unwrap();
        allocator.release(0);
        assert_eq!(allocator.allocate(), Ok(0));
        assert_eq!(allocator.counter(), 2);
    }

    #[test]
    fn test_exhaustion() {
        let mut allocator = IndexAllocator::new(2);
        allocator.allocate().unwrap();
        allocator.allocate().unwrap();
        assert!(allocator.is_exhausted());
        assert_eq!(allocator.peek(), Err(AccessControlError::TreeFull));
        assert_eq!(allocator.allocate(), Err(AccessControlError::TreeFull));

        allocator.release(1);
        assert_eq!(allocator.allocate(), Ok(1));
        assert_eq!(allocator.allocate(), Err(AccessControlError::TreeFull));
        assert_eq!(allocator.counter(), 2);
    }

    #[test]
    fn test_peek_does_not_mutate() {
        let mut allocator = IndexAllocator::new(4);
        allocator.allocate().unwrap();
        allocator.release(0);
        let before = allocator.clone();
        allocator.peek().unwrap();
        assert_eq!(allocator, before);
    }
}
