//! Output queue of the engine
//!
//! A FIFO over a single vector. Popped slots are left behind the head; when the
//! vector is full they are reclaimed by shifting the live entries to the front,
//! and the vector only grows when too few slots would be reclaimed.

use std::mem;

const INITIAL_CAPACITY: usize = 4;

/// Amortized O(1) FIFO with compaction before growth
#[derive(Debug, Clone)]
pub struct TokenQueue<T> {
    buf: Vec<T>,
    head: usize,
}

impl<T> Default for TokenQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TokenQueue<T> {
    /// Create an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(INITIAL_CAPACITY),
            head: 0,
        }
    }

    /// Number of queued items
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len() - self.head
    }

    /// True if nothing is queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated slots, including reclaimable ones
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Append an item
    pub fn push(&mut self, item: T) {
        if self.buf.len() == self.buf.capacity() {
            if self.head > INITIAL_CAPACITY {
                self.buf.drain(..self.head);
                self.head = 0;
            } else {
                self.buf.reserve_exact(self.buf.capacity().max(INITIAL_CAPACITY));
            }
        }
        self.buf.push(item);
    }
}

impl<T: Default> TokenQueue<T> {
    /// Remove the oldest item
    pub fn pop(&mut self) -> Option<T> {
        let slot = self.buf.get_mut(self.head)?;
        let item = mem::take(slot);
        self.head += 1;
        if self.head == self.buf.len() {
            self.buf.clear();
            self.head = 0;
        }
        Some(item)
    }
}
