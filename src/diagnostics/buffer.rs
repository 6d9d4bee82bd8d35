// SPDX-License-Identifier: MPL-2.0
//! Bounded ring buffer for the lifecycle journal.
//!
//! A long-running host shows toasts indefinitely; the journal only ever
//! keeps the most recent window of their history.

use std::collections::VecDeque;

pub use crate::domain::diagnostics::BufferCapacity;

/// Fixed-capacity buffer; pushing into a full buffer evicts the oldest
/// entry. Iteration is oldest first.
///
/// # Example
///
/// ```
/// use toastkit::diagnostics::CircularBuffer;
/// use toastkit::notifications::ToastId;
///
/// let mut shown: CircularBuffer<ToastId> = CircularBuffer::with_raw_capacity(2);
/// shown.push(ToastId::from_raw(1));
/// shown.push(ToastId::from_raw(2));
///
/// // The oldest entry makes room and is handed back.
/// assert_eq!(shown.push(ToastId::from_raw(3)), Some(ToastId::from_raw(1)));
///
/// let ids: Vec<u64> = shown.iter().map(|id| id.value()).collect();
/// assert_eq!(ids, vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    /// Creates a buffer holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Unvalidated capacity, for tests that want tiny buffers.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `item`, returning the evicted entry if the buffer was full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.data.len() >= self.capacity {
            self.data.pop_front()
        } else {
            None
        };
        self.data.push_back(item);
        evicted
    }

    /// Entries oldest first; `next_back` yields the newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_evicts_oldest() {
        let mut buffer = CircularBuffer::with_raw_capacity(3);

        assert_eq!(buffer.push(1), None);
        buffer.push(2);
        buffer.push(3);
        assert_eq!(buffer.push(4), Some(1));

        let items: Vec<_> = buffer.iter().copied().collect();
        assert_eq!(items, vec![2, 3, 4]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut buffer = CircularBuffer::with_raw_capacity(0);
        buffer.push("a");
        buffer.push("b");

        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.iter().next_back(), Some(&"b"));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buffer = CircularBuffer::new(BufferCapacity::new(32));
        buffer.push(1);
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 32);
    }
}
