//! FIFO buffer. Drives breadth-first order.

use super::Buffer;
use crate::ArcwalkError;
use std::collections::VecDeque;

/// Strict first-in, first-out buffer.
#[derive(Debug, Clone)]
pub struct QueueBuffer<T> {
    items: VecDeque<T>,
}

impl<T> QueueBuffer<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
        }
    }
}

impl<T> Default for QueueBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Buffer<T> for QueueBuffer<T> {
    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn put(&mut self, element: T) {
        self.items.push_back(element);
    }

    fn get_next(&mut self) -> Result<T, ArcwalkError> {
        self.items.pop_front().ok_or(ArcwalkError::EmptyBuffer)
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut queue = QueueBuffer::with_capacity(2);
        queue.put('a');
        queue.put('b');
        assert_eq!(queue.get_next().expect("a"), 'a');
        queue.put('c');
        assert_eq!(queue.get_next().expect("b"), 'b');
        assert_eq!(queue.get_next().expect("c"), 'c');
        assert!(queue.is_empty());
    }

    #[test]
    fn empty_get_next_fails() {
        let mut queue: QueueBuffer<u8> = QueueBuffer::new();
        assert!(matches!(queue.get_next(), Err(ArcwalkError::EmptyBuffer)));
    }
}
