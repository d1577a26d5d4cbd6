//! # Frontier Buffers
//!
//! Interchangeable strategies for choosing which discovered vertex a
//! traversal expands next.
//!
//! | Buffer | `put` | `get_next` | Order |
//! |--------|-------|------------|-------|
//! | [`QueueBuffer`] | O(1) | O(1) | FIFO |
//! | [`StackBuffer`] | amortized O(1) | O(1) | LIFO |
//! | [`PriorityBuffer`] | O(log n) | O(log n) | minimum first |
//! | [`UnsortedPriorityBuffer`] | O(1) | O(n) | minimum first |
//! | [`RandomBuffer`] | amortized O(1) | O(1) | uniform random |
//!
//! Every variant fails `get_next` with [`ArcwalkError::EmptyBuffer`] when
//! empty instead of panicking. Hot loops should still test `is_empty` first.

mod array;
mod priority;
mod queue;
mod random;
mod stack;
mod unsorted;

pub use array::{GrowableArray, grown_capacity};
pub use priority::PriorityBuffer;
pub use queue::QueueBuffer;
pub use random::RandomBuffer;
pub use stack::StackBuffer;
pub use unsorted::UnsortedPriorityBuffer;

use crate::ArcwalkError;

/// A container of pending elements with an ordering contract.
pub trait Buffer<T> {
    /// Whether no element is pending.
    fn is_empty(&self) -> bool;

    /// Number of pending elements.
    fn len(&self) -> usize;

    /// Add an element. Never drops it.
    fn put(&mut self, element: T);

    /// Remove and return one pending element according to the buffer's order.
    fn get_next(&mut self) -> Result<T, ArcwalkError>;

    /// Drop every pending element, keeping the allocation.
    fn clear(&mut self);
}

impl<T, B: Buffer<T> + ?Sized> Buffer<T> for Box<B> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn put(&mut self, element: T) {
        (**self).put(element);
    }

    fn get_next(&mut self) -> Result<T, ArcwalkError> {
        (**self).get_next()
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
