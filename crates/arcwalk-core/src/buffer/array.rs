//! Auto-growing backing array shared by the array-based buffers.

use crate::primitives::{DOUBLING_LIMIT, HALF_GROWTH_LIMIT, INITIAL_BUFFER_CAPACITY, max_array_len};

/// Capacity to grow to when an array of `T` with `current` slots is full.
///
/// Doubles below [`DOUBLING_LIMIT`], grows by half below
/// [`HALF_GROWTH_LIMIT`], by a quarter above, and never exceeds
/// [`max_array_len`].
#[must_use]
pub fn grown_capacity<T>(current: usize) -> usize {
    let grown = if current < INITIAL_BUFFER_CAPACITY {
        INITIAL_BUFFER_CAPACITY
    } else if current < DOUBLING_LIMIT {
        current.saturating_mul(2)
    } else if current < HALF_GROWTH_LIMIT {
        current.saturating_add(current / 2)
    } else {
        current.saturating_add(current / 4)
    };
    grown.min(max_array_len::<T>())
}

/// A `Vec` whose reallocation schedule follows [`grown_capacity`].
#[derive(Debug, Clone)]
pub struct GrowableArray<T> {
    items: Vec<T>,
}

impl<T> GrowableArray<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_BUFFER_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            let target = grown_capacity::<T>(self.items.capacity());
            self.items
                .reserve_exact(target.saturating_sub(self.items.len()).max(1));
        }
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Remove the item at `index`, moving the last item into its slot.
    pub fn swap_remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.swap_remove(index))
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}
