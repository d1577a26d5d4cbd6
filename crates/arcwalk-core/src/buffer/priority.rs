//! Heap-backed priority buffer.

use super::{Buffer, GrowableArray};
use crate::ArcwalkError;
use std::cmp::Ordering;
use std::fmt;

type Comparator<'a, T> = Box<dyn Fn(&T, &T) -> Ordering + 'a>;

/// Binary min-heap: `get_next` returns a minimum element in O(log n).
///
/// The order comes from an external comparator. Elements that compare equal
/// come out in unspecified order.
pub struct PriorityBuffer<'a, T> {
    heap: GrowableArray<T>,
    compare: Comparator<'a, T>,
}

impl<'a, T> PriorityBuffer<'a, T> {
    /// Order elements by `compare`, smallest first.
    pub fn with_comparator(compare: impl Fn(&T, &T) -> Ordering + 'a) -> Self {
        Self {
            heap: GrowableArray::new(),
            compare: Box::new(compare),
        }
    }

    /// Order elements by the key `key` extracts, smallest first.
    pub fn by_key<K: Ord>(key: impl Fn(&T) -> K + 'a) -> Self {
        Self::with_comparator(move |a, b| key(a).cmp(&key(b)))
    }

    /// Peek at the element `get_next` would return.
    pub fn peek(&self) -> Option<&T> {
        self.heap.get(0)
    }

    fn less(&self, a: usize, b: usize) -> bool {
        match (self.heap.get(a), self.heap.get(b)) {
            (Some(x), Some(y)) => (self.compare)(x, y) == Ordering::Less,
            _ => false,
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smallest = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(smallest, index) {
                break;
            }
            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T: Ord> PriorityBuffer<'_, T> {
    /// Order elements by their own `Ord`.
    #[must_use]
    pub fn natural() -> Self {
        Self::with_comparator(|a: &T, b: &T| a.cmp(b))
    }
}

impl<K: Ord, V> PriorityBuffer<'_, (K, V)> {
    /// Order inline `(key, value)` pairs by key.
    #[must_use]
    pub fn keyed() -> Self {
        Self::with_comparator(|a: &(K, V), b: &(K, V)| a.0.cmp(&b.0))
    }

    /// Insert `value` with priority `key`.
    pub fn put_keyed(&mut self, key: K, value: V) {
        self.put((key, value));
    }
}

impl<T> Buffer<T> for PriorityBuffer<'_, T> {
    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn put(&mut self, element: T) {
        self.heap.push(element);
        self.sift_up(self.heap.len() - 1);
    }

    fn get_next(&mut self) -> Result<T, ArcwalkError> {
        let min = self.heap.swap_remove(0).ok_or(ArcwalkError::EmptyBuffer)?;
        self.sift_down(0);
        Ok(min)
    }

    fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityBuffer<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityBuffer")
            .field("heap", &self.heap)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_is_non_decreasing() {
        let mut buffer = PriorityBuffer::natural();
        [7, 2, 9, 2, 5, 1, 8].into_iter().for_each(|x| buffer.put(x));

        let mut out = Vec::new();
        while !buffer.is_empty() {
            out.push(buffer.get_next().expect("element"));
        }
        assert_eq!(out, vec![1, 2, 2, 5, 7, 8, 9]);
    }

    #[test]
    fn keyed_pairs_come_out_by_key() {
        let mut buffer = PriorityBuffer::keyed();
        buffer.put_keyed(3, "c");
        buffer.put_keyed(1, "a");
        buffer.put_keyed(2, "b");

        assert_eq!(buffer.peek(), Some(&(1, "a")));
        assert_eq!(buffer.get_next().expect("a").1, "a");
        assert_eq!(buffer.get_next().expect("b").1, "b");
        assert_eq!(buffer.get_next().expect("c").1, "c");
    }

    #[test]
    fn external_comparator_can_reverse() {
        let weights = [0usize, 10, 30, 20];
        let mut buffer = PriorityBuffer::by_key(|i: &usize| std::cmp::Reverse(weights[*i]));
        [1usize, 2, 3].into_iter().for_each(|i| buffer.put(i));

        assert_eq!(buffer.get_next().expect("max"), 2);
        assert_eq!(buffer.get_next().expect("mid"), 3);
        assert_eq!(buffer.get_next().expect("min"), 1);
    }

    #[test]
    fn empty_get_next_fails() {
        let mut buffer: PriorityBuffer<'_, u8> = PriorityBuffer::natural();
        assert!(matches!(buffer.get_next(), Err(ArcwalkError::EmptyBuffer)));
    }
}
