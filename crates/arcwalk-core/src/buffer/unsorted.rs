//! Linear-scan priority buffer.

use super::{Buffer, GrowableArray};
use crate::ArcwalkError;
use std::cmp::Ordering;
use std::fmt;

/// Priority buffer that keeps its elements unsorted.
///
/// `put` is O(1) and `get_next` scans every element for the minimum. Only
/// suitable for small frontiers; kept as the reference implementation the
/// heap variant is checked against.
pub struct UnsortedPriorityBuffer<'a, T> {
    items: GrowableArray<T>,
    compare: Box<dyn Fn(&T, &T) -> Ordering + 'a>,
}

impl<'a, T> UnsortedPriorityBuffer<'a, T> {
    pub fn with_comparator(compare: impl Fn(&T, &T) -> Ordering + 'a) -> Self {
        Self {
            items: GrowableArray::new(),
            compare: Box::new(compare),
        }
    }

    fn min_index(&self) -> Option<usize> {
        let slice = self.items.as_slice();
        let mut best: Option<usize> = None;
        for (index, item) in slice.iter().enumerate() {
            best = match best {
                Some(current) if (self.compare)(item, &slice[current]) != Ordering::Less => {
                    Some(current)
                }
                _ => Some(index),
            };
        }
        best
    }
}

impl<T: Ord> UnsortedPriorityBuffer<'_, T> {
    #[must_use]
    pub fn natural() -> Self {
        Self::with_comparator(|a: &T, b: &T| a.cmp(b))
    }
}

impl<T> Buffer<T> for UnsortedPriorityBuffer<'_, T> {
    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn put(&mut self, element: T) {
        self.items.push(element);
    }

    fn get_next(&mut self) -> Result<T, ArcwalkError> {
        let index = self.min_index().ok_or(ArcwalkError::EmptyBuffer)?;
        self.items
            .swap_remove(index)
            .ok_or(ArcwalkError::EmptyBuffer)
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for UnsortedPriorityBuffer<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsortedPriorityBuffer")
            .field("items", &self.items)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PriorityBuffer;

    #[test]
    fn returns_minimum_each_time() {
        let mut buffer = UnsortedPriorityBuffer::natural();
        [4, 1, 3, 1, 2].into_iter().for_each(|x| buffer.put(x));

        let mut out = Vec::new();
        while !buffer.is_empty() {
            out.push(buffer.get_next().expect("element"));
        }
        assert_eq!(out, vec![1, 1, 2, 3, 4]);
    }

    #[test]
    fn agrees_with_heap_variant_on_keys() {
        let input = [(5, 'e'), (1, 'a'), (4, 'd'), (2, 'b'), (3, 'c')];
        let mut heap = PriorityBuffer::keyed();
        let mut linear = UnsortedPriorityBuffer::with_comparator(|a: &(i32, char), b| a.0.cmp(&b.0));
        for (key, value) in input {
            heap.put_keyed(key, value);
            linear.put((key, value));
        }

        while !heap.is_empty() {
            assert_eq!(
                heap.get_next().expect("heap"),
                linear.get_next().expect("linear")
            );
        }
        assert!(linear.is_empty());
    }
}
