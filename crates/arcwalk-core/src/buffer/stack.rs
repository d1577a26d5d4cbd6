//! LIFO buffer on the growable array.

use super::{Buffer, GrowableArray};
use crate::ArcwalkError;

/// Last-in, first-out buffer.
///
/// Also serves as the frame stack of the iterative depth-first search,
/// which is why it exposes [`StackBuffer::peek_mut`].
#[derive(Debug, Clone)]
pub struct StackBuffer<T> {
    items: GrowableArray<T>,
}

impl<T> StackBuffer<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: GrowableArray::new(),
        }
    }

    /// The element `get_next` would return.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }
}

impl<T> Default for StackBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Buffer<T> for StackBuffer<T> {
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
        self.items.pop().ok_or(ArcwalkError::EmptyBuffer)
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo_order() {
        let mut stack = StackBuffer::new();
        (1..=3).for_each(|x| stack.put(x));

        assert_eq!(stack.get_next().expect("3"), 3);
        assert_eq!(stack.get_next().expect("2"), 2);
        assert_eq!(stack.get_next().expect("1"), 1);
        assert!(matches!(stack.get_next(), Err(ArcwalkError::EmptyBuffer)));
    }

    #[test]
    fn peek_mut_edits_top() {
        let mut stack = StackBuffer::new();
        stack.put(1);
        stack.put(2);
        if let Some(top) = stack.peek_mut() {
            *top = 20;
        }
        assert_eq!(stack.get_next().expect("top"), 20);
    }
}
