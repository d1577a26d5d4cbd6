//! # Function Objects
//!
//! Typed total and partial mappings used as algorithm parameters and
//! results:
//!
//! - [`BooleanFunction`]: predicates (subgraph membership, navigability)
//! - [`IntFunction`]: numberings, levels, degrees
//! - [`Function`]: arbitrary partial mappings (parent edges)
//! - [`Relation`] / [`BinaryFunction`]: pairwise results (reachability, successors)
//! - [`Permutation`]: 1-based orderings (vertex order, topological order)
//!
//! Markers implement the unary traits, and plain closures implement
//! [`BooleanFunction`], so callers can pass whichever is at hand.

use crate::marker::{BitMarker, ElementIndex, Marker};

/// Total predicate over a domain.
pub trait BooleanFunction<D> {
    fn get(&self, element: D) -> bool;
}

impl<D, F> BooleanFunction<D> for F
where
    F: Fn(D) -> bool,
{
    fn get(&self, element: D) -> bool {
        self(element)
    }
}

impl<K: ElementIndex> BooleanFunction<K> for BitMarker<K> {
    fn get(&self, element: K) -> bool {
        self.is_marked(element)
    }
}

/// Partial mapping to integers.
pub trait IntFunction<D> {
    fn get(&self, element: D) -> Option<usize>;

    fn is_defined(&self, element: D) -> bool {
        self.get(element).is_some()
    }
}

impl<K: ElementIndex> IntFunction<K> for Marker<K, usize> {
    fn get(&self, element: K) -> Option<usize> {
        Marker::get(self, element).copied()
    }
}

/// Partial mapping to arbitrary copyable values.
pub trait Function<D, R> {
    fn get(&self, element: D) -> Option<R>;

    fn is_defined(&self, element: D) -> bool {
        self.get(element).is_some()
    }
}

impl<K: ElementIndex, R: Copy> Function<K, R> for Marker<K, R> {
    fn get(&self, element: K) -> Option<R> {
        Marker::get(self, element).copied()
    }
}

/// Binary predicate.
pub trait Relation<A, B> {
    fn related(&self, left: A, right: B) -> bool;
}

/// Partial mapping of pairs.
pub trait BinaryFunction<A, B, R> {
    fn get(&self, left: A, right: B) -> Option<R>;

    fn is_defined(&self, left: A, right: B) -> bool {
        self.get(left, right).is_some()
    }
}

// =============================================================================
// PERMUTATION
// =============================================================================

/// A 1-based sequence of distinct elements.
///
/// Position 0 is never valid; `get(1)` is the first element. This matches
/// the numberings the traversals hand out, so `order.get(number(v)) == v`.
/// The inverse is kept alongside, so `position` is O(1).
#[derive(Debug, Clone)]
pub struct Permutation<T> {
    elements: Vec<T>,
    positions: Marker<T, usize>,
}

impl<T: ElementIndex + PartialEq> Permutation<T> {
    /// Create an empty permutation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            positions: Marker::default(),
        }
    }

    /// Element at 1-based `position`.
    pub fn get(&self, position: usize) -> Option<T> {
        position
            .checked_sub(1)
            .and_then(|slot| self.elements.get(slot))
            .copied()
    }

    /// 1-based position of `element`.
    pub fn position(&self, element: T) -> Option<usize> {
        // Both orientations of an edge share a slot
        let position = *self.positions.get(element)?;
        (self.get(position)? == element).then_some(position)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.elements.iter().copied()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub(crate) fn push(&mut self, element: T) {
        self.elements.push(element);
        self.positions.set(element, self.elements.len());
    }

    pub(crate) fn clear(&mut self) {
        self.elements.clear();
        self.positions.clear();
    }
}

impl<T: ElementIndex + PartialEq> Default for Permutation<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for Permutation<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Eq> Eq for Permutation<T> {}

impl<T> From<Permutation<T>> for Vec<T> {
    fn from(permutation: Permutation<T>) -> Self {
        permutation.elements
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{VertexId, marker::IntMarker};

    #[test]
    fn closures_are_boolean_functions() {
        let even = |v: VertexId| v.index() % 2 == 0;
        assert!(BooleanFunction::get(&even, VertexId(2)));
        assert!(!BooleanFunction::get(&even, VertexId(3)));
    }

    #[test]
    fn markers_are_int_functions() {
        let mut marker: IntMarker<VertexId> = Marker::with_size(2);
        marker.set(VertexId(1), 7);

        assert_eq!(IntFunction::get(&marker, VertexId(1)), Some(7));
        assert!(!IntFunction::is_defined(&marker, VertexId(2)));
    }

    #[test]
    fn permutation_inverse_survives_clear() {
        let mut order = Permutation::new();
        order.push(VertexId(5));
        order.clear();
        assert_eq!(order.position(VertexId(5)), None);

        order.push(VertexId(2));
        order.push(VertexId(5));
        assert_eq!(order.position(VertexId(5)), Some(2));
        assert_eq!(order.position(VertexId(2)), Some(1));
    }

    #[test]
    fn edge_positions_respect_orientation() {
        use crate::{Edge, EdgeId};

        let mut order = Permutation::new();
        let edge = Edge::normal(EdgeId(1));
        order.push(edge);

        assert_eq!(order.position(edge), Some(1));
        assert_eq!(order.position(edge.reversed()), None);
    }

    #[test]
    fn permutation_is_one_based() {
        let mut order = Permutation::new();
        order.push(VertexId(3));
        order.push(VertexId(1));

        assert_eq!(order.get(0), None);
        assert_eq!(order.get(1), Some(VertexId(3)));
        assert_eq!(order.get(2), Some(VertexId(1)));
        assert_eq!(order.get(3), None);
        assert_eq!(order.position(VertexId(1)), Some(2));
        assert_eq!(order.position(VertexId(2)), None);
        assert_eq!(order.len(), 2);
        assert_eq!(Vec::from(order), vec![VertexId(3), VertexId(1)]);
    }
}
