//! # Element Markers
//!
//! Element-keyed mappings with O(1) `get`/`set`/`is_defined`.
//!
//! A marker is a plain `Vec` addressed by the dense 1-based identity of a
//! graph element. Slot 0 is never used. Writing past the current size grows
//! the marker, reading past it yields "undefined".

use crate::graph::GraphView;
use crate::{Edge, EdgeId, VertexId};
use std::fmt;
use std::marker::PhantomData;

/// Keys a marker can be addressed by.
pub trait ElementIndex: Copy {
    /// Dense 1-based index of the element.
    fn element_index(self) -> usize;
}

impl ElementIndex for VertexId {
    fn element_index(self) -> usize {
        self.index()
    }
}

impl ElementIndex for EdgeId {
    fn element_index(self) -> usize {
        self.index()
    }
}

impl ElementIndex for Edge {
    fn element_index(self) -> usize {
        self.id().index()
    }
}

// =============================================================================
// VALUE MARKER
// =============================================================================

/// Partial mapping from graph elements to values.
pub struct Marker<K, V> {
    values: Vec<Option<V>>,
    _key: PhantomData<fn(K)>,
}

/// Vertex-keyed marker.
pub type VertexMarker<V> = Marker<VertexId, V>;

/// Edge-keyed marker. Both orientations of an edge share a slot.
pub type EdgeMarker<V> = Marker<EdgeId, V>;

/// Integer-valued marker, used for numberings, levels and degrees.
pub type IntMarker<K> = Marker<K, usize>;

impl<K: ElementIndex, V> Marker<K, V> {
    /// Create a marker able to hold `count` elements without growing.
    #[must_use]
    pub fn with_size(count: usize) -> Self {
        let mut values = Vec::with_capacity(count + 1);
        values.resize_with(count + 1, || None);
        Self {
            values,
            _key: PhantomData,
        }
    }

    /// Value assigned to `key`, if any.
    pub fn get(&self, key: K) -> Option<&V> {
        self.values.get(key.element_index())?.as_ref()
    }

    /// Assign a value, returning the previous one.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let slot = key.element_index();
        if slot >= self.values.len() {
            self.values.resize_with(slot + 1, || None);
        }
        self.values[slot].replace(value)
    }

    /// Remove the value assigned to `key`.
    pub fn remove(&mut self, key: K) -> Option<V> {
        self.values.get_mut(key.element_index())?.take()
    }

    /// Whether `key` has a value.
    pub fn is_defined(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Forget every value, keeping the allocation.
    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(|slot| *slot = None);
    }

    /// Forget every value and size the marker for `count` elements.
    pub fn reset(&mut self, count: usize) {
        self.values.clear();
        self.values.resize_with(count + 1, || None);
    }

    /// Number of defined entries.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|slot| slot.is_some()).count()
    }
}

impl<V> Marker<VertexId, V> {
    /// Marker sized for the vertices of `graph`.
    #[must_use]
    pub fn for_vertices<G: GraphView>(graph: &G) -> Self {
        Self::with_size(graph.vertex_count())
    }
}

impl<V> Marker<EdgeId, V> {
    /// Marker sized for the edges of `graph`.
    #[must_use]
    pub fn for_edges<G: GraphView>(graph: &G) -> Self {
        Self::with_size(graph.edge_count())
    }
}

impl<K: ElementIndex, V> Default for Marker<K, V> {
    fn default() -> Self {
        Self::with_size(0)
    }
}

impl<K, V: Clone> Clone for Marker<K, V> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            _key: PhantomData,
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Marker<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.values
                    .iter()
                    .enumerate()
                    .filter_map(|(index, slot)| slot.as_ref().map(|value| (index, value))),
            )
            .finish()
    }
}

impl<K, V: PartialEq> PartialEq for Marker<K, V> {
    fn eq(&self, other: &Self) -> bool {
        let longest = self.values.len().max(other.values.len());
        (0..longest).all(|index| {
            let left = self.values.get(index).and_then(Option::as_ref);
            let right = other.values.get(index).and_then(Option::as_ref);
            left == right
        })
    }
}

// =============================================================================
// BOOLEAN MARKER
// =============================================================================

/// Total mapping from graph elements to flags, `false` by default.
pub struct BitMarker<K> {
    bits: Vec<bool>,
    _key: PhantomData<fn(K)>,
}

impl<K: ElementIndex> BitMarker<K> {
    /// Create a marker able to hold `count` elements without growing.
    #[must_use]
    pub fn with_size(count: usize) -> Self {
        Self {
            bits: vec![false; count + 1],
            _key: PhantomData,
        }
    }

    /// Whether `key` is marked.
    pub fn is_marked(&self, key: K) -> bool {
        self.bits
            .get(key.element_index())
            .copied()
            .unwrap_or(false)
    }

    /// Mark `key`, returning whether it was marked before.
    pub fn mark(&mut self, key: K) -> bool {
        let slot = key.element_index();
        if slot >= self.bits.len() {
            self.bits.resize(slot + 1, false);
        }
        std::mem::replace(&mut self.bits[slot], true)
    }

    /// Unmark `key`.
    pub fn unmark(&mut self, key: K) {
        if let Some(bit) = self.bits.get_mut(key.element_index()) {
            *bit = false;
        }
    }

    /// Unmark everything and size the marker for `count` elements.
    pub fn reset(&mut self, count: usize) {
        self.bits.clear();
        self.bits.resize(count + 1, false);
    }

    /// Number of marked elements.
    pub fn marked_count(&self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }
}

impl<K: ElementIndex> Default for BitMarker<K> {
    fn default() -> Self {
        Self::with_size(0)
    }
}

impl<K> Clone for BitMarker<K> {
    fn clone(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            _key: PhantomData,
        }
    }
}

impl<K> fmt::Debug for BitMarker<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(
                self.bits
                    .iter()
                    .enumerate()
                    .filter_map(|(index, bit)| bit.then_some(index)),
            )
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
