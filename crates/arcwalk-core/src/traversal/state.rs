//! Per-run working state of a traversal.

use crate::function::Permutation;
use crate::marker::{BitMarker, IntMarker, VertexMarker};
use crate::{Edge, EdgeId, VertexId};

/// Everything a traversal records while it runs.
///
/// Owned by the traversal and handed to visitors read-only. Cleared and
/// resized by `reset`; after an early stop it holds the partial run.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    visited: BitMarker<VertexId>,
    visited_edges: BitMarker<EdgeId>,
    parents: VertexMarker<Edge>,
    numbers: IntMarker<VertexId>,
    completions: IntMarker<VertexId>,
    levels: IntMarker<VertexId>,
    vertex_order: Permutation<VertexId>,
    completion_order: Permutation<VertexId>,
    edge_order: Permutation<Edge>,
}

impl SearchState {
    pub(crate) fn reset(&mut self, vertex_count: usize, edge_count: usize) {
        self.visited.reset(vertex_count);
        self.visited_edges.reset(edge_count);
        self.parents.reset(vertex_count);
        self.numbers.reset(vertex_count);
        self.completions.reset(vertex_count);
        self.levels.reset(vertex_count);
        self.vertex_order.clear();
        self.completion_order.clear();
        self.edge_order.clear();
    }

    /// Mark `vertex` visited and give it the next discovery number.
    pub(crate) fn discover(&mut self, vertex: VertexId, parent: Option<Edge>, level: usize) {
        self.visited.mark(vertex);
        if let Some(edge) = parent {
            self.parents.set(vertex, edge);
        }
        self.vertex_order.push(vertex);
        self.numbers.set(vertex, self.vertex_order.len());
        self.levels.set(vertex, level);
    }

    /// Mark an edge explored. Returns whether it already was.
    pub(crate) fn mark_edge(&mut self, edge: Edge) -> bool {
        let seen = self.visited_edges.mark(edge.id());
        if !seen {
            self.edge_order.push(edge);
        }
        seen
    }

    /// Give `vertex` the next completion number.
    pub(crate) fn complete(&mut self, vertex: VertexId) {
        self.completion_order.push(vertex);
        self.completions.set(vertex, self.completion_order.len());
    }

    pub fn is_visited(&self, vertex: VertexId) -> bool {
        self.visited.is_marked(vertex)
    }

    pub fn is_edge_visited(&self, edge: Edge) -> bool {
        self.visited_edges.is_marked(edge.id())
    }

    pub fn is_completed(&self, vertex: VertexId) -> bool {
        self.completions.is_defined(vertex)
    }

    /// Tree edge that discovered `vertex`. `None` for roots.
    pub fn parent(&self, vertex: VertexId) -> Option<Edge> {
        self.parents.get(vertex).copied()
    }

    pub fn discovery_number(&self, vertex: VertexId) -> Option<usize> {
        self.numbers.get(vertex).copied()
    }

    pub fn completion_number(&self, vertex: VertexId) -> Option<usize> {
        self.completions.get(vertex).copied()
    }

    /// Distance from the root in tree edges.
    pub fn level(&self, vertex: VertexId) -> Option<usize> {
        self.levels.get(vertex).copied()
    }

    pub fn visited_count(&self) -> usize {
        self.vertex_order.len()
    }

    pub fn parents(&self) -> &VertexMarker<Edge> {
        &self.parents
    }

    pub fn numbering(&self) -> &IntMarker<VertexId> {
        &self.numbers
    }

    pub fn completions(&self) -> &IntMarker<VertexId> {
        &self.completions
    }

    pub fn levels(&self) -> &IntMarker<VertexId> {
        &self.levels
    }

    /// Vertices in discovery order: `vertex_order().get(n)` has number `n`.
    pub fn vertex_order(&self) -> &Permutation<VertexId> {
        &self.vertex_order
    }

    /// Vertices in completion order (depth-first only).
    pub fn completion_order(&self) -> &Permutation<VertexId> {
        &self.completion_order
    }

    /// Edges in the order they were explored, oriented as traversed.
    pub fn edge_order(&self) -> &Permutation<Edge> {
        &self.edge_order
    }
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.parents == other.parents
            && self.numbers == other.numbers
            && self.completions == other.completions
            && self.levels == other.levels
            && self.vertex_order == other.vertex_order
            && self.completion_order == other.completion_order
            && self.edge_order == other.edge_order
    }
}

impl Eq for SearchState {}
