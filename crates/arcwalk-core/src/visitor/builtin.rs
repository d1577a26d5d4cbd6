//! Ready-made visitors.

use super::{
    CONTINUE, ClosureVisitor, DfsVisitor, Flow, SearchVisitor, TopologicalVisitor, stop,
};
use crate::VertexId;
use crate::primitives::VISIT_LIMIT_REASON;
use crate::traversal::SearchState;

/// Visitor of every family that does nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopVisitor;

impl SearchVisitor for NoopVisitor {}

impl DfsVisitor for NoopVisitor {}

impl TopologicalVisitor for NoopVisitor {}

impl ClosureVisitor for NoopVisitor {}

/// Ends a search once `limit` vertices have been expanded.
///
/// The traversal has no timeout of its own; a budget is this visitor.
/// A limit of 0 behaves like 1: the first expanded vertex ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitLimit {
    limit: usize,
    visited: usize,
}

impl VisitLimit {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { limit, visited: 0 }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Vertices expanded since the last reset.
    pub fn visited(&self) -> usize {
        self.visited
    }
}

impl SearchVisitor for VisitLimit {
    fn reset(&mut self) {
        self.visited = 0;
    }

    fn visit_vertex(&mut self, _vertex: VertexId, _state: &SearchState) -> Flow {
        self.visited += 1;
        if self.visited >= self.limit {
            return stop(VISIT_LIMIT_REASON);
        }
        CONTINUE
    }
}

impl DfsVisitor for VisitLimit {}
