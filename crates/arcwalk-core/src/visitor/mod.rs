//! # Visitor Framework
//!
//! Observers that algorithms call back into while they run.
//!
//! Each algorithm family has its own visitor trait:
//!
//! | Family | Trait | Driven by |
//! |--------|-------|-----------|
//! | search | [`SearchVisitor`] | BFS, frontier search, reachability, DFS |
//! | depth-first | [`DfsVisitor`] | DFS |
//! | topological | [`TopologicalVisitor`] | both topological solvers |
//! | closure | [`ClosureVisitor`] | transitive closure |
//!
//! Visitors are attached through the closed [`AnyVisitor`] union, and the
//! algorithm rejects a family it cannot drive at attachment time.
//!
//! ## Early Termination
//!
//! Every callback returns a [`Flow`]. Returning `ControlFlow::Break(stop)`
//! ends the run: the algorithm moves to `Finished`, keeps its partial
//! results and records `stop`. This is never reported as an error.

mod builtin;
mod compose;

pub use builtin::{NoopVisitor, VisitLimit};
pub use compose::VisitorList;
pub(crate) use compose::Chain;

use crate::traversal::SearchState;
use crate::{Edge, VertexId};
use std::borrow::Cow;
use std::fmt;
use std::ops::ControlFlow;

// =============================================================================
// CONTROL FLOW
// =============================================================================

/// Why a visitor ended a run early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    reason: Cow<'static, str>,
}

impl Stop {
    pub fn new(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Result of every visitor callback.
pub type Flow = ControlFlow<Stop>;

/// Keep going.
pub const CONTINUE: Flow = ControlFlow::Continue(());

/// End the run with `reason`.
pub fn stop(reason: impl Into<Cow<'static, str>>) -> Flow {
    ControlFlow::Break(Stop::new(reason))
}

/// The flow that ends a run the way `stop` ended an inner one.
pub(crate) fn replay(stop: Option<&Stop>) -> Flow {
    stop.cloned().map_or(CONTINUE, ControlFlow::Break)
}

// =============================================================================
// FAMILIES
// =============================================================================

/// The capability set a visitor expects from its algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitorFamily {
    Search,
    DepthFirst,
    Topological,
    Closure,
}

impl fmt::Display for VisitorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Search => "search",
            Self::DepthFirst => "depth-first",
            Self::Topological => "topological",
            Self::Closure => "closure",
        };
        f.write_str(name)
    }
}

/// An edge being explored, oriented in the traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub edge: Edge,
    pub source: VertexId,
    pub target: VertexId,
}

/// Callbacks of a generic frontier-driven search.
///
/// Every method defaults to a no-op, so implementors override only what
/// they observe. Callbacks see the working state read-only and must not
/// mutate the graph.
pub trait SearchVisitor {
    /// Clear accumulated state before a run.
    fn reset(&mut self) {}

    /// A vertex starts a new search tree.
    fn visit_root(&mut self, _root: VertexId, _state: &SearchState) -> Flow {
        CONTINUE
    }

    /// A vertex is expanded.
    fn visit_vertex(&mut self, _vertex: VertexId, _state: &SearchState) -> Flow {
        CONTINUE
    }

    /// An edge is explored for the first time.
    fn visit_edge(&mut self, _step: Step, _state: &SearchState) -> Flow {
        CONTINUE
    }

    /// An edge discovered its target.
    fn visit_tree_edge(&mut self, _step: Step, _state: &SearchState) -> Flow {
        CONTINUE
    }

    /// A navigable edge led to an already visited vertex.
    fn visit_frond(&mut self, _step: Step, _state: &SearchState) -> Flow {
        CONTINUE
    }
}

/// Depth-first callbacks: fronds are classified, and vertices are left.
pub trait DfsVisitor: SearchVisitor {
    /// The target is a completed descendant of the source.
    fn visit_forward_edge(&mut self, _step: Step, _state: &SearchState) -> Flow {
        CONTINUE
    }

    /// The target is an open ancestor of the source. Proves a cycle.
    fn visit_back_edge(&mut self, _step: Step, _state: &SearchState) -> Flow {
        CONTINUE
    }

    /// The target lies in an already completed subtree.
    fn visit_cross_edge(&mut self, _step: Step, _state: &SearchState) -> Flow {
        CONTINUE
    }

    /// Every edge of the vertex has been processed.
    fn leave_vertex(&mut self, _vertex: VertexId, _state: &SearchState) -> Flow {
        CONTINUE
    }

    /// The subtree below a tree edge is complete.
    fn leave_tree_edge(&mut self, _step: Step, _state: &SearchState) -> Flow {
        CONTINUE
    }
}

/// Receives vertices in topological order, with their 1-based position.
pub trait TopologicalVisitor {
    fn reset(&mut self) {}

    fn visit_vertex_in_topological_order(&mut self, _vertex: VertexId, _position: usize) -> Flow {
        CONTINUE
    }
}

/// Observes every relaxation of the transitive closure: `source` reaches
/// `target` through `via`.
pub trait ClosureVisitor {
    fn reset(&mut self) {}

    fn visit_vertex_triple(&mut self, _source: VertexId, _via: VertexId, _target: VertexId) -> Flow {
        CONTINUE
    }
}

// =============================================================================
// ANY VISITOR
// =============================================================================

/// A visitor of any family, as accepted by `add_visitor`.
pub enum AnyVisitor<'v> {
    Search(Box<dyn SearchVisitor + 'v>),
    DepthFirst(Box<dyn DfsVisitor + 'v>),
    Topological(Box<dyn TopologicalVisitor + 'v>),
    Closure(Box<dyn ClosureVisitor + 'v>),
}

impl<'v> AnyVisitor<'v> {
    pub fn search(visitor: impl SearchVisitor + 'v) -> Self {
        Self::Search(Box::new(visitor))
    }

    pub fn depth_first(visitor: impl DfsVisitor + 'v) -> Self {
        Self::DepthFirst(Box::new(visitor))
    }

    pub fn topological(visitor: impl TopologicalVisitor + 'v) -> Self {
        Self::Topological(Box::new(visitor))
    }

    pub fn closure(visitor: impl ClosureVisitor + 'v) -> Self {
        Self::Closure(Box::new(visitor))
    }

    pub fn family(&self) -> VisitorFamily {
        match self {
            Self::Search(_) => VisitorFamily::Search,
            Self::DepthFirst(_) => VisitorFamily::DepthFirst,
            Self::Topological(_) => VisitorFamily::Topological,
            Self::Closure(_) => VisitorFamily::Closure,
        }
    }

    pub(crate) fn into_search(self) -> Option<Box<dyn SearchVisitor + 'v>> {
        match self {
            Self::Search(visitor) => Some(visitor),
            _ => None,
        }
    }

    /// Search visitors are driven by DFS too, with every DFS-only
    /// callback left as a no-op.
    pub(crate) fn into_depth_first(self) -> Option<Box<dyn DfsVisitor + 'v>> {
        match self {
            Self::Search(visitor) => Some(Box::new(SearchOnly(visitor))),
            Self::DepthFirst(visitor) => Some(visitor),
            _ => None,
        }
    }

    pub(crate) fn into_topological(self) -> Option<Box<dyn TopologicalVisitor + 'v>> {
        match self {
            Self::Topological(visitor) => Some(visitor),
            _ => None,
        }
    }

    pub(crate) fn into_closure(self) -> Option<Box<dyn ClosureVisitor + 'v>> {
        match self {
            Self::Closure(visitor) => Some(visitor),
            _ => None,
        }
    }
}

impl fmt::Debug for AnyVisitor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyVisitor").field(&self.family()).finish()
    }
}

struct SearchOnly<'v>(Box<dyn SearchVisitor + 'v>);

impl SearchVisitor for SearchOnly<'_> {
    fn reset(&mut self) {
        self.0.reset();
    }

    fn visit_root(&mut self, root: VertexId, state: &SearchState) -> Flow {
        self.0.visit_root(root, state)
    }

    fn visit_vertex(&mut self, vertex: VertexId, state: &SearchState) -> Flow {
        self.0.visit_vertex(vertex, state)
    }

    fn visit_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.0.visit_edge(step, state)
    }

    fn visit_tree_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.0.visit_tree_edge(step, state)
    }

    fn visit_frond(&mut self, step: Step, state: &SearchState) -> Flow {
        self.0.visit_frond(step, state)
    }
}

impl DfsVisitor for SearchOnly<'_> {}

// =============================================================================
// TESTS
// =============================================================================
