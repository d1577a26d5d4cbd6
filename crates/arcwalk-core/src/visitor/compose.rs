//! Visitor composition: fan-out lists, chaining, shared handles.

use super::{
    CONTINUE, ClosureVisitor, DfsVisitor, Flow, SearchVisitor, Step, TopologicalVisitor,
};
use crate::VertexId;
use crate::traversal::SearchState;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

// =============================================================================
// VISITOR LIST
// =============================================================================

/// Ordered visitors of one family, itself a visitor of that family.
///
/// Every callback reaches the members in registration order. The first
/// member that breaks ends the fan-out and its [`Flow`] is returned.
/// Registering the same visitor twice is allowed.
pub struct VisitorList<V: ?Sized> {
    visitors: Vec<Box<V>>,
}

impl<V: ?Sized> VisitorList<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    pub fn push(&mut self, visitor: Box<V>) {
        self.visitors.push(visitor);
    }

    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    pub fn clear(&mut self) {
        self.visitors.clear();
    }
}

impl<V: ?Sized> Default for VisitorList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized> fmt::Debug for VisitorList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitorList")
            .field("len", &self.visitors.len())
            .finish()
    }
}

impl<V: SearchVisitor + ?Sized> SearchVisitor for VisitorList<V> {
    fn reset(&mut self) {
        self.visitors.iter_mut().for_each(|visitor| visitor.reset());
    }

    fn visit_root(&mut self, root: VertexId, state: &SearchState) -> Flow {
        for visitor in &mut self.visitors {
            visitor.visit_root(root, state)?;
        }
        CONTINUE
    }

    fn visit_vertex(&mut self, vertex: VertexId, state: &SearchState) -> Flow {
        for visitor in &mut self.visitors {
            visitor.visit_vertex(vertex, state)?;
        }
        CONTINUE
    }

    fn visit_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        for visitor in &mut self.visitors {
            visitor.visit_edge(step, state)?;
        }
        CONTINUE
    }

    fn visit_tree_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        for visitor in &mut self.visitors {
            visitor.visit_tree_edge(step, state)?;
        }
        CONTINUE
    }

    fn visit_frond(&mut self, step: Step, state: &SearchState) -> Flow {
        for visitor in &mut self.visitors {
            visitor.visit_frond(step, state)?;
        }
        CONTINUE
    }
}

impl<V: DfsVisitor + ?Sized> DfsVisitor for VisitorList<V> {
    fn visit_forward_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        for visitor in &mut self.visitors {
            visitor.visit_forward_edge(step, state)?;
        }
        CONTINUE
    }

    fn visit_back_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        for visitor in &mut self.visitors {
            visitor.visit_back_edge(step, state)?;
        }
        CONTINUE
    }

    fn visit_cross_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        for visitor in &mut self.visitors {
            visitor.visit_cross_edge(step, state)?;
        }
        CONTINUE
    }

    fn leave_vertex(&mut self, vertex: VertexId, state: &SearchState) -> Flow {
        for visitor in &mut self.visitors {
            visitor.leave_vertex(vertex, state)?;
        }
        CONTINUE
    }

    fn leave_tree_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        for visitor in &mut self.visitors {
            visitor.leave_tree_edge(step, state)?;
        }
        CONTINUE
    }
}

impl<V: TopologicalVisitor + ?Sized> TopologicalVisitor for VisitorList<V> {
    fn reset(&mut self) {
        self.visitors.iter_mut().for_each(|visitor| visitor.reset());
    }

    fn visit_vertex_in_topological_order(&mut self, vertex: VertexId, position: usize) -> Flow {
        for visitor in &mut self.visitors {
            visitor.visit_vertex_in_topological_order(vertex, position)?;
        }
        CONTINUE
    }
}

impl<V: ClosureVisitor + ?Sized> ClosureVisitor for VisitorList<V> {
    fn reset(&mut self) {
        self.visitors.iter_mut().for_each(|visitor| visitor.reset());
    }

    fn visit_vertex_triple(&mut self, source: VertexId, via: VertexId, target: VertexId) -> Flow {
        for visitor in &mut self.visitors {
            visitor.visit_vertex_triple(source, via, target)?;
        }
        CONTINUE
    }
}

// =============================================================================
// CHAIN
// =============================================================================

/// Two visitors called in order: an algorithm's private hook, then the
/// caller's visitors.
pub(crate) struct Chain<'a, A: ?Sized, B: ?Sized> {
    pub(crate) first: &'a mut A,
    pub(crate) second: &'a mut B,
}

impl<A: SearchVisitor + ?Sized, B: SearchVisitor + ?Sized> SearchVisitor for Chain<'_, A, B> {
    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }

    fn visit_root(&mut self, root: VertexId, state: &SearchState) -> Flow {
        self.first.visit_root(root, state)?;
        self.second.visit_root(root, state)
    }

    fn visit_vertex(&mut self, vertex: VertexId, state: &SearchState) -> Flow {
        self.first.visit_vertex(vertex, state)?;
        self.second.visit_vertex(vertex, state)
    }

    fn visit_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.first.visit_edge(step, state)?;
        self.second.visit_edge(step, state)
    }

    fn visit_tree_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.first.visit_tree_edge(step, state)?;
        self.second.visit_tree_edge(step, state)
    }

    fn visit_frond(&mut self, step: Step, state: &SearchState) -> Flow {
        self.first.visit_frond(step, state)?;
        self.second.visit_frond(step, state)
    }
}

impl<A: DfsVisitor + ?Sized, B: DfsVisitor + ?Sized> DfsVisitor for Chain<'_, A, B> {
    fn visit_forward_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.first.visit_forward_edge(step, state)?;
        self.second.visit_forward_edge(step, state)
    }

    fn visit_back_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.first.visit_back_edge(step, state)?;
        self.second.visit_back_edge(step, state)
    }

    fn visit_cross_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.first.visit_cross_edge(step, state)?;
        self.second.visit_cross_edge(step, state)
    }

    fn leave_vertex(&mut self, vertex: VertexId, state: &SearchState) -> Flow {
        self.first.leave_vertex(vertex, state)?;
        self.second.leave_vertex(vertex, state)
    }

    fn leave_tree_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.first.leave_tree_edge(step, state)?;
        self.second.leave_tree_edge(step, state)
    }
}

// =============================================================================
// SHARED HANDLES
// =============================================================================
//
// An attached visitor is owned by its algorithm. Attaching an
// `Rc<RefCell<_>>` clone keeps a handle for reading the visitor afterwards.

impl<T: SearchVisitor + ?Sized> SearchVisitor for Rc<RefCell<T>> {
    fn reset(&mut self) {
        self.borrow_mut().reset();
    }

    fn visit_root(&mut self, root: VertexId, state: &SearchState) -> Flow {
        self.borrow_mut().visit_root(root, state)
    }

    fn visit_vertex(&mut self, vertex: VertexId, state: &SearchState) -> Flow {
        self.borrow_mut().visit_vertex(vertex, state)
    }

    fn visit_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.borrow_mut().visit_edge(step, state)
    }

    fn visit_tree_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.borrow_mut().visit_tree_edge(step, state)
    }

    fn visit_frond(&mut self, step: Step, state: &SearchState) -> Flow {
        self.borrow_mut().visit_frond(step, state)
    }
}

impl<T: DfsVisitor + ?Sized> DfsVisitor for Rc<RefCell<T>> {
    fn visit_forward_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.borrow_mut().visit_forward_edge(step, state)
    }

    fn visit_back_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.borrow_mut().visit_back_edge(step, state)
    }

    fn visit_cross_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.borrow_mut().visit_cross_edge(step, state)
    }

    fn leave_vertex(&mut self, vertex: VertexId, state: &SearchState) -> Flow {
        self.borrow_mut().leave_vertex(vertex, state)
    }

    fn leave_tree_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.borrow_mut().leave_tree_edge(step, state)
    }
}

impl<T: TopologicalVisitor + ?Sized> TopologicalVisitor for Rc<RefCell<T>> {
    fn reset(&mut self) {
        self.borrow_mut().reset();
    }

    fn visit_vertex_in_topological_order(&mut self, vertex: VertexId, position: usize) -> Flow {
        self.borrow_mut()
            .visit_vertex_in_topological_order(vertex, position)
    }
}

impl<T: ClosureVisitor + ?Sized> ClosureVisitor for Rc<RefCell<T>> {
    fn reset(&mut self) {
        self.borrow_mut().reset();
    }

    fn visit_vertex_triple(&mut self, source: VertexId, via: VertexId, target: VertexId) -> Flow {
        self.borrow_mut().visit_vertex_triple(source, via, target)
    }
}
