//! Iterative depth-first search with arc classification.

use super::SearchState;
use crate::algorithm::{AlgorithmCore, AlgorithmKind, GraphAlgorithm};
use crate::buffer::{Buffer, StackBuffer};
use crate::function::Permutation;
use crate::graph::GraphView;
use crate::marker::{IntMarker, VertexMarker};
use crate::visitor::{
    AnyVisitor, CONTINUE, Chain, DfsVisitor, Flow, NoopVisitor, SearchVisitor, Step, VisitorList,
};
use crate::{ArcwalkError, Edge, VertexId};
use std::fmt;

/// An open vertex on the DFS stack.
#[derive(Debug)]
struct Frame {
    vertex: VertexId,
    /// Tree edge that opened this frame. `None` for roots.
    tree: Option<Step>,
    steps: Vec<Step>,
    cursor: usize,
}

impl Frame {
    fn open<G: GraphView>(core: &AlgorithmCore<'_, G>, vertex: VertexId, tree: Option<Step>) -> Self {
        Self {
            vertex,
            tree,
            steps: core.steps(vertex).collect(),
            cursor: 0,
        }
    }
}

/// Depth-first search.
///
/// Runs on an explicit frame stack, so deep graphs cannot overflow the call
/// stack. Every navigable non-tree edge is classified against the open
/// ancestor chain:
///
/// - **back**: the target is still open (not completed)
/// - **forward**: the target is completed and was discovered after the source
/// - **cross**: the target is completed and was discovered before the source
pub struct DepthFirstSearch<'g, G> {
    core: AlgorithmCore<'g, G>,
    visitors: VisitorList<dyn DfsVisitor + 'g>,
    state: SearchState,
    frames: StackBuffer<Frame>,
}

impl<'g, G: GraphView + 'g> DepthFirstSearch<'g, G> {
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self {
            core: AlgorithmCore::new(graph, AlgorithmKind::DepthFirstSearch),
            visitors: VisitorList::new(),
            state: SearchState::default(),
            frames: StackBuffer::new(),
        }
    }

    /// Search every component, taking roots in graph iteration order.
    pub fn execute(&mut self) -> Result<(), ArcwalkError> {
        self.execute_with(None, &mut NoopVisitor)
    }

    /// Search only what is reachable from `root`.
    pub fn execute_from(&mut self, root: VertexId) -> Result<(), ArcwalkError> {
        self.execute_with(Some(root), &mut NoopVisitor)
    }

    /// Run with a private `hook` called ahead of the attached visitors.
    pub(crate) fn execute_with(
        &mut self,
        root: Option<VertexId>,
        hook: &mut dyn DfsVisitor,
    ) -> Result<(), ArcwalkError> {
        if let Some(root) = root {
            self.core.check_vertex(root)?;
        }
        self.core.begin()?;

        let graph = self.core.graph();
        let mut visitor = Chain {
            first: hook,
            second: &mut self.visitors,
        };
        let flow = match root {
            Some(root) => walk(
                &self.core,
                &mut self.frames,
                &mut self.state,
                &mut visitor,
                std::iter::once(root),
            ),
            None => walk(
                &self.core,
                &mut self.frames,
                &mut self.state,
                &mut visitor,
                graph.vertices(),
            ),
        };
        self.core.conclude(Ok(flow))
    }

    // =========================================================================
    // RESULTS
    // =========================================================================

    pub fn search_state(&self) -> Result<&SearchState, ArcwalkError> {
        self.core.lifecycle().check_finished("read results")?;
        Ok(&self.state)
    }

    pub fn numbering(&self) -> Result<&IntMarker<VertexId>, ArcwalkError> {
        Ok(self.search_state()?.numbering())
    }

    pub fn completions(&self) -> Result<&IntMarker<VertexId>, ArcwalkError> {
        Ok(self.search_state()?.completions())
    }

    pub fn parents(&self) -> Result<&VertexMarker<Edge>, ArcwalkError> {
        Ok(self.search_state()?.parents())
    }

    pub fn vertex_order(&self) -> Result<&Permutation<VertexId>, ArcwalkError> {
        Ok(self.search_state()?.vertex_order())
    }

    /// Postorder. Against the natural edge direction this is a topological order.
    pub fn completion_order(&self) -> Result<&Permutation<VertexId>, ArcwalkError> {
        Ok(self.search_state()?.completion_order())
    }
}

impl<'g, G: GraphView + 'g> GraphAlgorithm<'g, G> for DepthFirstSearch<'g, G> {
    fn core(&self) -> &AlgorithmCore<'g, G> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore<'g, G> {
        &mut self.core
    }

    fn reset_parameters(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle_mut().parameters_set()
    }

    fn reset(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle_mut().ready()?;
        let graph = self.core.graph();
        self.state.reset(graph.vertex_count(), graph.edge_count());
        self.frames.clear();
        SearchVisitor::reset(&mut self.visitors);
        Ok(())
    }

    fn add_visitor(&mut self, visitor: AnyVisitor<'g>) -> Result<(), ArcwalkError> {
        self.core.check_visitor(&visitor)?;
        let (algorithm, family) = (self.kind(), visitor.family());
        let visitor = visitor
            .into_depth_first()
            .ok_or(ArcwalkError::IncompatibleVisitor { algorithm, family })?;
        self.visitors.push(visitor);
        Ok(())
    }

    fn clear_visitors(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle().check_not_running("clear visitors")?;
        self.visitors.clear();
        Ok(())
    }
}

impl<G> fmt::Debug for DepthFirstSearch<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepthFirstSearch")
            .field("core", &self.core)
            .field("visitors", &self.visitors)
            .field("open", &self.frames.len())
            .finish()
    }
}

fn walk<G: GraphView, V: DfsVisitor + ?Sized>(
    core: &AlgorithmCore<'_, G>,
    frames: &mut StackBuffer<Frame>,
    state: &mut SearchState,
    visitor: &mut V,
    roots: impl Iterator<Item = VertexId>,
) -> Flow {
    for root in roots {
        if state.is_visited(root) || !core.is_vertex_visible(root) {
            continue;
        }
        visitor.visit_root(root, state)?;
        state.discover(root, None, 0);
        visitor.visit_vertex(root, state)?;
        frames.put(Frame::open(core, root, None));

        while let Some(frame) = frames.peek_mut() {
            let Some(step) = frame.steps.get(frame.cursor).copied() else {
                let Ok(done) = frames.get_next() else {
                    break;
                };
                state.complete(done.vertex);
                visitor.leave_vertex(done.vertex, state)?;
                if let Some(tree) = done.tree {
                    visitor.leave_tree_edge(tree, state)?;
                }
                continue;
            };
            frame.cursor += 1;

            if state.mark_edge(step.edge) {
                continue;
            }
            visitor.visit_edge(step, state)?;
            if !core.is_navigable(step.edge) {
                continue;
            }

            if !state.is_visited(step.target) {
                let level = state.level(step.source).map_or(0, |level| level + 1);
                state.discover(step.target, Some(step.edge), level);
                visitor.visit_tree_edge(step, state)?;
                visitor.visit_vertex(step.target, state)?;
                frames.put(Frame::open(core, step.target, Some(step)));
                continue;
            }

            visitor.visit_frond(step, state)?;
            if !state.is_completed(step.target) {
                visitor.visit_back_edge(step, state)?;
            } else if state.discovery_number(step.source) < state.discovery_number(step.target) {
                visitor.visit_forward_edge(step, state)?;
            } else {
                visitor.visit_cross_edge(step, state)?;
            }
        }
    }
    CONTINUE
}
