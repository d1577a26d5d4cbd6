//! Frontier-driven search, breadth-first by default.

use super::SearchState;
use crate::algorithm::{AlgorithmCore, AlgorithmKind, GraphAlgorithm};
use crate::buffer::{Buffer, PriorityBuffer, QueueBuffer};
use crate::config::SearchConfig;
use crate::function::{IntFunction, Permutation};
use crate::graph::GraphView;
use crate::marker::{IntMarker, VertexMarker};
use crate::visitor::{AnyVisitor, CONTINUE, Chain, Flow, NoopVisitor, SearchVisitor, VisitLimit, VisitorList};
use crate::{ArcwalkError, Edge, VertexId};
use std::fmt;

/// Generic search whose exploration order is decided by the frontier buffer.
///
/// With a [`QueueBuffer`] this is breadth-first search; a stack, random or
/// priority buffer gives other orders over the same walk.
pub struct FrontierSearch<'g, G, B> {
    core: AlgorithmCore<'g, G>,
    buffer: B,
    visitors: VisitorList<dyn SearchVisitor + 'g>,
    state: SearchState,
}

/// FIFO frontier: vertices are expanded level by level.
pub type BreadthFirstSearch<'g, G> = FrontierSearch<'g, G, QueueBuffer<VertexId>>;

impl<'g, G: GraphView + 'g> FrontierSearch<'g, G, QueueBuffer<VertexId>> {
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self::build(graph, AlgorithmKind::BreadthFirstSearch, QueueBuffer::new())
    }
}

impl<'g, G: GraphView + 'g> FrontierSearch<'g, G, PriorityBuffer<'g, VertexId>> {
    /// Best-first search: the pending vertex with the smallest key is
    /// expanded next. Vertices without a key come last; ties go to the
    /// smaller vertex id.
    pub fn prioritized(graph: &'g G, key: impl IntFunction<VertexId> + 'g) -> Self {
        let buffer = PriorityBuffer::by_key(move |vertex: &VertexId| {
            (key.get(*vertex).unwrap_or(usize::MAX), *vertex)
        });
        Self::build(graph, AlgorithmKind::FrontierSearch, buffer)
    }
}

impl<'g, G: GraphView + 'g> FrontierSearch<'g, G, Box<dyn Buffer<VertexId> + 'g>> {
    /// Search configured from a [`SearchConfig`], with parameters already set.
    pub fn from_config(graph: &'g G, config: &SearchConfig) -> Result<Self, ArcwalkError> {
        config.validate()?;
        let mut search = Self::build(graph, AlgorithmKind::FrontierSearch, config.frontier.buffer());
        search.set_direction(config.direction)?;
        if let Some(limit) = config.max_visits {
            search.add_visitor(AnyVisitor::search(VisitLimit::new(limit)))?;
        }
        search.reset_parameters()?;
        Ok(search)
    }
}

impl<'g, G: GraphView + 'g, B: Buffer<VertexId>> FrontierSearch<'g, G, B> {
    /// Search with a caller-supplied frontier.
    pub fn with_buffer(graph: &'g G, buffer: B) -> Self {
        Self::build(graph, AlgorithmKind::FrontierSearch, buffer)
    }

    fn build(graph: &'g G, kind: AlgorithmKind, buffer: B) -> Self {
        Self {
            core: AlgorithmCore::new(graph, kind),
            buffer,
            visitors: VisitorList::new(),
            state: SearchState::default(),
        }
    }

    /// Replace the frontier. Parameters must be reset afterwards.
    pub fn set_buffer(&mut self, buffer: B) -> Result<(), ArcwalkError> {
        self.core.lifecycle_mut().invalidate("set buffer")?;
        self.buffer = buffer;
        Ok(())
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
        hook: &mut dyn SearchVisitor,
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
                &mut self.buffer,
                &mut self.state,
                &mut visitor,
                std::iter::once(root),
            ),
            None => walk(
                &self.core,
                &mut self.buffer,
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

    /// The complete working state of the finished run.
    pub fn search_state(&self) -> Result<&SearchState, ArcwalkError> {
        self.core.lifecycle().check_finished("read results")?;
        Ok(&self.state)
    }

    pub fn numbering(&self) -> Result<&IntMarker<VertexId>, ArcwalkError> {
        Ok(self.search_state()?.numbering())
    }

    pub fn levels(&self) -> Result<&IntMarker<VertexId>, ArcwalkError> {
        Ok(self.search_state()?.levels())
    }

    pub fn parents(&self) -> Result<&VertexMarker<Edge>, ArcwalkError> {
        Ok(self.search_state()?.parents())
    }

    pub fn vertex_order(&self) -> Result<&Permutation<VertexId>, ArcwalkError> {
        Ok(self.search_state()?.vertex_order())
    }

    pub fn edge_order(&self) -> Result<&Permutation<Edge>, ArcwalkError> {
        Ok(self.search_state()?.edge_order())
    }
}

impl<'g, G: GraphView + 'g, B: Buffer<VertexId>> GraphAlgorithm<'g, G> for FrontierSearch<'g, G, B> {
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
        self.buffer.clear();
        SearchVisitor::reset(&mut self.visitors);
        Ok(())
    }

    fn add_visitor(&mut self, visitor: AnyVisitor<'g>) -> Result<(), ArcwalkError> {
        self.core.check_visitor(&visitor)?;
        let (algorithm, family) = (self.kind(), visitor.family());
        let visitor = visitor
            .into_search()
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

impl<G, B: fmt::Debug> fmt::Debug for FrontierSearch<'_, G, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrontierSearch")
            .field("core", &self.core)
            .field("buffer", &self.buffer)
            .field("visitors", &self.visitors)
            .finish()
    }
}

/// The walk itself. Stops at the first visitor that breaks.
fn walk<G: GraphView, B: Buffer<VertexId>, V: SearchVisitor + ?Sized>(
    core: &AlgorithmCore<'_, G>,
    buffer: &mut B,
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
        buffer.put(root);

        while !buffer.is_empty() {
            let Ok(vertex) = buffer.get_next() else {
                break;
            };
            visitor.visit_vertex(vertex, state)?;
            let level = state.level(vertex).map_or(0, |level| level + 1);

            for step in core.steps(vertex) {
                if state.mark_edge(step.edge) {
                    continue;
                }
                visitor.visit_edge(step, state)?;
                if !core.is_navigable(step.edge) {
                    continue;
                }
                if state.is_visited(step.target) {
                    visitor.visit_frond(step, state)?;
                } else {
                    state.discover(step.target, Some(step.edge), level);
                    visitor.visit_tree_edge(step, state)?;
                    buffer.put(step.target);
                }
            }
        }
    }
    CONTINUE
}
