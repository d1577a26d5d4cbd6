//! Topological order, by in-degree elimination and by DFS completion.

use super::acyclicity::CycleWatch;
use crate::algorithm::{AlgorithmCore, AlgorithmKind, GraphAlgorithm, SearchParameters};
use crate::function::Permutation;
use crate::graph::GraphView;
use crate::marker::IntMarker;
use crate::traversal::{DepthFirstSearch, SearchState};
use crate::visitor::{
    AnyVisitor, CONTINUE, DfsVisitor, Flow, SearchVisitor, Step, TopologicalVisitor, VisitorList,
    replay,
};
use crate::{ArcwalkError, Edge, VertexId};
use std::fmt;

fn attach<'g>(
    visitors: &mut VisitorList<dyn TopologicalVisitor + 'g>,
    algorithm: AlgorithmKind,
    visitor: AnyVisitor<'g>,
) -> Result<(), ArcwalkError> {
    let family = visitor.family();
    let visitor = visitor
        .into_topological()
        .ok_or(ArcwalkError::IncompatibleVisitor { algorithm, family })?;
    visitors.push(visitor);
    Ok(())
}

// =============================================================================
// IN-DEGREE (KAHN-KNUTH)
// =============================================================================

/// Topological order by repeatedly removing vertices without predecessors.
///
/// Vertices are emitted in elimination order, seeds first in graph
/// iteration order. On a cyclic graph the vertices on or behind a cycle are
/// never eliminated, so the order comes out short and the graph is reported
/// cyclic. Only visible, navigable edges count as dependencies. Undirected
/// traversal is rejected.
pub struct TopologicalOrderWithDegree<'g, G> {
    core: AlgorithmCore<'g, G>,
    visitors: VisitorList<dyn TopologicalVisitor + 'g>,
    in_degree: IntMarker<VertexId>,
    order: Permutation<VertexId>,
    acyclic: bool,
}

impl<'g, G: GraphView + 'g> TopologicalOrderWithDegree<'g, G> {
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self {
            core: AlgorithmCore::new(graph, AlgorithmKind::TopologicalOrderWithDegree),
            visitors: VisitorList::new(),
            in_degree: IntMarker::default(),
            order: Permutation::new(),
            acyclic: false,
        }
    }

    pub fn execute(&mut self) -> Result<(), ArcwalkError> {
        self.core.begin()?;
        let flow = eliminate(
            &self.core,
            &mut self.in_degree,
            &mut self.order,
            &mut self.visitors,
        );
        self.core.conclude(Ok(flow))?;

        let visible = self.core.visible_vertices().count();
        self.acyclic = self.core.termination().is_none() && self.order.len() == visible;
        tracing::debug!(
            "in-degree order: {} of {} vertices, acyclic = {}",
            self.order.len(),
            visible,
            self.acyclic
        );
        Ok(())
    }

    /// Eliminated vertices, in topological order.
    pub fn order(&self) -> Result<&Permutation<VertexId>, ArcwalkError> {
        self.core.lifecycle().check_finished("read order")?;
        Ok(&self.order)
    }

    /// `true` only when the run completed and every visible vertex was
    /// eliminated.
    pub fn is_acyclic(&self) -> Result<bool, ArcwalkError> {
        self.core.lifecycle().check_finished("read acyclicity")?;
        Ok(self.acyclic)
    }

    /// Visible vertices left out of the order: those on a cycle or
    /// reachable from one.
    pub fn blocked(&self) -> Result<Vec<VertexId>, ArcwalkError> {
        self.core.lifecycle().check_finished("read order")?;
        Ok(self
            .core
            .visible_vertices()
            .filter(|vertex| self.order.position(*vertex).is_none())
            .collect())
    }
}

impl<'g, G: GraphView + 'g> GraphAlgorithm<'g, G> for TopologicalOrderWithDegree<'g, G> {
    fn core(&self) -> &AlgorithmCore<'g, G> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore<'g, G> {
        &mut self.core
    }

    fn reset_parameters(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle().check_not_running("reset parameters")?;
        self.core.require_directed()?;
        self.core.lifecycle_mut().parameters_set()
    }

    fn reset(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle_mut().ready()?;
        self.in_degree.reset(self.core.graph().vertex_count());
        self.order.clear();
        self.acyclic = false;
        TopologicalVisitor::reset(&mut self.visitors);
        Ok(())
    }

    fn add_visitor(&mut self, visitor: AnyVisitor<'g>) -> Result<(), ArcwalkError> {
        self.core.check_visitor(&visitor)?;
        let algorithm = self.kind();
        attach(&mut self.visitors, algorithm, visitor)
    }

    fn clear_visitors(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle().check_not_running("clear visitors")?;
        self.visitors.clear();
        Ok(())
    }
}

impl<G> fmt::Debug for TopologicalOrderWithDegree<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopologicalOrderWithDegree")
            .field("core", &self.core)
            .field("visitors", &self.visitors)
            .field("ordered", &self.order.len())
            .field("acyclic", &self.acyclic)
            .finish()
    }
}

fn eliminate<G: GraphView, V: TopologicalVisitor + ?Sized>(
    core: &AlgorithmCore<'_, G>,
    in_degree: &mut IntMarker<VertexId>,
    order: &mut Permutation<VertexId>,
    visitor: &mut V,
) -> Flow {
    for vertex in core.visible_vertices() {
        for step in core.usable_steps(vertex) {
            let degree = in_degree.get(step.target).copied().unwrap_or(0);
            in_degree.set(step.target, degree + 1);
        }
    }
    for vertex in core.visible_vertices() {
        if in_degree.get(vertex).is_none_or(|degree| *degree == 0) {
            order.push(vertex);
        }
    }

    // The order doubles as the work queue: everything past `position` is
    // eliminated but not yet expanded.
    let mut position = 1;
    while let Some(vertex) = order.get(position) {
        visitor.visit_vertex_in_topological_order(vertex, position)?;
        for step in core.usable_steps(vertex) {
            let remaining = in_degree
                .get(step.target)
                .copied()
                .unwrap_or(0)
                .saturating_sub(1);
            in_degree.set(step.target, remaining);
            if remaining == 0 {
                order.push(step.target);
            }
        }
        position += 1;
    }
    CONTINUE
}

// =============================================================================
// DEPTH-FIRST
// =============================================================================

/// Records completions as the order and watches for back edges.
struct Completion<'a, 'v> {
    visitors: &'a mut VisitorList<dyn TopologicalVisitor + 'v>,
    order: &'a mut Permutation<VertexId>,
    cycle: CycleWatch,
}

impl SearchVisitor for Completion<'_, '_> {}

impl DfsVisitor for Completion<'_, '_> {
    fn visit_back_edge(&mut self, step: Step, state: &SearchState) -> Flow {
        self.cycle.visit_back_edge(step, state)
    }

    fn leave_vertex(&mut self, vertex: VertexId, _state: &SearchState) -> Flow {
        self.order.push(vertex);
        self.visitors
            .visit_vertex_in_topological_order(vertex, self.order.len())
    }
}

/// Topological order and acyclicity in a single depth-first pass.
///
/// DFS runs against the configured direction, so a vertex completes only
/// after all of its predecessors; completion order is then a topological
/// order. The first back edge proves a cycle and ends the run, and the
/// offending edge is kept as a witness, oriented in the configured
/// direction. Undirected traversal is rejected.
pub struct TopologicalOrderWithDfs<'g, G> {
    core: AlgorithmCore<'g, G>,
    search: DepthFirstSearch<'g, G>,
    visitors: VisitorList<dyn TopologicalVisitor + 'g>,
    order: Permutation<VertexId>,
    witness: Option<Edge>,
    acyclic: bool,
}

impl<'g, G: GraphView + 'g> TopologicalOrderWithDfs<'g, G> {
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self {
            core: AlgorithmCore::new(graph, AlgorithmKind::TopologicalOrderWithDfs),
            search: DepthFirstSearch::new(graph),
            visitors: VisitorList::new(),
            order: Permutation::new(),
            witness: None,
            acyclic: false,
        }
    }

    pub fn execute(&mut self) -> Result<(), ArcwalkError> {
        self.core.begin()?;
        let outcome = self.sort();
        self.core.conclude(outcome)?;

        self.acyclic = self.core.termination().is_none();
        tracing::debug!(
            "dfs order: {} vertices, acyclic = {}",
            self.order.len(),
            self.acyclic
        );
        Ok(())
    }

    fn sort(&mut self) -> Result<Flow, ArcwalkError> {
        self.search.reset()?;
        let mut hook = Completion {
            visitors: &mut self.visitors,
            order: &mut self.order,
            cycle: CycleWatch::reoriented(),
        };
        self.search.execute_with(None, &mut hook)?;
        self.witness = hook.cycle.witness();
        Ok(replay(self.search.termination()))
    }

    /// Completed vertices, in topological order. Partial after a cycle.
    pub fn order(&self) -> Result<&Permutation<VertexId>, ArcwalkError> {
        self.core.lifecycle().check_finished("read order")?;
        Ok(&self.order)
    }

    /// `true` only when the search completed without a back edge.
    pub fn is_acyclic(&self) -> Result<bool, ArcwalkError> {
        self.core.lifecycle().check_finished("read acyclicity")?;
        Ok(self.acyclic)
    }

    /// An edge lying on a cycle, if one was found.
    pub fn cycle_witness(&self) -> Result<Option<Edge>, ArcwalkError> {
        self.core.lifecycle().check_finished("read cycle witness")?;
        Ok(self.witness)
    }
}

impl<'g, G: GraphView + 'g> GraphAlgorithm<'g, G> for TopologicalOrderWithDfs<'g, G> {
    fn core(&self) -> &AlgorithmCore<'g, G> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore<'g, G> {
        &mut self.core
    }

    fn reset_parameters(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle().check_not_running("reset parameters")?;
        self.core.require_directed()?;
        let params = self.core.parameters();
        let against = SearchParameters {
            direction: params.direction.opposite(),
            ..params.clone()
        };
        self.search.set_parameters(against)?;
        self.search.reset_parameters()?;
        self.core.lifecycle_mut().parameters_set()
    }

    fn reset(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle_mut().ready()?;
        self.order.clear();
        self.witness = None;
        self.acyclic = false;
        TopologicalVisitor::reset(&mut self.visitors);
        Ok(())
    }

    fn add_visitor(&mut self, visitor: AnyVisitor<'g>) -> Result<(), ArcwalkError> {
        self.core.check_visitor(&visitor)?;
        let algorithm = self.kind();
        attach(&mut self.visitors, algorithm, visitor)
    }

    fn clear_visitors(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle().check_not_running("clear visitors")?;
        self.visitors.clear();
        Ok(())
    }
}

impl<G> fmt::Debug for TopologicalOrderWithDfs<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopologicalOrderWithDfs")
            .field("core", &self.core)
            .field("visitors", &self.visitors)
            .field("ordered", &self.order.len())
            .field("witness", &self.witness)
            .finish()
    }
}
