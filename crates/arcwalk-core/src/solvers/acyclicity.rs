//! Cycle detection by depth-first search, and the cross-check of both
//! topological solvers.

use super::topological::{TopologicalOrderWithDegree, TopologicalOrderWithDfs};
use crate::algorithm::{AlgorithmCore, AlgorithmKind, GraphAlgorithm, SearchParameters};
use crate::graph::GraphView;
use crate::primitives::BACK_EDGE_REASON;
use crate::traversal::{DepthFirstSearch, SearchState};
use crate::visitor::{AnyVisitor, DfsVisitor, Flow, SearchVisitor, Step, replay, stop};
use crate::{ArcwalkError, Edge};
use std::fmt;

/// Stops a DFS at its first back edge and keeps that edge.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct CycleWatch {
    reorient: bool,
    witness: Option<Edge>,
}

impl CycleWatch {
    /// For a DFS walking the configured direction.
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// For a DFS walking against the configured direction: the witness is
    /// flipped back.
    pub(super) fn reoriented() -> Self {
        Self {
            reorient: true,
            witness: None,
        }
    }

    pub(super) fn witness(&self) -> Option<Edge> {
        self.witness
    }
}

impl SearchVisitor for CycleWatch {}

impl DfsVisitor for CycleWatch {
    fn visit_back_edge(&mut self, step: Step, _state: &SearchState) -> Flow {
        let edge = if self.reorient {
            step.edge.reversed()
        } else {
            step.edge
        };
        self.witness = Some(edge);
        stop(BACK_EDGE_REASON)
    }
}

/// Acyclicity alone, stopping at the first back edge.
///
/// Unlike the topological solvers this also accepts `Direction::Both`,
/// where it answers whether the undirected multigraph is a forest: a
/// self-loop or a pair of parallel edges counts as a cycle. No visitor
/// family is accepted.
pub struct AcyclicityWithDfs<'g, G> {
    core: AlgorithmCore<'g, G>,
    search: DepthFirstSearch<'g, G>,
    witness: Option<Edge>,
    acyclic: bool,
}

impl<'g, G: GraphView + 'g> AcyclicityWithDfs<'g, G> {
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self {
            core: AlgorithmCore::new(graph, AlgorithmKind::AcyclicityWithDfs),
            search: DepthFirstSearch::new(graph),
            witness: None,
            acyclic: false,
        }
    }

    pub fn execute(&mut self) -> Result<(), ArcwalkError> {
        self.core.begin()?;
        let outcome = self.detect();
        self.core.conclude(outcome)?;
        self.acyclic = self.core.termination().is_none();
        tracing::debug!("acyclic = {}", self.acyclic);
        Ok(())
    }

    fn detect(&mut self) -> Result<Flow, ArcwalkError> {
        self.search.reset()?;
        let mut watch = CycleWatch::new();
        self.search.execute_with(None, &mut watch)?;
        self.witness = watch.witness();
        Ok(replay(self.search.termination()))
    }

    pub fn is_acyclic(&self) -> Result<bool, ArcwalkError> {
        self.core.lifecycle().check_finished("read acyclicity")?;
        Ok(self.acyclic)
    }

    /// The back edge that proved a cycle, oriented in the configured
    /// direction.
    pub fn cycle_witness(&self) -> Result<Option<Edge>, ArcwalkError> {
        self.core.lifecycle().check_finished("read cycle witness")?;
        Ok(self.witness)
    }
}

impl<'g, G: GraphView + 'g> GraphAlgorithm<'g, G> for AcyclicityWithDfs<'g, G> {
    fn core(&self) -> &AlgorithmCore<'g, G> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore<'g, G> {
        &mut self.core
    }

    fn reset_parameters(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle().check_not_running("reset parameters")?;
        self.search.set_parameters(self.core.parameters().clone())?;
        self.search.reset_parameters()?;
        self.core.lifecycle_mut().parameters_set()
    }

    fn reset(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle_mut().ready()?;
        self.witness = None;
        self.acyclic = false;
        Ok(())
    }

    fn add_visitor(&mut self, visitor: AnyVisitor<'g>) -> Result<(), ArcwalkError> {
        self.core.check_visitor(&visitor)
    }

    fn clear_visitors(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle().check_not_running("clear visitors")
    }
}

impl<G> fmt::Debug for AcyclicityWithDfs<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcyclicityWithDfs")
            .field("core", &self.core)
            .field("witness", &self.witness)
            .finish()
    }
}

// =============================================================================
// CROSS-CHECK
// =============================================================================

/// Decide acyclicity with both topological solvers and require agreement.
///
/// Returns the shared answer, or `AcyclicityMismatch` if the in-degree and
/// depth-first solvers disagree.
pub fn verify_acyclicity<'g, G: GraphView + 'g>(
    graph: &'g G,
    params: &SearchParameters<'g>,
) -> Result<bool, ArcwalkError> {
    let mut kahn = TopologicalOrderWithDegree::new(graph);
    kahn.set_parameters(params.clone())?;
    kahn.reset_parameters()?;
    kahn.reset()?;
    kahn.execute()?;
    let degree = kahn.is_acyclic()?;

    let mut sort = TopologicalOrderWithDfs::new(graph);
    sort.set_parameters(params.clone())?;
    sort.reset_parameters()?;
    sort.reset()?;
    sort.execute()?;
    let dfs = sort.is_acyclic()?;

    if degree != dfs {
        tracing::warn!("acyclicity mismatch: in-degree = {}, dfs = {}", degree, dfs);
        return Err(ArcwalkError::AcyclicityMismatch { degree, dfs });
    }
    tracing::info!("acyclicity verified: {}", degree);
    Ok(degree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::visitor::NoopVisitor;
    use crate::{Direction, EdgeId, GraphElement, VertexId};

    fn graph(count: usize, edges: &[(usize, usize)]) -> Graph {
        Graph::from_edges(
            count,
            edges.iter().map(|&(a, b)| (VertexId(a), VertexId(b))),
        )
        .expect("graph")
    }

    fn check(g: &Graph, direction: Direction) -> AcyclicityWithDfs<'_, Graph> {
        let mut acyclicity = AcyclicityWithDfs::new(g);
        acyclicity.set_direction(direction).expect("direction");
        acyclicity.reset_parameters().expect("parameters");
        acyclicity.reset().expect("reset");
        acyclicity.execute().expect("execute");
        acyclicity
    }

    #[test]
    fn dag_is_acyclic() {
        let g = graph(4, &[(1, 2), (2, 3), (1, 3), (3, 4)]);
        let acyclicity = check(&g, Direction::Out);
        assert!(acyclicity.is_acyclic().expect("acyclic"));
        assert_eq!(acyclicity.cycle_witness().expect("witness"), None);
    }

    #[test]
    fn cycle_witness_is_a_back_edge() {
        let g = graph(4, &[(1, 2), (2, 3), (1, 3), (3, 4), (4, 1)]);
        let acyclicity = check(&g, Direction::Out);

        assert!(!acyclicity.is_acyclic().expect("acyclic"));
        assert_eq!(
            acyclicity.cycle_witness().expect("witness"),
            Some(Edge::normal(EdgeId(5)))
        );
        assert_eq!(
            acyclicity.termination().map(|s| s.reason()),
            Some(BACK_EDGE_REASON)
        );
    }

    #[test]
    fn undirected_cycles() {
        let tree = graph(4, &[(1, 2), (3, 2), (2, 4)]);
        assert!(check(&tree, Direction::Both).is_acyclic().expect("tree"));

        // Acyclic as a digraph, but a triangle once undirected.
        let triangle = graph(3, &[(1, 2), (2, 3), (1, 3)]);
        assert!(check(&triangle, Direction::Out).is_acyclic().expect("dag"));
        assert!(!check(&triangle, Direction::Both).is_acyclic().expect("triangle"));

        let parallel = graph(2, &[(1, 2), (1, 2)]);
        assert!(!check(&parallel, Direction::Both).is_acyclic().expect("parallel"));
    }

    #[test]
    fn accepts_no_visitors() {
        let g = graph(1, &[]);
        let mut acyclicity = AcyclicityWithDfs::new(&g);
        for visitor in [
            AnyVisitor::search(NoopVisitor),
            AnyVisitor::depth_first(NoopVisitor),
            AnyVisitor::topological(NoopVisitor),
        ] {
            assert!(matches!(
                acyclicity.add_visitor(visitor),
                Err(ArcwalkError::IncompatibleVisitor { .. })
            ));
        }
        assert!(acyclicity.clear_visitors().is_ok());
    }

    #[test]
    fn cross_check_agrees() {
        let dag = graph(4, &[(1, 2), (2, 3), (1, 3), (3, 4)]);
        assert!(verify_acyclicity(&dag, &SearchParameters::default()).expect("dag"));

        let cyclic = graph(4, &[(1, 2), (2, 3), (1, 3), (3, 4), (4, 1)]);
        assert!(!verify_acyclicity(&cyclic, &SearchParameters::default()).expect("cyclic"));

        let params = SearchParameters::new(Direction::In)
            .with_subgraph(|element: GraphElement| element != GraphElement::Vertex(VertexId(4)));
        assert!(verify_acyclicity(&cyclic, &params).expect("subgraph"));
    }

    #[test]
    fn cross_check_rejects_undirected() {
        let g = graph(2, &[(1, 2)]);
        assert!(matches!(
            verify_acyclicity(&g, &SearchParameters::new(Direction::Both)),
            Err(ArcwalkError::UnsupportedDirection { .. })
        ));
    }
}
