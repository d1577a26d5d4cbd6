//! # Validation Tier Tests (T0-T3)
//!
//! End-to-end scenarios over the public API. If ANY tier fails, the
//! framework is INVALID.
//!
//! ## Tiers
//! - T0: Lifecycle Integrity
//! - T1: Traversal
//! - T2: Reachability and Closure
//! - T3: Topological Order and Acyclicity
//!
//! Most scenarios use the graph A->B, B->C, A->C, C->D, optionally with the
//! cycle-closing edge D->A.

use arcwalk_core::visitor::{DfsVisitor, SearchVisitor, Step, TopologicalVisitor};
use arcwalk_core::{
    AcyclicityWithDfs, AlgorithmState, AnyVisitor, ArcwalkError, BreadthFirstSearch,
    DepthFirstSearch, Direction, Edge, EdgeId, Flow, Graph, GraphAlgorithm, GraphView,
    ReachableWithSearch, SearchParameters, SearchState, TopologicalOrderWithDegree,
    TopologicalOrderWithDfs, TransitiveClosure, VertexId, verify_acyclicity,
};
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

const A: VertexId = VertexId(1);
const B: VertexId = VertexId(2);
const C: VertexId = VertexId(3);
const D: VertexId = VertexId(4);

fn dag() -> Graph {
    let mut graph = Graph::with_vertices(4);
    for (alpha, omega) in [(A, B), (B, C), (A, C), (C, D)] {
        graph.add_edge(alpha, omega).expect("edge");
    }
    graph
}

fn cyclic() -> Graph {
    let mut graph = dag();
    graph.add_edge(D, A).expect("edge");
    graph
}

fn prepare<'g, T: GraphAlgorithm<'g, Graph>>(algorithm: &mut T) {
    algorithm.reset_parameters().expect("reset parameters");
    algorithm.reset().expect("reset");
}

// =============================================================================
// TIER T0: LIFECYCLE INTEGRITY
// =============================================================================

mod t0_lifecycle {
    use super::*;

    /// T0.1: A fresh instance cannot execute.
    #[test]
    fn execute_before_reset_fails() {
        let graph = dag();
        let mut bfs = BreadthFirstSearch::new(&graph);

        let err = bfs.execute().expect_err("uninitialized");
        assert!(matches!(
            err,
            ArcwalkError::InvalidState {
                state: AlgorithmState::Uninitialized,
                ..
            }
        ));
    }

    /// T0.2: Results are unavailable until the run finishes.
    #[test]
    fn results_before_execute_fail() {
        let graph = dag();
        let mut dfs = DepthFirstSearch::new(&graph);
        prepare(&mut dfs);

        assert_eq!(dfs.state(), AlgorithmState::Ready);
        assert!(dfs.vertex_order().is_err());
    }

    /// T0.3: Changing a parameter after a run requires deriving again.
    #[test]
    fn setter_invalidates_finished_run() {
        let graph = dag();
        let mut bfs = BreadthFirstSearch::new(&graph);
        prepare(&mut bfs);
        bfs.execute().expect("execute");

        bfs.set_direction(Direction::In).expect("direction");
        assert_eq!(bfs.state(), AlgorithmState::Uninitialized);
        assert!(bfs.reset().is_err());
    }

    /// T0.4: Incompatible visitors are rejected when attached.
    #[test]
    fn incompatible_visitor_rejected_eagerly() {
        let graph = dag();
        let mut closure = TransitiveClosure::new(&graph);
        let err = closure
            .add_visitor(AnyVisitor::search(arcwalk_core::NoopVisitor))
            .expect_err("search visitor on closure");
        assert!(matches!(err, ArcwalkError::IncompatibleVisitor { .. }));
    }
}

// =============================================================================
// TIER T1: TRAVERSAL
// =============================================================================

mod t1_traversal {
    use super::*;

    #[derive(Default)]
    struct Log {
        vertices: Vec<VertexId>,
        back: Vec<EdgeId>,
    }

    impl SearchVisitor for Log {
        fn reset(&mut self) {
            *self = Self::default();
        }

        fn visit_vertex(&mut self, vertex: VertexId, _state: &SearchState) -> Flow {
            self.vertices.push(vertex);
            ControlFlow::Continue(())
        }
    }

    impl DfsVisitor for Log {
        fn visit_back_edge(&mut self, step: Step, _state: &SearchState) -> Flow {
            self.back.push(step.edge.id());
            ControlFlow::Continue(())
        }
    }

    /// T1.1: BFS expands level by level.
    #[test]
    fn bfs_visits_by_level() {
        let graph = dag();
        let log = Rc::new(RefCell::new(Log::default()));
        let mut bfs = BreadthFirstSearch::new(&graph);
        bfs.add_visitor(AnyVisitor::search(Rc::clone(&log)))
            .expect("visitor");
        prepare(&mut bfs);
        bfs.execute().expect("execute");

        assert_eq!(log.borrow().vertices, vec![A, B, C, D]);
        let levels = bfs.levels().expect("levels");
        assert_eq!(levels.get(A), Some(&0));
        assert_eq!(levels.get(C), Some(&1));
        assert_eq!(levels.get(D), Some(&2));
    }

    /// T1.2: The DAG has no back edges; closing D->A creates one.
    #[test]
    fn dfs_back_edges_mark_cycles() {
        let graph = dag();
        let log = Rc::new(RefCell::new(Log::default()));
        let mut dfs = DepthFirstSearch::new(&graph);
        dfs.add_visitor(AnyVisitor::depth_first(Rc::clone(&log)))
            .expect("visitor");
        prepare(&mut dfs);
        dfs.execute().expect("execute");
        assert!(log.borrow().back.is_empty());

        let graph = cyclic();
        let mut dfs = DepthFirstSearch::new(&graph);
        dfs.add_visitor(AnyVisitor::depth_first(Rc::clone(&log)))
            .expect("visitor");
        prepare(&mut dfs);
        dfs.execute().expect("execute");
        assert_eq!(log.borrow().back, vec![EdgeId(5)]);
    }

    /// T1.3: Every parent is numbered before its child.
    #[test]
    fn parents_precede_children() {
        let graph = cyclic();
        let mut dfs = DepthFirstSearch::new(&graph);
        prepare(&mut dfs);
        dfs.execute().expect("execute");

        let state = dfs.search_state().expect("state");
        for vertex in graph.vertices() {
            if let Some(edge) = state.parent(vertex) {
                assert!(state.discovery_number(graph.this(edge)) < state.discovery_number(vertex));
            }
        }
    }
}

// =============================================================================
// TIER T2: REACHABILITY AND CLOSURE
// =============================================================================

mod t2_reachability {
    use super::*;

    /// T2.1: Reachability follows edge direction.
    #[test]
    fn reachability_is_directed() {
        let graph = dag();
        let mut reach = ReachableWithSearch::new(&graph);
        prepare(&mut reach);

        assert!(reach.execute(A, D).expect("a->d").is_reachable().expect("read"));

        reach.reset().expect("reset");
        assert!(!reach.execute(D, A).expect("d->a").is_reachable().expect("read"));
    }

    /// T2.2: Closure agrees with single pair reachability on every pair.
    #[test]
    fn closure_matches_pairwise_search() {
        let graph = cyclic();
        let mut closure = TransitiveClosure::new(&graph);
        prepare(&mut closure);
        closure.execute().expect("closure");

        let mut reach = ReachableWithSearch::new(&graph);
        reach.reset_parameters().expect("parameters");
        for source in graph.vertices() {
            for target in graph.vertices() {
                reach.reset().expect("reset");
                let pairwise = reach
                    .execute(source, target)
                    .expect("execute")
                    .is_reachable()
                    .expect("read");
                assert_eq!(closure.is_reachable(source, target).expect("read"), pairwise);
            }
        }
    }

    /// T2.3: Closure paths are made of real edges.
    #[test]
    fn closure_path_is_walkable() {
        let graph = dag();
        let mut closure = TransitiveClosure::new(&graph);
        prepare(&mut closure);
        closure.execute().expect("closure");

        let path: Vec<Edge> = closure.path(A, D).expect("read").expect("path");
        assert_eq!(graph.this(path[0]), A);
        assert_eq!(graph.that(path[path.len() - 1]), D);
        assert!(closure.path(D, A).expect("read").is_none());
    }
}

// =============================================================================
// TIER T3: TOPOLOGICAL ORDER AND ACYCLICITY
// =============================================================================

mod t3_topological {
    use super::*;

    struct Collect(Vec<VertexId>);

    impl TopologicalVisitor for Collect {
        fn visit_vertex_in_topological_order(&mut self, vertex: VertexId, position: usize) -> Flow {
            self.0.push(vertex);
            assert_eq!(self.0.len(), position);
            ControlFlow::Continue(())
        }
    }

    /// T3.1: Both solvers order the DAG as A, B, C, D.
    #[test]
    fn dag_order() {
        let graph = dag();

        let seen = Rc::new(RefCell::new(Collect(Vec::new())));
        let mut kahn = TopologicalOrderWithDegree::new(&graph);
        kahn.add_visitor(AnyVisitor::topological(Rc::clone(&seen)))
            .expect("visitor");
        prepare(&mut kahn);
        kahn.execute().expect("execute");
        let by_degree: Vec<_> = kahn.order().expect("order").iter().collect();
        assert_eq!(by_degree, vec![A, B, C, D]);
        assert_eq!(seen.borrow().0, by_degree);

        let mut sort = TopologicalOrderWithDfs::new(&graph);
        prepare(&mut sort);
        sort.execute().expect("execute");
        let by_dfs: Vec<_> = sort.order().expect("order").iter().collect();
        assert_eq!(by_dfs, vec![A, B, C, D]);
    }

    /// T3.2: D->A makes both solvers report a cycle; DFS stops early.
    #[test]
    fn cycle_detected_by_both() {
        let graph = cyclic();

        let mut kahn = TopologicalOrderWithDegree::new(&graph);
        prepare(&mut kahn);
        kahn.execute().expect("execute");
        assert!(!kahn.is_acyclic().expect("degree"));

        let mut sort = TopologicalOrderWithDfs::new(&graph);
        prepare(&mut sort);
        sort.execute().expect("execute");
        assert_eq!(sort.state(), AlgorithmState::Finished);
        assert!(!sort.is_acyclic().expect("dfs"));
        assert!(sort.termination().is_some());
        assert!(sort.cycle_witness().expect("witness").is_some());
    }

    /// T3.3: The cross-check agrees on both graphs.
    #[test]
    fn cross_check() {
        let params = SearchParameters::default();
        assert!(verify_acyclicity(&dag(), &params).expect("dag"));
        assert!(!verify_acyclicity(&cyclic(), &params).expect("cyclic"));
    }

    /// T3.4: Undirected acyclicity is a forest test.
    #[test]
    fn undirected_acyclicity() {
        let graph = dag();
        let mut check = AcyclicityWithDfs::new(&graph);
        check.set_direction(Direction::Both).expect("direction");
        prepare(&mut check);
        check.execute().expect("execute");
        // A-B-C-A is a cycle once direction is ignored.
        assert!(!check.is_acyclic().expect("acyclic"));
    }
}
