//! # Property-Based Tests
//!
//! Invariants of the traversals and solvers over random multigraphs,
//! self-loops and parallel edges included.

use arcwalk_core::buffer::{PriorityBuffer, UnsortedPriorityBuffer};
use arcwalk_core::{
    BreadthFirstSearch, Buffer, DepthFirstSearch, Direction, Graph, GraphAlgorithm, GraphView,
    ReachableWithSearch, SearchParameters, TopologicalOrderWithDegree, TopologicalOrderWithDfs,
    TransitiveClosure, VertexId, verify_acyclicity,
};
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..12).prop_flat_map(|count| {
        vec((1..=count, 1..=count), 0..30).prop_map(move |edges| {
            Graph::from_edges(
                count,
                edges.into_iter().map(|(a, b)| (VertexId(a), VertexId(b))),
            )
            .expect("endpoints are in range")
        })
    })
}

/// Edges only from lower to higher ids, so the graph is acyclic.
fn arb_dag() -> impl Strategy<Value = Graph> {
    (2usize..12).prop_flat_map(|count| {
        vec((1..count, 1..count), 0..30).prop_map(move |pairs| {
            let edges = pairs
                .into_iter()
                .map(|(a, b)| (VertexId(a.min(b)), VertexId(a.max(b) + 1)));
            Graph::from_edges(count, edges).expect("endpoints are in range")
        })
    })
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Out), Just(Direction::In), Just(Direction::Both)]
}

fn ready<'g, T: GraphAlgorithm<'g, Graph>>(mut algorithm: T, direction: Direction) -> T {
    algorithm.set_direction(direction).expect("direction");
    algorithm.reset_parameters().expect("parameters");
    algorithm.reset().expect("reset");
    algorithm
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// A full BFS numbers every vertex exactly once, and the order inverts the numbering.
    #[test]
    fn bfs_numbering_is_a_bijection(graph in arb_graph(), direction in arb_direction()) {
        let mut bfs = ready(BreadthFirstSearch::new(&graph), direction);
        bfs.execute().expect("execute");

        let order = bfs.vertex_order().expect("order");
        let numbering = bfs.numbering().expect("numbering");
        prop_assert_eq!(order.len(), graph.vertex_count());
        for vertex in graph.vertices() {
            let number = *numbering.get(vertex).expect("numbered");
            prop_assert_eq!(order.get(number), Some(vertex));
        }
    }

    /// Same graph, same parameters: identical working state.
    #[test]
    fn traversal_deterministic(graph in arb_graph(), direction in arb_direction()) {
        let mut first = ready(DepthFirstSearch::new(&graph), direction);
        first.execute().expect("execute");
        let mut second = ready(DepthFirstSearch::new(&graph), direction);
        second.execute().expect("execute");

        prop_assert_eq!(first.search_state().expect("first"), second.search_state().expect("second"));
    }

    /// DFS tree edges run from earlier to later discovery and later to earlier completion.
    #[test]
    fn dfs_parents_nest(graph in arb_graph(), direction in arb_direction()) {
        let mut dfs = ready(DepthFirstSearch::new(&graph), direction);
        dfs.execute().expect("execute");

        let state = dfs.search_state().expect("state");
        prop_assert_eq!(state.completion_order().len(), graph.vertex_count());
        for vertex in graph.vertices() {
            if let Some(edge) = state.parent(vertex) {
                let parent = graph.this(edge);
                prop_assert_eq!(graph.that(edge), vertex);
                prop_assert!(state.discovery_number(parent) < state.discovery_number(vertex));
                prop_assert!(state.completion_number(parent) > state.completion_number(vertex));
            }
        }
    }

    /// The closure agrees with a fresh reachability search on every pair.
    #[test]
    fn closure_matches_search(graph in arb_graph(), direction in arb_direction()) {
        let mut closure = ready(TransitiveClosure::new(&graph), direction);
        closure.execute().expect("closure");
        let mut reach = ready(ReachableWithSearch::new(&graph), direction);

        for source in graph.vertices() {
            for target in graph.vertices() {
                reach.reset().expect("reset");
                let expected = reach.execute(source, target).expect("execute").is_reachable().expect("read");
                prop_assert_eq!(closure.is_reachable(source, target).expect("read"), expected);
            }
        }
    }

    /// Every reachable pair has a simple path made of successors.
    #[test]
    fn closure_paths_are_walkable(graph in arb_graph()) {
        let mut closure = ready(TransitiveClosure::new(&graph), Direction::Out);
        closure.execute().expect("closure");

        for source in graph.vertices() {
            for target in graph.vertices() {
                let Some(path) = closure.path(source, target).expect("read") else {
                    prop_assert!(!closure.is_reachable(source, target).expect("read"));
                    continue;
                };
                let mut current = source;
                for edge in &path {
                    prop_assert_eq!(graph.this(*edge), current);
                    current = graph.that(*edge);
                }
                prop_assert_eq!(current, target);
                prop_assert!(path.len() < graph.vertex_count());
            }
        }
    }

    /// Successor paths are as short as breadth-first levels, in every direction.
    #[test]
    fn closure_paths_are_shortest(graph in arb_graph(), direction in arb_direction()) {
        let mut closure = ready(TransitiveClosure::new(&graph), direction);
        closure.execute().expect("closure");
        let mut bfs = ready(BreadthFirstSearch::new(&graph), direction);

        for source in graph.vertices() {
            bfs.reset().expect("reset");
            bfs.execute_from(source).expect("execute");
            let state = bfs.search_state().expect("state");
            for target in graph.vertices() {
                let length = closure.path(source, target).expect("read").map(|path| path.len());
                prop_assert_eq!(length, state.level(target));
            }
        }
    }

    /// Both topological solvers agree on acyclicity, whatever the graph.
    #[test]
    fn solvers_agree_on_acyclicity(graph in arb_graph(), outgoing in any::<bool>()) {
        let direction = if outgoing { Direction::Out } else { Direction::In };
        let verified = verify_acyclicity(&graph, &SearchParameters::new(direction));
        prop_assert!(verified.is_ok());
    }

    /// On a DAG both orders respect every edge.
    #[test]
    fn dag_orders_are_topological(graph in arb_dag()) {
        let mut kahn = ready(TopologicalOrderWithDegree::new(&graph), Direction::Out);
        kahn.execute().expect("kahn");
        let mut sort = ready(TopologicalOrderWithDfs::new(&graph), Direction::Out);
        sort.execute().expect("dfs");

        prop_assert!(kahn.is_acyclic().expect("kahn"));
        prop_assert!(sort.is_acyclic().expect("dfs"));
        for order in [kahn.order().expect("kahn"), sort.order().expect("dfs")] {
            prop_assert_eq!(order.len(), graph.vertex_count());
            for edge in graph.edges() {
                prop_assert!(order.position(graph.alpha(edge)) < order.position(graph.omega(edge)));
            }
        }
    }

    /// Heap and linear scan priority buffers release the same sequence.
    #[test]
    fn priority_buffers_agree(values in vec(0u32..1000, 0..64)) {
        let mut heap = PriorityBuffer::natural();
        let mut scan = UnsortedPriorityBuffer::natural();
        for value in &values {
            heap.put(*value);
            scan.put(*value);
        }

        while !heap.is_empty() {
            prop_assert_eq!(heap.get_next().expect("heap"), scan.get_next().expect("scan"));
        }
        prop_assert!(scan.is_empty());
    }
}
