//! Warshall transitive closure with successor tracking.

use crate::algorithm::{AlgorithmCore, AlgorithmKind, GraphAlgorithm};
use crate::function::{BinaryFunction, Permutation, Relation};
use crate::graph::GraphView;
use crate::marker::IntMarker;
use crate::traversal::BreadthFirstSearch;
use crate::visitor::{AnyVisitor, CONTINUE, ClosureVisitor, Flow, VisitorList};
use crate::{ArcwalkError, Edge, VertexId};
use std::fmt;

// =============================================================================
// MATRIX
// =============================================================================

/// Dense `(n + 1)^2` reachability, distance and first-hop tables, indexed by
/// BFS number. Row and column 0 are unused.
#[derive(Debug, Clone, Default)]
struct Matrix {
    size: usize,
    reachable: Vec<bool>,
    /// Edge count of the shortest known path; `usize::MAX` when unrelated.
    distance: Vec<usize>,
    successor: Vec<Option<Edge>>,
}

impl Matrix {
    /// Reflexive closure of `count` vertices.
    fn reflexive(count: usize) -> Self {
        let size = count + 1;
        let mut matrix = Self {
            size,
            reachable: vec![false; size * size],
            distance: vec![usize::MAX; size * size],
            successor: vec![None; size * size],
        };
        for i in 1..size {
            let slot = matrix.slot(i, i);
            matrix.reachable[slot] = true;
            matrix.distance[slot] = 0;
        }
        matrix
    }

    fn slot(&self, i: usize, j: usize) -> usize {
        i * self.size + j
    }

    fn contains(&self, i: usize, j: usize) -> bool {
        i < self.size && j < self.size && self.reachable[self.slot(i, j)]
    }

    fn distance(&self, i: usize, j: usize) -> usize {
        self.distance[self.slot(i, j)]
    }

    fn successor(&self, i: usize, j: usize) -> Option<Edge> {
        if i < self.size && j < self.size {
            self.successor[self.slot(i, j)]
        } else {
            None
        }
    }

    /// Record a path of `distance` edges from `i` to `j` starting with `first`.
    fn link(&mut self, i: usize, j: usize, distance: usize, first: Option<Edge>) {
        let slot = self.slot(i, j);
        self.reachable[slot] = true;
        self.distance[slot] = distance;
        self.successor[slot] = first;
    }
}

// =============================================================================
// TRANSITIVE CLOSURE
// =============================================================================

/// All pairs reachability over the visible, navigable edges.
///
/// Vertices are numbered by a breadth-first search over the same
/// parameters, then the matrix is seeded from single edges and closed with
/// Warshall's recurrence in `O(n^3)`. Each new pair `(u, w)` found through
/// `v` is reported to closure visitors as `(u, v, w)`.
///
/// Alongside reachability the closure keeps, for every reachable pair, the
/// first edge of a path with the fewest edges. A shorter route found in a
/// later round replaces the successor; among equally short routes the
/// first one found is kept, so among parallel direct edges the first in
/// incidence order wins.
pub struct TransitiveClosure<'g, G> {
    core: AlgorithmCore<'g, G>,
    numbering: BreadthFirstSearch<'g, G>,
    visitors: VisitorList<dyn ClosureVisitor + 'g>,
    index: IntMarker<VertexId>,
    order: Permutation<VertexId>,
    matrix: Matrix,
}

impl<'g, G: GraphView + 'g> TransitiveClosure<'g, G> {
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self {
            core: AlgorithmCore::new(graph, AlgorithmKind::TransitiveClosure),
            numbering: BreadthFirstSearch::new(graph),
            visitors: VisitorList::new(),
            index: IntMarker::default(),
            order: Permutation::new(),
            matrix: Matrix::default(),
        }
    }

    pub fn execute(&mut self) -> Result<(), ArcwalkError> {
        self.core.begin()?;
        let outcome = self.compute();
        self.core.conclude(outcome)?;
        tracing::debug!("closure over {} vertices", self.order.len());
        Ok(())
    }

    fn compute(&mut self) -> Result<Flow, ArcwalkError> {
        self.numbering.reset()?;
        self.numbering.execute()?;
        let state = self.numbering.search_state()?;
        self.index = state.numbering().clone();
        self.order = state.vertex_order().clone();

        self.matrix = Matrix::reflexive(self.order.len());
        seed(&self.core, &self.index, self.order.as_slice(), &mut self.matrix);
        Ok(close(&mut self.matrix, self.order.as_slice(), &mut self.visitors))
    }

    // =========================================================================
    // RESULTS
    // =========================================================================

    /// Read-only view of the closed relation.
    pub fn reachability(&self) -> Result<Reachability<'_>, ArcwalkError> {
        self.core.lifecycle().check_finished("read closure")?;
        Ok(Reachability {
            index: &self.index,
            matrix: &self.matrix,
        })
    }

    pub fn is_reachable(&self, source: VertexId, target: VertexId) -> Result<bool, ArcwalkError> {
        Ok(self.reachability()?.reachable(source, target))
    }

    /// First edge on a shortest path from `source` to `target`.
    pub fn successor(&self, source: VertexId, target: VertexId) -> Result<Option<Edge>, ArcwalkError> {
        Ok(self.reachability()?.successor(source, target))
    }

    /// Rebuild a shortest path by following successors. `Some(vec![])` when
    /// `source == target`, `None` when `target` is unreachable.
    pub fn path(&self, source: VertexId, target: VertexId) -> Result<Option<Vec<Edge>>, ArcwalkError> {
        let view = self.reachability()?;
        if !view.reachable(source, target) {
            return Ok(None);
        }

        let graph = self.core.graph();
        let mut path = Vec::new();
        let mut current = source;
        while current != target {
            // A path never repeats a vertex; longer means the matrix was left
            // incomplete by an early stop.
            if path.len() >= self.order.len() {
                return Ok(None);
            }
            let Some(edge) = view.successor(current, target) else {
                return Ok(None);
            };
            path.push(edge);
            current = graph.that(edge);
        }
        Ok(Some(path))
    }

    /// BFS number of every visible vertex, the matrix index.
    pub fn index(&self) -> Result<&IntMarker<VertexId>, ArcwalkError> {
        self.core.lifecycle().check_finished("read closure")?;
        Ok(&self.index)
    }

    pub fn vertex_order(&self) -> Result<&Permutation<VertexId>, ArcwalkError> {
        self.core.lifecycle().check_finished("read closure")?;
        Ok(&self.order)
    }
}

impl<'g, G: GraphView + 'g> GraphAlgorithm<'g, G> for TransitiveClosure<'g, G> {
    fn core(&self) -> &AlgorithmCore<'g, G> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AlgorithmCore<'g, G> {
        &mut self.core
    }

    fn reset_parameters(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle().check_not_running("reset parameters")?;
        self.numbering.set_parameters(self.core.parameters().clone())?;
        self.numbering.reset_parameters()?;
        self.core.lifecycle_mut().parameters_set()
    }

    fn reset(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle_mut().ready()?;
        self.index.clear();
        self.order.clear();
        self.matrix = Matrix::default();
        ClosureVisitor::reset(&mut self.visitors);
        Ok(())
    }

    fn add_visitor(&mut self, visitor: AnyVisitor<'g>) -> Result<(), ArcwalkError> {
        self.core.check_visitor(&visitor)?;
        let (algorithm, family) = (self.kind(), visitor.family());
        let visitor = visitor
            .into_closure()
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

impl<G> fmt::Debug for TransitiveClosure<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitiveClosure")
            .field("core", &self.core)
            .field("visitors", &self.visitors)
            .field("vertices", &self.order.len())
            .finish()
    }
}

/// Single edge reachability. `order[i - 1]` has index `i`.
fn seed<G: GraphView>(
    core: &AlgorithmCore<'_, G>,
    index: &IntMarker<VertexId>,
    order: &[VertexId],
    matrix: &mut Matrix,
) {
    for (row, &vertex) in order.iter().enumerate() {
        let i = row + 1;
        for step in core.usable_steps(vertex) {
            let Some(&j) = index.get(step.target) else {
                continue;
            };
            if !matrix.contains(i, j) {
                matrix.link(i, j, 1, Some(step.edge));
            }
        }
    }
}

/// Warshall with distances: after round `v`, every pair connected through
/// intermediates numbered at most `v` is linked by a shortest such path.
/// Triples are reported only when a pair becomes related.
fn close<V: ClosureVisitor + ?Sized>(matrix: &mut Matrix, order: &[VertexId], visitor: &mut V) -> Flow {
    let count = order.len();
    for v in 1..=count {
        for u in 1..=count {
            if u == v || !matrix.contains(u, v) {
                continue;
            }
            let (to_via, first) = (matrix.distance(u, v), matrix.successor(u, v));
            for w in 1..=count {
                if !matrix.contains(v, w) {
                    continue;
                }
                let through = to_via.saturating_add(matrix.distance(v, w));
                if through >= matrix.distance(u, w) {
                    continue;
                }
                let fresh = !matrix.contains(u, w);
                matrix.link(u, w, through, first);
                if fresh {
                    visitor.visit_vertex_triple(order[u - 1], order[v - 1], order[w - 1])?;
                }
            }
        }
    }
    CONTINUE
}

// =============================================================================
// REACHABILITY VIEW
// =============================================================================

/// The closed relation of a finished [`TransitiveClosure`].
///
/// Vertices outside the subgraph reach nothing and are reached by nothing.
#[derive(Debug, Clone, Copy)]
pub struct Reachability<'a> {
    index: &'a IntMarker<VertexId>,
    matrix: &'a Matrix,
}

impl Reachability<'_> {
    fn indices(&self, source: VertexId, target: VertexId) -> Option<(usize, usize)> {
        Some((*self.index.get(source)?, *self.index.get(target)?))
    }

    /// Reflexive: every visible vertex reaches itself.
    pub fn reachable(&self, source: VertexId, target: VertexId) -> bool {
        self.indices(source, target)
            .is_some_and(|(i, j)| self.matrix.contains(i, j))
    }

    /// First edge of a shortest path, oriented away from `source`. `None` on the
    /// diagonal and for unreachable pairs.
    pub fn successor(&self, source: VertexId, target: VertexId) -> Option<Edge> {
        self.indices(source, target)
            .and_then(|(i, j)| self.matrix.successor(i, j))
    }
}

impl Relation<VertexId, VertexId> for Reachability<'_> {
    fn related(&self, left: VertexId, right: VertexId) -> bool {
        self.reachable(left, right)
    }
}

impl BinaryFunction<VertexId, VertexId, Edge> for Reachability<'_> {
    fn get(&self, left: VertexId, right: VertexId) -> Option<Edge> {
        self.successor(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::AlgorithmState;
    use crate::graph::Graph;
    use crate::visitor::stop;
    use crate::{Direction, EdgeId};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn graph(count: usize, edges: &[(usize, usize)]) -> Graph {
        Graph::from_edges(
            count,
            edges.iter().map(|&(a, b)| (VertexId(a), VertexId(b))),
        )
        .expect("graph")
    }

    fn closed(g: &Graph) -> TransitiveClosure<'_, Graph> {
        let mut closure = TransitiveClosure::new(g);
        closure.reset_parameters().expect("parameters");
        closure.reset().expect("reset");
        closure.execute().expect("execute");
        closure
    }

    #[derive(Default)]
    struct Triples(Vec<(VertexId, VertexId, VertexId)>);

    impl ClosureVisitor for Triples {
        fn reset(&mut self) {
            self.0.clear();
        }

        fn visit_vertex_triple(&mut self, source: VertexId, via: VertexId, target: VertexId) -> Flow {
            self.0.push((source, via, target));
            CONTINUE
        }
    }

    #[test]
    fn closes_the_dag() {
        // A->B, B->C, A->C, C->D
        let g = graph(4, &[(1, 2), (2, 3), (1, 3), (3, 4)]);
        let closure = closed(&g);
        let (a, b, c, d) = (VertexId(1), VertexId(2), VertexId(3), VertexId(4));

        for (source, target) in [(a, b), (a, c), (a, d), (b, c), (b, d), (c, d)] {
            assert!(closure.is_reachable(source, target).expect("read"));
        }
        for (source, target) in [(b, a), (d, a), (c, b), (d, c)] {
            assert!(!closure.is_reachable(source, target).expect("read"));
        }
        for vertex in [a, b, c, d] {
            assert!(closure.is_reachable(vertex, vertex).expect("read"));
        }
    }

    #[test]
    fn direct_edges_are_preferred_successors() {
        let g = graph(4, &[(1, 2), (2, 3), (1, 3), (3, 4)]);
        let closure = closed(&g);

        let ac = closure.successor(VertexId(1), VertexId(3)).expect("read");
        assert_eq!(ac.map(Edge::id), Some(EdgeId(3)));

        let path = closure.path(VertexId(1), VertexId(4)).expect("read").expect("path");
        let ids: Vec<_> = path.iter().map(|edge| edge.id()).collect();
        assert_eq!(ids, vec![EdgeId(3), EdgeId(4)]);
    }

    #[test]
    fn paths_follow_successors_to_the_target() {
        let g = graph(6, &[(1, 2), (2, 3), (3, 4), (4, 2), (4, 5), (6, 5)]);
        let closure = closed(&g);

        for source in g.vertices() {
            for target in g.vertices() {
                let reachable = closure.is_reachable(source, target).expect("read");
                let path = closure.path(source, target).expect("read");
                assert_eq!(path.is_some(), reachable, "{source} -> {target}");

                if let Some(path) = path {
                    let mut current = source;
                    for edge in &path {
                        assert_eq!(g.this(*edge), current);
                        current = g.that(*edge);
                    }
                    assert_eq!(current, target);
                    assert!(path.len() < g.vertex_count());
                }
            }
        }
        assert_eq!(closure.path(VertexId(1), VertexId(1)).expect("read"), Some(vec![]));
    }

    /// Edge count of a shortest path, from a breadth-first search.
    fn bfs_distance(g: &Graph, direction: Direction, source: VertexId, target: VertexId) -> Option<usize> {
        let mut bfs = BreadthFirstSearch::new(g);
        bfs.set_direction(direction).expect("direction");
        bfs.reset_parameters().expect("parameters");
        bfs.reset().expect("reset");
        bfs.execute_from(source).expect("execute");
        bfs.search_state().expect("state").level(target)
    }

    #[test]
    fn successor_starts_a_shortest_path() {
        // 4 -> 2 -> 3 -> 5 is seen first, 4 -> 6 -> 5 is shorter
        let g = graph(
            6,
            &[(1, 2), (1, 3), (1, 4), (2, 3), (3, 5), (4, 2), (4, 6), (6, 5)],
        );
        let closure = closed(&g);

        let path = closure.path(VertexId(4), VertexId(5)).expect("read").expect("path");
        let ids: Vec<_> = path.iter().map(|edge| edge.id()).collect();
        assert_eq!(ids, vec![EdgeId(7), EdgeId(8)]);
        assert_eq!(
            closure.successor(VertexId(4), VertexId(5)).expect("read"),
            Some(Edge::normal(EdgeId(7)))
        );
    }

    #[test]
    fn path_lengths_match_bfs_levels() {
        let g = graph(
            7,
            &[(1, 2), (1, 3), (1, 4), (2, 3), (3, 5), (4, 2), (4, 6), (6, 5), (5, 7), (7, 1)],
        );
        for direction in [Direction::Out, Direction::In, Direction::Both] {
            let mut closure = TransitiveClosure::new(&g);
            closure.set_direction(direction).expect("direction");
            closure.reset_parameters().expect("parameters");
            closure.reset().expect("reset");
            closure.execute().expect("execute");

            for source in g.vertices() {
                for target in g.vertices() {
                    let length = closure.path(source, target).expect("read").map(|path| path.len());
                    assert_eq!(
                        length,
                        bfs_distance(&g, direction, source, target),
                        "{direction}: {source} -> {target}"
                    );
                }
            }
        }
    }

    #[test]
    fn triples_report_each_new_pair_once() {
        let g = graph(3, &[(1, 2), (2, 3)]);
        let triples = Rc::new(RefCell::new(Triples::default()));
        let mut closure = TransitiveClosure::new(&g);
        closure
            .add_visitor(AnyVisitor::closure(Rc::clone(&triples)))
            .expect("visitor");
        closure.reset_parameters().expect("parameters");
        closure.reset().expect("reset");
        closure.execute().expect("execute");

        assert_eq!(
            triples.borrow().0,
            vec![(VertexId(1), VertexId(2), VertexId(3))]
        );
    }

    #[test]
    fn undirected_closure_is_symmetric() {
        let g = graph(4, &[(1, 2), (3, 2)]);
        let mut closure = TransitiveClosure::new(&g);
        closure.set_direction(Direction::Both).expect("direction");
        closure.reset_parameters().expect("parameters");
        closure.reset().expect("reset");
        closure.execute().expect("execute");

        let view = closure.reachability().expect("view");
        assert!(view.related(VertexId(1), VertexId(3)));
        assert!(view.related(VertexId(3), VertexId(1)));
        assert!(!view.related(VertexId(1), VertexId(4)));

        // Each edge seeds both orientations
        let (e1, e2) = (Edge::normal(EdgeId(1)), Edge::normal(EdgeId(2)));
        assert_eq!(view.successor(VertexId(1), VertexId(2)), Some(e1));
        assert_eq!(view.successor(VertexId(2), VertexId(1)), Some(e1.reversed()));
        assert_eq!(view.successor(VertexId(3), VertexId(2)), Some(e2));
        assert_eq!(view.successor(VertexId(2), VertexId(3)), Some(e2.reversed()));
        assert_eq!(view.successor(VertexId(1), VertexId(3)), Some(e1));
    }

    #[test]
    fn non_navigable_edges_do_not_connect() {
        let g = graph(3, &[(1, 2), (2, 3)]);
        let mut closure = TransitiveClosure::new(&g);
        closure
            .set_navigable(|edge: Edge| edge.id() != EdgeId(2))
            .expect("navigable");
        closure.reset_parameters().expect("parameters");
        closure.reset().expect("reset");
        closure.execute().expect("execute");

        assert!(closure.is_reachable(VertexId(1), VertexId(2)).expect("read"));
        assert!(!closure.is_reachable(VertexId(2), VertexId(3)).expect("read"));
    }

    #[test]
    fn early_stop_keeps_partial_matrix() {
        struct FirstOnly;
        impl ClosureVisitor for FirstOnly {
            fn visit_vertex_triple(&mut self, _: VertexId, _: VertexId, _: VertexId) -> Flow {
                stop("one triple is enough")
            }
        }

        let g = graph(4, &[(1, 2), (2, 3), (3, 4)]);
        let mut closure = TransitiveClosure::new(&g);
        closure.add_visitor(AnyVisitor::closure(FirstOnly)).expect("visitor");
        closure.reset_parameters().expect("parameters");
        closure.reset().expect("reset");
        closure.execute().expect("execute");

        assert_eq!(closure.state(), AlgorithmState::Finished);
        assert!(closure.termination().is_some());
        assert!(closure.is_reachable(VertexId(1), VertexId(3)).expect("read"));
        assert!(!closure.is_reachable(VertexId(1), VertexId(4)).expect("read"));
    }

    #[test]
    fn results_require_a_finished_run() {
        let g = graph(2, &[(1, 2)]);
        let mut closure = TransitiveClosure::new(&g);
        assert!(closure.reachability().is_err());
        closure.reset_parameters().expect("parameters");
        closure.reset().expect("reset");
        assert!(closure.is_reachable(VertexId(1), VertexId(2)).is_err());
    }
}
