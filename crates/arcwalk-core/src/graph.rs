//! # Graph Collaborator
//!
//! The narrow interface through which every algorithm consumes a graph,
//! plus a dense arena implementation of it.
//!
//! Algorithms never see how a graph is stored. They only enumerate
//! vertices and edges, enumerate the incidences of a vertex in a
//! [`Direction`], and ask an edge for its endpoints.

use crate::{ArcwalkError, Direction, Edge, EdgeId, VertexId};
use serde::{Deserialize, Serialize};

// =============================================================================
// GRAPHVIEW TRAIT
// =============================================================================

/// Read-only access to a graph.
///
/// Identities must be dense (`1..=vertex_count`, `1..=edge_count`) and
/// stable for the duration of an algorithm run. Iteration order need not
/// be sorted but must be repeatable within one run.
///
/// Algorithms hold a shared reference for their whole lifetime. Mutating the
/// graph from a visitor callback is not supported.
pub trait GraphView {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// All vertices.
    fn vertices(&self) -> impl Iterator<Item = VertexId> + '_;

    /// All edges, in normal orientation.
    fn edges(&self) -> impl Iterator<Item = Edge> + '_;

    /// Incidences of `vertex` admitted by `direction`, oriented away from `vertex`.
    fn incident_edges(
        &self,
        vertex: VertexId,
        direction: Direction,
    ) -> impl Iterator<Item = Edge> + '_;

    /// Start vertex of the edge's normal orientation. Edges are expected to
    /// come from this graph; `Graph` answers `VertexId(0)` for any other.
    fn alpha(&self, edge: Edge) -> VertexId;

    /// End vertex of the edge's normal orientation.
    fn omega(&self, edge: Edge) -> VertexId;

    /// The endpoint the oriented edge leaves from.
    fn this(&self, edge: Edge) -> VertexId {
        if edge.is_normal() {
            self.alpha(edge)
        } else {
            self.omega(edge)
        }
    }

    /// The endpoint the oriented edge leads to.
    fn that(&self, edge: Edge) -> VertexId {
        if edge.is_normal() {
            self.omega(edge)
        } else {
            self.alpha(edge)
        }
    }

    /// Whether `vertex` is a valid identity of this graph.
    fn contains_vertex(&self, vertex: VertexId) -> bool {
        (1..=self.vertex_count()).contains(&vertex.index())
    }
}

// =============================================================================
// GRAPH IMPLEMENTATION
// =============================================================================

#[derive(Debug, Clone, Default)]
struct VertexRecord {
    /// Normal incidences for outgoing edges, reversed ones for incoming,
    /// in insertion order.
    incidences: Vec<Edge>,
}

#[derive(Debug, Clone, Copy)]
struct EdgeRecord {
    alpha: VertexId,
    omega: VertexId,
}

/// Arena graph with dense 1-based vertex and edge handles.
///
/// Elements are only ever appended, so handles never dangle and marker
/// arrays sized from the counts stay valid.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<VertexRecord>,
    edges: Vec<EdgeRecord>,
}

impl Graph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with `count` isolated vertices `1..=count`.
    #[must_use]
    pub fn with_vertices(count: usize) -> Self {
        Self {
            vertices: vec![VertexRecord::default(); count],
            edges: Vec::new(),
        }
    }

    /// Create a graph with `count` vertices and the given directed edges, in order.
    pub fn from_edges(
        count: usize,
        edges: impl IntoIterator<Item = (VertexId, VertexId)>,
    ) -> Result<Self, ArcwalkError> {
        let mut graph = Self::with_vertices(count);
        for (alpha, omega) in edges {
            graph.add_edge(alpha, omega)?;
        }
        Ok(graph)
    }

    /// Append a vertex and return its handle.
    pub fn add_vertex(&mut self) -> VertexId {
        self.vertices.push(VertexRecord::default());
        VertexId(self.vertices.len())
    }

    /// Append a directed edge `alpha -> omega` and return it in normal orientation.
    pub fn add_edge(&mut self, alpha: VertexId, omega: VertexId) -> Result<Edge, ArcwalkError> {
        if !self.contains_vertex(alpha) {
            return Err(ArcwalkError::VertexNotFound(alpha));
        }
        if !self.contains_vertex(omega) {
            return Err(ArcwalkError::VertexNotFound(omega));
        }

        self.edges.push(EdgeRecord { alpha, omega });
        let edge = Edge::normal(EdgeId(self.edges.len()));

        self.vertices[alpha.index() - 1].incidences.push(edge);
        self.vertices[omega.index() - 1]
            .incidences
            .push(edge.reversed());

        Ok(edge)
    }

    /// Look up an edge by identity, in normal orientation.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        (1..=self.edges.len())
            .contains(&id.index())
            .then(|| Edge::normal(id))
    }

    /// Normal-orientation endpoints `(alpha, omega)` of an edge of this graph.
    pub fn endpoints(&self, edge: Edge) -> Result<(VertexId, VertexId), ArcwalkError> {
        self.record(edge)
            .map(|record| (record.alpha, record.omega))
            .ok_or(ArcwalkError::EdgeNotFound(edge.id()))
    }

    fn record(&self, edge: Edge) -> Option<EdgeRecord> {
        edge.id()
            .index()
            .checked_sub(1)
            .and_then(|slot| self.edges.get(slot))
            .copied()
    }
}

impl GraphView for Graph {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (1..=self.vertices.len()).map(VertexId)
    }

    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (1..=self.edges.len()).map(|id| Edge::normal(EdgeId(id)))
    }

    fn incident_edges(
        &self,
        vertex: VertexId,
        direction: Direction,
    ) -> impl Iterator<Item = Edge> + '_ {
        vertex
            .index()
            .checked_sub(1)
            .and_then(|slot| self.vertices.get(slot))
            .into_iter()
            .flat_map(|record| record.incidences.iter().copied())
            .filter(move |edge| direction.admits(*edge))
    }

    fn alpha(&self, edge: Edge) -> VertexId {
        self.record(edge).map_or(VertexId(0), |record| record.alpha)
    }

    fn omega(&self, edge: Edge) -> VertexId {
        self.record(edge).map_or(VertexId(0), |record| record.omega)
    }
}

// =============================================================================
// SERIALIZATION SUPPORT
// =============================================================================

/// Serializable representation of a graph: a vertex count and the endpoint
/// pairs of every edge, in edge-identity order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableGraph {
    pub vertex_count: usize,
    pub edges: Vec<(VertexId, VertexId)>,
}

impl From<&Graph> for SerializableGraph {
    fn from(graph: &Graph) -> Self {
        Self {
            vertex_count: graph.vertex_count(),
            edges: graph
                .edges()
                .map(|edge| (graph.alpha(edge), graph.omega(edge)))
                .collect(),
        }
    }
}

impl TryFrom<SerializableGraph> for Graph {
    type Error = ArcwalkError;

    fn try_from(sg: SerializableGraph) -> Result<Self, Self::Error> {
        Graph::from_edges(sg.vertex_count, sg.edges)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Graph, [VertexId; 3]) {
        let mut graph = Graph::new();
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        let c = graph.add_vertex();
        graph.add_edge(a, b).expect("edge");
        graph.add_edge(b, c).expect("edge");
        graph.add_edge(c, a).expect("edge");
        (graph, [a, b, c])
    }

    #[test]
    fn identities_are_dense_and_one_based() {
        let (graph, [a, b, c]) = triangle();

        assert_eq!((a, b, c), (VertexId(1), VertexId(2), VertexId(3)));
        assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(
            graph.edges().map(|e| e.id()).collect::<Vec<_>>(),
            vec![EdgeId(1), EdgeId(2), EdgeId(3)]
        );
    }

    #[test]
    fn incident_edges_respect_direction() {
        let (graph, [a, b, c]) = triangle();

        let out: Vec<_> = graph
            .incident_edges(a, Direction::Out)
            .map(|e| graph.that(e))
            .collect();
        assert_eq!(out, vec![b]);

        let incoming: Vec<_> = graph
            .incident_edges(a, Direction::In)
            .map(|e| graph.that(e))
            .collect();
        assert_eq!(incoming, vec![c]);

        assert_eq!(graph.incident_edges(a, Direction::Both).count(), 2);
    }

    #[test]
    fn this_and_that_follow_orientation() {
        let (graph, [a, b, _]) = triangle();
        let edge = graph.edge(EdgeId(1)).expect("edge");

        assert_eq!(graph.this(edge), a);
        assert_eq!(graph.that(edge), b);
        assert_eq!(graph.this(edge.reversed()), b);
        assert_eq!(graph.that(edge.reversed()), a);
    }

    #[test]
    fn self_loop_appears_in_both_directions() {
        let mut graph = Graph::new();
        let a = graph.add_vertex();
        graph.add_edge(a, a).expect("edge");

        assert_eq!(graph.incident_edges(a, Direction::Out).count(), 1);
        assert_eq!(graph.incident_edges(a, Direction::In).count(), 1);
        assert_eq!(graph.incident_edges(a, Direction::Both).count(), 2);
    }

    #[test]
    fn add_edge_rejects_unknown_vertex() {
        let mut graph = Graph::with_vertices(1);
        let result = graph.add_edge(VertexId(1), VertexId(9));
        assert!(matches!(result, Err(ArcwalkError::VertexNotFound(VertexId(9)))));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn foreign_edges_are_rejected_without_panicking() {
        let (graph, [a, b, _]) = triangle();
        let first = graph.edges().next().expect("edge");
        assert_eq!(graph.endpoints(first).expect("endpoints"), (a, b));

        for edge in [Edge::normal(EdgeId(0)), Edge::normal(EdgeId(99))] {
            assert!(matches!(
                graph.endpoints(edge),
                Err(ArcwalkError::EdgeNotFound(id)) if id == edge.id()
            ));
            assert_eq!(graph.alpha(edge), VertexId(0));
            assert_eq!(graph.that(edge.reversed()), VertexId(0));
        }
    }

    #[test]
    fn incident_edges_of_unknown_vertex_is_empty() {
        let graph = Graph::with_vertices(2);
        assert_eq!(graph.incident_edges(VertexId(0), Direction::Both).count(), 0);
        assert_eq!(graph.incident_edges(VertexId(5), Direction::Both).count(), 0);
    }

    #[test]
    fn serializable_graph_roundtrip() {
        let (graph, _) = triangle();

        let serializable = SerializableGraph::from(&graph);
        let restored = Graph::try_from(serializable.clone()).expect("restore");

        assert_eq!(restored.vertex_count(), 3);
        assert_eq!(SerializableGraph::from(&restored), serializable);
    }

    #[test]
    fn serializable_graph_rejects_dangling_edge() {
        let sg = SerializableGraph {
            vertex_count: 1,
            edges: vec![(VertexId(1), VertexId(2))],
        };
        assert!(Graph::try_from(sg).is_err());
    }
}
