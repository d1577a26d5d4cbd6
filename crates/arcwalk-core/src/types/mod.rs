//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the arcwalk kernel:
//! - Element handles (`VertexId`, `EdgeId`, `Edge`)
//! - Traversal direction (`Direction`)
//! - Subgraph predicate domain (`GraphElement`)
//! - Error types (`ArcwalkError`)
//!
//! ## Identity Guarantees
//!
//! Vertex and edge identities are dense and 1-based. Slot 0 of every
//! element-indexed array is unused, so `id.index()` can address a
//! `Vec` sized `count + 1` directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::algorithm::{AlgorithmKind, AlgorithmState};
use crate::visitor::VisitorFamily;

// =============================================================================
// ELEMENT IDENTIFIERS
// =============================================================================

/// Dense 1-based identifier of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    /// Get the raw index, usable directly into a `count + 1` sized array.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Dense 1-based identifier of an edge, independent of orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    /// Get the raw index, usable directly into a `count + 1` sized array.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

// =============================================================================
// ORIENTED EDGE
// =============================================================================

/// An edge seen from one of its endpoints.
///
/// A *normal* edge is traversed from `alpha` to `omega`, a *reversed* edge
/// from `omega` to `alpha`. Both orientations share one [`EdgeId`], so
/// per-edge markers see them as the same element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    normal: bool,
}

impl Edge {
    /// The normal orientation of an edge.
    #[must_use]
    pub const fn normal(id: EdgeId) -> Self {
        Self { id, normal: true }
    }

    /// The same edge seen from the other endpoint.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            id: self.id,
            normal: !self.normal,
        }
    }

    /// Orientation-free identity.
    #[must_use]
    pub const fn id(self) -> EdgeId {
        self.id
    }

    /// Whether this is the alpha -> omega orientation.
    #[must_use]
    pub const fn is_normal(self) -> bool {
        self.normal
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.normal {
            write!(f, "+{}", self.id)
        } else {
            write!(f, "-{}", self.id)
        }
    }
}

// =============================================================================
// DIRECTION
// =============================================================================

/// Which incidences of a vertex a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Outgoing edges only (normal orientation).
    #[default]
    Out,
    /// Incoming edges only (reversed orientation).
    In,
    /// Both, treating the graph as undirected.
    Both,
}

impl Direction {
    /// The direction that walks the same edges the other way round.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Out => Self::In,
            Self::In => Self::Out,
            Self::Both => Self::Both,
        }
    }

    /// Whether an incidence with the given orientation belongs to this direction.
    #[must_use]
    pub const fn admits(self, edge: Edge) -> bool {
        match self {
            Self::Out => edge.is_normal(),
            Self::In => !edge.is_normal(),
            Self::Both => true,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Out => "out",
            Self::In => "in",
            Self::Both => "both",
        };
        f.write_str(name)
    }
}

// =============================================================================
// GRAPH ELEMENT
// =============================================================================

/// Domain of the subgraph predicate: either kind of graph element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphElement {
    Vertex(VertexId),
    Edge(Edge),
}

impl From<VertexId> for GraphElement {
    fn from(vertex: VertexId) -> Self {
        Self::Vertex(vertex)
    }
}

impl From<Edge> for GraphElement {
    fn from(edge: Edge) -> Self {
        Self::Edge(edge)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the arcwalk kernel.
///
/// - Lifecycle violations are programmer errors and are reported immediately
/// - Cycles and early termination are results, never errors
/// - The kernel never panics; every failure is a `Result`
#[derive(Debug, Error)]
pub enum ArcwalkError {
    /// An operation was attempted in a lifecycle state that forbids it.
    #[error("{algorithm}: cannot {operation} while {state}")]
    InvalidState {
        algorithm: AlgorithmKind,
        operation: &'static str,
        state: AlgorithmState,
    },

    /// `get_next` was called on an empty frontier buffer.
    #[error("Buffer is empty")]
    EmptyBuffer,

    /// A visitor family was attached to an algorithm that cannot drive it.
    #[error("{algorithm} does not accept {family} visitors")]
    IncompatibleVisitor {
        algorithm: AlgorithmKind,
        family: VisitorFamily,
    },

    /// The algorithm is only defined for directed traversal.
    #[error("{algorithm} does not support direction '{direction}'")]
    UnsupportedDirection {
        algorithm: AlgorithmKind,
        direction: Direction,
    },

    /// The requested vertex does not exist in the graph.
    #[error("Vertex not found: {0}")]
    VertexNotFound(VertexId),

    /// The edge does not belong to the graph.
    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// In-degree elimination and DFS disagreed about acyclicity.
    #[error("Acyclicity mismatch: in-degree elimination says {degree}, DFS says {dfs}")]
    AcyclicityMismatch { degree: bool, dfs: bool },

    /// A configuration value could not be applied.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_edge_keeps_identity() {
        let edge = Edge::normal(EdgeId(7));
        let back = edge.reversed();

        assert_eq!(back.id(), edge.id());
        assert!(!back.is_normal());
        assert_eq!(back.reversed(), edge);
    }

    #[test]
    fn direction_admits_orientations() {
        let edge = Edge::normal(EdgeId(1));

        assert!(Direction::Out.admits(edge));
        assert!(!Direction::Out.admits(edge.reversed()));
        assert!(Direction::In.admits(edge.reversed()));
        assert!(Direction::Both.admits(edge));
        assert!(Direction::Both.admits(edge.reversed()));
    }

    #[test]
    fn direction_opposite() {
        assert_eq!(Direction::Out.opposite(), Direction::In);
        assert_eq!(Direction::In.opposite(), Direction::Out);
        assert_eq!(Direction::Both.opposite(), Direction::Both);
    }

    #[test]
    fn error_messages_name_the_algorithm() {
        let err = ArcwalkError::InvalidState {
            algorithm: AlgorithmKind::BreadthFirstSearch,
            operation: "execute",
            state: AlgorithmState::Uninitialized,
        };
        assert_eq!(
            err.to_string(),
            "breadth-first search: cannot execute while uninitialized"
        );
    }
}
