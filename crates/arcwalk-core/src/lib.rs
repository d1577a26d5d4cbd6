//! # arcwalk-core
//!
//! The graph-algorithm execution framework for arcwalk.
//!
//! Every algorithm is an explicit state machine over a read-only graph:
//! configure parameters, `reset_parameters`, `reset`, `execute`, then read
//! results. Traversals are generic over their frontier buffer, and user
//! code observes them through typed visitor families that can stop a run
//! early without it counting as a failure.
//!
//! ## Layout
//!
//! - `types`, `graph`: element identities and the [`GraphView`] capability
//! - `marker`, `function`: element-indexed maps and function objects
//! - `buffer`: queue, stack, priority, unsorted and random frontiers
//! - `visitor`: visitor families, composition and built-ins
//! - `algorithm`: lifecycle, parameters and the [`GraphAlgorithm`] trait
//! - `traversal`: frontier search (BFS) and depth-first search
//! - `solvers`: reachability, transitive closure, topological order
//!
//! ## Architectural Constraints
//!
//! - Graphs are never mutated by an algorithm
//! - One algorithm instance is single-threaded and owns its working state
//! - Precondition violations are errors, never panics

// =============================================================================
// MODULES
// =============================================================================

pub mod algorithm;
pub mod buffer;
pub mod config;
pub mod function;
pub mod graph;
pub mod marker;
pub mod primitives;
pub mod solvers;
pub mod traversal;
pub mod types;
pub mod visitor;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{ArcwalkError, Direction, Edge, EdgeId, GraphElement, VertexId};

// =============================================================================
// RE-EXPORTS: Framework
// =============================================================================

pub use algorithm::{AlgorithmKind, AlgorithmState, GraphAlgorithm, SearchParameters};
pub use buffer::Buffer;
pub use config::{FrontierKind, SearchConfig};
pub use function::{BinaryFunction, BooleanFunction, IntFunction, Permutation, Relation};
pub use graph::{Graph, GraphView, SerializableGraph};
pub use marker::{BitMarker, IntMarker, Marker};

// =============================================================================
// RE-EXPORTS: Algorithms
// =============================================================================

pub use solvers::{
    AcyclicityWithDfs, ReachableWithSearch, TopologicalOrderWithDegree, TopologicalOrderWithDfs,
    TransitiveClosure, verify_acyclicity,
};
pub use traversal::{BreadthFirstSearch, DepthFirstSearch, FrontierSearch, SearchState};
pub use visitor::{AnyVisitor, Flow, NoopVisitor, Stop, VisitLimit};
