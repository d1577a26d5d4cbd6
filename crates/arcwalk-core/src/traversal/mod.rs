//! # Traversal Engines
//!
//! The frontier-driven walk and depth-first search every other algorithm is
//! built on.
//!
//! Both engines honor the shared parameters:
//! - `direction`: which incidences of a vertex are followed
//! - `subgraph`: elements it rejects are invisible; an edge is only seen if
//!   it and its far endpoint are both accepted
//! - `navigable`: rejected edges are still explored (edge callback, marked
//!   visited) but never move the frontier, so they are neither tree edges
//!   nor fronds
//!
//! Per-run results live in a [`SearchState`] owned by the engine.

mod depth_first;
mod frontier;
mod state;

pub use depth_first::DepthFirstSearch;
pub use frontier::{BreadthFirstSearch, FrontierSearch};
pub use state::SearchState;
