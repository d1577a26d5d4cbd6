//! # Derived Solvers
//!
//! Algorithms composed from the traversal engines:
//! - [`ReachableWithSearch`]: single pair reachability, stops at the target
//! - [`TransitiveClosure`]: all pairs reachability with path reconstruction
//! - [`TopologicalOrderWithDegree`] and [`TopologicalOrderWithDfs`]
//! - [`AcyclicityWithDfs`] and the [`verify_acyclicity`] cross-check
//!
//! Solvers own the traversals they drive and hand them their own
//! parameters on `reset_parameters`. Private bookkeeping runs as a hook
//! ahead of the user's visitors, so user visitors see the same callbacks
//! they would on the bare traversal.

mod acyclicity;
mod closure;
mod reachability;
mod topological;

pub use acyclicity::{AcyclicityWithDfs, verify_acyclicity};
pub use closure::{Reachability, TransitiveClosure};
pub use reachability::ReachableWithSearch;
pub use topological::{TopologicalOrderWithDegree, TopologicalOrderWithDfs};
