//! Single pair reachability on top of breadth-first search.

use crate::algorithm::{AlgorithmCore, AlgorithmKind, GraphAlgorithm};
use crate::graph::GraphView;
use crate::primitives::TARGET_FOUND_REASON;
use crate::traversal::{BreadthFirstSearch, SearchState};
use crate::visitor::{AnyVisitor, CONTINUE, Flow, SearchVisitor, replay, stop};
use crate::{ArcwalkError, VertexId};
use std::fmt;

/// Ends the inner search as soon as the target is expanded.
struct TargetWatch {
    target: VertexId,
    found: bool,
}

impl SearchVisitor for TargetWatch {
    fn visit_vertex(&mut self, vertex: VertexId, _state: &SearchState) -> Flow {
        if vertex == self.target {
            self.found = true;
            return stop(TARGET_FOUND_REASON);
        }
        CONTINUE
    }
}

/// Does a path lead from `start` to `target`?
///
/// Runs breadth-first search from `start` only and stops the moment
/// `target` is expanded, so the cost is proportional to the explored prefix.
/// Attached search visitors are forwarded to the inner search and see that
/// prefix. Finding the target is reported as an early stop.
pub struct ReachableWithSearch<'g, G> {
    core: AlgorithmCore<'g, G>,
    search: BreadthFirstSearch<'g, G>,
    reachable: bool,
}

impl<'g, G: GraphView + 'g> ReachableWithSearch<'g, G> {
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self {
            core: AlgorithmCore::new(graph, AlgorithmKind::ReachableWithSearch),
            search: BreadthFirstSearch::new(graph),
            reachable: false,
        }
    }

    /// Search from `start` until `target` is found or the search runs out.
    pub fn execute(&mut self, start: VertexId, target: VertexId) -> Result<&Self, ArcwalkError> {
        self.core.check_vertex(start)?;
        self.core.check_vertex(target)?;
        self.core.begin()?;

        let outcome = self.search_from(start, target);
        let flow = replay(self.search.termination());
        self.core.conclude(outcome.map(|()| flow))?;
        tracing::debug!("{} -> {}: reachable = {}", start, target, self.reachable);
        Ok(self)
    }

    fn search_from(&mut self, start: VertexId, target: VertexId) -> Result<(), ArcwalkError> {
        self.search.reset()?;
        let mut watch = TargetWatch {
            target,
            found: false,
        };
        self.search.execute_with(Some(start), &mut watch)?;
        self.reachable = watch.found;
        Ok(())
    }

    /// Whether the last run reached its target.
    ///
    /// `false` is also reported when an attached visitor stopped the search
    /// before the target came up.
    pub fn is_reachable(&self) -> Result<bool, ArcwalkError> {
        self.core.lifecycle().check_finished("read reachability")?;
        Ok(self.reachable)
    }

    /// Working state of the inner search: the explored prefix.
    pub fn search_state(&self) -> Result<&SearchState, ArcwalkError> {
        self.core.lifecycle().check_finished("read results")?;
        self.search.search_state()
    }
}

impl<'g, G: GraphView + 'g> GraphAlgorithm<'g, G> for ReachableWithSearch<'g, G> {
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
        self.reachable = false;
        Ok(())
    }

    fn add_visitor(&mut self, visitor: AnyVisitor<'g>) -> Result<(), ArcwalkError> {
        self.core.check_visitor(&visitor)?;
        self.search.add_visitor(visitor)
    }

    fn clear_visitors(&mut self) -> Result<(), ArcwalkError> {
        self.core.lifecycle().check_not_running("clear visitors")?;
        self.search.clear_visitors()
    }
}

impl<G> fmt::Debug for ReachableWithSearch<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReachableWithSearch")
            .field("core", &self.core)
            .field("reachable", &self.reachable)
            .finish()
    }
}
