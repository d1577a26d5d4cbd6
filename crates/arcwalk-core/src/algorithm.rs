//! # Algorithm Lifecycle
//!
//! Shared behavior every algorithm instance obeys.
//!
//! ```text
//! Uninitialized --reset_parameters--> ParametersSet --reset--> Ready
//!       ^                                                        |
//!       |  (any setter)                                       execute
//!       |                                                        v
//!       +------------------------- Finished <------------- Running
//! ```
//!
//! - `execute` only starts from `Ready`
//! - setters fail while `Running` and otherwise drop back to `Uninitialized`
//! - results are readable only once `Finished`
//! - `reset` may be repeated from `ParametersSet`, `Ready` or `Finished`
//!
//! Early termination by a visitor still ends in `Finished`; the [`Stop`]
//! that caused it is kept as [`AlgorithmCore::termination`].

use crate::function::BooleanFunction;
use crate::graph::GraphView;
use crate::visitor::{AnyVisitor, Flow, Step, Stop, VisitorFamily};
use crate::{ArcwalkError, Direction, Edge, GraphElement, VertexId};
use std::fmt;
use std::ops::ControlFlow;
use std::rc::Rc;

// =============================================================================
// STATES AND KINDS
// =============================================================================

/// Lifecycle state of an algorithm instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlgorithmState {
    #[default]
    Uninitialized,
    ParametersSet,
    Ready,
    Running,
    Finished,
}

impl fmt::Display for AlgorithmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::ParametersSet => "parameters set",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Identity of an algorithm, used for visitor compatibility and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    BreadthFirstSearch,
    FrontierSearch,
    DepthFirstSearch,
    ReachableWithSearch,
    TransitiveClosure,
    TopologicalOrderWithDegree,
    TopologicalOrderWithDfs,
    AcyclicityWithDfs,
}

impl AlgorithmKind {
    /// Whether this algorithm can drive visitors of `family`.
    #[must_use]
    pub const fn accepts(self, family: VisitorFamily) -> bool {
        matches!(
            (self, family),
            (
                Self::BreadthFirstSearch | Self::FrontierSearch | Self::ReachableWithSearch,
                VisitorFamily::Search
            ) | (
                Self::DepthFirstSearch,
                VisitorFamily::Search | VisitorFamily::DepthFirst
            ) | (Self::TransitiveClosure, VisitorFamily::Closure)
                | (
                    Self::TopologicalOrderWithDegree | Self::TopologicalOrderWithDfs,
                    VisitorFamily::Topological
                )
        )
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BreadthFirstSearch => "breadth-first search",
            Self::FrontierSearch => "frontier search",
            Self::DepthFirstSearch => "depth-first search",
            Self::ReachableWithSearch => "reachability search",
            Self::TransitiveClosure => "transitive closure",
            Self::TopologicalOrderWithDegree => "topological order (in-degree)",
            Self::TopologicalOrderWithDfs => "topological order (dfs)",
            Self::AcyclicityWithDfs => "acyclicity (dfs)",
        };
        f.write_str(name)
    }
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// The explicit state machine, with one precondition check per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    kind: AlgorithmKind,
    state: AlgorithmState,
}

impl Lifecycle {
    #[must_use]
    pub fn new(kind: AlgorithmKind) -> Self {
        Self {
            kind,
            state: AlgorithmState::Uninitialized,
        }
    }

    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    pub fn state(&self) -> AlgorithmState {
        self.state
    }

    fn violation(&self, operation: &'static str) -> ArcwalkError {
        ArcwalkError::InvalidState {
            algorithm: self.kind,
            operation,
            state: self.state,
        }
    }

    fn transition(&mut self, next: AlgorithmState) {
        if self.state != next {
            tracing::debug!("{}: {} -> {}", self.kind, self.state, next);
        }
        self.state = next;
    }

    /// Fail if the algorithm is running.
    pub fn check_not_running(&self, operation: &'static str) -> Result<(), ArcwalkError> {
        if self.state == AlgorithmState::Running {
            return Err(self.violation(operation));
        }
        Ok(())
    }

    /// Fail unless the algorithm has finished.
    pub fn check_finished(&self, operation: &'static str) -> Result<(), ArcwalkError> {
        if self.state != AlgorithmState::Finished {
            return Err(self.violation(operation));
        }
        Ok(())
    }

    /// A parameter changed: configuration must be derived again.
    pub fn invalidate(&mut self, operation: &'static str) -> Result<(), ArcwalkError> {
        self.check_not_running(operation)?;
        self.transition(AlgorithmState::Uninitialized);
        Ok(())
    }

    pub fn parameters_set(&mut self) -> Result<(), ArcwalkError> {
        self.check_not_running("reset parameters")?;
        self.transition(AlgorithmState::ParametersSet);
        Ok(())
    }

    pub fn ready(&mut self) -> Result<(), ArcwalkError> {
        match self.state {
            AlgorithmState::ParametersSet | AlgorithmState::Ready | AlgorithmState::Finished => {
                self.transition(AlgorithmState::Ready);
                Ok(())
            }
            _ => Err(self.violation("reset")),
        }
    }

    pub fn start(&mut self) -> Result<(), ArcwalkError> {
        if self.state != AlgorithmState::Ready {
            return Err(self.violation("execute"));
        }
        self.transition(AlgorithmState::Running);
        Ok(())
    }

    pub fn finish(&mut self) {
        self.transition(AlgorithmState::Finished);
    }
}

// =============================================================================
// PARAMETERS
// =============================================================================

/// Traversal parameters shared by every algorithm.
///
/// Predicates are reference counted so derived solvers can hand the same
/// parameters to the traversals they own.
#[derive(Clone, Default)]
pub struct SearchParameters<'g> {
    pub direction: Direction,
    pub subgraph: Option<Rc<dyn BooleanFunction<GraphElement> + 'g>>,
    pub navigable: Option<Rc<dyn BooleanFunction<Edge> + 'g>>,
}

impl<'g> SearchParameters<'g> {
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Restrict every traversal to elements accepted by `subgraph`.
    #[must_use]
    pub fn with_subgraph(mut self, subgraph: impl BooleanFunction<GraphElement> + 'g) -> Self {
        self.subgraph = Some(Rc::new(subgraph));
        self
    }

    /// Only move the frontier across edges accepted by `navigable`.
    #[must_use]
    pub fn with_navigable(mut self, navigable: impl BooleanFunction<Edge> + 'g) -> Self {
        self.navigable = Some(Rc::new(navigable));
        self
    }
}

impl fmt::Debug for SearchParameters<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchParameters")
            .field("direction", &self.direction)
            .field("subgraph", &self.subgraph.is_some())
            .field("navigable", &self.navigable.is_some())
            .finish()
    }
}

// =============================================================================
// ALGORITHM CORE
// =============================================================================

/// State every algorithm embeds: graph, parameters, lifecycle and the
/// reason the last run stopped early.
pub struct AlgorithmCore<'g, G> {
    graph: &'g G,
    params: SearchParameters<'g>,
    lifecycle: Lifecycle,
    termination: Option<Stop>,
}

impl<'g, G: GraphView> AlgorithmCore<'g, G> {
    #[must_use]
    pub fn new(graph: &'g G, kind: AlgorithmKind) -> Self {
        Self {
            graph,
            params: SearchParameters::default(),
            lifecycle: Lifecycle::new(kind),
            termination: None,
        }
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn parameters(&self) -> &SearchParameters<'g> {
        &self.params
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    pub fn termination(&self) -> Option<&Stop> {
        self.termination.as_ref()
    }

    /// Change parameters, invalidating derived configuration.
    pub fn update(
        &mut self,
        operation: &'static str,
        change: impl FnOnce(&mut SearchParameters<'g>),
    ) -> Result<(), ArcwalkError> {
        self.lifecycle.invalidate(operation)?;
        change(&mut self.params);
        Ok(())
    }

    /// Enter `Running` and forget the previous termination.
    pub fn begin(&mut self) -> Result<(), ArcwalkError> {
        self.lifecycle.start()?;
        self.termination = None;
        Ok(())
    }

    /// Enter `Finished`, recording an early stop. Errors pass through after
    /// the transition so the instance is never left `Running`.
    pub fn conclude(&mut self, outcome: Result<Flow, ArcwalkError>) -> Result<(), ArcwalkError> {
        self.lifecycle.finish();
        match outcome? {
            ControlFlow::Continue(()) => {}
            ControlFlow::Break(stop) => {
                tracing::trace!("{} stopped early: {}", self.lifecycle.kind(), stop);
                self.termination = Some(stop);
            }
        }
        Ok(())
    }

    /// Fail unless `vertex` belongs to the graph.
    pub fn check_vertex(&self, vertex: VertexId) -> Result<(), ArcwalkError> {
        if !self.graph.contains_vertex(vertex) {
            return Err(ArcwalkError::VertexNotFound(vertex));
        }
        Ok(())
    }

    /// Fail with `UnsupportedDirection` when traversing both ways.
    pub fn require_directed(&self) -> Result<(), ArcwalkError> {
        if self.params.direction == Direction::Both {
            return Err(ArcwalkError::UnsupportedDirection {
                algorithm: self.lifecycle.kind(),
                direction: self.params.direction,
            });
        }
        Ok(())
    }

    /// Fail unless `visitor` belongs to a family this algorithm drives.
    pub fn check_visitor(&self, visitor: &AnyVisitor<'_>) -> Result<(), ArcwalkError> {
        self.lifecycle.check_not_running("add visitor")?;
        let family = visitor.family();
        if !self.lifecycle.kind().accepts(family) {
            return Err(ArcwalkError::IncompatibleVisitor {
                algorithm: self.lifecycle.kind(),
                family,
            });
        }
        Ok(())
    }

    pub fn is_vertex_visible(&self, vertex: VertexId) -> bool {
        self.params
            .subgraph
            .as_ref()
            .is_none_or(|subgraph| subgraph.get(GraphElement::Vertex(vertex)))
    }

    pub fn is_edge_visible(&self, edge: Edge) -> bool {
        self.params
            .subgraph
            .as_ref()
            .is_none_or(|subgraph| subgraph.get(GraphElement::Edge(edge)))
    }

    pub fn is_navigable(&self, edge: Edge) -> bool {
        self.params
            .navigable
            .as_ref()
            .is_none_or(|navigable| navigable.get(edge))
    }

    /// Visible vertices in graph iteration order.
    pub fn visible_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.graph
            .vertices()
            .filter(move |vertex| self.is_vertex_visible(*vertex))
    }

    /// Visible incidences of `vertex` in the configured direction whose far
    /// endpoint is visible too.
    pub fn steps(&self, vertex: VertexId) -> impl Iterator<Item = Step> + '_ {
        let graph = self.graph;
        graph
            .incident_edges(vertex, self.params.direction)
            .map(move |edge| Step {
                edge,
                source: vertex,
                target: graph.that(edge),
            })
            .filter(move |step| self.is_edge_visible(step.edge) && self.is_vertex_visible(step.target))
    }

    /// Steps the frontier may move across.
    pub fn usable_steps(&self, vertex: VertexId) -> impl Iterator<Item = Step> + '_ {
        self.steps(vertex)
            .filter(move |step| self.is_navigable(step.edge))
    }
}

impl<G> fmt::Debug for AlgorithmCore<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmCore")
            .field("params", &self.params)
            .field("lifecycle", &self.lifecycle)
            .field("termination", &self.termination)
            .finish()
    }
}

// =============================================================================
// GRAPH ALGORITHM TRAIT
// =============================================================================

/// Operations shared by every algorithm instance.
///
/// Implementors embed an [`AlgorithmCore`]; parameter setters, state queries
/// and the termination record come for free. `execute` is inherent because
/// its inputs differ per algorithm.
pub trait GraphAlgorithm<'g, G: GraphView + 'g> {
    fn core(&self) -> &AlgorithmCore<'g, G>;

    fn core_mut(&mut self) -> &mut AlgorithmCore<'g, G>;

    /// Derive configuration-dependent fields. `Uninitialized -> ParametersSet`.
    fn reset_parameters(&mut self) -> Result<(), ArcwalkError>;

    /// Re-initialize per-run working state. `-> Ready`.
    fn reset(&mut self) -> Result<(), ArcwalkError>;

    /// Attach a visitor. Fails immediately for an incompatible family.
    fn add_visitor(&mut self, visitor: AnyVisitor<'g>) -> Result<(), ArcwalkError>;

    /// Detach every visitor.
    fn clear_visitors(&mut self) -> Result<(), ArcwalkError>;

    fn state(&self) -> AlgorithmState {
        self.core().lifecycle().state()
    }

    fn kind(&self) -> AlgorithmKind {
        self.core().lifecycle().kind()
    }

    fn graph(&self) -> &'g G {
        self.core().graph()
    }

    fn parameters(&self) -> &SearchParameters<'g> {
        self.core().parameters()
    }

    fn direction(&self) -> Direction {
        self.core().parameters().direction
    }

    /// The stop that ended the last run early, if any.
    fn termination<'s>(&'s self) -> Option<&'s Stop>
    where
        'g: 's,
    {
        self.core().termination()
    }

    fn set_parameters(&mut self, params: SearchParameters<'g>) -> Result<(), ArcwalkError> {
        self.core_mut()
            .update("set parameters", |current| *current = params)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), ArcwalkError> {
        self.core_mut()
            .update("set direction", |params| params.direction = direction)
    }

    fn set_subgraph(
        &mut self,
        subgraph: impl BooleanFunction<GraphElement> + 'g,
    ) -> Result<(), ArcwalkError> {
        let subgraph: Rc<dyn BooleanFunction<GraphElement> + 'g> = Rc::new(subgraph);
        self.core_mut()
            .update("set subgraph", |params| params.subgraph = Some(subgraph))
    }

    fn clear_subgraph(&mut self) -> Result<(), ArcwalkError> {
        self.core_mut()
            .update("clear subgraph", |params| params.subgraph = None)
    }

    fn set_navigable(&mut self, navigable: impl BooleanFunction<Edge> + 'g) -> Result<(), ArcwalkError> {
        let navigable: Rc<dyn BooleanFunction<Edge> + 'g> = Rc::new(navigable);
        self.core_mut()
            .update("set navigable", |params| params.navigable = Some(navigable))
    }

    fn clear_navigable(&mut self) -> Result<(), ArcwalkError> {
        self.core_mut()
            .update("clear navigable", |params| params.navigable = None)
    }
}

// =============================================================================
// TESTS
// =============================================================================
