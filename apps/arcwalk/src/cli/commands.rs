//! # CLI Command Implementations
//!
//! Each command builds a JSON report; `execute` prints it as JSON or text.

use super::{NamedGraph, TopologicalMethod, TraversalKind};
use arcwalk_core::visitor::{DfsVisitor, SearchVisitor, Step};
use arcwalk_core::{
    AcyclicityWithDfs, AnyVisitor, ArcwalkError, DepthFirstSearch, Direction, Flow, FrontierKind,
    FrontierSearch, GraphAlgorithm, GraphView, ReachableWithSearch, SearchConfig,
    SearchParameters, SearchState, Stop, TopologicalOrderWithDegree, TopologicalOrderWithDfs,
    TransitiveClosure, VertexId, VisitLimit, verify_acyclicity,
};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::rc::Rc;

// =============================================================================
// FILE LOADING
// =============================================================================

/// Maximum size of a graph or configuration file (100 MB).
///
/// This prevents memory exhaustion from accidental large files.
const MAX_INPUT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), ArcwalkError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ArcwalkError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(ArcwalkError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve `path` to a canonical regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, ArcwalkError> {
    let canonical = path.canonicalize().map_err(|e| {
        ArcwalkError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ArcwalkError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read a whole input file after validating it.
pub fn read_input(path: &Path) -> Result<String, ArcwalkError> {
    let path = validate_file_path(path)?;
    validate_file_size(&path, MAX_INPUT_FILE_SIZE)?;
    std::fs::read_to_string(&path)
        .map_err(|e| ArcwalkError::IoError(format!("Cannot read '{}': {}", path.display(), e)))
}

/// Load and validate a TOML search configuration; defaults when absent.
pub fn load_config(path: Option<&Path>) -> Result<SearchConfig, ArcwalkError> {
    let Some(path) = path else {
        return Ok(SearchConfig::default());
    };
    let content = read_input(path)?;
    let config: SearchConfig = toml::from_str(&content)
        .map_err(|e| ArcwalkError::InvalidConfig(format!("Invalid search config: {}", e)))?;
    config.validate()?;
    tracing::debug!("Search config: {:?}", config);
    Ok(config)
}

fn parameters<'g>(config: &SearchConfig) -> SearchParameters<'g> {
    SearchParameters::new(config.direction)
}

fn stopped(termination: Option<&Stop>) -> Value {
    termination.map_or(Value::Null, |stop| json!(stop.reason()))
}

fn levels(graph: &NamedGraph, state: &SearchState) -> Value {
    let levels: serde_json::Map<String, Value> = graph
        .graph()
        .vertices()
        .filter_map(|vertex| {
            state
                .level(vertex)
                .map(|level| (graph.name(vertex).to_string(), json!(level)))
        })
        .collect();
    Value::Object(levels)
}

fn insert(report: &mut Value, key: &str, value: Value) {
    if let Some(object) = report.as_object_mut() {
        object.insert(key.to_string(), value);
    }
}

// =============================================================================
// TRAVERSE COMMAND
// =============================================================================

/// Run a traversal and report its visit order.
pub fn cmd_traverse(
    graph: &NamedGraph,
    config: &SearchConfig,
    kind: TraversalKind,
    root: Option<&str>,
    verbose: bool,
) -> Result<Value, ArcwalkError> {
    let root = root.map(|name| graph.vertex(name)).transpose()?;

    match kind {
        TraversalKind::Bfs => {
            let config = SearchConfig {
                frontier: FrontierKind::Queue,
                ..*config
            };
            frontier_report(graph, &config, root, verbose)
        }
        TraversalKind::Frontier => frontier_report(graph, config, root, verbose),
        TraversalKind::Dfs => dfs_report(graph, config, root, verbose),
    }
}

fn frontier_report(
    graph: &NamedGraph,
    config: &SearchConfig,
    root: Option<VertexId>,
    verbose: bool,
) -> Result<Value, ArcwalkError> {
    let mut search = FrontierSearch::from_config(graph.graph(), config)?;
    search.reset()?;
    match root {
        Some(root) => search.execute_from(root)?,
        None => search.execute()?,
    }

    let state = search.search_state()?;
    let mut report = json!({
        "algorithm": search.kind().to_string(),
        "direction": config.direction.to_string(),
        "order": graph.names(state.vertex_order().iter()),
        "stopped": stopped(search.termination()),
    });
    if verbose {
        insert(&mut report, "levels", levels(graph, state));
    }
    tracing::info!("Traversal visited {} vertices", state.visited_count());
    Ok(report)
}

/// Counts DFS arc classes for the report.
#[derive(Debug, Default)]
struct ArcCounts {
    tree: usize,
    forward: usize,
    cross: usize,
    back: Vec<Step>,
}

impl SearchVisitor for ArcCounts {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn visit_tree_edge(&mut self, _step: Step, _state: &SearchState) -> Flow {
        self.tree += 1;
        ControlFlow::Continue(())
    }
}

impl DfsVisitor for ArcCounts {
    fn visit_forward_edge(&mut self, _step: Step, _state: &SearchState) -> Flow {
        self.forward += 1;
        ControlFlow::Continue(())
    }

    fn visit_back_edge(&mut self, step: Step, _state: &SearchState) -> Flow {
        self.back.push(step);
        ControlFlow::Continue(())
    }

    fn visit_cross_edge(&mut self, _step: Step, _state: &SearchState) -> Flow {
        self.cross += 1;
        ControlFlow::Continue(())
    }
}

fn dfs_report(
    graph: &NamedGraph,
    config: &SearchConfig,
    root: Option<VertexId>,
    verbose: bool,
) -> Result<Value, ArcwalkError> {
    let arcs = Rc::new(RefCell::new(ArcCounts::default()));
    let mut dfs = DepthFirstSearch::new(graph.graph());
    dfs.set_parameters(parameters(config))?;
    dfs.add_visitor(AnyVisitor::depth_first(Rc::clone(&arcs)))?;
    if let Some(limit) = config.max_visits {
        dfs.add_visitor(AnyVisitor::search(VisitLimit::new(limit)))?;
    }
    dfs.reset_parameters()?;
    dfs.reset()?;
    match root {
        Some(root) => dfs.execute_from(root)?,
        None => dfs.execute()?,
    }

    let state = dfs.search_state()?;
    let arcs = arcs.borrow();
    let mut report = json!({
        "algorithm": dfs.kind().to_string(),
        "direction": config.direction.to_string(),
        "order": graph.names(state.vertex_order().iter()),
        "completion_order": graph.names(state.completion_order().iter()),
        "arcs": {
            "tree": arcs.tree,
            "back": arcs.back.len(),
            "forward": arcs.forward,
            "cross": arcs.cross,
        },
        "stopped": stopped(dfs.termination()),
    });
    if verbose {
        let back: Vec<String> = arcs.back.iter().map(|step| graph.describe(step.edge)).collect();
        insert(&mut report, "back_edges", json!(back));
        insert(&mut report, "levels", levels(graph, state));
    }
    Ok(report)
}

// =============================================================================
// REACH COMMAND
// =============================================================================

/// Decide whether `from` reaches `to`.
pub fn cmd_reach(
    graph: &NamedGraph,
    config: &SearchConfig,
    from: &str,
    to: &str,
) -> Result<Value, ArcwalkError> {
    let (start, target) = (graph.vertex(from)?, graph.vertex(to)?);

    let mut reach = ReachableWithSearch::new(graph.graph());
    reach.set_parameters(parameters(config))?;
    reach.reset_parameters()?;
    reach.reset()?;
    let reachable = reach.execute(start, target)?.is_reachable()?;

    Ok(json!({
        "from": from,
        "to": to,
        "direction": config.direction.to_string(),
        "reachable": reachable,
        "explored": reach.search_state()?.visited_count(),
    }))
}

// =============================================================================
// CLOSURE COMMAND
// =============================================================================

fn closure_of<'g>(
    graph: &'g NamedGraph,
    config: &SearchConfig,
) -> Result<TransitiveClosure<'g, arcwalk_core::Graph>, ArcwalkError> {
    let mut closure = TransitiveClosure::new(graph.graph());
    closure.set_parameters(parameters(config))?;
    closure.reset_parameters()?;
    closure.reset()?;
    closure.execute()?;
    Ok(closure)
}

/// Report, for every vertex, the other vertices it reaches.
pub fn cmd_closure(graph: &NamedGraph, config: &SearchConfig) -> Result<Value, ArcwalkError> {
    let closure = closure_of(graph, config)?;
    let view = closure.reachability()?;
    let vertices: Vec<VertexId> = graph.graph().vertices().collect();

    let mut pairs = 0;
    let mut reaches = serde_json::Map::new();
    for &source in &vertices {
        let targets: Vec<VertexId> = vertices
            .iter()
            .copied()
            .filter(|&target| target != source && view.reachable(source, target))
            .collect();
        pairs += targets.len();
        reaches.insert(graph.name(source).to_string(), json!(graph.names(targets)));
    }

    tracing::info!("Closure: {} reachable pairs", pairs);
    Ok(json!({
        "direction": config.direction.to_string(),
        "pairs": pairs,
        "reaches": reaches,
    }))
}

/// Report one path out of the closure.
pub fn cmd_path(
    graph: &NamedGraph,
    config: &SearchConfig,
    from: &str,
    to: &str,
) -> Result<Value, ArcwalkError> {
    let (source, target) = (graph.vertex(from)?, graph.vertex(to)?);
    let closure = closure_of(graph, config)?;
    let path = closure.path(source, target)?;

    Ok(json!({
        "from": from,
        "to": to,
        "reachable": path.is_some(),
        "path": path.map(|edges| {
            edges
                .into_iter()
                .map(|edge| graph.describe(edge))
                .collect::<Vec<_>>()
        }),
    }))
}

// =============================================================================
// TOPOSORT COMMAND
// =============================================================================

/// Order the vertices topologically with the chosen solver.
pub fn cmd_toposort(
    graph: &NamedGraph,
    config: &SearchConfig,
    method: TopologicalMethod,
) -> Result<Value, ArcwalkError> {
    match method {
        TopologicalMethod::Degree => {
            let mut kahn = TopologicalOrderWithDegree::new(graph.graph());
            kahn.set_parameters(parameters(config))?;
            kahn.reset_parameters()?;
            kahn.reset()?;
            kahn.execute()?;

            let acyclic = kahn.is_acyclic()?;
            let mut report = json!({
                "algorithm": kahn.kind().to_string(),
                "acyclic": acyclic,
                "order": graph.names(kahn.order()?.iter()),
            });
            if !acyclic {
                insert(&mut report, "blocked", json!(graph.names(kahn.blocked()?)));
            }
            Ok(report)
        }
        TopologicalMethod::Dfs => {
            let mut sort = TopologicalOrderWithDfs::new(graph.graph());
            sort.set_parameters(parameters(config))?;
            sort.reset_parameters()?;
            sort.reset()?;
            sort.execute()?;

            Ok(json!({
                "algorithm": sort.kind().to_string(),
                "acyclic": sort.is_acyclic()?,
                "order": graph.names(sort.order()?.iter()),
                "cycle_edge": sort.cycle_witness()?.map(|edge| graph.describe(edge)),
            }))
        }
    }
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Decide acyclicity. Directed graphs are cross-checked by both topological
/// solvers; undirected traversal uses the DFS detector alone.
pub fn cmd_check(graph: &NamedGraph, config: &SearchConfig) -> Result<Value, ArcwalkError> {
    if config.direction == Direction::Both {
        let mut check = AcyclicityWithDfs::new(graph.graph());
        check.set_parameters(parameters(config))?;
        check.reset_parameters()?;
        check.reset()?;
        check.execute()?;

        return Ok(json!({
            "method": check.kind().to_string(),
            "direction": config.direction.to_string(),
            "acyclic": check.is_acyclic()?,
            "cycle_edge": check.cycle_witness()?.map(|edge| graph.describe(edge)),
        }));
    }

    let acyclic = verify_acyclicity(graph.graph(), &parameters(config))?;
    Ok(json!({
        "method": "cross-check",
        "direction": config.direction.to_string(),
        "acyclic": acyclic,
    }))
}

// =============================================================================
// TEXT OUTPUT
// =============================================================================

/// Render a report as indented `key: value` lines. Null fields are skipped.
pub fn render_text(report: &Value) -> String {
    let mut out = String::new();
    render_into(&mut out, report, 0);
    out
}

fn render_into(out: &mut String, value: &Value, depth: usize) {
    let pad = "  ".repeat(depth);
    let Some(object) = value.as_object() else {
        out.push_str(&format!("{}{}\n", pad, scalar(value)));
        return;
    };

    for (key, value) in object {
        match value {
            Value::Null => {}
            Value::Object(_) => {
                out.push_str(&format!("{}{}:\n", pad, key));
                render_into(out, value, depth + 1);
            }
            _ => out.push_str(&format!("{}{}: {}\n", pad, key, scalar(value))),
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
