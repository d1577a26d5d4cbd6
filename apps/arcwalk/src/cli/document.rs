//! # Graph Documents
//!
//! Graphs are described on disk with named vertices:
//!
//! ```toml
//! vertices = ["A", "B", "C"]
//! edges = [["A", "B"], ["B", "C"]]
//! ```
//!
//! The same shape is accepted as JSON when the file ends in `.json`.
//! Vertex ids follow declaration order, edge ids follow edge order.

use arcwalk_core::{ArcwalkError, Edge, Graph, GraphView, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// The on-disk description of a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphDocument {
    pub vertices: Vec<String>,
    pub edges: Vec<(String, String)>,
}

impl GraphDocument {
    /// Parse by file extension: `.json` is JSON, anything else TOML.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ArcwalkError> {
        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(content)
                .map_err(|e| ArcwalkError::SerializationError(format!("Invalid graph JSON: {}", e)))
        } else {
            toml::from_str(content)
                .map_err(|e| ArcwalkError::SerializationError(format!("Invalid graph TOML: {}", e)))
        }
    }
}

/// A graph together with the names of its vertices.
#[derive(Debug)]
pub struct NamedGraph {
    graph: Graph,
    names: Vec<String>,
    index: HashMap<String, VertexId>,
}

impl NamedGraph {
    pub fn from_document(document: GraphDocument) -> Result<Self, ArcwalkError> {
        let mut graph = Graph::new();
        let mut index = HashMap::with_capacity(document.vertices.len());

        for name in &document.vertices {
            let vertex = graph.add_vertex();
            if index.insert(name.clone(), vertex).is_some() {
                return Err(ArcwalkError::InvalidConfig(format!(
                    "Vertex '{}' is declared twice",
                    name
                )));
            }
        }

        let mut named = Self {
            graph,
            names: document.vertices,
            index,
        };
        for (alpha, omega) in &document.edges {
            let (alpha, omega) = (named.vertex(alpha)?, named.vertex(omega)?);
            named.graph.add_edge(alpha, omega)?;
        }

        tracing::debug!(
            "Loaded graph: {} vertices, {} edges",
            named.graph.vertex_count(),
            named.graph.edge_count()
        );
        Ok(named)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Resolve a vertex by name.
    pub fn vertex(&self, name: &str) -> Result<VertexId, ArcwalkError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ArcwalkError::InvalidConfig(format!("Unknown vertex '{}'", name)))
    }

    pub fn name(&self, vertex: VertexId) -> &str {
        vertex
            .index()
            .checked_sub(1)
            .and_then(|slot| self.names.get(slot))
            .map_or("?", String::as_str)
    }

    pub fn names(&self, vertices: impl IntoIterator<Item = VertexId>) -> Vec<String> {
        vertices
            .into_iter()
            .map(|vertex| self.name(vertex).to_string())
            .collect()
    }

    /// `"A -> B"`, in the orientation the edge was traversed.
    pub fn describe(&self, edge: Edge) -> String {
        format!(
            "{} -> {}",
            self.name(self.graph.this(edge)),
            self.name(self.graph.that(edge))
        )
    }
}

/// Read and resolve a graph file.
pub fn load_graph(path: &Path) -> Result<NamedGraph, ArcwalkError> {
    let content = super::commands::read_input(path)?;
    NamedGraph::from_document(GraphDocument::parse(path, &content)?)
}
