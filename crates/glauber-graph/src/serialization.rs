use glauber_core::errors::{ErrorInfo, GlauberError};
use glauber_core::provenance::SchemaVersion;
use glauber_core::{GraphView, VertexId};
use serde::{Deserialize, Serialize};

use crate::adjacency::AdjacencyGraph;

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &AdjacencyGraph) -> Result<Vec<u8>, GlauberError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| GlauberError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<AdjacencyGraph, GlauberError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes).map_err(|err| {
        GlauberError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string()))
    })?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &AdjacencyGraph) -> Result<String, GlauberError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| GlauberError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json(json: &str) -> Result<AdjacencyGraph, GlauberError> {
    let serializable: SerializableGraph = serde_json::from_str(json).map_err(|err| {
        GlauberError::Serde(ErrorInfo::new("deserialize-json", err.to_string()))
    })?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    schema_version: SchemaVersion,
    vertices: Vec<u64>,
    edges: Vec<(u64, u64)>,
}

impl SerializableGraph {
    fn from_graph(graph: &AdjacencyGraph) -> Self {
        Self {
            schema_version: graph.schema_version(),
            vertices: graph.vertices().map(|vertex| vertex.as_raw()).collect(),
            edges: graph
                .edges()
                .into_iter()
                .map(|(a, b)| (a.as_raw(), b.as_raw()))
                .collect(),
        }
    }

    fn into_graph(self) -> Result<AdjacencyGraph, GlauberError> {
        let supported = AdjacencyGraph::new().schema_version();
        if self.schema_version.major != supported.major {
            return Err(GlauberError::Serde(
                ErrorInfo::new("schema-mismatch", "unsupported graph schema version")
                    .with_context("found", format!("{:?}", self.schema_version))
                    .with_context("expected_major", supported.major.to_string()),
            ));
        }
        let mut graph = AdjacencyGraph::new();
        for raw in self.vertices {
            graph.add_vertex(VertexId::from_raw(raw))?;
        }
        for (a, b) in self.edges {
            graph.add_edge(VertexId::from_raw(a), VertexId::from_raw(b))?;
        }
        Ok(graph)
    }
}
