use std::collections::{BTreeMap, BTreeSet};

use glauber_core::{
    errors::{ErrorInfo, GlauberError},
    GraphView, SchemaVersion, VertexId,
};

use crate::ids::{canonical_edge, make_vertex};

/// Undirected, unweighted, loop-free graph stored as sorted adjacency sets.
///
/// Vertex iteration follows ascending [`VertexId`] order, which keeps every
/// random vertex draw reproducible for a fixed seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    adjacency: BTreeMap<VertexId, BTreeSet<VertexId>>,
    schema_version: SchemaVersion,
}

impl AdjacencyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
            schema_version: SchemaVersion::new(1, 0, 0),
        }
    }

    /// Creates a graph with vertices `0..count` and no edges.
    pub fn with_vertices(count: usize) -> Self {
        let mut graph = Self::new();
        for index in 0..count {
            graph.adjacency.insert(make_vertex(index), BTreeSet::new());
        }
        graph
    }

    /// Creates a graph with vertices `0..count` and the provided edges.
    pub fn from_edges(count: usize, edges: &[(u64, u64)]) -> Result<Self, GlauberError> {
        let mut graph = Self::with_vertices(count);
        for &(a, b) in edges {
            graph.add_edge(VertexId::from_raw(a), VertexId::from_raw(b))?;
        }
        Ok(graph)
    }

    /// Returns the schema version stored alongside serialized payloads.
    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }

    /// Adds an isolated vertex with the given identifier.
    pub fn add_vertex(&mut self, vertex: VertexId) -> Result<(), GlauberError> {
        if self.adjacency.contains_key(&vertex) {
            return Err(graph_error("duplicate-vertex", "vertex already exists")
                .with_context("vertex", vertex));
        }
        self.adjacency.insert(vertex, BTreeSet::new());
        Ok(())
    }

    /// Adds an undirected edge between two existing, distinct vertices.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<(), GlauberError> {
        if a == b {
            return Err(
                graph_error("self-loop", "vertex cannot be adjacent to itself")
                    .with_context("vertex", a),
            );
        }
        self.ensure_vertex(a)?;
        self.ensure_vertex(b)?;
        if self.has_edge(a, b) {
            let (lo, hi) = canonical_edge(a, b);
            return Err(graph_error("duplicate-edge", "edge already exists")
                .with_context("a", lo)
                .with_context("b", hi));
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        Ok(())
    }

    /// Removes the undirected edge between two vertices.
    pub fn remove_edge(&mut self, a: VertexId, b: VertexId) -> Result<(), GlauberError> {
        if !self.has_edge(a, b) {
            let (lo, hi) = canonical_edge(a, b);
            return Err(graph_error("unknown-edge", "edge does not exist")
                .with_context("a", lo)
                .with_context("b", hi));
        }
        if let Some(set) = self.adjacency.get_mut(&a) {
            set.remove(&b);
        }
        if let Some(set) = self.adjacency.get_mut(&b) {
            set.remove(&a);
        }
        Ok(())
    }

    /// Returns whether the two vertices are adjacent.
    pub fn has_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.adjacency
            .get(&a)
            .map(|set| set.contains(&b))
            .unwrap_or(false)
    }

    /// Returns the degree of the provided vertex.
    pub fn degree(&self, vertex: VertexId) -> Result<usize, GlauberError> {
        Ok(self.adjacent(vertex)?.len())
    }

    /// Returns the number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Returns every edge once, endpoints ordered, in ascending order.
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (vertex, neighbours) in &self.adjacency {
            for neighbour in neighbours.range(vertex..) {
                if neighbour != vertex {
                    edges.push((*vertex, *neighbour));
                }
            }
        }
        edges
    }

    fn adjacent(&self, vertex: VertexId) -> Result<&BTreeSet<VertexId>, GlauberError> {
        self.adjacency.get(&vertex).ok_or_else(|| {
            graph_error("unknown-vertex", "vertex does not exist").with_context("vertex", vertex)
        })
    }

    fn ensure_vertex(&self, vertex: VertexId) -> Result<(), GlauberError> {
        self.adjacent(vertex).map(|_| ())
    }
}

impl Default for AdjacencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphView for AdjacencyGraph {
    fn vertices(&self) -> Box<dyn ExactSizeIterator<Item = VertexId> + '_> {
        Box::new(self.adjacency.keys().copied())
    }

    fn neighbors(
        &self,
        vertex: VertexId,
    ) -> Result<Box<dyn Iterator<Item = VertexId> + '_>, GlauberError> {
        Ok(Box::new(self.adjacent(vertex)?.iter().copied()))
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.adjacency.contains_key(&vertex)
    }
}

fn graph_error(code: impl Into<String>, message: impl Into<String>) -> GlauberError {
    GlauberError::Graph(ErrorInfo::new(code, message))
}

trait ContextExt {
    fn with_context(self, key: impl Into<String>, value: impl ToString) -> GlauberError;
}

impl ContextExt for GlauberError {
    fn with_context(self, key: impl Into<String>, value: impl ToString) -> GlauberError {
        match self {
            GlauberError::Graph(info) => {
                GlauberError::Graph(info.with_context(key, value.to_string()))
            }
            other => other,
        }
    }
}
