use std::collections::BTreeMap;

use glauber_core::errors::{ErrorInfo, GlauberError};
use glauber_core::{Color, GraphView, Palette, VertexId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Single `(vertex, color)` entry of a [`PartialColoring`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Colored vertex.
    pub vertex: VertexId,
    /// Color assigned to the vertex.
    pub color: Color,
}

/// Assignment of colors to a subset of the vertices of a graph.
///
/// Uncolored vertices are absent from the map. Entries are kept sorted by
/// vertex, so structural equality and hashing do not depend on the order in
/// which vertices were colored.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Assignment>", into = "Vec<Assignment>")]
pub struct PartialColoring {
    assignments: BTreeMap<VertexId, Color>,
}

impl PartialColoring {
    /// Returns the empty coloring.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the color of `vertex`, if it is colored.
    pub fn color_of(&self, vertex: VertexId) -> Option<Color> {
        self.assignments.get(&vertex).copied()
    }

    /// Returns whether `vertex` is colored.
    pub fn is_colored(&self, vertex: VertexId) -> bool {
        self.assignments.contains_key(&vertex)
    }

    /// Number of colored vertices.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns whether no vertex is colored.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterates over the assignments in ascending vertex order.
    pub fn iter(&self) -> impl Iterator<Item = Assignment> + '_ {
        self.assignments
            .iter()
            .map(|(&vertex, &color)| Assignment { vertex, color })
    }

    /// Colors `vertex` in place, returning its previous color.
    pub fn assign(&mut self, vertex: VertexId, color: Color) -> Option<Color> {
        self.assignments.insert(vertex, color)
    }

    /// Uncolors `vertex` in place, returning the color it had.
    pub fn uncolor(&mut self, vertex: VertexId) -> Option<Color> {
        self.assignments.remove(&vertex)
    }

    /// Returns a copy with `vertex` set to `color`.
    pub fn with_color(&self, vertex: VertexId, color: Color) -> Self {
        let mut next = self.clone();
        next.assign(vertex, color);
        next
    }

    /// Returns a copy with `vertex` removed.
    pub fn without(&self, vertex: VertexId) -> Self {
        let mut next = self.clone();
        next.uncolor(vertex);
        next
    }

    /// Returns whether every vertex of `graph` is colored.
    pub fn is_full<G: GraphView + ?Sized>(&self, graph: &G) -> bool {
        self.len() == graph.vertex_count()
            && graph.vertices().all(|vertex| self.is_colored(vertex))
    }

    /// SHA-256 digest of the sorted assignments, hex encoded.
    pub fn canonical_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.assignments.len() as u64).to_le_bytes());
        for (vertex, color) in &self.assignments {
            hasher.update(vertex.as_raw().to_le_bytes());
            hasher.update(color.as_raw().to_le_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

impl FromIterator<(VertexId, Color)> for PartialColoring {
    fn from_iter<I: IntoIterator<Item = (VertexId, Color)>>(iter: I) -> Self {
        Self {
            assignments: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<Vec<Assignment>> for PartialColoring {
    type Error = GlauberError;

    fn try_from(value: Vec<Assignment>) -> Result<Self, Self::Error> {
        let mut coloring = PartialColoring::empty();
        for Assignment { vertex, color } in value {
            if let Some(previous) = coloring.assign(vertex, color) {
                return Err(GlauberError::Coloring(
                    ErrorInfo::new("duplicate-vertex", "vertex is colored more than once")
                        .with_context("vertex", vertex.to_string())
                        .with_context("first", previous.to_string())
                        .with_context("second", color.to_string()),
                ));
            }
        }
        Ok(coloring)
    }
}

impl From<PartialColoring> for Vec<Assignment> {
    fn from(value: PartialColoring) -> Self {
        value.iter().collect()
    }
}

/// Returns whether `vertex` may take `color` given the current coloring.
///
/// The check fails exactly when some neighbor of `vertex` is colored with
/// `color`. `vertex` itself is expected to be uncolored in `coloring`.
pub fn is_valid<G: GraphView + ?Sized>(
    graph: &G,
    coloring: &PartialColoring,
    vertex: VertexId,
    color: Color,
) -> Result<bool, GlauberError> {
    for neighbour in graph.neighbors(vertex)? {
        if coloring.color_of(neighbour) == Some(color) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Checks that `coloring` only uses vertices of `graph`, colors of `palette`,
/// and never gives two adjacent vertices the same color.
pub fn validate_coloring<G: GraphView + ?Sized>(
    graph: &G,
    coloring: &PartialColoring,
    palette: Palette,
) -> Result<(), GlauberError> {
    for Assignment { vertex, color } in coloring.iter() {
        if !graph.contains_vertex(vertex) {
            return Err(GlauberError::Coloring(
                ErrorInfo::new("unknown-vertex", "colored vertex is not part of the graph")
                    .with_context("vertex", vertex.to_string()),
            ));
        }
        if !palette.contains(color) {
            return Err(GlauberError::Coloring(
                ErrorInfo::new("color-out-of-range", "color exceeds the palette")
                    .with_context("vertex", vertex.to_string())
                    .with_context("color", color.to_string())
                    .with_context("colors", palette.size().to_string()),
            ));
        }
        for neighbour in graph.neighbors(vertex)? {
            // self-adjacency never conflicts: the kernel only tests uncolored vertices
            if neighbour != vertex && coloring.color_of(neighbour) == Some(color) {
                return Err(GlauberError::Coloring(
                    ErrorInfo::new("improper-coloring", "adjacent vertices share a color")
                        .with_context("vertex", vertex.to_string())
                        .with_context("neighbor", neighbour.to_string())
                        .with_context("color", color.to_string()),
                ));
            }
        }
    }
    Ok(())
}

/// Returns whether no two adjacent colored vertices share a color.
pub fn is_proper<G: GraphView + ?Sized>(
    graph: &G,
    coloring: &PartialColoring,
) -> Result<bool, GlauberError> {
    for Assignment { vertex, color } in coloring.iter() {
        for neighbour in graph.neighbors(vertex)? {
            if neighbour != vertex && coloring.color_of(neighbour) == Some(color) {
                return Ok(false);
            }
        }
    }
    Ok(true)
}
