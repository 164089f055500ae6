#![deny(missing_docs)]
#![doc = "Core traits and data types for the Glauber coloring sampler: vertex and color identifiers, the read-only graph contract, structured errors and deterministic seeding."]

use std::iter::ExactSizeIterator;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod provenance;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, GlauberError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
pub use types::{Color, Palette};

/// Identifier for a vertex within a [`GraphView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(u64);

impl VertexId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Read-only adjacency contract consumed by the sampler.
///
/// Adjacency is undirected: whenever `u` is listed among the neighbors of `v`,
/// `v` must be listed among the neighbors of `u`. Any weights carried by the
/// underlying structure are not part of this contract.
pub trait GraphView: Send + Sync {
    /// Returns an iterator over all vertex identifiers, in a stable order.
    fn vertices(&self) -> Box<dyn ExactSizeIterator<Item = VertexId> + '_>;

    /// Returns the neighbors of the provided vertex.
    fn neighbors(
        &self,
        vertex: VertexId,
    ) -> Result<Box<dyn Iterator<Item = VertexId> + '_>, GlauberError>;

    /// Returns the number of vertices in the graph.
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Returns whether the vertex belongs to the graph.
    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices().any(|candidate| candidate == vertex)
    }
}
