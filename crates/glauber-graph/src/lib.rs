#![deny(missing_docs)]
#![doc = "Undirected adjacency-list graphs implementing the `glauber-core` graph contract."]

mod adjacency;
mod hash;
mod ids;
mod serialization;

pub use adjacency::AdjacencyGraph;
pub use hash::canonical_hash;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
