use glauber_core::{GlauberError, GraphView};
use sha2::{Digest, Sha256};

/// Computes the canonical structural hash of any graph view.
///
/// The digest covers the sorted vertex set and every undirected edge once,
/// so two views with the same adjacency hash identically regardless of the
/// order in which their edges were inserted.
pub fn canonical_hash<G: GraphView + ?Sized>(graph: &G) -> Result<String, GlauberError> {
    let mut hasher = Sha256::new();

    let mut vertices: Vec<_> = graph.vertices().collect();
    vertices.sort();
    hasher.update((vertices.len() as u64).to_le_bytes());
    for vertex in &vertices {
        hasher.update(vertex.as_raw().to_le_bytes());
    }

    let mut edges = Vec::new();
    for &vertex in &vertices {
        for neighbour in graph.neighbors(vertex)? {
            if vertex < neighbour {
                edges.push((vertex, neighbour));
            }
        }
    }
    edges.sort();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (a, b) in edges {
        hasher.update(a.as_raw().to_le_bytes());
        hasher.update(b.as_raw().to_le_bytes());
    }

    Ok(format!("{:x}", hasher.finalize()))
}
