use glauber_core::{Color, GlauberError, GraphView, Palette, VertexId};
use serde::{Deserialize, Serialize};

use crate::coloring::{is_valid, PartialColoring};
use crate::moves::empty_graph;

/// Move that produces a [`Transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TransitionKind {
    /// `vertex` loses its color.
    Uncolor {
        /// Vertex being uncolored.
        vertex: VertexId,
    },
    /// `vertex` receives `color`.
    Color {
        /// Vertex being colored.
        vertex: VertexId,
        /// Color assigned to the vertex.
        color: Color,
    },
    /// Aggregate of every rejected color proposal.
    SelfLoop,
}

/// One possible next state together with its one-step probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// State reached by the move.
    pub next: PartialColoring,
    /// Probability of this move out of the source state.
    pub probability: f64,
    /// Move that leads to `next`.
    pub kind: TransitionKind,
}

/// Exact one-step distribution out of a coloring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionDistribution {
    entries: Vec<Transition>,
}

impl TransitionDistribution {
    /// Every entry, in vertex order, followed by the self-loop.
    pub fn entries(&self) -> &[Transition] {
        &self.entries
    }

    /// Consumes the distribution and returns its entries.
    pub fn into_entries(self) -> Vec<Transition> {
        self.entries
    }

    /// Number of entries, self-loop included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the distribution has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry probabilities.
    pub fn total_mass(&self) -> f64 {
        self.entries.iter().map(|entry| entry.probability).sum()
    }

    /// Probability of the self-loop entry.
    pub fn self_loop_probability(&self) -> f64 {
        self.entries
            .iter()
            .filter(|entry| entry.kind == TransitionKind::SelfLoop)
            .map(|entry| entry.probability)
            .sum()
    }

    /// Total probability of moving to `next`, summed over every entry reaching it.
    pub fn probability_of(&self, next: &PartialColoring) -> f64 {
        self.entries
            .iter()
            .filter(|entry| &entry.next == next)
            .map(|entry| entry.probability)
            .sum()
    }
}

/// Lists every state reachable from `coloring` in one step, with its probability.
///
/// Each colored vertex contributes an uncolor entry of weight `1/n`. Each
/// uncolored vertex contributes a color entry of weight `1/(n*k)` for every
/// color its neighbors leave free; the weight of blocked colors is collected
/// into a single trailing self-loop entry, emitted even when it is zero.
pub fn enumerate_transitions<G: GraphView + ?Sized>(
    graph: &G,
    coloring: &PartialColoring,
    colors: u32,
) -> Result<TransitionDistribution, GlauberError> {
    let palette = Palette::new(colors)?;
    enumerate_with_palette(graph, coloring, palette)
}

pub(crate) fn enumerate_with_palette<G: GraphView + ?Sized>(
    graph: &G,
    coloring: &PartialColoring,
    palette: Palette,
) -> Result<TransitionDistribution, GlauberError> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(empty_graph());
    }
    let uncolor_weight = 1.0 / n as f64;
    let attempts = (n as u64) * u64::from(palette.size());
    let attempt_weight = 1.0 / attempts as f64;

    let mut entries = Vec::new();
    let mut rejected = 0u64;
    for vertex in graph.vertices() {
        if coloring.is_colored(vertex) {
            entries.push(Transition {
                next: coloring.without(vertex),
                probability: uncolor_weight,
                kind: TransitionKind::Uncolor { vertex },
            });
            continue;
        }
        for color in palette.colors() {
            if is_valid(graph, coloring, vertex, color)? {
                entries.push(Transition {
                    next: coloring.with_color(vertex, color),
                    probability: attempt_weight,
                    kind: TransitionKind::Color { vertex, color },
                });
            } else {
                rejected += 1;
            }
        }
    }
    entries.push(Transition {
        next: coloring.clone(),
        probability: rejected as f64 / attempts as f64,
        kind: TransitionKind::SelfLoop,
    });

    Ok(TransitionDistribution { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glauber_graph::AdjacencyGraph;

    #[test]
    fn uncolor_entries_weigh_one_over_n() {
        let graph = AdjacencyGraph::from_edges(2, &[(0, 1)]).unwrap();
        let coloring: PartialColoring = [(VertexId::from_raw(0), Color::from_raw(0))]
            .into_iter()
            .collect();
        let dist = enumerate_transitions(&graph, &coloring, 2).unwrap();
        // uncolor v0 (1/2), v1 takes color 1 (1/4), v1 blocked on color 0 (1/4)
        assert_eq!(dist.len(), 3);
        assert!((dist.probability_of(&PartialColoring::empty()) - 0.5).abs() < 1e-12);
        assert!((dist.self_loop_probability() - 0.25).abs() < 1e-12);
        assert!((dist.total_mass() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_palette_is_rejected() {
        let graph = AdjacencyGraph::with_vertices(1);
        let err = enumerate_transitions(&graph, &PartialColoring::empty(), 0).unwrap_err();
        assert_eq!(err.code(), "invalid-palette");
    }
}
