use glauber_core::errors::{ErrorInfo, GlauberError};
use glauber_core::{Color, GraphView, Palette, RngHandle, VertexId};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::coloring::{is_valid, PartialColoring};

/// Kind of move performed by a single step of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveKind {
    /// A colored vertex was uncolored.
    Uncolor,
    /// An uncolored vertex received the proposed color.
    Color,
    /// The proposed color clashed with a neighbor; the state is unchanged.
    Reject,
}

/// Outcome of one application of the transition rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Vertex drawn for the step.
    pub vertex: VertexId,
    /// Move that was applied.
    pub kind: MoveKind,
    /// Removed color for uncolor moves, proposed color otherwise.
    pub color: Color,
}

/// Applies one step of the chain to `coloring` in place.
///
/// A vertex is drawn uniformly. If it is colored its color is removed;
/// otherwise a color is drawn uniformly from the palette and kept only if no
/// neighbor already uses it. Randomness is consumed in that order: vertex,
/// then color only for uncolored vertices.
pub fn step<G: GraphView + ?Sized>(
    graph: &G,
    coloring: &mut PartialColoring,
    palette: Palette,
    rng: &mut RngHandle,
) -> Result<StepOutcome, GlauberError> {
    let vertices: Vec<VertexId> = graph.vertices().collect();
    step_among(graph, &vertices, coloring, palette, rng)
}

/// Same as [`step`] with the vertex list collected once by the caller.
pub(crate) fn step_among<G: GraphView + ?Sized>(
    graph: &G,
    vertices: &[VertexId],
    coloring: &mut PartialColoring,
    palette: Palette,
    rng: &mut RngHandle,
) -> Result<StepOutcome, GlauberError> {
    if vertices.is_empty() {
        return Err(empty_graph());
    }
    let vertex = vertices[rng.gen_range(0..vertices.len())];

    if let Some(color) = coloring.uncolor(vertex) {
        return Ok(StepOutcome {
            vertex,
            kind: MoveKind::Uncolor,
            color,
        });
    }

    let color = Color::from_raw(rng.gen_range(0..palette.size()));
    let kind = if is_valid(graph, coloring, vertex, color)? {
        coloring.assign(vertex, color);
        MoveKind::Color
    } else {
        MoveKind::Reject
    };
    Ok(StepOutcome {
        vertex,
        kind,
        color,
    })
}

pub(crate) fn empty_graph() -> GlauberError {
    GlauberError::Graph(
        ErrorInfo::new("empty-graph", "graph has no vertices to update")
            .with_hint("the chain needs at least one vertex"),
    )
}
