use std::collections::BTreeSet;

use glauber_core::{GlauberError, GraphView, Palette};

use crate::coloring::PartialColoring;
use crate::config::InitialState;

/// Greedy proper coloring in vertex order.
///
/// Each vertex takes the smallest color not used by an already colored
/// neighbor. A vertex whose neighbors exhaust the palette stays uncolored, so
/// the result is always proper but full only when the palette is large
/// enough for this ordering.
pub fn greedy_coloring<G: GraphView + ?Sized>(
    graph: &G,
    palette: Palette,
) -> Result<PartialColoring, GlauberError> {
    let mut coloring = PartialColoring::empty();
    for vertex in graph.vertices() {
        let mut taken = BTreeSet::new();
        for neighbour in graph.neighbors(vertex)? {
            if let Some(color) = coloring.color_of(neighbour) {
                taken.insert(color);
            }
        }
        if let Some(color) = palette.colors().find(|color| !taken.contains(color)) {
            coloring.assign(vertex, color);
        }
    }
    Ok(coloring)
}

/// Materializes the configured starting state.
pub fn initial_coloring<G: GraphView + ?Sized>(
    graph: &G,
    palette: Palette,
    initial: InitialState,
) -> Result<PartialColoring, GlauberError> {
    match initial {
        InitialState::Empty => Ok(PartialColoring::empty()),
        InitialState::Greedy => greedy_coloring(graph, palette),
    }
}
