use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;

use glauber_core::errors::{ErrorInfo, GlauberError};
use glauber_core::{GraphView, Palette};
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::coloring::PartialColoring;
use crate::enumerate::{enumerate_with_palette, TransitionKind};
use crate::manifest::write_json;

/// Reachable coloring stored on a node of the [`TransitionGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateNode {
    /// Discovery order of the state; the empty coloring is 0.
    pub index: usize,
    /// Coloring represented by the node.
    pub coloring: PartialColoring,
    /// Canonical hash of `coloring`.
    pub hash: String,
}

impl StateNode {
    fn new(index: usize, coloring: PartialColoring) -> Self {
        let hash = coloring.canonical_hash();
        Self {
            index,
            coloring,
            hash,
        }
    }
}

/// One enumerated move between two states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionEdge {
    /// One-step probability of the move.
    pub probability: f64,
    /// Move the edge stands for.
    pub kind: TransitionKind,
}

/// Bounds applied while exploring the state space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSpaceConfig {
    /// Maximum number of states to discover. `None` explores everything.
    #[serde(default)]
    pub state_limit: Option<usize>,
}

/// Size summary of a [`TransitionGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSpaceStats {
    /// Number of distinct states.
    pub state_count: usize,
    /// Number of edges, self-loops included.
    pub edge_count: usize,
    /// Number of states in which every vertex is colored.
    pub full_states: usize,
    /// Largest number of colored vertices over all states.
    pub max_colored: usize,
    /// Whether exploration stopped at the state limit.
    pub truncated: bool,
}

/// Directed multigraph of every coloring reachable from the empty one.
///
/// Edges carry the probabilities returned by the enumerator, so parallel
/// edges between the same pair of states add up to the one-step transition
/// probability.
#[derive(Debug, Clone)]
pub struct TransitionGraph {
    /// Underlying petgraph storage; node indices follow discovery order.
    pub graph: DiGraph<StateNode, TransitionEdge>,
    /// Node of the empty coloring.
    pub initial: NodeIndex,
    /// Whether some states were left undiscovered because of the state limit.
    pub truncated: bool,
    states: HashMap<PartialColoring, NodeIndex>,
    palette: Palette,
    vertex_count: usize,
}

/// Explores every coloring reachable from the empty one under `colors` colors.
pub fn build_transition_graph<G: GraphView + ?Sized>(
    graph: &G,
    colors: u32,
) -> Result<TransitionGraph, GlauberError> {
    build_transition_graph_with_config(graph, colors, &StateSpaceConfig::default())
}

/// Breadth-first exploration from the empty coloring, bounded by `config`.
///
/// Edges towards states that would exceed the limit are dropped and the
/// result is flagged as truncated.
pub fn build_transition_graph_with_config<G: GraphView + ?Sized>(
    graph: &G,
    colors: u32,
    config: &StateSpaceConfig,
) -> Result<TransitionGraph, GlauberError> {
    let palette = Palette::new(colors)?;
    let mut states_graph = DiGraph::new();
    let mut states: HashMap<PartialColoring, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::new();
    let mut truncated = false;

    let empty = PartialColoring::empty();
    let initial = states_graph.add_node(StateNode::new(0, empty.clone()));
    states.insert(empty, initial);
    queue.push_back(initial);

    while let Some(state_index) = queue.pop_front() {
        let current = states_graph[state_index].coloring.clone();
        let distribution = enumerate_with_palette(graph, &current, palette)?;
        for transition in distribution.into_entries() {
            let target_index = match states.entry(transition.next) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    if let Some(limit) = config.state_limit {
                        if states_graph.node_count() >= limit {
                            truncated = true;
                            continue;
                        }
                    }
                    let node = StateNode::new(states_graph.node_count(), entry.key().clone());
                    let index = states_graph.add_node(node);
                    entry.insert(index);
                    queue.push_back(index);
                    index
                }
            };
            states_graph.add_edge(
                state_index,
                target_index,
                TransitionEdge {
                    probability: transition.probability,
                    kind: transition.kind,
                },
            );
        }
        if states_graph.node_count() % 1024 == 0 {
            log::debug!(
                "state space: {} states discovered, {} queued",
                states_graph.node_count(),
                queue.len()
            );
        }
    }

    if truncated {
        log::warn!(
            "state space truncated at {} states; outgoing mass of frontier states is below 1",
            states_graph.node_count()
        );
    }
    log::debug!(
        "state space complete: {} states, {} edges",
        states_graph.node_count(),
        states_graph.edge_count()
    );

    Ok(TransitionGraph {
        graph: states_graph,
        initial,
        truncated,
        states,
        palette,
        vertex_count: graph.vertex_count(),
    })
}

impl TransitionGraph {
    /// Returns the node stored at `index`.
    pub fn node(&self, index: NodeIndex) -> &StateNode {
        &self.graph[index]
    }

    /// Looks up the node of a coloring.
    pub fn index_of(&self, coloring: &PartialColoring) -> Option<NodeIndex> {
        self.states.get(coloring).copied()
    }

    /// Returns whether the coloring was discovered.
    pub fn contains(&self, coloring: &PartialColoring) -> bool {
        self.states.contains_key(coloring)
    }

    /// Iterates over the states in discovery order.
    pub fn states(&self) -> impl Iterator<Item = &StateNode> + '_ {
        self.graph.node_weights()
    }

    /// Number of distinct states.
    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, self-loops included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of colors the graph was built with.
    pub fn colors(&self) -> u32 {
        self.palette.size()
    }

    /// Summarizes the explored space.
    pub fn stats(&self) -> StateSpaceStats {
        let mut full_states = 0;
        let mut max_colored = 0;
        for node in self.graph.node_weights() {
            max_colored = max_colored.max(node.coloring.len());
            if node.coloring.len() == self.vertex_count {
                full_states += 1;
            }
        }
        StateSpaceStats {
            state_count: self.state_count(),
            edge_count: self.edge_count(),
            full_states,
            max_colored,
            truncated: self.truncated,
        }
    }

    /// Sum of the probabilities on the edges leaving `index`.
    pub fn outgoing_mass(&self, index: NodeIndex) -> f64 {
        self.graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| edge.weight().probability)
            .sum()
    }

    /// Total probability of moving from `from` to `to` in one step.
    pub fn transition_probability(&self, from: NodeIndex, to: NodeIndex) -> f64 {
        self.graph
            .edges_connecting(from, to)
            .map(|edge| edge.weight().probability)
            .sum()
    }

    /// Applies one step of the chain to a distribution indexed by node.
    pub fn propagate(&self, distribution: &[f64]) -> Result<Vec<f64>, GlauberError> {
        if distribution.len() != self.state_count() {
            return Err(GlauberError::Analysis(
                ErrorInfo::new(
                    "distribution-length",
                    "distribution does not match the number of states",
                )
                .with_context("expected", self.state_count().to_string())
                .with_context("actual", distribution.len().to_string()),
            ));
        }
        let mut next = vec![0.0; distribution.len()];
        for edge in self.graph.edge_references() {
            let mass = distribution[edge.source().index()];
            if mass != 0.0 {
                next[edge.target().index()] += mass * edge.weight().probability;
            }
        }
        Ok(next)
    }

    /// Renders the graph in Graphviz DOT format.
    pub fn dot(&self) -> String {
        let edge_attr = |_, edge: EdgeReference<'_, TransitionEdge>| -> String {
            format!("label=\"{:.4}\"", edge.weight().probability)
        };
        let node_attr = |_, (_idx, node): (NodeIndex, &StateNode)| -> String {
            let assignments: Vec<String> = node
                .coloring
                .iter()
                .map(|entry| format!("{}={}", entry.vertex, entry.color))
                .collect();
            format!(
                "label=\"s{}\\n{{{}}}\"",
                node.index,
                assignments.join(", ")
            )
        };
        format!(
            "{:?}",
            Dot::with_attr_getters(
                &self.graph,
                &[Config::EdgeNoLabel, Config::NodeNoLabel],
                &edge_attr,
                &node_attr
            )
        )
    }

    /// Writes the DOT rendering to `path`, creating parent directories.
    pub fn write_dot(&self, path: &Path) -> Result<(), GlauberError> {
        let io_error = |code: &str, target: &Path, err: std::io::Error| {
            GlauberError::Serde(
                ErrorInfo::new(code, err.to_string())
                    .with_context("path", target.display().to_string()),
            )
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| io_error("dot-mkdir", parent, err))?;
        }
        fs::write(path, self.dot()).map_err(|err| io_error("dot-write", path, err))
    }

    /// Flattens the graph into a serializable snapshot.
    pub fn export(&self) -> TransitionGraphExport {
        TransitionGraphExport {
            colors: self.colors(),
            truncated: self.truncated,
            states: self.graph.node_weights().cloned().collect(),
            edges: self
                .graph
                .edge_references()
                .map(|edge| ExportedEdge {
                    source: edge.source().index(),
                    target: edge.target().index(),
                    probability: edge.weight().probability,
                    kind: edge.weight().kind,
                })
                .collect(),
        }
    }

    /// Writes the snapshot as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), GlauberError> {
        write_json(&self.export(), path, "state-space")
    }
}

/// Serializable form of a [`TransitionGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionGraphExport {
    /// Number of colors the graph was built with.
    pub colors: u32,
    /// Whether exploration stopped at the state limit.
    pub truncated: bool,
    /// States in discovery order.
    pub states: Vec<StateNode>,
    /// Edges referencing states by discovery index.
    pub edges: Vec<ExportedEdge>,
}

/// Edge of a [`TransitionGraphExport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedEdge {
    /// Index of the source state.
    pub source: usize,
    /// Index of the target state.
    pub target: usize,
    /// One-step probability of the move.
    pub probability: f64,
    /// Move the edge stands for.
    pub kind: TransitionKind,
}
