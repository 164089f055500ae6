#![deny(missing_docs)]
#![doc = "Glauber-style Markov chain over partial proper colorings: single steps, seeded chain runs, exact one-step enumeration, the reachable state-space graph and distribution-evolution analysis."]

/// Distribution evolution over the explored state space.
pub mod analysis;
/// Partial colorings and validity checks.
pub mod coloring;
/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Exact one-step transition enumeration.
pub mod enumerate;
/// Starting states for chains.
pub mod initial;
/// Chain driver and public `sample_coloring`/`run` entry points.
pub mod kernel;
/// Run manifest serialization helpers.
pub mod manifest;
/// Metrics collection and coverage summaries.
pub mod metrics;
/// Single-step transition rule.
pub mod moves;
/// Breadth-first construction of the transition graph.
pub mod state_space;

pub use analysis::{
    evolve_distribution, point_mass, total_variation_distance, MixingConfig, MixingRecord,
    MixingReport,
};
pub use coloring::{is_proper, is_valid, validate_coloring, Assignment, PartialColoring};
pub use config::{InitialState, OutputConfig, RunConfig, SeedPolicy};
pub use enumerate::{enumerate_transitions, Transition, TransitionDistribution, TransitionKind};
pub use initial::{greedy_coloring, initial_coloring};
pub use kernel::{run, sample_coloring, ChainSummary, FinalState, RunSummary};
pub use manifest::RunManifest;
pub use metrics::{CoverageMetrics, MoveTally, TraceSample};
pub use moves::{step, MoveKind, StepOutcome};
pub use state_space::{
    build_transition_graph, build_transition_graph_with_config, StateNode, StateSpaceConfig,
    StateSpaceStats, TransitionEdge, TransitionGraph,
};
