use std::path::{Path, PathBuf};

use glauber_core::errors::ErrorInfo;
use glauber_core::{
    GlauberError, GraphView, Palette, RngHandle, RunProvenance, SchemaVersion, VertexId,
};
use glauber_graph::canonical_hash;
use serde::{Deserialize, Serialize};

use crate::coloring::{validate_coloring, PartialColoring};
use crate::config::{OutputConfig, RunConfig};
use crate::determinism;
use crate::initial::initial_coloring;
use crate::manifest::{write_json, RunManifest};
use crate::metrics::{CoverageMetrics, MetricsRecorder, MoveTally, TraceSample};
use crate::moves::{empty_graph, step_among};

/// Final state and move counts of one chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainSummary {
    /// Chain index within the run.
    pub chain: usize,
    /// Seed of the chain's random stream.
    pub seed: u64,
    /// Coloring after the last step.
    pub final_coloring: PartialColoring,
    /// Canonical hash of `final_coloring`.
    pub final_hash: String,
    /// Whether every vertex is colored at the end of the chain.
    pub full: bool,
    /// Moves applied by the chain.
    pub moves: MoveTally,
}

/// Summary returned to callers after a run completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// Per-chain results in chain order.
    pub chains: Vec<ChainSummary>,
    /// Moves applied across all chains.
    pub moves: MoveTally,
    /// Coverage metrics captured during the run.
    pub coverage: CoverageMetrics,
    /// Canonical hash of the sampled graph.
    pub graph_hash: String,
    /// Trace samples collected (useful for tests/diagnostics).
    pub samples: Vec<TraceSample>,
    /// Trace CSV written during the run.
    pub metrics_path: Option<PathBuf>,
    /// Final colorings JSON written during the run.
    pub final_state_path: Option<PathBuf>,
    /// Manifest path, if emitted.
    pub manifest_path: Option<PathBuf>,
}

/// Runs the chain for `steps` steps from `initial` (the empty coloring when
/// `None`) and returns the final coloring.
///
/// Fails with a configuration error when `colors` is zero, before any step is
/// taken. The result is proper but not necessarily a full coloring.
pub fn sample_coloring<G: GraphView + ?Sized>(
    graph: &G,
    colors: u32,
    steps: usize,
    initial: Option<&PartialColoring>,
    rng: &mut RngHandle,
) -> Result<PartialColoring, GlauberError> {
    let palette = Palette::new(colors)?;
    let mut coloring = match initial {
        Some(start) => {
            validate_coloring(graph, start, palette)?;
            start.clone()
        }
        None => PartialColoring::empty(),
    };
    if steps == 0 {
        return Ok(coloring);
    }
    let vertices: Vec<VertexId> = graph.vertices().collect();
    for _ in 0..steps {
        step_among(graph, &vertices, &mut coloring, palette, rng)?;
    }
    Ok(coloring)
}

/// Runs every configured chain and collects metrics and artefacts.
///
/// Chain `i` draws from the seed substream `i` of the master seed, so runs
/// with the same configuration reproduce the same summary.
pub fn run<G: GraphView + ?Sized>(
    config: &RunConfig,
    graph: &G,
    initial: Option<&PartialColoring>,
) -> Result<RunSummary, GlauberError> {
    let palette = config.validate()?;
    let start = match initial {
        Some(start) => {
            validate_coloring(graph, start, palette)?;
            start.clone()
        }
        None => initial_coloring(graph, palette, config.initial)?,
    };
    let vertices: Vec<VertexId> = graph.vertices().collect();
    if vertices.is_empty() && config.steps > 0 {
        return Err(empty_graph());
    }

    let mut recorder = MetricsRecorder::new();
    let mut chains = Vec::with_capacity(config.chains);
    let mut moves = MoveTally::default();
    for chain in 0..config.chains {
        let seed = determinism::chain_seed(config.seed_policy.master_seed, chain);
        let mut rng = RngHandle::from_seed(seed);
        let mut coloring = start.clone();
        let mut tally = MoveTally::default();
        for step in 1..=config.steps {
            let outcome = step_among(graph, &vertices, &mut coloring, palette, &mut rng)?;
            tally.record(&outcome);
            if step % config.record_interval == 0 {
                recorder.push_sample(trace_sample(chain, step, &coloring, vertices.len(), &tally));
            }
        }

        let final_hash = coloring.canonical_hash();
        let full = coloring.is_full(graph);
        recorder.note_final_state(final_hash.clone(), full);
        log::debug!(
            "chain {chain} finished: {} of {} vertices colored, acceptance {:.3}",
            coloring.len(),
            vertices.len(),
            tally.acceptance_rate()
        );
        moves.merge(&tally);
        chains.push(ChainSummary {
            chain,
            seed,
            final_coloring: coloring,
            final_hash,
            full,
            moves: tally,
        });
    }

    let graph_hash = canonical_hash(graph)?;
    let written = write_outputs(config, &graph_hash, &chains, &recorder)?;
    let coverage = recorder.coverage();
    log::info!(
        "sampled {} chain(s) x {} steps with k={}: {} distinct final states, {} full",
        config.chains,
        config.steps,
        palette.size(),
        coverage.distinct_final_states,
        coverage.full_colorings
    );

    Ok(RunSummary {
        chains,
        moves,
        coverage,
        graph_hash,
        samples: recorder.samples().to_vec(),
        metrics_path: written.metrics,
        final_state_path: written.final_states,
        manifest_path: written.manifest,
    })
}

fn trace_sample(
    chain: usize,
    step: usize,
    coloring: &PartialColoring,
    vertex_count: usize,
    tally: &MoveTally,
) -> TraceSample {
    let colored_fraction = if vertex_count == 0 {
        0.0
    } else {
        coloring.len() as f64 / vertex_count as f64
    };
    TraceSample {
        chain,
        step,
        colored: coloring.len(),
        colored_fraction,
        acceptance_rate: tally.acceptance_rate(),
    }
}

/// Final coloring entry written to the final-states file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalState {
    /// Chain index within the run.
    pub chain: usize,
    /// Canonical hash of the coloring.
    pub hash: String,
    /// Coloring after the last step.
    pub coloring: PartialColoring,
}

#[derive(Default)]
struct WrittenOutputs {
    metrics: Option<PathBuf>,
    final_states: Option<PathBuf>,
    manifest: Option<PathBuf>,
}

fn write_outputs(
    config: &RunConfig,
    graph_hash: &str,
    chains: &[ChainSummary],
    recorder: &MetricsRecorder,
) -> Result<WrittenOutputs, GlauberError> {
    let OutputConfig {
        run_directory,
        metrics_file,
        manifest_file,
        final_state_file,
    } = &config.output;
    let Some(run_dir) = run_directory else {
        return Ok(WrittenOutputs::default());
    };
    std::fs::create_dir_all(run_dir).map_err(|err| {
        GlauberError::Serde(
            ErrorInfo::new("run-dir-mkdir", err.to_string())
                .with_context("path", run_dir.display().to_string()),
        )
    })?;

    let metrics_path = run_dir.join(metrics_file);
    recorder.write_csv(&metrics_path).map_err(|err| {
        GlauberError::Serde(
            ErrorInfo::new("metrics-write", err.to_string())
                .with_context("path", metrics_path.display().to_string()),
        )
    })?;

    let final_state_path = run_dir.join(final_state_file);
    let final_states: Vec<FinalState> = chains
        .iter()
        .map(|chain| FinalState {
            chain: chain.chain,
            hash: chain.final_hash.clone(),
            coloring: chain.final_coloring.clone(),
        })
        .collect();
    write_json(&final_states, &final_state_path, "final-state")?;

    let manifest_path = run_dir.join(manifest_file);
    let manifest = RunManifest {
        config: config.clone(),
        provenance: RunProvenance {
            schema_version: SchemaVersion::new(1, 0, 0),
            graph_hash: graph_hash.to_string(),
            colors: config.colors,
            seed: config.seed_policy.master_seed,
            tool_versions: [(
                env!("CARGO_PKG_NAME").to_string(),
                env!("CARGO_PKG_VERSION").to_string(),
            )]
            .into_iter()
            .collect(),
        },
        seed_label: config.seed_policy.label.clone(),
        final_state_hashes: chains.iter().map(|chain| chain.final_hash.clone()).collect(),
        metrics_file: relative_to(&metrics_path, run_dir),
        final_state_file: relative_to(&final_state_path, run_dir),
    };
    manifest.write(&manifest_path)?;

    Ok(WrittenOutputs {
        metrics: Some(metrics_path),
        final_states: Some(final_state_path),
        manifest: Some(manifest_path),
    })
}

fn relative_to(path: &Path, root: &Path) -> Option<PathBuf> {
    path.strip_prefix(root).ok().map(Path::to_path_buf)
}
