use std::fs::File;
use std::io::Write;
use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::moves::{MoveKind, StepOutcome};

/// Counts of each move kind applied by a chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTally {
    /// Steps that uncolored a vertex.
    pub uncolor: usize,
    /// Color proposals that were kept.
    pub color_accepted: usize,
    /// Color proposals that clashed with a neighbor.
    pub color_rejected: usize,
}

impl MoveTally {
    /// Records the outcome of one step.
    pub fn record(&mut self, outcome: &StepOutcome) {
        match outcome.kind {
            MoveKind::Uncolor => self.uncolor += 1,
            MoveKind::Color => self.color_accepted += 1,
            MoveKind::Reject => self.color_rejected += 1,
        }
    }

    /// Total number of steps recorded.
    pub fn steps(&self) -> usize {
        self.uncolor + self.color_accepted + self.color_rejected
    }

    /// Fraction of color proposals that were kept (0 when none were made).
    pub fn acceptance_rate(&self) -> f64 {
        let proposals = self.color_accepted + self.color_rejected;
        if proposals == 0 {
            0.0
        } else {
            self.color_accepted as f64 / proposals as f64
        }
    }

    /// Adds the counts of another tally.
    pub fn merge(&mut self, other: &MoveTally) {
        self.uncolor += other.uncolor;
        self.color_accepted += other.color_accepted;
        self.color_rejected += other.color_rejected;
    }
}

/// Snapshot of a chain recorded every `record_interval` steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceSample {
    /// Chain index within the run.
    pub chain: usize,
    /// Number of steps applied when the sample was taken.
    pub step: usize,
    /// Number of colored vertices.
    pub colored: usize,
    /// Colored vertices as a fraction of all vertices.
    pub colored_fraction: f64,
    /// Running acceptance rate of color proposals.
    pub acceptance_rate: f64,
}

/// Aggregate statistics over all chains of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageMetrics {
    /// Number of distinct final colorings across chains.
    pub distinct_final_states: usize,
    /// Mean colored fraction over the recorded samples.
    pub mean_colored_fraction: f64,
    /// Number of chains that ended on a full coloring.
    pub full_colorings: usize,
}

impl CoverageMetrics {
    /// Returns an empty coverage descriptor.
    pub fn empty() -> Self {
        Self {
            distinct_final_states: 0,
            mean_colored_fraction: 0.0,
            full_colorings: 0,
        }
    }
}

/// Collects trace samples and final-state hashes for a run.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    samples: Vec<TraceSample>,
    final_hashes: IndexSet<String>,
    full_colorings: usize,
}

impl MetricsRecorder {
    /// Creates a new recorder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a trace sample.
    pub fn push_sample(&mut self, sample: TraceSample) {
        self.samples.push(sample);
    }

    /// Tracks the final coloring of a chain by its canonical hash.
    pub fn note_final_state(&mut self, hash: String, full: bool) {
        self.final_hashes.insert(hash);
        if full {
            self.full_colorings += 1;
        }
    }

    /// Returns an immutable view over the recorded samples.
    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    /// Computes coverage metrics from the recorded data.
    pub fn coverage(&self) -> CoverageMetrics {
        if self.samples.is_empty() && self.final_hashes.is_empty() {
            return CoverageMetrics::empty();
        }
        let mean_colored_fraction = if self.samples.is_empty() {
            0.0
        } else {
            self.samples
                .iter()
                .map(|sample| sample.colored_fraction)
                .sum::<f64>()
                / self.samples.len() as f64
        };
        CoverageMetrics {
            distinct_final_states: self.final_hashes.len(),
            mean_colored_fraction,
            full_colorings: self.full_colorings,
        }
    }

    /// Writes the recorded samples to a CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "chain,step,colored,colored_fraction,acceptance_rate")?;
        for sample in &self.samples {
            writeln!(
                file,
                "{},{},{},{:.6},{:.6}",
                sample.chain,
                sample.step,
                sample.colored,
                sample.colored_fraction,
                sample.acceptance_rate
            )?;
        }
        Ok(())
    }
}
