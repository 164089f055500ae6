use glauber_core::errors::{ErrorInfo, GlauberError};
use serde::{Deserialize, Serialize};

use crate::coloring::PartialColoring;
use crate::state_space::TransitionGraph;

/// Bounds for [`evolve_distribution`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixingConfig {
    /// Maximum number of chain steps to apply.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Distance from uniform at which evolution stops early.
    #[serde(default = "default_stopping_threshold")]
    pub stopping_threshold: f64,
}

fn default_max_steps() -> usize {
    1_000
}

fn default_stopping_threshold() -> f64 {
    0.01
}

impl Default for MixingConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            stopping_threshold: default_stopping_threshold(),
        }
    }
}

/// Distance from uniform after a number of steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixingRecord {
    /// Steps applied so far; 0 is the starting distribution.
    pub step: usize,
    /// Total-variation distance from the uniform distribution over states.
    pub tv_from_uniform: f64,
}

/// Result of evolving a distribution over the state space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixingReport {
    /// One record per step, starting with step 0.
    pub records: Vec<MixingRecord>,
    /// Distribution after the last step, indexed by state.
    pub final_distribution: Vec<f64>,
    /// First step at which the distance fell to the threshold, if any.
    pub converged_at: Option<usize>,
    /// Number of states the distribution is spread over.
    pub state_count: usize,
}

impl MixingReport {
    /// Distance from uniform after the last step.
    pub fn final_distance(&self) -> f64 {
        self.records
            .last()
            .map(|record| record.tv_from_uniform)
            .unwrap_or(0.0)
    }
}

/// Half the L1 distance between two distributions of equal length.
pub fn total_variation_distance(p: &[f64], q: &[f64]) -> Result<f64, GlauberError> {
    if p.len() != q.len() {
        return Err(GlauberError::Analysis(
            ErrorInfo::new("distribution-length", "distributions differ in length")
                .with_context("left", p.len().to_string())
                .with_context("right", q.len().to_string()),
        ));
    }
    Ok(0.5 * p.iter().zip(q).map(|(a, b)| (a - b).abs()).sum::<f64>())
}

/// Distribution concentrated on `coloring`.
pub fn point_mass(
    space: &TransitionGraph,
    coloring: &PartialColoring,
) -> Result<Vec<f64>, GlauberError> {
    let index = space.index_of(coloring).ok_or_else(|| {
        GlauberError::Analysis(
            ErrorInfo::new("unknown-state", "coloring is not part of the state space")
                .with_context("hash", coloring.canonical_hash())
                .with_hint("build the state space with the same graph and palette"),
        )
    })?;
    let mut distribution = vec![0.0; space.state_count()];
    distribution[index.index()] = 1.0;
    Ok(distribution)
}

/// Evolves a point mass on `start` through the chain and tracks its distance
/// from the uniform distribution over the explored states.
///
/// Stops after `max_steps` steps or as soon as the distance is at most
/// `stopping_threshold`.
pub fn evolve_distribution(
    space: &TransitionGraph,
    start: &PartialColoring,
    config: &MixingConfig,
) -> Result<MixingReport, GlauberError> {
    let mut distribution = point_mass(space, start)?;
    let state_count = distribution.len();
    let uniform = vec![1.0 / state_count as f64; state_count];

    let mut records = Vec::new();
    let mut converged_at = None;
    let mut distance = total_variation_distance(&distribution, &uniform)?;
    records.push(MixingRecord {
        step: 0,
        tv_from_uniform: distance,
    });
    if distance <= config.stopping_threshold {
        converged_at = Some(0);
    }

    let mut step = 0;
    while converged_at.is_none() && step < config.max_steps {
        distribution = space.propagate(&distribution)?;
        step += 1;
        distance = total_variation_distance(&distribution, &uniform)?;
        records.push(MixingRecord {
            step,
            tv_from_uniform: distance,
        });
        if distance <= config.stopping_threshold {
            converged_at = Some(step);
        }
    }

    match converged_at {
        Some(step) => log::info!("distance from uniform reached {distance:.6} after {step} steps"),
        None => log::info!(
            "distance from uniform still {distance:.6} after {} steps",
            config.max_steps
        ),
    }

    Ok(MixingReport {
        records,
        final_distribution: distribution,
        converged_at,
        state_count,
    })
}
