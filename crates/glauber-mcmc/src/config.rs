use std::fs;
use std::path::{Path, PathBuf};

use glauber_core::errors::{ErrorInfo, GlauberError};
use glauber_core::Palette;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing a sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of colors `k` available to the chain.
    #[serde(default = "default_colors")]
    pub colors: u32,
    /// Number of steps applied to every chain.
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Number of independent chains, each on its own seed substream.
    #[serde(default = "default_chains")]
    pub chains: usize,
    /// State every chain starts from unless the caller supplies one.
    #[serde(default)]
    pub initial: InitialState,
    /// Interval, in steps, between recorded trace samples.
    #[serde(default = "default_record_interval")]
    pub record_interval: usize,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Output directory configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_colors() -> u32 {
    3
}

fn default_steps() -> usize {
    1_000
}

fn default_chains() -> usize {
    1
}

fn default_record_interval() -> usize {
    100
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            steps: default_steps(),
            chains: default_chains(),
            initial: InitialState::default(),
            record_interval: default_record_interval(),
            seed_policy: SeedPolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

impl RunConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GlauberError> {
        serde_yaml::from_str(yaml)
            .map_err(|err| GlauberError::Serde(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Loads a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, GlauberError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            GlauberError::Serde(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&contents).map_err(|err| match err {
            GlauberError::Serde(info) => {
                GlauberError::Serde(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Serializes the configuration to YAML text.
    pub fn to_yaml_string(&self) -> Result<String, GlauberError> {
        serde_yaml::to_string(self).map_err(|err| {
            GlauberError::Serde(ErrorInfo::new("config-serialize", err.to_string()))
        })
    }

    /// Checks the parameters and returns the palette of the run.
    pub fn validate(&self) -> Result<Palette, GlauberError> {
        let palette = Palette::new(self.colors)?;
        if self.record_interval == 0 {
            return Err(GlauberError::Config(
                ErrorInfo::new("invalid-record-interval", "record interval must be positive")
                    .with_hint("use a value of at least 1"),
            ));
        }
        if self.chains == 0 {
            return Err(GlauberError::Config(
                ErrorInfo::new("invalid-chain-count", "at least one chain is required")
                    .with_context("chains", "0"),
            ));
        }
        Ok(palette)
    }
}

/// Starting state for chains that are not given an explicit coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitialState {
    /// No vertex colored.
    #[default]
    Empty,
    /// Greedy proper coloring in vertex order.
    Greedy,
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded in manifests.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// Output directory layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for run artefacts. Created if it does not exist.
    #[serde(default)]
    pub run_directory: Option<PathBuf>,
    /// Trace CSV filename relative to `run_directory`.
    #[serde(default = "default_metrics_filename")]
    pub metrics_file: PathBuf,
    /// Manifest filename relative to `run_directory`.
    #[serde(default = "default_manifest_filename")]
    pub manifest_file: PathBuf,
    /// Final colorings filename relative to `run_directory`.
    #[serde(default = "default_final_state_filename")]
    pub final_state_file: PathBuf,
}

fn default_metrics_filename() -> PathBuf {
    PathBuf::from("metrics.csv")
}

fn default_manifest_filename() -> PathBuf {
    PathBuf::from("manifest.json")
}

fn default_final_state_filename() -> PathBuf {
    PathBuf::from("final_states.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            run_directory: None,
            metrics_file: default_metrics_filename(),
            manifest_file: default_manifest_filename(),
            final_state_file: default_final_state_filename(),
        }
    }
}
