use std::fs;
use std::path::{Path, PathBuf};

use glauber_core::errors::ErrorInfo;
use glauber_core::{GlauberError, RunProvenance};
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;

/// Structured manifest describing a completed sampling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    /// Configuration used for the run.
    pub config: RunConfig,
    /// Graph, palette and seed the run was produced from.
    pub provenance: RunProvenance,
    /// Optional seed label captured from the configuration.
    pub seed_label: Option<String>,
    /// Canonical hash of the final coloring of each chain, in chain order.
    pub final_state_hashes: Vec<String>,
    /// Trace CSV produced during the run (relative to run directory).
    pub metrics_file: Option<PathBuf>,
    /// Final colorings file (relative to run directory).
    pub final_state_file: Option<PathBuf>,
}

impl RunManifest {
    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), GlauberError> {
        write_json(self, path, "manifest")
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, GlauberError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            GlauberError::Serde(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            GlauberError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

/// Writes any serializable artefact as pretty JSON, creating parent directories.
pub(crate) fn write_json<T: Serialize>(
    value: &T,
    path: &Path,
    label: &str,
) -> Result<(), GlauberError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            GlauberError::Serde(
                ErrorInfo::new(format!("{label}-mkdir"), err.to_string())
                    .with_context("path", parent.display().to_string()),
            )
        })?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|err| {
        GlauberError::Serde(
            ErrorInfo::new(format!("{label}-serialize"), err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    fs::write(path, json).map_err(|err| {
        GlauberError::Serde(
            ErrorInfo::new(format!("{label}-write"), err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}
