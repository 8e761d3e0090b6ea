//! Run configuration
//!
//! A run is described by the swarm parameters, the quadratic being minimized
//! and the seed of the random source. Files may be YAML or JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use swarm_optimization::{Quadratic, SwarmConfig};
use thiserror::Error;
use tracing::debug;

/// Seed used by the reference scenario
pub const DEFAULT_SEED: u64 = 42;

/// Errors raised while loading a run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML syntax or schema error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON syntax or schema error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither YAML nor JSON
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Everything needed to reproduce a run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub swarm: SwarmConfig,
    pub objective: Quadratic,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            swarm: SwarmConfig::default(),
            objective: Quadratic::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl RunConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        debug!(path = %path.display(), format = %ext, "Loading run configuration");
        match ext.as_str() {
            "yaml" | "yml" => Ok(serde_yaml::from_str(&text)?),
            "json" => Ok(serde_json::from_str(&text)?),
            other => Err(ConfigError::UnsupportedFormat(format!(
                "'{}' ({})",
                other,
                path.display()
            ))),
        }
    }
}
