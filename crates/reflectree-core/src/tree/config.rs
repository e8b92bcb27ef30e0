use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tree::{metadata::RunMetadata, selection::SelectionStrategy};

const DEFAULT_SEARCH_CONFIG_YAML: &str = include_str!("../../config/search.default.yaml");

/// Search configuration for reflection search runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Deepest trajectory allowed before a branch is forced to terminate.
    pub depth_limit: usize,
    /// Branching factor: children created per expansion.
    pub leafs_limit: usize,
    /// Rounds used by `SearchEngine::run_configured`.
    pub rounds: usize,
    pub stop_early: bool,
    /// Persist a snapshot once the round loop finishes.
    pub snapshot: bool,
    pub snapshot_dir: PathBuf,
    pub selection: SelectionStrategy,
    pub metadata: RunMetadata,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth_limit: 3,
            leafs_limit: 3,
            rounds: 3,
            stop_early: true,
            snapshot: false,
            snapshot_dir: PathBuf::from("."),
            selection: SelectionStrategy::Greedy,
            metadata: RunMetadata::default(),
        }
    }
}

impl SearchConfig {
    /// Parse a search config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SearchConfigError> {
        let config: SearchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a search config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SearchConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SEARCH_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SearchConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), SearchConfigError> {
        if self.depth_limit == 0 {
            return Err(SearchConfigError::Invalid(
                "depth_limit must be greater than 0".to_string(),
            ));
        }
        if self.leafs_limit == 0 {
            return Err(SearchConfigError::Invalid(
                "leafs_limit must be greater than 0".to_string(),
            ));
        }
        if self.rounds == 0 {
            return Err(SearchConfigError::Invalid(
                "rounds must be greater than 0".to_string(),
            ));
        }
        if let SelectionStrategy::Uct { c } = self.selection {
            if !c.is_finite() || c < 0.0 {
                return Err(SearchConfigError::Invalid(
                    "uct c must be finite and >= 0".to_string(),
                ));
            }
        }
        if self.snapshot && self.metadata.snapshot_name.trim().is_empty() {
            return Err(SearchConfigError::Invalid(
                "snapshot_name must not be empty when snapshots are enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error type for loading and validating `SearchConfig`.
#[derive(Debug, Error)]
pub enum SearchConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid search config: {0}")]
    Invalid(String),
}
