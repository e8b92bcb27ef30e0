use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_AUTHOR: &str = "anonymous";
pub const DEFAULT_DESCRIPTION: &str = "A best-first reflection search tree";

/// Descriptive information recorded alongside a run's snapshot.
/// Missing fields are filled with generated defaults, never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunMetadata {
    pub tree_id: Uuid,
    pub author: String,
    pub date: String,
    pub description: String,
    /// File stem of the snapshot document, without the `.json` extension.
    pub snapshot_name: String,
}

impl Default for RunMetadata {
    fn default() -> Self {
        let now = Local::now();
        RunMetadata {
            tree_id: Uuid::new_v4(),
            author: DEFAULT_AUTHOR.to_string(),
            date: now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            snapshot_name: format!("MCT_{}", now.timestamp()),
        }
    }
}

impl RunMetadata {
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_snapshot_name(mut self, snapshot_name: impl Into<String>) -> Self {
        self.snapshot_name = snapshot_name.into();
        self
    }
}
