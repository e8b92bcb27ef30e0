use thiserror::Error;

use crate::tree::{ids::NodeId, oracle::OracleError};

/// Error type for tree registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Attempted to access a node id that does not exist in the registry.
    #[error("missing node with id {node_id}")]
    MissingNode { node_id: NodeId },

    /// Attempted to attach a node to a parent that is not registered.
    #[error("node {node_id} references unknown parent {parent_id}")]
    MissingParent { node_id: NodeId, parent_id: NodeId },

    /// Attempted to register a node whose identifier is already taken.
    #[error("node id {node_id} is already registered")]
    DuplicateNode { node_id: NodeId },
}

/// Error type for writing and reading tree snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot JSON is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Error type for a complete search run. Any variant aborts the run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
