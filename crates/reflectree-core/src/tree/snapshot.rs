use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use uuid::Uuid;

use crate::tree::{
    error::SnapshotError,
    ids::NodeId,
    metadata::RunMetadata,
    proposal::{Critique, Solution},
    search_tree::Tree,
};

/// Point-in-time serialization of a whole tree and the run it belongs to.
/// Field order is the document's field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub tree_id: Uuid,
    pub author: String,
    pub date: String,
    pub description: String,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub value: f64,
    pub parent: Option<NodeId>,
    pub solution: Option<Solution>,
    pub reflection: Critique,
}

/// One parent to child link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub origin: NodeId,
    pub to: NodeId,
}

impl TreeSnapshot {
    /// Capture every node in creation order, plus one edge per node that has a parent.
    pub fn capture(tree: &Tree, metadata: &RunMetadata) -> Self {
        let nodes = tree
            .nodes()
            .map(|node| NodeSnapshot {
                id: node.id(),
                value: node.value(),
                parent: node.parent(),
                solution: node.solution().cloned(),
                reflection: node.critique().clone(),
            })
            .collect();

        let edges = tree
            .nodes()
            .filter_map(|node| {
                node.parent().map(|origin| EdgeSnapshot {
                    origin,
                    to: node.id(),
                })
            })
            .collect();

        TreeSnapshot {
            tree_id: metadata.tree_id,
            author: metadata.author.clone(),
            date: metadata.date.clone(),
            description: metadata.description.clone(),
            nodes,
            edges,
        }
    }

    /// Render the snapshot as indented JSON. Non-ASCII text is written as-is.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        let mut buf = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Write the snapshot to `<dir>/<name>.json` and return the written path.
    pub fn persist(&self, dir: impl AsRef<Path>, name: &str) -> Result<PathBuf, SnapshotError> {
        let path = dir.as_ref().join(format!("{name}.json"));
        fs::write(&path, self.to_json()?)?;
        Ok(path)
    }

    /// Reparse a persisted snapshot document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path)?;
        let snapshot = serde_json::from_str(&json)?;
        Ok(snapshot)
    }
}
