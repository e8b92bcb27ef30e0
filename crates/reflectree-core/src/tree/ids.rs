use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A wrapper for the 128-bit identifier of a node in the search tree.
/// The nil UUID is reserved for the root and is never produced by `fresh`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    /// The reserved root identifier, identical across every tree.
    pub const ROOT: NodeId = NodeId(Uuid::nil());

    /// Generate a new random identifier for a non-root node.
    pub fn fresh() -> Self {
        // v4 UUIDs carry version bits, so they can never equal the nil root.
        NodeId(Uuid::new_v4())
    }

    /// Check whether this is the reserved root identifier
    pub fn is_root(&self) -> bool {
        self.0.is_nil()
    }

    /// Get the underlying UUID without exposing the inner field
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Get the raw 128-bit value
    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }
}

impl From<Uuid> for NodeId {
    /// Allow for explicit conversion from a UUID to NodeId
    fn from(value: Uuid) -> Self {
        NodeId(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
