use crate::tree::{
    ids::NodeId,
    proposal::{Critique, Solution},
    stats::NodeStats,
};

#[derive(Debug, Clone)]
/// A single attempt in the search tree.
/// Parent and children are identifiers into the tree's registry, never owning links.
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    solution: Option<Solution>,
    critique: Critique,
    stats: NodeStats,
}

impl Node {
    /// Create a new non-root Node with a freshly generated identifier
    pub fn new(critique: Critique, solution: Option<Solution>, parent: Option<NodeId>) -> Self {
        Node {
            id: NodeId::fresh(),
            parent,
            children: Vec::new(),
            solution,
            critique,
            stats: NodeStats::new(),
        }
    }

    /// Create the root node with the reserved identifier and placeholder critique
    pub fn root() -> Self {
        Node {
            id: NodeId::ROOT,
            parent: None,
            children: Vec::new(),
            solution: None,
            critique: Critique::root(),
            stats: NodeStats::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }

    /// Return the parent of a given node
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Link a child, ignoring identifiers that are already present.
    /// Returns `true` when the link is new.
    pub fn insert_child(&mut self, child: NodeId) -> bool {
        if self.children.contains(&child) {
            false
        } else {
            self.children.push(child);
            true
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    pub fn critique(&self) -> &Critique {
        &self.critique
    }

    /// Running mean of the rewards backpropagated through this node
    pub fn value(&self) -> f64 {
        self.stats.value()
    }

    pub fn visits(&self) -> u64 {
        self.stats.visits()
    }

    /// Fold one reward into this node's statistics.
    pub(crate) fn record(&mut self, reward: f64) {
        self.stats.record(reward);
    }
}
