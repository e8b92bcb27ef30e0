use std::{collections::HashMap, slice::Iter};

use crate::tree::{ids::NodeId, node::Node};

/// Holds all nodes in creation order and resolves identifiers to slots.
#[derive(Debug, Clone, Default)]
pub(crate) struct Arena {
    storage: Vec<Node>,
    slots: HashMap<NodeId, usize>,
}

impl Arena {
    /// Create storage whose first slot holds `root`.
    pub fn with_root(root: Node) -> Self {
        let id = root.id();
        Arena {
            storage: vec![root],
            slots: HashMap::from([(id, 0)]),
        }
    }

    /// Append a node and return its identifier.
    /// Returns `None` when the identifier is already registered.
    pub fn allocate(&mut self, node: Node) -> Option<NodeId> {
        let id = node.id();
        if self.slots.contains_key(&id) {
            return None;
        }
        self.slots.insert(id, self.storage.len());
        self.storage.push(node);
        Some(id)
    }

    /// Retrieve an associated node from the Arena
    pub fn get(&self, node_id: NodeId) -> Option<&Node> {
        self.slots.get(&node_id).map(|slot| &self.storage[*slot])
    }

    /// Retrieve an associated node from the Arena as a mutable borrow
    pub fn get_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        match self.slots.get(&node_id) {
            Some(slot) => self.storage.get_mut(*slot),
            None => None,
        }
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.slots.contains_key(&node_id)
    }

    /// Check the length of the Arena
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Iteration helper for the Arena, in creation order
    pub fn iter(&self) -> Iter<'_, Node> {
        self.storage.iter()
    }
}

/// Iteration support for Arena.
/// - `for x in &arena` (borrows items)
impl<'a> IntoIterator for &'a Arena {
    type Item = &'a Node;
    type IntoIter = Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.storage.iter()
    }
}
