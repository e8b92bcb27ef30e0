use serde_json::json;

use crate::tree::{
    arena::Arena,
    error::TreeError,
    ids::NodeId,
    node::Node,
    proposal::{Critique, Solution},
};

#[derive(Debug, Clone)]
/// owns the registry of every node (root is always the first entry)
/// provides lineage, backpropagation and hierarchy operations
pub struct Tree {
    arena: Arena,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Tree {
    /// Create a tree with a single root node.
    pub fn new() -> Self {
        Tree {
            arena: Arena::with_root(Node::root()),
        }
    }

    /// Return the root node id.
    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Return how many nodes exist in the registry.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Return an immutable node handle.
    pub fn node(&self, node_id: NodeId) -> Result<&Node, TreeError> {
        self.arena
            .get(node_id)
            .ok_or(TreeError::MissingNode { node_id })
    }

    /// Return a mutable node handle.
    pub(crate) fn node_mut(&mut self, node_id: NodeId) -> Result<&mut Node, TreeError> {
        self.arena
            .get_mut(node_id)
            .ok_or(TreeError::MissingNode { node_id })
    }

    /// Iterate every node in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.arena.iter()
    }

    /// Register a new child of `parent`.
    /// The child is not linked into the parent's children until `establish_hierarchy` runs.
    pub fn add_node(
        &mut self,
        critique: Critique,
        solution: Option<Solution>,
        parent: NodeId,
    ) -> Result<NodeId, TreeError> {
        let node = Node::new(critique, solution, Some(parent));
        self.insert(node)
    }

    /// Register an already built node, checking identity and parent invariants.
    pub(crate) fn insert(&mut self, node: Node) -> Result<NodeId, TreeError> {
        let node_id = node.id();
        if let Some(parent_id) = node.parent() {
            if !self.arena.contains(parent_id) {
                return Err(TreeError::MissingParent { node_id, parent_id });
            }
        }
        self.arena
            .allocate(node)
            .ok_or(TreeError::DuplicateNode { node_id })
    }

    /// Walk from `node_id` up to and including the root.
    pub fn trajectory(&self, node_id: NodeId) -> Result<Trajectory<'_>, TreeError> {
        let _ = self.node(node_id)?;
        Ok(Trajectory {
            tree: self,
            next: Some(node_id),
            remaining: self.node_count(),
        })
    }

    /// Number of nodes on the path to the root, root included (root depth is 1).
    pub fn depth(&self, node_id: NodeId) -> Result<usize, TreeError> {
        Ok(self.trajectory(node_id)?.count())
    }

    /// Concatenate the solutions along the trajectory of `node_id`, oldest ancestor first.
    /// The root carries no solution and contributes nothing.
    pub fn context_for(&self, node_id: NodeId) -> Result<String, TreeError> {
        let mut lineage: Vec<&Solution> = self
            .trajectory(node_id)?
            .filter_map(|node| node.solution())
            .collect();
        lineage.reverse();

        let mut context = String::new();
        for solution in lineage {
            let line = json!({
                "query": solution.query,
                "answer": {
                    "answer": solution.answer.text,
                    "description": solution.answer.rationale,
                },
            });
            context.push_str(&line.to_string());
            context.push('\n');
        }
        Ok(context)
    }

    /// Fold `reward` into every node from `node_id` up to, but excluding, the root.
    pub fn backpropagate(&mut self, node_id: NodeId, reward: f64) -> Result<(), TreeError> {
        let mut current = node_id;
        let mut remaining = self.node_count();

        while !current.is_root() && remaining > 0 {
            let node = self.node_mut(current)?;
            node.record(reward);
            match node.parent() {
                Some(parent) => current = parent,
                None => break,
            }
            remaining -= 1;
        }
        Ok(())
    }

    /// Make every node's children equal the set of nodes naming it as parent.
    /// Idempotent: links that already exist are left alone. Returns how many links were added.
    pub fn establish_hierarchy(&mut self) -> Result<usize, TreeError> {
        let links: Vec<(NodeId, NodeId)> = self
            .arena
            .iter()
            .filter_map(|node| node.parent().map(|parent| (parent, node.id())))
            .collect();

        let mut added = 0;
        for (parent, child) in links {
            if self.node_mut(parent)?.insert_child(child) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Return the non-root node with the highest value, later ties win.
    pub fn best_node(&self) -> Option<&Node> {
        let mut best: Option<&Node> = None;
        for node in self.arena.iter().filter(|node| !node.is_root()) {
            best = match best {
                Some(current) if current.value() > node.value() => Some(current),
                _ => Some(node),
            };
        }
        best
    }
}

/// Iterator over a node and its ancestors, ending with the root.
/// Created fresh by `Tree::trajectory`; bounded by the registry size.
pub struct Trajectory<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Trajectory<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.tree.arena.get(self.next?)?;
        self.remaining -= 1;
        self.next = if node.is_root() { None } else { node.parent() };
        Some(node)
    }
}
