use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tree::{ids::NodeId, node::Node, search_tree::Tree};

/// Rule used to pick the next node to expand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Highest mean reward among unexpanded nodes, later ties win. No exploration term.
    #[default]
    Greedy,
    /// Mean reward plus an exploration bonus `c * sqrt(ln(N) / visits)` among unexpanded nodes.
    Uct { c: f64 },
}

impl Tree {
    /// Pick the node to expand next according to `strategy`.
    pub fn select_leaf(&self, strategy: SelectionStrategy) -> NodeId {
        match strategy {
            SelectionStrategy::Greedy => self.select_greedy(),
            SelectionStrategy::Uct { c } => self.select_uct(c),
        }
    }

    /// Scan the registry in creation order starting from the root as candidate,
    /// replacing it with any childless node whose value is at least the candidate's.
    fn select_greedy(&self) -> NodeId {
        let mut best: Option<&Node> = None;
        for node in self.nodes() {
            let Some(candidate) = best else {
                // the root is the first registry entry
                best = Some(node);
                continue;
            };
            if candidate.value() <= node.value() && !node.has_children() {
                best = Some(node);
            }
        }
        best.map_or(self.root_id(), Node::id)
    }

    fn select_uct(&self, c: f64) -> NodeId {
        // Parent visit count: sum of visits over all nodes sharing that parent
        let mut sibling_visits: HashMap<NodeId, u64> = HashMap::new();
        for node in self.nodes() {
            if let Some(parent) = node.parent() {
                *sibling_visits.entry(parent).or_insert(0) += node.visits();
            }
        }

        let mut best: Option<(NodeId, f64)> = None;
        for node in self.nodes().filter(|node| !node.has_children()) {
            let n_parent = node
                .parent()
                .and_then(|parent| sibling_visits.get(&parent).copied())
                .unwrap_or(0)
                .max(1);
            let score = uct_score(node, n_parent, c);

            // later ties win, matching the greedy rule
            best = match best {
                Some((best_id, best_score)) if best_score > score => Some((best_id, best_score)),
                _ => Some((node.id(), score)),
            };
        }

        best.map_or(self.root_id(), |(id, _)| id)
    }
}

/// Calculate the UCT score for a node given its parent's visit count
fn uct_score(node: &Node, n_parent: u64, c: f64) -> f64 {
    if node.visits() == 0 {
        f64::INFINITY
    } else {
        node.value() + c * f64::sqrt(f64::ln(n_parent as f64) / node.visits() as f64)
    }
}
