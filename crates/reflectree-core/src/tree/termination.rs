use std::fmt;

use crate::tree::{error::TreeError, ids::NodeId, proposal::Solution, search_tree::Tree};

/// Why a round allows the search to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A critique flagged its solution as solving the query.
    SolutionFound,
    /// A node's trajectory grew past the depth limit.
    DepthExceeded { depth: usize, limit: usize },
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::SolutionFound => f.write_str("found the solution"),
            TerminationReason::DepthExceeded { depth, limit } => write!(
                f,
                "no solution within the depth limit (depth {depth} > limit {limit})"
            ),
        }
    }
}

/// Outcome of a terminatable round: the node that triggered it and the solution to carry.
/// `solution` is `None` when the depth limit fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Termination {
    pub node: NodeId,
    pub reason: TerminationReason,
    pub solution: Option<Solution>,
}

impl Tree {
    /// Inspect the newest batch, in creation order, for a stop condition.
    /// The first node that found a solution or exceeded `depth_limit` decides the outcome;
    /// `None` means the round is not terminatable.
    pub fn inspect_termination(
        &self,
        batch: &[NodeId],
        depth_limit: usize,
    ) -> Result<Option<Termination>, TreeError> {
        for node_id in batch {
            let node = self.node(*node_id)?;

            if node.critique().found_solution {
                return Ok(Some(Termination {
                    node: *node_id,
                    reason: TerminationReason::SolutionFound,
                    solution: node.solution().cloned(),
                }));
            }

            let depth = self.depth(*node_id)?;
            if depth > depth_limit {
                return Ok(Some(Termination {
                    node: *node_id,
                    reason: TerminationReason::DepthExceeded {
                        depth,
                        limit: depth_limit,
                    },
                    solution: None,
                }));
            }
        }
        Ok(None)
    }
}
