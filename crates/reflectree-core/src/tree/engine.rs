use std::path::PathBuf;

use tracing::{debug, info};

use crate::tree::{
    config::{SearchConfig, SearchConfigError},
    error::{RunError, SnapshotError, TreeError},
    ids::NodeId,
    metadata::RunMetadata,
    oracle::{Oracle, OracleCall, OracleError},
    proposal::{MAX_SCORE, Solution},
    search_tree::Tree,
    snapshot::TreeSnapshot,
    termination::Termination,
};

/// Per-round report emitted by the search loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    /// Zero-based round index.
    pub round: usize,
    /// Node chosen for expansion.
    pub selected: NodeId,
    /// Children created this round, in creation order.
    pub children: Vec<NodeId>,
    /// Parent to child links added by the hierarchy step.
    pub links_added: usize,
    /// `None` when the round is not terminatable.
    pub termination: Option<Termination>,
}

impl RoundReport {
    pub fn is_terminatable(&self) -> bool {
        self.termination.is_some()
    }
}

/// Owns the tree and drives fixed-size rounds of
/// select, expand, backpropagate, re-link and termination inspection.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    tree: Tree,
    config: SearchConfig,
}

impl SearchEngine {
    /// Create an engine holding only the root node.
    pub fn new(config: SearchConfig) -> Result<Self, SearchConfigError> {
        config.validate()?;
        Ok(SearchEngine {
            tree: Tree::new(),
            config,
        })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn metadata(&self) -> &RunMetadata {
        &self.config.metadata
    }

    /// Ask the oracle for `leafs_limit` children of `leaf`, one solve/reflect pair at a time.
    /// The first oracle failure aborts the expansion; nothing is retried.
    /// A critique scored above `MAX_SCORE` counts as an unparseable reflection.
    pub fn expand<O: Oracle>(
        &mut self,
        leaf: NodeId,
        query: &str,
        oracle: &mut O,
    ) -> Result<Vec<NodeId>, RunError> {
        let context = self.tree.context_for(leaf)?;
        debug!(%leaf, context_len = context.len(), "expanding");

        let mut children = Vec::with_capacity(self.config.leafs_limit);
        for _ in 0..self.config.leafs_limit {
            let solution = oracle.solve(query, &context)?;
            debug!(%solution, "oracle proposed a solution");
            let critique = oracle.reflect(&solution)?;
            if !critique.is_valid() {
                return Err(OracleError::unparseable(
                    OracleCall::Reflect,
                    format!("score {} is outside 0..={MAX_SCORE}", critique.score),
                )
                .into());
            }
            debug!(%critique, "oracle critiqued the solution");

            let child = self.tree.add_node(critique, Some(solution), leaf)?;
            children.push(child);
        }
        Ok(children)
    }

    /// Backpropagate each child's normalized critique score up its ancestor chain.
    pub fn backpropagate(&mut self, children: &[NodeId]) -> Result<(), TreeError> {
        for child in children {
            let reward = self.tree.node(*child)?.critique().normalized_score();
            self.tree.backpropagate(*child, reward)?;
        }
        Ok(())
    }

    /// Execute one complete round: selection, expansion, backpropagation,
    /// hierarchy and termination inspection.
    pub fn round<O: Oracle>(
        &mut self,
        round: usize,
        query: &str,
        oracle: &mut O,
    ) -> Result<RoundReport, RunError> {
        let selected = self.tree.select_leaf(self.config.selection);
        info!(round, %selected, "selected leaf");

        let children = self.expand(selected, query, oracle)?;
        self.backpropagate(&children)?;
        let links_added = self.tree.establish_hierarchy()?;
        let termination = self
            .tree
            .inspect_termination(&children, self.config.depth_limit)?;

        match &termination {
            Some(termination) => info!(
                round,
                reason = %termination.reason,
                node = %termination.node,
                "round is terminatable"
            ),
            None => debug!(round, "round is not terminatable"),
        }

        Ok(RoundReport {
            round,
            selected,
            children,
            links_added,
            termination,
        })
    }

    /// Run up to `max_rounds` rounds and return the last recorded solution.
    pub fn run<O: Oracle>(
        &mut self,
        query: &str,
        max_rounds: usize,
        stop_early: bool,
        oracle: O,
    ) -> Result<Option<Solution>, RunError> {
        self.run_with_hook(query, max_rounds, stop_early, oracle, |_| {})
    }

    /// Run with the round count and early-stop flag from the engine's config.
    pub fn run_configured<O: Oracle>(
        &mut self,
        query: &str,
        oracle: O,
    ) -> Result<Option<Solution>, RunError> {
        let (rounds, stop_early) = (self.config.rounds, self.config.stop_early);
        self.run(query, rounds, stop_early, oracle)
    }

    /// Run and invoke a callback after each completed round.
    ///
    /// A terminatable round replaces the carried solution (with `None` when the depth
    /// limit fired); other rounds leave it untouched. With `stop_early`, the loop ends
    /// after the first terminatable round. The snapshot, when enabled, is written once
    /// after the loop and never after a failed round.
    pub fn run_with_hook<O, FHook>(
        &mut self,
        query: &str,
        max_rounds: usize,
        stop_early: bool,
        mut oracle: O,
        mut on_round: FHook,
    ) -> Result<Option<Solution>, RunError>
    where
        O: Oracle,
        FHook: FnMut(&RoundReport),
    {
        let mut solution: Option<Solution> = None;

        for round in 0..max_rounds {
            let report = self.round(round, query, &mut oracle)?;
            on_round(&report);

            if let Some(termination) = report.termination {
                solution = termination.solution;
                if stop_early {
                    break;
                }
            }
        }

        if self.config.snapshot {
            let path = self.persist_snapshot()?;
            info!(path = %path.display(), "snapshot written");
        }

        Ok(solution)
    }

    /// Capture the current tree together with the run metadata.
    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot::capture(&self.tree, &self.config.metadata)
    }

    /// Write the snapshot to the configured location.
    pub fn persist_snapshot(&self) -> Result<PathBuf, SnapshotError> {
        self.snapshot().persist(
            &self.config.snapshot_dir,
            &self.config.metadata.snapshot_name,
        )
    }
}
