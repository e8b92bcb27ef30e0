mod tree;

pub use tree::config::{SearchConfig, SearchConfigError};
pub use tree::engine::{RoundReport, SearchEngine};
pub use tree::error::{RunError, SnapshotError, TreeError};
pub use tree::ids::NodeId;
pub use tree::metadata::RunMetadata;
pub use tree::node::Node;
pub use tree::oracle::{Oracle, OracleCall, OracleError};
pub use tree::proposal::{Answer, Critique, MAX_SCORE, Solution};
pub use tree::search_tree::{Trajectory, Tree};
pub use tree::selection::SelectionStrategy;
pub use tree::snapshot::{EdgeSnapshot, NodeSnapshot, TreeSnapshot};
pub use tree::termination::{Termination, TerminationReason};
