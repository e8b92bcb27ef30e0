mod arena;
pub mod config;
pub mod engine;
pub mod error;
pub mod ids;
pub mod metadata;
pub mod node;
pub mod oracle;
pub mod proposal;
pub mod search_tree;
pub mod selection;
pub mod snapshot;
mod stats;
pub mod termination;

#[cfg(test)]
mod tests;
