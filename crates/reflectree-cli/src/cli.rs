//! Command-line arguments for the `reflectree` binary.
//!
//! ```bash
//! reflectree "Who was the bald president of Korea?"
//! reflectree "..." --snapshot --config search.yaml
//! reflectree "..." --script answers.yaml
//! reflectree "..." --env-file secrets.env
//! ```

use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

/// Best-first reflection search over oracle-proposed solutions
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "reflectree")]
#[command(version)]
pub struct Cli {
    /// Query to solve
    pub query: String,

    /// YAML search config; defaults to branching 3, depth 3, 3 rounds, early stop
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Replay answers from a YAML oracle script instead of calling the model
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Write a JSON snapshot of the tree when the search ends
    #[arg(long)]
    pub snapshot: bool,

    /// Read `KEY=value` environment pairs from this file instead of `./.env`
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse arguments from an explicit iterator.
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}
