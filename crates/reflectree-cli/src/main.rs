mod cli;

use std::path::{Path, PathBuf};

use anyhow::Context;
use reflectree_core::{Oracle, SearchConfig, SearchEngine, Solution};
use reflectree_oracle::{OpenAiOracle, ScriptedOracle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

const NO_SOLUTION: &str = "No solution found";

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load `KEY=value` pairs from `path`, or from the nearest `.env` when no path is given.
/// Variables already set in the process environment win.
fn load_env_file(path: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("loading environment file {}", path.display()))?;
            Ok(Some(path.to_path_buf()))
        }
        None => Ok(dotenvy::dotenv().ok()),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::from_yaml_path(path)
            .with_context(|| format!("loading search config {}", path.display()))?,
        None => SearchConfig::from_default_yaml()?,
    };
    if cli.snapshot {
        config.snapshot = true;
    }
    Ok(config)
}

fn make_oracle(cli: &Cli) -> anyhow::Result<Box<dyn Oracle>> {
    Ok(match &cli.script {
        Some(path) => Box::new(
            ScriptedOracle::from_path(path)
                .with_context(|| format!("loading oracle script {}", path.display()))?,
        ),
        None => Box::new(OpenAiOracle::from_env().context("configuring the model oracle")?),
    })
}

fn render(solution: Option<&Solution>) -> anyhow::Result<String> {
    match solution {
        Some(solution) => Ok(serde_json::to_string_pretty(solution)?),
        None => Ok(NO_SOLUTION.to_string()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = cli::parse_args(std::env::args_os()).unwrap_or_else(|err| err.exit());
    let env_file = load_env_file(cli.env_file.as_deref())?;
    init_tracing(cli.verbose);
    if let Some(path) = env_file {
        info!(path = %path.display(), "loaded environment file");
    }

    let config = load_config(&cli)?;
    let oracle = make_oracle(&cli)?;
    let mut engine = SearchEngine::new(config)?;

    info!(query = %cli.query, "starting search");
    let solution = engine
        .run_configured(&cli.query, oracle)
        .context("search aborted")?;

    println!("{}", render(solution.as_ref())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_solution() {
        assert_eq!(render(None).unwrap(), "No solution found");
    }

    #[test]
    fn test_render_solution_as_json() {
        let solution = Solution::new("q", Some("a".to_string()), "r");
        let rendered = render(Some(&solution)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["answer"]["answer"], "a");
        assert_eq!(value["query"], "q");
    }

    #[test]
    fn test_env_file_values_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.env");
        std::fs::write(&path, "REFLECTREE_CLI_TEST_ENV_VALUE=from-file\n").unwrap();

        let loaded = load_env_file(Some(&path)).unwrap();

        assert_eq!(loaded.as_deref(), Some(path.as_path()));
        assert_eq!(
            std::env::var("REFLECTREE_CLI_TEST_ENV_VALUE").unwrap(),
            "from-file"
        );
    }

    #[test]
    fn test_missing_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_file(Some(&dir.path().join("absent.env"))).is_err());
    }

    #[test]
    fn test_snapshot_flag_overrides_config() {
        let cli = cli::parse_args(["reflectree", "q", "--snapshot"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert!(config.snapshot);
        assert_eq!(config.leafs_limit, 3);
        assert_eq!(config.depth_limit, 3);
        assert_eq!(config.rounds, 3);
        assert!(config.stop_early);
    }
}
