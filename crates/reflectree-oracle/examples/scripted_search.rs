use std::path::PathBuf;

use reflectree_core::{SearchConfig, SearchEngine};
use reflectree_oracle::ScriptedOracle;

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("crates/reflectree-oracle/examples/sample.script.yaml"));

    let oracle = ScriptedOracle::from_path(&path).expect("failed to load oracle script");
    let config = SearchConfig::from_default_yaml().expect("default config parses");
    let mut engine = SearchEngine::new(config).expect("default config is valid");

    let solution = engine
        .run_with_hook(
            "Who was the president of Korea that has bald hair?",
            3,
            true,
            oracle,
            |report| {
                println!(
                    "round={} selected={} children={} terminatable={}",
                    report.round,
                    report.selected,
                    report.children.len(),
                    report.is_terminatable()
                );
            },
        )
        .expect("search failed");

    match solution {
        Some(solution) => println!("solution: {solution}"),
        None => println!("No solution found"),
    }
    println!("nodes={}", engine.tree().node_count());
}
