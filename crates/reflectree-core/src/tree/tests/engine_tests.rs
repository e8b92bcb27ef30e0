use crate::tree::{
    config::SearchConfig,
    engine::{RoundReport, SearchEngine},
    error::RunError,
    oracle::{Oracle, OracleCall, OracleError},
    proposal::{Critique, Solution},
    termination::TerminationReason,
    tests::support::ScriptedOracle,
};

fn config(depth_limit: usize, leafs_limit: usize) -> SearchConfig {
    SearchConfig {
        depth_limit,
        leafs_limit,
        ..SearchConfig::default()
    }
}

#[test]
fn single_round_with_found_solution_returns_it() {
    let mut engine = SearchEngine::new(config(5, 2)).expect("valid config");
    let mut oracle = ScriptedOracle::new(&[(9, true), (3, false)]);

    let solution = engine
        .run("who?", 1, true, &mut oracle)
        .expect("run should succeed")
        .expect("a solution should be found");

    assert_eq!(solution.answer.text.as_deref(), Some("answer-1"));
    assert_eq!(solution.query, "who?");
    assert_eq!(engine.tree().node_count(), 3);
}

#[test]
fn stop_early_skips_remaining_rounds() {
    let mut engine = SearchEngine::new(config(5, 3)).expect("valid config");
    let mut oracle = ScriptedOracle::new(&[(2, false), (9, true), (4, false), (5, false)]);
    let mut reports: Vec<RoundReport> = Vec::new();

    let solution = engine
        .run_with_hook("q", 3, true, &mut oracle, |report| reports.push(report.clone()))
        .expect("run should succeed");

    assert_eq!(solution.and_then(|s| s.answer.text), Some("answer-2".to_string()));
    assert_eq!(reports.len(), 1);
    assert_eq!(engine.tree().node_count(), 4);

    let termination = reports[0].termination.as_ref().expect("terminatable");
    assert_eq!(termination.reason, TerminationReason::SolutionFound);
    assert_eq!(termination.node, reports[0].children[1]);
}

#[test]
fn without_stop_early_every_round_runs() {
    let mut engine = SearchEngine::new(config(10, 1)).expect("valid config");
    let mut oracle = ScriptedOracle::new(&[(9, true), (4, false), (4, false)]);
    let mut rounds = 0;

    let solution = engine
        .run_with_hook("q", 3, false, &mut oracle, |_| rounds += 1)
        .expect("run should succeed");

    // later quiet rounds keep the solution from the first round
    assert_eq!(rounds, 3);
    assert_eq!(solution.and_then(|s| s.answer.text), Some("answer-1".to_string()));
    assert_eq!(engine.tree().node_count(), 4);
}

#[test]
fn quiet_rounds_return_no_solution() {
    let mut engine = SearchEngine::new(config(10, 2)).expect("valid config");
    let mut oracle = ScriptedOracle::new(&[(3, false), (4, false), (5, false), (6, false)]);

    let solution = engine.run("q", 2, true, &mut oracle).expect("run should succeed");

    assert!(solution.is_none());
    assert_eq!(engine.tree().node_count(), 5);
}

#[test]
fn depth_limit_stops_without_solution() {
    let mut engine = SearchEngine::new(config(2, 1)).expect("valid config");
    let mut oracle = ScriptedOracle::new(&[(3, false), (3, false), (3, false)]);
    let mut reports: Vec<RoundReport> = Vec::new();

    let solution = engine
        .run_with_hook("q", 3, true, &mut oracle, |report| reports.push(report.clone()))
        .expect("run should succeed");

    assert!(solution.is_none());
    assert_eq!(reports.len(), 2);
    assert!(!reports[0].is_terminatable());
    assert_eq!(
        reports[1].termination.as_ref().map(|t| t.reason),
        Some(TerminationReason::DepthExceeded { depth: 3, limit: 2 })
    );
}

#[test]
fn expansion_follows_the_best_branch_and_passes_its_context() {
    let mut engine = SearchEngine::new(config(10, 2)).expect("valid config");
    let mut oracle = ScriptedOracle::new(&[(2, false), (7, false), (1, false), (1, false)]);
    let mut reports: Vec<RoundReport> = Vec::new();

    engine
        .run_with_hook("q", 2, true, &mut oracle, |report| reports.push(report.clone()))
        .expect("run should succeed");

    assert_eq!(reports[0].selected, engine.tree().root_id());
    assert_eq!(reports[1].selected, reports[0].children[1]);

    assert_eq!(oracle.contexts[0], "");
    assert_eq!(oracle.contexts[1], "");
    assert!(oracle.contexts[2].contains("answer-2"));
    assert!(!oracle.contexts[2].contains("answer-1"));
    assert_eq!(oracle.contexts[2], oracle.contexts[3]);
}

#[test]
fn children_are_linked_exactly_once_across_rounds() {
    let mut engine = SearchEngine::new(config(10, 2)).expect("valid config");
    let mut oracle = ScriptedOracle::new(&[(5, false); 6]);
    let mut links = Vec::new();

    engine
        .run_with_hook("q", 3, false, &mut oracle, |report| links.push(report.links_added))
        .expect("run should succeed");

    assert_eq!(links, vec![2, 2, 2]);
    let linked: usize = engine.tree().nodes().map(|node| node.children().len()).sum();
    assert_eq!(linked, engine.tree().node_count() - 1);
}

#[test]
fn backpropagation_uses_normalized_scores() {
    let mut engine = SearchEngine::new(config(10, 2)).expect("valid config");
    let mut oracle = ScriptedOracle::new(&[(4, false), (8, false), (6, false), (2, false)]);
    let mut reports: Vec<RoundReport> = Vec::new();

    engine
        .run_with_hook("q", 2, false, &mut oracle, |report| reports.push(report.clone()))
        .expect("run should succeed");

    let parent = engine.tree().node(reports[1].selected).expect("parent");
    assert_eq!(parent.visits(), 3);
    assert!((parent.value() - (0.8 + 0.6 + 0.2) / 3.0).abs() < 1e-12);

    let root = engine.tree().node(engine.tree().root_id()).expect("root");
    assert_eq!(root.visits(), 0);
    assert_eq!(root.value(), 0.0);
}

#[test]
fn oracle_failure_aborts_the_run_without_snapshot() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config(10, 2);
    config.snapshot = true;
    config.snapshot_dir = dir.path().to_path_buf();
    config.metadata.snapshot_name = "aborted".to_string();

    let mut engine = SearchEngine::new(config).expect("valid config");
    let mut oracle = ScriptedOracle::new(&[(3, false)]);

    let err = engine
        .run("q", 3, true, &mut oracle)
        .expect_err("exhausted oracle should fail");

    assert!(matches!(
        err,
        RunError::Oracle(OracleError::Unparseable {
            call: OracleCall::Solve,
            ..
        })
    ));
    assert!(!dir.path().join("aborted.json").exists());
}

#[test]
fn run_configured_uses_config_rounds_and_snapshot() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config(10, 1);
    config.rounds = 2;
    config.stop_early = false;
    config.snapshot = true;
    config.snapshot_dir = dir.path().to_path_buf();
    config.metadata.snapshot_name = "configured".to_string();

    let mut engine = SearchEngine::new(config).expect("valid config");
    let mut oracle = ScriptedOracle::new(&[(3, false), (3, false)]);

    engine
        .run_configured("q", &mut oracle)
        .expect("run should succeed");

    assert_eq!(engine.tree().node_count(), 3);
    assert!(dir.path().join("configured.json").exists());
}

#[test]
fn invalid_config_is_rejected() {
    let err = SearchEngine::new(config(3, 0)).expect_err("zero leafs should fail");
    assert!(err.to_string().contains("leafs_limit"));
}

/// Oracle that always answers but scores every attempt above the accepted range.
struct OverscoringOracle;

impl Oracle for OverscoringOracle {
    fn solve(&mut self, query: &str, _context: &str) -> Result<Solution, OracleError> {
        Ok(Solution::new(query, Some("loud".to_string()), "overconfident"))
    }

    fn reflect(&mut self, _solution: &Solution) -> Result<Critique, OracleError> {
        Ok(Critique::new("far too generous", 200, false))
    }
}

#[test]
fn out_of_range_score_aborts_before_the_node_is_stored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config(5, 1);
    config.snapshot = true;
    config.snapshot_dir = dir.path().to_path_buf();
    config.metadata.snapshot_name = "overscored".to_string();

    let mut engine = SearchEngine::new(config).expect("valid config");
    let err = engine
        .run("q", 1, true, OverscoringOracle)
        .expect_err("score 200 must be rejected");

    assert!(matches!(
        err,
        RunError::Oracle(OracleError::Unparseable {
            call: OracleCall::Reflect,
            ..
        })
    ));
    assert_eq!(engine.tree().node_count(), 1);
    assert!(engine.tree().nodes().all(|node| node.value() <= 1.0));
    assert!(!dir.path().join("overscored.json").exists());
}
