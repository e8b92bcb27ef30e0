use std::collections::VecDeque;

use crate::tree::{
    oracle::{Oracle, OracleCall, OracleError},
    proposal::{Critique, Solution},
};

/// Oracle stub that answers with numbered solutions and replays scripted critiques.
/// Fails with `Unparseable` once the script runs out.
#[derive(Debug, Default)]
pub(crate) struct ScriptedOracle {
    critiques: VecDeque<(u8, bool)>,
    solved: usize,
    pub contexts: Vec<String>,
}

impl ScriptedOracle {
    pub fn new(critiques: &[(u8, bool)]) -> Self {
        ScriptedOracle {
            critiques: critiques.iter().copied().collect(),
            solved: 0,
            contexts: Vec::new(),
        }
    }
}

impl Oracle for ScriptedOracle {
    fn solve(&mut self, query: &str, context: &str) -> Result<Solution, OracleError> {
        if self.critiques.is_empty() {
            return Err(OracleError::unparseable(OracleCall::Solve, "script exhausted"));
        }
        self.solved += 1;
        self.contexts.push(context.to_string());
        Ok(Solution::new(
            query,
            Some(format!("answer-{}", self.solved)),
            format!("reasoning-{}", self.solved),
        ))
    }

    fn reflect(&mut self, solution: &Solution) -> Result<Critique, OracleError> {
        let (score, found) = self
            .critiques
            .pop_front()
            .ok_or_else(|| OracleError::unparseable(OracleCall::Reflect, "script exhausted"))?;
        Ok(Critique::new(
            format!("critique of {}", solution.answer.text.as_deref().unwrap_or("nothing")),
            score,
            found,
        ))
    }
}

/// Build a critique with a given score that never claims a solution.
pub(crate) fn scored(score: u8) -> Critique {
    Critique::new("scored", score, false)
}

pub(crate) fn solution(text: &str) -> Solution {
    Solution::new("query", Some(text.to_string()), "because")
}
