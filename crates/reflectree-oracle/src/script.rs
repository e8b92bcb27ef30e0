use std::{collections::VecDeque, fs, path::Path};

use reflectree_core::{Critique, MAX_SCORE, Oracle, OracleCall, OracleError, Solution};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Serializable oracle script used for offline runs.
pub struct OracleScript {
    /// One entry per child the engine will create, in creation order.
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A scripted solve/reflect pair.
pub struct ScriptStep {
    /// Answer text; omitted or null when the attempt has no answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub description: String,
    pub reflections: String,
    pub score: u8,
    #[serde(default)]
    pub found_solution: bool,
}

impl OracleScript {
    /// Parse and validate a script from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ClientError> {
        let script: OracleScript = serde_yaml::from_str(yaml)?;
        script.validate()?;
        Ok(script)
    }

    /// Reject empty scripts and scores outside `0..=MAX_SCORE`.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.steps.is_empty() {
            return Err(ClientError::InvalidStep {
                step: 0,
                reason: "script must contain at least one step".to_string(),
            });
        }
        for (step, entry) in self.steps.iter().enumerate() {
            if entry.score > MAX_SCORE {
                return Err(ClientError::InvalidStep {
                    step,
                    reason: format!("score {} is outside 0..={MAX_SCORE}", entry.score),
                });
            }
            if entry.description.trim().is_empty() {
                return Err(ClientError::InvalidStep {
                    step,
                    reason: "description must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Load and validate an oracle script from a YAML file.
pub fn load_script(path: impl AsRef<Path>) -> Result<OracleScript, ClientError> {
    let yaml = fs::read_to_string(path)?;
    OracleScript::from_yaml_str(&yaml)
}

/// Serialize and write an oracle script to YAML.
pub fn save_script(path: impl AsRef<Path>, script: &OracleScript) -> Result<(), ClientError> {
    let yaml = serde_yaml::to_string(script)?;
    fs::write(path, yaml)?;
    Ok(())
}

#[derive(Debug, Clone)]
/// Oracle that replays a script step by step.
/// `solve` consumes the next step; `reflect` returns that step's critique.
pub struct ScriptedOracle {
    steps: VecDeque<ScriptStep>,
    pending: Option<Critique>,
}

impl ScriptedOracle {
    pub fn new(script: OracleScript) -> Self {
        ScriptedOracle {
            steps: script.steps.into(),
            pending: None,
        }
    }

    /// Build from a YAML script file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        Ok(Self::new(load_script(path)?))
    }

    /// Steps not yet consumed by `solve`.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl Oracle for ScriptedOracle {
    fn solve(&mut self, query: &str, context: &str) -> Result<Solution, OracleError> {
        let step = self
            .steps
            .pop_front()
            .ok_or_else(|| ClientError::ScriptExhausted.into_oracle_error(OracleCall::Solve))?;
        debug!(remaining = self.steps.len(), context_len = context.len(), "replaying script step");

        self.pending = Some(Critique::new(step.reflections, step.score, step.found_solution));
        Ok(Solution::new(query, step.answer, step.description))
    }

    fn reflect(&mut self, _solution: &Solution) -> Result<Critique, OracleError> {
        self.pending
            .take()
            .ok_or_else(|| ClientError::NoPendingCritique.into_oracle_error(OracleCall::Reflect))
    }
}
