use reflectree_core::{OracleCall, OracleError};
use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for oracle clients, scripts and their configuration.
pub enum ClientError {
    #[error("environment variable {var} is not set")]
    MissingApiKey { var: &'static str },

    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat completion returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chat completion contained no choices")]
    EmptyChoices,

    #[error("model refused to answer: {0}")]
    Refusal(String),

    #[error("chat completion message had no content")]
    EmptyContent,

    #[error("critique score {score} is outside 0..={max}")]
    ScoreOutOfRange { score: u8, max: u8 },

    #[error("failed to read script file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse script YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("script step {step} is invalid: {reason}")]
    InvalidStep { step: usize, reason: String },

    #[error("script has no step left")]
    ScriptExhausted,

    #[error("reflect called before a solution was proposed")]
    NoPendingCritique,
}

impl ClientError {
    /// Whether the failure means the oracle answered without a usable structured result.
    pub fn is_unparseable(&self) -> bool {
        matches!(
            self,
            ClientError::Json(_)
                | ClientError::EmptyChoices
                | ClientError::Refusal(_)
                | ClientError::EmptyContent
                | ClientError::ScoreOutOfRange { .. }
                | ClientError::ScriptExhausted
                | ClientError::NoPendingCritique
        )
    }

    /// Attach the failing call and convert into the engine's error type.
    pub fn into_oracle_error(self, call: OracleCall) -> OracleError {
        if self.is_unparseable() {
            OracleError::unparseable(call, self.to_string())
        } else {
            OracleError::Backend {
                call,
                source: Box::new(self),
            }
        }
    }
}
