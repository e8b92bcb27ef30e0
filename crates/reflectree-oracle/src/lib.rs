mod config;
mod error;
mod openai;
pub mod prompt;
mod script;

pub use config::{
    API_KEY_VAR, BASE_URL_VAR, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TIMEOUT_SECS, MODEL_VAR, OpenAiConfig, TIMEOUT_VAR,
};
pub use error::ClientError;
pub use openai::{ChatChoice, ChatMessage, ChatResponse, OpenAiOracle, parse_critique, parse_structured};
pub use script::{OracleScript, ScriptStep, ScriptedOracle, load_script, save_script};
