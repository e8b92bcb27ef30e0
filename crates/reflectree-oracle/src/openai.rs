use std::time::Instant;

use reflectree_core::{Critique, MAX_SCORE, Oracle, OracleCall, OracleError, Solution};
use reqwest::blocking::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::{
    ClientError, OpenAiConfig,
    prompt::{critique_schema, reflect_prompt, solution_schema, solve_prompt},
};

/// Subset of a chat completions response the oracle reads.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}

/// Decode the structured payload of the first choice.
pub fn parse_structured<T: DeserializeOwned>(response: &ChatResponse) -> Result<T, ClientError> {
    let message = &response
        .choices
        .first()
        .ok_or(ClientError::EmptyChoices)?
        .message;

    if let Some(refusal) = message.refusal.as_ref().filter(|r| !r.is_empty()) {
        return Err(ClientError::Refusal(refusal.clone()));
    }
    let content = message
        .content
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .ok_or(ClientError::EmptyContent)?;

    Ok(serde_json::from_str(content)?)
}

/// Decode a critique and reject scores outside the accepted range.
pub fn parse_critique(response: &ChatResponse) -> Result<Critique, ClientError> {
    let critique: Critique = parse_structured(response)?;
    if !critique.is_valid() {
        return Err(ClientError::ScoreOutOfRange {
            score: critique.score,
            max: MAX_SCORE,
        });
    }
    Ok(critique)
}

/// Oracle backed by an OpenAI-compatible chat completions endpoint with structured output.
/// Each call is a single blocking request; failures are returned, never retried.
#[derive(Debug, Clone)]
pub struct OpenAiOracle {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiOracle {
    pub fn new(config: OpenAiConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(OpenAiOracle { client, config })
    }

    /// Build from `OPENAI_API_KEY` and the optional overrides in the environment.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(OpenAiConfig::from_env()?)
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Request body for one structured completion.
    pub fn request_body(&self, prompt: &str, schema_name: &str, schema: Value) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": self.config.system_prompt },
                { "role": "user", "content": prompt },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": schema_name,
                    "strict": true,
                    "schema": schema,
                },
            },
        })
    }

    fn complete(&self, body: &Value) -> Result<ChatResponse, ClientError> {
        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json()?)
    }

    fn call<T>(
        &self,
        call: OracleCall,
        body: Value,
        parse: impl FnOnce(&ChatResponse) -> Result<T, ClientError>,
    ) -> Result<T, OracleError> {
        debug!(%call, model = %self.config.model, "sending oracle request");
        let started = Instant::now();
        let result = self.complete(&body).and_then(|response| parse(&response));
        info!(
            %call,
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "oracle call finished"
        );
        result.map_err(|err| err.into_oracle_error(call))
    }
}

impl Oracle for OpenAiOracle {
    fn solve(&mut self, query: &str, context: &str) -> Result<Solution, OracleError> {
        let body = self.request_body(&solve_prompt(query, context), "solution", solution_schema());
        let mut solution: Solution =
            self.call(OracleCall::Solve, body, parse_structured::<Solution>)?;
        // the model echoes the query; keep the one that was asked
        solution.query = query.to_string();
        Ok(solution)
    }

    fn reflect(&mut self, solution: &Solution) -> Result<Critique, OracleError> {
        let body = self.request_body(&reflect_prompt(solution), "reflection", critique_schema());
        self.call(OracleCall::Reflect, body, parse_critique)
    }
}
