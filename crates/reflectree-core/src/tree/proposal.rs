use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest score an oracle critique may assign.
pub const MAX_SCORE: u8 = 9;

/// The oracle's answer to a query, possibly without a definite answer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// The answer itself, `None` when the oracle could not commit to one.
    #[serde(rename = "answer", default)]
    pub text: Option<String>,
    /// Reasoning behind the answer.
    #[serde(rename = "description")]
    pub rationale: String,
}

/// A proposed solution: the query it answers and the answer given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub query: String,
    pub answer: Answer,
}

impl Solution {
    pub fn new(query: impl Into<String>, text: Option<String>, rationale: impl Into<String>) -> Self {
        Solution {
            query: query.into(),
            answer: Answer {
                text,
                rationale: rationale.into(),
            },
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "question: {}, answer: {}, description: {}",
            self.query,
            self.answer.text.as_deref().unwrap_or("None"),
            self.answer.rationale
        )
    }
}

/// The oracle's assessment of a solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critique {
    /// Narrative assessment.
    #[serde(rename = "reflections")]
    pub narrative: String,
    /// Quality score in `[0, MAX_SCORE]`.
    pub score: u8,
    /// Whether the oracle considers the query solved.
    pub found_solution: bool,
}

impl Critique {
    pub fn new(narrative: impl Into<String>, score: u8, found_solution: bool) -> Self {
        Critique {
            narrative: narrative.into(),
            score,
            found_solution,
        }
    }

    /// Placeholder critique carried by the root node.
    pub fn root() -> Self {
        Critique::new("Can't find the solution", 1, false)
    }

    /// Reward used for backpropagation, `score / 10`.
    pub fn normalized_score(&self) -> f64 {
        f64::from(self.score) / 10.0
    }

    /// Check the score lies in the accepted range
    pub fn is_valid(&self) -> bool {
        self.score <= MAX_SCORE
    }
}

impl fmt::Display for Critique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reflection: {}, score: {}, found_solution: {}",
            self.narrative, self.score, self.found_solution
        )
    }
}
