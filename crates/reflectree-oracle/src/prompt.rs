use reflectree_core::{MAX_SCORE, Solution};
use serde_json::{Value, json};

/// User prompt asking the model to propose a solution.
pub fn solve_prompt(query: &str, context: &str) -> String {
    let context = if context.trim().is_empty() {
        "(none)"
    } else {
        context
    };
    format!(
        "## Task\n\
         Answer the query using the previous attempts in <context> where they help.\n\
         If you are not confident, leave the answer null, but always describe your reasoning.\n\
         \n\
         ## <context>\n\
         {context}\n\
         \n\
         ## <query>\n\
         {query}\n"
    )
}

/// User prompt asking the model to critique a proposed solution.
pub fn reflect_prompt(solution: &Solution) -> String {
    let rendered = serde_json::to_string_pretty(solution).unwrap_or_else(|_| solution.to_string());
    format!(
        "## Task\n\
         Critique the solution below for rationality, appropriateness and correctness.\n\
         Score it from 0 to {MAX_SCORE} and state whether it fully answers the query.\n\
         \n\
         ## <solution>\n\
         {rendered}\n"
    )
}

/// JSON schema the model must follow when proposing a solution.
pub fn solution_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "query": { "type": "string" },
            "answer": {
                "type": "object",
                "properties": {
                    "answer": {
                        "type": ["string", "null"],
                        "description": "Answer to the query, or null when it cannot be judged"
                    },
                    "description": {
                        "type": "string",
                        "description": "Reasoning behind the answer"
                    }
                },
                "required": ["answer", "description"],
                "additionalProperties": false
            }
        },
        "required": ["query", "answer"],
        "additionalProperties": false
    })
}

/// JSON schema the model must follow when critiquing a solution.
pub fn critique_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "reflections": {
                "type": "string",
                "description": "Rationality, appropriateness and correctness of the answer"
            },
            "score": {
                "type": "integer",
                "description": format!("Score based on the reflection, from 0 to {MAX_SCORE}")
            },
            "found_solution": {
                "type": "boolean",
                "description": "Whether the query is solved"
            }
        },
        "required": ["reflections", "score", "found_solution"],
        "additionalProperties": false
    })
}
