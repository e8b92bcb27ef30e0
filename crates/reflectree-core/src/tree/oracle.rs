use std::fmt;

use thiserror::Error;

use crate::tree::proposal::{Critique, Solution};

/// Which oracle call produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleCall {
    Solve,
    Reflect,
}

impl fmt::Display for OracleCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleCall::Solve => f.write_str("solve"),
            OracleCall::Reflect => f.write_str("reflect"),
        }
    }
}

/// Failure of an oracle call. Every variant is fatal to a search run.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle {call} call returned no structured result: {detail}")]
    Unparseable { call: OracleCall, detail: String },

    #[error("oracle {call} call failed: {source}")]
    Backend {
        call: OracleCall,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl OracleError {
    pub fn unparseable(call: OracleCall, detail: impl Into<String>) -> Self {
        OracleError::Unparseable {
            call,
            detail: detail.into(),
        }
    }

    /// The call that failed
    pub fn call(&self) -> OracleCall {
        match self {
            OracleError::Unparseable { call, .. } | OracleError::Backend { call, .. } => *call,
        }
    }
}

/// External reasoning service that proposes solutions and critiques them.
///
/// The engine calls `solve` then `reflect` once per child it creates, strictly in
/// creation order. Implementations must not retry internally on the engine's behalf;
/// an `Err` aborts the run.
pub trait Oracle {
    /// Propose a solution to `query`, given the accumulated `context` of ancestor solutions.
    fn solve(&mut self, query: &str, context: &str) -> Result<Solution, OracleError>;

    /// Critique a proposed solution.
    fn reflect(&mut self, solution: &Solution) -> Result<Critique, OracleError>;
}

impl<O: Oracle + ?Sized> Oracle for &mut O {
    fn solve(&mut self, query: &str, context: &str) -> Result<Solution, OracleError> {
        (**self).solve(query, context)
    }

    fn reflect(&mut self, solution: &Solution) -> Result<Critique, OracleError> {
        (**self).reflect(solution)
    }
}

impl<O: Oracle + ?Sized> Oracle for Box<O> {
    fn solve(&mut self, query: &str, context: &str) -> Result<Solution, OracleError> {
        (**self).solve(query, context)
    }

    fn reflect(&mut self, solution: &Solution) -> Result<Critique, OracleError> {
        (**self).reflect(solution)
    }
}
