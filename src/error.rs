//! Error types shared by the evaluator, formula library and root finder

use thiserror::Error;

/// Result type for the financial operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Failure to parse or evaluate an arithmetic expression.
///
/// Positions are character offsets into the normalized expression
/// (glyphs replaced, whitespace removed).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("illegal character '{character}' at position {position}")]
    IllegalCharacter { character: char, position: usize },

    #[error("unbalanced parentheses: '(' at position {position} is never closed")]
    UnbalancedParentheses { position: usize },

    #[error("trailing input '{token}' at position {position}")]
    TrailingInput { token: String, position: usize },

    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("invalid number literal '{literal}' at position {position}")]
    InvalidNumber { literal: String, position: usize },

    #[error("expression nested too deeply at position {position}")]
    NestingTooDeep { position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,
}

/// Inputs that make a financial formula meaningless.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A required field was zero or non-finite while not being the unknown
    #[error("{field} must be a non-zero finite number")]
    MissingField { field: &'static str },

    #[error("{field} must be a finite number")]
    NonFiniteInput { field: &'static str },

    #[error("at least {required} cash flows are required, got {actual}")]
    TooFewCashFlows { required: usize, actual: usize },

    #[error("cash flow {index} has a non-finite amount")]
    NonFiniteCashFlow { index: usize },

    /// A closed form produced infinity or NaN
    #[error("{operation} produced a non-finite result")]
    NonFinite { operation: &'static str },

    #[error("invalid rate range: min {min}, max {max}, step {step}")]
    InvalidRange { min: f64, max: f64, step: f64 },

    #[error("{operation} would need {requested} samples, limit is {limit}")]
    TooManySamples {
        operation: &'static str,
        requested: f64,
        limit: usize,
    },
}

/// Newton-Raphson did not produce a usable root.
///
/// Every variant carries the last estimate for diagnostics only; it is
/// never a valid result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverFailure {
    #[error("iteration diverged to {estimate} after {iterations} iterations")]
    Divergence { estimate: f64, iterations: u32 },

    #[error("derivative vanished ({derivative:.2e}) at {estimate} after {iterations} iterations")]
    StationaryDerivative {
        estimate: f64,
        derivative: f64,
        iterations: u32,
    },

    #[error("no convergence after {iterations} iterations (last estimate {estimate})")]
    NonConvergence { estimate: f64, iterations: u32 },
}

impl SolverFailure {
    /// Last estimate reached before the solver gave up
    pub fn last_estimate(&self) -> f64 {
        match *self {
            SolverFailure::Divergence { estimate, .. }
            | SolverFailure::StationaryDerivative { estimate, .. }
            | SolverFailure::NonConvergence { estimate, .. } => estimate,
        }
    }
}

/// Any failure surfaced by the public operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("solver failure: {0}")]
    Solver(#[from] SolverFailure),
}

/// Reject infinities and NaN coming out of a closed form
pub(crate) fn ensure_finite(value: f64, operation: &'static str) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite { operation })
    }
}
