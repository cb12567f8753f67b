//! Financial calculation engine - safe arithmetic evaluation and time-value-of-money solving
//!
//! This library provides:
//! - A restricted arithmetic evaluator for user-typed formulas (no dynamic code evaluation)
//! - Compound interest and annuity formulas with a solver for any one unknown
//! - Newton-Raphson root finding with explicit divergence/non-convergence failures
//! - NPV and IRR over cash-flow sequences
//! - Sampled growth, NPV-vs-rate and cumulative series for charting
//!
//! Every operation is a pure function of its arguments and safe to call
//! concurrently.

pub mod error;
pub mod expression;
pub mod solver;
pub mod tvm;
pub mod cashflow;
pub mod series;
pub mod config;

// Re-export commonly used types
pub use error::{CalcError, CalcResult, DomainError, SolverFailure, SyntaxError};
pub use expression::evaluate;
pub use solver::{SolverConfig, SolverResult};
pub use tvm::{solve_compound, solve_compound_with, CompoundParameters, PaymentTiming, UnknownField};
pub use cashflow::{calculate_npv, compute_irr, compute_irr_with, CashFlow, CashFlowSummary};
pub use series::{cumulative_series, growth_series, npv_curve, RateRange, Sample};
pub use config::EngineConfig;
