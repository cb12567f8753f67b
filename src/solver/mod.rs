//! Newton-Raphson root finding for rate and IRR problems

mod newton;

pub use newton::{newton_raphson, newton_raphson_joint, newton_raphson_numerical};

use serde::{Deserialize, Serialize};

/// Default starting rate (10%)
pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
/// Iterates below -99% are treated as divergence
pub const DEFAULT_LOWER_BOUND: f64 = -0.99;
/// Iterates above 1000% are treated as divergence
pub const DEFAULT_UPPER_BOUND: f64 = 10.0;
pub const DEFAULT_MIN_DERIVATIVE: f64 = 1e-12;

/// Newton-Raphson settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Starting point of the iteration
    pub initial_guess: f64,

    /// Iteration cap; reaching it without convergence is a failure
    pub max_iterations: u32,

    /// Convergence threshold on `|x_{k+1} - x_k|`
    pub tolerance: f64,

    /// Iterates outside `[lower_bound, upper_bound]` are divergence
    pub lower_bound: f64,
    pub upper_bound: f64,

    /// `|f'(x)|` below this counts as a stationary point
    pub min_derivative: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            min_derivative: DEFAULT_MIN_DERIVATIVE,
        }
    }
}

impl SolverConfig {
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_bounds(mut self, lower_bound: f64, upper_bound: f64) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self
    }

    /// Whether an iterate is finite and inside the configured bounds
    pub fn in_bounds(&self, x: f64) -> bool {
        x.is_finite() && x >= self.lower_bound && x <= self.upper_bound
    }
}

/// A converged root
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    pub root: f64,
    /// Newton steps taken, including the converging one
    pub iterations: u32,
}
