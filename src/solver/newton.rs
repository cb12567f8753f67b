//! Newton-Raphson iteration
//!
//! `x_{k+1} = x_k - f(x_k) / f'(x_k)`, stopping when the step is below the
//! tolerance. Leaving the bounds, hitting a flat derivative, or running out
//! of iterations are reported as distinct [`SolverFailure`]s.

use super::{SolverConfig, SolverResult};
use crate::error::SolverFailure;

/// Step size for the central-difference derivative
const NUMERICAL_STEP: f64 = 1e-7;

/// Find a root of a function that returns `(f(x), f'(x))` in one evaluation.
///
/// This is the core loop; the other entry points adapt to it.
pub fn newton_raphson_joint<F>(
    mut f: F,
    config: &SolverConfig,
) -> Result<SolverResult, SolverFailure>
where
    F: FnMut(f64) -> (f64, f64),
{
    let mut x = config.initial_guess;

    for iteration in 0..config.max_iterations {
        let (fx, dfx) = f(x);

        if dfx.is_nan() || dfx.abs() < config.min_derivative {
            log::warn!("stationary derivative {:e} at x = {}", dfx, x);
            return Err(SolverFailure::StationaryDerivative {
                estimate: x,
                derivative: dfx,
                iterations: iteration,
            });
        }

        let next = x - fx / dfx;
        log::trace!("newton step {}: x = {} f = {:e} f' = {:e} -> {}", iteration, x, fx, dfx, next);

        if !config.in_bounds(next) {
            log::warn!("newton iterate {} left [{}, {}]", next, config.lower_bound, config.upper_bound);
            return Err(SolverFailure::Divergence {
                estimate: next,
                iterations: iteration + 1,
            });
        }

        if (next - x).abs() < config.tolerance {
            log::debug!("converged to {} in {} iterations", next, iteration + 1);
            return Ok(SolverResult {
                root: next,
                iterations: iteration + 1,
            });
        }

        x = next;
    }

    log::warn!("no convergence after {} iterations, last estimate {}", config.max_iterations, x);
    Err(SolverFailure::NonConvergence {
        estimate: x,
        iterations: config.max_iterations,
    })
}

/// Find a root given the function and its analytic derivative.
///
/// # Example
/// ```
/// use fincalc::solver::{newton_raphson, SolverConfig};
///
/// let config = SolverConfig::default().with_initial_guess(1.5).with_tolerance(1e-12);
/// let result = newton_raphson(|x| x * x - 2.0, |x| 2.0 * x, &config).unwrap();
/// assert!((result.root - 2f64.sqrt()).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    config: &SolverConfig,
) -> Result<SolverResult, SolverFailure>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    newton_raphson_joint(|x| (f(x), df(x)), config)
}

/// Find a root using a central-difference estimate of the derivative
pub fn newton_raphson_numerical<F>(
    f: F,
    config: &SolverConfig,
) -> Result<SolverResult, SolverFailure>
where
    F: Fn(f64) -> f64,
{
    newton_raphson_joint(
        |x| {
            let slope = (f(x + NUMERICAL_STEP) - f(x - NUMERICAL_STEP)) / (2.0 * NUMERICAL_STEP);
            (f(x), slope)
        },
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tight() -> SolverConfig {
        SolverConfig::default().with_tolerance(1e-12)
    }

    #[test]
    fn test_sqrt_2() {
        let config = tight().with_initial_guess(1.5);
        let result = newton_raphson(|x| x * x - 2.0, |x| 2.0 * x, &config).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_numerical_derivative() {
        let config = tight().with_initial_guess(1.5);
        let result = newton_raphson_numerical(|x| x * x - 2.0, &config).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-8);
    }

    #[test]
    fn test_joint_evaluation() {
        // Root of (1+x)^2 - 1.21 is 0.1
        let config = tight().with_initial_guess(0.5);
        let result = newton_raphson_joint(|x| ((1.0 + x).powi(2) - 1.21, 2.0 * (1.0 + x)), &config)
            .unwrap();

        assert_relative_eq!(result.root, 0.1, epsilon = 1e-10);
    }

    #[test]
    fn test_stationary_derivative() {
        // x^2 + 1 starting at 0: derivative is exactly zero
        let config = SolverConfig::default().with_initial_guess(0.0);
        let err = newton_raphson(|x| x * x + 1.0, |x| 2.0 * x, &config).unwrap_err();

        assert!(matches!(err, SolverFailure::StationaryDerivative { estimate, .. } if estimate == 0.0));
    }

    #[test]
    fn test_divergence_reports_estimate() {
        // Root at 50 lies beyond the default upper bound of 10
        let err = newton_raphson(|x| x - 50.0, |_| 1.0, &SolverConfig::default()).unwrap_err();

        match err {
            SolverFailure::Divergence { estimate, iterations } => {
                assert_relative_eq!(estimate, 50.0);
                assert_eq!(iterations, 1);
            }
            other => panic!("expected divergence, got {:?}", other),
        }
    }

    #[test]
    fn test_non_convergence() {
        // x^2 + 1 has no real root; Newton wanders without settling
        let config = SolverConfig::default()
            .with_initial_guess(0.5)
            .with_bounds(-1e9, 1e9)
            .with_max_iterations(25);
        let err = newton_raphson(|x| x * x + 1.0, |x| 2.0 * x, &config).unwrap_err();

        assert!(matches!(err, SolverFailure::NonConvergence { iterations: 25, .. }));
        assert!(err.last_estimate().is_finite());
    }

    #[test]
    fn test_nan_is_divergence() {
        let err = newton_raphson(|_| f64::NAN, |_| 1.0, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, SolverFailure::Divergence { .. }));
    }
}
