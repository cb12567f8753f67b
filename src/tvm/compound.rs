//! Solving a compound interest / annuity problem for one unknown field

use super::formulas::{
    annuity_fv, annuity_pv, compound_fv, compound_pv, fv_annuity_factor_with_slope,
    pv_annuity_factor,
};
use super::params::{CompoundParameters, PaymentTiming, UnknownField};
use super::rate_to_percent;
use crate::error::{ensure_finite, CalcResult, DomainError};
use crate::solver::{newton_raphson_joint, SolverConfig};

/// Solve for `unknown` using the default solver settings.
///
/// Rates go in as decimal fractions. A solved rate comes back as a
/// percentage (5.0 for 5%); every other unknown comes back in its own units.
///
/// # Example
/// ```
/// use fincalc::{solve_compound, CompoundParameters, PaymentTiming, UnknownField};
///
/// let params = CompoundParameters::new(0.05, 10.0, 1000.0, 0.0, 0.0, PaymentTiming::End);
/// let fv = solve_compound(UnknownField::FutureValue, &params).unwrap();
/// assert!((fv - 1628.89).abs() < 0.01);
/// ```
pub fn solve_compound(unknown: UnknownField, params: &CompoundParameters) -> CalcResult<f64> {
    solve_compound_with(unknown, params, &SolverConfig::default())
}

/// Solve for `unknown`, using `config` when the rate needs Newton-Raphson
pub fn solve_compound_with(
    unknown: UnknownField,
    params: &CompoundParameters,
    config: &SolverConfig,
) -> CalcResult<f64> {
    validate(unknown, params)?;

    let CompoundParameters {
        rate: r,
        periods: n,
        present_value: pv,
        payment: pmt,
        future_value: fv,
        timing,
    } = *params;

    log::debug!("solving for {} (annuity: {})", unknown, params.has_annuity());

    let value = match unknown {
        UnknownField::Rate => return solve_rate(params, config),
        UnknownField::Periods => solve_periods(params)?,
        UnknownField::PresentValue => {
            if pmt == 0.0 {
                compound_pv(fv, r, n)
            } else {
                fv / (1.0 + r).powf(n) - annuity_pv(pmt, r, n, timing)
            }
        }
        UnknownField::Payment => {
            if pmt == 0.0 {
                0.0
            } else {
                (pv - fv / (1.0 + r).powf(n)) / (pv_annuity_factor(r, n) * timing.adjustment(r))
            }
        }
        UnknownField::FutureValue => {
            if pmt == 0.0 {
                compound_fv(pv, r, n)
            } else {
                compound_fv(pv, r, n) + annuity_fv(pmt, r, n, timing)
            }
        }
    };

    Ok(ensure_finite(value, unknown.label())?)
}

/// Number of periods.
///
/// Exact for pure compounding. With a payment this uses
/// `ln((FV·r + PMT) / (PV·r + PMT)) / ln(1+r)`, an approximation that
/// ignores the annuity-due timing adjustment.
pub fn solve_periods(params: &CompoundParameters) -> Result<f64, DomainError> {
    let CompoundParameters {
        rate: r,
        present_value: pv,
        payment: pmt,
        future_value: fv,
        ..
    } = *params;

    let periods = if pmt == 0.0 {
        (fv / pv).ln() / (1.0 + r).ln()
    } else {
        ((fv * r + pmt) / (pv * r + pmt)).ln() / (1.0 + r).ln()
    };

    ensure_finite(periods, "periods")
}

/// Periodic rate as a percentage.
///
/// Pure compounding with same-signed PV and FV has the closed form
/// `(FV/PV)^(1/n) - 1`; everything else goes through Newton-Raphson on
/// `f(r) = PV(1+r)^n + PMT·[((1+r)^n - 1)/r]·k - FV`.
pub fn solve_rate(params: &CompoundParameters, config: &SolverConfig) -> CalcResult<f64> {
    let CompoundParameters {
        periods: n,
        present_value: pv,
        payment: pmt,
        future_value: fv,
        timing,
        ..
    } = *params;

    if pmt == 0.0 && pv != 0.0 && fv / pv > 0.0 {
        let rate = (fv / pv).powf(1.0 / n) - 1.0;
        log::debug!("closed-form rate {}", rate);
        return Ok(ensure_finite(rate_to_percent(rate), "rate")?);
    }

    let result = newton_raphson_joint(|r| rate_equation(r, n, pv, pmt, fv, timing), config)?;
    log::debug!("solved rate {} in {} iterations", result.root, result.iterations);

    Ok(ensure_finite(rate_to_percent(result.root), "rate")?)
}

/// `f(r)` and `f'(r)` for the single-annuity rate equation
fn rate_equation(r: f64, n: f64, pv: f64, pmt: f64, fv: f64, timing: PaymentTiming) -> (f64, f64) {
    let growth = (1.0 + r).powf(n);
    let d_growth = n * (1.0 + r).powf(n - 1.0);
    let (factor, d_factor) = fv_annuity_factor_with_slope(r, n);
    let k = timing.adjustment(r);
    let d_k = match timing {
        PaymentTiming::Begin => 1.0,
        PaymentTiming::End => 0.0,
    };

    let value = pv * growth + pmt * factor * k - fv;
    let slope = pv * d_growth + pmt * (d_factor * k + factor * d_k);
    (value, slope)
}

fn require(value: f64, field: &'static str) -> Result<(), DomainError> {
    if value.is_finite() && value != 0.0 {
        Ok(())
    } else {
        Err(DomainError::MissingField { field })
    }
}

fn require_finite(value: f64, field: &'static str) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonFiniteInput { field })
    }
}

/// Rate and periods must be usable unless solved for; amounts must be finite
fn validate(unknown: UnknownField, params: &CompoundParameters) -> Result<(), DomainError> {
    if unknown != UnknownField::Rate {
        require(params.rate, "rate")?;
    }
    if unknown != UnknownField::Periods {
        require(params.periods, "periods")?;
    }
    if unknown != UnknownField::PresentValue {
        require_finite(params.present_value, "present value")?;
    }
    if unknown != UnknownField::Payment {
        require_finite(params.payment, "payment")?;
    }
    if unknown != UnknownField::FutureValue {
        require_finite(params.future_value, "future value")?;
    }
    Ok(())
}
