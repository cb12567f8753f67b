//! Net present value and Internal Rate of Return (IRR)
//!
//! IRR is found with Newton-Raphson on the NPV function, evaluating NPV and
//! its derivative together in one pass over the cash flows.

use super::CashFlow;
use crate::error::{ensure_finite, CalcResult, DomainError};
use crate::solver::{newton_raphson_joint, SolverConfig};
use crate::tvm::rate_to_percent;

/// Fewest cash flows an IRR or NPV analysis accepts
pub const MIN_CASH_FLOWS: usize = 2;

/// NPV = Σ CF_t / (1 + rate)^t
pub fn calculate_npv(cash_flows: &[CashFlow], rate: f64) -> f64 {
    cash_flows
        .iter()
        .map(|cf| cf.amount / (1.0 + rate).powf(f64::from(cf.period)))
        .sum()
}

/// Calculate NPV and its derivative with respect to rate.
///
/// `d/dr CF_t / (1+r)^t = -t · CF_t / (1+r)^(t+1)`; period 0 contributes
/// nothing to the derivative.
pub fn npv_and_derivative(cash_flows: &[CashFlow], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for cf in cash_flows {
        let present_value = cf.amount / (1.0 + rate).powf(f64::from(cf.period));
        npv += present_value;
        if cf.period > 0 {
            dnpv -= cf.period as f64 * present_value / (1.0 + rate);
        }
    }

    (npv, dnpv)
}

/// Calculate the Internal Rate of Return as a percentage (14.5 for 14.5%)
/// with the default solver settings.
///
/// # Example
/// ```
/// use fincalc::{compute_irr, CashFlow};
///
/// let flows = [CashFlow::new(0, -1000.0), CashFlow::new(1, 1100.0)];
/// let irr = compute_irr(&flows).unwrap();
/// assert!((irr - 10.0).abs() < 1e-6);
/// ```
pub fn compute_irr(cash_flows: &[CashFlow]) -> CalcResult<f64> {
    compute_irr_with(cash_flows, &SolverConfig::default())
}

/// Calculate the Internal Rate of Return as a percentage using `config`
pub fn compute_irr_with(cash_flows: &[CashFlow], config: &SolverConfig) -> CalcResult<f64> {
    validate_cash_flows(cash_flows)?;

    let result = newton_raphson_joint(|rate| npv_and_derivative(cash_flows, rate), config)?;
    log::debug!(
        "IRR {} over {} cash flows in {} iterations",
        result.root,
        cash_flows.len(),
        result.iterations
    );

    Ok(ensure_finite(rate_to_percent(result.root), "IRR")?)
}

/// At least two flows, all with finite amounts
pub fn validate_cash_flows(cash_flows: &[CashFlow]) -> Result<(), DomainError> {
    if cash_flows.len() < MIN_CASH_FLOWS {
        return Err(DomainError::TooFewCashFlows {
            required: MIN_CASH_FLOWS,
            actual: cash_flows.len(),
        });
    }
    if let Some(index) = cash_flows.iter().position(|cf| !cf.amount.is_finite()) {
        return Err(DomainError::NonFiniteCashFlow { index });
    }
    Ok(())
}
