//! Sampled series for charting
//!
//! Every generator is a pure function of its inputs and returns a fresh
//! `Vec`, so a series can be regenerated at any time with the same result.

use crate::cashflow::{calculate_npv, validate_cash_flows, CashFlow};
use crate::error::DomainError;
use crate::tvm::formulas::total_fv;
use crate::tvm::{rate_to_percent, CompoundParameters};
use serde::{Deserialize, Serialize};

/// Most points an NPV curve may hold
pub const MAX_CURVE_POINTS: usize = 100_000;

/// Most periods a growth series may span
pub const MAX_GROWTH_PERIODS: usize = 10_000;

/// One point of a generated series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Inclusive range of discount rates (decimal fractions)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for RateRange {
    /// -10% to +30% in 1% steps
    fn default() -> Self {
        Self {
            min: -0.10,
            max: 0.30,
            step: 0.01,
        }
    }
}

impl RateRange {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// The rates in the range, computed by index to avoid accumulated drift.
    ///
    /// Rates must stay above -100%, where discounting is undefined.
    pub fn rates(&self) -> Result<Vec<f64>, DomainError> {
        let valid = self.min.is_finite()
            && self.max.is_finite()
            && self.step.is_finite()
            && self.step > 0.0
            && self.min > -1.0
            && self.min <= self.max;
        if !valid {
            return Err(DomainError::InvalidRange {
                min: self.min,
                max: self.max,
                step: self.step,
            });
        }

        // Small slack so that max is included despite rounding
        let last = ((self.max - self.min) / self.step + 1e-9).floor();
        if last >= MAX_CURVE_POINTS as f64 {
            return Err(DomainError::TooManySamples {
                operation: "rate range",
                requested: last + 1.0,
                limit: MAX_CURVE_POINTS,
            });
        }

        let count = last as usize;
        Ok((0..=count)
            .map(|i| self.min + i as f64 * self.step)
            .collect())
    }
}

/// Value of the investment after each whole period `0..=n`.
///
/// Uses the same formula as solving for the future value, truncated to `i`
/// periods. `x` is the period, `y` the value.
pub fn growth_series(params: &CompoundParameters) -> Result<Vec<Sample>, DomainError> {
    let CompoundParameters {
        rate,
        periods,
        present_value,
        payment,
        timing,
        ..
    } = *params;

    if !periods.is_finite() || periods < 0.0 {
        return Err(DomainError::NonFiniteInput { field: "periods" });
    }
    if !rate.is_finite() {
        return Err(DomainError::NonFiniteInput { field: "rate" });
    }
    if periods.floor() > MAX_GROWTH_PERIODS as f64 {
        return Err(DomainError::TooManySamples {
            operation: "growth series",
            requested: periods.floor() + 1.0,
            limit: MAX_GROWTH_PERIODS + 1,
        });
    }

    let last = periods.floor() as u64;
    (0..=last)
        .map(|i| {
            let value = total_fv(present_value, payment, rate, i as f64, timing);
            if value.is_finite() {
                Ok(Sample::new(i as f64, value))
            } else {
                Err(DomainError::NonFinite { operation: "growth series" })
            }
        })
        .collect()
}

/// NPV at each rate of `range`; `x` is the rate in percent, `y` the NPV.
///
/// Independent of whether an IRR exists or converges, but takes the same
/// cash-flow sequences an IRR would.
pub fn npv_curve(cash_flows: &[CashFlow], range: &RateRange) -> Result<Vec<Sample>, DomainError> {
    validate_cash_flows(cash_flows)?;

    range
        .rates()?
        .into_iter()
        .map(|rate| {
            let npv = calculate_npv(cash_flows, rate);
            if npv.is_finite() {
                Ok(Sample::new(rate_to_percent(rate), npv))
            } else {
                Err(DomainError::NonFinite { operation: "npv curve" })
            }
        })
        .collect()
}

/// Running total of the amounts in input order; `x` is each flow's period
pub fn cumulative_series(cash_flows: &[CashFlow]) -> Vec<Sample> {
    cash_flows
        .iter()
        .scan(0.0, |running, cf| {
            *running += cf.amount;
            Some(Sample::new(cf.period as f64, *running))
        })
        .collect()
}
