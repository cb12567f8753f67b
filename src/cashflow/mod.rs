//! Cash-flow sequences: NPV, IRR, summaries and loading

mod irr;
pub mod loader;

pub use irr::{
    calculate_npv, compute_irr, compute_irr_with, npv_and_derivative, validate_cash_flows,
    MIN_CASH_FLOWS,
};
pub use loader::load_cash_flows_csv;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A signed amount occurring at a whole period.
///
/// Sequences keep input order; periods may repeat or skip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub period: u32,
    pub amount: f64,
}

impl CashFlow {
    pub const fn new(period: u32, amount: f64) -> Self {
        Self { period, amount }
    }
}

impl FromStr for CashFlow {
    type Err = String;

    /// Parse `PERIOD:AMOUNT`, e.g. `0:-100000`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (period, amount) = s
            .split_once(':')
            .ok_or_else(|| format!("expected PERIOD:AMOUNT, got '{}'", s))?;
        let period = period
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid period '{}': {}", period, e))?;
        let amount = amount
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid amount '{}': {}", amount, e))?;
        Ok(Self { period, amount })
    }
}

/// Sample project: 100,000 invested, returns growing by 5,000 a year
pub const DEFAULT_CASH_FLOWS: [CashFlow; 6] = [
    CashFlow::new(0, -100_000.0),
    CashFlow::new(1, 25_000.0),
    CashFlow::new(2, 30_000.0),
    CashFlow::new(3, 35_000.0),
    CashFlow::new(4, 40_000.0),
    CashFlow::new(5, 45_000.0),
];

/// Totals of a cash-flow sequence
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub count: usize,
    /// Sum of the negative amounts (an outflow, so not positive)
    pub total_investment: f64,
    /// Sum of the positive amounts
    pub total_return: f64,
    pub net: f64,
}

impl CashFlowSummary {
    pub fn from_flows(cash_flows: &[CashFlow]) -> Self {
        let mut summary = Self {
            count: cash_flows.len(),
            ..Self::default()
        };
        for cf in cash_flows {
            if cf.amount < 0.0 {
                summary.total_investment += cf.amount;
            } else {
                summary.total_return += cf.amount;
            }
            summary.net += cf.amount;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cash_flow() {
        assert_eq!("0:-100000".parse::<CashFlow>().unwrap(), CashFlow::new(0, -100000.0));
        assert_eq!(" 3 : 2.5 ".parse::<CashFlow>().unwrap(), CashFlow::new(3, 2.5));
        assert!("-1:5".parse::<CashFlow>().is_err());
        assert!("5".parse::<CashFlow>().is_err());
        assert!("1:abc".parse::<CashFlow>().is_err());
    }

    #[test]
    fn test_summary() {
        let summary = CashFlowSummary::from_flows(&DEFAULT_CASH_FLOWS);
        assert_eq!(summary.count, 6);
        assert_eq!(summary.total_investment, -100_000.0);
        assert_eq!(summary.total_return, 175_000.0);
        assert_eq!(summary.net, 75_000.0);
    }
}
