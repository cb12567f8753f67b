//! Time-value-of-money formulas: compound interest and annuities
//!
//! Closed forms cover present value, payment, future value and (approximately)
//! the number of periods. A rate with a payment stream has no closed form and
//! is found with Newton-Raphson.

mod compound;
pub mod formulas;
mod params;

pub use compound::{solve_compound, solve_compound_with, solve_periods, solve_rate};
pub use params::{CompoundParameters, PaymentTiming, UnknownField};

/// Convert a percentage as typed by a user (5 for 5%) into a decimal rate
pub fn percent_to_rate(percent: f64) -> f64 {
    percent / 100.0
}

/// Convert a decimal rate into a percentage
pub fn rate_to_percent(rate: f64) -> f64 {
    rate * 100.0
}
