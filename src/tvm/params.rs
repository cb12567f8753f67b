//! Inputs to a compound interest / annuity problem

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When annuity payments fall within each period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentTiming {
    /// Annuity due: payments at the start of each period
    Begin,
    /// Ordinary annuity: payments at the end of each period
    #[default]
    End,
}

impl PaymentTiming {
    /// The `k` factor applied to annuity values: 1 for End, `1 + r` for Begin
    pub fn adjustment(self, rate: f64) -> f64 {
        match self {
            PaymentTiming::Begin => 1.0 + rate,
            PaymentTiming::End => 1.0,
        }
    }
}

/// The field a compound calculation solves for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnknownField {
    Rate,
    Periods,
    PresentValue,
    Payment,
    FutureValue,
}

impl UnknownField {
    pub const ALL: [UnknownField; 5] = [
        UnknownField::Rate,
        UnknownField::Periods,
        UnknownField::PresentValue,
        UnknownField::Payment,
        UnknownField::FutureValue,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UnknownField::Rate => "rate",
            UnknownField::Periods => "periods",
            UnknownField::PresentValue => "present value",
            UnknownField::Payment => "payment",
            UnknownField::FutureValue => "future value",
        }
    }
}

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UnknownField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "rate" => Ok(UnknownField::Rate),
            "n" | "periods" => Ok(UnknownField::Periods),
            "pv" | "present-value" => Ok(UnknownField::PresentValue),
            "pmt" | "payment" => Ok(UnknownField::Payment),
            "fv" | "future-value" => Ok(UnknownField::FutureValue),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

/// Parameters of a time-value-of-money problem.
///
/// `rate` is a decimal fraction (0.05 for 5%). The field being solved for is
/// ignored, except that a zero `payment` always means "no annuity".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompoundParameters {
    pub rate: f64,
    pub periods: f64,
    pub present_value: f64,
    pub payment: f64,
    pub future_value: f64,
    pub timing: PaymentTiming,
}

impl CompoundParameters {
    pub fn new(
        rate: f64,
        periods: f64,
        present_value: f64,
        payment: f64,
        future_value: f64,
        timing: PaymentTiming,
    ) -> Self {
        Self {
            rate,
            periods,
            present_value,
            payment,
            future_value,
            timing,
        }
    }

    /// True when the problem carries a periodic payment
    pub fn has_annuity(&self) -> bool {
        self.payment != 0.0
    }
}
