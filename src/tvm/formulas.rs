//! Closed-form compound interest and annuity formulas
//!
//! Sign convention: all values share one sign, so the future value of a
//! present value plus a payment stream is `PV(1+r)^n + FV_annuity`.

use super::params::PaymentTiming;

/// Below this magnitude a rate is treated as zero in the annuity factors
const ZERO_RATE: f64 = 1e-9;

/// `FV = PV × (1+r)^n`
pub fn compound_fv(present_value: f64, rate: f64, periods: f64) -> f64 {
    present_value * (1.0 + rate).powf(periods)
}

/// `PV = FV / (1+r)^n`
pub fn compound_pv(future_value: f64, rate: f64, periods: f64) -> f64 {
    future_value / (1.0 + rate).powf(periods)
}

/// `((1+r)^n - 1) / r`, the future value of one unit paid each period
pub fn fv_annuity_factor(rate: f64, periods: f64) -> f64 {
    ((1.0 + rate).powf(periods) - 1.0) / rate
}

/// `(1 - (1+r)^-n) / r`, the present value of one unit paid each period
pub fn pv_annuity_factor(rate: f64, periods: f64) -> f64 {
    (1.0 - (1.0 + rate).powf(-periods)) / rate
}

/// `FV = PMT × [((1+r)^n - 1) / r] × k`
pub fn annuity_fv(payment: f64, rate: f64, periods: f64, timing: PaymentTiming) -> f64 {
    payment * fv_annuity_factor(rate, periods) * timing.adjustment(rate)
}

/// `PV = PMT × [(1 - (1+r)^-n) / r] × k`
pub fn annuity_pv(payment: f64, rate: f64, periods: f64, timing: PaymentTiming) -> f64 {
    payment * pv_annuity_factor(rate, periods) * timing.adjustment(rate)
}

/// Future value of a present value plus an optional payment stream
pub fn total_fv(
    present_value: f64,
    payment: f64,
    rate: f64,
    periods: f64,
    timing: PaymentTiming,
) -> f64 {
    let compounded = compound_fv(present_value, rate, periods);
    if payment == 0.0 {
        compounded
    } else {
        compounded + payment * growth_factor(rate, periods) * timing.adjustment(rate)
    }
}

/// FV annuity factor and its derivative in `r`, continuous through `r = 0`.
///
/// At zero the factor tends to `n` and its slope to `n(n-1)/2`.
pub(crate) fn fv_annuity_factor_with_slope(rate: f64, periods: f64) -> (f64, f64) {
    if rate.abs() < ZERO_RATE {
        return (periods, periods * (periods - 1.0) / 2.0);
    }
    let growth = (1.0 + rate).powf(periods);
    let factor = (growth - 1.0) / rate;
    let slope = periods * (1.0 + rate).powf(periods - 1.0) / rate - (growth - 1.0) / (rate * rate);
    (factor, slope)
}

fn growth_factor(rate: f64, periods: f64) -> f64 {
    fv_annuity_factor_with_slope(rate, periods).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compound_round_trip() {
        let fv = compound_fv(1000.0, 0.05, 10.0);
        assert_relative_eq!(fv, 1628.894626777442, epsilon = 1e-9);
        assert_relative_eq!(compound_pv(fv, 0.05, 10.0), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ordinary_annuity() {
        // 100 per year for 10 years at 5%
        assert_relative_eq!(annuity_fv(100.0, 0.05, 10.0, PaymentTiming::End), 1257.789253554884, epsilon = 1e-9);
        assert_relative_eq!(annuity_pv(100.0, 0.05, 10.0, PaymentTiming::End), 772.1734929184818, epsilon = 1e-9);
    }

    #[test]
    fn test_annuity_due_is_one_period_richer() {
        let ordinary = annuity_fv(100.0, 0.05, 10.0, PaymentTiming::End);
        let due = annuity_fv(100.0, 0.05, 10.0, PaymentTiming::Begin);
        assert_relative_eq!(due, ordinary * 1.05, epsilon = 1e-9);
    }

    #[test]
    fn test_factor_limit_at_zero_rate() {
        let (factor, slope) = fv_annuity_factor_with_slope(0.0, 10.0);
        assert_eq!(factor, 10.0);
        assert_eq!(slope, 45.0);

        // Continuous with the small-rate closed form
        let (near, near_slope) = fv_annuity_factor_with_slope(1e-5, 10.0);
        assert_relative_eq!(near, 10.0, epsilon = 1e-2);
        assert_relative_eq!(near_slope, 45.0, epsilon = 1e-1);
    }

    #[test]
    fn test_total_fv() {
        let total = total_fv(1000.0, 100.0, 0.05, 10.0, PaymentTiming::End);
        assert_relative_eq!(total, 1628.894626777442 + 1257.789253554884, epsilon = 1e-9);
        assert_eq!(total_fv(1000.0, 0.0, 0.0, 3.0, PaymentTiming::End), 1000.0);
        assert_eq!(total_fv(0.0, 50.0, 0.0, 4.0, PaymentTiming::End), 200.0);
    }
}
