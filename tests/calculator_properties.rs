//! End-to-end checks through the public API

use approx::assert_relative_eq;
use fincalc::cashflow::DEFAULT_CASH_FLOWS;
use fincalc::{
    calculate_npv, compute_irr, cumulative_series, evaluate, growth_series, npv_curve,
    solve_compound, CalcError, CashFlow, CompoundParameters, DomainError, PaymentTiming,
    RateRange, SyntaxError, UnknownField,
};
use rayon::prelude::*;

#[test]
fn test_evaluator_arithmetic() {
    assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
    assert_eq!(evaluate("(2+3)*4").unwrap(), 20.0);
    assert_eq!(evaluate("2^3").unwrap(), 8.0);
    assert_eq!(evaluate("3 × (4 ÷ 2) - 1.5").unwrap(), 4.5);
}

#[test]
fn test_evaluator_syntax_errors() {
    assert!(matches!(
        evaluate("(2+3"),
        Err(SyntaxError::UnbalancedParentheses { .. })
    ));
    assert!(matches!(
        evaluate("2+&"),
        Err(SyntaxError::IllegalCharacter { character: '&', .. })
    ));
    assert!(matches!(evaluate("2 3)"), Err(SyntaxError::TrailingInput { .. })));
}

#[test]
fn test_concurrent_evaluations_are_independent() {
    let expressions: Vec<String> = (0..2000).map(|i| format!("({}+1)*2^2-{}", i, i)).collect();

    let results: Vec<f64> = expressions
        .par_iter()
        .map(|expr| evaluate(expr).unwrap())
        .collect();

    for (i, value) in results.iter().enumerate() {
        // (i + 1) * 4 - i
        assert_eq!(*value, 3.0 * i as f64 + 4.0);
    }
}

#[test]
fn test_future_value_of_deposit() {
    let params = CompoundParameters::new(0.05, 10.0, -1000.0, 0.0, 0.0, PaymentTiming::End);
    let fv = solve_compound(UnknownField::FutureValue, &params).unwrap();

    // Values keep the sign of the deposit
    assert_relative_eq!(fv.abs(), 1628.89, epsilon = 0.01);
    assert!(fv < 0.0);
}

#[test]
fn test_compound_round_trip() {
    let params = CompoundParameters::new(0.04, 8.0, 2500.0, 150.0, 0.0, PaymentTiming::Begin);
    let fv = solve_compound(UnknownField::FutureValue, &params).unwrap();

    let back = CompoundParameters { future_value: fv, ..params };
    let pv = solve_compound(UnknownField::PresentValue, &back).unwrap();
    assert_relative_eq!(pv, 2500.0, epsilon = 1e-6);

    let rate = solve_compound(UnknownField::Rate, &CompoundParameters { rate: 0.0, ..back }).unwrap();
    assert_relative_eq!(rate, 4.0, epsilon = 1e-4);
}

#[test]
fn test_irr_of_sample_project() {
    let irr = compute_irr(&DEFAULT_CASH_FLOWS).unwrap();

    assert_relative_eq!(irr, 19.71, epsilon = 0.1);
    assert!(calculate_npv(&DEFAULT_CASH_FLOWS, irr / 100.0).abs() < 1e-4);
}

#[test]
fn test_irr_needs_two_cash_flows() {
    let err = compute_irr(&[CashFlow::new(0, -100.0)]).unwrap_err();
    assert!(matches!(
        err,
        CalcError::Domain(DomainError::TooFewCashFlows { actual: 1, .. })
    ));
}

#[test]
fn test_rate_with_zero_periods() {
    let params = CompoundParameters::new(0.0, 0.0, 1000.0, 0.0, 2000.0, PaymentTiming::End);
    let err = solve_compound(UnknownField::Rate, &params).unwrap_err();
    assert!(matches!(err, CalcError::Domain(DomainError::MissingField { field: "periods" })));
}

#[test]
fn test_cumulative_total_matches_sum_in_any_order() {
    let total: f64 = DEFAULT_CASH_FLOWS.iter().map(|cf| cf.amount).sum();

    let mut flows = DEFAULT_CASH_FLOWS.to_vec();
    for _ in 0..flows.len() {
        let series = cumulative_series(&flows);
        assert_eq!(series.len(), flows.len());
        assert_relative_eq!(series.last().unwrap().y, total, epsilon = 1e-9);
        flows.rotate_left(1);
    }
}

#[test]
fn test_npv_curve_crosses_zero_near_irr() {
    let irr = compute_irr(&DEFAULT_CASH_FLOWS).unwrap();
    let curve = npv_curve(&DEFAULT_CASH_FLOWS, &RateRange::default()).unwrap();

    let crossing = curve
        .windows(2)
        .find(|w| w[0].y > 0.0 && w[1].y <= 0.0)
        .expect("NPV should change sign inside the default range");
    assert!(crossing[0].x <= irr && irr <= crossing[1].x);
}

#[test]
fn test_growth_series_ends_at_future_value() {
    let params = CompoundParameters::new(0.06, 12.0, 500.0, 50.0, 0.0, PaymentTiming::End);
    let fv = solve_compound(UnknownField::FutureValue, &params).unwrap();
    let series = growth_series(&params).unwrap();

    assert_eq!(series.len(), 13);
    assert_relative_eq!(series.last().unwrap().y, fv, epsilon = 1e-9);
}
