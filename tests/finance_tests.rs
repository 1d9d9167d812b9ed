mod common;

use common::assert_close;
use evsite::core_types::ChargerType;
use evsite::error::SiteError;
use evsite::finance::{base_financials, FinancialInputs};
use rstest::rstest;

fn l2_inputs() -> FinancialInputs {
    FinancialInputs {
        price_per_kwh: 0.35,
        electricity_cost: 0.15,
        kwh_per_session: 25.0,
        install_cost: 9_000.0,
    }
}

#[test]
fn test_base_year_reference_case() {
    let r = base_financials(6.0, 10.0, &l2_inputs()).unwrap();

    assert_eq!(r.avg_sessions_per_day, 8.0);
    assert_close(r.daily_revenue, 70.0, 1e-9);
    assert_close(r.daily_cost, 30.0, 1e-9);
    assert_close(r.daily_profit, 40.0, 1e-9);
    assert_close(r.monthly_profit, 1_200.0, 1e-9);
    assert_close(r.annual_profit, 14_600.0, 1e-9);
    assert_close(r.payback_years, 0.616, 1e-3);
    assert!(r.pays_back());
}

#[test]
fn test_annual_profit_uses_365_days() {
    let r = base_financials(3.0, 6.0, &l2_inputs()).unwrap();
    assert_close(r.annual_profit, r.daily_profit * 365.0, 1e-9);
    // Not monthly * 12, which would undercount by five days.
    assert!(r.annual_profit > r.monthly_profit * 12.0);
}

#[rstest]
#[case(0.15, 0.15)] // break-even
#[case(0.10, 0.15)] // selling below cost
#[case(-0.20, 0.15)] // negative price passes through arithmetically
fn test_non_positive_profit_never_pays_back(#[case] price: f64, #[case] cost: f64) {
    let inputs = FinancialInputs {
        price_per_kwh: price,
        electricity_cost: cost,
        ..l2_inputs()
    };
    let r = base_financials(6.0, 10.0, &inputs).unwrap();
    assert!(r.daily_profit <= 0.0);
    assert_eq!(r.payback_years, f64::INFINITY);
    assert!(!r.pays_back());
}

#[test]
fn test_zero_sessions_never_pays_back() {
    let r = base_financials(0.0, 0.0, &l2_inputs()).unwrap();
    assert_eq!(r.daily_profit, 0.0);
    assert_eq!(r.payback_years, f64::INFINITY);
}

#[test]
fn test_zero_install_cost_pays_back_immediately() {
    let inputs = FinancialInputs {
        install_cost: 0.0,
        ..l2_inputs()
    };
    let r = base_financials(6.0, 10.0, &inputs).unwrap();
    assert_eq!(r.payback_years, 0.0);
}

#[rstest]
#[case(f64::NAN, 10.0, l2_inputs())]
#[case(6.0, f64::INFINITY, l2_inputs())]
#[case(6.0, 10.0, FinancialInputs { price_per_kwh: f64::NAN, ..l2_inputs() })]
#[case(6.0, 10.0, FinancialInputs { install_cost: f64::NEG_INFINITY, ..l2_inputs() })]
fn test_non_finite_inputs_are_rejected(
    #[case] low: f64,
    #[case] high: f64,
    #[case] inputs: FinancialInputs,
) {
    let err = base_financials(low, high, &inputs).unwrap_err();
    assert!(matches!(err, SiteError::Validation(_)));
}

#[test]
fn test_charger_defaults() {
    let l2 = FinancialInputs::defaults_for(ChargerType::L2);
    assert_eq!(l2, l2_inputs());

    let dcfc = FinancialInputs::defaults_for(ChargerType::Dcfc);
    assert_eq!(dcfc.price_per_kwh, 0.45);
    assert_eq!(dcfc.kwh_per_session, 35.0);
    assert_eq!(dcfc.install_cost, 60_000.0);
}
