mod common;

use common::assert_close;
use evsite::config::ForecastParams;
use evsite::error::SiteError;
use evsite::finance::{break_even_year, forecast, FinancialInputs, MAX_FORECAST_YEARS};
use rstest::rstest;

fn inputs(install_cost: f64) -> FinancialInputs {
    FinancialInputs {
        price_per_kwh: 0.35,
        electricity_cost: 0.15,
        kwh_per_session: 25.0,
        install_cost,
    }
}

#[test]
fn test_default_horizon_is_five_years() {
    let series = forecast(8.0, &inputs(9_000.0), &ForecastParams::default()).unwrap();
    assert_eq!(series.len(), 5);
    let years: Vec<u32> = series.iter().map(|y| y.year).collect();
    assert_eq!(years, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_first_year_matches_base_model() {
    let series = forecast(8.0, &inputs(9_000.0), &ForecastParams::default()).unwrap();
    let y1 = &series[0];

    assert_eq!(y1.avg_sessions_per_day, 8.0);
    assert_eq!(y1.price_per_kwh, 0.35);
    assert_eq!(y1.electricity_cost, 0.15);
    assert_close(y1.annual_profit, 14_600.0, 1e-9);
    assert_close(y1.cumulative_profit, 14_600.0, 1e-9);
    assert_close(y1.cumulative_roi.unwrap(), 14_600.0 / 9_000.0, 1e-12);
}

#[test]
fn test_compounding_growth() {
    let series = forecast(8.0, &inputs(9_000.0), &ForecastParams::default()).unwrap();
    let y3 = &series[2];

    assert_close(y3.avg_sessions_per_day, 8.0 * 1.08 * 1.08, 1e-12);
    assert_close(y3.price_per_kwh, 0.35 * 1.02 * 1.02, 1e-12);
    assert_close(y3.electricity_cost, 0.15 * 1.03 * 1.03, 1e-12);

    let expected =
        y3.avg_sessions_per_day * 25.0 * (y3.price_per_kwh - y3.electricity_cost) * 365.0;
    assert_close(y3.annual_profit, expected, 1e-6);
}

#[test]
fn test_cumulative_is_running_sum() {
    let series = forecast(8.0, &inputs(9_000.0), &ForecastParams::default()).unwrap();
    let mut running = 0.0;
    for y in &series {
        running += y.annual_profit;
        assert_close(y.cumulative_profit, running, 1e-6);
        assert_close(y.cumulative_roi.unwrap(), running / 9_000.0, 1e-9);
    }
}

#[test]
fn test_zero_install_cost_has_no_roi() {
    let series = forecast(8.0, &inputs(0.0), &ForecastParams::default()).unwrap();
    assert_eq!(series.len(), 5);
    assert!(series.iter().all(|y| y.cumulative_roi.is_none()));
    assert!(series.iter().all(|y| y.cumulative_profit.is_finite()));
}

#[test]
fn test_custom_horizon_and_rates() {
    let params = ForecastParams {
        sessions_growth_rate: 0.0,
        price_growth_rate: 0.0,
        cost_growth_rate: 0.0,
        forecast_years: 10,
        ..Default::default()
    };
    let series = forecast(8.0, &inputs(9_000.0), &params).unwrap();
    assert_eq!(series.len(), 10);
    for y in &series {
        assert_close(y.annual_profit, 14_600.0, 1e-9);
    }
    assert_close(series[9].cumulative_profit, 146_000.0, 1e-6);
}

#[test]
fn test_zero_years_is_empty() {
    let params = ForecastParams {
        forecast_years: 0,
        ..Default::default()
    };
    assert!(forecast(8.0, &inputs(9_000.0), &params).unwrap().is_empty());
}

#[test]
fn test_rising_costs_can_erode_profit() {
    // Energy cost outgrows price until the margin turns negative.
    let params = ForecastParams {
        sessions_growth_rate: 0.0,
        price_growth_rate: 0.0,
        cost_growth_rate: 0.5,
        ..Default::default()
    };
    let series = forecast(8.0, &inputs(9_000.0), &params).unwrap();
    assert!(series[0].annual_profit > 0.0);
    assert!(series[4].annual_profit < 0.0);
    assert!(series[4].cumulative_profit < series[3].cumulative_profit);
}

#[test]
fn test_non_finite_growth_is_rejected() {
    let params = ForecastParams {
        price_growth_rate: f64::NAN,
        ..Default::default()
    };
    assert!(forecast(8.0, &inputs(9_000.0), &params).is_err());
    assert!(forecast(f64::INFINITY, &inputs(9_000.0), &ForecastParams::default()).is_err());
}

#[test]
fn test_break_even_year() {
    let series = forecast(8.0, &inputs(20_000.0), &ForecastParams::default()).unwrap();
    // Year 1 cumulative is 14,600; year 2 clears 20,000.
    assert_eq!(break_even_year(&series, 20_000.0), Some(2));

    let never = forecast(0.0, &inputs(20_000.0), &ForecastParams::default()).unwrap();
    assert_eq!(break_even_year(&never, 20_000.0), None);
}

#[rstest]
#[case(MAX_FORECAST_YEARS + 1)]
#[case(i32::MAX as u32 + 1)]
#[case(u32::MAX)]
fn test_oversized_horizon_is_rejected(#[case] years: u32) {
    let params = ForecastParams {
        forecast_years: years,
        ..Default::default()
    };
    let err = forecast(8.0, &inputs(9_000.0), &params).unwrap_err();
    assert!(matches!(err, SiteError::Validation(_)));
}

#[test]
fn test_longest_horizon_is_accepted() {
    let params = ForecastParams {
        forecast_years: MAX_FORECAST_YEARS,
        ..Default::default()
    };
    let series = forecast(8.0, &inputs(9_000.0), &params).unwrap();
    assert_eq!(series.len(), MAX_FORECAST_YEARS as usize);
    let last = series.last().unwrap();
    assert_eq!(last.year, MAX_FORECAST_YEARS);
    // Year 100 compounds 99 times.
    assert_close(last.avg_sessions_per_day, 8.0 * 1.08_f64.powi(99), 1e-6);
}
