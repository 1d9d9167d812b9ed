use super::assumptions::FinancialInputs;
use super::base::{daily_cash_flow, DAYS_PER_YEAR};
use crate::config::ForecastParams;
use crate::error::{ensure_finite, SiteError, SiteResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastYear {
    pub year: u32,
    pub avg_sessions_per_day: f64,
    pub price_per_kwh: f64,
    pub electricity_cost: f64,
    pub annual_profit: f64,
    pub cumulative_profit: f64,
    /// Cumulative profit over install cost; `None` when nothing was invested.
    pub cumulative_roi: Option<f64>,
}

/// Longest horizon `forecast` will project.
pub const MAX_FORECAST_YEARS: u32 = 100;

#[inline]
fn grown(base: f64, rate: f64, elapsed_years: i32) -> f64 {
    base * (1.0 + rate).powi(elapsed_years)
}

/// Compounding multi-year projection, year 1 first.
///
/// Sessions, price and energy cost each grow at their own rate. The
/// cumulative total threads through the years in order, so the fold is
/// strictly sequential.
pub fn forecast(
    base_daily_sessions: f64,
    inputs: &FinancialInputs,
    params: &ForecastParams,
) -> SiteResult<Vec<ForecastYear>> {
    ensure_finite("base_daily_sessions", base_daily_sessions)?;
    inputs.validate()?;
    ensure_finite("sessions_growth_rate", params.sessions_growth_rate)?;
    ensure_finite("price_growth_rate", params.price_growth_rate)?;
    ensure_finite("cost_growth_rate", params.cost_growth_rate)?;
    if params.forecast_years > MAX_FORECAST_YEARS {
        return Err(SiteError::Validation(format!(
            "forecast_years must be at most {}, got {}",
            MAX_FORECAST_YEARS, params.forecast_years
        )));
    }

    let years = (0_i32..)
        .zip(1..=params.forecast_years)
        .scan(0.0_f64, |cumulative_profit, (elapsed, year)| {
            let sessions = grown(base_daily_sessions, params.sessions_growth_rate, elapsed);
            let price = grown(inputs.price_per_kwh, params.price_growth_rate, elapsed);
            let cost = grown(inputs.electricity_cost, params.cost_growth_rate, elapsed);

            let (revenue, energy_cost) =
                daily_cash_flow(sessions, inputs.kwh_per_session, price, cost);
            let annual_profit = (revenue - energy_cost) * DAYS_PER_YEAR;
            *cumulative_profit += annual_profit;

            let cumulative_roi =
                (inputs.install_cost > 0.0).then(|| *cumulative_profit / inputs.install_cost);

            Some(ForecastYear {
                year,
                avg_sessions_per_day: sessions,
                price_per_kwh: price,
                electricity_cost: cost,
                annual_profit,
                cumulative_profit: *cumulative_profit,
                cumulative_roi,
            })
        })
        .collect();

    Ok(years)
}

/// First forecast year whose cumulative profit covers the install cost.
pub fn break_even_year(series: &[ForecastYear], install_cost: f64) -> Option<u32> {
    series
        .iter()
        .find(|y| y.cumulative_profit >= install_cost)
        .map(|y| y.year)
}
