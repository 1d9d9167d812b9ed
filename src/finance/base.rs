use super::assumptions::FinancialInputs;
use crate::error::{ensure_finite, SiteResult};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialResult {
    pub avg_sessions_per_day: f64,
    pub daily_revenue: f64,
    pub daily_cost: f64,
    pub daily_profit: f64,
    pub monthly_profit: f64,
    pub annual_profit: f64,
    /// `f64::INFINITY` when the site never pays back; `null` in JSON.
    #[serde(with = "payback_serde")]
    pub payback_years: f64,
}

/// JSON has no infinity, so "never pays back" travels as `null`.
mod payback_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(years: &f64, s: S) -> Result<S::Ok, S::Error> {
        if years.is_finite() {
            s.serialize_some(years)
        } else {
            s.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::INFINITY))
    }
}

impl FinancialResult {
    pub fn pays_back(&self) -> bool {
        self.payback_years.is_finite()
    }
}

/// (revenue, cost) for one day at the given volume and prices.
pub fn daily_cash_flow(sessions: f64, kwh_per_session: f64, price: f64, cost: f64) -> (f64, f64) {
    let energy_kwh = sessions * kwh_per_session;
    (energy_kwh * price, energy_kwh * cost)
}

/// Single-period economics for a daily session range.
///
/// Annual profit is `daily_profit * 365`; the monthly figure uses a 30-day
/// month and is informational only.
pub fn base_financials(
    sessions_low: f64,
    sessions_high: f64,
    inputs: &FinancialInputs,
) -> SiteResult<FinancialResult> {
    ensure_finite("sessions_low", sessions_low)?;
    ensure_finite("sessions_high", sessions_high)?;
    inputs.validate()?;

    let avg_sessions_per_day = (sessions_low + sessions_high) / 2.0;
    let (daily_revenue, daily_cost) = daily_cash_flow(
        avg_sessions_per_day,
        inputs.kwh_per_session,
        inputs.price_per_kwh,
        inputs.electricity_cost,
    );
    let daily_profit = daily_revenue - daily_cost;
    let annual_profit = daily_profit * DAYS_PER_YEAR;

    let payback_years = if annual_profit > 0.0 {
        inputs.install_cost / annual_profit
    } else {
        f64::INFINITY
    };

    Ok(FinancialResult {
        avg_sessions_per_day,
        daily_revenue,
        daily_cost,
        daily_profit,
        monthly_profit: daily_profit * DAYS_PER_MONTH,
        annual_profit,
        payback_years,
    })
}
