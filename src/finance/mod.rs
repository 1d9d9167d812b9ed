pub mod assumptions;
pub mod base;
pub mod forecast;

pub use self::assumptions::{FinancialInputs, FinancialOverrides, Verdict};
pub use self::base::{base_financials, FinancialResult};
pub use self::forecast::{break_even_year, forecast, ForecastYear, MAX_FORECAST_YEARS};
