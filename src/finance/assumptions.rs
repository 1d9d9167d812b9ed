use crate::core_types::ChargerType;
use crate::error::{ensure_finite, SiteResult};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Price, energy and capital assumptions for one charger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialInputs {
    /// What drivers pay, $/kWh.
    pub price_per_kwh: f64,
    /// What the utility charges, $/kWh.
    pub electricity_cost: f64,
    pub kwh_per_session: f64,
    /// One-time installed cost, $.
    pub install_cost: f64,
}

impl FinancialInputs {
    pub fn defaults_for(charger: ChargerType) -> Self {
        match charger {
            ChargerType::L2 => Self {
                price_per_kwh: 0.35,
                electricity_cost: 0.15,
                kwh_per_session: 25.0,
                install_cost: 9_000.0,
            },
            ChargerType::Dcfc => Self {
                price_per_kwh: 0.45,
                electricity_cost: 0.15,
                kwh_per_session: 35.0,
                install_cost: 60_000.0,
            },
        }
    }

    /// Negative values are a caller concern and pass through; only NaN and
    /// infinities are rejected.
    pub fn validate(&self) -> SiteResult<()> {
        ensure_finite("price_per_kwh", self.price_per_kwh)?;
        ensure_finite("electricity_cost", self.electricity_cost)?;
        ensure_finite("kwh_per_session", self.kwh_per_session)?;
        ensure_finite("install_cost", self.install_cost)?;
        Ok(())
    }
}

/// Per-field overrides on top of the charger-type defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialOverrides {
    pub price_per_kwh: Option<f64>,
    pub electricity_cost: Option<f64>,
    pub kwh_per_session: Option<f64>,
    pub install_cost: Option<f64>,
}

impl FinancialOverrides {
    pub fn resolve(&self, charger: ChargerType) -> FinancialInputs {
        let defaults = FinancialInputs::defaults_for(charger);
        FinancialInputs {
            price_per_kwh: self.price_per_kwh.unwrap_or(defaults.price_per_kwh),
            electricity_cost: self.electricity_cost.unwrap_or(defaults.electricity_cost),
            kwh_per_session: self.kwh_per_session.unwrap_or(defaults.kwh_per_session),
            install_cost: self.install_cost.unwrap_or(defaults.install_cost),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    #[strum(serialize = "BUILD")]
    Build,
    #[strum(serialize = "MARGINAL / DO NOT BUILD")]
    Marginal,
}

impl Verdict {
    /// An infinite payback never beats the threshold.
    pub fn from_payback(payback_years: f64, threshold_years: f64) -> Self {
        if payback_years < threshold_years {
            Verdict::Build
        } else {
            Verdict::Marginal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_keep_unset_defaults() {
        let overrides = FinancialOverrides {
            install_cost: Some(75_000.0),
            ..Default::default()
        };
        let inputs = overrides.resolve(ChargerType::Dcfc);
        assert_eq!(inputs.price_per_kwh, 0.45);
        assert_eq!(inputs.kwh_per_session, 35.0);
        assert_eq!(inputs.install_cost, 75_000.0);
    }

    #[test]
    fn verdict_threshold_is_exclusive() {
        assert_eq!(Verdict::from_payback(3.99, 4.0), Verdict::Build);
        assert_eq!(Verdict::from_payback(4.0, 4.0), Verdict::Marginal);
        assert_eq!(Verdict::from_payback(f64::INFINITY, 4.0), Verdict::Marginal);
        assert_eq!(Verdict::Marginal.to_string(), "MARGINAL / DO NOT BUILD");
    }

    #[test]
    fn validate_rejects_nan() {
        let mut inputs = FinancialInputs::defaults_for(ChargerType::L2);
        assert!(inputs.validate().is_ok());
        inputs.electricity_cost = f64::NAN;
        assert!(inputs.validate().is_err());
    }
}
