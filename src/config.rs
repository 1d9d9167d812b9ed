use crate::error::{SiteError, SiteResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub model: ModelWeights,
    #[command(flatten)]
    pub forecast: ForecastParams,
}

/// Every tunable constant of the utilization model.
///
/// The eight `weight_*` fields are the factor weights and must sum to 1.0.
/// Band lists are comma-separated so they survive both clap and JSON.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelWeights {
    // === FACTOR WEIGHTS ===
    #[arg(long, default_value_t = 0.25)]
    pub weight_base_demand: f64,
    #[arg(long, default_value_t = 0.15)]
    pub weight_traffic: f64,
    #[arg(long, default_value_t = 0.15)]
    pub weight_poi: f64,
    #[arg(long, default_value_t = 0.10)]
    pub weight_fleet: f64,
    #[arg(long, default_value_t = 0.12)]
    pub weight_competition: f64,
    #[arg(long, default_value_t = 0.10)]
    pub weight_parking: f64,
    #[arg(long, default_value_t = 0.05)]
    pub weight_zoning: f64,
    #[arg(long, default_value_t = 0.08)]
    pub weight_region: f64,

    // === FLEET BLEND ===
    // Fleets are assumed to charge more predictably than households.
    #[arg(long, default_value_t = 0.5)]
    pub household_adoption_weight: f64,
    #[arg(long, default_value_t = 1.0)]
    pub fleet_adoption_weight: f64,

    // === ZONING LOOKUP ===
    #[arg(long, default_value_t = 1.0)]
    pub zoning_score_commercial: f64,
    #[arg(long, default_value_t = 0.85)]
    pub zoning_score_other: f64,
    #[arg(long, default_value_t = 0.8)]
    pub zoning_score_residential: f64,
    #[arg(long, default_value_t = 0.7)]
    pub zoning_score_industrial: f64,

    // === REGION LOOKUP ===
    #[arg(long, default_value_t = 1.0)]
    pub region_score_urban: f64,
    #[arg(long, default_value_t = 0.85)]
    pub region_score_suburban: f64,
    #[arg(long, default_value_t = 0.65)]
    pub region_score_rural: f64,

    // === REGIONAL MULTIPLIERS ===
    #[arg(long, default_value_t = 1.15)]
    pub multiplier_urban: f64,
    #[arg(long, default_value_t = 1.0)]
    pub multiplier_suburban: f64,
    #[arg(long, default_value_t = 0.8)]
    pub multiplier_rural: f64,

    // === CHARGER PROFILES ===
    #[arg(long, default_value_t = 1.0)]
    pub l2_sensitivity: f64,
    #[arg(long, default_value_t = 1.0)]
    pub l2_dwell_factor: f64,
    #[arg(long, default_value_t = 1.2)]
    pub dcfc_sensitivity: f64,
    #[arg(long, default_value_t = 0.7)]
    pub dcfc_dwell_factor: f64,
    #[arg(long, default_value_t = 1.8)]
    pub dcfc_session_scale: f64,

    // global = regional * (dwell_base + dwell_turnover_bonus * (1 - dwell))
    #[arg(long, default_value_t = 0.9)]
    pub dwell_base: f64,
    #[arg(long, default_value_t = 0.2)]
    pub dwell_turnover_bonus: f64,

    // === SESSION BANDS (L2 baseline) ===
    #[arg(long, default_value = "20,40,60,80")]
    pub session_band_thresholds: String,
    #[arg(long, default_value = "1,3,6,10,16")]
    pub session_band_lows: String,
    #[arg(long, default_value = "3,6,10,16,24")]
    pub session_band_highs: String,
}

impl Default for ModelWeights {
    fn default() -> Self {
        Self {
            weight_base_demand: 0.25,
            weight_traffic: 0.15,
            weight_poi: 0.15,
            weight_fleet: 0.10,
            weight_competition: 0.12,
            weight_parking: 0.10,
            weight_zoning: 0.05,
            weight_region: 0.08,

            household_adoption_weight: 0.5,
            fleet_adoption_weight: 1.0,

            zoning_score_commercial: 1.0,
            zoning_score_other: 0.85,
            zoning_score_residential: 0.8,
            zoning_score_industrial: 0.7,

            region_score_urban: 1.0,
            region_score_suburban: 0.85,
            region_score_rural: 0.65,

            multiplier_urban: 1.15,
            multiplier_suburban: 1.0,
            multiplier_rural: 0.8,

            l2_sensitivity: 1.0,
            l2_dwell_factor: 1.0,
            dcfc_sensitivity: 1.2,
            dcfc_dwell_factor: 0.7,
            dcfc_session_scale: 1.8,

            dwell_base: 0.9,
            dwell_turnover_bonus: 0.2,

            session_band_thresholds: "20,40,60,80".to_string(),
            session_band_lows: "1,3,6,10,16".to_string(),
            session_band_highs: "3,6,10,16,24".to_string(),
        }
    }
}

/// Compounding assumptions for the multi-year forecast.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastParams {
    #[arg(long, default_value_t = 0.08)]
    pub sessions_growth_rate: f64,
    #[arg(long, default_value_t = 0.02)]
    pub price_growth_rate: f64,
    #[arg(long, default_value_t = 0.03)]
    pub cost_growth_rate: f64,
    #[arg(long, default_value_t = 5)]
    pub forecast_years: u32,

    // Payback below this many years earns a BUILD verdict.
    #[arg(long, default_value_t = 4.0)]
    pub build_payback_years: f64,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            sessions_growth_rate: 0.08,
            price_growth_rate: 0.02,
            cost_growth_rate: 0.03,
            forecast_years: 5,
            build_payback_years: 4.0,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SiteResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overlays flags the user actually typed; defaults never clobber file values.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        self.model.merge_from_cli(&cli.model, matches);
        self.forecast.merge_from_cli(&cli.forecast, matches);
    }
}

macro_rules! update_if_present {
    ($self:ident, $cli:ident, $matches:ident, $($field:ident),+ $(,)?) => {
        $(
            if $matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                $self.$field = $cli.$field.clone();
            }
        )+
    };
}

impl ModelWeights {
    /// Factor weights in `Factor::iter()` order.
    pub fn factor_weights(&self) -> [f64; 8] {
        [
            self.weight_base_demand,
            self.weight_traffic,
            self.weight_poi,
            self.weight_fleet,
            self.weight_competition,
            self.weight_parking,
            self.weight_zoning,
            self.weight_region,
        ]
    }

    pub fn get_band_thresholds(&self) -> SiteResult<Vec<f64>> {
        parse_f64_list(&self.session_band_thresholds, "session_band_thresholds")
    }

    pub fn get_band_lows(&self) -> SiteResult<Vec<u32>> {
        parse_u32_list(&self.session_band_lows, "session_band_lows")
    }

    pub fn get_band_highs(&self) -> SiteResult<Vec<u32>> {
        parse_u32_list(&self.session_band_highs, "session_band_highs")
    }

    pub fn merge_from_cli(&mut self, cli: &ModelWeights, matches: &ArgMatches) {
        update_if_present!(
            self,
            cli,
            matches,
            weight_base_demand,
            weight_traffic,
            weight_poi,
            weight_fleet,
            weight_competition,
            weight_parking,
            weight_zoning,
            weight_region,
            household_adoption_weight,
            fleet_adoption_weight,
            zoning_score_commercial,
            zoning_score_other,
            zoning_score_residential,
            zoning_score_industrial,
            region_score_urban,
            region_score_suburban,
            region_score_rural,
            multiplier_urban,
            multiplier_suburban,
            multiplier_rural,
            l2_sensitivity,
            l2_dwell_factor,
            dcfc_sensitivity,
            dcfc_dwell_factor,
            dcfc_session_scale,
            dwell_base,
            dwell_turnover_bonus,
            session_band_thresholds,
            session_band_lows,
            session_band_highs,
        );
    }
}

impl ForecastParams {
    pub fn merge_from_cli(&mut self, cli: &ForecastParams, matches: &ArgMatches) {
        update_if_present!(
            self,
            cli,
            matches,
            sessions_growth_rate,
            price_growth_rate,
            cost_growth_rate,
            forecast_years,
            build_payback_years,
        );
    }
}

fn parse_f64_list(s: &str, name: &str) -> SiteResult<Vec<f64>> {
    s.split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|_| SiteError::Config(format!("Invalid number '{}' in --{}", p, name)))
        })
        .collect()
}

fn parse_u32_list(s: &str, name: &str) -> SiteResult<Vec<u32>> {
    s.split(',')
        .map(|p| {
            p.trim().parse::<u32>().map_err(|_| {
                SiteError::Config(format!("Invalid session count '{}' in --{}", p, name))
            })
        })
        .collect()
}
