//! ARC-LM: deterministic multi-factor utilization model.
//!
//! Raw signals are normalized into a [`FeatureVector`], then eight weighted
//! components are summed, scaled by regional and dwell-time multipliers, and
//! mapped to a daily session band.

pub mod bands;
pub mod features;
pub mod predictor;
pub mod types;

pub use self::bands::{SessionBand, SessionBands};
pub use self::features::FeatureVector;
pub use self::types::{Factor, FactorContribution, UtilizationResult};

use crate::config::ModelWeights;
use crate::core_types::ChargerType;
use crate::error::{SiteError, SiteResult};
use crate::signals::RawSignalSet;
use tracing::debug;

/// Allowed drift of the factor weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// A validated weight set plus its parsed session bands.
///
/// Construction is the only fallible step; prediction never fails.
#[derive(Debug, Clone)]
pub struct UtilizationModel {
    pub weights: ModelWeights,
    pub bands: SessionBands,
}

impl UtilizationModel {
    pub fn new(weights: ModelWeights) -> SiteResult<Self> {
        let factor_weights = weights.factor_weights();
        if let Some(bad) = factor_weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(SiteError::Config(format!(
                "factor weights must be finite and non-negative, got {}",
                bad
            )));
        }

        let sum: f64 = factor_weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(SiteError::Config(format!(
                "factor weights must sum to 1.0, got {:.6}",
                sum
            )));
        }

        let lookups = [
            weights.household_adoption_weight,
            weights.fleet_adoption_weight,
            weights.zoning_score_commercial,
            weights.zoning_score_other,
            weights.zoning_score_residential,
            weights.zoning_score_industrial,
            weights.region_score_urban,
            weights.region_score_suburban,
            weights.region_score_rural,
            weights.multiplier_urban,
            weights.multiplier_suburban,
            weights.multiplier_rural,
            weights.l2_sensitivity,
            weights.l2_dwell_factor,
            weights.dcfc_sensitivity,
            weights.dcfc_dwell_factor,
            weights.dwell_base,
            weights.dwell_turnover_bonus,
        ];
        if lookups.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(SiteError::Config(
                "model lookups and multipliers must be finite and non-negative".to_string(),
            ));
        }

        let bands = SessionBands::from_weights(&weights)?;
        debug!("ARC-LM model ready (weight sum {:.6})", sum);

        Ok(Self { weights, bands })
    }

    pub fn normalize(&self, signals: &RawSignalSet) -> SiteResult<FeatureVector> {
        features::build_feature_vector(signals, &self.weights)
    }

    pub fn predict(&self, features: &FeatureVector) -> UtilizationResult {
        predictor::predict(self, features)
    }

    /// Normalize and predict in one step.
    pub fn estimate(&self, signals: &RawSignalSet) -> SiteResult<(FeatureVector, UtilizationResult)> {
        let features = self.normalize(signals)?;
        let result = self.predict(&features);
        Ok((features, result))
    }

    pub fn session_range(&self, utilization_index: f64, charger: ChargerType) -> SessionBand {
        self.bands.for_charger(utilization_index, charger)
    }
}
