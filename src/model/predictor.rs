use super::features::FeatureVector;
use super::types::{Factor, FactorContribution, UtilizationResult};
use super::UtilizationModel;
use crate::core_types::{Region, ZoningType};
use strum::IntoEnumIterator;

/// Floor for the breakdown denominator when every component is ~0.
pub const BREAKDOWN_EPSILON: f64 = 1e-6;

fn zoning_score(model: &UtilizationModel, zoning: ZoningType) -> f64 {
    let w = &model.weights;
    match zoning {
        ZoningType::Commercial => w.zoning_score_commercial,
        ZoningType::Residential => w.zoning_score_residential,
        ZoningType::Industrial => w.zoning_score_industrial,
        ZoningType::Other => w.zoning_score_other,
    }
}

fn region_score(model: &UtilizationModel, region: Region) -> f64 {
    let w = &model.weights;
    match region {
        Region::Urban => w.region_score_urban,
        Region::Suburban => w.region_score_suburban,
        Region::Rural => w.region_score_rural,
    }
}

/// Weighted components in `Factor::iter()` order.
pub fn components(model: &UtilizationModel, f: &FeatureVector) -> [f64; 8] {
    let w = &model.weights;
    let [w_demand, w_traffic, w_poi, w_fleet, w_comp, w_parking, w_zoning, w_region] =
        w.factor_weights();

    let adoption_mix =
        w.household_adoption_weight * f.household_share + w.fleet_adoption_weight * f.fleet_share;

    [
        w_demand * f.demand,
        w_traffic * f.traffic * f.charger_sensitivity,
        w_poi * f.poi * f.charger_sensitivity,
        w_fleet * adoption_mix * f.ev_share,
        w_comp * (1.0 - f.competition_saturation),
        w_parking * f.parking * f.parking_capacity_factor,
        w_zoning * zoning_score(model, f.zoning_type),
        w_region * region_score(model, f.region),
    ]
}

pub fn predict(model: &UtilizationModel, f: &FeatureVector) -> UtilizationResult {
    let w = &model.weights;
    let parts = components(model, f);
    let raw_score: f64 = parts.iter().sum();

    // Short dwell (DCFC) lifts throughput; the region scales everything.
    let global_multiplier =
        f.regional_multiplier * (w.dwell_base + w.dwell_turnover_bonus * (1.0 - f.dwell_time_factor));

    let effective_utilization = (raw_score * global_multiplier).clamp(0.0, 1.0);
    let utilization_index = effective_utilization * 100.0;

    let band = model.bands.for_charger(utilization_index, f.charger_type);

    let denominator = if raw_score.abs() < BREAKDOWN_EPSILON {
        BREAKDOWN_EPSILON
    } else {
        raw_score
    };

    let breakdown = Factor::iter()
        .zip(parts)
        .map(|(factor, contribution)| FactorContribution {
            factor,
            contribution,
            share_pct: contribution / denominator * 100.0,
        })
        .collect();

    UtilizationResult {
        utilization_index,
        sessions_low: band.low,
        sessions_high: band.high,
        raw_score,
        global_multiplier,
        effective_utilization,
        breakdown,
    }
}
