use crate::config::ModelWeights;
use crate::core_types::{ChargerType, Region, ZoningType};
use crate::error::{ensure_finite, SiteResult};
use crate::signals::RawSignalSet;
use serde::{Deserialize, Serialize};

// === REGION INFERENCE (0-100 scale) ===
const URBAN_MIN_COMBINED: f64 = 70.0;
const SUBURBAN_MIN_COMBINED: f64 = 45.0;

// === FLEET SPLIT ===
const FLEET_SHARE_BASE: f64 = 0.3;
const FLEET_SHARE_EV_SPAN: f64 = 0.4;
const INDUSTRIAL_FLEET_BOOST: f64 = 0.2;
const INDUSTRIAL_FLEET_CAP: f64 = 0.9;
const RESIDENTIAL_FLEET_CUT: f64 = 0.15;
const RESIDENTIAL_FLEET_FLOOR: f64 = 0.1;

// === PARKING CAPACITY ===
const PARKING_SATURATION_SPACES: f64 = 50.0;
const PARKING_FACTOR_MIN: f64 = 0.5;
const PARKING_FACTOR_MAX: f64 = 1.3;

/// Canonical, bounded view of a site. Every score field is in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub demand: f64,
    pub traffic: f64,
    pub ev_share: f64,
    pub poi: f64,
    /// 1.0 = fully saturated by competitors.
    pub competition_saturation: f64,
    pub parking: f64,
    pub parking_capacity_factor: f64,

    pub zoning_type: ZoningType,
    pub region: Region,

    pub fleet_share: f64,
    pub household_share: f64,

    pub charger_type: ChargerType,
    pub charger_sensitivity: f64,
    pub dwell_time_factor: f64,
    pub regional_multiplier: f64,
}

#[inline]
fn unit(score: f64) -> f64 {
    (score / 100.0).clamp(0.0, 1.0)
}

pub fn infer_region(demand_score: f64, traffic_score: f64) -> Region {
    let combined = (demand_score + traffic_score) / 2.0;
    if combined >= URBAN_MIN_COMBINED {
        Region::Urban
    } else if combined >= SUBURBAN_MIN_COMBINED {
        Region::Suburban
    } else {
        Region::Rural
    }
}

/// Fleet share of charging demand; the household share is its complement.
pub fn fleet_share(ev_share: f64, zoning: ZoningType) -> f64 {
    let base = FLEET_SHARE_BASE + FLEET_SHARE_EV_SPAN * ev_share;
    match zoning {
        ZoningType::Industrial => (base + INDUSTRIAL_FLEET_BOOST).min(INDUSTRIAL_FLEET_CAP),
        ZoningType::Residential => (base - RESIDENTIAL_FLEET_CUT).max(RESIDENTIAL_FLEET_FLOOR),
        ZoningType::Commercial | ZoningType::Other => base,
    }
}

/// Diminishing returns past ~50 spaces.
pub fn parking_capacity_factor(parking_count: f64) -> f64 {
    let spaces = parking_count.clamp(0.0, PARKING_SATURATION_SPACES);
    (PARKING_FACTOR_MIN + spaces / 100.0).clamp(PARKING_FACTOR_MIN, PARKING_FACTOR_MAX)
}

/// (sensitivity, dwell_time_factor) for a charger type.
pub fn charger_profile(charger: ChargerType, w: &ModelWeights) -> (f64, f64) {
    match charger {
        ChargerType::L2 => (w.l2_sensitivity, w.l2_dwell_factor),
        ChargerType::Dcfc => (w.dcfc_sensitivity, w.dcfc_dwell_factor),
    }
}

pub fn regional_multiplier(region: Region, w: &ModelWeights) -> f64 {
    match region {
        Region::Urban => w.multiplier_urban,
        Region::Suburban => w.multiplier_suburban,
        Region::Rural => w.multiplier_rural,
    }
}

pub fn build_feature_vector(signals: &RawSignalSet, w: &ModelWeights) -> SiteResult<FeatureVector> {
    let demand_score = signals.demand()?;
    let traffic_score = signals.traffic()?;
    let ev_share = unit(signals.ev_share()?);
    let parking_count = ensure_finite("parking_count", signals.parking_count)?;

    let zoning_type = ZoningType::classify(&signals.zoning_label);
    // Inference averages the scores as supplied, out-of-range values included.
    let region = match signals.region_hint {
        Some(region) => region,
        None => infer_region(signals.demand_unclamped()?, signals.traffic_unclamped()?),
    };

    let fleet_share = fleet_share(ev_share, zoning_type);
    let (charger_sensitivity, dwell_time_factor) = charger_profile(signals.charger_type, w);

    Ok(FeatureVector {
        demand: unit(demand_score),
        traffic: unit(traffic_score),
        ev_share,
        poi: unit(signals.poi()?),
        competition_saturation: unit(signals.competition()?),
        parking: unit(signals.parking()?),
        parking_capacity_factor: parking_capacity_factor(parking_count),
        zoning_type,
        region,
        fleet_share,
        household_share: 1.0 - fleet_share,
        charger_type: signals.charger_type,
        charger_sensitivity,
        dwell_time_factor,
        regional_multiplier: regional_multiplier(region, w),
    })
}
