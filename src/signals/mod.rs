pub mod heuristics;

use crate::core_types::{ChargerType, Region};
use crate::error::{ensure_finite, SiteError, SiteResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Score assumed for any signal a collaborator could not resolve.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Already-resolved site signals, as handed over by the data collaborators.
///
/// Scores are on a 0-100 scale. `None` means "unknown" and resolves to
/// [`NEUTRAL_SCORE`]; out-of-range values are clamped, not rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSignalSet {
    pub demand_score: Option<f64>,
    pub traffic_score: Option<f64>,
    pub ev_share_score: Option<f64>,
    pub poi_score: Option<f64>,
    pub competition_score: Option<f64>,
    pub parking_score: Option<f64>,
    pub zoning_label: String,
    pub charger_type: ChargerType,
    pub parking_count: f64,
    pub region_hint: Option<Region>,
}

impl RawSignalSet {
    /// Builds a signal set from the loosely typed inbound mapping.
    ///
    /// Numbers and numeric strings are accepted for scores and counts.
    /// Missing keys and `null` take the neutral default; anything else that
    /// cannot be read as a number is a validation error.
    pub fn from_mapping(map: &Map<String, Value>) -> SiteResult<Self> {
        Ok(Self {
            demand_score: coerce_number(map, "demand_score")?,
            traffic_score: coerce_number(map, "traffic_score")?,
            ev_share_score: coerce_number(map, "ev_share_score")?,
            poi_score: coerce_number(map, "poi_score")?,
            competition_score: coerce_number(map, "competition_score")?,
            parking_score: coerce_number(map, "parking_score")?,
            zoning_label: coerce_label(map, "zoning_label"),
            charger_type: ChargerType::from_label(&coerce_label(map, "charger_type")),
            parking_count: coerce_number(map, "parking_count")?.unwrap_or(0.0),
            region_hint: Region::from_hint(&coerce_label(map, "region_hint")),
        })
    }

    pub fn demand(&self) -> SiteResult<f64> {
        resolve_score("demand_score", self.demand_score)
    }

    /// Demand after defaulting, before clamping. Region inference reads this.
    pub fn demand_unclamped(&self) -> SiteResult<f64> {
        resolve_unclamped("demand_score", self.demand_score)
    }

    pub fn traffic(&self) -> SiteResult<f64> {
        resolve_score("traffic_score", self.traffic_score)
    }

    pub fn traffic_unclamped(&self) -> SiteResult<f64> {
        resolve_unclamped("traffic_score", self.traffic_score)
    }

    pub fn ev_share(&self) -> SiteResult<f64> {
        resolve_score("ev_share_score", self.ev_share_score)
    }

    pub fn poi(&self) -> SiteResult<f64> {
        resolve_score("poi_score", self.poi_score)
    }

    pub fn competition(&self) -> SiteResult<f64> {
        resolve_score("competition_score", self.competition_score)
    }

    pub fn parking(&self) -> SiteResult<f64> {
        resolve_score("parking_score", self.parking_score)
    }
}

fn resolve_unclamped(name: &str, raw: Option<f64>) -> SiteResult<f64> {
    ensure_finite(name, raw.unwrap_or(NEUTRAL_SCORE))
}

/// Missing -> neutral, then clamp into [0, 100].
fn resolve_score(name: &str, raw: Option<f64>) -> SiteResult<f64> {
    Ok(resolve_unclamped(name, raw)?.clamp(0.0, 100.0))
}

fn coerce_number(map: &Map<String, Value>, key: &str) -> SiteResult<Option<f64>> {
    let parsed = match map.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(SiteError::Validation(format!(
            "'{}' is not a number: {}",
            key,
            map.get(key).map(Value::to_string).unwrap_or_default()
        ))),
    }
}

fn coerce_label(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
