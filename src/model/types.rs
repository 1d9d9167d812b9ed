use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// The eight weighted components of the utilization score, in summation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    #[strum(serialize = "Base Demand")]
    BaseDemand,
    #[strum(serialize = "Traffic Elasticity")]
    TrafficElasticity,
    #[strum(serialize = "POI Attraction")]
    PoiAttraction,
    #[strum(serialize = "Fleet EV Factor")]
    FleetEv,
    #[strum(serialize = "Competitor Load")]
    CompetitorLoad,
    #[strum(serialize = "Parking Availability")]
    ParkingAvailability,
    #[strum(serialize = "Zoning")]
    Zoning,
    #[strum(serialize = "Regional Multiplier")]
    Regional,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub factor: Factor,
    /// Weighted contribution to the raw score.
    pub contribution: f64,
    /// Share of the raw (pre-multiplier) score, in percent.
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationResult {
    pub utilization_index: f64,
    pub sessions_low: u32,
    pub sessions_high: u32,
    pub raw_score: f64,
    pub global_multiplier: f64,
    pub effective_utilization: f64,
    pub breakdown: Vec<FactorContribution>,
}

impl UtilizationResult {
    pub fn contribution(&self, factor: Factor) -> Option<&FactorContribution> {
        self.breakdown.iter().find(|c| c.factor == factor)
    }
}
