//! Count-to-score helpers used by the data collaborators.
//!
//! Parking and opportunity are "higher is better". Saturation, the
//! orientation the model's competition signal expects, is "higher is more
//! crowded".

/// Ordered (exclusive upper bound, score) pairs; the last entry is the fallback.
const PARKING_BANDS: [(u32, f64); 3] = [(1, 20.0), (3, 60.0), (u32::MAX, 85.0)];
/// Competitor count to opportunity (higher = emptier market): 0 -> 90,
/// 1-4 -> 70, 5-9 -> 45, 10+ -> 20.
const OPPORTUNITY_BANDS: [(u32, f64); 4] = [(1, 90.0), (5, 70.0), (10, 45.0), (u32::MAX, 20.0)];

fn band_lookup(bands: &[(u32, f64)], count: u32) -> f64 {
    bands
        .iter()
        .find(|(limit, _)| count < *limit)
        .or(bands.last())
        .map(|&(_, score)| score)
        .unwrap_or(0.0)
}

/// Street-only sites score low; three or more nearby lots saturate the score.
pub fn parking_score_from_count(parking_features: u32) -> f64 {
    band_lookup(&PARKING_BANDS, parking_features)
}

/// Competitor chargers within roughly a mile, scored as market opportunity.
pub fn opportunity_score_from_charger_count(charger_count: u32) -> f64 {
    band_lookup(&OPPORTUNITY_BANDS, charger_count)
}

/// The model's `competition_score` orientation: `100 - opportunity`, so
/// 0 -> 10, 1-4 -> 30, 5-9 -> 55, 10+ -> 80.
pub fn saturation_score_from_charger_count(charger_count: u32) -> f64 {
    100.0 - opportunity_score_from_charger_count(charger_count)
}
