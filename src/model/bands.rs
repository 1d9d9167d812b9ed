use crate::config::ModelWeights;
use crate::core_types::ChargerType;
use crate::error::{SiteError, SiteResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBand {
    pub low: u32,
    pub high: u32,
}

/// Ordered utilization thresholds and the L2 session band below each one.
///
/// `bands` holds one more entry than `thresholds`; the final band applies
/// at and above the last threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionBands {
    thresholds: Vec<f64>,
    bands: Vec<SessionBand>,
    dcfc_scale: f64,
}

impl SessionBands {
    pub fn from_weights(w: &ModelWeights) -> SiteResult<Self> {
        let thresholds = w.get_band_thresholds()?;
        let lows = w.get_band_lows()?;
        let highs = w.get_band_highs()?;

        if lows.len() != highs.len() {
            return Err(SiteError::Config(format!(
                "session band lows ({}) and highs ({}) differ in length",
                lows.len(),
                highs.len()
            )));
        }
        if lows.len() != thresholds.len() + 1 {
            return Err(SiteError::Config(format!(
                "{} thresholds need {} session bands, got {}",
                thresholds.len(),
                thresholds.len() + 1,
                lows.len()
            )));
        }
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(SiteError::Config(
                "session band thresholds must be finite".to_string(),
            ));
        }
        if thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(SiteError::Config(
                "session band thresholds must be strictly increasing".to_string(),
            ));
        }
        if !w.dcfc_session_scale.is_finite() || w.dcfc_session_scale < 0.0 {
            return Err(SiteError::Config(format!(
                "dcfc_session_scale must be a non-negative number, got {}",
                w.dcfc_session_scale
            )));
        }

        let bands = lows
            .into_iter()
            .zip(highs)
            .map(|(low, high)| {
                if low > high {
                    Err(SiteError::Config(format!(
                        "session band ({}, {}) has low above high",
                        low, high
                    )))
                } else {
                    Ok(SessionBand { low, high })
                }
            })
            .collect::<SiteResult<Vec<_>>>()?;

        Ok(Self {
            thresholds,
            bands,
            dcfc_scale: w.dcfc_session_scale,
        })
    }

    /// L2-equivalent band for a 0-100 utilization index.
    pub fn baseline(&self, utilization_index: f64) -> SessionBand {
        let slot = self
            .thresholds
            .iter()
            .position(|&t| utilization_index < t)
            .unwrap_or(self.thresholds.len());
        self.bands[slot]
    }

    /// Band for the given charger type. DCFC turns over faster, so both
    /// bounds are scaled and rounded to the nearest whole session.
    pub fn for_charger(&self, utilization_index: f64, charger: ChargerType) -> SessionBand {
        let base = self.baseline(utilization_index);
        match charger {
            ChargerType::L2 => base,
            ChargerType::Dcfc => SessionBand {
                low: scale_sessions(base.low, self.dcfc_scale),
                high: scale_sessions(base.high, self.dcfc_scale),
            },
        }
    }
}

fn scale_sessions(sessions: u32, scale: f64) -> u32 {
    (f64::from(sessions) * scale).round() as u32
}
