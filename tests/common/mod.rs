#![allow(dead_code)] // Not every test file uses every helper

use evsite::config::ModelWeights;
use evsite::core_types::{ChargerType, Region};
use evsite::model::UtilizationModel;
use evsite::signals::RawSignalSet;

pub fn default_model() -> UtilizationModel {
    UtilizationModel::new(ModelWeights::default()).expect("default weights are valid")
}

/// Builder for RawSignalSet to keep scenarios readable.
pub struct SignalBuilder {
    signals: RawSignalSet,
}

impl SignalBuilder {
    pub fn new() -> Self {
        Self {
            signals: RawSignalSet::default(),
        }
    }

    /// Every score set to the same value.
    pub fn uniform(score: f64) -> Self {
        Self::new()
            .demand(score)
            .traffic(score)
            .ev_share(score)
            .poi(score)
            .competition(score)
            .parking(score)
    }

    pub fn demand(mut self, v: f64) -> Self {
        self.signals.demand_score = Some(v);
        self
    }

    pub fn traffic(mut self, v: f64) -> Self {
        self.signals.traffic_score = Some(v);
        self
    }

    pub fn ev_share(mut self, v: f64) -> Self {
        self.signals.ev_share_score = Some(v);
        self
    }

    pub fn poi(mut self, v: f64) -> Self {
        self.signals.poi_score = Some(v);
        self
    }

    pub fn competition(mut self, v: f64) -> Self {
        self.signals.competition_score = Some(v);
        self
    }

    pub fn parking(mut self, v: f64) -> Self {
        self.signals.parking_score = Some(v);
        self
    }

    pub fn zoning(mut self, label: &str) -> Self {
        self.signals.zoning_label = label.to_string();
        self
    }

    pub fn charger(mut self, charger: ChargerType) -> Self {
        self.signals.charger_type = charger;
        self
    }

    pub fn parking_count(mut self, count: f64) -> Self {
        self.signals.parking_count = count;
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.signals.region_hint = Some(region);
        self
    }

    pub fn build(self) -> RawSignalSet {
        self.signals
    }
}

pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {} ± {}, got {}",
        expected,
        tol,
        actual
    );
}
