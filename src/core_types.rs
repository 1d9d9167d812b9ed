use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum ChargerType {
    #[default]
    #[strum(serialize = "L2")]
    #[serde(rename = "L2")]
    L2,
    #[strum(serialize = "DCFC")]
    #[serde(rename = "DCFC")]
    Dcfc,
}

impl ChargerType {
    /// Anything that is not recognisably DCFC is treated as Level 2.
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or_default()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Urban,
    Suburban,
    Rural,
}

impl Region {
    /// `None` for blank or unrecognised hints, so the caller can infer instead.
    pub fn from_hint(hint: &str) -> Option<Self> {
        hint.trim().parse().ok()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ZoningType {
    Commercial,
    Industrial,
    Residential,
    Other,
}

// Checked in order; the first fragment found in the label wins.
const ZONING_FRAGMENTS: [(&str, ZoningType); 3] = [
    ("comm", ZoningType::Commercial),
    ("ind", ZoningType::Industrial),
    ("res", ZoningType::Residential),
];

impl ZoningType {
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        ZONING_FRAGMENTS
            .iter()
            .find(|(fragment, _)| label.contains(fragment))
            .map(|&(_, zoning)| zoning)
            .unwrap_or(ZoningType::Other)
    }
}
