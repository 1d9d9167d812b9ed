//! CSV plumbing for multi-site runs.
//!
//! Input rows carry the inbound signal columns plus optional financial
//! overrides; blank cells fall back to the usual defaults.

use crate::api::{SiteReport, SiteRequest};
use crate::core_types::{ChargerType, Region};
use crate::error::SiteResult;
use crate::finance::FinancialOverrides;
use crate::signals::RawSignalSet;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteRow {
    pub site_id: String,
    pub demand_score: Option<f64>,
    pub traffic_score: Option<f64>,
    pub ev_share_score: Option<f64>,
    pub poi_score: Option<f64>,
    pub competition_score: Option<f64>,
    pub parking_score: Option<f64>,
    pub zoning_label: Option<String>,
    pub charger_type: Option<String>,
    pub parking_count: Option<f64>,
    pub region_hint: Option<String>,

    pub price_per_kwh: Option<f64>,
    pub electricity_cost: Option<f64>,
    pub kwh_per_session: Option<f64>,
    pub install_cost: Option<f64>,
}

impl SiteRow {
    pub fn into_request(self, row_number: usize) -> SiteRequest {
        let charger_type = self
            .charger_type
            .as_deref()
            .map(ChargerType::from_label)
            .unwrap_or_default();

        let signals = RawSignalSet {
            demand_score: self.demand_score,
            traffic_score: self.traffic_score,
            ev_share_score: self.ev_share_score,
            poi_score: self.poi_score,
            competition_score: self.competition_score,
            parking_score: self.parking_score,
            zoning_label: self.zoning_label.unwrap_or_default(),
            charger_type,
            parking_count: self.parking_count.unwrap_or(0.0),
            region_hint: self.region_hint.as_deref().and_then(Region::from_hint),
        };

        let overrides = FinancialOverrides {
            price_per_kwh: self.price_per_kwh,
            electricity_cost: self.electricity_cost,
            kwh_per_session: self.kwh_per_session,
            install_cost: self.install_cost,
        };

        let site_id = if self.site_id.trim().is_empty() {
            format!("row-{}", row_number)
        } else {
            self.site_id
        };

        SiteRequest {
            site_id,
            signals,
            inputs: overrides.resolve(charger_type),
        }
    }
}

pub fn read_requests<R: Read>(reader: R) -> SiteResult<Vec<SiteRequest>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize::<SiteRow>()
        .enumerate()
        .map(|(i, row)| -> SiteResult<SiteRequest> { Ok(row?.into_request(i + 1)) })
        .collect()
}

pub fn load_requests<P: AsRef<Path>>(path: P) -> SiteResult<Vec<SiteRequest>> {
    read_requests(File::open(path)?)
}

/// Flat per-site summary for CSV export.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow<'a> {
    pub site_id: &'a str,
    pub charger_type: String,
    pub region: String,
    pub zoning_type: String,
    pub utilization_index: f64,
    pub sessions_low: u32,
    pub sessions_high: u32,
    pub daily_profit: f64,
    pub monthly_profit: f64,
    pub annual_profit: f64,
    /// Empty when the site never pays back.
    pub payback_years: Option<f64>,
    pub cumulative_profit: f64,
    pub cumulative_roi: Option<f64>,
    pub break_even_year: Option<u32>,
    pub verdict: String,
}

impl<'a> From<&'a SiteReport> for ReportRow<'a> {
    fn from(r: &'a SiteReport) -> Self {
        let last = r.forecast.last();
        Self {
            site_id: &r.site_id,
            charger_type: r.features.charger_type.to_string(),
            region: r.features.region.to_string(),
            zoning_type: r.features.zoning_type.to_string(),
            utilization_index: r.utilization.utilization_index,
            sessions_low: r.utilization.sessions_low,
            sessions_high: r.utilization.sessions_high,
            daily_profit: r.financials.daily_profit,
            monthly_profit: r.financials.monthly_profit,
            annual_profit: r.financials.annual_profit,
            payback_years: r.financials.pays_back().then_some(r.financials.payback_years),
            cumulative_profit: last.map(|y| y.cumulative_profit).unwrap_or(0.0),
            cumulative_roi: last.and_then(|y| y.cumulative_roi),
            break_even_year: r.break_even_year,
            verdict: r.verdict.to_string(),
        }
    }
}

pub fn write_reports<W: Write>(writer: W, reports: &[SiteReport]) -> SiteResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for report in reports {
        wtr.serialize(ReportRow::from(report))?;
    }
    wtr.flush()?;
    Ok(())
}
