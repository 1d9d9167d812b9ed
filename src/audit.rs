//! Plausibility checks over finished evaluations.
//!
//! Anomalies are warnings for a human reviewer; they never fail an evaluation.

use crate::api::SiteReport;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub site_id: String,
    pub metric: &'static str,
    pub value: String,
    pub message: String,
}

// Inclusive (min, max) bounds.
const SCORE_RANGE: (f64, f64) = (0.0, 100.0);
const SESSIONS_LOW_RANGE: (f64, f64) = (0.0, 200.0);
const SESSIONS_HIGH_RANGE: (f64, f64) = (0.0, 400.0);
const AVG_SESSIONS_RANGE: (f64, f64) = (0.0, 400.0);
const MONTHLY_PROFIT_RANGE: (f64, f64) = (-1e5, 1e6);
const PAYBACK_RANGE: (f64, f64) = (0.0, 40.0);

fn check_range(
    report: &SiteReport,
    metric: &'static str,
    value: f64,
    (lo, hi): (f64, f64),
    out: &mut Vec<Anomaly>,
) {
    if !(lo..=hi).contains(&value) {
        out.push(Anomaly {
            site_id: report.site_id.clone(),
            metric,
            value: format!("{}", value),
            message: format!("out of expected range [{}, {}]", lo, hi),
        });
    }
}

pub fn audit_report(report: &SiteReport) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();
    let f = &report.features;
    let u = &report.utilization;
    let fin = &report.financials;

    // Features are on a 0-1 scale; audit them on the collaborators' 0-100 one.
    let scores = [
        ("demand_score", f.demand),
        ("traffic_score", f.traffic),
        ("ev_share_score", f.ev_share),
        ("poi_score", f.poi),
        ("competition_score", f.competition_saturation),
        ("parking_score", f.parking),
    ];
    for (metric, unit) in scores {
        check_range(report, metric, unit * 100.0, SCORE_RANGE, &mut anomalies);
    }

    check_range(report, "utilization_index", u.utilization_index, SCORE_RANGE, &mut anomalies);
    check_range(
        report,
        "sessions_low",
        f64::from(u.sessions_low),
        SESSIONS_LOW_RANGE,
        &mut anomalies,
    );
    check_range(
        report,
        "sessions_high",
        f64::from(u.sessions_high),
        SESSIONS_HIGH_RANGE,
        &mut anomalies,
    );
    check_range(
        report,
        "avg_sessions_per_day",
        fin.avg_sessions_per_day,
        AVG_SESSIONS_RANGE,
        &mut anomalies,
    );
    check_range(report, "monthly_profit", fin.monthly_profit, MONTHLY_PROFIT_RANGE, &mut anomalies);
    check_range(report, "payback_years", fin.payback_years, PAYBACK_RANGE, &mut anomalies);

    if u.sessions_low > u.sessions_high {
        anomalies.push(Anomaly {
            site_id: report.site_id.clone(),
            metric: "sessions_range",
            value: format!("({}, {})", u.sessions_low, u.sessions_high),
            message: "sessions_low > sessions_high".to_string(),
        });
    }

    anomalies
}
