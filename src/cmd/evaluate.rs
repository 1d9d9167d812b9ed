use crate::reports;
use clap::Args;
use evsite::api::SiteEvaluator;
use evsite::audit::audit_report;
use evsite::config::Config;
use evsite::core_types::{ChargerType, Region};
use evsite::error::SiteResult;
use evsite::finance::FinancialOverrides;
use evsite::signals::RawSignalSet;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(long, default_value = "site")]
    pub site_id: String,

    // === SIGNALS (0-100, omitted = neutral) ===
    #[arg(long)]
    pub demand_score: Option<f64>,
    #[arg(long)]
    pub traffic_score: Option<f64>,
    #[arg(long)]
    pub ev_share_score: Option<f64>,
    #[arg(long)]
    pub poi_score: Option<f64>,
    #[arg(long)]
    pub competition_score: Option<f64>,
    #[arg(long)]
    pub parking_score: Option<f64>,
    #[arg(long, default_value = "")]
    pub zoning_label: String,
    #[arg(long, default_value = "L2")]
    pub charger_type: String,
    #[arg(long, default_value_t = 0.0)]
    pub parking_count: f64,
    #[arg(long)]
    pub region_hint: Option<String>,

    // === FINANCIALS (omitted = charger-type default) ===
    #[arg(long)]
    pub price_per_kwh: Option<f64>,
    #[arg(long)]
    pub electricity_cost: Option<f64>,
    #[arg(long)]
    pub kwh_per_session: Option<f64>,
    #[arg(long)]
    pub install_cost: Option<f64>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl EvaluateArgs {
    fn signals(&self) -> RawSignalSet {
        RawSignalSet {
            demand_score: self.demand_score,
            traffic_score: self.traffic_score,
            ev_share_score: self.ev_share_score,
            poi_score: self.poi_score,
            competition_score: self.competition_score,
            parking_score: self.parking_score,
            zoning_label: self.zoning_label.clone(),
            charger_type: ChargerType::from_label(&self.charger_type),
            parking_count: self.parking_count,
            region_hint: self.region_hint.as_deref().and_then(Region::from_hint),
        }
    }

    fn overrides(&self) -> FinancialOverrides {
        FinancialOverrides {
            price_per_kwh: self.price_per_kwh,
            electricity_cost: self.electricity_cost,
            kwh_per_session: self.kwh_per_session,
            install_cost: self.install_cost,
        }
    }
}

pub fn run(args: EvaluateArgs, evaluator: &SiteEvaluator) -> SiteResult<()> {
    let signals = args.signals();
    let inputs = args.overrides().resolve(signals.charger_type);

    let report = evaluator.evaluate(&args.site_id, &signals, &inputs)?;

    for anomaly in audit_report(&report) {
        warn!(
            "⚠️  {} {} = {}: {}",
            anomaly.site_id, anomaly.metric, anomaly.value, anomaly.message
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n⚡ === EV CHARGER SITE FEASIBILITY === ⚡");
    reports::print_feature_table(&report);
    reports::print_factor_breakdown(&report.utilization);
    reports::print_financial_summary(&report);
    reports::print_forecast_table(&report.forecast, report.inputs.install_cost);

    Ok(())
}
