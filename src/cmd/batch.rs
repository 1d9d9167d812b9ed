use crate::reports;
use clap::Args;
use evsite::api::SiteEvaluator;
use evsite::audit::audit_report;
use evsite::batch;
use evsite::config::Config;
use evsite::error::SiteResult;
use std::fs::File;
use tracing::{error, info, warn};

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub config: Config,

    /// CSV of sites, one row each, headed by the inbound signal names.
    #[arg(short, long)]
    pub input: String,

    /// Optional CSV summary destination.
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: BatchArgs, evaluator: &SiteEvaluator) -> SiteResult<()> {
    info!("📂 Loading sites: {}", args.input);
    let requests = batch::load_requests(&args.input)?;

    let results = evaluator.evaluate_batch(&requests);

    let mut reports_ok = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(report) => {
                for anomaly in audit_report(&report) {
                    warn!(
                        "⚠️  {} {} = {}: {}",
                        anomaly.site_id, anomaly.metric, anomaly.value, anomaly.message
                    );
                }
                reports_ok.push(report);
            }
            Err(e) => {
                failures += 1;
                error!("❌ {}: {}", request.site_id, e);
            }
        }
    }

    info!(
        "✅ {} evaluated, {} failed",
        reports_ok.len(),
        failures
    );

    if let Some(path) = &args.output {
        batch::write_reports(File::create(path)?, &reports_ok)?;
        info!("💾 Summary written to {}", path);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports_ok)?);
    } else {
        reports::print_batch_summary(&reports_ok);
    }

    Ok(())
}
