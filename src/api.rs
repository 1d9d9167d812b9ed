use crate::config::{Config, ForecastParams};
use crate::error::SiteResult;
use crate::finance::{self, FinancialInputs, FinancialResult, ForecastYear, Verdict};
use crate::model::{FeatureVector, UtilizationModel, UtilizationResult};
use crate::signals::RawSignalSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One site to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRequest {
    pub site_id: String,
    pub signals: RawSignalSet,
    pub inputs: FinancialInputs,
}

/// Everything one evaluation produces, ready for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteReport {
    pub site_id: String,
    pub features: FeatureVector,
    pub utilization: UtilizationResult,
    pub inputs: FinancialInputs,
    pub financials: FinancialResult,
    pub forecast: Vec<ForecastYear>,
    pub break_even_year: Option<u32>,
    pub verdict: Verdict,
}

/// Validated model and forecast assumptions, built once and shared across
/// any number of evaluations. Holds no per-site state.
#[derive(Debug, Clone)]
pub struct SiteEvaluator {
    pub model: UtilizationModel,
    pub forecast: ForecastParams,
}

impl SiteEvaluator {
    pub fn new(config: &Config) -> SiteResult<Self> {
        Ok(Self {
            model: UtilizationModel::new(config.model.clone())?,
            forecast: config.forecast.clone(),
        })
    }

    /// signals -> features -> utilization -> base year -> forecast -> verdict
    pub fn evaluate(
        &self,
        site_id: &str,
        signals: &RawSignalSet,
        inputs: &FinancialInputs,
    ) -> SiteResult<SiteReport> {
        let (features, utilization) = self.model.estimate(signals)?;

        let financials = finance::base_financials(
            f64::from(utilization.sessions_low),
            f64::from(utilization.sessions_high),
            inputs,
        )?;

        let forecast = finance::forecast(financials.avg_sessions_per_day, inputs, &self.forecast)?;
        let break_even_year = finance::break_even_year(&forecast, inputs.install_cost);
        let verdict = Verdict::from_payback(
            financials.payback_years,
            self.forecast.build_payback_years,
        );

        debug!(
            "{}: utilization {:.1}, sessions {}-{}, payback {:.2}y",
            site_id,
            utilization.utilization_index,
            utilization.sessions_low,
            utilization.sessions_high,
            financials.payback_years
        );

        Ok(SiteReport {
            site_id: site_id.to_string(),
            features,
            utilization,
            inputs: *inputs,
            financials,
            forecast,
            break_even_year,
            verdict,
        })
    }

    pub fn evaluate_request(&self, request: &SiteRequest) -> SiteResult<SiteReport> {
        self.evaluate(&request.site_id, &request.signals, &request.inputs)
    }

    /// Evaluates independent sites in parallel. Results keep input order and
    /// one failing site does not affect the others.
    pub fn evaluate_batch(&self, requests: &[SiteRequest]) -> Vec<SiteResult<SiteReport>> {
        info!("⚡ Evaluating {} sites", requests.len());
        requests
            .par_iter()
            .map(|request| self.evaluate_request(request))
            .collect()
    }
}
