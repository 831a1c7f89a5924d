use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use riskoff::lending::PolicyProfile;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_policy(raw: &str) -> Result<PolicyProfile, String> {
    PolicyProfile::parse(raw)
        .ok_or_else(|| format!("unknown policy '{raw}', expected dti_scoring or tiered_emi"))
}
