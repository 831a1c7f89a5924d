use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    ApplicantFinancialProfile, ApplicantSignals, LoanRequest, PredictorInput,
    DEFAULT_ANNUAL_RATE_PERCENT,
};
use super::risk::PolicyProfile;
use super::service::{LendingService, LendingServiceError, SimulationRequest};

/// Loan terms for the installment routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiRequest {
    pub principal: f64,
    pub tenure_months: i64,
    #[serde(default = "default_annual_rate")]
    pub annual_rate: f64,
    #[serde(default)]
    pub first_due_date: Option<NaiveDate>,
}

/// Loan request plus the optional signals and policy override for `/risk/assess`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessRequest {
    #[serde(flatten)]
    pub loan: LoanRequest,
    #[serde(default)]
    pub signals: ApplicantSignals,
    #[serde(default)]
    pub policy: Option<PolicyProfile>,
}

/// Router builder exposing the EMI, risk, scoring, and simulator endpoints.
pub fn lending_router(service: Arc<LendingService>) -> Router {
    Router::new()
        .route("/api/v1/emi", post(emi_handler))
        .route("/api/v1/emi/schedule", post(schedule_handler))
        .route("/api/v1/risk/assess", post(assess_handler))
        .route("/api/v1/risk/dti", post(dti_handler))
        .route("/api/v1/risk/predict", post(predict_handler))
        .route("/api/v1/customers/score", post(score_handler))
        .route("/simulator/calculate", post(simulate_handler))
        .with_state(service)
}

pub(crate) async fn emi_handler(
    State(service): State<Arc<LendingService>>,
    Json(request): Json<EmiRequest>,
) -> Response {
    respond(service.quote_emi(request.principal, request.tenure_months, request.annual_rate))
}

pub(crate) async fn schedule_handler(
    State(service): State<Arc<LendingService>>,
    Json(request): Json<EmiRequest>,
) -> Response {
    respond(service.schedule(
        request.principal,
        request.tenure_months,
        request.annual_rate,
        request.first_due_date,
    ))
}

pub(crate) async fn assess_handler(
    State(service): State<Arc<LendingService>>,
    Json(request): Json<AssessRequest>,
) -> Response {
    respond(service.assess(request.policy, &request.loan, &request.signals))
}

pub(crate) async fn dti_handler(
    State(service): State<Arc<LendingService>>,
    Json(request): Json<LoanRequest>,
) -> Response {
    respond(service.assess_dti(&request))
}

pub(crate) async fn predict_handler(
    State(service): State<Arc<LendingService>>,
    Json(input): Json<PredictorInput>,
) -> Response {
    respond(service.predict(&input))
}

pub(crate) async fn score_handler(
    State(service): State<Arc<LendingService>>,
    Json(profile): Json<ApplicantFinancialProfile>,
) -> Response {
    respond(service.score_customer(&profile))
}

pub(crate) async fn simulate_handler(
    State(service): State<Arc<LendingService>>,
    Json(request): Json<SimulationRequest>,
) -> Response {
    respond(service.simulate(&request))
}

fn respond<T: Serialize>(result: Result<T, LendingServiceError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(LendingServiceError::InvalidSimulation(detail)) => {
            let payload = json!({
                "detail": detail,
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(LendingServiceError::Engine(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

fn default_annual_rate() -> f64 {
    DEFAULT_ANNUAL_RATE_PERCENT
}
