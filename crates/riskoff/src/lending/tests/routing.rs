use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::lending::router::{
    assess_handler, emi_handler, simulate_handler, AssessRequest, EmiRequest,
};
use crate::lending::{PolicyProfile, SimulationRequest};

#[tokio::test]
async fn emi_handler_quotes_installment() {
    let response = emi_handler(
        State(Arc::new(service())),
        axum::Json(EmiRequest {
            principal: 100_000.0,
            tenure_months: 12,
            annual_rate: 12.0,
            first_due_date: None,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["emi"], json!(8884.88));
    assert_eq!(payload["total_interest"], json!(6618.56));
}

#[tokio::test]
async fn emi_handler_returns_unprocessable_for_bounded_input() {
    let response = emi_handler(
        State(Arc::new(service())),
        axum::Json(EmiRequest {
            principal: 100_000.0,
            tenure_months: 1200,
            annual_rate: 12.0,
            first_due_date: None,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("1200 months"));
}

#[tokio::test]
async fn emi_handler_rejects_installment_that_never_repays() {
    let response = emi_handler(
        State(Arc::new(service())),
        axum::Json(EmiRequest {
            principal: 1_000_000_000.0,
            tenure_months: 600,
            annual_rate: 100.0,
            first_due_date: None,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("never repays"));
}

#[tokio::test]
async fn assess_handler_honours_policy_override() {
    let response = assess_handler(
        State(Arc::new(service())),
        axum::Json(AssessRequest {
            loan: modest_request(),
            signals: strong_signals(),
            policy: Some(PolicyProfile::TieredEmi),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["policy"], "tiered_emi");
    assert_eq!(payload["category"], "LOW");
    assert_eq!(payload["decision"], "approve");
    assert!(payload.get("max_recommended_loan").is_some());
}

#[tokio::test]
async fn simulate_handler_returns_bad_request_detail() {
    let response = simulate_handler(
        State(Arc::new(service())),
        axum::Json(SimulationRequest {
            amount: -5000.0,
            tenure_months: 12,
            income: 50000.0,
            expenses: 10000.0,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload.get("detail").is_some());
}

#[tokio::test]
async fn simulator_route_returns_dti_result() {
    let response = router()
        .oneshot(json_request(
            "/simulator/calculate",
            &json!({
                "amount": 5000,
                "tenure_months": 12,
                "income": 50000,
                "expenses": 10000
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "APPROVED");
    assert_eq!(payload["score"], json!(0.0));
    assert!(payload["reasons"].is_array());
}

#[tokio::test]
async fn simulator_route_rejects_zero_amount() {
    let response = router()
        .oneshot(json_request(
            "/simulator/calculate",
            &json!({
                "amount": 0,
                "tenure_months": 12,
                "income": 50000,
                "expenses": 10000
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn simulator_route_rejects_missing_fields() {
    let response = router()
        .oneshot(json_request(
            "/simulator/calculate",
            &json!({
                "amount": 5000,
                "income": 50000
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn assess_route_accepts_flat_loan_fields() {
    let response = router()
        .oneshot(json_request(
            "/api/v1/risk/assess",
            &json!({
                "principal": 100000,
                "tenure_months": 12,
                "monthly_income": 5000,
                "monthly_expenses": 4000
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["policy"], "dti_scoring");
    assert_eq!(payload["category"], "REJECTED");
    assert_eq!(payload["decision"], "reject");
    assert_eq!(payload["emi"], json!(8884.88));
}

#[tokio::test]
async fn schedule_route_lists_every_month() {
    let response = router()
        .oneshot(json_request(
            "/api/v1/emi/schedule",
            &json!({
                "principal": 60000,
                "tenure_months": 6,
                "first_due_date": "2025-03-05"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let rows = payload["schedule"].as_array().expect("schedule rows");
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["due_date"], "2025-03-05");
    assert_eq!(rows[5]["due_date"], "2025-08-05");
    assert_eq!(rows[5]["balance"], json!(0.0));
    assert_eq!(payload["annual_rate"], json!(12.0));
}

#[tokio::test]
async fn score_route_grades_profile() {
    let response = router()
        .oneshot(json_request("/api/v1/customers/score", &excellent_profile()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], 900);
    assert_eq!(payload["max_score"], 900);
    assert_eq!(payload["grade"], "Excellent");
    assert_eq!(payload["breakdown"].as_array().map(Vec::len), Some(8));
}

#[tokio::test]
async fn predict_route_applies_defaults() {
    let response = router()
        .oneshot(json_request(
            "/api/v1/risk/predict",
            &json!({
                "annual_income": 240000,
                "monthly_expenses": 5000,
                "loan_amount_requested": 500000,
                "employment_years": 3
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["risk_category"], "HIGH");
    assert_eq!(payload["decision"], "AUTO_REJECT");
}

#[tokio::test]
async fn dti_route_rejects_non_numeric_payloads() {
    let response = router()
        .oneshot(json_request(
            "/api/v1/risk/dti",
            &json!({
                "principal": "a lot",
                "tenure_months": 12,
                "monthly_income": 5000,
                "monthly_expenses": 4000
            }),
        ))
        .await
        .expect("route executes");

    assert!(response.status().is_client_error());
}
