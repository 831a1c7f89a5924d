use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde::Serialize;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::lending::{
    lending_router, ApplicantFinancialProfile, ApplicantSignals, LendingService, LoanRequest,
    PolicyProfile, PredictorInput,
};

pub(super) fn service() -> LendingService {
    LendingService::new(EngineConfig::default())
}

pub(super) fn tiered_service() -> LendingService {
    LendingService::new(EngineConfig {
        default_policy: PolicyProfile::TieredEmi,
    })
}

pub(super) fn router() -> axum::Router {
    lending_router(Arc::new(service()))
}

/// Comfortable salaried applicant asking for a modest loan.
pub(super) fn modest_request() -> LoanRequest {
    LoanRequest::new(5000.0, 12, 50000.0, 10000.0)
}

/// Loan whose installment alone exceeds what is left after expenses.
pub(super) fn unaffordable_request() -> LoanRequest {
    LoanRequest::new(100_000.0, 12, 5000.0, 4000.0)
}

pub(super) fn strong_signals() -> ApplicantSignals {
    ApplicantSignals {
        existing_loan_amount: 0.0,
        employment_years: 8.0,
        customer_score: 780,
        has_expense_mismatch: false,
    }
}

pub(super) fn strong_predictor_input() -> PredictorInput {
    PredictorInput {
        annual_income: 1_200_000.0,
        monthly_expenses: 20000.0,
        loan_amount_requested: 100_000.0,
        loan_tenure_months: 36,
        existing_loan_amount: 0.0,
        employment_years: 8.0,
        customer_score: 780,
        has_expense_mismatch: false,
    }
}

/// Installment of roughly a quarter of income with an unremarkable history.
pub(super) fn middling_predictor_input() -> PredictorInput {
    PredictorInput {
        annual_income: 600_000.0,
        monthly_expenses: 10000.0,
        loan_amount_requested: 400_000.0,
        loan_tenure_months: 36,
        existing_loan_amount: 0.0,
        employment_years: 3.0,
        customer_score: 600,
        has_expense_mismatch: false,
    }
}

/// Installment above eighty percent of income.
pub(super) fn stretched_predictor_input() -> PredictorInput {
    PredictorInput {
        annual_income: 240_000.0,
        monthly_expenses: 5000.0,
        loan_amount_requested: 500_000.0,
        loan_tenure_months: 36,
        existing_loan_amount: 0.0,
        employment_years: 3.0,
        customer_score: 600,
        has_expense_mismatch: false,
    }
}

/// Every factor in its top band.
pub(super) fn excellent_profile() -> ApplicantFinancialProfile {
    ApplicantFinancialProfile {
        annual_income: 1_500_000.0,
        monthly_expenses: 30000.0,
        statement_expenses: Some(31000.0),
        existing_loan_amount: 0.0,
        employment_years: 12.0,
        account_balance: 800_000.0,
        mutual_funds: 400_000.0,
        stocks: 200_000.0,
        fixed_deposits: 200_000.0,
        other_investments: 0.0,
    }
}

pub(super) fn fair_profile() -> ApplicantFinancialProfile {
    ApplicantFinancialProfile {
        annual_income: 600_000.0,
        monthly_expenses: 30000.0,
        statement_expenses: None,
        existing_loan_amount: 150_000.0,
        employment_years: 3.0,
        account_balance: 100_000.0,
        mutual_funds: 0.0,
        stocks: 0.0,
        fixed_deposits: 100_000.0,
        other_investments: 0.0,
    }
}

pub(super) fn json_request<T: Serialize>(uri: &str, body: &T) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("build request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
