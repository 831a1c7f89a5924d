use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{ApplicantFinancialProfile, ApplicantSignals, LoanRequest, PredictorInput};
use super::emi::{amortization_schedule, compute_emi, AmortizationSchedule};
use super::limits::EngineError;
use super::risk::{
    assess_risk, predict, DtiAssessment, PolicyProfile, Prediction, RiskAssessment, RiskEngine,
};
use super::score::{score_customer, CustomerScoreBreakdown};
use crate::config::EngineConfig;
use crate::money;

const SIMULATION_INPUT_MESSAGE: &str = "Amount, income, and expenses must be non-negative.";

/// Installment plus lifetime totals for a loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiQuote {
    #[serde(with = "rust_decimal::serde::float")]
    pub emi: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Decimal,
}

/// What-if request answered without persisting anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub amount: f64,
    pub tenure_months: i64,
    pub income: f64,
    pub expenses: f64,
}

/// Service composing the EMI calculator, both risk policies, and the customer score.
#[derive(Debug, Clone, Default)]
pub struct LendingService {
    engine: RiskEngine,
}

impl LendingService {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: RiskEngine::new(config),
        }
    }

    pub fn default_policy(&self) -> PolicyProfile {
        self.engine.default_policy()
    }

    /// Quote the installment and what the borrower pays over the whole tenure.
    pub fn quote_emi(
        &self,
        principal: f64,
        tenure_months: i64,
        annual_rate: f64,
    ) -> Result<EmiQuote, LendingServiceError> {
        let emi = compute_emi(principal, tenure_months, annual_rate)?;
        let months = Decimal::from(tenure_months.max(0));
        let total_payment = money::round_currency(emi * months);
        let total_interest = if emi.is_zero() {
            Decimal::ZERO
        } else {
            money::round_currency(total_payment - money::amount("principal", principal)?)
        };

        debug!(principal, tenure_months, annual_rate, %emi, "quoted installment");
        Ok(EmiQuote {
            emi,
            total_payment,
            total_interest,
        })
    }

    pub fn schedule(
        &self,
        principal: f64,
        tenure_months: i64,
        annual_rate: f64,
        first_due_date: Option<NaiveDate>,
    ) -> Result<AmortizationSchedule, LendingServiceError> {
        let schedule =
            amortization_schedule(principal, tenure_months, annual_rate, first_due_date)?;
        debug!(
            tenure_months,
            rows = schedule.schedule.len(),
            total_interest = %schedule.total_interest,
            "built amortization schedule"
        );
        Ok(schedule)
    }

    /// Assess a loan with the requested policy, falling back to the configured default.
    pub fn assess(
        &self,
        policy: Option<PolicyProfile>,
        request: &LoanRequest,
        signals: &ApplicantSignals,
    ) -> Result<RiskAssessment, LendingServiceError> {
        debug!(?request, ?signals, "assessing loan request");
        let assessment = self
            .engine
            .assess(policy, request, signals)
            .inspect_err(|error| warn!(%error, "loan request rejected by engine"))?;

        info!(
            policy = assessment.policy.label(),
            decision = ?assessment.decision,
            score = %assessment.score,
            category = assessment.category.label(),
            "loan assessed"
        );
        Ok(assessment)
    }

    pub fn assess_dti(&self, request: &LoanRequest) -> Result<DtiAssessment, LendingServiceError> {
        let assessment = assess_risk(
            request.principal,
            request.tenure_months,
            request.monthly_income,
            request.monthly_expenses,
            request.existing_emi,
        )?;
        info!(
            status = assessment.status.label(),
            score = %assessment.score,
            "dti assessment complete"
        );
        Ok(assessment)
    }

    pub fn predict(&self, input: &PredictorInput) -> Result<Prediction, LendingServiceError> {
        let prediction = predict(input)?;
        info!(
            category = prediction.risk_category.label(),
            decision = prediction.decision.label(),
            risk = %prediction.risk_score,
            "tiered prediction complete"
        );
        Ok(prediction)
    }

    pub fn score_customer(
        &self,
        profile: &ApplicantFinancialProfile,
    ) -> Result<CustomerScoreBreakdown, LendingServiceError> {
        let breakdown = score_customer(profile)?;
        if breakdown.expense_mismatch {
            warn!(
                mismatch_percent = %breakdown.mismatch_percent,
                "declared expenses disagree with statement"
            );
        }
        info!(
            score = breakdown.score,
            grade = breakdown.grade.label(),
            "customer scored"
        );
        Ok(breakdown)
    }

    /// Run the DTI engine for a what-if calculator.
    pub fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> Result<DtiAssessment, LendingServiceError> {
        if request.amount <= 0.0 || request.income < 0.0 || request.expenses < 0.0 {
            warn!(?request, "simulation input rejected");
            return Err(LendingServiceError::InvalidSimulation(
                SIMULATION_INPUT_MESSAGE.to_string(),
            ));
        }

        let loan = LoanRequest::new(
            request.amount,
            request.tenure_months,
            request.income,
            request.expenses,
        );
        self.assess_dti(&loan)
    }
}

/// Error raised by the lending service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LendingServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("{0}")]
    InvalidSimulation(String),
}
