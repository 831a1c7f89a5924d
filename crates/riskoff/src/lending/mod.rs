//! Loan affordability, risk policies, and composite customer scoring.
//!
//! Every engine here is a pure function over a request snapshot. The router and service wrap
//! them for HTTP callers; nothing in this module keeps state between calls.

pub mod domain;
pub mod emi;
mod limits;
pub mod risk;
pub mod router;
pub mod score;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ApplicantFinancialProfile, ApplicantSignals, LoanRequest, PredictorInput};
pub use emi::{
    amortization_schedule, compute_emi, max_affordable_principal, AmortizationEntry,
    AmortizationSchedule,
};
pub use limits::{EngineError, MAX_ANNUAL_RATE_PERCENT, MAX_TENURE_MONTHS};
pub use risk::{
    assess_risk, predict, AssessmentLabel, Decision, DtiAssessment, DtiScoring, DtiStatus,
    PolicyProfile, Prediction, PredictorDecision, RiskAssessment, RiskCategory, RiskEngine,
    RiskPolicy, TieredEmi,
};
pub use router::{lending_router, AssessRequest, EmiRequest};
pub use score::{
    score_customer, verify_expenses, CustomerScoreBreakdown, ExpenseVerification,
    FactorScore, Grade, ScoreFactor, MAX_CUSTOMER_SCORE,
};
pub use service::{EmiQuote, LendingService, LendingServiceError, SimulationRequest};
