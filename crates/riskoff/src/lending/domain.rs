use serde::{Deserialize, Serialize};

/// Annual rate applied when a loan request does not carry one.
pub const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 12.0;

/// Tenure assumed by the legacy predictor when the caller leaves it out.
pub const DEFAULT_PREDICTOR_TENURE_MONTHS: i64 = 36;

/// Customer score assumed when no composite score has been computed yet.
pub const DEFAULT_CUSTOMER_SCORE: u16 = 600;

/// Loan facts supplied per request by the application routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: f64,
    pub tenure_months: i64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    #[serde(default)]
    pub existing_emi: f64,
    #[serde(default = "default_annual_rate")]
    pub annual_rate: f64,
}

impl LoanRequest {
    pub fn new(
        principal: f64,
        tenure_months: i64,
        monthly_income: f64,
        monthly_expenses: f64,
    ) -> Self {
        Self {
            principal,
            tenure_months,
            monthly_income,
            monthly_expenses,
            existing_emi: 0.0,
            annual_rate: DEFAULT_ANNUAL_RATE_PERCENT,
        }
    }

    pub fn with_existing_emi(mut self, existing_emi: f64) -> Self {
        self.existing_emi = existing_emi;
        self
    }
}

/// Applicant facts beyond the loan itself, consumed by the tiered policy.
///
/// `has_expense_mismatch` is the fraud signal produced by expense verification; it travels as
/// an explicit field rather than being looked up elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantSignals {
    #[serde(default)]
    pub existing_loan_amount: f64,
    #[serde(default)]
    pub employment_years: f64,
    #[serde(default = "default_customer_score")]
    pub customer_score: u16,
    #[serde(default)]
    pub has_expense_mismatch: bool,
}

impl Default for ApplicantSignals {
    fn default() -> Self {
        Self {
            existing_loan_amount: 0.0,
            employment_years: 0.0,
            customer_score: DEFAULT_CUSTOMER_SCORE,
            has_expense_mismatch: false,
        }
    }
}

/// Financial snapshot scored by the composite customer score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantFinancialProfile {
    pub annual_income: f64,
    pub monthly_expenses: f64,
    /// Monthly expenses derived from an uploaded bank statement, when one exists.
    #[serde(default)]
    pub statement_expenses: Option<f64>,
    #[serde(default)]
    pub existing_loan_amount: f64,
    #[serde(default)]
    pub employment_years: f64,
    #[serde(default)]
    pub account_balance: f64,
    #[serde(default)]
    pub mutual_funds: f64,
    #[serde(default)]
    pub stocks: f64,
    #[serde(default)]
    pub fixed_deposits: f64,
    #[serde(default)]
    pub other_investments: f64,
}

/// Input record of the legacy EMI-tiered predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorInput {
    #[serde(default)]
    pub annual_income: f64,
    #[serde(default)]
    pub monthly_expenses: f64,
    #[serde(default)]
    pub loan_amount_requested: f64,
    #[serde(default = "default_predictor_tenure")]
    pub loan_tenure_months: i64,
    #[serde(default)]
    pub existing_loan_amount: f64,
    #[serde(default)]
    pub employment_years: f64,
    #[serde(default = "default_customer_score")]
    pub customer_score: u16,
    #[serde(default)]
    pub has_expense_mismatch: bool,
}

impl PredictorInput {
    /// Projects a unified loan request onto the legacy record shape.
    pub fn from_request(request: &LoanRequest, signals: &ApplicantSignals) -> Self {
        Self {
            annual_income: request.monthly_income * 12.0,
            monthly_expenses: request.monthly_expenses,
            loan_amount_requested: request.principal,
            loan_tenure_months: request.tenure_months,
            existing_loan_amount: signals.existing_loan_amount,
            employment_years: signals.employment_years,
            customer_score: signals.customer_score,
            has_expense_mismatch: signals.has_expense_mismatch,
        }
    }
}

fn default_annual_rate() -> f64 {
    DEFAULT_ANNUAL_RATE_PERCENT
}

fn default_customer_score() -> u16 {
    DEFAULT_CUSTOMER_SCORE
}

fn default_predictor_tenure() -> i64 {
    DEFAULT_PREDICTOR_TENURE_MONTHS
}
