use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::super::domain::PredictorInput;
use super::super::emi::{compute_emi, max_affordable_principal};
use super::super::limits::EngineError;
use crate::money::{self, ratio, round_currency, round_to};

/// Annual rate the legacy predictor prices loans at.
pub const TIERED_ANNUAL_RATE_PERCENT: f64 = 10.0;

const RISK_FLOOR: Decimal = dec!(0.05);
const RISK_CEILING: Decimal = dec!(0.95);
const SOFT_CEILING: Decimal = dec!(0.90);
const DISPOSABLE_INCOME_SHARE: Decimal = dec!(0.4);

/// Risk band of the legacy predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "LOW",
            RiskCategory::Medium => "MEDIUM",
            RiskCategory::High => "HIGH",
        }
    }

    pub fn from_risk(risk: Decimal) -> Self {
        if risk < dec!(0.25) {
            RiskCategory::Low
        } else if risk < dec!(0.50) {
            RiskCategory::Medium
        } else {
            RiskCategory::High
        }
    }

    pub fn decision(&self) -> PredictorDecision {
        match self {
            RiskCategory::Low => PredictorDecision::AutoApprove,
            RiskCategory::Medium => PredictorDecision::ManualReview,
            RiskCategory::High => PredictorDecision::AutoReject,
        }
    }
}

/// Routing outcome of the legacy predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictorDecision {
    AutoApprove,
    ManualReview,
    AutoReject,
}

impl PredictorDecision {
    pub fn label(&self) -> &'static str {
        match self {
            PredictorDecision::AutoApprove => "AUTO_APPROVE",
            PredictorDecision::ManualReview => "MANUAL_REVIEW",
            PredictorDecision::AutoReject => "AUTO_REJECT",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            PredictorDecision::AutoApprove => "Low risk. Loan can be auto-approved.",
            PredictorDecision::ManualReview => "Medium risk. Manual review required.",
            PredictorDecision::AutoReject => "High risk. Loan should be rejected.",
        }
    }
}

/// Output record of the legacy predictor, in the shape its call sites expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(with = "rust_decimal::serde::float")]
    pub risk_score: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub risk_percentage: Decimal,
    pub risk_category: RiskCategory,
    pub decision: PredictorDecision,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_emi: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub emi_to_income_ratio: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max_recommended_loan: Decimal,
    pub risk_factors: Vec<String>,
    pub recommendation: String,
}

/// Tiers risk by the installment's share of income, then nudges it for disposable-income
/// burden, customer score, expense mismatch, and employment tenure.
pub fn predict(input: &PredictorInput) -> Result<Prediction, EngineError> {
    let annual_income = money::amount("annual_income", input.annual_income)?;
    let monthly_expenses = money::amount("monthly_expenses", input.monthly_expenses)?;
    let existing_debt = money::amount("existing_loan_amount", input.existing_loan_amount)?;
    let employment_years = money::amount("employment_years", input.employment_years)?;

    // A missing or vanishing income is treated as one unit so ratios stay defined.
    let monthly_income = (annual_income / dec!(12)).max(Decimal::ONE);

    let monthly_emi = compute_emi(
        input.loan_amount_requested,
        input.loan_tenure_months,
        TIERED_ANNUAL_RATE_PERCENT,
    )?;
    let disposable = monthly_income - monthly_expenses;

    let emi_to_income = ratio(monthly_emi, monthly_income, "emi to income ratio")?;
    let emi_to_disposable = if disposable > Decimal::ZERO {
        ratio(monthly_emi, disposable, "emi to disposable ratio")?
    } else {
        Decimal::ONE
    };

    let mut risk = base_risk(emi_to_income);

    if emi_to_disposable > dec!(0.70) {
        risk = (risk + dec!(0.15)).min(RISK_CEILING);
    } else if emi_to_disposable > dec!(0.50) {
        risk = (risk + dec!(0.10)).min(SOFT_CEILING);
    }

    let customer_score = input.customer_score;
    if customer_score >= 750 {
        risk = (risk - dec!(0.15)).max(RISK_FLOOR);
    } else if customer_score >= 650 {
        risk = (risk - dec!(0.10)).max(RISK_FLOOR);
    } else if customer_score < 450 {
        risk = (risk + dec!(0.15)).min(RISK_CEILING);
    }

    if input.has_expense_mismatch {
        risk = (risk + dec!(0.20)).min(RISK_CEILING);
    }

    if employment_years >= dec!(5) {
        risk = (risk - dec!(0.05)).max(RISK_FLOOR);
    } else if employment_years < Decimal::ONE {
        risk = (risk + dec!(0.10)).min(SOFT_CEILING);
    }

    let risk_category = RiskCategory::from_risk(risk);
    let decision = risk_category.decision();

    let max_recommended_loan = max_affordable_principal(
        disposable * DISPOSABLE_INCOME_SHARE,
        input.loan_tenure_months,
        TIERED_ANNUAL_RATE_PERCENT,
        existing_debt,
    )?;

    let mut risk_factors = Vec::new();
    if emi_to_income > dec!(0.30) {
        risk_factors.push(format!(
            "EMI is {:.1}% of income",
            round_to(emi_to_income.saturating_mul(dec!(100)), 1)
        ));
    }
    if emi_to_disposable > dec!(0.50) {
        risk_factors.push(format!(
            "EMI is {:.1}% of disposable income",
            round_to(emi_to_disposable.saturating_mul(dec!(100)), 1)
        ));
    }
    if customer_score < 550 {
        risk_factors.push(format!("Low customer score: {customer_score}"));
    }
    if input.has_expense_mismatch {
        risk_factors.push("Expense mismatch detected".to_string());
    }
    if employment_years < dec!(2) {
        risk_factors.push("Short employment history".to_string());
    }
    if risk_factors.is_empty() {
        risk_factors.push("Good financial profile".to_string());
    }

    Ok(Prediction {
        risk_score: round_to(risk, 4),
        risk_percentage: round_to(risk * dec!(100), 1),
        risk_category,
        decision,
        monthly_emi: round_currency(monthly_emi),
        emi_to_income_ratio: round_to(emi_to_income.saturating_mul(dec!(100)), 1),
        max_recommended_loan,
        risk_factors,
        recommendation: decision.recommendation().to_string(),
    })
}

fn base_risk(emi_to_income: Decimal) -> Decimal {
    if emi_to_income <= dec!(0.10) {
        dec!(0.10)
    } else if emi_to_income <= dec!(0.20) {
        dec!(0.20)
    } else if emi_to_income <= dec!(0.30) {
        dec!(0.35)
    } else if emi_to_income <= dec!(0.40) {
        dec!(0.50)
    } else if emi_to_income <= dec!(0.50) {
        dec!(0.65)
    } else {
        dec!(0.80)
    }
}
