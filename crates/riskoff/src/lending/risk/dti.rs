use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::super::emi::compute_emi;
use super::super::limits::EngineError;
use crate::money::{self, format_rupees, ratio, round_currency, round_to};

/// Annual rate the DTI engine prices every new loan at.
pub const DTI_ANNUAL_RATE_PERCENT: f64 = 12.0;

const MAX_SCORE: Decimal = dec!(100);
const REJECTION_THRESHOLD: Decimal = dec!(50);

/// Approval status produced by the DTI engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DtiStatus {
    Approved,
    Rejected,
}

impl DtiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DtiStatus::Approved => "APPROVED",
            DtiStatus::Rejected => "REJECTED",
        }
    }

    /// Status is a fixed function of the 0-100 score.
    pub fn from_score(score: Decimal) -> Self {
        if score > REJECTION_THRESHOLD {
            DtiStatus::Rejected
        } else {
            DtiStatus::Approved
        }
    }
}

/// Native output of the DTI engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtiAssessment {
    #[serde(with = "rust_decimal::serde::float")]
    pub score: Decimal,
    pub status: DtiStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub emi: Decimal,
    pub reasons: Vec<String>,
}

impl DtiAssessment {
    fn rejected(emi: Decimal, reasons: Vec<String>) -> Self {
        Self {
            score: MAX_SCORE,
            status: DtiStatus::Rejected,
            emi,
            reasons,
        }
    }
}

/// Scores a loan from its debt-to-income and disposable-income burden.
///
/// Zero or negative income and unaffordable loans are rejected outright with a score of 100;
/// everything else accumulates points from the DTI tier, the share of disposable income the
/// installments consume, and the expense ratio.
pub fn assess_risk(
    amount: f64,
    tenure_months: i64,
    income: f64,
    expenses: f64,
    existing_emi: f64,
) -> Result<DtiAssessment, EngineError> {
    let income = money::amount("income", income)?;
    let expenses = money::amount("expenses", expenses)?;
    let existing_emi = money::amount("existing_emi", existing_emi)?;

    if income <= Decimal::ZERO {
        return Ok(DtiAssessment::rejected(
            Decimal::ZERO,
            vec!["Invalid income: Income must be greater than zero".to_string()],
        ));
    }

    let new_emi = compute_emi(amount, tenure_months, DTI_ANNUAL_RATE_PERCENT)?;
    let total_emi = new_emi + existing_emi;
    let dti = ratio(total_emi, income, "dti ratio")?;
    let expense_ratio = ratio(expenses, income, "expense ratio")?;
    let disposable = income - expenses;

    let committed = total_emi + expenses;
    if committed > income {
        let reasons = if existing_emi > Decimal::ZERO {
            vec![
                format!(
                    "Unaffordable: New EMI ({}) + Existing EMIs ({}) + Expenses ({}) = {} exceeds monthly income ({})",
                    format_rupees(new_emi),
                    format_rupees(existing_emi),
                    format_rupees(expenses),
                    format_rupees(committed),
                    format_rupees(income)
                ),
                "Applicant cannot afford this loan along with existing loan obligations"
                    .to_string(),
            ]
        } else {
            vec![
                format!(
                    "Unaffordable: EMI ({}) + Expenses ({}) = {} exceeds monthly income ({})",
                    format_rupees(new_emi),
                    format_rupees(expenses),
                    format_rupees(committed),
                    format_rupees(income)
                ),
                "Applicant cannot afford this loan with current income and expenses".to_string(),
            ]
        };
        return Ok(DtiAssessment::rejected(new_emi, reasons));
    }

    let mut score = Decimal::ZERO;
    let mut reasons = Vec::new();

    if existing_emi > Decimal::ZERO {
        reasons.push(format!(
            "Existing loan EMIs: {}/month",
            format_rupees(existing_emi)
        ));
    }

    if disposable > Decimal::ZERO {
        let emi_to_disposable = ratio(total_emi, disposable, "emi to disposable ratio")?;
        if emi_to_disposable > dec!(0.70) {
            score += dec!(40);
            reasons.push(format!(
                "Total EMI is {:.0}% of disposable income (very high)",
                percent(emi_to_disposable, 0)
            ));
        } else if emi_to_disposable > dec!(0.50) {
            score += dec!(25);
            reasons.push(format!(
                "Total EMI is {:.0}% of disposable income (moderate)",
                percent(emi_to_disposable, 0)
            ));
        }
    }

    if dti > dec!(0.60) {
        score += dec!(50);
        reasons.push(format!(
            "Critical DTI ratio: {:.2}% (above 60%)",
            percent(dti, 2)
        ));
    } else if dti > dec!(0.40) {
        score += dec!(30);
        reasons.push(format!("High DTI ratio: {:.2}% (above 40%)", percent(dti, 2)));
    } else {
        reasons.push(format!("Healthy DTI ratio: {:.2}%", percent(dti, 2)));
    }

    if expense_ratio > dec!(0.70) {
        score += dec!(20);
        reasons.push(format!(
            "High expense ratio: {:.2}% of income",
            percent(expense_ratio, 2)
        ));
    }

    if dti > dec!(0.50) && expense_ratio > dec!(0.80) {
        score *= dec!(1.5);
        reasons.push("Risk multiplier applied: High DTI and expenses".to_string());
    }

    let score = round_to(score.min(MAX_SCORE), 2);

    Ok(DtiAssessment {
        score,
        status: DtiStatus::from_score(score),
        emi: round_currency(new_emi),
        reasons,
    })
}

fn percent(value: Decimal, places: u32) -> Decimal {
    round_to(value.saturating_mul(dec!(100)), places)
}
