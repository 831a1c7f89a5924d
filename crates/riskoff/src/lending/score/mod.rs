//! Composite 0-900 customer creditworthiness score.

mod factors;
mod verification;

pub use verification::{verify_expenses, ExpenseVerification, NEUTRAL_VERIFICATION_POINTS};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use self::factors::{score_profile, ScoreInputs};
use super::domain::ApplicantFinancialProfile;
use super::limits::EngineError;
use crate::money;

/// Upper bound of the composite score; the factor maxima sum to it.
pub const MAX_CUSTOMER_SCORE: u16 = 900;

/// The eight weighted factors, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreFactor {
    #[serde(rename = "Income Stability")]
    IncomeStability,
    #[serde(rename = "Expense Management")]
    ExpenseManagement,
    #[serde(rename = "Savings Rate")]
    SavingsRate,
    #[serde(rename = "Debt-to-Income")]
    DebtToIncome,
    #[serde(rename = "Employment Stability")]
    EmploymentStability,
    #[serde(rename = "Expense Verification")]
    ExpenseVerification,
    #[serde(rename = "Assets & Investments")]
    AssetsAndInvestments,
    #[serde(rename = "Account Balance")]
    AccountBalance,
}

impl ScoreFactor {
    pub const ALL: [ScoreFactor; 8] = [
        ScoreFactor::IncomeStability,
        ScoreFactor::ExpenseManagement,
        ScoreFactor::SavingsRate,
        ScoreFactor::DebtToIncome,
        ScoreFactor::EmploymentStability,
        ScoreFactor::ExpenseVerification,
        ScoreFactor::AssetsAndInvestments,
        ScoreFactor::AccountBalance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScoreFactor::IncomeStability => "Income Stability",
            ScoreFactor::ExpenseManagement => "Expense Management",
            ScoreFactor::SavingsRate => "Savings Rate",
            ScoreFactor::DebtToIncome => "Debt-to-Income",
            ScoreFactor::EmploymentStability => "Employment Stability",
            ScoreFactor::ExpenseVerification => "Expense Verification",
            ScoreFactor::AssetsAndInvestments => "Assets & Investments",
            ScoreFactor::AccountBalance => "Account Balance",
        }
    }

    /// 20/20/15/15/10/10/5/5 percent of the 900-point scale.
    pub fn max_points(&self) -> u16 {
        match self {
            ScoreFactor::IncomeStability | ScoreFactor::ExpenseManagement => 180,
            ScoreFactor::SavingsRate | ScoreFactor::DebtToIncome => 135,
            ScoreFactor::EmploymentStability | ScoreFactor::ExpenseVerification => 90,
            ScoreFactor::AssetsAndInvestments | ScoreFactor::AccountBalance => 45,
        }
    }
}

/// Points one factor contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: ScoreFactor,
    pub score: u16,
    pub max: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Excellent,
    Good,
    Fair,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

impl Grade {
    pub fn from_score(score: u16) -> Self {
        match score {
            750.. => Grade::Excellent,
            650..=749 => Grade::Good,
            550..=649 => Grade::Fair,
            400..=549 => Grade::Poor,
            _ => Grade::VeryPoor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::Fair => "Fair",
            Grade::Poor => "Poor",
            Grade::VeryPoor => "Very Poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerScoreBreakdown {
    pub score: u16,
    pub max_score: u16,
    pub grade: Grade,
    pub breakdown: Vec<FactorScore>,
    pub expense_mismatch: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub mismatch_percent: Decimal,
}

impl CustomerScoreBreakdown {
    pub fn factor(&self, factor: ScoreFactor) -> Option<&FactorScore> {
        self.breakdown.iter().find(|entry| entry.factor == factor)
    }
}

/// Scores a profile across the eight factors and grades the total.
pub fn score_customer(
    profile: &ApplicantFinancialProfile,
) -> Result<CustomerScoreBreakdown, EngineError> {
    let annual_income = money::amount("annual_income", profile.annual_income)?;
    let monthly_income = if annual_income > Decimal::ZERO {
        annual_income / dec!(12)
    } else {
        Decimal::ZERO
    };

    let total_assets = [
        ("account_balance", profile.account_balance),
        ("mutual_funds", profile.mutual_funds),
        ("stocks", profile.stocks),
        ("fixed_deposits", profile.fixed_deposits),
        ("other_investments", profile.other_investments),
    ]
    .into_iter()
    .try_fold(Decimal::ZERO, |sum, (field, value)| {
        money::amount(field, value).map(|value| sum + value)
    })?;

    let inputs = ScoreInputs {
        annual_income,
        monthly_income,
        monthly_expenses: money::amount("monthly_expenses", profile.monthly_expenses)?,
        existing_loan_amount: money::amount(
            "existing_loan_amount",
            profile.existing_loan_amount,
        )?,
        employment_years: money::amount("employment_years", profile.employment_years)?,
        account_balance: money::amount("account_balance", profile.account_balance)?,
        total_assets,
    };

    let verification = verify_expenses(profile.monthly_expenses, profile.statement_expenses)?;
    let (breakdown, score) = score_profile(&inputs, &verification)?;

    Ok(CustomerScoreBreakdown {
        score,
        max_score: MAX_CUSTOMER_SCORE,
        grade: Grade::from_score(score),
        breakdown,
        expense_mismatch: verification.expense_mismatch,
        mismatch_percent: verification.mismatch_percent,
    })
}
