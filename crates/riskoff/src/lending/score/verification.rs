use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::super::limits::EngineError;
use crate::money::{self, ratio, round_to};

/// Points awarded when no statement was available to compare against.
pub const NEUTRAL_VERIFICATION_POINTS: u16 = 45;

/// Outcome of comparing declared expenses with statement-derived expenses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseVerification {
    pub points: u16,
    pub expense_mismatch: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub mismatch_percent: Decimal,
}

impl ExpenseVerification {
    fn neutral() -> Self {
        Self {
            points: NEUTRAL_VERIFICATION_POINTS,
            expense_mismatch: false,
            mismatch_percent: Decimal::ZERO,
        }
    }
}

/// Flags a discrepancy between what the applicant declared and what their bank statement
/// shows. A gap above 25% of the declared figure counts as a mismatch.
pub fn verify_expenses(
    stated_monthly_expenses: f64,
    statement_expenses: Option<f64>,
) -> Result<ExpenseVerification, EngineError> {
    let stated = money::amount("monthly_expenses", stated_monthly_expenses)?;
    let statement = match statement_expenses {
        Some(value) => money::amount("statement_expenses", value)?,
        None => return Ok(ExpenseVerification::neutral()),
    };

    if statement <= Decimal::ZERO || stated <= Decimal::ZERO {
        return Ok(ExpenseVerification::neutral());
    }

    let gap = ratio((stated - statement).abs(), stated, "expense mismatch")?;
    let diff_percent = gap.saturating_mul(dec!(100));

    let (points, expense_mismatch) = if diff_percent <= dec!(10) {
        (90, false)
    } else if diff_percent <= dec!(25) {
        (60, false)
    } else if diff_percent <= dec!(50) {
        (30, true)
    } else {
        (0, true)
    };

    Ok(ExpenseVerification {
        points,
        expense_mismatch,
        mismatch_percent: round_to(diff_percent, 2),
    })
}
