use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::super::limits::EngineError;
use super::verification::ExpenseVerification;
use super::{FactorScore, ScoreFactor};
use crate::money::ratio;

/// Monetary facts of a profile after boundary conversion.
pub(crate) struct ScoreInputs {
    pub annual_income: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub existing_loan_amount: Decimal,
    pub employment_years: Decimal,
    pub account_balance: Decimal,
    pub total_assets: Decimal,
}

pub(crate) fn score_profile(
    inputs: &ScoreInputs,
    verification: &ExpenseVerification,
) -> Result<(Vec<FactorScore>, u16), EngineError> {
    let awarded = [
        (ScoreFactor::IncomeStability, income_stability(inputs.annual_income)),
        (ScoreFactor::ExpenseManagement, expense_management(inputs)?),
        (ScoreFactor::SavingsRate, savings_rate(inputs)?),
        (ScoreFactor::DebtToIncome, debt_to_income(inputs)?),
        (
            ScoreFactor::EmploymentStability,
            employment_stability(inputs.employment_years),
        ),
        (ScoreFactor::ExpenseVerification, verification.points),
        (ScoreFactor::AssetsAndInvestments, assets_and_investments(inputs)),
        (ScoreFactor::AccountBalance, account_balance(inputs)?),
    ];

    let mut components = Vec::with_capacity(awarded.len());
    let mut total: u16 = 0;
    for (factor, score) in awarded {
        total += score;
        components.push(FactorScore {
            factor,
            score,
            max: factor.max_points(),
        });
    }

    Ok((components, total))
}

fn income_stability(annual_income: Decimal) -> u16 {
    if annual_income >= dec!(1_200_000) {
        180
    } else if annual_income >= dec!(600_000) {
        150
    } else if annual_income >= dec!(300_000) {
        120
    } else if annual_income >= dec!(100_000) {
        80
    } else {
        40
    }
}

fn expense_management(inputs: &ScoreInputs) -> Result<u16, EngineError> {
    if inputs.monthly_income <= Decimal::ZERO {
        return Ok(0);
    }
    let expense_ratio = ratio(
        inputs.monthly_expenses,
        inputs.monthly_income,
        "expense ratio",
    )?;

    Ok(if expense_ratio <= dec!(0.3) {
        180
    } else if expense_ratio <= dec!(0.5) {
        140
    } else if expense_ratio <= dec!(0.7) {
        100
    } else {
        50
    })
}

fn savings_rate(inputs: &ScoreInputs) -> Result<u16, EngineError> {
    if inputs.monthly_income <= Decimal::ZERO {
        return Ok(0);
    }
    let savings = inputs.monthly_income - inputs.monthly_expenses;
    let rate = ratio(savings, inputs.monthly_income, "savings rate")?;

    Ok(if rate >= dec!(0.4) {
        135
    } else if rate >= dec!(0.25) {
        100
    } else if rate >= dec!(0.1) {
        60
    } else {
        20
    })
}

fn debt_to_income(inputs: &ScoreInputs) -> Result<u16, EngineError> {
    if inputs.annual_income <= Decimal::ZERO {
        return Ok(0);
    }
    let dti = ratio(
        inputs.existing_loan_amount,
        inputs.annual_income,
        "debt to income",
    )?;

    Ok(if dti.is_zero() {
        135
    } else if dti <= dec!(0.2) {
        110
    } else if dti <= dec!(0.4) {
        80
    } else if dti <= dec!(0.6) {
        50
    } else {
        20
    })
}

fn employment_stability(years: Decimal) -> u16 {
    if years >= dec!(10) {
        90
    } else if years >= dec!(5) {
        75
    } else if years >= dec!(2) {
        55
    } else if years >= dec!(1) {
        35
    } else {
        15
    }
}

// Compared against annual income even when it is zero, so a profile with no income and no
// assets still lands in the top band.
fn assets_and_investments(inputs: &ScoreInputs) -> u16 {
    let assets = inputs.total_assets;
    let income = inputs.annual_income;

    if assets >= income {
        45
    } else if assets >= income * dec!(0.5) {
        35
    } else if assets >= income * dec!(0.25) {
        25
    } else {
        10
    }
}

fn account_balance(inputs: &ScoreInputs) -> Result<u16, EngineError> {
    if inputs.monthly_income <= Decimal::ZERO {
        return Ok(10);
    }
    let months = ratio(
        inputs.account_balance,
        inputs.monthly_income,
        "balance months",
    )?;

    Ok(if months >= dec!(6) {
        45
    } else if months >= dec!(3) {
        35
    } else if months >= dec!(1) {
        20
    } else {
        10
    })
}
