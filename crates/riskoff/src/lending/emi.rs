//! Equated monthly installment math.
//!
//! All arithmetic runs on [`Decimal`], including the `(1 + r)^n` power series, so identical
//! inputs produce bit-identical installments on every platform.

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::limits::{check_rate, check_tenure, EngineError};
use crate::money::{self, round_currency};

const PERCENT_PER_MONTH_DIVISOR: Decimal = dec!(1200);

/// Monthly installment for `principal` over `tenure_months` at `annual_rate` percent.
///
/// Non-positive principal or tenure yields zero. The result is rounded half-up to two places.
/// An installment that rounds down to the first month's interest (or to nothing) never pays
/// the loan down and fails with [`EngineError::NonAmortizing`].
pub fn compute_emi(
    principal: f64,
    tenure_months: i64,
    annual_rate: f64,
) -> Result<Decimal, EngineError> {
    let principal = money::amount("principal", principal)?;
    if principal <= Decimal::ZERO || tenure_months <= 0 {
        return Ok(Decimal::ZERO);
    }
    check_tenure(tenure_months)?;
    let rate = monthly_rate(annual_rate)?;

    let emi = installment(principal, tenure_months as u64, rate)?;
    let first_interest = round_currency(
        principal
            .checked_mul(rate)
            .ok_or(overflow("first month interest"))?,
    );
    if emi <= first_interest {
        return Err(EngineError::NonAmortizing {
            principal,
            emi,
            months: tenure_months,
        });
    }
    Ok(emi)
}

/// Largest principal whose installment fits inside `max_emi`, net of `existing_debt`.
///
/// Inverse of the annuity formula; never negative.
pub fn max_affordable_principal(
    max_emi: Decimal,
    tenure_months: i64,
    annual_rate: f64,
    existing_debt: Decimal,
) -> Result<Decimal, EngineError> {
    let gross = if tenure_months <= 0 || max_emi <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        check_tenure(tenure_months)?;
        let rate = monthly_rate(annual_rate)?;
        let months = tenure_months as u64;

        if rate.is_zero() {
            max_emi
                .checked_mul(Decimal::from(months))
                .ok_or(overflow("max principal"))?
        } else {
            let factor = growth_factor(rate, months)?;
            let discount = (factor - Decimal::ONE)
                .checked_div(factor)
                .ok_or(overflow("max principal"))?;
            max_emi
                .checked_mul(discount)
                .and_then(|value| value.checked_div(rate))
                .ok_or(overflow("max principal"))?
        }
    };

    Ok(round_currency((gross - existing_debt).max(Decimal::ZERO)))
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub due_date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::float")]
    pub emi: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub principal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub interest: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Month-by-month repayment plan with totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    #[serde(with = "rust_decimal::serde::float")]
    pub loan_amount: Decimal,
    pub tenure_months: i64,
    pub annual_rate: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub emi: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Decimal,
    pub schedule: Vec<AmortizationEntry>,
}

/// Builds the repayment plan for a loan.
///
/// Interest accrues on the outstanding balance each month. The final installment absorbs the
/// rounding residual, so principal components always sum to the loan amount. A residual larger
/// than one installment means the rounded EMI does not repay the loan, and the schedule fails
/// with [`EngineError::NonAmortizing`] instead of ending in a balloon payment.
pub fn amortization_schedule(
    principal: f64,
    tenure_months: i64,
    annual_rate: f64,
    first_due_date: Option<NaiveDate>,
) -> Result<AmortizationSchedule, EngineError> {
    let emi = compute_emi(principal, tenure_months, annual_rate)?;
    let loan_amount = money::amount("principal", principal)?;

    let mut schedule = AmortizationSchedule {
        loan_amount,
        tenure_months,
        annual_rate,
        emi,
        total_payment: Decimal::ZERO,
        total_interest: Decimal::ZERO,
        schedule: Vec::new(),
    };

    if emi.is_zero() {
        return Ok(schedule);
    }

    let rate = monthly_rate(annual_rate)?;
    let months = tenure_months as u32;
    let mut balance = loan_amount;
    let mut total_payment = Decimal::ZERO;

    for month in 1..=months {
        let interest = round_currency(
            balance
                .checked_mul(rate)
                .ok_or(overflow("schedule interest"))?,
        );
        let scheduled = emi - interest;
        let principal_part = if month == months {
            if (balance - scheduled).abs() > emi {
                return Err(EngineError::NonAmortizing {
                    principal: loan_amount,
                    emi,
                    months: tenure_months,
                });
            }
            balance
        } else {
            scheduled.min(balance)
        };
        let payment = principal_part + interest;
        balance = (balance - principal_part).max(Decimal::ZERO);
        total_payment += payment;

        let due_date =
            first_due_date.and_then(|first| first.checked_add_months(Months::new(month - 1)));

        schedule.schedule.push(AmortizationEntry {
            month,
            due_date,
            emi: payment,
            principal: principal_part,
            interest,
            balance,
        });
    }

    schedule.total_payment = total_payment;
    schedule.total_interest = total_payment - loan_amount;
    Ok(schedule)
}

pub(crate) fn monthly_rate(annual_rate: f64) -> Result<Decimal, EngineError> {
    check_rate(annual_rate)?;
    Ok(money::amount("annual_rate", annual_rate)? / PERCENT_PER_MONTH_DIVISOR)
}

fn installment(principal: Decimal, months: u64, rate: Decimal) -> Result<Decimal, EngineError> {
    if rate.is_zero() {
        return Ok(round_currency(principal / Decimal::from(months)));
    }

    let factor = growth_factor(rate, months)?;
    let ratio = factor
        .checked_div(factor - Decimal::ONE)
        .ok_or(overflow("emi"))?;
    let emi = principal
        .checked_mul(rate)
        .and_then(|value| value.checked_mul(ratio))
        .ok_or(overflow("emi"))?;

    Ok(round_currency(emi))
}

fn growth_factor(rate: Decimal, months: u64) -> Result<Decimal, EngineError> {
    (Decimal::ONE + rate)
        .checked_powu(months)
        .ok_or(overflow("compound growth"))
}

fn overflow(operation: &'static str) -> EngineError {
    EngineError::NumericOverflow { operation }
}
