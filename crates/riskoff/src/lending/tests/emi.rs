use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::lending::{
    amortization_schedule, compute_emi, max_affordable_principal, EngineError,
    MAX_TENURE_MONTHS,
};

#[test]
fn emi_matches_reference_installment() {
    let emi = compute_emi(100_000.0, 12, 12.0).expect("emi");
    assert_eq!(emi, dec!(8884.88));
    assert!(emi > dec!(8800) && emi < dec!(8900));
}

#[test]
fn emi_at_zero_rate_is_straight_division() {
    assert_eq!(compute_emi(12000.0, 12, 0.0).expect("emi"), dec!(1000.00));
}

#[test]
fn emi_is_deterministic() {
    let first = compute_emi(734_512.37, 83, 11.35).expect("emi");
    for _ in 0..16 {
        assert_eq!(compute_emi(734_512.37, 83, 11.35).expect("emi"), first);
    }
}

#[test]
fn degenerate_principal_or_tenure_yields_zero() {
    assert_eq!(compute_emi(0.0, 12, 12.0).expect("emi"), Decimal::ZERO);
    assert_eq!(compute_emi(-5000.0, 12, 12.0).expect("emi"), Decimal::ZERO);
    assert_eq!(compute_emi(100_000.0, 0, 12.0).expect("emi"), Decimal::ZERO);
    assert_eq!(compute_emi(100_000.0, -3, 12.0).expect("emi"), Decimal::ZERO);
}

#[test]
fn bounded_inputs_are_rejected() {
    assert_eq!(
        compute_emi(100_000.0, MAX_TENURE_MONTHS + 1, 12.0),
        Err(EngineError::TenureOutOfRange {
            months: 601,
            max: MAX_TENURE_MONTHS,
        })
    );
    assert!(matches!(
        compute_emi(100_000.0, 12, 120.0),
        Err(EngineError::RateOutOfRange { .. })
    ));
    assert!(matches!(
        compute_emi(100_000.0, 12, -1.0),
        Err(EngineError::RateOutOfRange { .. })
    ));
    assert!(matches!(
        compute_emi(f64::NAN, 12, 12.0),
        Err(EngineError::NonFinite { field: "principal" })
    ));
    assert!(matches!(
        compute_emi(1e13, 12, 12.0),
        Err(EngineError::AmountOutOfRange { .. })
    ));
}

#[test]
fn interest_only_installments_are_rejected() {
    for principal in [1_000_000.0, 1_000_000_000.0] {
        let error = compute_emi(principal, MAX_TENURE_MONTHS, 100.0).expect_err("non amortizing");
        assert!(matches!(error, EngineError::NonAmortizing { months: 600, .. }));

        let error = amortization_schedule(principal, MAX_TENURE_MONTHS, 100.0, None)
            .expect_err("non amortizing");
        assert!(matches!(error, EngineError::NonAmortizing { .. }));
    }
}

#[test]
fn installment_that_rounds_to_nothing_is_rejected() {
    assert!(matches!(
        compute_emi(1.0, MAX_TENURE_MONTHS, 0.0),
        Err(EngineError::NonAmortizing { .. })
    ));
}

#[test]
fn extreme_but_amortizing_loan_still_computes() {
    let schedule =
        amortization_schedule(1e12, MAX_TENURE_MONTHS, 24.0, None).expect("schedule");
    let first = &schedule.schedule[0];
    assert!(first.principal > Decimal::ZERO);
    assert_eq!(first.interest, dec!(20_000_000_000));
}

#[test]
fn schedule_principal_sums_to_loan_amount() {
    let schedule = amortization_schedule(100_000.0, 12, 12.0, None).expect("schedule");

    assert_eq!(schedule.schedule.len(), 12);
    assert_eq!(schedule.emi, dec!(8884.88));

    let principal: Decimal = schedule.schedule.iter().map(|row| row.principal).sum();
    assert_eq!(principal, dec!(100_000));

    let last = schedule.schedule.last().expect("final row");
    assert_eq!(last.balance, Decimal::ZERO);

    let paid: Decimal = schedule.schedule.iter().map(|row| row.emi).sum();
    assert_eq!(schedule.total_payment, paid);
    assert_eq!(schedule.total_interest, paid - dec!(100_000));
    assert!(schedule.total_interest > dec!(6600) && schedule.total_interest < dec!(6700));
}

#[test]
fn level_installments_repay_principal_without_final_adjustment() {
    let schedule = amortization_schedule(100_000.0, 12, 12.0, None).expect("schedule");

    // Every month at the quoted EMI, including the last, before any residual is absorbed.
    let repaid: Decimal = schedule
        .schedule
        .iter()
        .map(|row| schedule.emi - row.interest)
        .sum();
    assert!((repaid - schedule.loan_amount).abs() < dec!(1));

    let last = schedule.schedule.last().expect("final row");
    assert!((last.emi - schedule.emi).abs() < dec!(1));
}

#[test]
fn long_schedules_keep_the_final_payment_near_the_emi() {
    let schedule = amortization_schedule(5000.0, 360, 7.5, None).expect("schedule");

    let repaid: Decimal = schedule
        .schedule
        .iter()
        .map(|row| schedule.emi - row.interest)
        .sum();
    assert!((repaid - schedule.loan_amount).abs() <= schedule.emi);

    let last = schedule.schedule.last().expect("final row");
    assert!((last.emi - schedule.emi).abs() <= schedule.emi);
}

#[test]
fn schedule_first_row_splits_interest_and_principal() {
    let schedule = amortization_schedule(100_000.0, 12, 12.0, None).expect("schedule");
    let first = &schedule.schedule[0];

    assert_eq!(first.month, 1);
    assert_eq!(first.interest, dec!(1000.00));
    assert_eq!(first.principal, dec!(7884.88));
    assert_eq!(first.balance, dec!(92115.12));
}

#[test]
fn schedule_due_dates_follow_calendar_months() {
    let first_due = NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date");
    let schedule = amortization_schedule(60_000.0, 3, 10.0, Some(first_due)).expect("schedule");

    let dates: Vec<_> = schedule
        .schedule
        .iter()
        .map(|row| row.due_date.expect("due date"))
        .collect();
    assert_eq!(
        dates,
        vec![
            first_due,
            NaiveDate::from_ymd_opt(2025, 2, 28).expect("valid date"),
            NaiveDate::from_ymd_opt(2025, 3, 31).expect("valid date"),
        ]
    );
}

#[test]
fn empty_schedule_for_zero_principal() {
    let schedule = amortization_schedule(0.0, 24, 12.0, None).expect("schedule");
    assert!(schedule.schedule.is_empty());
    assert_eq!(schedule.total_payment, Decimal::ZERO);
    assert_eq!(schedule.total_interest, Decimal::ZERO);
}

#[test]
fn max_principal_inverts_the_installment() {
    let principal = max_affordable_principal(dec!(8884.88), 12, 12.0, Decimal::ZERO)
        .expect("max principal");
    assert!((principal - dec!(100_000)).abs() < dec!(1));
}

#[test]
fn max_principal_nets_existing_debt_and_floors_at_zero() {
    let gross = max_affordable_principal(dec!(1000), 12, 0.0, Decimal::ZERO).expect("gross");
    assert_eq!(gross, dec!(12000));

    let net = max_affordable_principal(dec!(1000), 12, 0.0, dec!(2000)).expect("net");
    assert_eq!(net, dec!(10000));

    let floored = max_affordable_principal(dec!(1000), 12, 0.0, dec!(50_000)).expect("floor");
    assert_eq!(floored, Decimal::ZERO);

    let negative_budget =
        max_affordable_principal(dec!(-500), 12, 12.0, Decimal::ZERO).expect("negative");
    assert_eq!(negative_budget, Decimal::ZERO);
}
