use chrono::NaiveDate;
use clap::Args;
use riskoff::config::{AppConfig, EngineConfig};
use riskoff::error::AppError;
use riskoff::lending::domain::DEFAULT_CUSTOMER_SCORE;
use riskoff::lending::{
    amortization_schedule, score_customer, AmortizationSchedule, ApplicantFinancialProfile,
    ApplicantSignals, CustomerScoreBreakdown, LoanRequest, PolicyProfile, RiskAssessment,
    RiskEngine,
};
use riskoff::money::format_rupees;

#[derive(Args, Debug)]
pub(crate) struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    pub(crate) principal: f64,
    /// Tenure in months
    #[arg(long)]
    pub(crate) tenure: i64,
    /// Annual interest rate in percent
    #[arg(long, default_value_t = 12.0)]
    pub(crate) rate: f64,
    /// Print the month-by-month schedule
    #[arg(long)]
    pub(crate) schedule: bool,
    /// First installment due date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) first_due: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Requested loan amount
    #[arg(long)]
    pub(crate) amount: f64,
    /// Tenure in months
    #[arg(long)]
    pub(crate) tenure: i64,
    /// Monthly income
    #[arg(long)]
    pub(crate) income: f64,
    /// Monthly expenses
    #[arg(long)]
    pub(crate) expenses: f64,
    /// Installments already being paid each month
    #[arg(long, default_value_t = 0.0)]
    pub(crate) existing_emi: f64,
    /// Policy to apply (dti_scoring or tiered_emi). Defaults to RISK_POLICY.
    #[arg(long, value_parser = crate::infra::parse_policy)]
    pub(crate) policy: Option<PolicyProfile>,
    /// Composite customer score used by the tiered policy
    #[arg(long, default_value_t = DEFAULT_CUSTOMER_SCORE)]
    pub(crate) customer_score: u16,
    /// Years with the current employer
    #[arg(long, default_value_t = 0.0)]
    pub(crate) employment_years: f64,
    /// Outstanding principal on existing loans
    #[arg(long, default_value_t = 0.0)]
    pub(crate) existing_loan: f64,
    /// Declared expenses disagree with the bank statement
    #[arg(long)]
    pub(crate) expense_mismatch: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    #[arg(long)]
    pub(crate) annual_income: f64,
    #[arg(long)]
    pub(crate) monthly_expenses: f64,
    /// Monthly expenses derived from a bank statement
    #[arg(long)]
    pub(crate) statement_expenses: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) existing_loan: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) employment_years: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) account_balance: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) mutual_funds: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) stocks: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) fixed_deposits: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) other_investments: f64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// First installment due date for the sample schedule (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) first_due: Option<NaiveDate>,
    /// Skip the amortization schedule portion of the demo.
    #[arg(long)]
    pub(crate) skip_schedule: bool,
}

pub(crate) fn run_emi(args: EmiArgs) -> Result<(), AppError> {
    let schedule = amortization_schedule(args.principal, args.tenure, args.rate, args.first_due)?;
    render_schedule(&schedule, args.schedule);
    Ok(())
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let engine = match args.policy {
        Some(_) => RiskEngine::default(),
        None => RiskEngine::new(AppConfig::load()?.engine),
    };

    let request = LoanRequest::new(args.amount, args.tenure, args.income, args.expenses)
        .with_existing_emi(args.existing_emi);
    let signals = ApplicantSignals {
        existing_loan_amount: args.existing_loan,
        employment_years: args.employment_years,
        customer_score: args.customer_score,
        has_expense_mismatch: args.expense_mismatch,
    };

    let assessment = engine.assess(args.policy, &request, &signals)?;
    render_assessment(&assessment);
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let profile = ApplicantFinancialProfile {
        annual_income: args.annual_income,
        monthly_expenses: args.monthly_expenses,
        statement_expenses: args.statement_expenses,
        existing_loan_amount: args.existing_loan,
        employment_years: args.employment_years,
        account_balance: args.account_balance,
        mutual_funds: args.mutual_funds,
        stocks: args.stocks,
        fixed_deposits: args.fixed_deposits,
        other_investments: args.other_investments,
    };

    let breakdown = score_customer(&profile)?;
    render_score(&breakdown);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("RISKOFF lending engine demo");

    if !args.skip_schedule {
        let schedule = amortization_schedule(100_000.0, 12, 12.0, args.first_due)?;
        println!("\nSample quote");
        render_schedule(&schedule, true);
    }

    let engine = RiskEngine::new(EngineConfig::default());
    for applicant in demo_applicants() {
        println!("\n== {} ==", applicant.label);

        let breakdown = score_customer(&applicant.profile)?;
        render_score(&breakdown);

        let signals = ApplicantSignals {
            existing_loan_amount: applicant.profile.existing_loan_amount,
            employment_years: applicant.profile.employment_years,
            customer_score: breakdown.score,
            has_expense_mismatch: breakdown.expense_mismatch,
        };

        for profile in [PolicyProfile::DtiScoring, PolicyProfile::TieredEmi] {
            println!();
            let assessment = engine.assess(Some(profile), &applicant.loan, &signals)?;
            render_assessment(&assessment);
        }
    }

    Ok(())
}

struct DemoApplicant {
    label: &'static str,
    profile: ApplicantFinancialProfile,
    loan: LoanRequest,
}

fn demo_applicants() -> Vec<DemoApplicant> {
    vec![
        DemoApplicant {
            label: "Salaried engineer, car loan",
            profile: ApplicantFinancialProfile {
                annual_income: 1_440_000.0,
                monthly_expenses: 35000.0,
                statement_expenses: Some(36200.0),
                existing_loan_amount: 0.0,
                employment_years: 7.0,
                account_balance: 420_000.0,
                mutual_funds: 600_000.0,
                stocks: 150_000.0,
                fixed_deposits: 300_000.0,
                other_investments: 0.0,
            },
            loan: LoanRequest::new(800_000.0, 60, 120_000.0, 35000.0),
        },
        DemoApplicant {
            label: "Shop owner, working capital with existing EMIs",
            profile: ApplicantFinancialProfile {
                annual_income: 540_000.0,
                monthly_expenses: 28000.0,
                statement_expenses: Some(31000.0),
                existing_loan_amount: 180_000.0,
                employment_years: 3.0,
                account_balance: 60000.0,
                mutual_funds: 0.0,
                stocks: 0.0,
                fixed_deposits: 50000.0,
                other_investments: 0.0,
            },
            loan: LoanRequest::new(300_000.0, 36, 45000.0, 28000.0).with_existing_emi(6500.0),
        },
        DemoApplicant {
            label: "New hire, understated expenses",
            profile: ApplicantFinancialProfile {
                annual_income: 360_000.0,
                monthly_expenses: 12000.0,
                statement_expenses: Some(22000.0),
                existing_loan_amount: 0.0,
                employment_years: 0.5,
                account_balance: 15000.0,
                mutual_funds: 0.0,
                stocks: 0.0,
                fixed_deposits: 0.0,
                other_investments: 0.0,
            },
            loan: LoanRequest::new(400_000.0, 24, 30000.0, 12000.0),
        },
    ]
}

fn render_schedule(schedule: &AmortizationSchedule, list_rows: bool) {
    println!(
        "Loan {} over {} months at {}%",
        format_rupees(schedule.loan_amount),
        schedule.tenure_months,
        schedule.annual_rate
    );
    println!("- EMI: {:.2}", schedule.emi);
    println!(
        "- Total payment: {:.2} | Total interest: {:.2}",
        schedule.total_payment, schedule.total_interest
    );

    if !list_rows {
        return;
    }

    println!("\nMonth | Due date   | Payment    | Principal  | Interest   | Balance");
    for row in &schedule.schedule {
        let due = row
            .due_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5} | {:<10} | {:>10.2} | {:>10.2} | {:>10.2} | {:>12.2}",
            row.month, due, row.emi, row.principal, row.interest, row.balance
        );
    }
}

fn render_assessment(assessment: &RiskAssessment) {
    println!(
        "Policy {}: {} ({:?}), score {}",
        assessment.policy.label(),
        assessment.category.label(),
        assessment.decision,
        assessment.score
    );
    println!("- EMI: {:.2}", assessment.emi);
    if let Some(max_loan) = assessment.max_recommended_loan {
        println!("- Max recommended loan: {}", format_rupees(max_loan));
    }
    for factor in &assessment.factors {
        println!("- {}", factor);
    }
    if let Some(recommendation) = &assessment.recommendation {
        println!("Recommendation: {}", recommendation);
    }
}

fn render_score(breakdown: &CustomerScoreBreakdown) {
    println!(
        "Customer score: {}/{} ({})",
        breakdown.score,
        breakdown.max_score,
        breakdown.grade.label()
    );
    for entry in &breakdown.breakdown {
        println!(
            "  - {}: {}/{}",
            entry.factor.label(),
            entry.score,
            entry.max
        );
    }
    if breakdown.expense_mismatch {
        println!(
            "  Expense mismatch: declared and statement expenses differ by {}%",
            breakdown.mismatch_percent
        );
    }
}
