use crate::demo::{
    run_assess, run_demo, run_emi, run_score, AssessArgs, DemoArgs, EmiArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use riskoff::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "riskoff",
    about = "Quote installments, assess loan risk, and score customers from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Quote the monthly installment, optionally with a full amortization schedule
    Emi(EmiArgs),
    /// Assess a loan request with the DTI or tiered policy
    Assess(AssessArgs),
    /// Compute the 0-900 customer score for a financial profile
    Score(ScoreArgs),
    /// Run every engine against a set of canned applicants
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Emi(args) => run_emi(args),
        Command::Assess(args) => run_assess(args),
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}
