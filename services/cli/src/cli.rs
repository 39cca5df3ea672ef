use crate::report::{run_checklist, run_summary};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use loan_checklist::config::{AppConfig, OutputFormat};
use loan_checklist::error::AppError;
use loan_checklist::telemetry;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "loan-checklist",
    about = "Build underwriting document checklists from MISMO 3.4 loan files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the full document checklist for a loan file
    Checklist(ChecklistArgs),
    /// Print the loan summary and complexity tier only
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ChecklistArgs {
    /// MISMO 3.4 XML loan file
    #[arg(long)]
    pub(crate) xml: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to CHECKLIST_REFERENCE_DATE, then today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Output format: text or json. Defaults to CHECKLIST_FORMAT.
    #[arg(long, value_parser = crate::infra::parse_format)]
    pub(crate) format: Option<OutputFormat>,
}

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    /// MISMO 3.4 XML loan file
    #[arg(long)]
    pub(crate) xml: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to CHECKLIST_REFERENCE_DATE, then today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Checklist(args) => run_checklist(args, &config),
        Command::Summary(args) => run_summary(args, &config),
    }
}
