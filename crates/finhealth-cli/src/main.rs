mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::insurance::{HealthInsuranceArgs, TermInsuranceArgs};
use commands::planning::{EducationArgs, GoalArgs, RetirementArgs, SipArgs};
use commands::scoring::{ScenarioArgs, ScoreArgs};
use commands::tax::{IncomeSplitArgs, TaxCompareArgs};
use finhealth_core::config::EngineConfig;

/// Personal-finance planning and financial health scoring
#[derive(Parser)]
#[command(
    name = "fhe",
    version,
    about = "Personal-finance planning and financial health scoring",
    long_about = "A CLI for deterministic personal-finance calculations with decimal \
                  precision. Supports SIP and goal planning, retirement and education \
                  corpus sizing, term and health cover, old vs new regime income tax, \
                  HUF income splitting, financial health scoring and what-if scenarios."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON/YAML engine configuration (tax tables, cover bands, scoring weights)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a monthly SIP, optionally stepped up each year
    Sip(SipArgs),
    /// Monthly SIP needed for a house, car or other goal
    Goal(GoalArgs),
    /// Retirement corpus, gap and depletion check
    Retirement(RetirementArgs),
    /// Education corpus and the cost of delaying it
    Education(EducationArgs),
    /// Term life cover by HLV, income and expense methods
    TermInsurance(TermInsuranceArgs),
    /// Family health cover recommendation
    HealthInsurance(HealthInsuranceArgs),
    /// Compare old and new income-tax regimes
    TaxCompare(TaxCompareArgs),
    /// Tax saved by routing income through a HUF
    IncomeSplit(IncomeSplitArgs),
    /// Score a complete financial plan
    Score(ScoreArgs),
    /// Rescore a plan under what-if changes
    Scenario(ScenarioArgs),
    /// Print the built-in engine configuration
    DefaultConfig,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn run(command: Commands, config: &EngineConfig) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    match command {
        Commands::Sip(args) => commands::planning::run_sip(args),
        Commands::Goal(args) => commands::planning::run_goal(args),
        Commands::Retirement(args) => commands::planning::run_retirement(args),
        Commands::Education(args) => commands::planning::run_education(args, config),
        Commands::TermInsurance(args) => commands::insurance::run_term_insurance(args, config),
        Commands::HealthInsurance(args) => commands::insurance::run_health_insurance(args, config),
        Commands::TaxCompare(args) => commands::tax::run_tax_compare(args, config),
        Commands::IncomeSplit(args) => commands::tax::run_income_split(args, config),
        Commands::Score(args) => commands::scoring::run_score(args, config),
        Commands::Scenario(args) => commands::scoring::run_scenario(args, config),
        Commands::DefaultConfig => Ok(serde_json::to_value(config)?),
        Commands::Version => Ok(serde_json::json!({
            "name": "fhe",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = input::config::load_config(cli.config.as_deref())
        .and_then(|config| run(cli.command, &config))
        .and_then(|value| output::format_output(&cli.output, &value));

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }
}
