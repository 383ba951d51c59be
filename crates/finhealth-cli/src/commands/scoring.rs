use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use finhealth_core::config::EngineConfig;
use finhealth_core::scenarios::{self, NamedScenario, ScenarioDeltas};
use finhealth_core::scoring::{self, FinancialPlan};

use crate::commands::read_input;
use crate::input;

/// Arguments for a full financial health score
#[derive(Args)]
pub struct ScoreArgs {
    /// Path to JSON/YAML financial plan (or pipe via stdin)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a what-if scenario against a plan
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScenarioArgs {
    /// Path to JSON/YAML financial plan (or pipe via stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON/YAML list of named scenarios, or a single set of deltas
    #[arg(long)]
    pub scenarios: Option<String>,

    /// Percent change in all income
    #[arg(long)]
    pub income_change: Option<Decimal>,

    /// Percent change in household, rent and other spending
    #[arg(long)]
    pub expense_change: Option<Decimal>,

    /// Extra monthly retirement contribution
    #[arg(long)]
    pub extra_contribution: Option<Decimal>,

    /// Years to add to (or subtract from) the retirement age
    #[arg(long)]
    pub retirement_age_shift: Option<i32>,

    /// Replacement inflation assumption, percent
    #[arg(long)]
    pub inflation: Option<Decimal>,

    /// Replacement return on goal savings, percent
    #[arg(long)]
    pub expected_return: Option<Decimal>,

    /// Replacement pre-retirement return, percent
    #[arg(long)]
    pub pre_retirement_return: Option<Decimal>,

    /// Replacement post-retirement return, percent
    #[arg(long)]
    pub post_retirement_return: Option<Decimal>,
}

/// A scenarios file holds either several named delta sets or one unnamed set.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScenarioFile {
    Named(Vec<NamedScenario>),
    Single(ScenarioDeltas),
}

impl ScenarioArgs {
    fn flag_deltas(&self) -> ScenarioDeltas {
        ScenarioDeltas {
            income_change_pct: self.income_change,
            expense_change_pct: self.expense_change,
            extra_monthly_contribution: self.extra_contribution,
            retirement_age_shift: self.retirement_age_shift,
            inflation_rate: self.inflation,
            expected_return: self.expected_return,
            pre_retirement_return: self.pre_retirement_return,
            post_retirement_return: self.post_retirement_return,
        }
    }
}

fn read_plan(path: &Option<String>) -> Result<FinancialPlan, Box<dyn std::error::Error>> {
    read_input(path)?.ok_or_else(|| "Provide --input plan file or pipe a plan via stdin".into())
}

pub fn run_score(args: ScoreArgs, config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = read_plan(&args.input)?;
    let result = scoring::score(&plan, config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_scenario(
    args: ScenarioArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = read_plan(&args.input)?;

    let file = match args.scenarios {
        Some(ref path) => Some(input::file::read_document::<ScenarioFile>(path)?),
        None => None,
    };

    match file {
        Some(ScenarioFile::Named(named)) => {
            let result = scenarios::compare_scenarios(&plan, &named, config)?;
            Ok(serde_json::to_value(result)?)
        }
        Some(ScenarioFile::Single(deltas)) => {
            let result = scenarios::diff_scenario(&plan, &deltas, config)?;
            Ok(serde_json::to_value(result)?)
        }
        None => {
            let deltas = args.flag_deltas();
            if deltas == ScenarioDeltas::default() {
                return Err("Provide at least one change flag or --scenarios file".into());
            }
            let result = scenarios::diff_scenario(&plan, &deltas, config)?;
            Ok(serde_json::to_value(result)?)
        }
    }
}
