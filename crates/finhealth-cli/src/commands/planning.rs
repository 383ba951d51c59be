use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finhealth_core::config::EngineConfig;
use finhealth_core::planning::education::{self, EducationInput};
use finhealth_core::planning::goals::{self, GoalInput, SipInput};
use finhealth_core::planning::retirement::{self, RetirementInput};

use crate::commands::read_input;

/// Arguments for a SIP projection
#[derive(Args)]
pub struct SipArgs {
    /// Monthly instalment
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    /// Expected annual return, percent (e.g. 12 for 12%)
    #[arg(long, default_value = "12")]
    pub annual_return: Decimal,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Yearly increase of the instalment, percent
    #[arg(long, default_value = "0")]
    pub step_up_rate: Decimal,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a single savings goal (house, car, wedding)
#[derive(Args)]
pub struct GoalArgs {
    /// Amount needed at the end of the horizon
    #[arg(long)]
    pub target_amount: Option<Decimal>,

    /// Years until the money is needed
    #[arg(long)]
    pub years: Option<u32>,

    /// Savings already set aside
    #[arg(long, default_value = "0")]
    pub current_savings: Decimal,

    /// Expected annual return, percent
    #[arg(long, default_value = "10")]
    pub annual_return: Decimal,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for retirement corpus planning
#[derive(Args)]
pub struct RetirementArgs {
    #[arg(long)]
    pub current_age: Option<u32>,

    #[arg(long, default_value = "60")]
    pub retirement_age: u32,

    #[arg(long, default_value = "85")]
    pub life_expectancy: u32,

    /// Household expenses today, per month
    #[arg(long)]
    pub monthly_expenses: Option<Decimal>,

    /// Savings already earmarked for retirement
    #[arg(long, default_value = "0")]
    pub current_savings: Decimal,

    /// Current monthly retirement SIP
    #[arg(long, default_value = "0")]
    pub monthly_sip: Decimal,

    /// Yearly SIP step-up, percent
    #[arg(long, default_value = "0")]
    pub step_up_rate: Decimal,

    /// Expected pension in today's money, per month
    #[arg(long, default_value = "0")]
    pub monthly_pension: Decimal,

    /// Inflation, percent
    #[arg(long, default_value = "6")]
    pub inflation: Decimal,

    /// Return before retirement, percent
    #[arg(long, default_value = "12")]
    pub pre_retirement_return: Decimal,

    /// Return after retirement, percent
    #[arg(long, default_value = "7")]
    pub post_retirement_return: Decimal,

    /// Print the year-by-year corpus path instead of the summary
    #[arg(long)]
    pub breakdown: bool,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a child's education corpus
#[derive(Args)]
pub struct EducationArgs {
    #[arg(long)]
    pub child_age: Option<u32>,

    /// Child's age when the money is needed
    #[arg(long, default_value = "18")]
    pub goal_age: u32,

    /// Course name from the reference cost table (e.g. engineering, mba)
    #[arg(long)]
    pub course: Option<String>,

    /// Present-day course cost (overrides --course)
    #[arg(long)]
    pub current_cost: Option<Decimal>,

    #[arg(long, default_value = "0")]
    pub current_savings: Decimal,

    /// Education inflation, percent
    #[arg(long, default_value = "10")]
    pub education_inflation: Decimal,

    /// Expected annual return, percent
    #[arg(long, default_value = "12")]
    pub expected_return: Decimal,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipInput = match read_input(&args.input)? {
        Some(parsed) => parsed,
        None => SipInput {
            monthly_investment: args
                .monthly_investment
                .ok_or("--monthly-investment is required (or provide --input)")?,
            annual_return: args.annual_return,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            step_up_rate: args.step_up_rate,
        },
    };
    let result = goals::sip_projection(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_goal(args: GoalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let goal_input: GoalInput = match read_input(&args.input)? {
        Some(parsed) => parsed,
        None => GoalInput {
            current_savings: args.current_savings,
            target_amount: args
                .target_amount
                .ok_or("--target-amount is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            annual_return: args.annual_return,
        },
    };
    let result = goals::generic_goal(&goal_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_retirement(args: RetirementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let retirement_input: RetirementInput = match read_input(&args.input)? {
        Some(parsed) => parsed,
        None => RetirementInput {
            current_age: args
                .current_age
                .ok_or("--current-age is required (or provide --input)")?,
            retirement_age: args.retirement_age,
            life_expectancy: args.life_expectancy,
            current_monthly_expenses: args
                .monthly_expenses
                .ok_or("--monthly-expenses is required (or provide --input)")?,
            current_savings: args.current_savings,
            monthly_sip: args.monthly_sip,
            step_up_rate: args.step_up_rate,
            monthly_pension: args.monthly_pension,
            inflation_rate: args.inflation,
            pre_retirement_return: args.pre_retirement_return,
            post_retirement_return: args.post_retirement_return,
        },
    };
    let result = retirement::retirement_corpus(&retirement_input)?;

    if args.breakdown {
        return Ok(serde_json::to_value(&result.result.yearly_breakdown)?);
    }
    Ok(serde_json::to_value(result)?)
}

pub fn run_education(
    args: EducationArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let education_input: EducationInput = match read_input(&args.input)? {
        Some(parsed) => parsed,
        None => {
            if args.current_cost.is_none() && args.course.is_none() {
                return Err("--current-cost or --course is required (or provide --input)".into());
            }
            EducationInput {
                child_age: args
                    .child_age
                    .ok_or("--child-age is required (or provide --input)")?,
                goal_age: args.goal_age,
                course: args.course,
                current_cost: args.current_cost,
                current_savings: args.current_savings,
                education_inflation: args.education_inflation,
                expected_return: args.expected_return,
            }
        }
    };
    let result = education::education_corpus(&education_input, &config.education)?;
    Ok(serde_json::to_value(result)?)
}
