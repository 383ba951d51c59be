use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finhealth_core::config::EngineConfig;
use finhealth_core::insurance::health::{self, HealthInsuranceInput};
use finhealth_core::insurance::term::{self, TermInsuranceInput};
use finhealth_core::CityTier;

use crate::commands::read_input;

/// Arguments for term life cover sizing
#[derive(Args)]
pub struct TermInsuranceArgs {
    #[arg(long)]
    pub age: Option<u32>,

    #[arg(long, default_value = "60")]
    pub retirement_age: u32,

    /// Annual income
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Annual household expenses
    #[arg(long)]
    pub annual_expenses: Option<Decimal>,

    /// Income growth, percent a year
    #[arg(long, default_value = "5")]
    pub income_growth_rate: Decimal,

    /// Expense growth, percent a year
    #[arg(long, default_value = "0")]
    pub expense_growth_rate: Decimal,

    /// Discount rate, percent
    #[arg(long, default_value = "8")]
    pub discount_rate: Decimal,

    #[arg(long, default_value = "0")]
    pub outstanding_loans: Decimal,

    /// Lump sums dependents will still need
    #[arg(long, default_value = "0")]
    pub future_goals: Decimal,

    #[arg(long, default_value = "0")]
    pub existing_cover: Decimal,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for family health cover sizing
#[derive(Args)]
pub struct HealthInsuranceArgs {
    /// Age of the eldest insured member
    #[arg(long)]
    pub age: Option<u32>,

    /// City tier: 1 (metro), 2 or 3
    #[arg(long, default_value = "2", value_parser = parse_city_tier)]
    pub city_tier: CityTier,

    /// Insured members, including the policyholder
    #[arg(long, default_value = "1")]
    pub family_size: u32,

    /// Any insured member has a pre-existing condition
    #[arg(long)]
    pub pre_existing_conditions: bool,

    /// Personal health cover held today
    #[arg(long, default_value = "0")]
    pub personal_cover: Decimal,

    /// Employer-provided health cover
    #[arg(long, default_value = "0")]
    pub corporate_cover: Decimal,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn parse_city_tier(s: &str) -> Result<CityTier, String> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "tier1" | "metro" => Ok(CityTier::Tier1),
        "2" | "tier2" => Ok(CityTier::Tier2),
        "3" | "tier3" => Ok(CityTier::Tier3),
        other => Err(format!("unknown city tier '{other}' (expected 1, 2 or 3)")),
    }
}

pub fn run_term_insurance(
    args: TermInsuranceArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let term_input: TermInsuranceInput = match read_input(&args.input)? {
        Some(parsed) => parsed,
        None => TermInsuranceInput {
            age: args.age.ok_or("--age is required (or provide --input)")?,
            retirement_age: args.retirement_age,
            annual_income: args
                .annual_income
                .ok_or("--annual-income is required (or provide --input)")?,
            annual_expenses: args
                .annual_expenses
                .ok_or("--annual-expenses is required (or provide --input)")?,
            income_growth_rate: args.income_growth_rate,
            expense_growth_rate: args.expense_growth_rate,
            discount_rate: args.discount_rate,
            outstanding_loans: args.outstanding_loans,
            future_goals: args.future_goals,
            existing_cover: args.existing_cover,
        },
    };
    let result = term::term_insurance_need(&term_input, &config.insurance.term)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_health_insurance(
    args: HealthInsuranceArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let health_input: HealthInsuranceInput = match read_input(&args.input)? {
        Some(parsed) => parsed,
        None => HealthInsuranceInput {
            age: args.age.ok_or("--age is required (or provide --input)")?,
            city_tier: args.city_tier,
            family_size: args.family_size,
            pre_existing_conditions: args.pre_existing_conditions,
            personal_cover: args.personal_cover,
            corporate_cover: args.corporate_cover,
        },
    };
    let result = health::health_insurance_need(&health_input, &config.insurance.health)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_city_tier_aliases() {
        assert_eq!(parse_city_tier("1"), Ok(CityTier::Tier1));
        assert_eq!(parse_city_tier("Metro"), Ok(CityTier::Tier1));
        assert_eq!(parse_city_tier("tier3"), Ok(CityTier::Tier3));
        assert!(parse_city_tier("4").is_err());
    }

    #[derive(clap::Parser)]
    struct TermCli {
        #[command(flatten)]
        args: TermInsuranceArgs,
    }

    #[test]
    fn test_term_expense_growth_defaults_to_flat() {
        use clap::Parser;
        let cli = TermCli::try_parse_from(["term", "--age", "35"]).unwrap();
        assert_eq!(cli.args.expense_growth_rate, Decimal::ZERO);
        assert_eq!(cli.args.income_growth_rate, Decimal::from(5));
        assert_eq!(cli.args.retirement_age, 60);
    }
}
