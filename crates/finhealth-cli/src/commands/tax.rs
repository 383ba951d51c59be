use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finhealth_core::config::EngineConfig;
use finhealth_core::tax::huf::{self, IncomeSplitInput};
use finhealth_core::tax::regime::{self, Deductions, RegimeComparisonInput, Taxpayer};

use crate::commands::read_input;

/// Deduction flags shared by the tax commands
#[derive(Args)]
pub struct DeductionArgs {
    #[arg(long, default_value = "0")]
    pub section_80c: Decimal,

    #[arg(long, default_value = "0")]
    pub section_80d: Decimal,

    /// Own NPS contribution
    #[arg(long, default_value = "0")]
    pub section_80ccd_1b: Decimal,

    /// Employer NPS contribution
    #[arg(long, default_value = "0")]
    pub section_80ccd_2: Decimal,

    #[arg(long, default_value = "0")]
    pub home_loan_interest: Decimal,

    #[arg(long, default_value = "0")]
    pub hra_exemption: Decimal,

    #[arg(long, default_value = "0")]
    pub other_deductions: Decimal,
}

impl DeductionArgs {
    fn to_deductions(&self) -> Deductions {
        Deductions {
            section_80c: self.section_80c,
            section_80d: self.section_80d,
            section_80ccd_1b: self.section_80ccd_1b,
            section_80ccd_2: self.section_80ccd_2,
            home_loan_interest: self.home_loan_interest,
            hra_exemption: self.hra_exemption,
            other: self.other_deductions,
        }
    }
}

/// Arguments for an old vs new regime comparison
#[derive(Args)]
pub struct TaxCompareArgs {
    /// Gross annual income
    #[arg(long)]
    pub gross_income: Option<Decimal>,

    /// File as a Hindu Undivided Family
    #[arg(long)]
    pub huf: bool,

    #[command(flatten)]
    pub deductions: DeductionArgs,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the individual + HUF income split
#[derive(Args)]
pub struct IncomeSplitArgs {
    #[arg(long)]
    pub individual_income: Option<Decimal>,

    #[arg(long)]
    pub huf_income: Option<Decimal>,

    /// Deductions claimed by the individual
    #[command(flatten)]
    pub deductions: DeductionArgs,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_tax_compare(
    args: TaxCompareArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let compare_input: RegimeComparisonInput = match read_input(&args.input)? {
        Some(parsed) => parsed,
        None => RegimeComparisonInput {
            gross_income: args
                .gross_income
                .ok_or("--gross-income is required (or provide --input)")?,
            deductions: args.deductions.to_deductions(),
            taxpayer: if args.huf {
                Taxpayer::Huf
            } else {
                Taxpayer::Individual
            },
        },
    };
    let result = regime::compare_regimes(&compare_input, &config.tax)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_income_split(
    args: IncomeSplitArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let split_input: IncomeSplitInput = match read_input(&args.input)? {
        Some(parsed) => parsed,
        None => IncomeSplitInput {
            individual_income: args
                .individual_income
                .ok_or("--individual-income is required (or provide --input)")?,
            huf_income: args
                .huf_income
                .ok_or("--huf-income is required (or provide --input)")?,
            individual_deductions: args.deductions.to_deductions(),
            huf_deductions: Deductions::default(),
        },
    };
    let result = huf::income_split_benefit(&split_input, &config.tax)?;
    Ok(serde_json::to_value(result)?)
}
