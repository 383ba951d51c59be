use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;
use crate::tax::regime::{best_regime_tax, Deductions, TaxRegime, Taxpayer};
use crate::time_value::require_non_negative;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinHealthResult;

/// Income that could be routed through a Hindu Undivided Family instead of
/// the individual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeSplitInput {
    pub individual_income: Money,
    pub huf_income: Money,
    #[serde(default)]
    pub individual_deductions: Deductions,
    #[serde(default)]
    pub huf_deductions: Deductions,
}

/// Best-regime liability for one filer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilerOutcome {
    pub regime: TaxRegime,
    pub taxable_income: Money,
    pub total_tax: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSplitOutput {
    /// Individual filing the combined income.
    pub combined: FilerOutcome,
    pub individual: FilerOutcome,
    pub huf: FilerOutcome,
    pub separate_total_tax: Money,
    /// Combined minus separate liability, floored at zero.
    pub family_savings: Money,
}

/// Tax saved by splitting income between an individual and a HUF, each
/// filing under its own cheaper regime.
pub fn income_split_benefit(
    input: &IncomeSplitInput,
    config: &TaxConfig,
) -> FinHealthResult<ComputationOutput<IncomeSplitOutput>> {
    let mut warnings: Vec<String> = Vec::new();
    require_non_negative("individual_income", input.individual_income)?;
    require_non_negative("huf_income", input.huf_income)?;
    config.validate()?;

    let outcome = |income: Money, deductions: &Deductions, taxpayer: Taxpayer| {
        best_regime_tax(income, deductions, taxpayer, config).map(|t| FilerOutcome {
            regime: t.regime,
            taxable_income: t.computation.taxable_income,
            total_tax: t.total_tax(),
        })
    };

    let combined = outcome(
        input.individual_income + input.huf_income,
        &input.individual_deductions,
        Taxpayer::Individual,
    )?;
    let individual = outcome(
        input.individual_income,
        &input.individual_deductions,
        Taxpayer::Individual,
    )?;
    let huf = outcome(input.huf_income, &input.huf_deductions, Taxpayer::Huf)?;

    let separate_total_tax = individual.total_tax + huf.total_tax;
    let family_savings = (combined.total_tax - separate_total_tax).max(Decimal::ZERO);
    debug!(
        "income split: combined={} separate={separate_total_tax} saving={family_savings}",
        combined.total_tax
    );

    if input.huf_income.is_zero() {
        warnings.push("No HUF income supplied; splitting has no effect".into());
    } else if family_savings.is_zero() {
        warnings.push("Routing income through the HUF does not reduce total tax".into());
    }

    let output = IncomeSplitOutput {
        combined,
        individual,
        huf,
        separate_total_tax,
        family_savings,
    };

    Ok(with_metadata(
        "Individual + HUF income split (best regime per filer)",
        &serde_json::json!({
            "fiscal_year": config.fiscal_year,
            "huf_standard_deduction": "none",
            "huf_rebate_87a": "none",
        }),
        warnings,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn split(individual: Money, huf: Money) -> IncomeSplitInput {
        IncomeSplitInput {
            individual_income: individual,
            huf_income: huf,
            individual_deductions: Deductions::default(),
            huf_deductions: Deductions::default(),
        }
    }

    #[test]
    fn test_split_saves_tax_on_high_income() {
        let config = TaxConfig::fy2025_26();
        let result = income_split_benefit(&split(dec!(2_000_000), dec!(600_000)), &config).unwrap();
        let out = &result.result;

        // Combined 26L, new regime: taxable 25.25L -> 337,500 + cess
        assert_eq!(out.combined.total_tax, dec!(351_000));
        assert_eq!(out.combined.regime, TaxRegime::New);
        assert_eq!(out.individual.total_tax, dec!(192_400));
        // HUF, no standard deduction: 4-6L @5% + cess
        assert_eq!(out.huf.total_tax, dec!(10_400));
        assert_eq!(out.huf.regime, TaxRegime::New);
        assert_eq!(out.separate_total_tax, dec!(202_800));
        assert_eq!(out.family_savings, dec!(148_200));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_zero_huf_income_has_no_savings() {
        let config = TaxConfig::fy2025_26();
        let result = income_split_benefit(&split(dec!(1_500_000), Decimal::ZERO), &config).unwrap();
        assert_eq!(result.result.family_savings, Decimal::ZERO);
        assert_eq!(result.result.huf.total_tax, Decimal::ZERO);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_savings_never_negative() {
        let config = TaxConfig::fy2025_26();
        // Combined income sits inside the rebate zone; the HUF gets no rebate
        let result = income_split_benefit(&split(dec!(300_000), dec!(500_000)), &config).unwrap();
        assert_eq!(result.result.combined.total_tax, Decimal::ZERO);
        assert_eq!(result.result.huf.total_tax, dec!(5_200));
        assert_eq!(result.result.family_savings, Decimal::ZERO);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_negative_income_rejected() {
        let config = TaxConfig::fy2025_26();
        assert!(income_split_benefit(&split(dec!(-1), dec!(100)), &config).is_err());
    }
}
