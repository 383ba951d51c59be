use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{DeductionCaps, RegimeConfig, TaxConfig};
use crate::tax::slabs::{total_tax_payable, TaxComputation};
use crate::time_value::require_non_negative;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinHealthResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxRegime {
    Old,
    New,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Taxpayer {
    #[default]
    Individual,
    /// Hindu Undivided Family: no standard deduction, no 87A rebate.
    Huf,
}

/// Outcome of a regime comparison. Equal liabilities report `Same`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegimeChoice {
    Old,
    New,
    Same,
}

/// Claimed deductions and exemptions, before regime caps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deductions {
    #[serde(default)]
    pub section_80c: Money,
    #[serde(default)]
    pub section_80d: Money,
    #[serde(default)]
    pub section_80ccd_1b: Money,
    /// Employer NPS contribution.
    #[serde(default)]
    pub section_80ccd_2: Money,
    #[serde(default)]
    pub home_loan_interest: Money,
    #[serde(default)]
    pub hra_exemption: Money,
    #[serde(default)]
    pub other: Money,
}

impl Deductions {
    fn pairs(&self, caps: &DeductionCaps) -> [(&'static str, Money, Option<Money>); 7] {
        [
            ("section_80c", self.section_80c, caps.section_80c),
            ("section_80d", self.section_80d, caps.section_80d),
            ("section_80ccd_1b", self.section_80ccd_1b, caps.section_80ccd_1b),
            ("section_80ccd_2", self.section_80ccd_2, caps.section_80ccd_2),
            ("home_loan_interest", self.home_loan_interest, caps.home_loan_interest),
            ("hra_exemption", self.hra_exemption, caps.hra_exemption),
            ("other", self.other, caps.other),
        ]
    }

    pub fn validate(&self) -> FinHealthResult<()> {
        for (field, claimed, _) in self.pairs(&DeductionCaps::uncapped()) {
            require_non_negative(field, claimed)?;
        }
        Ok(())
    }

    /// Total allowed after applying each section's cap.
    pub fn allowed(&self, caps: &DeductionCaps) -> Money {
        self.pairs(caps)
            .iter()
            .map(|(_, claimed, cap)| match cap {
                Some(cap) => (*claimed).min(*cap),
                None => *claimed,
            })
            .sum()
    }

    /// Copy with every capped section raised to its cap. Uncapped sections
    /// keep their claimed amount.
    pub fn maximised(&self, caps: &DeductionCaps) -> Deductions {
        let lift = |claimed: Money, cap: Option<Money>| match cap {
            Some(cap) => claimed.max(cap),
            None => claimed,
        };
        Deductions {
            section_80c: lift(self.section_80c, caps.section_80c),
            section_80d: lift(self.section_80d, caps.section_80d),
            section_80ccd_1b: lift(self.section_80ccd_1b, caps.section_80ccd_1b),
            section_80ccd_2: self.section_80ccd_2,
            home_loan_interest: self.home_loan_interest,
            hra_exemption: self.hra_exemption,
            other: self.other,
        }
    }

    /// (used, available) across the capped investment sections
    /// (80C, 80D, 80CCD(1B)).
    pub fn utilisation(&self, caps: &DeductionCaps) -> (Money, Money) {
        [
            (self.section_80c, caps.section_80c),
            (self.section_80d, caps.section_80d),
            (self.section_80ccd_1b, caps.section_80ccd_1b),
        ]
        .iter()
        .filter_map(|(claimed, cap)| cap.map(|cap| ((*claimed).min(cap), cap)))
        .fold((Decimal::ZERO, Decimal::ZERO), |(used, avail), (u, a)| {
            (used + u, avail + a)
        })
    }
}

/// Tax for one filer under one regime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeTax {
    pub regime: TaxRegime,
    pub taxpayer: Taxpayer,
    pub gross_income: Money,
    pub standard_deduction: Money,
    pub deductions_allowed: Money,
    pub computation: TaxComputation,
}

impl RegimeTax {
    pub fn total_tax(&self) -> Money {
        self.computation.total_tax
    }
}

/// Input for comparing the two regimes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeComparisonInput {
    pub gross_income: Money,
    #[serde(default)]
    pub deductions: Deductions,
    #[serde(default)]
    pub taxpayer: Taxpayer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub old_regime: RegimeTax,
    pub new_regime: RegimeTax,
    pub recommended: RegimeChoice,
    /// |old - new|
    pub savings: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

impl TaxConfig {
    pub fn regime(&self, regime: TaxRegime) -> &RegimeConfig {
        match regime {
            TaxRegime::Old => &self.old_regime,
            TaxRegime::New => &self.new_regime,
        }
    }
}

/// Tax for one filer under the given regime.
pub fn regime_tax(
    gross_income: Money,
    deductions: &Deductions,
    regime: TaxRegime,
    taxpayer: Taxpayer,
    config: &TaxConfig,
) -> FinHealthResult<RegimeTax> {
    require_non_negative("gross_income", gross_income)?;
    deductions.validate()?;
    let rc = config.regime(regime);

    let standard_deduction = match taxpayer {
        Taxpayer::Individual => rc.standard_deduction.min(gross_income),
        Taxpayer::Huf => Decimal::ZERO,
    };
    let deductions_allowed = deductions.allowed(&rc.deduction_caps);
    let taxable = (gross_income - standard_deduction - deductions_allowed).max(Decimal::ZERO);

    let rebate = match taxpayer {
        Taxpayer::Individual => rc.rebate.as_ref(),
        Taxpayer::Huf => None,
    };
    let computation = total_tax_payable(taxable, &rc.slabs, rebate, config.cess_rate)?;

    Ok(RegimeTax {
        regime,
        taxpayer,
        gross_income,
        standard_deduction,
        deductions_allowed,
        computation,
    })
}

/// The cheaper regime for one filer. Ties go to the new (default) regime.
pub fn best_regime_tax(
    gross_income: Money,
    deductions: &Deductions,
    taxpayer: Taxpayer,
    config: &TaxConfig,
) -> FinHealthResult<RegimeTax> {
    let old = regime_tax(gross_income, deductions, TaxRegime::Old, taxpayer, config)?;
    let new = regime_tax(gross_income, deductions, TaxRegime::New, taxpayer, config)?;
    Ok(if old.total_tax() < new.total_tax() { old } else { new })
}

/// Compute both regimes independently and recommend the cheaper one.
pub fn compare_regimes(
    input: &RegimeComparisonInput,
    config: &TaxConfig,
) -> FinHealthResult<ComputationOutput<RegimeComparison>> {
    let mut warnings: Vec<String> = Vec::new();
    config.validate()?;

    let old = regime_tax(
        input.gross_income,
        &input.deductions,
        TaxRegime::Old,
        input.taxpayer,
        config,
    )?;
    let new = regime_tax(
        input.gross_income,
        &input.deductions,
        TaxRegime::New,
        input.taxpayer,
        config,
    )?;

    let (old_tax, new_tax) = (old.total_tax(), new.total_tax());
    let recommended = if old_tax < new_tax {
        RegimeChoice::Old
    } else if new_tax < old_tax {
        RegimeChoice::New
    } else {
        RegimeChoice::Same
    };
    let savings = (old_tax - new_tax).abs();
    debug!("regime comparison: old={old_tax} new={new_tax} -> {recommended:?}");

    let claimed = input.deductions.allowed(&DeductionCaps::uncapped());
    if new.deductions_allowed < claimed {
        warnings.push(format!(
            "{} of claimed deductions are not available under the new regime",
            claimed - new.deductions_allowed
        ));
    }

    let output = RegimeComparison {
        old_regime: old,
        new_regime: new,
        recommended,
        savings,
    };

    Ok(with_metadata(
        "Old vs New Regime Comparison (slab tax, 87A rebate, cess)",
        &serde_json::json!({
            "fiscal_year": config.fiscal_year,
            "cess_rate": config.cess_rate.to_string(),
            "taxpayer": format!("{:?}", input.taxpayer),
        }),
        warnings,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(gross: Money, deductions: Deductions) -> RegimeComparisonInput {
        RegimeComparisonInput {
            gross_income: gross,
            deductions,
            taxpayer: Taxpayer::Individual,
        }
    }

    #[test]
    fn test_twelve_lakh_salary_pays_nil_under_new_regime() {
        let config = TaxConfig::fy2025_26();
        let result = regime_tax(
            dec!(1_200_000),
            &Deductions::default(),
            TaxRegime::New,
            Taxpayer::Individual,
            &config,
        )
        .unwrap();
        assert_eq!(result.standard_deduction, dec!(75_000));
        assert_eq!(result.computation.taxable_income, dec!(1_125_000));
        assert_eq!(result.total_tax(), Decimal::ZERO);
        assert!(result.computation.is_nil());
    }

    #[test]
    fn test_new_regime_recommended_for_ten_lakh() {
        let config = TaxConfig::fy2025_26();
        let deductions = Deductions {
            section_80c: dec!(150_000),
            ..Default::default()
        };
        let result = compare_regimes(&input(dec!(1_000_000), deductions), &config).unwrap();
        let out = &result.result;

        // Old: taxable 800,000 -> 72,500 + 4% cess
        assert_eq!(out.old_regime.total_tax(), dec!(75_400));
        assert_eq!(out.new_regime.total_tax(), Decimal::ZERO);
        assert_eq!(out.recommended, RegimeChoice::New);
        assert_eq!(out.savings, dec!(75_400));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_old_regime_wins_with_heavy_deductions() {
        let config = TaxConfig::fy2025_26();
        let deductions = Deductions {
            section_80c: dec!(150_000),
            section_80d: dec!(75_000),
            section_80ccd_1b: dec!(50_000),
            home_loan_interest: dec!(200_000),
            hra_exemption: dec!(300_000),
            ..Default::default()
        };
        let result = compare_regimes(&input(dec!(2_000_000), deductions), &config).unwrap();
        assert_eq!(result.result.recommended, RegimeChoice::Old);
        assert!(result.result.savings > Decimal::ZERO);
    }

    #[test]
    fn test_identical_regimes_report_same() {
        let mut config = TaxConfig::fy2025_26();
        config.new_regime = config.old_regime.clone();
        let deductions = Deductions {
            section_80c: dec!(100_000),
            ..Default::default()
        };
        let result = compare_regimes(&input(dec!(1_750_000), deductions), &config).unwrap();
        assert_eq!(result.result.recommended, RegimeChoice::Same);
        assert_eq!(result.result.savings, Decimal::ZERO);
    }

    #[test]
    fn test_deduction_caps_applied() {
        let config = TaxConfig::fy2025_26();
        let deductions = Deductions {
            section_80c: dec!(400_000),
            ..Default::default()
        };
        assert_eq!(
            deductions.allowed(&config.old_regime.deduction_caps),
            dec!(150_000)
        );
        assert_eq!(
            deductions.allowed(&config.new_regime.deduction_caps),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_utilisation_counts_capped_sections_only() {
        let config = TaxConfig::fy2025_26();
        let deductions = Deductions {
            section_80c: dec!(100_000),
            home_loan_interest: dec!(150_000),
            ..Default::default()
        };
        let (used, available) = deductions.utilisation(&config.old_regime.deduction_caps);
        assert_eq!(used, dec!(100_000));
        assert_eq!(available, dec!(275_000));
    }

    #[test]
    fn test_maximised_fills_caps() {
        let config = TaxConfig::fy2025_26();
        let max = Deductions::default().maximised(&config.old_regime.deduction_caps);
        assert_eq!(max.section_80c, dec!(150_000));
        assert_eq!(max.section_80d, dec!(75_000));
        assert_eq!(max.section_80ccd_1b, dec!(50_000));
        assert_eq!(max.home_loan_interest, Decimal::ZERO);
    }

    #[test]
    fn test_huf_gets_no_standard_deduction_or_rebate() {
        let config = TaxConfig::fy2025_26();
        let result = regime_tax(
            dec!(600_000),
            &Deductions::default(),
            TaxRegime::New,
            Taxpayer::Huf,
            &config,
        )
        .unwrap();
        assert_eq!(result.standard_deduction, Decimal::ZERO);
        assert_eq!(result.computation.rebate, Decimal::ZERO);
        // 4-6L @5% = 10,000 + cess
        assert_eq!(result.total_tax(), dec!(10_400));
    }

    #[test]
    fn test_negative_deduction_rejected() {
        let config = TaxConfig::fy2025_26();
        let deductions = Deductions {
            section_80d: dec!(-1),
            ..Default::default()
        };
        assert!(compare_regimes(&input(dec!(500_000), deductions), &config).is_err());
    }

    #[test]
    fn test_standard_deduction_limited_to_income() {
        let config = TaxConfig::fy2025_26();
        let result = regime_tax(
            dec!(40_000),
            &Deductions::default(),
            TaxRegime::New,
            Taxpayer::Individual,
            &config,
        )
        .unwrap();
        assert_eq!(result.standard_deduction, dec!(40_000));
        assert_eq!(result.computation.taxable_income, Decimal::ZERO);
    }
}
