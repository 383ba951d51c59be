//! Versionable policy data consumed by the calculators.
//!
//! Every fiscal-year or benchmark dependent number lives here rather than in
//! calculation bodies. `Default` implementations carry the FY2025-26 (India)
//! values; callers swap in their own tables by deserialising JSON or YAML.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinHealthError;
use crate::types::Multiple;
#[cfg(any(feature = "tax", feature = "planning", feature = "insurance"))]
use crate::types::Money;
#[cfg(any(feature = "tax", feature = "insurance"))]
use crate::types::Rate;
#[cfg(feature = "tax")]
use crate::types::TaxSlab;
#[cfg(feature = "scoring")]
use crate::types::{AssetAllocation, Occupation, RiskProfile, Score};
use crate::FinHealthResult;

// ---------------------------------------------------------------------------
// Shared band lookup
// ---------------------------------------------------------------------------

/// A multiplier that applies from `from` (inclusive) until the next band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierBand {
    pub from: u32,
    pub multiplier: Multiple,
}

/// Pick the band with the greatest `from` not exceeding `key`.
pub fn band_multiplier(bands: &[MultiplierBand], key: u32) -> Option<Multiple> {
    bands
        .iter()
        .filter(|b| b.from <= key)
        .max_by_key(|b| b.from)
        .map(|b| b.multiplier)
}

fn require_bands(name: &str, bands: &[MultiplierBand]) -> FinHealthResult<()> {
    if bands.is_empty() {
        return Err(FinHealthError::ConfigurationDefect(format!(
            "{name} has no bands"
        )));
    }
    if !bands.iter().any(|b| b.from == 0) {
        return Err(FinHealthError::ConfigurationDefect(format!(
            "{name} does not start at 0"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

/// Section 87A style rebate for one regime.
#[cfg(feature = "tax")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebateRule {
    /// Taxable income at or below which the rebate applies.
    pub threshold: Money,
    /// Maximum rebate.
    pub cap: Money,
    /// Limit tax just above the threshold to the income in excess of it.
    #[serde(default)]
    pub marginal_relief: bool,
}

/// Per-section claim caps. `None` = claim allowed in full, `Some(0)` = not
/// allowed under this regime.
#[cfg(feature = "tax")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionCaps {
    pub section_80c: Option<Money>,
    pub section_80d: Option<Money>,
    pub section_80ccd_1b: Option<Money>,
    pub section_80ccd_2: Option<Money>,
    pub home_loan_interest: Option<Money>,
    pub hra_exemption: Option<Money>,
    pub other: Option<Money>,
}

#[cfg(feature = "tax")]
impl DeductionCaps {
    pub fn uncapped() -> Self {
        DeductionCaps {
            section_80c: None,
            section_80d: None,
            section_80ccd_1b: None,
            section_80ccd_2: None,
            home_loan_interest: None,
            hra_exemption: None,
            other: None,
        }
    }
}

#[cfg(feature = "tax")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeConfig {
    pub name: String,
    pub slabs: Vec<TaxSlab>,
    /// Available to individuals with salary/pension income; never to HUFs.
    pub standard_deduction: Money,
    pub rebate: Option<RebateRule>,
    pub deduction_caps: DeductionCaps,
}

#[cfg(feature = "tax")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub fiscal_year: String,
    /// Health and education cess, percent of tax after rebate.
    pub cess_rate: Rate,
    pub old_regime: RegimeConfig,
    pub new_regime: RegimeConfig,
}

#[cfg(feature = "tax")]
impl TaxConfig {
    pub fn fy2025_26() -> Self {
        let slab = |min: Decimal, max: Option<Decimal>, rate: Decimal| TaxSlab { min, max, rate };
        TaxConfig {
            fiscal_year: "FY2025-26".into(),
            cess_rate: dec!(4),
            old_regime: RegimeConfig {
                name: "old".into(),
                slabs: vec![
                    slab(dec!(0), Some(dec!(250_000)), dec!(0)),
                    slab(dec!(250_000), Some(dec!(500_000)), dec!(5)),
                    slab(dec!(500_000), Some(dec!(1_000_000)), dec!(20)),
                    slab(dec!(1_000_000), None, dec!(30)),
                ],
                standard_deduction: dec!(50_000),
                rebate: Some(RebateRule {
                    threshold: dec!(500_000),
                    cap: dec!(12_500),
                    marginal_relief: false,
                }),
                deduction_caps: DeductionCaps {
                    section_80c: Some(dec!(150_000)),
                    section_80d: Some(dec!(75_000)),
                    section_80ccd_1b: Some(dec!(50_000)),
                    section_80ccd_2: None,
                    home_loan_interest: Some(dec!(200_000)),
                    hra_exemption: None,
                    other: None,
                },
            },
            new_regime: RegimeConfig {
                name: "new".into(),
                slabs: vec![
                    slab(dec!(0), Some(dec!(400_000)), dec!(0)),
                    slab(dec!(400_000), Some(dec!(800_000)), dec!(5)),
                    slab(dec!(800_000), Some(dec!(1_200_000)), dec!(10)),
                    slab(dec!(1_200_000), Some(dec!(1_600_000)), dec!(15)),
                    slab(dec!(1_600_000), Some(dec!(2_000_000)), dec!(20)),
                    slab(dec!(2_000_000), Some(dec!(2_400_000)), dec!(25)),
                    slab(dec!(2_400_000), None, dec!(30)),
                ],
                standard_deduction: dec!(75_000),
                rebate: Some(RebateRule {
                    threshold: dec!(1_200_000),
                    cap: dec!(60_000),
                    marginal_relief: false,
                }),
                deduction_caps: DeductionCaps {
                    section_80c: Some(Decimal::ZERO),
                    section_80d: Some(Decimal::ZERO),
                    section_80ccd_1b: Some(Decimal::ZERO),
                    section_80ccd_2: None,
                    home_loan_interest: Some(Decimal::ZERO),
                    hra_exemption: Some(Decimal::ZERO),
                    other: Some(Decimal::ZERO),
                },
            },
        }
    }

    pub fn validate(&self) -> FinHealthResult<()> {
        if self.cess_rate < Decimal::ZERO {
            return Err(FinHealthError::ConfigurationDefect(
                "cess_rate must be >= 0".into(),
            ));
        }
        crate::tax::slabs::validate_slabs(&self.old_regime.slabs)?;
        crate::tax::slabs::validate_slabs(&self.new_regime.slabs)?;
        Ok(())
    }
}

#[cfg(feature = "tax")]
impl Default for TaxConfig {
    fn default() -> Self {
        Self::fy2025_26()
    }
}

// ---------------------------------------------------------------------------
// Insurance
// ---------------------------------------------------------------------------

#[cfg(feature = "insurance")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermCoverConfig {
    /// Income-replacement multiple by age band.
    pub income_multipliers: Vec<MultiplierBand>,
}

#[cfg(feature = "insurance")]
impl Default for TermCoverConfig {
    fn default() -> Self {
        TermCoverConfig {
            income_multipliers: vec![
                MultiplierBand { from: 0, multiplier: dec!(15) },
                MultiplierBand { from: 35, multiplier: dec!(12) },
                MultiplierBand { from: 45, multiplier: dec!(10) },
            ],
        }
    }
}

#[cfg(feature = "insurance")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityTierMultipliers {
    pub tier1: Multiple,
    pub tier2: Multiple,
    pub tier3: Multiple,
}

#[cfg(feature = "insurance")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCoverConfig {
    pub base_cover: Money,
    pub city_tier: CityTierMultipliers,
    /// Keyed by the age of the eldest insured member.
    pub age_bands: Vec<MultiplierBand>,
    /// Keyed by number of insured members.
    pub family_size_bands: Vec<MultiplierBand>,
    pub pre_existing_multiplier: Multiple,
    /// Share (percent) of employer cover counted towards current cover.
    pub corporate_cover_weight: Rate,
}

#[cfg(feature = "insurance")]
impl Default for HealthCoverConfig {
    fn default() -> Self {
        HealthCoverConfig {
            base_cover: dec!(1_000_000),
            city_tier: CityTierMultipliers {
                tier1: dec!(1.5),
                tier2: dec!(1.2),
                tier3: dec!(1.0),
            },
            age_bands: vec![
                MultiplierBand { from: 0, multiplier: dec!(1.0) },
                MultiplierBand { from: 35, multiplier: dec!(1.25) },
                MultiplierBand { from: 45, multiplier: dec!(1.5) },
                MultiplierBand { from: 60, multiplier: dec!(2.0) },
            ],
            family_size_bands: vec![
                MultiplierBand { from: 0, multiplier: dec!(1.0) },
                MultiplierBand { from: 2, multiplier: dec!(1.5) },
                MultiplierBand { from: 3, multiplier: dec!(1.75) },
                MultiplierBand { from: 5, multiplier: dec!(2.0) },
            ],
            pre_existing_multiplier: dec!(1.25),
            corporate_cover_weight: dec!(50),
        }
    }
}

#[cfg(feature = "insurance")]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsuranceConfig {
    pub term: TermCoverConfig,
    pub health: HealthCoverConfig,
}

#[cfg(feature = "insurance")]
impl InsuranceConfig {
    pub fn validate(&self) -> FinHealthResult<()> {
        require_bands("term.income_multipliers", &self.term.income_multipliers)?;
        require_bands("health.age_bands", &self.health.age_bands)?;
        require_bands("health.family_size_bands", &self.health.family_size_bands)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Education
// ---------------------------------------------------------------------------

#[cfg(feature = "planning")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseCost {
    pub course: String,
    pub current_cost: Money,
}

#[cfg(feature = "planning")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationConfig {
    /// Present-day total cost of common courses.
    pub reference_costs: Vec<CourseCost>,
}

#[cfg(feature = "planning")]
impl EducationConfig {
    /// Case-insensitive lookup of a course's present-day cost.
    pub fn cost_for(&self, course: &str) -> Option<Money> {
        self.reference_costs
            .iter()
            .find(|c| c.course.eq_ignore_ascii_case(course))
            .map(|c| c.current_cost)
    }
}

#[cfg(feature = "planning")]
impl Default for EducationConfig {
    fn default() -> Self {
        let course = |name: &str, cost: Decimal| CourseCost {
            course: name.into(),
            current_cost: cost,
        };
        EducationConfig {
            reference_costs: vec![
                course("engineering", dec!(1_500_000)),
                course("medical", dec!(7_500_000)),
                course("mba", dec!(2_500_000)),
                course("law", dec!(1_000_000)),
                course("undergraduate", dec!(600_000)),
                course("study_abroad", dec!(5_000_000)),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[cfg(feature = "scoring")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub savings_rate: Decimal,
    pub emergency_fund: Decimal,
    pub insurance: Decimal,
    pub retirement: Decimal,
    pub goals: Decimal,
    pub tax_efficiency: Decimal,
    pub debt: Decimal,
    pub allocation: Decimal,
}

#[cfg(feature = "scoring")]
impl ScoringWeights {
    pub fn total(&self) -> Decimal {
        self.savings_rate
            + self.emergency_fund
            + self.insurance
            + self.retirement
            + self.goals
            + self.tax_efficiency
            + self.debt
            + self.allocation
    }
}

#[cfg(feature = "scoring")]
impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            savings_rate: dec!(0.15),
            emergency_fund: dec!(0.15),
            insurance: dec!(0.15),
            retirement: dec!(0.15),
            goals: dec!(0.10),
            tax_efficiency: dec!(0.10),
            debt: dec!(0.10),
            allocation: dec!(0.10),
        }
    }
}

/// Savings-rate benchmarks, percent of income.
#[cfg(feature = "scoring")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsBenchmarks {
    pub fair: Rate,
    pub good: Rate,
    /// Savings rate that earns a full score.
    pub target: Rate,
}

/// Months of expenses an emergency fund should hold, by occupation.
#[cfg(feature = "scoring")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyFundMonths {
    pub salaried: u32,
    pub government: u32,
    pub self_employed: u32,
    pub business: u32,
    pub freelancer: u32,
    pub retired: u32,
}

#[cfg(feature = "scoring")]
impl EmergencyFundMonths {
    pub fn required_for(&self, occupation: Occupation) -> u32 {
        match occupation {
            Occupation::Salaried => self.salaried,
            Occupation::Government => self.government,
            Occupation::SelfEmployed => self.self_employed,
            Occupation::Business => self.business,
            Occupation::Freelancer => self.freelancer,
            Occupation::Retired => self.retired,
        }
    }
}

/// Debt-to-income thresholds, percent of monthly income.
#[cfg(feature = "scoring")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtThresholds {
    pub healthy: Rate,
    pub manageable: Rate,
}

/// Piecewise-linear debt score. Healthy ratios fall from 100 to
/// `healthy_floor`, manageable ones from there to `manageable_floor`, and
/// every point beyond `manageable` costs `high_penalty_per_point`.
#[cfg(feature = "scoring")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtScoreCurve {
    pub healthy_floor: Score,
    pub manageable_floor: Score,
    pub high_penalty_per_point: Multiple,
}

#[cfg(feature = "scoring")]
impl Default for DebtScoreCurve {
    fn default() -> Self {
        DebtScoreCurve {
            healthy_floor: dec!(80),
            manageable_floor: dec!(40),
            high_penalty_per_point: dec!(2),
        }
    }
}

/// Longest goal horizon, in years, for each fund category. Longer horizons
/// go to equity.
#[cfg(feature = "scoring")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundHorizonBands {
    pub liquid_or_short_debt: u32,
    pub hybrid: u32,
    pub large_or_flexi_cap: u32,
}

#[cfg(feature = "scoring")]
impl Default for FundHorizonBands {
    fn default() -> Self {
        FundHorizonBands {
            liquid_or_short_debt: 3,
            hybrid: 5,
            large_or_flexi_cap: 7,
        }
    }
}

#[cfg(feature = "scoring")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBands {
    pub excellent: Decimal,
    pub good: Decimal,
    pub fair: Decimal,
}

#[cfg(feature = "scoring")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub savings: SavingsBenchmarks,
    pub emergency_months: EmergencyFundMonths,
    /// Cover, as a multiple of the required months, rated Excellent.
    #[serde(default = "default_emergency_excellent_multiple")]
    pub emergency_excellent_multiple: Multiple,
    pub debt: DebtThresholds,
    #[serde(default)]
    pub debt_curve: DebtScoreCurve,
    /// Equity drift, in percentage points, beyond which a rebalance is flagged.
    pub allocation_drift_threshold: Rate,
    /// Score points lost per percentage point of equity drift.
    #[serde(default = "default_allocation_drift_penalty")]
    pub allocation_drift_penalty: Multiple,
    #[serde(default)]
    pub fund_horizons: FundHorizonBands,
    pub grades: GradeBands,
}

#[cfg(feature = "scoring")]
fn default_emergency_excellent_multiple() -> Multiple {
    dec!(1.5)
}

#[cfg(feature = "scoring")]
fn default_allocation_drift_penalty() -> Multiple {
    dec!(2)
}

#[cfg(feature = "scoring")]
impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            weights: ScoringWeights::default(),
            savings: SavingsBenchmarks {
                fair: dec!(10),
                good: dec!(20),
                target: dec!(30),
            },
            emergency_months: EmergencyFundMonths {
                salaried: 6,
                government: 4,
                self_employed: 9,
                business: 12,
                freelancer: 12,
                retired: 12,
            },
            emergency_excellent_multiple: default_emergency_excellent_multiple(),
            debt: DebtThresholds {
                healthy: dec!(30),
                manageable: dec!(50),
            },
            debt_curve: DebtScoreCurve::default(),
            allocation_drift_threshold: dec!(15),
            allocation_drift_penalty: default_allocation_drift_penalty(),
            fund_horizons: FundHorizonBands::default(),
            grades: GradeBands {
                excellent: dec!(80),
                good: dec!(60),
                fair: dec!(40),
            },
        }
    }
}

#[cfg(feature = "scoring")]
impl ScoringConfig {
    pub fn validate(&self) -> FinHealthResult<()> {
        let total = self.weights.total();
        if (total - Decimal::ONE).abs() > dec!(0.0001) {
            return Err(FinHealthError::ConfigurationDefect(format!(
                "scoring weights must sum to 1 (got {total})"
            )));
        }
        if self.debt.healthy >= self.debt.manageable {
            return Err(FinHealthError::ConfigurationDefect(
                "debt.healthy must be below debt.manageable".into(),
            ));
        }
        let curve = &self.debt_curve;
        if !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&curve.healthy_floor)
            || curve.manageable_floor > curve.healthy_floor
            || curve.manageable_floor < Decimal::ZERO
        {
            return Err(FinHealthError::ConfigurationDefect(
                "debt_curve floors must satisfy 0 <= manageable_floor <= healthy_floor <= 100".into(),
            ));
        }
        let h = &self.fund_horizons;
        if !(h.liquid_or_short_debt <= h.hybrid && h.hybrid <= h.large_or_flexi_cap) {
            return Err(FinHealthError::ConfigurationDefect(
                "fund_horizons must be non-decreasing".into(),
            ));
        }
        if self.emergency_excellent_multiple < Decimal::ONE {
            return Err(FinHealthError::ConfigurationDefect(
                "emergency_excellent_multiple must be >= 1".into(),
            ));
        }
        if self.savings.target <= Decimal::ZERO {
            return Err(FinHealthError::ConfigurationDefect(
                "savings.target must be > 0".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

#[cfg(feature = "scoring")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationConfig {
    pub conservative: AssetAllocation,
    pub moderate: AssetAllocation,
    pub aggressive: AssetAllocation,
}

#[cfg(feature = "scoring")]
impl AllocationConfig {
    pub fn target_for(&self, profile: RiskProfile) -> &AssetAllocation {
        match profile {
            RiskProfile::Conservative => &self.conservative,
            RiskProfile::Moderate => &self.moderate,
            RiskProfile::Aggressive => &self.aggressive,
        }
    }

    pub fn validate(&self) -> FinHealthResult<()> {
        for (name, mix) in [
            ("conservative", &self.conservative),
            ("moderate", &self.moderate),
            ("aggressive", &self.aggressive),
        ] {
            if mix.total() != dec!(100) {
                return Err(FinHealthError::ConfigurationDefect(format!(
                    "{name} allocation sums to {} (expected 100)",
                    mix.total()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "scoring")]
impl Default for AllocationConfig {
    fn default() -> Self {
        let mix = |equity: Decimal, debt: Decimal, gold: Decimal, cash: Decimal| AssetAllocation {
            equity,
            debt,
            gold,
            cash,
        };
        AllocationConfig {
            conservative: mix(dec!(30), dec!(55), dec!(10), dec!(5)),
            moderate: mix(dec!(55), dec!(30), dec!(10), dec!(5)),
            aggressive: mix(dec!(75), dec!(15), dec!(5), dec!(5)),
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Everything the scorer needs, bundled for one fiscal year.
#[cfg(feature = "scoring")]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub tax: TaxConfig,
    pub insurance: InsuranceConfig,
    pub education: EducationConfig,
    pub scoring: ScoringConfig,
    pub allocation: AllocationConfig,
}

#[cfg(feature = "scoring")]
impl EngineConfig {
    pub fn validate(&self) -> FinHealthResult<()> {
        self.tax.validate()?;
        self.insurance.validate()?;
        self.scoring.validate()?;
        self.allocation.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_multiplier_lower_bound_inclusive() {
        let bands = vec![
            MultiplierBand { from: 0, multiplier: dec!(15) },
            MultiplierBand { from: 35, multiplier: dec!(12) },
            MultiplierBand { from: 45, multiplier: dec!(10) },
        ];
        assert_eq!(band_multiplier(&bands, 34), Some(dec!(15)));
        assert_eq!(band_multiplier(&bands, 35), Some(dec!(12)));
        assert_eq!(band_multiplier(&bands, 44), Some(dec!(12)));
        assert_eq!(band_multiplier(&bands, 45), Some(dec!(10)));
        assert_eq!(band_multiplier(&bands, 90), Some(dec!(10)));
    }

    #[test]
    fn test_band_multiplier_unordered_bands() {
        let bands = vec![
            MultiplierBand { from: 45, multiplier: dec!(10) },
            MultiplierBand { from: 0, multiplier: dec!(15) },
        ];
        assert_eq!(band_multiplier(&bands, 50), Some(dec!(10)));
        assert_eq!(band_multiplier(&bands, 20), Some(dec!(15)));
    }

    #[test]
    fn test_band_multiplier_empty() {
        assert_eq!(band_multiplier(&[], 30), None);
    }

    #[cfg(feature = "scoring")]
    #[test]
    fn test_default_engine_config_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[cfg(feature = "scoring")]
    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = ScoringConfig::default();
        config.weights.debt = dec!(0.5);
        assert!(matches!(
            config.validate(),
            Err(FinHealthError::ConfigurationDefect(_))
        ));
    }

    #[cfg(feature = "scoring")]
    #[test]
    fn test_debt_curve_floors_must_descend() {
        let mut config = ScoringConfig::default();
        config.debt_curve.manageable_floor = dec!(90);
        assert!(matches!(
            config.validate(),
            Err(FinHealthError::ConfigurationDefect(_))
        ));
    }

    #[cfg(feature = "scoring")]
    #[test]
    fn test_scoring_tables_default_when_omitted() {
        let mut json = serde_json::to_value(ScoringConfig::default()).unwrap();
        let map = json.as_object_mut().unwrap();
        for key in [
            "emergency_excellent_multiple",
            "debt_curve",
            "allocation_drift_penalty",
            "fund_horizons",
        ] {
            map.remove(key);
        }
        let back: ScoringConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, ScoringConfig::default());
    }

    #[cfg(feature = "planning")]
    #[test]
    fn test_course_cost_lookup_ignores_case() {
        let config = EducationConfig::default();
        assert_eq!(config.cost_for("MBA"), Some(dec!(2_500_000)));
        assert_eq!(config.cost_for("astronomy"), None);
    }

    #[cfg(feature = "scoring")]
    #[test]
    fn test_config_roundtrips_through_json() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
