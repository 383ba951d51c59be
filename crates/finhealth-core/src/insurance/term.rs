use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{band_multiplier, TermCoverConfig};
use crate::error::FinHealthError;
use crate::time_value::{
    present_value_growing_annuity, require_horizon, require_non_negative, require_rate,
};
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Rate};
use crate::FinHealthResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermInsuranceInput {
    pub age: u32,
    pub retirement_age: u32,
    pub annual_income: Money,
    pub annual_expenses: Money,
    pub income_growth_rate: Rate,
    #[serde(default)]
    pub expense_growth_rate: Rate,
    pub discount_rate: Rate,
    #[serde(default)]
    pub outstanding_loans: Money,
    /// Lump sums dependents will still need (education, weddings).
    #[serde(default)]
    pub future_goals: Money,
    #[serde(default)]
    pub existing_cover: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverMethod {
    HumanLifeValue,
    IncomeReplacement,
    ExpenseReplacement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermInsuranceOutput {
    pub years_to_retirement: u32,
    pub hlv_method: Money,
    pub income_replacement_method: Money,
    pub income_multiplier: Multiple,
    pub expense_method: Money,
    pub recommended_cover: Money,
    pub recommended_method: CoverMethod,
    pub existing_cover: Money,
    pub gap: Money,
    pub is_adequate: bool,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Life cover by three methods; the largest is recommended.
pub fn term_insurance_need(
    input: &TermInsuranceInput,
    config: &TermCoverConfig,
) -> FinHealthResult<ComputationOutput<TermInsuranceOutput>> {
    if input.retirement_age <= input.age {
        return Err(FinHealthError::invalid(
            "retirement_age",
            "retirement_age must be greater than age",
        ));
    }
    require_non_negative("annual_income", input.annual_income)?;
    require_non_negative("annual_expenses", input.annual_expenses)?;
    require_non_negative("outstanding_loans", input.outstanding_loans)?;
    require_non_negative("future_goals", input.future_goals)?;
    require_non_negative("existing_cover", input.existing_cover)?;
    require_rate("income_growth_rate", input.income_growth_rate)?;
    require_rate("expense_growth_rate", input.expense_growth_rate)?;
    require_rate("discount_rate", input.discount_rate)?;

    let years_to_retirement = require_horizon("retirement_age", input.retirement_age - input.age)?;

    // --- Human life value ---
    let hlv_method = present_value_growing_annuity(
        input.annual_income,
        input.income_growth_rate,
        input.discount_rate,
        years_to_retirement,
    )?;

    // --- Income replacement ---
    let income_multiplier = band_multiplier(&config.income_multipliers, input.age).ok_or_else(|| {
        FinHealthError::ConfigurationDefect(format!("no income multiplier band covers age {}", input.age))
    })?;
    let income_replacement_method = input.annual_income * income_multiplier;

    // --- Expense replacement ---
    let expense_method = present_value_growing_annuity(
        input.annual_expenses,
        input.expense_growth_rate,
        input.discount_rate,
        years_to_retirement,
    )? + input.outstanding_loans
        + input.future_goals;

    // First-listed method wins a tie.
    let (recommended_method, recommended_cover) = [
        (CoverMethod::HumanLifeValue, hlv_method),
        (CoverMethod::IncomeReplacement, income_replacement_method),
        (CoverMethod::ExpenseReplacement, expense_method),
    ]
    .into_iter()
    .fold((CoverMethod::HumanLifeValue, Decimal::MIN), |best, (method, value)| {
        if value > best.1 {
            (method, value)
        } else {
            best
        }
    });

    let gap = (recommended_cover - input.existing_cover).max(Decimal::ZERO);
    debug!("term cover: recommended={recommended_cover} via {recommended_method:?}, gap={gap}");

    let output = TermInsuranceOutput {
        years_to_retirement,
        hlv_method,
        income_replacement_method,
        income_multiplier,
        expense_method,
        recommended_cover,
        recommended_method,
        existing_cover: input.existing_cover,
        gap,
        is_adequate: gap.is_zero(),
    };

    Ok(with_metadata(
        "Term cover: max of human life value, income multiple, expense replacement",
        &serde_json::json!({
            "income_growth_rate": input.income_growth_rate.to_string(),
            "expense_growth_rate": input.expense_growth_rate.to_string(),
            "discount_rate": input.discount_rate.to_string(),
        }),
        Vec::new(),
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn default_input() -> TermInsuranceInput {
        TermInsuranceInput {
            age: 30,
            retirement_age: 60,
            annual_income: dec!(1_200_000),
            annual_expenses: dec!(600_000),
            income_growth_rate: dec!(5),
            expense_growth_rate: Decimal::ZERO,
            discount_rate: dec!(8),
            outstanding_loans: dec!(2_000_000),
            future_goals: dec!(3_000_000),
            existing_cover: dec!(5_000_000),
        }
    }

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn test_age_thirty_multiplier_is_fifteen() {
        let out = term_insurance_need(&default_input(), &TermCoverConfig::default())
            .unwrap()
            .result;
        assert_eq!(out.income_multiplier, dec!(15));
        assert_eq!(out.income_replacement_method, dec!(18_000_000));
    }

    #[test]
    fn test_multiplier_band_boundaries() {
        let config = TermCoverConfig::default();
        for (age, expected) in [(34, dec!(15)), (35, dec!(12)), (44, dec!(12)), (45, dec!(10))] {
            let mut input = default_input();
            input.age = age;
            let out = term_insurance_need(&input, &config).unwrap().result;
            assert_eq!(out.income_multiplier, expected, "age {age}");
        }
    }

    #[test]
    fn test_young_earner_recommends_hlv() {
        let out = term_insurance_need(&default_input(), &TermCoverConfig::default())
            .unwrap()
            .result;
        assert_close(out.hlv_method, dec!(22_819_875.81), dec!(0.01));
        assert_close(out.expense_method, dec!(11_754_670.01), dec!(0.01));
        assert_eq!(out.recommended_method, CoverMethod::HumanLifeValue);
        assert_eq!(out.recommended_cover, out.hlv_method);
        assert_close(out.gap, dec!(17_819_875.81), dec!(0.01));
        assert!(!out.is_adequate);
    }

    #[test]
    fn test_older_earner_recommends_income_multiple() {
        let mut input = default_input();
        input.age = 50;
        let out = term_insurance_need(&input, &TermCoverConfig::default())
            .unwrap()
            .result;
        assert_eq!(out.years_to_retirement, 10);
        assert_eq!(out.recommended_method, CoverMethod::IncomeReplacement);
        assert_eq!(out.recommended_cover, dec!(12_000_000));
    }

    #[test]
    fn test_tie_goes_to_first_method() {
        let mut input = default_input();
        input.annual_income = Decimal::ZERO;
        input.annual_expenses = Decimal::ZERO;
        input.outstanding_loans = Decimal::ZERO;
        input.future_goals = Decimal::ZERO;
        let out = term_insurance_need(&input, &TermCoverConfig::default())
            .unwrap()
            .result;
        assert_eq!(out.recommended_cover, Decimal::ZERO);
        assert_eq!(out.recommended_method, CoverMethod::HumanLifeValue);
        assert!(out.is_adequate);
    }

    #[test]
    fn test_existing_cover_above_need_has_zero_gap() {
        let mut input = default_input();
        input.existing_cover = dec!(50_000_000);
        let out = term_insurance_need(&input, &TermCoverConfig::default())
            .unwrap()
            .result;
        assert_eq!(out.gap, Decimal::ZERO);
        assert!(out.is_adequate);
    }

    #[test]
    fn test_age_at_or_past_retirement_rejected() {
        let config = TermCoverConfig::default();
        for age in [60, 65] {
            let mut input = default_input();
            input.age = age;
            assert!(
                matches!(
                    term_insurance_need(&input, &config),
                    Err(FinHealthError::InvalidInput { .. })
                ),
                "age {age}"
            );
        }
    }

    #[test]
    fn test_one_year_to_retirement_still_scores() {
        let mut input = default_input();
        input.age = 59;
        let out = term_insurance_need(&input, &TermCoverConfig::default())
            .unwrap()
            .result;
        assert_eq!(out.years_to_retirement, 1);
        assert!(out.hlv_method > Decimal::ZERO);
    }

    #[test]
    fn test_missing_band_is_configuration_defect() {
        let config = TermCoverConfig {
            income_multipliers: vec![crate::config::MultiplierBand {
                from: 40,
                multiplier: dec!(10),
            }],
        };
        assert!(matches!(
            term_insurance_need(&default_input(), &config),
            Err(FinHealthError::ConfigurationDefect(_))
        ));
    }
}
