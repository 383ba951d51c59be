use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EducationConfig;
use crate::error::FinHealthError;
use crate::time_value::{
    future_value_lump_sum, horizon_months, require_non_negative, require_rate,
    required_monthly_contribution,
};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinHealthResult;

/// Years by which the delay-impact projection postpones the start.
pub const DELAY_YEARS: u32 = 2;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationInput {
    pub child_age: u32,
    /// Child's age when the money is needed.
    pub goal_age: u32,
    /// Looked up in the reference cost table when `current_cost` is absent.
    #[serde(default)]
    pub course: Option<String>,
    /// Present-day cost of the course.
    #[serde(default)]
    pub current_cost: Option<Money>,
    #[serde(default)]
    pub current_savings: Money,
    pub education_inflation: Rate,
    pub expected_return: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationProjection {
    pub years_to_goal: u32,
    pub current_cost: Money,
    pub future_cost: Money,
    pub future_value_of_savings: Money,
    pub gap: Money,
    pub required_monthly_sip: Money,
}

/// Cost of starting the SIP `DELAY_YEARS` later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayImpact {
    pub delay_years: u32,
    pub delayed_years_to_goal: u32,
    pub delayed_required_sip: Money,
    pub sip_increase: Money,
    /// Percent of the on-time SIP; 0 when no SIP is needed on time.
    pub sip_increase_pct: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationOutput {
    #[serde(flatten)]
    pub projection: EducationProjection,
    pub delay_impact: DelayImpact,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

fn resolve_cost(input: &EducationInput, config: &EducationConfig) -> FinHealthResult<Money> {
    if let Some(cost) = input.current_cost {
        require_non_negative("current_cost", cost)?;
        return Ok(cost);
    }
    let course = input.course.as_deref().ok_or_else(|| {
        FinHealthError::invalid("current_cost", "either current_cost or course is required")
    })?;
    config
        .cost_for(course)
        .ok_or_else(|| FinHealthError::invalid("course", format!("no reference cost for '{course}'")))
}

/// Inflate today's cost to the goal year and solve the SIP for whatever
/// current savings do not cover.
pub fn project_education(
    input: &EducationInput,
    config: &EducationConfig,
    warnings: &mut Vec<String>,
) -> FinHealthResult<EducationProjection> {
    require_non_negative("current_savings", input.current_savings)?;
    require_rate("education_inflation", input.education_inflation)?;
    require_rate("expected_return", input.expected_return)?;
    let current_cost = resolve_cost(input, config)?;

    let years_to_goal = input.goal_age.saturating_sub(input.child_age).max(1);
    if input.goal_age <= input.child_age {
        warnings.push(format!(
            "Child age {} is at or past goal age {}; horizon clamped to 1 year",
            input.child_age, input.goal_age
        ));
    }

    let months = horizon_months("goal_age", years_to_goal)?;

    let future_cost = future_value_lump_sum(current_cost, input.education_inflation, years_to_goal)?;
    let future_value_of_savings =
        future_value_lump_sum(input.current_savings, input.expected_return, years_to_goal)?;
    let gap = (future_cost - future_value_of_savings).max(Decimal::ZERO);
    let required_monthly_sip = required_monthly_contribution(
        future_cost,
        future_value_of_savings,
        input.expected_return,
        months,
    )?;

    Ok(EducationProjection {
        years_to_goal,
        current_cost,
        future_cost,
        future_value_of_savings,
        gap,
        required_monthly_sip,
    })
}

/// Education goal projection plus the impact of starting two years late.
pub fn education_corpus(
    input: &EducationInput,
    config: &EducationConfig,
) -> FinHealthResult<ComputationOutput<EducationOutput>> {
    let mut warnings: Vec<String> = Vec::new();
    let projection = project_education(input, config, &mut warnings)?;

    let delayed_input = EducationInput {
        child_age: input.child_age.saturating_add(DELAY_YEARS),
        ..input.clone()
    };
    let mut delayed_warnings = Vec::new();
    let delayed = project_education(&delayed_input, config, &mut delayed_warnings)?;

    let sip_increase = delayed.required_monthly_sip - projection.required_monthly_sip;
    let sip_increase_pct = if projection.required_monthly_sip.is_zero() {
        Decimal::ZERO
    } else {
        sip_increase / projection.required_monthly_sip * Decimal::ONE_HUNDRED
    };
    debug!(
        "education corpus: future_cost={} sip={} delayed_sip={}",
        projection.future_cost, projection.required_monthly_sip, delayed.required_monthly_sip
    );

    let output = EducationOutput {
        projection,
        delay_impact: DelayImpact {
            delay_years: DELAY_YEARS,
            delayed_years_to_goal: delayed.years_to_goal,
            delayed_required_sip: delayed.required_monthly_sip,
            sip_increase,
            sip_increase_pct,
        },
    };

    Ok(with_metadata(
        "Education corpus (inflated course cost, level monthly SIP)",
        &serde_json::json!({
            "education_inflation": input.education_inflation.to_string(),
            "expected_return": input.expected_return.to_string(),
            "course": input.course,
            "delay_years": DELAY_YEARS,
        }),
        warnings,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn default_input() -> EducationInput {
        EducationInput {
            child_age: 5,
            goal_age: 18,
            course: Some("engineering".into()),
            current_cost: None,
            current_savings: dec!(200_000),
            education_inflation: dec!(10),
            expected_return: dec!(12),
        }
    }

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn test_engineering_goal() {
        let config = EducationConfig::default();
        let out = education_corpus(&default_input(), &config).unwrap().result;
        let p = &out.projection;
        assert_eq!(p.years_to_goal, 13);
        assert_eq!(p.current_cost, dec!(1_500_000));
        // 1.5M * 1.1^13
        assert_close(p.future_cost, dec!(5_178_406.82), dec!(0.01));
        assert_close(p.future_value_of_savings, dec!(872_698.62), dec!(0.01));
        assert_close(p.gap, dec!(4_305_708.20), dec!(0.01));
        assert_close(p.required_monthly_sip, dec!(11_567.98), dec!(0.01));
    }

    #[test]
    fn test_delay_impact_is_reinvocation() {
        let config = EducationConfig::default();
        let input = default_input();
        let out = education_corpus(&input, &config).unwrap().result;

        let delayed_input = EducationInput {
            child_age: 7,
            ..input
        };
        let mut warnings = Vec::new();
        let delayed = project_education(&delayed_input, &config, &mut warnings).unwrap();

        assert_eq!(out.delay_impact.delayed_years_to_goal, 11);
        assert_eq!(out.delay_impact.delayed_required_sip, delayed.required_monthly_sip);
        assert_close(out.delay_impact.delayed_required_sip, dec!(13_181.39), dec!(0.01));
        assert_close(out.delay_impact.sip_increase, dec!(1_613.41), dec!(0.01));
        assert_close(out.delay_impact.sip_increase_pct, dec!(13.947), dec!(0.001));
    }

    #[test]
    fn test_explicit_cost_overrides_course() {
        let config = EducationConfig::default();
        let mut input = default_input();
        input.current_cost = Some(dec!(1_000_000));
        let out = education_corpus(&input, &config).unwrap().result;
        assert_eq!(out.projection.current_cost, dec!(1_000_000));
    }

    #[test]
    fn test_unknown_course_without_cost_rejected() {
        let config = EducationConfig::default();
        let mut input = default_input();
        input.course = Some("astronomy".into());
        assert!(matches!(
            education_corpus(&input, &config),
            Err(FinHealthError::InvalidInput { .. })
        ));
        input.course = None;
        assert!(education_corpus(&input, &config).is_err());
    }

    #[test]
    fn test_past_goal_age_clamps_to_one_year() {
        let config = EducationConfig::default();
        let mut input = default_input();
        input.child_age = 18;
        let result = education_corpus(&input, &config).unwrap();
        assert_eq!(result.result.projection.years_to_goal, 1);
        assert_eq!(result.result.delay_impact.delayed_years_to_goal, 1);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_unbounded_goal_age_rejected() {
        let config = EducationConfig::default();
        let mut input = default_input();
        input.goal_age = u32::MAX;
        assert!(matches!(
            education_corpus(&input, &config),
            Err(FinHealthError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_child_age_at_type_limit_clamps() {
        let config = EducationConfig::default();
        let mut input = default_input();
        input.child_age = u32::MAX;
        let out = education_corpus(&input, &config).unwrap().result;
        assert_eq!(out.delay_impact.delayed_years_to_goal, 1);
    }

    #[test]
    fn test_savings_covering_cost_zeroes_delay_pct() {
        let config = EducationConfig::default();
        let mut input = default_input();
        input.current_savings = dec!(10_000_000);
        let out = education_corpus(&input, &config).unwrap().result;
        assert_eq!(out.projection.gap, Decimal::ZERO);
        assert_eq!(out.projection.required_monthly_sip, Decimal::ZERO);
        assert_eq!(out.delay_impact.sip_increase_pct, Decimal::ZERO);
    }
}
