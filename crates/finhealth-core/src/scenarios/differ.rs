use std::collections::BTreeMap;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::FinHealthError;
use crate::scoring::analysis::score_plan;
use crate::scoring::{FinancialAnalysis, FinancialPlan};
use crate::time_value::{fraction, require_non_negative};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinHealthResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What-if adjustments. Absent fields leave the plan unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioDeltas {
    /// Percent change applied to every income line.
    pub income_change_pct: Option<Rate>,
    /// Percent change applied to household, rent and other spending.
    /// Loan EMIs are contractual and stay fixed.
    pub expense_change_pct: Option<Rate>,
    /// Added to the retirement SIP.
    pub extra_monthly_contribution: Option<Money>,
    /// Years added to (or, if negative, removed from) the retirement age.
    pub retirement_age_shift: Option<i32>,
    pub inflation_rate: Option<Rate>,
    pub expected_return: Option<Rate>,
    pub pre_retirement_return: Option<Rate>,
    pub post_retirement_return: Option<Rate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub base: Decimal,
    pub scenario: Decimal,
    /// scenario - base
    pub delta: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDiff {
    pub base: FinancialAnalysis,
    pub scenario: FinancialAnalysis,
    pub deltas: BTreeMap<String, MetricDelta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    pub deltas: ScenarioDeltas,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub analysis: FinancialAnalysis,
    pub deltas: BTreeMap<String, MetricDelta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub base: FinancialAnalysis,
    pub scenarios: Vec<ScenarioOutcome>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn change_factor(field: &str, pct: Rate) -> FinHealthResult<Decimal> {
    if pct < -Decimal::ONE_HUNDRED {
        return Err(FinHealthError::invalid(field, "cannot fall by more than 100%"));
    }
    Ok(Decimal::ONE + fraction(pct))
}

impl ScenarioDeltas {
    /// Apply every present delta to `plan`.
    pub fn apply_to(&self, plan: &mut FinancialPlan) -> FinHealthResult<()> {
        if let Some(pct) = self.income_change_pct {
            let factor = change_factor("income_change_pct", pct)?;
            plan.income.annual_salary *= factor;
            plan.income.annual_other_income *= factor;
        }
        if let Some(pct) = self.expense_change_pct {
            let factor = change_factor("expense_change_pct", pct)?;
            plan.expenses.monthly_household *= factor;
            plan.expenses.monthly_rent *= factor;
            plan.expenses.monthly_other *= factor;
        }
        if let Some(extra) = self.extra_monthly_contribution {
            require_non_negative("extra_monthly_contribution", extra)?;
            plan.retirement.monthly_sip += extra;
        }
        if let Some(shift) = self.retirement_age_shift {
            let shifted = i64::from(plan.personal.retirement_age) + i64::from(shift);
            plan.personal.retirement_age = u32::try_from(shifted).map_err(|_| {
                FinHealthError::invalid("retirement_age_shift", "shifted retirement age is negative")
            })?;
        }
        let a = &mut plan.assumptions;
        if let Some(rate) = self.inflation_rate {
            a.inflation = rate;
        }
        if let Some(rate) = self.expected_return {
            a.expected_return = rate;
        }
        if let Some(rate) = self.pre_retirement_return {
            a.pre_retirement_return = rate;
        }
        if let Some(rate) = self.post_retirement_return {
            a.post_retirement_return = rate;
        }
        Ok(())
    }
}

fn metrics(a: &FinancialAnalysis) -> [(&'static str, Decimal); 22] {
    let s = &a.dimension_scores;
    [
        ("overall_score", a.overall_score),
        ("score.savings_rate", s.savings_rate),
        ("score.emergency_fund", s.emergency_fund),
        ("score.insurance", s.insurance),
        ("score.retirement", s.retirement),
        ("score.goals", s.goals),
        ("score.tax_efficiency", s.tax_efficiency),
        ("score.debt", s.debt),
        ("score.allocation", s.allocation),
        ("savings_rate", a.savings.savings_rate),
        ("monthly_surplus", a.savings.monthly_surplus),
        ("emergency_fund_months", a.emergency_fund.months_covered),
        ("retirement_corpus_needed", a.retirement.corpus_needed),
        ("retirement_projected_corpus", a.retirement.projected_corpus),
        ("retirement_gap", a.retirement.gap),
        ("retirement_required_sip", a.retirement.required_monthly_sip),
        ("term_cover_gap", a.insurance.term.gap),
        ("health_cover_gap", a.insurance.health.gap),
        ("potential_tax_savings", a.tax.potential_tax_savings),
        ("debt_to_income", a.debt.debt_to_income),
        ("equity_drift", a.allocation.equity_drift),
        ("goals_on_track", Decimal::from(a.goals.on_track)),
    ]
}

fn diff_metrics(base: &FinancialAnalysis, scenario: &FinancialAnalysis) -> BTreeMap<String, MetricDelta> {
    metrics(base)
        .into_iter()
        .zip(metrics(scenario))
        .map(|((name, b), (_, s))| {
            (
                name.to_string(),
                MetricDelta {
                    base: b,
                    scenario: s,
                    delta: s - b,
                },
            )
        })
        .collect()
}

/// Score `plan`, tagging each warning it raises with `label`.
fn score_labelled(
    plan: &FinancialPlan,
    config: &EngineConfig,
    label: &str,
    warnings: &mut Vec<String>,
) -> FinHealthResult<FinancialAnalysis> {
    let mut raised = Vec::new();
    let analysis = score_plan(plan, config, &mut raised)?;
    warnings.extend(raised.into_iter().map(|w| format!("{label}: {w}")));
    Ok(analysis)
}

/// Score a modified copy of `base`. The base plan is only read.
fn score_variant(
    base: &FinancialPlan,
    deltas: &ScenarioDeltas,
    config: &EngineConfig,
    label: &str,
    warnings: &mut Vec<String>,
) -> FinHealthResult<FinancialAnalysis> {
    let mut variant = base.clone();
    deltas.apply_to(&mut variant)?;
    score_labelled(&variant, config, label, warnings)
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Score `base_plan` as-is and with `deltas` applied, pairing every headline
/// metric.
pub fn diff_scenario(
    base_plan: &FinancialPlan,
    deltas: &ScenarioDeltas,
    config: &EngineConfig,
) -> FinHealthResult<ComputationOutput<ScenarioDiff>> {
    let mut warnings: Vec<String> = Vec::new();
    let base = score_labelled(base_plan, config, "base", &mut warnings)?;
    let scenario = score_variant(base_plan, deltas, config, "scenario", &mut warnings)?;
    let metric_deltas = diff_metrics(&base, &scenario);
    debug!(
        "scenario diff: overall {} -> {}",
        base.overall_score, scenario.overall_score
    );

    Ok(with_metadata(
        "What-if scenario diff (independent copy, rescored)",
        deltas,
        warnings,
        ScenarioDiff {
            base,
            scenario,
            deltas: metric_deltas,
        },
    ))
}

/// Run several named delta sets against one base plan.
pub fn compare_scenarios(
    base_plan: &FinancialPlan,
    scenarios: &[NamedScenario],
    config: &EngineConfig,
) -> FinHealthResult<ComputationOutput<ScenarioComparison>> {
    let mut warnings: Vec<String> = Vec::new();
    if scenarios.is_empty() {
        return Err(FinHealthError::invalid("scenarios", "at least one scenario is required"));
    }

    let base = score_labelled(base_plan, config, "base", &mut warnings)?;
    let outcomes = scenarios
        .iter()
        .map(|named| {
            let label = format!("scenario {}", named.name);
            let analysis = score_variant(base_plan, &named.deltas, config, &label, &mut warnings)?;
            Ok(ScenarioOutcome {
                name: named.name.clone(),
                deltas: diff_metrics(&base, &analysis),
                analysis,
            })
        })
        .collect::<FinHealthResult<Vec<_>>>()?;

    Ok(with_metadata(
        "What-if scenario comparison",
        &serde_json::json!({
            "scenarios": scenarios.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        }),
        warnings,
        ScenarioComparison {
            base,
            scenarios: outcomes,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::plan::fixtures::sample_plan;
    use rust_decimal_macros::dec;

    #[test]
    fn test_base_plan_not_mutated() {
        let plan = sample_plan();
        let config = EngineConfig::default();
        let before = serde_json::to_string(&plan).unwrap();

        let deltas = ScenarioDeltas {
            income_change_pct: Some(dec!(20)),
            extra_monthly_contribution: Some(dec!(10_000)),
            retirement_age_shift: Some(-2),
            inflation_rate: Some(dec!(7)),
            ..Default::default()
        };
        diff_scenario(&plan, &deltas, &config).unwrap();
        diff_scenario(&plan, &deltas, &config).unwrap();

        assert_eq!(serde_json::to_string(&plan).unwrap(), before);
    }

    #[test]
    fn test_repeated_calls_leak_no_state() {
        let plan = sample_plan();
        let config = EngineConfig::default();
        let raise = ScenarioDeltas {
            income_change_pct: Some(dec!(25)),
            ..Default::default()
        };
        let cut = ScenarioDeltas {
            expense_change_pct: Some(dec!(-10)),
            ..Default::default()
        };
        let first = diff_scenario(&plan, &raise, &config).unwrap().result;
        diff_scenario(&plan, &cut, &config).unwrap();
        let again = diff_scenario(&plan, &raise, &config).unwrap().result;
        assert_eq!(first, again);
    }

    #[test]
    fn test_empty_deltas_change_nothing() {
        let plan = sample_plan();
        let diff = diff_scenario(&plan, &ScenarioDeltas::default(), &EngineConfig::default())
            .unwrap()
            .result;
        assert_eq!(diff.base, diff.scenario);
        assert!(diff.deltas.values().all(|d| d.delta.is_zero()));
    }

    #[test]
    fn test_warnings_name_the_plan_that_raised_them() {
        let mut plan = sample_plan();
        plan.goals[1].target_year = 2020;
        let deltas = ScenarioDeltas {
            income_change_pct: Some(dec!(10)),
            ..Default::default()
        };
        let warnings = diff_scenario(&plan, &deltas, &EngineConfig::default())
            .unwrap()
            .warnings;
        let past_goal = |prefix: &str| {
            warnings
                .iter()
                .any(|w| w.starts_with(prefix) && w.contains("House down payment"))
        };
        assert!(past_goal("base: "));
        assert!(past_goal("scenario: "));
        assert!(warnings
            .iter()
            .all(|w| w.starts_with("base: ") || w.starts_with("scenario: ")));
    }

    #[test]
    fn test_income_raise_improves_savings() {
        let plan = sample_plan();
        let deltas = ScenarioDeltas {
            income_change_pct: Some(dec!(20)),
            ..Default::default()
        };
        let diff = diff_scenario(&plan, &deltas, &EngineConfig::default())
            .unwrap()
            .result;
        assert_eq!(diff.scenario.savings.monthly_income, dec!(180_000));
        assert_eq!(diff.deltas["monthly_surplus"].delta, dec!(30_000));
        assert!(diff.deltas["savings_rate"].delta > Decimal::ZERO);
    }

    #[test]
    fn test_extra_contribution_grows_projected_corpus() {
        let plan = sample_plan();
        let deltas = ScenarioDeltas {
            extra_monthly_contribution: Some(dec!(10_000)),
            ..Default::default()
        };
        let diff = diff_scenario(&plan, &deltas, &EngineConfig::default())
            .unwrap()
            .result;
        let projected = &diff.deltas["retirement_projected_corpus"];
        assert!(projected.delta > Decimal::ZERO);
        assert_eq!(projected.delta, projected.scenario - projected.base);
        assert!(diff.deltas["retirement_corpus_needed"].delta.is_zero());
    }

    #[test]
    fn test_later_retirement_grows_projected_corpus() {
        let plan = sample_plan();
        let deltas = ScenarioDeltas {
            retirement_age_shift: Some(5),
            ..Default::default()
        };
        let diff = diff_scenario(&plan, &deltas, &EngineConfig::default())
            .unwrap()
            .result;
        assert_eq!(diff.scenario.retirement.years_to_retirement, 33);
        assert!(diff.deltas["retirement_projected_corpus"].delta > Decimal::ZERO);
    }

    #[test]
    fn test_shift_past_life_expectancy_rejected() {
        let plan = sample_plan();
        let deltas = ScenarioDeltas {
            retirement_age_shift: Some(30),
            ..Default::default()
        };
        assert!(diff_scenario(&plan, &deltas, &EngineConfig::default()).is_err());
    }

    #[test]
    fn test_income_fall_beyond_hundred_percent_rejected() {
        let plan = sample_plan();
        let deltas = ScenarioDeltas {
            income_change_pct: Some(dec!(-101)),
            ..Default::default()
        };
        assert!(diff_scenario(&plan, &deltas, &EngineConfig::default()).is_err());
    }

    #[test]
    fn test_compare_scenarios_shares_base() {
        let plan = sample_plan();
        let scenarios = vec![
            NamedScenario {
                name: "raise".into(),
                deltas: ScenarioDeltas {
                    income_change_pct: Some(dec!(10)),
                    ..Default::default()
                },
            },
            NamedScenario {
                name: "high inflation".into(),
                deltas: ScenarioDeltas {
                    inflation_rate: Some(dec!(8)),
                    ..Default::default()
                },
            },
        ];
        let config = EngineConfig::default();
        let out = compare_scenarios(&plan, &scenarios, &config).unwrap().result;
        assert_eq!(out.scenarios.len(), 2);
        assert_eq!(out.scenarios[0].name, "raise");
        assert!(out.scenarios[1].deltas["retirement_corpus_needed"].delta > Decimal::ZERO);

        let single = diff_scenario(&plan, &scenarios[0].deltas, &config).unwrap().result;
        assert_eq!(out.base, single.base);
        assert_eq!(out.scenarios[0].analysis, single.scenario);
    }

    #[test]
    fn test_compare_requires_a_scenario() {
        assert!(compare_scenarios(&sample_plan(), &[], &EngineConfig::default()).is_err());
    }
}
