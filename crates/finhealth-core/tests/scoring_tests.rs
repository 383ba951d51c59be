use chrono::NaiveDate;
use finhealth_core::config::EngineConfig;
use finhealth_core::scenarios::{compare_scenarios, diff_scenario, NamedScenario, ScenarioDeltas};
use finhealth_core::scoring::dimensions::{EmergencyFundStatus, SavingsStatus};
use finhealth_core::scoring::plan::{
    Assumptions, ExpenseProfile, Goal, GoalType, IncomeProfile, InsuranceProfile, NetWorth,
    PersonalProfile, RetirementContributions, TaxProfile,
};
use finhealth_core::scoring::{score, FinancialPlan, Grade};
use finhealth_core::tax::regime::{Deductions, TaxRegime};
use finhealth_core::{CityTier, FinHealthError, Occupation, RiskProfile};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

/// Mid-career salaried couple saving for a house, renting in a tier-2 city.
fn household() -> FinancialPlan {
    FinancialPlan {
        as_of: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        personal: PersonalProfile {
            age: 38,
            retirement_age: 60,
            life_expectancy: 85,
            occupation: Occupation::Salaried,
        },
        income: IncomeProfile {
            annual_salary: dec!(2_400_000),
            annual_other_income: dec!(120_000),
        },
        expenses: ExpenseProfile {
            monthly_household: dec!(60_000),
            monthly_rent: dec!(30_000),
            monthly_emi: dec!(25_000),
            monthly_other: dec!(15_000),
        },
        net_worth: NetWorth {
            cash_and_savings: dec!(400_000),
            fixed_deposits: dec!(500_000),
            equity_investments: dec!(1_500_000),
            debt_investments: dec!(300_000),
            retirement_savings: dec!(1_200_000),
            gold: dec!(200_000),
            real_estate: Decimal::ZERO,
            outstanding_loans: dec!(1_500_000),
        },
        insurance: InsuranceProfile {
            existing_term_cover: dec!(15_000_000),
            existing_health_cover: dec!(1_000_000),
            corporate_health_cover: dec!(500_000),
            dependents: 3,
            pre_existing_conditions: false,
            city_tier: CityTier::Tier2,
        },
        goals: vec![
            Goal {
                goal_type: GoalType::House,
                name: "Apartment".into(),
                target_year: 2030,
                target_amount: dec!(3_000_000),
                existing_savings: dec!(500_000),
                monthly_contribution: dec!(25_000),
            },
            Goal {
                goal_type: GoalType::Car,
                name: "Car".into(),
                target_year: 2027,
                target_amount: dec!(800_000),
                existing_savings: dec!(200_000),
                monthly_contribution: dec!(15_000),
            },
        ],
        tax: TaxProfile {
            deductions: Deductions {
                section_80c: dec!(150_000),
                section_80d: dec!(50_000),
                ..Default::default()
            },
            huf_income: Some(dec!(400_000)),
            current_regime: Some(TaxRegime::New),
        },
        risk_profile: RiskProfile::Moderate,
        retirement: RetirementContributions {
            monthly_sip: dec!(30_000),
            step_up_rate: dec!(5),
            monthly_pension: Decimal::ZERO,
        },
        assumptions: Assumptions::default(),
    }
}

// ===========================================================================
// Scoring
// ===========================================================================

#[test]
fn test_household_scores_in_range() {
    let config = EngineConfig::default();
    let result = score(&household(), &config).unwrap();
    let a = &result.result;

    assert!(a.overall_score >= Decimal::ZERO && a.overall_score <= dec!(100));
    assert_eq!(a.grade, Grade::from_score(a.overall_score, &config.scoring.grades));
    assert_eq!(a.as_of, household().as_of);

    // Income 210,000/month against 130,000 of spending
    assert_eq!(a.savings.monthly_income, dec!(210_000));
    assert_eq!(a.savings.monthly_surplus, dec!(80_000));
    assert_eq!(a.savings.status, SavingsStatus::Good);

    // 900,000 liquid over 130,000 monthly spend
    assert_eq!(a.emergency_fund.liquid_assets, dec!(900_000));
    assert_eq!(a.emergency_fund.status, EmergencyFundStatus::Adequate);

    assert_eq!(a.goals.goals.len(), 2);
    assert!(a.tax.huf_split_savings >= Decimal::ZERO);
}

#[test]
fn test_scores_are_bounded_per_dimension() {
    let a = score(&household(), &EngineConfig::default()).unwrap().result;
    let s = &a.dimension_scores;
    for value in [
        s.savings_rate,
        s.emergency_fund,
        s.insurance,
        s.retirement,
        s.goals,
        s.tax_efficiency,
        s.debt,
        s.allocation,
    ] {
        assert!(value >= Decimal::ZERO && value <= dec!(100), "score {value}");
    }
}

#[test]
fn test_past_goal_does_not_fail_scoring() {
    let mut plan = household();
    plan.goals[1].target_year = 2024;
    let result = score(&plan, &EngineConfig::default()).unwrap();
    assert!(!result.warnings.is_empty());
}

#[test]
fn test_invalid_plan_rejected() {
    let mut plan = household();
    plan.personal.life_expectancy = 55;
    let err = score(&plan, &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, FinHealthError::InvalidInput { .. }));
}

#[test]
fn test_plan_from_json_with_defaults() {
    let plan: FinancialPlan = serde_json::from_value(serde_json::json!({
        "as_of": "2025-04-01",
        "personal": {"age": 28, "retirement_age": 58, "life_expectancy": 80},
        "income": {"annual_salary": "900000"},
        "expenses": {"monthly_household": "35000"}
    }))
    .unwrap();
    let a = score(&plan, &EngineConfig::default()).unwrap().result;
    assert!(a.goals.goals.is_empty());
    assert_eq!(a.emergency_fund.liquid_assets, Decimal::ZERO);
    assert_eq!(a.allocation.current.cash, dec!(100));
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_scenario_leaves_plan_untouched() {
    let plan = household();
    let snapshot = serde_json::to_value(&plan).unwrap();
    let deltas = ScenarioDeltas {
        income_change_pct: Some(dec!(-20)),
        expense_change_pct: Some(dec!(10)),
        retirement_age_shift: Some(3),
        pre_retirement_return: Some(dec!(10)),
        ..Default::default()
    };
    let config = EngineConfig::default();
    diff_scenario(&plan, &deltas, &config).unwrap();
    assert_eq!(serde_json::to_value(&plan).unwrap(), snapshot);

    let base_again = score(&plan, &config).unwrap().result;
    let diff = diff_scenario(&plan, &deltas, &config).unwrap().result;
    assert_eq!(diff.base, base_again);
}

#[test]
fn test_income_cut_lowers_surplus() {
    let deltas = ScenarioDeltas {
        income_change_pct: Some(dec!(-50)),
        ..Default::default()
    };
    let diff = diff_scenario(&household(), &deltas, &EngineConfig::default())
        .unwrap()
        .result;
    let surplus = &diff.deltas["monthly_surplus"];
    assert_eq!(surplus.delta, dec!(-105_000));
    assert!(diff.deltas["score.savings_rate"].delta <= Decimal::ZERO);
}

#[test]
fn test_compare_scenarios_runs_each_independently() {
    let plan = household();
    let scenarios = vec![
        NamedScenario {
            name: "retire early".into(),
            deltas: ScenarioDeltas {
                retirement_age_shift: Some(-5),
                ..Default::default()
            },
        },
        NamedScenario {
            name: "baseline".into(),
            deltas: ScenarioDeltas::default(),
        },
    ];
    let out = compare_scenarios(&plan, &scenarios, &EngineConfig::default())
        .unwrap()
        .result;
    assert_eq!(out.scenarios[1].analysis, out.base);
    assert!(out.scenarios[0].deltas["retirement_projected_corpus"].delta < Decimal::ZERO);
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(24))]

    #[test]
    fn prop_overall_score_bounded(
        salary in 300_000u64..10_000_000u64,
        household_spend in 10_000u64..300_000u64,
        cash in 0u64..5_000_000u64,
        equity in 0u64..20_000_000u64,
    ) {
        let mut plan = household();
        plan.income.annual_salary = Decimal::from(salary);
        plan.expenses.monthly_household = Decimal::from(household_spend);
        plan.net_worth.cash_and_savings = Decimal::from(cash);
        plan.net_worth.equity_investments = Decimal::from(equity);
        let a = score(&plan, &EngineConfig::default()).unwrap().result;
        prop_assert!(a.overall_score >= Decimal::ZERO);
        prop_assert!(a.overall_score <= dec!(100));
        prop_assert!(a.retirement.gap >= Decimal::ZERO);
        prop_assert!(a.insurance.term.gap >= Decimal::ZERO);
        prop_assert!(a.insurance.health.gap >= Decimal::ZERO);
    }

    #[test]
    fn prop_deltas_are_scenario_minus_base(pct in -50i64..100i64) {
        let deltas = ScenarioDeltas {
            expense_change_pct: Some(Decimal::from(pct)),
            ..Default::default()
        };
        let diff = diff_scenario(&household(), &deltas, &EngineConfig::default())
            .unwrap()
            .result;
        for metric in diff.deltas.values() {
            prop_assert_eq!(metric.delta, metric.scenario - metric.base);
        }
    }
}
