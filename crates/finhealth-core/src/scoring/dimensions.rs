//! One function per health dimension. Each returns its detail together with
//! a 0-100 score; `analysis::score` weights them into the overall result.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::{
    AllocationConfig, EducationConfig, FundHorizonBands, InsuranceConfig, ScoringConfig, TaxConfig,
};
use crate::insurance::health::{health_insurance_need, HealthInsuranceInput};
use crate::insurance::term::{term_insurance_need, TermInsuranceInput};
use crate::planning::education::{project_education, EducationInput};
use crate::planning::goals::{generic_goal, GoalInput};
use crate::planning::retirement::{retirement_corpus, RetirementInput};
use crate::scoring::plan::{FinancialPlan, Goal, GoalType};
use crate::tax::huf::{income_split_benefit, IncomeSplitInput};
use crate::tax::regime::{best_regime_tax, regime_tax, Deductions, TaxRegime, Taxpayer};
use crate::time_value::{future_value_lump_sum, future_value_of_series, horizon_months};
use crate::types::{AssetAllocation, Money, Rate, Score};
use crate::FinHealthResult;

pub(crate) fn clamp_score(value: Decimal) -> Score {
    value.max(Decimal::ZERO).min(Decimal::ONE_HUNDRED)
}

/// `part / whole` as a 0-100 score; an empty `whole` scores full marks.
fn coverage_score(part: Money, whole: Money) -> Score {
    if whole.is_zero() {
        Decimal::ONE_HUNDRED
    } else {
        clamp_score(part / whole * Decimal::ONE_HUNDRED)
    }
}

// ---------------------------------------------------------------------------
// Savings rate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavingsStatus {
    Poor,
    Fair,
    Good,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAnalysis {
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    /// Negative when spending exceeds income.
    pub monthly_surplus: Money,
    pub savings_rate: Rate,
    pub status: SavingsStatus,
    pub score: Score,
}

pub fn savings_rate(
    plan: &FinancialPlan,
    config: &ScoringConfig,
    warnings: &mut Vec<String>,
) -> SavingsAnalysis {
    let monthly_income = plan.income.monthly_total();
    let monthly_expenses = plan.expenses.monthly_total();
    let monthly_surplus = monthly_income - monthly_expenses;

    let savings_rate = if monthly_income.is_zero() {
        warnings.push("No income recorded; savings rate taken as 0".into());
        Decimal::ZERO
    } else {
        monthly_surplus / monthly_income * Decimal::ONE_HUNDRED
    };

    let status = if savings_rate < config.savings.fair {
        SavingsStatus::Poor
    } else if savings_rate < config.savings.good {
        SavingsStatus::Fair
    } else {
        SavingsStatus::Good
    };

    SavingsAnalysis {
        monthly_income,
        monthly_expenses,
        monthly_surplus,
        savings_rate,
        status,
        score: clamp_score(savings_rate / config.savings.target * Decimal::ONE_HUNDRED),
    }
}

// ---------------------------------------------------------------------------
// Emergency fund
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmergencyFundStatus {
    /// Less than one month of expenses.
    Critical,
    Insufficient,
    Adequate,
    /// At least one and a half times the requirement.
    Excellent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyFundAnalysis {
    pub liquid_assets: Money,
    pub monthly_expenses: Money,
    pub months_covered: Decimal,
    pub months_required: u32,
    pub shortfall: Money,
    pub status: EmergencyFundStatus,
    pub score: Score,
}

pub fn emergency_fund(
    plan: &FinancialPlan,
    config: &ScoringConfig,
    warnings: &mut Vec<String>,
) -> EmergencyFundAnalysis {
    let liquid_assets = plan.net_worth.liquid();
    let monthly_expenses = plan.expenses.monthly_total();
    let months_required = config
        .emergency_months
        .required_for(plan.personal.occupation);
    let required = Decimal::from(months_required);

    if monthly_expenses.is_zero() {
        warnings.push("No monthly expenses recorded; emergency fund treated as sufficient".into());
        return EmergencyFundAnalysis {
            liquid_assets,
            monthly_expenses,
            months_covered: Decimal::ZERO,
            months_required,
            shortfall: Decimal::ZERO,
            status: EmergencyFundStatus::Excellent,
            score: Decimal::ONE_HUNDRED,
        };
    }

    let months_covered = liquid_assets / monthly_expenses;
    let status = if months_covered < Decimal::ONE {
        EmergencyFundStatus::Critical
    } else if months_covered < required {
        EmergencyFundStatus::Insufficient
    } else if months_covered < required * config.emergency_excellent_multiple {
        EmergencyFundStatus::Adequate
    } else {
        EmergencyFundStatus::Excellent
    };

    EmergencyFundAnalysis {
        liquid_assets,
        monthly_expenses,
        months_covered,
        months_required,
        shortfall: (required * monthly_expenses - liquid_assets).max(Decimal::ZERO),
        status,
        score: coverage_score(months_covered, required),
    }
}

// ---------------------------------------------------------------------------
// Insurance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverGap {
    pub recommended: Money,
    pub existing: Money,
    pub gap: Money,
    pub is_adequate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceAnalysis {
    pub term: CoverGap,
    pub health: CoverGap,
    pub score: Score,
}

pub fn insurance(
    plan: &FinancialPlan,
    config: &InsuranceConfig,
    warnings: &mut Vec<String>,
) -> FinHealthResult<InsuranceAnalysis> {
    let future_goals: Money = plan
        .goals
        .iter()
        .filter(|g| g.goal_type != GoalType::Retirement)
        .map(|g| g.target_amount)
        .sum();

    let term = term_insurance_need(
        &TermInsuranceInput {
            age: plan.personal.age,
            retirement_age: plan.personal.retirement_age,
            annual_income: plan.income.annual_total(),
            annual_expenses: plan.expenses.monthly_living() * Decimal::from(12u32),
            income_growth_rate: plan.assumptions.income_growth,
            expense_growth_rate: plan.assumptions.inflation,
            discount_rate: plan.assumptions.discount_rate,
            outstanding_loans: plan.net_worth.outstanding_loans,
            future_goals,
            existing_cover: plan.insurance.existing_term_cover,
        },
        &config.term,
    )?;
    warnings.extend(term.warnings);
    let term = term.result;

    let health = health_insurance_need(
        &HealthInsuranceInput {
            age: plan.personal.age,
            city_tier: plan.insurance.city_tier,
            family_size: plan.insurance.dependents + 1,
            pre_existing_conditions: plan.insurance.pre_existing_conditions,
            personal_cover: plan.insurance.existing_health_cover,
            corporate_cover: plan.insurance.corporate_health_cover,
        },
        &config.health,
    )?;
    warnings.extend(health.warnings);
    let health = health.result;

    let term_score = if plan.insurance.dependents == 0 && term.is_adequate {
        Decimal::ONE_HUNDRED
    } else {
        coverage_score(term.existing_cover, term.recommended_cover)
    };
    let health_score = coverage_score(health.current_cover, health.recommended_cover);

    Ok(InsuranceAnalysis {
        term: CoverGap {
            recommended: term.recommended_cover,
            existing: term.existing_cover,
            gap: term.gap,
            is_adequate: term.is_adequate,
        },
        health: CoverGap {
            recommended: health.recommended_cover,
            existing: health.current_cover,
            gap: health.gap,
            is_adequate: health.is_adequate,
        },
        score: (term_score + health_score) / dec!(2),
    })
}

// ---------------------------------------------------------------------------
// Retirement readiness
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementReadiness {
    pub years_to_retirement: u32,
    pub corpus_needed: Money,
    pub projected_corpus: Money,
    pub gap: Money,
    pub required_monthly_sip: Money,
    pub required_step_up_sip: Money,
    pub surplus_or_shortfall: Money,
    pub depletion_age: Option<u32>,
    pub score: Score,
}

fn retirement_input(plan: &FinancialPlan) -> RetirementInput {
    RetirementInput {
        current_age: plan.personal.age,
        retirement_age: plan.personal.retirement_age,
        life_expectancy: plan.personal.life_expectancy,
        current_monthly_expenses: plan.expenses.monthly_living(),
        current_savings: plan.net_worth.retirement_savings,
        monthly_sip: plan.retirement.monthly_sip,
        step_up_rate: plan.retirement.step_up_rate,
        monthly_pension: plan.retirement.monthly_pension,
        inflation_rate: plan.assumptions.inflation,
        pre_retirement_return: plan.assumptions.pre_retirement_return,
        post_retirement_return: plan.assumptions.post_retirement_return,
    }
}

pub fn retirement(
    plan: &FinancialPlan,
    warnings: &mut Vec<String>,
) -> FinHealthResult<RetirementReadiness> {
    let result = retirement_corpus(&retirement_input(plan))?;
    warnings.extend(result.warnings);
    let r = result.result;

    Ok(RetirementReadiness {
        years_to_retirement: r.years_to_retirement,
        corpus_needed: r.corpus_needed,
        projected_corpus: r.projected_corpus,
        gap: r.gap,
        required_monthly_sip: r.required_monthly_sip,
        required_step_up_sip: r.required_step_up_sip,
        surplus_or_shortfall: r.surplus_or_shortfall,
        depletion_age: r.depletion_age,
        score: coverage_score(r.projected_corpus, r.corpus_needed),
    })
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

/// Mutual fund category suited to a goal's horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundCategory {
    /// Up to 3 years.
    LiquidOrShortDebt,
    /// Over 3, up to 5 years.
    Hybrid,
    /// Over 5, up to 7 years.
    LargeOrFlexiCap,
    FlexiOrMidCapEquity,
}

impl FundCategory {
    pub fn for_horizon(years: u32, bands: &FundHorizonBands) -> Self {
        if years <= bands.liquid_or_short_debt {
            FundCategory::LiquidOrShortDebt
        } else if years <= bands.hybrid {
            FundCategory::Hybrid
        } else if years <= bands.large_or_flexi_cap {
            FundCategory::LargeOrFlexiCap
        } else {
            FundCategory::FlexiOrMidCapEquity
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalFeasibility {
    pub name: String,
    pub goal_type: GoalType,
    pub years_remaining: u32,
    pub inflated_target: Money,
    /// Existing savings plus the current contribution, at the target date.
    pub current_projection: Money,
    /// Level SIP that reaches the target from existing savings alone.
    pub required_monthly_sip: Money,
    /// inflated_target - current_projection
    pub gap: Money,
    pub is_on_track: bool,
    pub suggested_fund_category: FundCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalsAnalysis {
    pub goals: Vec<GoalFeasibility>,
    pub on_track: usize,
    pub score: Score,
}

fn goal_feasibility(
    plan: &FinancialPlan,
    goal: &Goal,
    education: &EducationConfig,
    fund_horizons: &FundHorizonBands,
    warnings: &mut Vec<String>,
) -> FinHealthResult<GoalFeasibility> {
    let a = &plan.assumptions;

    let (years, inflated_target, current_projection, required_monthly_sip) = match goal.goal_type {
        GoalType::Retirement => {
            let input = RetirementInput {
                current_savings: goal.existing_savings,
                monthly_sip: goal.monthly_contribution,
                step_up_rate: Decimal::ZERO,
                ..retirement_input(plan)
            };
            let r = retirement_corpus(&input)?.result;
            (
                r.years_to_retirement,
                r.corpus_needed,
                r.projected_corpus,
                r.required_monthly_sip,
            )
        }
        goal_type => {
            let years = goal.years_from(plan.as_of).unwrap_or_else(|| {
                warnings.push(format!(
                    "Goal '{}' target year {} is not after {}; horizon clamped to 1 year",
                    goal.name,
                    goal.target_year,
                    plan.as_of
                ));
                1
            });
            let months = horizon_months("goals.target_year", years)?;
            let (inflated_target, required_monthly_sip) = if goal_type == GoalType::Education {
                let input = EducationInput {
                    child_age: 0,
                    goal_age: years,
                    course: None,
                    current_cost: Some(goal.target_amount),
                    current_savings: goal.existing_savings,
                    education_inflation: a.education_inflation,
                    expected_return: a.expected_return,
                };
                let p = project_education(&input, education, warnings)?;
                (p.future_cost, p.required_monthly_sip)
            } else {
                let inflated = future_value_lump_sum(goal.target_amount, a.inflation, years)?;
                let g = generic_goal(&GoalInput {
                    current_savings: goal.existing_savings,
                    target_amount: inflated,
                    years,
                    annual_return: a.expected_return,
                })?;
                (inflated, g.result.monthly_sip)
            };
            let projection = future_value_lump_sum(goal.existing_savings, a.expected_return, years)?
                + future_value_of_series(goal.monthly_contribution, a.expected_return, months)?;
            (years, inflated_target, projection, required_monthly_sip)
        }
    };

    let gap = inflated_target - current_projection;
    Ok(GoalFeasibility {
        name: goal.name.clone(),
        goal_type: goal.goal_type,
        years_remaining: years,
        inflated_target,
        current_projection,
        required_monthly_sip,
        gap,
        is_on_track: gap <= Decimal::ZERO,
        suggested_fund_category: FundCategory::for_horizon(years, fund_horizons),
    })
}

pub fn goals(
    plan: &FinancialPlan,
    education: &EducationConfig,
    scoring: &ScoringConfig,
    warnings: &mut Vec<String>,
) -> FinHealthResult<GoalsAnalysis> {
    let goals = plan
        .goals
        .iter()
        .map(|goal| goal_feasibility(plan, goal, education, &scoring.fund_horizons, warnings))
        .collect::<FinHealthResult<Vec<_>>>()?;

    let on_track = goals.iter().filter(|g| g.is_on_track).count();
    let score = if goals.is_empty() {
        Decimal::ONE_HUNDRED
    } else {
        let total: Decimal = goals
            .iter()
            .map(|g| coverage_score(g.current_projection, g.inflated_target))
            .sum();
        total / Decimal::from(goals.len())
    };

    Ok(GoalsAnalysis {
        goals,
        on_track,
        score,
    })
}

// ---------------------------------------------------------------------------
// Tax efficiency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxEfficiency {
    /// Claimed amounts within the capped investment sections.
    pub deductions_used: Money,
    pub deductions_available: Money,
    pub current_regime: TaxRegime,
    pub current_tax: Money,
    /// Cheaper regime for the deductions already claimed.
    pub recommended_regime: TaxRegime,
    pub recommended_tax: Money,
    /// Cheapest liability with every capped section filled.
    pub optimized_tax: Money,
    pub potential_tax_savings: Money,
    pub regime_switch_savings: Money,
    pub huf_split_savings: Money,
    pub score: Score,
}

pub fn tax_efficiency(
    plan: &FinancialPlan,
    config: &TaxConfig,
    warnings: &mut Vec<String>,
) -> FinHealthResult<TaxEfficiency> {
    let gross = plan.income.annual_total();
    let deductions = &plan.tax.deductions;
    let caps = &config.old_regime.deduction_caps;

    let (deductions_used, deductions_available) = deductions.utilisation(caps);

    let recommended = best_regime_tax(gross, deductions, Taxpayer::Individual, config)?;
    let current = match plan.tax.current_regime {
        Some(regime) => regime_tax(gross, deductions, regime, Taxpayer::Individual, config)?,
        None => recommended.clone(),
    };
    let maximised: Deductions = deductions.maximised(caps);
    let optimized = best_regime_tax(gross, &maximised, Taxpayer::Individual, config)?;

    let potential_tax_savings = (current.total_tax() - optimized.total_tax()).max(Decimal::ZERO);
    let regime_switch_savings = (current.total_tax() - recommended.total_tax()).max(Decimal::ZERO);

    let huf_split_savings = match plan.tax.huf_income {
        Some(huf_income) if !huf_income.is_zero() => {
            let split = income_split_benefit(
                &IncomeSplitInput {
                    individual_income: gross,
                    huf_income,
                    individual_deductions: deductions.clone(),
                    huf_deductions: Deductions::default(),
                },
                config,
            )?;
            warnings.extend(split.warnings);
            split.result.family_savings
        }
        _ => Decimal::ZERO,
    };

    // Deductions only matter if they can make the old regime win.
    let score = if optimized.regime == TaxRegime::New {
        Decimal::ONE_HUNDRED
    } else {
        coverage_score(deductions_used, deductions_available)
    };

    Ok(TaxEfficiency {
        deductions_used,
        deductions_available,
        current_regime: current.regime,
        current_tax: current.total_tax(),
        recommended_regime: recommended.regime,
        recommended_tax: recommended.total_tax(),
        optimized_tax: optimized.total_tax(),
        potential_tax_savings,
        regime_switch_savings,
        huf_split_savings,
        score,
    })
}

// ---------------------------------------------------------------------------
// Debt
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebtStatus {
    Healthy,
    Manageable,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAnalysis {
    pub monthly_emi: Money,
    pub debt_to_income: Rate,
    pub outstanding_loans: Money,
    pub status: DebtStatus,
    pub score: Score,
}

pub fn debt(plan: &FinancialPlan, config: &ScoringConfig) -> DebtAnalysis {
    let monthly_emi = plan.expenses.monthly_emi;
    let monthly_income = plan.income.monthly_total();
    let healthy = config.debt.healthy;
    let manageable = config.debt.manageable;
    let curve = &config.debt_curve;

    let debt_to_income = if monthly_emi.is_zero() {
        Decimal::ZERO
    } else if monthly_income.is_zero() {
        Decimal::ONE_HUNDRED
    } else {
        monthly_emi / monthly_income * Decimal::ONE_HUNDRED
    };

    let (status, score) = if debt_to_income <= healthy {
        let score = if healthy.is_zero() {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ONE_HUNDRED
                - debt_to_income / healthy * (Decimal::ONE_HUNDRED - curve.healthy_floor)
        };
        (DebtStatus::Healthy, score)
    } else if debt_to_income <= manageable {
        let span = curve.healthy_floor - curve.manageable_floor;
        let score =
            curve.healthy_floor - (debt_to_income - healthy) / (manageable - healthy) * span;
        (DebtStatus::Manageable, score)
    } else {
        let excess = debt_to_income - manageable;
        (
            DebtStatus::High,
            curve.manageable_floor - excess * curve.high_penalty_per_point,
        )
    };

    DebtAnalysis {
        monthly_emi,
        debt_to_income,
        outstanding_loans: plan.net_worth.outstanding_loans,
        status,
        score: clamp_score(score),
    }
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationAnalysis {
    pub current: AssetAllocation,
    pub recommended: AssetAllocation,
    /// |current equity - recommended equity|, percentage points.
    pub equity_drift: Rate,
    pub needs_rebalance: bool,
    pub score: Score,
}

/// Current mix of financial assets. Fixed deposits and retirement balances
/// count as debt; real estate is excluded. Cash absorbs rounding so the
/// buckets sum to exactly 100.
pub fn current_allocation(plan: &FinancialPlan) -> AssetAllocation {
    let nw = &plan.net_worth;
    let equity = nw.equity_investments;
    let debt = nw.debt_investments + nw.fixed_deposits + nw.retirement_savings;
    let gold = nw.gold;
    let total = equity + debt + gold + nw.cash_and_savings;

    if total.is_zero() {
        return AssetAllocation {
            equity: Decimal::ZERO,
            debt: Decimal::ZERO,
            gold: Decimal::ZERO,
            cash: Decimal::ONE_HUNDRED,
        };
    }
    let pct = |amount: Money| {
        (amount / total * Decimal::ONE_HUNDRED).round_dp_with_strategy(2, RoundingStrategy::ToZero)
    };
    let (equity, debt, gold) = (pct(equity), pct(debt), pct(gold));
    AssetAllocation {
        equity,
        debt,
        gold,
        cash: Decimal::ONE_HUNDRED - equity - debt - gold,
    }
}

pub fn allocation(
    plan: &FinancialPlan,
    targets: &AllocationConfig,
    config: &ScoringConfig,
) -> AllocationAnalysis {
    let current = current_allocation(plan);
    let recommended = targets.target_for(plan.risk_profile).clone();
    let equity_drift = (current.equity - recommended.equity).abs();

    AllocationAnalysis {
        needs_rebalance: equity_drift > config.allocation_drift_threshold,
        score: clamp_score(Decimal::ONE_HUNDRED - equity_drift * config.allocation_drift_penalty),
        current,
        recommended,
        equity_drift,
    }
}
