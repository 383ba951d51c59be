use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, GradeBands, ScoringWeights};
use crate::scoring::dimensions::{
    self, clamp_score, AllocationAnalysis, DebtAnalysis, DebtStatus, EmergencyFundAnalysis,
    EmergencyFundStatus, GoalsAnalysis, InsuranceAnalysis, RetirementReadiness, SavingsAnalysis,
    SavingsStatus, TaxEfficiency,
};
use crate::scoring::plan::FinancialPlan;
use crate::types::{with_metadata, ComputationOutput, Score};
use crate::FinHealthResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl Grade {
    pub fn from_score(score: Score, bands: &GradeBands) -> Self {
        if score >= bands.excellent {
            Grade::Excellent
        } else if score >= bands.good {
            Grade::Good
        } else if score >= bands.fair {
            Grade::Fair
        } else {
            Grade::NeedsAttention
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub savings_rate: Score,
    pub emergency_fund: Score,
    pub insurance: Score,
    pub retirement: Score,
    pub goals: Score,
    pub tax_efficiency: Score,
    pub debt: Score,
    pub allocation: Score,
}

impl DimensionScores {
    pub fn weighted(&self, w: &ScoringWeights) -> Score {
        self.savings_rate * w.savings_rate
            + self.emergency_fund * w.emergency_fund
            + self.insurance * w.insurance
            + self.retirement * w.retirement
            + self.goals * w.goals
            + self.tax_efficiency * w.tax_efficiency
            + self.debt * w.debt
            + self.allocation * w.allocation
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAnalysis {
    pub as_of: NaiveDate,
    pub overall_score: Score,
    pub grade: Grade,
    pub dimension_scores: DimensionScores,
    pub savings: SavingsAnalysis,
    pub emergency_fund: EmergencyFundAnalysis,
    pub insurance: InsuranceAnalysis,
    pub retirement: RetirementReadiness,
    pub goals: GoalsAnalysis,
    pub tax: TaxEfficiency,
    pub debt: DebtAnalysis,
    pub allocation: AllocationAnalysis,
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

fn recommendations(a: &FinancialAnalysis, config: &EngineConfig) -> Vec<String> {
    let mut out = Vec::new();

    if a.savings.status != SavingsStatus::Good {
        out.push(format!(
            "Raise the savings rate from {}% towards {}% of income",
            a.savings.savings_rate.round_dp(1),
            config.scoring.savings.target
        ));
    }
    match a.emergency_fund.status {
        EmergencyFundStatus::Critical | EmergencyFundStatus::Insufficient => out.push(format!(
            "Build the emergency fund by {} to cover {} months of expenses",
            a.emergency_fund.shortfall.round_dp(0),
            a.emergency_fund.months_required
        )),
        EmergencyFundStatus::Adequate | EmergencyFundStatus::Excellent => {}
    }
    if !a.insurance.term.is_adequate {
        out.push(format!(
            "Increase term life cover by {}",
            a.insurance.term.gap.round_dp(0)
        ));
    }
    if !a.insurance.health.is_adequate {
        out.push(format!(
            "Increase health cover by {}",
            a.insurance.health.gap.round_dp(0)
        ));
    }
    if a.retirement.surplus_or_shortfall < Decimal::ZERO {
        out.push(format!(
            "Start a retirement SIP of {} a month, or {} stepped up yearly",
            a.retirement.required_monthly_sip.round_dp(0),
            a.retirement.required_step_up_sip.round_dp(0)
        ));
    }
    for goal in a.goals.goals.iter().filter(|g| !g.is_on_track) {
        out.push(format!(
            "Goal '{}' is off track: invest {} a month in {:?} funds",
            goal.name,
            goal.required_monthly_sip.round_dp(0),
            goal.suggested_fund_category
        ));
    }
    if a.tax.regime_switch_savings > Decimal::ZERO {
        out.push(format!(
            "Switch to the {:?} regime to save {} in tax",
            a.tax.recommended_regime, a.tax.regime_switch_savings
        ));
    }
    if a.tax.potential_tax_savings > a.tax.regime_switch_savings {
        out.push(format!(
            "Use remaining deduction limits to save up to {} in tax",
            a.tax.potential_tax_savings
        ));
    }
    if a.tax.huf_split_savings > Decimal::ZERO {
        out.push(format!(
            "Routing eligible income through the HUF saves {} in tax",
            a.tax.huf_split_savings
        ));
    }
    if a.debt.status == DebtStatus::High {
        out.push(format!(
            "Loan EMIs take {}% of income; prepay or consolidate debt",
            a.debt.debt_to_income.round_dp(1)
        ));
    }
    if a.allocation.needs_rebalance {
        out.push(format!(
            "Rebalance equity from {}% towards {}%",
            a.allocation.current.equity, a.allocation.recommended.equity
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Score every health dimension of `plan` and combine them into an
/// overall score and grade.
pub fn score(
    plan: &FinancialPlan,
    config: &EngineConfig,
) -> FinHealthResult<ComputationOutput<FinancialAnalysis>> {
    let mut warnings: Vec<String> = Vec::new();
    let analysis = score_plan(plan, config, &mut warnings)?;

    Ok(with_metadata(
        "Weighted eight-dimension financial health score",
        &serde_json::json!({
            "as_of": plan.as_of.to_string(),
            "fiscal_year": config.tax.fiscal_year,
            "weights": config.scoring.weights,
            "assumptions": plan.assumptions,
        }),
        warnings,
        analysis,
    ))
}

pub(crate) fn score_plan(
    plan: &FinancialPlan,
    config: &EngineConfig,
    warnings: &mut Vec<String>,
) -> FinHealthResult<FinancialAnalysis> {
    config.validate()?;
    plan.validate()?;

    let savings = dimensions::savings_rate(plan, &config.scoring, warnings);
    let emergency_fund = dimensions::emergency_fund(plan, &config.scoring, warnings);
    let insurance = dimensions::insurance(plan, &config.insurance, warnings)?;
    let retirement = dimensions::retirement(plan, warnings)?;
    let goals = dimensions::goals(plan, &config.education, &config.scoring, warnings)?;
    let tax = dimensions::tax_efficiency(plan, &config.tax, warnings)?;
    let debt = dimensions::debt(plan, &config.scoring);
    let allocation = dimensions::allocation(plan, &config.allocation, &config.scoring);

    let dimension_scores = DimensionScores {
        savings_rate: savings.score,
        emergency_fund: emergency_fund.score,
        insurance: insurance.score,
        retirement: retirement.score,
        goals: goals.score,
        tax_efficiency: tax.score,
        debt: debt.score,
        allocation: allocation.score,
    };
    let overall_score = clamp_score(dimension_scores.weighted(&config.scoring.weights)).round_dp(2);
    let grade = Grade::from_score(overall_score, &config.scoring.grades);
    debug!("financial health: overall={overall_score} grade={grade:?}");

    let mut analysis = FinancialAnalysis {
        as_of: plan.as_of,
        overall_score,
        grade,
        dimension_scores,
        savings,
        emergency_fund,
        insurance,
        retirement,
        goals,
        tax,
        debt,
        allocation,
        recommendations: Vec::new(),
    };
    analysis.recommendations = recommendations(&analysis, config);
    Ok(analysis)
}
