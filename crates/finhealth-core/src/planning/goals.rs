use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{
    checked_product, compound, fraction, future_value_lump_sum, future_value_of_series,
    horizon_months, monthly_rate, require_horizon, require_non_negative, require_rate,
    required_monthly_contribution,
};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinHealthResult;

// ---------------------------------------------------------------------------
// Generic goal
// ---------------------------------------------------------------------------

/// A house, car, wedding or custom goal. `target_amount` is the amount
/// needed at the end of `years`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalInput {
    #[serde(default)]
    pub current_savings: Money,
    pub target_amount: Money,
    pub years: u32,
    pub annual_return: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalOutput {
    pub years: u32,
    pub future_value_of_savings: Money,
    pub monthly_sip: Money,
    /// Current savings plus every SIP instalment.
    pub total_invested: Money,
    pub total_value: Money,
}

pub fn generic_goal(input: &GoalInput) -> FinHealthResult<ComputationOutput<GoalOutput>> {
    let mut warnings: Vec<String> = Vec::new();
    require_non_negative("current_savings", input.current_savings)?;
    require_non_negative("target_amount", input.target_amount)?;
    require_rate("annual_return", input.annual_return)?;

    let years = input.years.max(1);
    if input.years == 0 {
        warnings.push("Goal horizon of 0 years clamped to 1".into());
    }
    let months = horizon_months("years", years)?;

    let future_value_of_savings =
        future_value_lump_sum(input.current_savings, input.annual_return, years)?;
    let monthly_sip = required_monthly_contribution(
        input.target_amount,
        future_value_of_savings,
        input.annual_return,
        months,
    )?;
    let total_invested = input.current_savings + monthly_sip * Decimal::from(months);
    let total_value =
        future_value_of_savings + future_value_of_series(monthly_sip, input.annual_return, months)?;

    if future_value_of_savings >= input.target_amount && !input.target_amount.is_zero() {
        warnings.push("Current savings already cover the goal".into());
    }
    debug!("generic goal: years={years} sip={monthly_sip} value={total_value}");

    Ok(with_metadata(
        "Goal SIP (lump-sum growth plus level monthly annuity)",
        &serde_json::json!({
            "annual_return": input.annual_return.to_string(),
            "contribution_timing": "month end",
        }),
        warnings,
        GoalOutput {
            years,
            future_value_of_savings,
            monthly_sip,
            total_invested,
            total_value,
        },
    ))
}

// ---------------------------------------------------------------------------
// SIP calculator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_investment: Money,
    pub annual_return: Rate,
    pub years: u32,
    /// Yearly increase of the instalment, percent.
    #[serde(default)]
    pub step_up_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipYear {
    pub year: u32,
    pub monthly_investment: Money,
    pub invested_to_date: Money,
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipOutput {
    pub total_invested: Money,
    pub total_value: Money,
    pub estimated_returns: Money,
    pub yearly: Vec<SipYear>,
}

/// Value of a monthly SIP, optionally stepped up once a year.
pub fn sip_projection(input: &SipInput) -> FinHealthResult<ComputationOutput<SipOutput>> {
    require_non_negative("monthly_investment", input.monthly_investment)?;
    require_rate("annual_return", input.annual_return)?;
    require_rate("step_up_rate", input.step_up_rate)?;
    let years = require_horizon("years", input.years)?;

    let year_factor = compound(monthly_rate(input.annual_return), 12)?;
    let step_up_factor = Decimal::ONE + fraction(input.step_up_rate);

    let mut yearly = Vec::with_capacity(years as usize);
    let mut instalment = input.monthly_investment;
    let mut invested = Decimal::ZERO;
    let mut value = Decimal::ZERO;
    for year in 1..=years {
        value = checked_product(value, year_factor, "SIP projection")?
            + future_value_of_series(instalment, input.annual_return, 12)?;
        invested += instalment * Decimal::from(12u32);
        yearly.push(SipYear {
            year,
            monthly_investment: instalment,
            invested_to_date: invested,
            value,
        });
        instalment = checked_product(instalment, step_up_factor, "SIP step-up")?;
    }

    let output = SipOutput {
        total_invested: invested,
        total_value: value,
        estimated_returns: value - invested,
        yearly,
    };

    Ok(with_metadata(
        "SIP future value (monthly compounding, yearly step-up)",
        &serde_json::json!({
            "annual_return": input.annual_return.to_string(),
            "step_up_rate": input.step_up_rate.to_string(),
            "contribution_timing": "month end",
        }),
        Vec::new(),
        output,
    ))
}
