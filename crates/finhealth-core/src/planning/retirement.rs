use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::FinHealthError;
use crate::time_value::{
    checked_product, compound, fraction, future_value_lump_sum, future_value_of_series,
    horizon_months, monthly_rate, present_value_growing_annuity, require_horizon,
    require_non_negative, require_rate, required_monthly_contribution,
};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinHealthResult;

/// A drawdown balance below minus this amount counts as exhausted.
const DEPLETION_TOLERANCE: Decimal = Decimal::ONE;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    /// Household expenses today, per month.
    pub current_monthly_expenses: Money,
    /// Savings already earmarked for retirement.
    pub current_savings: Money,
    #[serde(default)]
    pub monthly_sip: Money,
    /// Yearly increase of the SIP amount, percent.
    #[serde(default)]
    pub step_up_rate: Rate,
    /// Pension in today's money, per month. Indexed to inflation.
    #[serde(default)]
    pub monthly_pension: Money,
    pub inflation_rate: Rate,
    pub pre_retirement_return: Rate,
    pub post_retirement_return: Rate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Accumulation,
    Retirement,
}

/// Corpus at the start of one year of age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusYear {
    pub age: u32,
    pub corpus: Money,
    pub phase: Phase,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetirementOutput {
    pub years_to_retirement: u32,
    pub years_in_retirement: u32,
    pub monthly_expenses_at_retirement: Money,
    /// Expenses at retirement less the indexed pension.
    pub monthly_draw_at_retirement: Money,
    pub corpus_needed: Money,
    pub future_value_of_current_savings: Money,
    /// Current savings plus the current SIP, at retirement.
    pub projected_corpus: Money,
    pub gap: Money,
    pub required_monthly_sip: Money,
    /// First-year amount of a SIP stepped up at `step_up_rate` that closes `gap`.
    pub required_step_up_sip: Money,
    /// projected_corpus - corpus_needed
    pub surplus_or_shortfall: Money,
    /// Age at which the projected corpus runs out, if before life expectancy.
    pub depletion_age: Option<u32>,
    pub yearly_breakdown: CorpusProjection,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct ProjectionParams {
    retirement_age: u32,
    life_expectancy: u32,
    pre_retirement_return: Rate,
    post_retirement_return: Rate,
    /// 1 + pre, applied to the lump sum once a year.
    savings_year_factor: Decimal,
    /// (1 + pre/12)^12, applied to the SIP pot once a year.
    sip_year_factor: Decimal,
    /// 1 + post
    drawdown_year_factor: Decimal,
    step_up_factor: Decimal,
    inflation_factor: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
struct CorpusState {
    age: u32,
    lump_sum: Money,
    sip_pot: Money,
    monthly_sip: Money,
    balance: Money,
    monthly_draw: Money,
    exhausted: bool,
}

impl ProjectionParams {
    fn step(&self, state: &CorpusState) -> FinHealthResult<CorpusState> {
        let mut next = state.clone();
        next.age = state.age + 1;

        if state.age < self.retirement_age {
            next.lump_sum = checked_product(state.lump_sum, self.savings_year_factor, "savings projection")?;
            let contributions =
                future_value_of_series(state.monthly_sip, self.pre_retirement_return, 12)?;
            next.sip_pot =
                checked_product(state.sip_pot, self.sip_year_factor, "SIP projection")? + contributions;
            next.monthly_sip = checked_product(state.monthly_sip, self.step_up_factor, "SIP step-up")?;
            if next.age == self.retirement_age {
                next.balance = next.lump_sum + next.sip_pot;
            }
        } else {
            let withdrawals =
                future_value_of_series(state.monthly_draw, self.post_retirement_return, 12)?;
            let remaining =
                checked_product(state.balance, self.drawdown_year_factor, "drawdown")? - withdrawals;
            next.exhausted = state.exhausted || remaining < -DEPLETION_TOLERANCE;
            next.balance = remaining.max(Decimal::ZERO);
            next.monthly_draw =
                checked_product(state.monthly_draw, self.inflation_factor, "draw indexation")?;
        }
        Ok(next)
    }

    fn year(&self, state: &CorpusState) -> CorpusYear {
        if state.age < self.retirement_age {
            CorpusYear {
                age: state.age,
                corpus: state.lump_sum + state.sip_pot,
                phase: Phase::Accumulation,
            }
        } else {
            CorpusYear {
                age: state.age,
                corpus: state.balance,
                phase: Phase::Retirement,
            }
        }
    }
}

/// Year-by-year corpus from current age to life expectancy, inclusive.
/// Computed on demand; every call to `iter` starts again from the
/// current age.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusProjection {
    params: ProjectionParams,
    start: CorpusState,
}

impl CorpusProjection {
    pub fn iter(&self) -> CorpusYears {
        CorpusYears {
            params: self.params,
            state: Some(self.start.clone()),
        }
    }
}

impl<'a> IntoIterator for &'a CorpusProjection {
    type Item = CorpusYear;
    type IntoIter = CorpusYears;

    fn into_iter(self) -> CorpusYears {
        self.iter()
    }
}

impl Serialize for CorpusProjection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[derive(Debug, Clone)]
pub struct CorpusYears {
    params: ProjectionParams,
    state: Option<CorpusState>,
}

impl Iterator for CorpusYears {
    type Item = CorpusYear;

    fn next(&mut self) -> Option<CorpusYear> {
        let state = self.state.take()?;
        let year = self.params.year(&state);
        if state.age < self.params.life_expectancy {
            // Already walked with checked arithmetic when built.
            self.state = self.params.step(&state).ok();
        }
        Some(year)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate(input: &RetirementInput) -> FinHealthResult<()> {
    if input.retirement_age <= input.current_age {
        return Err(FinHealthError::invalid(
            "retirement_age",
            "retirement_age must be greater than current_age",
        ));
    }
    if input.life_expectancy <= input.retirement_age {
        return Err(FinHealthError::invalid(
            "life_expectancy",
            "life_expectancy must be greater than retirement_age",
        ));
    }
    require_horizon("retirement_age", input.retirement_age - input.current_age)?;
    require_horizon("life_expectancy", input.life_expectancy - input.retirement_age)?;
    require_non_negative("current_monthly_expenses", input.current_monthly_expenses)?;
    require_non_negative("current_savings", input.current_savings)?;
    require_non_negative("monthly_sip", input.monthly_sip)?;
    require_non_negative("monthly_pension", input.monthly_pension)?;
    require_rate("step_up_rate", input.step_up_rate)?;
    require_rate("inflation_rate", input.inflation_rate)?;
    require_rate("pre_retirement_return", input.pre_retirement_return)?;
    require_rate("post_retirement_return", input.post_retirement_return)?;
    Ok(())
}

/// Starting monthly amount of a SIP that rises by `step_up_rate` each year
/// and reaches `gap` after `years`.
fn step_up_starting_sip(
    gap: Money,
    pre_retirement_return: Rate,
    step_up_rate: Rate,
    years: u32,
) -> FinHealthResult<Money> {
    if gap <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    let one_year_of_unit_sip = future_value_of_series(Decimal::ONE, pre_retirement_return, 12)?;
    let sip_year_factor = compound(monthly_rate(pre_retirement_return), 12)?;
    let step_up_factor = Decimal::ONE + fraction(step_up_rate);

    // Horner over the yearly tranches of a unit starting SIP.
    let mut unit_corpus = Decimal::ZERO;
    let mut growth = Decimal::ONE;
    for _ in 0..years {
        unit_corpus = checked_product(unit_corpus, sip_year_factor, "step-up SIP solve")?
            + one_year_of_unit_sip * growth;
        growth = checked_product(growth, step_up_factor, "step-up SIP solve")?;
    }
    Ok(gap / unit_corpus)
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Corpus needed at retirement, what current savings and SIP will build,
/// the SIP that closes the gap, and a year-by-year corpus projection.
pub fn retirement_corpus(
    input: &RetirementInput,
) -> FinHealthResult<ComputationOutput<RetirementOutput>> {
    let mut warnings: Vec<String> = Vec::new();
    validate(input)?;

    let years_to_retirement = input.retirement_age - input.current_age;
    let years_in_retirement = input.life_expectancy - input.retirement_age;
    let months_to_retirement = horizon_months("retirement_age", years_to_retirement)?;

    // --- Target corpus ---
    let monthly_expenses_at_retirement = future_value_lump_sum(
        input.current_monthly_expenses,
        input.inflation_rate,
        years_to_retirement,
    )?;
    let pension_at_retirement =
        future_value_lump_sum(input.monthly_pension, input.inflation_rate, years_to_retirement)?;
    let monthly_draw_at_retirement =
        (monthly_expenses_at_retirement - pension_at_retirement).max(Decimal::ZERO);
    if monthly_draw_at_retirement.is_zero() && !monthly_expenses_at_retirement.is_zero() {
        warnings.push("Pension covers retirement expenses; no corpus is needed".into());
    }

    let first_year_withdrawals =
        future_value_of_series(monthly_draw_at_retirement, input.post_retirement_return, 12)?;
    let corpus_needed = present_value_growing_annuity(
        first_year_withdrawals,
        input.inflation_rate,
        input.post_retirement_return,
        years_in_retirement,
    )?;

    // --- Gap against current savings ---
    let future_value_of_current_savings = future_value_lump_sum(
        input.current_savings,
        input.pre_retirement_return,
        years_to_retirement,
    )?;
    let gap = (corpus_needed - future_value_of_current_savings).max(Decimal::ZERO);
    let required_monthly_sip = required_monthly_contribution(
        corpus_needed,
        future_value_of_current_savings,
        input.pre_retirement_return,
        months_to_retirement,
    )?;
    let required_step_up_sip = step_up_starting_sip(
        gap,
        input.pre_retirement_return,
        input.step_up_rate,
        years_to_retirement,
    )?;

    // --- Projection with the current SIP ---
    let params = ProjectionParams {
        retirement_age: input.retirement_age,
        life_expectancy: input.life_expectancy,
        pre_retirement_return: input.pre_retirement_return,
        post_retirement_return: input.post_retirement_return,
        savings_year_factor: Decimal::ONE + fraction(input.pre_retirement_return),
        sip_year_factor: compound(monthly_rate(input.pre_retirement_return), 12)?,
        drawdown_year_factor: Decimal::ONE + fraction(input.post_retirement_return),
        step_up_factor: Decimal::ONE + fraction(input.step_up_rate),
        inflation_factor: Decimal::ONE + fraction(input.inflation_rate),
    };
    let start = CorpusState {
        age: input.current_age,
        lump_sum: input.current_savings,
        sip_pot: Decimal::ZERO,
        monthly_sip: input.monthly_sip,
        balance: Decimal::ZERO,
        monthly_draw: monthly_draw_at_retirement,
        exhausted: false,
    };

    let mut state = start.clone();
    let mut projected_corpus = Decimal::ZERO;
    let mut depletion_age = None;
    while state.age < input.life_expectancy {
        state = params.step(&state)?;
        if state.age == input.retirement_age {
            projected_corpus = state.balance;
        }
        if state.exhausted && depletion_age.is_none() {
            depletion_age = Some(state.age);
        }
    }
    let surplus_or_shortfall = projected_corpus - corpus_needed;

    if let Some(age) = depletion_age {
        warnings.push(format!(
            "At the current SIP the corpus runs out at age {age}, before life expectancy {}",
            input.life_expectancy
        ));
    }
    if input.post_retirement_return <= input.inflation_rate {
        warnings.push("Post-retirement return does not beat inflation".into());
    }
    debug!(
        "retirement corpus: needed={corpus_needed} projected={projected_corpus} sip={required_monthly_sip}"
    );

    let output = RetirementOutput {
        years_to_retirement,
        years_in_retirement,
        monthly_expenses_at_retirement,
        monthly_draw_at_retirement,
        corpus_needed,
        future_value_of_current_savings,
        projected_corpus,
        gap,
        required_monthly_sip,
        required_step_up_sip,
        surplus_or_shortfall,
        depletion_age,
        yearly_breakdown: CorpusProjection { params, start },
    };

    Ok(with_metadata(
        "Two-phase retirement corpus (monthly SIP accumulation, inflation-indexed drawdown)",
        &serde_json::json!({
            "inflation_rate": input.inflation_rate.to_string(),
            "pre_retirement_return": input.pre_retirement_return.to_string(),
            "post_retirement_return": input.post_retirement_return.to_string(),
            "step_up_rate": input.step_up_rate.to_string(),
            "contribution_timing": "month end",
            "pension_indexation": "inflation",
        }),
        warnings,
        output,
    ))
}
