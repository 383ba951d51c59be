use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FinHealthError;
use crate::types::{Money, Rate};
use crate::FinHealthResult;

const MONTHS_PER_YEAR: u32 = 12;

/// Longest horizon, in years, any projection accepts.
pub const MAX_HORIZON_YEARS: u32 = 120;

// ---------------------------------------------------------------------------
// Rate conversion and validation helpers
// ---------------------------------------------------------------------------

/// Annual percentage to a fractional rate (12 -> 0.12).
pub fn fraction(rate: Rate) -> Decimal {
    rate / dec!(100)
}

/// Annual percentage to a fractional monthly rate (12 -> 0.01).
pub fn monthly_rate(annual_rate: Rate) -> Decimal {
    annual_rate / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Compute (1 + r)^n for a fractional r via iterative multiplication
/// (avoids Decimal::powd drift). Overflow is reported, not panicked on.
pub(crate) fn compound(rate: Decimal, n: u32) -> FinHealthResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result
            .checked_mul(factor)
            .ok_or_else(|| FinHealthError::ArithmeticOverflow {
                context: format!("compounding {rate} over {n} periods"),
            })?;
    }
    Ok(result)
}

pub(crate) fn checked_product(a: Decimal, b: Decimal, context: &str) -> FinHealthResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| FinHealthError::ArithmeticOverflow {
            context: context.into(),
        })
}

pub(crate) fn require_non_negative(field: &str, value: Money) -> FinHealthResult<()> {
    if value < Decimal::ZERO {
        return Err(FinHealthError::invalid(field, "must be >= 0"));
    }
    Ok(())
}

pub(crate) fn require_rate(field: &str, rate: Rate) -> FinHealthResult<()> {
    if rate <= dec!(-100) {
        return Err(FinHealthError::invalid(field, "rate must be greater than -100%"));
    }
    Ok(())
}

pub(crate) fn require_horizon(field: &str, years: u32) -> FinHealthResult<u32> {
    if years > MAX_HORIZON_YEARS {
        return Err(FinHealthError::invalid(
            field,
            format!("horizon of {years} years exceeds {MAX_HORIZON_YEARS}"),
        ));
    }
    Ok(years)
}

/// Months in a horizon of `years`, bounded by [`MAX_HORIZON_YEARS`].
pub(crate) fn horizon_months(field: &str, years: u32) -> FinHealthResult<u32> {
    require_horizon(field, years)?
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| FinHealthError::invalid(field, "horizon in months overflows"))
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Future value of a lump sum compounded annually:
/// `principal * (1 + rate/100)^years`.
pub fn future_value_lump_sum(principal: Money, annual_rate: Rate, years: u32) -> FinHealthResult<Money> {
    require_non_negative("principal", principal)?;
    require_rate("annual_rate", annual_rate)?;

    if years == 0 {
        return Ok(principal);
    }

    let factor = compound(fraction(annual_rate), years)?;
    checked_product(principal, factor, "lump sum future value")
}

/// Future value of a level monthly contribution stream (ordinary annuity,
/// contributions at month end): `c * ((1+r)^n - 1) / r` with `r = rate/100/12`.
/// A zero rate degrades to `c * n`.
pub fn future_value_of_series(
    monthly_contribution: Money,
    annual_rate: Rate,
    months: u32,
) -> FinHealthResult<Money> {
    require_non_negative("monthly_contribution", monthly_contribution)?;
    require_rate("annual_rate", annual_rate)?;

    if months == 0 {
        return Ok(Decimal::ZERO);
    }

    let r = monthly_rate(annual_rate);
    if r.is_zero() {
        return Ok(monthly_contribution * Decimal::from(months));
    }

    let factor = compound(r, months)?;
    let annuity_factor = (factor - Decimal::ONE) / r;
    checked_product(monthly_contribution, annuity_factor, "series future value")
}

/// Level monthly contribution needed so that `existing_future_value` plus the
/// contribution stream reaches `target_amount` after `months`.
/// No shortfall means no contribution: the result is never negative.
pub fn required_monthly_contribution(
    target_amount: Money,
    existing_future_value: Money,
    annual_rate: Rate,
    months: u32,
) -> FinHealthResult<Money> {
    require_non_negative("target_amount", target_amount)?;
    require_non_negative("existing_future_value", existing_future_value)?;
    require_rate("annual_rate", annual_rate)?;

    let shortfall = target_amount - existing_future_value;
    if shortfall <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    if months == 0 {
        return Err(FinHealthError::invalid(
            "months",
            "a shortfall needs at least one contribution month",
        ));
    }

    let r = monthly_rate(annual_rate);
    if r.is_zero() {
        return Ok(shortfall / Decimal::from(months));
    }

    let factor = compound(r, months)?;
    let annuity_factor = (factor - Decimal::ONE) / r;
    Ok(shortfall / annuity_factor)
}

/// Present value of an annual amount growing at `growth_rate`, received at
/// each year end for `years`, discounted at `discount_rate`:
/// `sum_t base * (1+g)^(t-1) / (1+d)^t`.
///
/// When growth equals discount the closed-form ratio is 0/0; the limit
/// `base * years / (1+d)` is returned instead.
pub fn present_value_growing_annuity(
    base_amount: Money,
    growth_rate: Rate,
    discount_rate: Rate,
    years: u32,
) -> FinHealthResult<Money> {
    require_non_negative("base_amount", base_amount)?;
    require_rate("growth_rate", growth_rate)?;
    require_rate("discount_rate", discount_rate)?;

    if years == 0 || base_amount.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let g = fraction(growth_rate);
    let d = fraction(discount_rate);
    let one_plus_d = Decimal::ONE + d;

    if g == d {
        return Ok(base_amount * Decimal::from(years) / one_plus_d);
    }

    let ratio = (Decimal::ONE + g) / one_plus_d;
    let ratio_n = compound(ratio - Decimal::ONE, years)?;
    Ok(base_amount / (d - g) * (Decimal::ONE - ratio_n))
}
