use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::RebateRule;
use crate::error::FinHealthError;
use crate::time_value::{fraction, require_non_negative};
use crate::types::{Money, Rate, TaxSlab};
use crate::FinHealthResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Breakdown of the tax payable on one taxable income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxComputation {
    pub taxable_income: Money,
    pub gross_tax: Money,
    pub rebate: Money,
    /// Relief just above the rebate threshold, when the rule opts in.
    pub marginal_relief: Money,
    pub cess: Money,
    /// Rounded to the nearest currency unit, halves away from zero.
    pub total_tax: Money,
    /// total_tax as a percentage of taxable income.
    pub effective_rate: Rate,
}

impl TaxComputation {
    /// A successfully computed zero liability.
    pub fn is_nil(&self) -> bool {
        self.total_tax.is_zero()
    }
}

// ---------------------------------------------------------------------------
// Slab table
// ---------------------------------------------------------------------------

/// A slab table must be non-empty, start at 0, and be contiguous with only
/// the last slab unbounded.
pub fn validate_slabs(slabs: &[TaxSlab]) -> FinHealthResult<()> {
    let first = slabs
        .first()
        .ok_or_else(|| FinHealthError::InvalidSlabTable("slab table is empty".into()))?;
    if !first.min.is_zero() {
        return Err(FinHealthError::InvalidSlabTable(format!(
            "first slab must start at 0 (starts at {})",
            first.min
        )));
    }

    for (i, slab) in slabs.iter().enumerate() {
        if slab.rate < Decimal::ZERO {
            return Err(FinHealthError::InvalidSlabTable(format!(
                "slab {i} has a negative rate"
            )));
        }
        if let Some(max) = slab.max {
            if max <= slab.min {
                return Err(FinHealthError::InvalidSlabTable(format!(
                    "slab {i} has max {max} <= min {}",
                    slab.min
                )));
            }
        }
        if i > 0 {
            let prev_max = slabs[i - 1].max.ok_or_else(|| {
                FinHealthError::InvalidSlabTable(format!(
                    "unbounded slab {} must be the last slab",
                    i - 1
                ))
            })?;
            if slab.min != prev_max {
                return Err(FinHealthError::InvalidSlabTable(format!(
                    "slab {i} starts at {} but slab {} ends at {prev_max}",
                    slab.min,
                    i - 1
                )));
            }
        }
    }
    Ok(())
}

/// Tax on `income` under a progressive slab table, taxing only the portion
/// of income that falls inside each bracket.
pub fn slab_tax(income: Money, slabs: &[TaxSlab]) -> FinHealthResult<Money> {
    require_non_negative("income", income)?;
    validate_slabs(slabs)?;

    if let Some(top) = slabs.last().and_then(|s| s.max) {
        if income > top {
            return Err(FinHealthError::ConfigurationDefect(format!(
                "slab table ends at {top} but income is {income}"
            )));
        }
    }

    let mut tax = Decimal::ZERO;
    for slab in slabs {
        if income <= slab.min {
            break;
        }
        let upper = slab.max.map_or(income, |max| income.min(max));
        tax += (upper - slab.min) * fraction(slab.rate);
    }
    Ok(tax)
}

// ---------------------------------------------------------------------------
// Rebate and total
// ---------------------------------------------------------------------------

/// Section 87A rebate: the whole tax up to `cap` when taxable income is at or
/// below `threshold`, otherwise nothing.
pub fn rebate_87a(taxable_income: Money, gross_tax: Money, rule: &RebateRule) -> Money {
    if taxable_income <= rule.threshold {
        gross_tax.min(rule.cap)
    } else {
        Decimal::ZERO
    }
}

/// Relief that limits tax just above the rebate threshold to the income in
/// excess of it. Zero unless `rule.marginal_relief` is set.
pub fn marginal_relief(taxable_income: Money, gross_tax: Money, rule: &RebateRule) -> Money {
    if !rule.marginal_relief || taxable_income <= rule.threshold {
        return Decimal::ZERO;
    }
    let excess_income = taxable_income - rule.threshold;
    (gross_tax - excess_income).max(Decimal::ZERO)
}

/// Gross slab tax, less rebate and any marginal relief, plus cess.
/// `cess_rate` is a percentage.
pub fn total_tax_payable(
    taxable_income: Money,
    slabs: &[TaxSlab],
    rebate_rule: Option<&RebateRule>,
    cess_rate: Rate,
) -> FinHealthResult<TaxComputation> {
    require_non_negative("cess_rate", cess_rate)?;
    let gross_tax = slab_tax(taxable_income, slabs)?;
    let (rebate, marginal_relief) = rebate_rule
        .map(|rule| {
            (
                rebate_87a(taxable_income, gross_tax, rule),
                marginal_relief(taxable_income, gross_tax, rule),
            )
        })
        .unwrap_or((Decimal::ZERO, Decimal::ZERO));

    let after_rebate = (gross_tax - rebate - marginal_relief).max(Decimal::ZERO);
    let cess = after_rebate * fraction(cess_rate);
    let total_tax =
        (after_rebate + cess).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let effective_rate = if taxable_income.is_zero() {
        Decimal::ZERO
    } else {
        total_tax / taxable_income * Decimal::ONE_HUNDRED
    };

    Ok(TaxComputation {
        taxable_income,
        gross_tax,
        rebate,
        marginal_relief,
        cess,
        total_tax,
        effective_rate,
    })
}
