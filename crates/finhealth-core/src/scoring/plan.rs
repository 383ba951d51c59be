use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinHealthError;
use crate::tax::regime::{Deductions, TaxRegime};
use crate::time_value::{require_non_negative, require_rate};
use crate::types::{CityTier, Money, Occupation, Rate, RiskProfile};
use crate::FinHealthResult;

/// One household's complete financial position, evaluated as of `as_of`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPlan {
    pub as_of: NaiveDate,
    pub personal: PersonalProfile,
    pub income: IncomeProfile,
    pub expenses: ExpenseProfile,
    #[serde(default)]
    pub net_worth: NetWorth,
    #[serde(default)]
    pub insurance: InsuranceProfile,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub tax: TaxProfile,
    #[serde(default)]
    pub risk_profile: RiskProfile,
    #[serde(default)]
    pub retirement: RetirementContributions,
    #[serde(default)]
    pub assumptions: Assumptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalProfile {
    pub age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    #[serde(default)]
    pub occupation: Occupation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeProfile {
    pub annual_salary: Money,
    #[serde(default)]
    pub annual_other_income: Money,
}

impl IncomeProfile {
    pub fn annual_total(&self) -> Money {
        self.annual_salary + self.annual_other_income
    }

    pub fn monthly_total(&self) -> Money {
        self.annual_total() / Decimal::from(12u32)
    }
}

/// Monthly outflows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseProfile {
    pub monthly_household: Money,
    #[serde(default)]
    pub monthly_rent: Money,
    /// Loan instalments.
    #[serde(default)]
    pub monthly_emi: Money,
    #[serde(default)]
    pub monthly_other: Money,
}

impl ExpenseProfile {
    /// Everything except loan instalments.
    pub fn monthly_living(&self) -> Money {
        self.monthly_household + self.monthly_rent + self.monthly_other
    }

    pub fn monthly_total(&self) -> Money {
        self.monthly_living() + self.monthly_emi
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetWorth {
    pub cash_and_savings: Money,
    pub fixed_deposits: Money,
    pub equity_investments: Money,
    pub debt_investments: Money,
    /// EPF, PPF, NPS and similar locked-in retirement balances.
    pub retirement_savings: Money,
    pub gold: Money,
    pub real_estate: Money,
    pub outstanding_loans: Money,
}

impl NetWorth {
    /// Money reachable within days: bank balances and fixed deposits.
    pub fn liquid(&self) -> Money {
        self.cash_and_savings + self.fixed_deposits
    }

    pub fn total_assets(&self) -> Money {
        self.cash_and_savings
            + self.fixed_deposits
            + self.equity_investments
            + self.debt_investments
            + self.retirement_savings
            + self.gold
            + self.real_estate
    }

    pub fn net(&self) -> Money {
        self.total_assets() - self.outstanding_loans
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceProfile {
    pub existing_term_cover: Money,
    /// Personal health policies.
    pub existing_health_cover: Money,
    pub corporate_health_cover: Money,
    pub dependents: u32,
    pub pre_existing_conditions: bool,
    pub city_tier: CityTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalType {
    Retirement,
    Education,
    House,
    Car,
    Wedding,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub goal_type: GoalType,
    pub name: String,
    pub target_year: i32,
    /// In today's money.
    pub target_amount: Money,
    #[serde(default)]
    pub existing_savings: Money,
    #[serde(default)]
    pub monthly_contribution: Money,
}

impl Goal {
    /// Whole years from `as_of` to the target year; `None` when the target
    /// year is not in the future.
    pub fn years_from(&self, as_of: NaiveDate) -> Option<u32> {
        self.target_year
            .checked_sub(as_of.year())
            .and_then(|years| u32::try_from(years).ok())
            .filter(|years| *years > 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxProfile {
    pub deductions: Deductions,
    /// Income that could be routed through a HUF.
    pub huf_income: Option<Money>,
    /// Regime the taxpayer currently files under, if known.
    pub current_regime: Option<TaxRegime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetirementContributions {
    pub monthly_sip: Money,
    pub step_up_rate: Rate,
    /// Expected pension in today's money, per month.
    pub monthly_pension: Money,
}

/// Rate assumptions, all annual percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub inflation: Rate,
    pub education_inflation: Rate,
    pub pre_retirement_return: Rate,
    pub post_retirement_return: Rate,
    /// Return on money set aside for non-retirement goals.
    pub expected_return: Rate,
    pub income_growth: Rate,
    pub discount_rate: Rate,
}

impl Default for Assumptions {
    fn default() -> Self {
        Assumptions {
            inflation: dec!(6),
            education_inflation: dec!(10),
            pre_retirement_return: dec!(12),
            post_retirement_return: dec!(7),
            expected_return: dec!(10),
            income_growth: dec!(8),
            discount_rate: dec!(8),
        }
    }
}

impl FinancialPlan {
    pub fn validate(&self) -> FinHealthResult<()> {
        let p = &self.personal;
        if p.retirement_age <= p.age {
            return Err(FinHealthError::invalid(
                "personal.retirement_age",
                "retirement_age must be greater than age",
            ));
        }
        if p.life_expectancy <= p.retirement_age {
            return Err(FinHealthError::invalid(
                "personal.life_expectancy",
                "life_expectancy must be greater than retirement_age",
            ));
        }

        let nw = &self.net_worth;
        let ins = &self.insurance;
        let ret = &self.retirement;
        for (field, amount) in [
            ("income.annual_salary", self.income.annual_salary),
            ("income.annual_other_income", self.income.annual_other_income),
            ("expenses.monthly_household", self.expenses.monthly_household),
            ("expenses.monthly_rent", self.expenses.monthly_rent),
            ("expenses.monthly_emi", self.expenses.monthly_emi),
            ("expenses.monthly_other", self.expenses.monthly_other),
            ("net_worth.cash_and_savings", nw.cash_and_savings),
            ("net_worth.fixed_deposits", nw.fixed_deposits),
            ("net_worth.equity_investments", nw.equity_investments),
            ("net_worth.debt_investments", nw.debt_investments),
            ("net_worth.retirement_savings", nw.retirement_savings),
            ("net_worth.gold", nw.gold),
            ("net_worth.real_estate", nw.real_estate),
            ("net_worth.outstanding_loans", nw.outstanding_loans),
            ("insurance.existing_term_cover", ins.existing_term_cover),
            ("insurance.existing_health_cover", ins.existing_health_cover),
            ("insurance.corporate_health_cover", ins.corporate_health_cover),
            ("retirement.monthly_sip", ret.monthly_sip),
            ("retirement.monthly_pension", ret.monthly_pension),
            ("tax.huf_income", self.tax.huf_income.unwrap_or(Decimal::ZERO)),
        ] {
            require_non_negative(field, amount)?;
        }
        for goal in &self.goals {
            require_non_negative("goals.target_amount", goal.target_amount)?;
            require_non_negative("goals.existing_savings", goal.existing_savings)?;
            require_non_negative("goals.monthly_contribution", goal.monthly_contribution)?;
        }
        self.tax.deductions.validate()?;

        let a = &self.assumptions;
        for (field, rate) in [
            ("assumptions.inflation", a.inflation),
            ("assumptions.education_inflation", a.education_inflation),
            ("assumptions.pre_retirement_return", a.pre_retirement_return),
            ("assumptions.post_retirement_return", a.post_retirement_return),
            ("assumptions.expected_return", a.expected_return),
            ("assumptions.income_growth", a.income_growth),
            ("assumptions.discount_rate", a.discount_rate),
            ("retirement.step_up_rate", ret.step_up_rate),
        ] {
            require_rate(field, rate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A 32-year-old salaried earner in a metro with one child.
    pub(crate) fn sample_plan() -> FinancialPlan {
        FinancialPlan {
            as_of: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            personal: PersonalProfile {
                age: 32,
                retirement_age: 60,
                life_expectancy: 85,
                occupation: Occupation::Salaried,
            },
            income: IncomeProfile {
                annual_salary: dec!(1_800_000),
                annual_other_income: dec!(0),
            },
            expenses: ExpenseProfile {
                monthly_household: dec!(50_000),
                monthly_rent: dec!(25_000),
                monthly_emi: dec!(15_000),
                monthly_other: dec!(10_000),
            },
            net_worth: NetWorth {
                cash_and_savings: dec!(300_000),
                fixed_deposits: dec!(200_000),
                equity_investments: dec!(800_000),
                debt_investments: dec!(200_000),
                retirement_savings: dec!(600_000),
                gold: dec!(100_000),
                real_estate: Decimal::ZERO,
                outstanding_loans: dec!(700_000),
            },
            insurance: InsuranceProfile {
                existing_term_cover: dec!(10_000_000),
                existing_health_cover: dec!(500_000),
                corporate_health_cover: dec!(300_000),
                dependents: 2,
                pre_existing_conditions: false,
                city_tier: CityTier::Tier1,
            },
            goals: vec![
                Goal {
                    goal_type: GoalType::Education,
                    name: "Child's engineering".into(),
                    target_year: 2040,
                    target_amount: dec!(1_500_000),
                    existing_savings: dec!(100_000),
                    monthly_contribution: dec!(5_000),
                },
                Goal {
                    goal_type: GoalType::House,
                    name: "House down payment".into(),
                    target_year: 2030,
                    target_amount: dec!(2_000_000),
                    existing_savings: dec!(300_000),
                    monthly_contribution: dec!(20_000),
                },
            ],
            tax: TaxProfile {
                deductions: Deductions {
                    section_80c: dec!(100_000),
                    section_80d: dec!(25_000),
                    ..Default::default()
                },
                huf_income: None,
                current_regime: Some(TaxRegime::Old),
            },
            risk_profile: RiskProfile::Moderate,
            retirement: RetirementContributions {
                monthly_sip: dec!(15_000),
                step_up_rate: dec!(10),
                monthly_pension: Decimal::ZERO,
            },
            assumptions: Assumptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample_plan;
    use super::*;

    #[test]
    fn test_sample_plan_is_valid() {
        sample_plan().validate().unwrap();
    }

    #[test]
    fn test_expense_totals() {
        let plan = sample_plan();
        assert_eq!(plan.expenses.monthly_living(), dec!(85_000));
        assert_eq!(plan.expenses.monthly_total(), dec!(100_000));
        assert_eq!(plan.income.monthly_total(), dec!(150_000));
        assert_eq!(plan.net_worth.liquid(), dec!(500_000));
    }

    #[test]
    fn test_goal_years_from_as_of() {
        let plan = sample_plan();
        assert_eq!(plan.goals[0].years_from(plan.as_of), Some(15));
        let mut goal = plan.goals[1].clone();
        goal.target_year = 2025;
        assert_eq!(goal.years_from(plan.as_of), None);
        goal.target_year = 2020;
        assert_eq!(goal.years_from(plan.as_of), None);
    }

    #[test]
    fn test_ages_validated() {
        let mut plan = sample_plan();
        plan.personal.retirement_age = 32;
        assert!(plan.validate().is_err());

        let mut plan = sample_plan();
        plan.personal.life_expectancy = 60;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut plan = sample_plan();
        plan.net_worth.gold = dec!(-1);
        assert!(matches!(
            plan.validate(),
            Err(FinHealthError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_plan_deserialises_with_defaults() {
        let json = r#"{
            "as_of": "2025-04-01",
            "personal": {"age": 30, "retirement_age": 60, "life_expectancy": 85},
            "income": {"annual_salary": "1200000"},
            "expenses": {"monthly_household": "40000"}
        }"#;
        let plan: FinancialPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.assumptions, Assumptions::default());
        assert!(plan.goals.is_empty());
        assert_eq!(plan.risk_profile, RiskProfile::Moderate);
        plan.validate().unwrap();
    }
}
