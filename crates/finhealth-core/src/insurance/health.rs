use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{band_multiplier, HealthCoverConfig};
use crate::error::FinHealthError;
use crate::time_value::{fraction, require_non_negative};
use crate::types::{with_metadata, CityTier, ComputationOutput, Money, Multiple};
use crate::FinHealthResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthInsuranceInput {
    /// Age of the eldest insured member.
    pub age: u32,
    #[serde(default)]
    pub city_tier: CityTier,
    /// Number of insured members, including the policyholder.
    pub family_size: u32,
    #[serde(default)]
    pub pre_existing_conditions: bool,
    #[serde(default)]
    pub personal_cover: Money,
    #[serde(default)]
    pub corporate_cover: Money,
}

/// One multiplier applied to the base cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverFactor {
    pub name: String,
    pub multiplier: Multiple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthInsuranceOutput {
    pub base_cover: Money,
    pub recommended_cover: Money,
    /// Personal cover plus the weighted share of employer cover.
    pub current_cover: Money,
    pub gap: Money,
    pub is_adequate: bool,
    /// In application order: city tier, age band, family size, pre-existing conditions.
    pub factors: Vec<CoverFactor>,
}

pub fn health_insurance_need(
    input: &HealthInsuranceInput,
    config: &HealthCoverConfig,
) -> FinHealthResult<ComputationOutput<HealthInsuranceOutput>> {
    let mut warnings: Vec<String> = Vec::new();
    require_non_negative("personal_cover", input.personal_cover)?;
    require_non_negative("corporate_cover", input.corporate_cover)?;
    if input.family_size == 0 {
        return Err(FinHealthError::invalid("family_size", "at least one insured member is required"));
    }

    let city = match input.city_tier {
        CityTier::Tier1 => config.city_tier.tier1,
        CityTier::Tier2 => config.city_tier.tier2,
        CityTier::Tier3 => config.city_tier.tier3,
    };
    let age = band_multiplier(&config.age_bands, input.age).ok_or_else(|| {
        FinHealthError::ConfigurationDefect(format!("no age band covers age {}", input.age))
    })?;
    let family = band_multiplier(&config.family_size_bands, input.family_size).ok_or_else(|| {
        FinHealthError::ConfigurationDefect(format!(
            "no family size band covers {} members",
            input.family_size
        ))
    })?;
    let pre_existing = if input.pre_existing_conditions {
        config.pre_existing_multiplier
    } else {
        Decimal::ONE
    };

    let factors = vec![
        CoverFactor { name: format!("city_tier:{:?}", input.city_tier), multiplier: city },
        CoverFactor { name: format!("age:{}", input.age), multiplier: age },
        CoverFactor { name: format!("family_size:{}", input.family_size), multiplier: family },
        CoverFactor { name: "pre_existing_conditions".into(), multiplier: pre_existing },
    ];
    let recommended_cover = factors
        .iter()
        .fold(config.base_cover, |cover, f| cover * f.multiplier);

    let current_cover =
        input.personal_cover + input.corporate_cover * fraction(config.corporate_cover_weight);
    let gap = (recommended_cover - current_cover).max(Decimal::ZERO);

    if input.personal_cover.is_zero() && !input.corporate_cover.is_zero() {
        warnings.push("Relying on employer cover alone; it lapses with the job".into());
    }
    debug!("health cover: recommended={recommended_cover} current={current_cover} gap={gap}");

    let output = HealthInsuranceOutput {
        base_cover: config.base_cover,
        recommended_cover,
        current_cover,
        gap,
        is_adequate: gap.is_zero(),
        factors,
    };

    Ok(with_metadata(
        "Health cover: base cover scaled by city, age, family size and health factors",
        &serde_json::json!({
            "base_cover": config.base_cover.to_string(),
            "corporate_cover_weight": config.corporate_cover_weight.to_string(),
        }),
        warnings,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn default_input() -> HealthInsuranceInput {
        HealthInsuranceInput {
            age: 40,
            city_tier: CityTier::Tier1,
            family_size: 4,
            pre_existing_conditions: false,
            personal_cover: dec!(500_000),
            corporate_cover: dec!(500_000),
        }
    }

    #[test]
    fn test_metro_family_of_four() {
        let out = health_insurance_need(&default_input(), &HealthCoverConfig::default())
            .unwrap()
            .result;
        // 10L x 1.5 x 1.25 x 1.75 x 1.0
        assert_eq!(out.recommended_cover, dec!(3_281_250));
        assert_eq!(out.current_cover, dec!(750_000));
        assert_eq!(out.gap, dec!(2_531_250));
        assert!(!out.is_adequate);
    }

    #[test]
    fn test_factor_order() {
        let out = health_insurance_need(&default_input(), &HealthCoverConfig::default())
            .unwrap()
            .result;
        let names: Vec<&str> = out.factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["city_tier:Tier1", "age:40", "family_size:4", "pre_existing_conditions"]
        );
    }

    #[test]
    fn test_pre_existing_conditions_load_cover() {
        let mut input = default_input();
        input.pre_existing_conditions = true;
        input.city_tier = CityTier::Tier3;
        input.age = 30;
        input.family_size = 1;
        let out = health_insurance_need(&input, &HealthCoverConfig::default())
            .unwrap()
            .result;
        assert_eq!(out.recommended_cover, dec!(1_250_000));
    }

    #[test]
    fn test_adequate_cover_has_zero_gap() {
        let mut input = default_input();
        input.personal_cover = dec!(5_000_000);
        let out = health_insurance_need(&input, &HealthCoverConfig::default())
            .unwrap()
            .result;
        assert_eq!(out.gap, Decimal::ZERO);
        assert!(out.is_adequate);
    }

    #[test]
    fn test_corporate_only_warns() {
        let mut input = default_input();
        input.personal_cover = Decimal::ZERO;
        let result = health_insurance_need(&input, &HealthCoverConfig::default()).unwrap();
        assert_eq!(result.result.current_cover, dec!(250_000));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_zero_family_size_rejected() {
        let mut input = default_input();
        input.family_size = 0;
        assert!(health_insurance_need(&input, &HealthCoverConfig::default()).is_err());
    }
}
