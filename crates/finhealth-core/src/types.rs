use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, in a single base currency unit.
pub type Money = Decimal;

/// Annual rates expressed as percentages (12 = 12%). Never as fractions.
pub type Rate = Decimal;

/// Multiples (e.g., 15x annual income)
pub type Multiple = Decimal;

/// Scores on a 0-100 scale
pub type Score = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation. Carries no timings: identical inputs
/// must serialise to identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// One bracket of a progressive slab table. `max: None` marks the open top slab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub min: Money,
    pub max: Option<Money>,
    pub rate: Rate,
}

/// City classification used for healthcare-cost loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CityTier {
    /// Metro cities
    Tier1,
    #[default]
    Tier2,
    Tier3,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupation {
    #[default]
    Salaried,
    Government,
    SelfEmployed,
    Business,
    Freelancer,
    Retired,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskProfile {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

/// Asset mix in percentage points; the four buckets sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAllocation {
    pub equity: Rate,
    pub debt: Rate,
    pub gold: Rate,
    pub cash: Rate,
}

impl AssetAllocation {
    pub fn total(&self) -> Rate {
        self.equity + self.debt + self.gold + self.cash
    }
}
