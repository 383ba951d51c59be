//! Financial health scoring of a complete household plan.

pub mod analysis;
pub mod dimensions;
pub mod plan;

pub use analysis::{score, FinancialAnalysis, Grade};
pub use plan::FinancialPlan;
