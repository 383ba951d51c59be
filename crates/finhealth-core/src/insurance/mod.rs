//! Life and health cover need estimators.

pub mod health;
pub mod term;
