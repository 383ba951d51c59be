pub mod config;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "planning")]
pub mod planning;

#[cfg(feature = "insurance")]
pub mod insurance;

#[cfg(feature = "scoring")]
pub mod scoring;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::FinHealthError;
pub use types::*;

/// Standard result type for all finhealth operations
pub type FinHealthResult<T> = Result<T, FinHealthError>;
