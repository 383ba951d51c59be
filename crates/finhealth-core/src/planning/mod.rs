//! Goal and retirement planning: corpus targets, SIP solving, and the
//! year-by-year retirement projection.

pub mod education;
pub mod goals;
pub mod retirement;
