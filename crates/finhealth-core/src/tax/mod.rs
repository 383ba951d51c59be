//! Progressive slab taxation, old-vs-new regime comparison, and
//! individual/HUF income-splitting.

pub mod huf;
pub mod regime;
pub mod slabs;
