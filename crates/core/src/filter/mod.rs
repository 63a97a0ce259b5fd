//! Read-only filter view consumed by dashboards.

pub mod projection;


pub use projection::{FilterProjection, MonthLabeled, QuarterLabeled};
