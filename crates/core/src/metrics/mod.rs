//! KPI comparison metrics.
//!
//! All arithmetic is done in `Decimal`; percentages are expressed on a
//! 0-100 scale.

pub mod comparison;
pub mod totals;


pub use comparison::{AchievementStatus, KpiComparison, Trend, format_change, format_growth};
pub use totals::{KpiValued, PeriodTotals};
