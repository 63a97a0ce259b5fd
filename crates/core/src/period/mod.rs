//! Selection classification and comparison baselines.

pub mod error;
pub mod resolver;
pub mod types;


pub use error::PeriodError;
pub use resolver::PeriodResolver;
pub use types::{
    ComparisonDescriptor, ComparisonKind, ComparisonMode, ComparisonPeriod, MetricDescription,
    MomMonths, PeriodDescriptor, SelectionType, TimeSelectionContext,
};
