//! Financial years, quarters and months.
//!
//! Pure lookup tables with no mutable state. Quarter meaning is
//! year-relative: the same label may cover different months (or not exist)
//! depending on the financial year.

pub mod error;
pub mod live;
pub mod model;
pub mod types;


pub use error::CalendarError;
pub use live::LivePeriod;
pub use model::{CalendarModel, QuarterDefinition, YearCalendar};
pub use types::{FinancialYear, Month, MonthRef, Quarter};
