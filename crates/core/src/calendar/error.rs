//! Calendar error types.

use pulse_shared::AppError;
use thiserror::Error;

use super::types::{Month, Quarter};

/// Calendar configuration and lookup errors.
///
/// Every variant means the calendar tables and the caller disagree; none of
/// them is an expected runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// Month label could not be parsed.
    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    /// Quarter label could not be parsed.
    #[error("Invalid quarter: {0}")]
    InvalidQuarter(String),

    /// Financial year label does not end in a year number.
    #[error("Invalid financial year label: {0}")]
    InvalidYearLabel(String),

    /// No financial years configured.
    #[error("Calendar has no financial years")]
    EmptyCalendar,

    /// Financial year is not part of the calendar.
    #[error("Unknown financial year: {0}")]
    UnknownYear(String),

    /// Financial year configured twice.
    #[error("Financial year {0} is configured more than once")]
    DuplicateYear(String),

    /// Financial year configured without quarters.
    #[error("Financial year {0} has no quarters")]
    NoQuarters(String),

    /// Quarter configured twice within one year.
    #[error("Quarter {quarter} is configured more than once in {year}")]
    DuplicateQuarter {
        /// Quarter label.
        quarter: Quarter,
        /// Financial year label.
        year: String,
    },

    /// Month assigned to more than one quarter (or twice to the same one).
    #[error("Month {month} appears more than once in {year}")]
    OverlappingMonth {
        /// Month.
        month: Month,
        /// Financial year label.
        year: String,
    },

    /// Quarter requested that the year does not expose.
    #[error("Quarter {quarter} is not defined for {year}")]
    QuarterNotInYear {
        /// Quarter label.
        quarter: Quarter,
        /// Financial year label.
        year: String,
    },

    /// Month requested that no quarter of the year contains.
    #[error("Month {month} is not part of any quarter in {year}")]
    MonthNotInYear {
        /// Month.
        month: Month,
        /// Financial year label.
        year: String,
    },

    /// Stepping past the representable range of year numbers.
    #[error("No financial year adjacent to {0}")]
    YearOutOfRange(String),

    /// Live period does not agree with the calendar tables.
    #[error("Live period {month} {year} does not belong to {quarter}")]
    LivePeriodMismatch {
        /// Configured live month.
        month: Month,
        /// Configured live quarter.
        quarter: Quarter,
        /// Configured live financial year.
        year: String,
    },
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        Self::Validation(err.to_string())
    }
}
