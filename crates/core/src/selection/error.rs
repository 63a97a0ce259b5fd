//! Selection error types.

use thiserror::Error;

use crate::calendar::{CalendarError, Month, Quarter};
use pulse_shared::AppError;

/// Rejected selection mutations.
///
/// These indicate a caller bug (a control offering a value the active year
/// does not have). The state is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Month not exposed by the active year's calendar.
    #[error("Month {month} is not selectable in {year}")]
    UnknownMonth {
        /// Requested month.
        month: Month,
        /// Active financial year.
        year: String,
    },

    /// Quarter not exposed by the active year's calendar.
    #[error("Quarter {quarter} is not selectable in {year}")]
    UnknownQuarter {
        /// Requested quarter.
        quarter: Quarter,
        /// Active financial year.
        year: String,
    },

    /// Calendar or live period misconfiguration.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        Self::Validation(err.to_string())
    }
}
