//! Period resolution error types.

use pulse_shared::AppError;
use thiserror::Error;

use crate::calendar::CalendarError;

/// Errors raised while classifying a selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// No months to classify.
    #[error("Cannot classify an empty month selection")]
    EmptySelection,

    /// Calendar lookup failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl From<PeriodError> for AppError {
    fn from(err: PeriodError) -> Self {
        match err {
            PeriodError::EmptySelection => Self::Internal(err.to_string()),
            PeriodError::Calendar(inner) => inner.into(),
        }
    }
}
