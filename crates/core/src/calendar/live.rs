//! The configured "now" for reporting purposes.

use serde::{Deserialize, Serialize};

use super::error::CalendarError;
use super::model::CalendarModel;
use super::types::{FinancialYear, Month, MonthRef, Quarter};

/// The reporting period the business currently considers live.
///
/// This is configuration, not wall-clock time: rolling to a new month is an
/// explicit change of this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivePeriod {
    /// Live month.
    pub month: Month,
    /// Quarter containing the live month.
    pub quarter: Quarter,
    /// Live financial year.
    pub year: FinancialYear,
}

impl LivePeriod {
    /// Creates a live period checked against the calendar.
    ///
    /// # Errors
    ///
    /// Returns `UnknownYear`, `MonthNotInYear` or `LivePeriodMismatch` when
    /// the tuple does not exist in the calendar tables.
    pub fn new(
        month: Month,
        quarter: Quarter,
        year: FinancialYear,
        calendar: &CalendarModel,
    ) -> Result<Self, CalendarError> {
        let live = Self {
            month,
            quarter,
            year,
        };
        live.validate(calendar)?;
        Ok(live)
    }

    /// Checks that the live month belongs to the live quarter of the live year.
    ///
    /// # Errors
    ///
    /// See [`LivePeriod::new`].
    pub fn validate(&self, calendar: &CalendarModel) -> Result<(), CalendarError> {
        let quarter = calendar.require_quarter_of_month(&self.year, self.month)?;
        if quarter != self.quarter {
            return Err(CalendarError::LivePeriodMismatch {
                month: self.month,
                quarter: self.quarter,
                year: self.year.to_string(),
            });
        }
        Ok(())
    }

    /// The live month pinned to the live year.
    #[must_use]
    pub fn month_ref(&self) -> MonthRef {
        MonthRef::new(self.month, self.year.clone())
    }

    /// Returns true if `month` of `year` is the live month.
    #[must_use]
    pub fn is_live_month(&self, month: Month, year: &FinancialYear) -> bool {
        self.month == month && &self.year == year
    }
}
