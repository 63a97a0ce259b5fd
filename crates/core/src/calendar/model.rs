//! Financial year quarter tables.

use serde::{Deserialize, Serialize};

use super::error::CalendarError;
use super::types::{FinancialYear, Month, MonthRef, Quarter};

/// Months that make up one quarter of a financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterDefinition {
    /// Quarter label.
    pub quarter: Quarter,
    /// The three months of the quarter, in calendar order.
    pub months: [Month; 3],
}

impl QuarterDefinition {
    /// Creates a quarter definition.
    #[must_use]
    pub const fn new(quarter: Quarter, months: [Month; 3]) -> Self {
        Self { quarter, months }
    }
}

/// Quarter table of a single financial year.
///
/// The order of `quarters` is the canonical business order for that year
/// (e.g. Q4, Q1, Q2, Q3 when the year opens with January–March).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCalendar {
    /// Financial year.
    pub year: FinancialYear,
    /// Quarters the year exposes, in canonical order.
    pub quarters: Vec<QuarterDefinition>,
}

/// Lookup tables for financial years, quarters and months.
///
/// Month to quarter membership is not global: it is rebuilt per financial
/// year from that year's table. The model is immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarModel {
    years: Vec<YearCalendar>,
}

impl CalendarModel {
    /// Builds a calendar from year tables, validating them.
    ///
    /// Within each year no quarter may repeat and no month may belong to two
    /// quarters. Years may expose fewer than four quarters.
    ///
    /// # Errors
    ///
    /// Returns a `CalendarError` describing the first inconsistency found.
    pub fn new(years: Vec<YearCalendar>) -> Result<Self, CalendarError> {
        if years.is_empty() {
            return Err(CalendarError::EmptyCalendar);
        }

        for (i, year) in years.iter().enumerate() {
            if years[..i].iter().any(|y| y.year == year.year) {
                return Err(CalendarError::DuplicateYear(year.year.to_string()));
            }
            if year.quarters.is_empty() {
                return Err(CalendarError::NoQuarters(year.year.to_string()));
            }

            let mut seen_months = [false; 12];
            for (j, def) in year.quarters.iter().enumerate() {
                if year.quarters[..j].iter().any(|d| d.quarter == def.quarter) {
                    return Err(CalendarError::DuplicateQuarter {
                        quarter: def.quarter,
                        year: year.year.to_string(),
                    });
                }
                for month in def.months {
                    if seen_months[month.index()] {
                        return Err(CalendarError::OverlappingMonth {
                            month,
                            year: year.year.to_string(),
                        });
                    }
                    seen_months[month.index()] = true;
                }
            }
        }

        Ok(Self { years })
    }

    /// The shipped calendar.
    ///
    /// FY2025 is a legacy partial year exposing only Q4 (January–March).
    /// FY2026 is a full year opening with Q4 (January–March) followed by
    /// Q1 (April–June), Q2 (July–September) and Q3 (October–December).
    #[must_use]
    pub fn standard() -> Self {
        use Month::{
            April, August, December, February, January, July, June, March, May, November,
            October, September,
        };

        let q4 = QuarterDefinition::new(Quarter::Q4, [January, February, March]);
        Self {
            years: vec![
                YearCalendar {
                    year: FinancialYear::fy(2025),
                    quarters: vec![q4.clone()],
                },
                YearCalendar {
                    year: FinancialYear::fy(2026),
                    quarters: vec![
                        q4,
                        QuarterDefinition::new(Quarter::Q1, [April, May, June]),
                        QuarterDefinition::new(Quarter::Q2, [July, August, September]),
                        QuarterDefinition::new(Quarter::Q3, [October, November, December]),
                    ],
                },
            ],
        }
    }

    /// Raw year tables.
    #[must_use]
    pub fn years(&self) -> &[YearCalendar] {
        &self.years
    }

    /// All configured financial years, in configuration order.
    #[must_use]
    pub fn available_years(&self) -> Vec<FinancialYear> {
        self.years.iter().map(|y| y.year.clone()).collect()
    }

    /// Returns true if the financial year is configured.
    #[must_use]
    pub fn has_year(&self, year: &FinancialYear) -> bool {
        self.find(year).is_some()
    }

    /// Quarter table of a year.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::UnknownYear` if the year is not configured.
    pub fn year(&self, year: &FinancialYear) -> Result<&YearCalendar, CalendarError> {
        self.find(year)
            .ok_or_else(|| CalendarError::UnknownYear(year.to_string()))
    }

    /// Quarters defined for the year, in canonical order. Empty for unknown years.
    #[must_use]
    pub fn available_quarters(&self, year: &FinancialYear) -> Vec<Quarter> {
        self.find(year)
            .map(|y| y.quarters.iter().map(|d| d.quarter).collect())
            .unwrap_or_default()
    }

    /// Months of a quarter, or an empty slice if the year does not define it.
    #[must_use]
    pub fn months_of_quarter(&self, year: &FinancialYear, quarter: Quarter) -> &[Month] {
        match self.quarter_months(year, quarter) {
            Ok(months) => months.as_slice(),
            Err(_) => &[],
        }
    }

    /// Months of a quarter, failing when the year does not define it.
    ///
    /// # Errors
    ///
    /// Returns `UnknownYear` or `QuarterNotInYear`.
    pub fn quarter_months(
        &self,
        year: &FinancialYear,
        quarter: Quarter,
    ) -> Result<&[Month; 3], CalendarError> {
        self.year(year)?
            .quarters
            .iter()
            .find(|d| d.quarter == quarter)
            .map(|d| &d.months)
            .ok_or_else(|| CalendarError::QuarterNotInYear {
                quarter,
                year: year.to_string(),
            })
    }

    /// Quarter containing the month in the given year.
    #[must_use]
    pub fn quarter_of_month(&self, year: &FinancialYear, month: Month) -> Option<Quarter> {
        self.find(year)?
            .quarters
            .iter()
            .find(|d| d.months.contains(&month))
            .map(|d| d.quarter)
    }

    /// Quarter containing the month, failing loudly when none does.
    ///
    /// # Errors
    ///
    /// Returns `UnknownYear` or `MonthNotInYear`.
    pub fn require_quarter_of_month(
        &self,
        year: &FinancialYear,
        month: Month,
    ) -> Result<Quarter, CalendarError> {
        self.year(year)?;
        self.quarter_of_month(year, month)
            .ok_or_else(|| CalendarError::MonthNotInYear {
                month,
                year: year.to_string(),
            })
    }

    /// Returns true if some quarter of the year contains the month.
    #[must_use]
    pub fn is_month_in_year(&self, year: &FinancialYear, month: Month) -> bool {
        self.quarter_of_month(year, month).is_some()
    }

    /// Every month the year exposes, in calendar order.
    #[must_use]
    pub fn months_of_year(&self, year: &FinancialYear) -> Vec<Month> {
        Month::ALL
            .into_iter()
            .filter(|m| self.is_month_in_year(year, *m))
            .collect()
    }

    /// Quarters touched by a set of months, in canonical order.
    #[must_use]
    pub fn quarters_for_months(&self, year: &FinancialYear, months: &[Month]) -> Vec<Quarter> {
        self.available_quarters(year)
            .into_iter()
            .filter(|q| {
                self.months_of_quarter(year, *q)
                    .iter()
                    .any(|m| months.contains(m))
            })
            .collect()
    }

    /// Returns true if every month of the quarter is present in `months`.
    #[must_use]
    pub fn is_quarter_covered(&self, year: &FinancialYear, months: &[Month], quarter: Quarter) -> bool {
        let quarter_months = self.months_of_quarter(year, quarter);
        !quarter_months.is_empty() && quarter_months.iter().all(|m| months.contains(m))
    }

    /// Steps back one month. January rolls to December of the preceding
    /// financial year identifier.
    ///
    /// # Errors
    ///
    /// Returns `YearOutOfRange` if the year number cannot be decremented.
    pub fn previous_month(month: Month, year: &FinancialYear) -> Result<MonthRef, CalendarError> {
        match Month::from_index(month.index().wrapping_sub(1)) {
            Some(prev) => Ok(MonthRef::new(prev, year.clone())),
            None => {
                let prev_year = year
                    .previous()
                    .ok_or_else(|| CalendarError::YearOutOfRange(year.to_string()))?;
                Ok(MonthRef::new(Month::December, prev_year))
            }
        }
    }

    /// Steps forward one month. December rolls to January of the following
    /// financial year identifier.
    ///
    /// # Errors
    ///
    /// Returns `YearOutOfRange` if the year number cannot be incremented.
    pub fn next_month(month: Month, year: &FinancialYear) -> Result<MonthRef, CalendarError> {
        match Month::from_index(month.index() + 1) {
            Some(next) => Ok(MonthRef::new(next, year.clone())),
            None => {
                let next_year = year
                    .next()
                    .ok_or_else(|| CalendarError::YearOutOfRange(year.to_string()))?;
                Ok(MonthRef::new(Month::January, next_year))
            }
        }
    }

    /// Same month in the preceding financial year (YoY baseline).
    ///
    /// # Errors
    ///
    /// Returns `YearOutOfRange` if the year number cannot be decremented.
    pub fn same_month_prior_year(
        month: Month,
        year: &FinancialYear,
    ) -> Result<MonthRef, CalendarError> {
        year.previous()
            .map(|prev| MonthRef::new(month, prev))
            .ok_or_else(|| CalendarError::YearOutOfRange(year.to_string()))
    }

    fn find(&self, year: &FinancialYear) -> Option<&YearCalendar> {
        self.years.iter().find(|y| &y.year == year)
    }
}

impl Default for CalendarModel {
    fn default() -> Self {
        Self::standard()
    }
}
