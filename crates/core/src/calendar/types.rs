//! Calendar value types: months, quarters and financial year labels.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::CalendarError;

/// One of the twelve calendar months.
///
/// Months are always referred to by full name on the wire (`"February"`),
/// but parsing also accepts the three-letter short form (`"Feb"`) in any case
/// since uploaded rows use both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    /// January
    January,
    /// February
    February,
    /// March
    March,
    /// April
    April,
    /// May
    May,
    /// June
    June,
    /// July
    July,
    /// August
    August,
    /// September
    September,
    /// October
    October,
    /// November
    November,
    /// December
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Zero-based calendar index (January = 0).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the month at a zero-based calendar index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Full English name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// Three-letter display name (`"Feb"`).
    #[must_use]
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }

    /// Month of a calendar date.
    #[must_use]
    pub fn of_date(date: NaiveDate) -> Self {
        // month0 is always 0..=11
        Self::ALL[date.month0() as usize]
    }

    /// Whether `other` immediately follows `self` within the same calendar year.
    #[must_use]
    pub const fn is_followed_by(self, other: Self) -> bool {
        other.index() == self.index() + 1
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Month {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| {
                m.name().eq_ignore_ascii_case(needle) || m.short_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| CalendarError::InvalidMonth(s.to_string()))
    }
}

/// Quarter label.
///
/// The months behind a label depend on the financial year, see
/// [`CalendarModel`](super::CalendarModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    /// First quarter
    Q1,
    /// Second quarter
    Q2,
    /// Third quarter
    Q3,
    /// Fourth quarter
    Q4,
}

impl Quarter {
    /// All quarter labels in label order (not business order).
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Label text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Quarter {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "Q1" => Ok(Self::Q1),
            "Q2" => Ok(Self::Q2),
            "Q3" => Ok(Self::Q3),
            "Q4" => Ok(Self::Q4),
            _ => Err(CalendarError::InvalidQuarter(s.to_string())),
        }
    }
}

/// Financial year identifier such as `FY2026`.
///
/// The label is opaque to the business, but it must end in a year number so
/// that the neighbouring identifiers (`FY2025`, `FY2027`) can be derived
/// exactly when stepping across a year boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinancialYear {
    label: String,
    prefix_len: usize,
    number: u32,
}

impl FinancialYear {
    /// Parses a financial year label.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidYearLabel` if the label does not end in
    /// a year number.
    pub fn new(label: impl Into<String>) -> Result<Self, CalendarError> {
        let label = label.into().trim().to_string();
        let digits = label
            .chars()
            .rev()
            .take_while(char::is_ascii_digit)
            .count();
        if digits == 0 {
            return Err(CalendarError::InvalidYearLabel(label));
        }
        let prefix_len = label.len() - digits;
        let number = label[prefix_len..]
            .parse::<u32>()
            .map_err(|_| CalendarError::InvalidYearLabel(label.clone()))?;

        Ok(Self {
            label,
            prefix_len,
            number,
        })
    }

    /// Builds the conventional `FY<number>` label.
    #[must_use]
    pub fn fy(number: u32) -> Self {
        Self {
            label: format!("FY{number}"),
            prefix_len: 2,
            number,
        }
    }

    /// The label as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.label
    }

    /// Trailing year number (`2026` for `FY2026`).
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Identifier of the preceding financial year, keeping the prefix.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        self.number.checked_sub(1).map(|n| self.with_number(n))
    }

    /// Identifier of the following financial year, keeping the prefix.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.number.checked_add(1).map(|n| self.with_number(n))
    }

    fn with_number(&self, number: u32) -> Self {
        let prefix = &self.label[..self.prefix_len];
        let width = self.label.len() - self.prefix_len;
        let label = format!("{prefix}{number:0width$}");
        Self {
            prefix_len: self.prefix_len,
            label,
            number,
        }
    }
}

impl std::fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

impl std::str::FromStr for FinancialYear {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FinancialYear {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FinancialYear> for String {
    fn from(value: FinancialYear) -> Self {
        value.label
    }
}

/// A month pinned to a financial year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthRef {
    /// Month.
    pub month: Month,
    /// Financial year the month belongs to.
    pub year: FinancialYear,
}

impl MonthRef {
    /// Creates a new month reference.
    #[must_use]
    pub const fn new(month: Month, year: FinancialYear) -> Self {
        Self { month, year }
    }
}

impl std::fmt::Display for MonthRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}
