//! Period classification and comparison types.

use serde::{Deserialize, Serialize};

use crate::calendar::{FinancialYear, Month, MonthRef, Quarter};

/// Shape of a month selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionType {
    /// Exactly one month.
    SingleMonth,
    /// Two calendar-adjacent months.
    TwoConsecutiveMonths,
    /// Exactly the three months of one quarter.
    CompleteQuarter,
    /// Anything else.
    Custom,
}

/// Which baseline a selection is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonMode {
    /// Previous month.
    MonthOverMonth,
    /// Same months of the previous financial year.
    YearOverYear,
    /// Previous quarter.
    QuarterOverQuarter,
    /// No meaningful baseline; callers must not display a delta.
    None,
}

/// Current and previous month of a month-over-month comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomMonths {
    /// Month being reported.
    pub current: MonthRef,
    /// Baseline month.
    pub previous: MonthRef,
}

/// Classification of a selection. Derived on every read, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSelectionContext {
    /// Selection shape.
    pub selection_type: SelectionType,
    /// Derived comparison mode.
    pub comparison_mode: ComparisonMode,
    /// Selected months, de-duplicated, calendar order.
    pub months: Vec<Month>,
    /// Financial year of the selection.
    pub year: FinancialYear,
    /// Whether the live month is part of the selection.
    pub is_current: bool,
    /// Plain label, e.g. `"February FY2026"` or `"Q4 FY2026"`.
    pub label: String,
    /// Month pair for month-over-month baselines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mom_months: Option<MomMonths>,
    /// Quarter matched by a complete-quarter selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter: Option<Quarter>,
}

/// Kind of comparison baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonKind {
    /// Previous month.
    PreviousMonth,
    /// Previous quarter.
    PreviousQuarter,
    /// Same period one financial year earlier.
    PreviousYear,
}

/// A set of months in one financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodDescriptor {
    /// Months, calendar order.
    pub months: Vec<Month>,
    /// Financial year.
    pub year: FinancialYear,
    /// Display label.
    pub label: String,
}

impl PeriodDescriptor {
    /// Returns true if `month` of `year` falls inside this period.
    #[must_use]
    pub fn contains(&self, month: Month, year: &FinancialYear) -> bool {
        &self.year == year && self.months.contains(&month)
    }
}

/// Baseline period with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonDescriptor {
    /// Baseline months and year.
    #[serde(flatten)]
    pub period: PeriodDescriptor,
    /// Kind of baseline.
    pub kind: ComparisonKind,
}

/// Primary period plus its optional baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonPeriod {
    /// Period being reported.
    pub primary: PeriodDescriptor,
    /// Baseline; absent when no meaningful comparison exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonDescriptor>,
}

/// Captions for a metric card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDescription {
    /// Caption of the current value.
    pub current: String,
    /// Caption of the baseline value, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
}
