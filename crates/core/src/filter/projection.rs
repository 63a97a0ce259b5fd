//! Labels, flags and row predicates derived from a selection.

use std::str::FromStr;

use serde::Serialize;

use crate::calendar::{FinancialYear, LivePeriod, Month, Quarter};
use crate::period::resolver::custom_label;
use crate::period::{PeriodDescriptor, PeriodResolver, TimeSelectionContext};
use crate::selection::Selection;

/// Anything exposing a month label, e.g. a KPI row.
///
/// Labels are compared case-insensitively and may use full or short month
/// names.
pub trait MonthLabeled {
    /// Month label of the row.
    fn month_label(&self) -> &str;

    /// Financial year label of the row, when the row carries one.
    fn financial_year_label(&self) -> Option<&str> {
        None
    }
}

/// Anything exposing a quarter label.
pub trait QuarterLabeled {
    /// Quarter label of the row, if any.
    fn quarter_label(&self) -> Option<&str>;
}

/// Immutable view of one selection state.
///
/// Rebuilt after every mutation; holds no reference back to the state
/// machine.
#[derive(Debug, Clone, Serialize)]
pub struct FilterProjection {
    selection: Selection,
    context: TimeSelectionContext,
    #[serde(skip)]
    live: LivePeriod,
}

impl FilterProjection {
    /// Builds a projection from a selection and its classification.
    #[must_use]
    pub const fn new(selection: Selection, context: TimeSelectionContext, live: LivePeriod) -> Self {
        Self {
            selection,
            context,
            live,
        }
    }

    /// Underlying selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Classification of the selection.
    #[must_use]
    pub const fn context(&self) -> &TimeSelectionContext {
        &self.context
    }

    /// True iff the data month is selected. Never true for an empty selection
    /// or an unrecognised label.
    #[must_use]
    pub fn month_matches(&self, data_month: &str) -> bool {
        if self.selection.months.is_empty() {
            return false;
        }
        Month::from_str(data_month).is_ok_and(|m| self.selection.months.contains(&m))
    }

    /// True iff the data quarter is selected.
    #[must_use]
    pub fn quarter_matches(&self, data_quarter: &str) -> bool {
        if self.selection.quarters.is_empty() {
            return false;
        }
        Quarter::from_str(data_quarter).is_ok_and(|q| self.selection.quarters.contains(&q))
    }

    /// True iff the label names the selected financial year.
    #[must_use]
    pub fn year_matches(&self, data_year: &str) -> bool {
        same_year(data_year, &self.selection.year)
    }

    /// True iff the row's month is selected and, when the row carries a
    /// financial year, it is the selected one.
    #[must_use]
    pub fn row_matches<R: MonthLabeled + ?Sized>(&self, row: &R) -> bool {
        self.month_matches(row.month_label())
            && row
                .financial_year_label()
                .is_none_or(|year| self.year_matches(year))
    }

    /// True iff the row's quarter is selected and, when the row carries a
    /// financial year, it is the selected one. Quarter labels are
    /// year-relative, so a quarter of another year never matches.
    #[must_use]
    pub fn quarter_row_matches<R>(&self, row: &R) -> bool
    where
        R: QuarterLabeled + MonthLabeled + ?Sized,
    {
        row.quarter_label().is_some_and(|q| self.quarter_matches(q))
            && row
                .financial_year_label()
                .is_none_or(|year| self.year_matches(year))
    }

    /// Rows whose month falls in the selection.
    #[must_use]
    pub fn filter_rows<'r, R: MonthLabeled>(&self, rows: &'r [R]) -> Vec<&'r R> {
        rows.iter().filter(|row| self.row_matches(*row)).collect()
    }

    /// Rows whose quarter falls in the selection.
    #[must_use]
    pub fn filter_quarter_rows<'r, R: QuarterLabeled + MonthLabeled>(
        &self,
        rows: &'r [R],
    ) -> Vec<&'r R> {
        rows.iter()
            .filter(|row| self.quarter_row_matches(*row))
            .collect()
    }

    /// True iff the row falls inside an arbitrary period, e.g. a comparison
    /// baseline.
    #[must_use]
    pub fn period_matches<R: MonthLabeled + ?Sized>(period: &PeriodDescriptor, row: &R) -> bool {
        let Ok(month) = Month::from_str(row.month_label()) else {
            return false;
        };
        period.months.contains(&month)
            && row
                .financial_year_label()
                .is_none_or(|year| same_year(year, &period.year))
    }

    /// Label shown in the filter badge.
    ///
    /// Precedence: the live month alone is framed against its previous month;
    /// then a full year; then custom months; then the selected quarters.
    #[must_use]
    pub fn display_label(&self) -> String {
        let year = &self.selection.year;
        let single_live = matches!(
            self.selection.months.as_slice(),
            [month] if self.live.is_live_month(*month, year)
        );

        if single_live {
            PeriodResolver::comparison_label(&self.context)
        } else if self.is_full_year() {
            format!("Full Year ({year})")
        } else if self.is_custom_mode() {
            custom_label(self.selection.months.len())
        } else {
            let quarters: Vec<&str> = self.selection.quarters.iter().map(|q| q.label()).collect();
            format!("{} ({year})", quarters.join(", "))
        }
    }

    /// Comparison-framed label of the selection.
    #[must_use]
    pub fn comparison_label(&self) -> String {
        PeriodResolver::comparison_label(&self.context)
    }

    /// Months picked individually rather than through quarters.
    #[must_use]
    pub fn is_custom_mode(&self) -> bool {
        self.selection.is_custom_mode()
    }

    /// All twelve months selected.
    #[must_use]
    pub fn is_full_year(&self) -> bool {
        self.selection.months.len() == Month::ALL.len()
    }

    /// The live month of the live year is part of the selection.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.context.is_current
    }
}

/// Compares financial year labels ignoring case and whitespace, so `"FY 2025"`
/// and `"fy2025"` both name `FY2025`.
fn same_year(label: &str, year: &FinancialYear) -> bool {
    let normalize = |s: &str| -> String {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect()
    };
    normalize(label) == normalize(year.as_str())
}
