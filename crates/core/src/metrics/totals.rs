//! Target and actual sums over a period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::filter::{FilterProjection, MonthLabeled};
use crate::period::PeriodDescriptor;

use super::comparison::KpiComparison;

/// A row carrying KPI values. Missing values count as zero.
pub trait KpiValued {
    /// Target value, if recorded.
    fn target(&self) -> Option<Decimal>;

    /// Actual value, if recorded.
    fn actual(&self) -> Option<Decimal>;
}

/// Sums of target and actual over a set of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Sum of targets.
    pub target: Decimal,
    /// Sum of actuals.
    pub actual: Decimal,
    /// Number of rows summed.
    pub rows: usize,
}

impl PeriodTotals {
    /// Sums every row. Sums saturate at the `Decimal` bounds instead of
    /// overflowing.
    #[must_use]
    pub fn from_rows<'r, R, I>(rows: I) -> Self
    where
        R: KpiValued + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        rows.into_iter().fold(Self::default(), |mut totals, row| {
            totals.target = totals.target.saturating_add(row.target().unwrap_or_default());
            totals.actual = totals.actual.saturating_add(row.actual().unwrap_or_default());
            totals.rows += 1;
            totals
        })
    }

    /// Sums the rows that fall inside `period`.
    #[must_use]
    pub fn for_period<R: KpiValued + MonthLabeled>(rows: &[R], period: &PeriodDescriptor) -> Self {
        Self::from_rows(
            rows.iter()
                .filter(|row| FilterProjection::period_matches(period, *row)),
        )
    }

    /// Compares these totals with a baseline.
    #[must_use]
    pub fn compare_with(&self, baseline: &Self) -> KpiComparison {
        KpiComparison::compare(self.actual, self.target, baseline.actual, baseline.target)
    }
}
