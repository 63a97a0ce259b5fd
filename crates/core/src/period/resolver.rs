//! Selection classification and baseline derivation.
//!
//! Classification is a deterministic cascade over the number of selected
//! months: one month, then two, then three matching a quarter, then custom.
//! There is no best-fit search, and every non-empty selection classifies.

use crate::calendar::{CalendarModel, FinancialYear, LivePeriod, Month, MonthRef, Quarter};

use super::error::PeriodError;
use super::types::{
    ComparisonDescriptor, ComparisonKind, ComparisonMode, ComparisonPeriod, MetricDescription,
    MomMonths, PeriodDescriptor, SelectionType, TimeSelectionContext,
};

/// Stateless resolver over a calendar and the configured live period.
#[derive(Debug, Clone, Copy)]
pub struct PeriodResolver<'a> {
    calendar: &'a CalendarModel,
    live: &'a LivePeriod,
}

impl<'a> PeriodResolver<'a> {
    /// Creates a resolver.
    #[must_use]
    pub const fn new(calendar: &'a CalendarModel, live: &'a LivePeriod) -> Self {
        Self { calendar, live }
    }

    /// Classifies a month selection within a financial year.
    ///
    /// Duplicate months are ignored and the months are put in calendar order
    /// before any rule is applied.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::EmptySelection` for an empty selection, or a
    /// calendar error if the year is not configured.
    pub fn classify(
        &self,
        months: &[Month],
        year: &FinancialYear,
    ) -> Result<TimeSelectionContext, PeriodError> {
        self.calendar.year(year)?;

        let mut months = months.to_vec();
        months.sort_unstable();
        months.dedup();

        let is_current = months.iter().any(|m| self.live.is_live_month(*m, year));

        match *months.as_slice() {
            [] => Err(PeriodError::EmptySelection),
            [month] => {
                let previous = CalendarModel::previous_month(month, year)?;
                let live = self.live.month_ref();
                let comparison_mode =
                    if self.live.is_live_month(month, year) || previous == live {
                        ComparisonMode::MonthOverMonth
                    } else {
                        ComparisonMode::None
                    };

                Ok(TimeSelectionContext {
                    selection_type: SelectionType::SingleMonth,
                    comparison_mode,
                    label: format!("{month} {year}"),
                    mom_months: Some(MomMonths {
                        current: MonthRef::new(month, year.clone()),
                        previous,
                    }),
                    months,
                    year: year.clone(),
                    is_current,
                    quarter: None,
                })
            }
            [earlier, later] if earlier.is_followed_by(later) => Ok(TimeSelectionContext {
                selection_type: SelectionType::TwoConsecutiveMonths,
                comparison_mode: ComparisonMode::MonthOverMonth,
                label: format!("{earlier} - {later} {year}"),
                mom_months: Some(MomMonths {
                    current: MonthRef::new(later, year.clone()),
                    previous: MonthRef::new(earlier, year.clone()),
                }),
                months,
                year: year.clone(),
                is_current,
                quarter: None,
            }),
            [first, second] => Ok(Self::custom(
                format!("{first} & {second} {year}"),
                months.clone(),
                year,
                is_current,
            )),
            _ => match self.matching_quarter(&months, year) {
                Some(quarter) => Ok(TimeSelectionContext {
                    selection_type: SelectionType::CompleteQuarter,
                    comparison_mode: ComparisonMode::QuarterOverQuarter,
                    label: format!("{quarter} {year}"),
                    months,
                    year: year.clone(),
                    is_current,
                    mom_months: None,
                    quarter: Some(quarter),
                }),
                None => Ok(Self::custom(
                    custom_label(months.len()),
                    months,
                    year,
                    is_current,
                )),
            },
        }
    }

    /// The quarter whose months are exactly `months`, if any.
    #[must_use]
    pub fn matching_quarter(&self, months: &[Month], year: &FinancialYear) -> Option<Quarter> {
        if months.len() != 3 {
            return None;
        }
        self.calendar
            .available_quarters(year)
            .into_iter()
            .find(|q| self.calendar.is_quarter_covered(year, months, *q))
    }

    /// Human label framing the selection against its baseline.
    ///
    /// `"February (vs January)"` for month-over-month, `"Q4 FY2026 (current)"`
    /// for the live quarter, the plain label otherwise.
    #[must_use]
    pub fn comparison_label(context: &TimeSelectionContext) -> String {
        match context.comparison_mode {
            ComparisonMode::MonthOverMonth => match &context.mom_months {
                Some(mom) => format!("{} (vs {})", mom.current.month, mom.previous.month),
                None => context.label.clone(),
            },
            ComparisonMode::YearOverYear => match context.months.as_slice() {
                [month] => format!("{month} (vs {month} last year)"),
                _ => format!("{} (vs last year)", context.label),
            },
            ComparisonMode::QuarterOverQuarter => {
                let suffix = if context.is_current { " (current)" } else { "" };
                format!("{}{suffix}", context.label)
            }
            ComparisonMode::None => context.label.clone(),
        }
    }

    /// Captions for the current and baseline values of a metric card.
    #[must_use]
    pub fn metric_description(context: &TimeSelectionContext) -> MetricDescription {
        match context.comparison_mode {
            ComparisonMode::MonthOverMonth => MetricDescription {
                current: format!("{} (Current)", context.label),
                comparison: context
                    .mom_months
                    .as_ref()
                    .map(|mom| format!("{} (Previous)", mom.previous.month)),
            },
            ComparisonMode::QuarterOverQuarter => MetricDescription {
                current: format!("{} (Current Quarter)", context.label),
                comparison: Some("Previous Quarter".to_string()),
            },
            ComparisonMode::YearOverYear => MetricDescription {
                current: format!("{} (Current)", context.label),
                comparison: Some("Same Period Last Year".to_string()),
            },
            ComparisonMode::None => MetricDescription {
                current: context.label.clone(),
                comparison: None,
            },
        }
    }

    /// Primary period and its baseline for a classified selection.
    ///
    /// Month-over-month compares against `mom_months.previous`;
    /// quarter-over-quarter against the preceding quarter in the year's
    /// canonical order (wrapping into the prior financial year only from the
    /// first quarter, and only when that year is configured). Custom
    /// selections have no baseline.
    ///
    /// # Errors
    ///
    /// Returns a calendar error if the context refers to an unknown year.
    pub fn compute_comparison_period(
        &self,
        context: &TimeSelectionContext,
    ) -> Result<ComparisonPeriod, PeriodError> {
        let primary = primary_descriptor(context);

        let comparison = match context.comparison_mode {
            ComparisonMode::MonthOverMonth => {
                context.mom_months.as_ref().map(|mom| ComparisonDescriptor {
                    period: PeriodDescriptor {
                        months: vec![mom.previous.month],
                        label: relative_label(mom.previous.month, &mom.previous.year, &context.year),
                        year: mom.previous.year.clone(),
                    },
                    kind: ComparisonKind::PreviousMonth,
                })
            }
            ComparisonMode::QuarterOverQuarter => match context.quarter {
                Some(quarter) => self.previous_quarter(quarter, &context.year)?.map(
                    |(prev, prev_year)| -> Result<ComparisonDescriptor, PeriodError> {
                        Ok(ComparisonDescriptor {
                            period: PeriodDescriptor {
                                months: self.calendar.quarter_months(&prev_year, prev)?.to_vec(),
                                label: relative_label(prev, &prev_year, &context.year),
                                year: prev_year,
                            },
                            kind: ComparisonKind::PreviousQuarter,
                        })
                    },
                ).transpose()?,
                None => None,
            },
            ComparisonMode::YearOverYear => Some(self.year_over_year_descriptor(context)?),
            ComparisonMode::None => None,
        };

        Ok(ComparisonPeriod {
            primary,
            comparison,
        })
    }

    /// Same months one financial year earlier, for any classification.
    ///
    /// # Errors
    ///
    /// Returns `YearOutOfRange` if the year has no predecessor.
    pub fn year_over_year(
        &self,
        context: &TimeSelectionContext,
    ) -> Result<ComparisonPeriod, PeriodError> {
        Ok(ComparisonPeriod {
            primary: primary_descriptor(context),
            comparison: Some(self.year_over_year_descriptor(context)?),
        })
    }

    fn year_over_year_descriptor(
        &self,
        context: &TimeSelectionContext,
    ) -> Result<ComparisonDescriptor, PeriodError> {
        let prior = context
            .year
            .previous()
            .ok_or_else(|| crate::calendar::CalendarError::YearOutOfRange(context.year.to_string()))?;

        let scope = match (context.selection_type, context.months.as_slice()) {
            (SelectionType::CompleteQuarter, _) => context
                .quarter
                .map_or_else(|| custom_scope(context.months.len()), |q| q.to_string()),
            (SelectionType::SingleMonth, [month]) => month.to_string(),
            (SelectionType::TwoConsecutiveMonths, [earlier, later]) => {
                format!("{earlier} - {later}")
            }
            _ => custom_scope(context.months.len()),
        };

        Ok(ComparisonDescriptor {
            period: PeriodDescriptor {
                months: context.months.clone(),
                label: format!("{scope} {prior}"),
                year: prior,
            },
            kind: ComparisonKind::PreviousYear,
        })
    }

    /// Quarter preceding `quarter` in canonical order.
    ///
    /// The first quarter of a year wraps to the last quarter of the prior
    /// financial year, but only if that year is configured.
    fn previous_quarter(
        &self,
        quarter: Quarter,
        year: &FinancialYear,
    ) -> Result<Option<(Quarter, FinancialYear)>, PeriodError> {
        let quarters = self.calendar.available_quarters(year);
        let index = quarters.iter().position(|q| *q == quarter).ok_or_else(|| {
            crate::calendar::CalendarError::QuarterNotInYear {
                quarter,
                year: year.to_string(),
            }
        })?;

        if index > 0 {
            return Ok(Some((quarters[index - 1], year.clone())));
        }

        let Some(prior) = year.previous().filter(|y| self.calendar.has_year(y)) else {
            return Ok(None);
        };
        Ok(self
            .calendar
            .available_quarters(&prior)
            .last()
            .map(|q| (*q, prior.clone())))
    }

    fn custom(
        label: String,
        months: Vec<Month>,
        year: &FinancialYear,
        is_current: bool,
    ) -> TimeSelectionContext {
        TimeSelectionContext {
            selection_type: SelectionType::Custom,
            comparison_mode: ComparisonMode::None,
            months,
            year: year.clone(),
            is_current,
            label,
            mom_months: None,
            quarter: None,
        }
    }
}

fn primary_descriptor(context: &TimeSelectionContext) -> PeriodDescriptor {
    PeriodDescriptor {
        months: context.months.clone(),
        year: context.year.clone(),
        label: context.label.clone(),
    }
}

/// `"<N> months (Custom)"`, singular for one month.
pub(crate) fn custom_label(count: usize) -> String {
    format!("{} (Custom)", custom_scope(count))
}

fn custom_scope(count: usize) -> String {
    if count == 1 {
        "1 month".to_string()
    } else {
        format!("{count} months")
    }
}

/// Label of a baseline, qualified with its year only when it differs.
fn relative_label(
    period: impl std::fmt::Display,
    year: &FinancialYear,
    reference: &FinancialYear,
) -> String {
    if year == reference {
        period.to_string()
    } else {
        format!("{period} {year}")
    }
}
