//! The dashboard selection state machine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarModel, FinancialYear, LivePeriod, Month, Quarter};
use crate::filter::FilterProjection;
use crate::period::{ComparisonPeriod, PeriodError, PeriodResolver, TimeSelectionContext};

use super::error::SelectionError;

/// Snapshot of the selection.
///
/// In quarter mode `quarters` is non-empty and `months` is exactly the union
/// of their months; in month (custom) mode `quarters` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected months, calendar order.
    pub months: Vec<Month>,
    /// Selected quarters, canonical order of the year.
    pub quarters: Vec<Quarter>,
    /// Active financial year.
    pub year: FinancialYear,
}

impl Selection {
    /// Returns true when months were picked individually.
    #[must_use]
    pub fn is_custom_mode(&self) -> bool {
        !self.months.is_empty() && self.quarters.is_empty()
    }
}

/// Single owner of the mutable selection.
///
/// Every public mutation is one complete transition: the month/quarter
/// derivation and the non-empty healing run inside it, so readers never see
/// an intermediate state. Month and quarter selections never watch each
/// other; quarter selection derives months, month selection drops quarters.
#[derive(Debug, Clone)]
pub struct SelectionStateMachine {
    calendar: Arc<CalendarModel>,
    live: LivePeriod,
    selection: Selection,
}

impl SelectionStateMachine {
    /// Creates a state machine in the default state: the live month of the
    /// live year, in month mode.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::Calendar` if the live period is not part of
    /// the calendar.
    pub fn new(calendar: Arc<CalendarModel>, live: LivePeriod) -> Result<Self, SelectionError> {
        live.validate(&calendar)?;
        let year = live.year.clone();
        let mut machine = Self {
            calendar,
            live,
            selection: Selection {
                months: Vec::new(),
                quarters: Vec::new(),
                year,
            },
        };
        machine.heal();
        Ok(machine)
    }

    /// Toggles one month and leaves quarter mode.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMonth` if the active year does not expose the month.
    pub fn toggle_month(&mut self, month: Month) -> Result<(), SelectionError> {
        self.ensure_month(month)?;

        let mut months = std::mem::take(&mut self.selection.months);
        if let Some(pos) = months.iter().position(|m| *m == month) {
            months.remove(pos);
        } else {
            months.push(month);
            months.sort_unstable();
        }

        self.selection.months = months;
        self.selection.quarters.clear();
        self.heal();
        Ok(())
    }

    /// Toggles one quarter; months become the union of the selected
    /// quarters' months, replacing any custom months.
    ///
    /// # Errors
    ///
    /// Returns `UnknownQuarter` if the active year does not expose the quarter.
    pub fn toggle_quarter(&mut self, quarter: Quarter) -> Result<(), SelectionError> {
        self.ensure_quarter(quarter)?;

        let mut quarters = std::mem::take(&mut self.selection.quarters);
        if let Some(pos) = quarters.iter().position(|q| *q == quarter) {
            quarters.remove(pos);
        } else {
            quarters.push(quarter);
        }

        self.set_quarters(quarters);
        Ok(())
    }

    /// Selects every month the active year exposes and leaves quarter mode.
    pub fn select_all_months(&mut self) {
        self.selection.months = self.calendar.months_of_year(&self.selection.year);
        self.selection.quarters.clear();
        self.heal();
    }

    /// Selects every quarter of the active year.
    pub fn select_all_quarters(&mut self) {
        let quarters = self.calendar.available_quarters(&self.selection.year);
        self.set_quarters(quarters);
    }

    /// Resets to the default selection for the active year.
    pub fn clear_selection(&mut self) {
        self.selection.months.clear();
        self.selection.quarters.clear();
        self.heal();
    }

    /// Switches financial year and selects its first quarter.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::Calendar` if the year is not configured.
    pub fn set_year(&mut self, year: FinancialYear) -> Result<(), SelectionError> {
        let first = self
            .calendar
            .year(&year)?
            .quarters
            .first()
            .map(|def| def.quarter);

        self.selection.year = year;
        self.set_quarters(first.into_iter().collect());
        Ok(())
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected months, calendar order.
    #[must_use]
    pub fn selected_months(&self) -> &[Month] {
        &self.selection.months
    }

    /// Selected quarters, canonical order.
    #[must_use]
    pub fn selected_quarters(&self) -> &[Quarter] {
        &self.selection.quarters
    }

    /// Active financial year.
    #[must_use]
    pub const fn selected_year(&self) -> &FinancialYear {
        &self.selection.year
    }

    /// Calendar the machine was built with.
    #[must_use]
    pub fn calendar(&self) -> &CalendarModel {
        &self.calendar
    }

    /// Configured live period.
    #[must_use]
    pub const fn live(&self) -> &LivePeriod {
        &self.live
    }

    /// Resolver bound to this machine's calendar and live period.
    #[must_use]
    pub fn resolver(&self) -> PeriodResolver<'_> {
        PeriodResolver::new(&self.calendar, &self.live)
    }

    /// Classification of the current selection.
    ///
    /// # Errors
    ///
    /// Only fails if the calendar and the selection disagree, which the
    /// transitions rule out.
    pub fn context(&self) -> Result<TimeSelectionContext, PeriodError> {
        self.resolver()
            .classify(&self.selection.months, &self.selection.year)
    }

    /// Primary period and its baseline for the current selection.
    ///
    /// # Errors
    ///
    /// See [`SelectionStateMachine::context`].
    pub fn comparison_period(&self) -> Result<ComparisonPeriod, PeriodError> {
        let resolver = self.resolver();
        let context = resolver.classify(&self.selection.months, &self.selection.year)?;
        resolver.compute_comparison_period(&context)
    }

    /// Same months one financial year earlier.
    ///
    /// # Errors
    ///
    /// See [`PeriodResolver::year_over_year`].
    pub fn year_over_year(&self) -> Result<ComparisonPeriod, PeriodError> {
        let resolver = self.resolver();
        let context = resolver.classify(&self.selection.months, &self.selection.year)?;
        resolver.year_over_year(&context)
    }

    /// Read-only projection for presentation code.
    ///
    /// # Errors
    ///
    /// See [`SelectionStateMachine::context`].
    pub fn projection(&self) -> Result<FilterProjection, PeriodError> {
        let context = self.context()?;
        Ok(FilterProjection::new(
            self.selection.clone(),
            context,
            self.live.clone(),
        ))
    }

    fn ensure_month(&self, month: Month) -> Result<(), SelectionError> {
        if self.calendar.is_month_in_year(&self.selection.year, month) {
            Ok(())
        } else {
            Err(SelectionError::UnknownMonth {
                month,
                year: self.selection.year.to_string(),
            })
        }
    }

    fn ensure_quarter(&self, quarter: Quarter) -> Result<(), SelectionError> {
        if self.calendar.months_of_quarter(&self.selection.year, quarter).is_empty() {
            Err(SelectionError::UnknownQuarter {
                quarter,
                year: self.selection.year.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Enters quarter mode with `quarters`, re-deriving months from them.
    fn set_quarters(&mut self, quarters: Vec<Quarter>) {
        let year = &self.selection.year;
        let canonical = self.calendar.available_quarters(year);
        let quarters: Vec<Quarter> = canonical
            .into_iter()
            .filter(|q| quarters.contains(q))
            .collect();

        let mut months: Vec<Month> = quarters
            .iter()
            .flat_map(|q| self.calendar.months_of_quarter(year, *q).iter().copied())
            .collect();
        months.sort_unstable();
        months.dedup();

        self.selection.quarters = quarters;
        self.selection.months = months;
        self.heal();
    }

    /// Restores the default when both lists ended up empty: the live month if
    /// the active year exposes it, otherwise the year's first quarter.
    fn heal(&mut self) {
        if !self.selection.months.is_empty() || !self.selection.quarters.is_empty() {
            return;
        }

        let year = &self.selection.year;
        if self.calendar.is_month_in_year(year, self.live.month) {
            self.selection.months = vec![self.live.month];
            return;
        }

        if let Some(first) = self.calendar.available_quarters(year).first().copied() {
            self.selection.months = self.calendar.months_of_quarter(year, first).to_vec();
            self.selection.quarters = vec![first];
        }
    }
}
