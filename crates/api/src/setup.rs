//! Builds application state from configuration.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use pulse_core::calendar::{
    CalendarError, CalendarModel, FinancialYear, LivePeriod, Month, Quarter, QuarterDefinition,
    YearCalendar,
};
use pulse_core::dashboard::DashboardDataStore;
use pulse_db::RowSourceError;
use pulse_shared::AppConfig;
use pulse_shared::config::{CalendarYearConfig, LiveConfig};
use thiserror::Error;
use tracing::info;

use crate::AppState;
use crate::session::SessionStore;

/// Configuration that cannot be turned into a running service.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Calendar tables or live period are inconsistent.
    #[error("Invalid calendar configuration: {0}")]
    Calendar(#[from] CalendarError),

    /// A configured quarter does not list exactly three months.
    #[error("Quarter {quarter} of {year} must list exactly three months, got {count}")]
    QuarterSize {
        /// Quarter label.
        quarter: String,
        /// Financial year label.
        year: String,
        /// Number of months listed.
        count: usize,
    },

    /// Row store could not be built.
    #[error(transparent)]
    RowSource(#[from] RowSourceError),
}

/// Builds the calendar from configured tables, or the standard calendar when
/// none are configured.
///
/// # Errors
///
/// Returns an error for unparseable labels or tables that violate the
/// calendar invariants.
pub fn calendar_from_config(
    years: Option<&[CalendarYearConfig]>,
) -> Result<CalendarModel, SetupError> {
    let Some(years) = years else {
        return Ok(CalendarModel::standard());
    };

    let years = years
        .iter()
        .map(|year| -> Result<YearCalendar, SetupError> {
            let quarters = year
                .quarters
                .iter()
                .map(|q| -> Result<QuarterDefinition, SetupError> {
                    let months = q
                        .months
                        .iter()
                        .map(|m| Month::from_str(m))
                        .collect::<Result<Vec<_>, CalendarError>>()?;
                    let months: [Month; 3] =
                        months.try_into().map_err(|m: Vec<Month>| SetupError::QuarterSize {
                            quarter: q.quarter.clone(),
                            year: year.year.clone(),
                            count: m.len(),
                        })?;
                    Ok(QuarterDefinition::new(Quarter::from_str(&q.quarter)?, months))
                })
                .collect::<Result<Vec<_>, SetupError>>()?;

            Ok(YearCalendar {
                year: FinancialYear::new(&year.year)?,
                quarters,
            })
        })
        .collect::<Result<Vec<_>, SetupError>>()?;

    Ok(CalendarModel::new(years)?)
}

/// Parses and validates the live period against the calendar.
///
/// # Errors
///
/// Returns a calendar error if a label is invalid or the period is not part
/// of the calendar.
pub fn live_from_config(
    live: &LiveConfig,
    calendar: &CalendarModel,
) -> Result<LivePeriod, SetupError> {
    Ok(LivePeriod::new(
        Month::from_str(&live.month)?,
        Quarter::from_str(&live.quarter)?,
        FinancialYear::new(&live.year)?,
        calendar,
    )?)
}

impl AppState {
    /// Builds state from configuration: calendar, live period, row source,
    /// row cache and session limits.
    ///
    /// # Errors
    ///
    /// See [`SetupError`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SetupError> {
        let calendar = calendar_from_config(config.calendar.as_deref())?;
        let live = live_from_config(&config.live, &calendar)?;
        let source = pulse_db::row_source(&config.row_store)?;

        info!(
            years = calendar.years().len(),
            live = %live.month_ref(),
            row_store = source.name(),
            "Calendar loaded"
        );

        let data_store = DashboardDataStore::with_config(
            source,
            config.cache.max_capacity,
            config.cache.ttl_secs,
        );
        let sessions = SessionStore::with_config(
            config.sessions.max_sessions,
            Duration::from_secs(config.sessions.idle_secs),
        );
        Ok(Self {
            sessions: Arc::new(sessions),
            ..Self::new(Arc::new(calendar), live, data_store)
        })
    }
}
