//! Calendar discovery.

use axum::{Json, Router, extract::State, routing::get};
use pulse_core::calendar::{LivePeriod, YearCalendar};
use serde::Serialize;

use crate::AppState;

/// Calendar tables and the live period.
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    /// Financial years with their quarters, canonical order.
    pub years: Vec<YearCalendar>,
    /// Live reporting period.
    pub live: LivePeriod,
}

/// Creates the calendar routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/calendar", get(get_calendar))
}

/// GET `/calendar` - Financial years, quarters and the live period.
async fn get_calendar(State(state): State<AppState>) -> Json<CalendarResponse> {
    Json(CalendarResponse {
        years: state.calendar.years().to_vec(),
        live: state.live.clone(),
    })
}
