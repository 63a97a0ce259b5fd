//! Selection session routes.
//!
//! Every mutation responds with the full selection view so clients never
//! have to combine partial updates.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use pulse_core::calendar::{FinancialYear, Month, Quarter};
use pulse_core::period::{
    ComparisonMode, ComparisonPeriod, MetricDescription, PeriodResolver, TimeSelectionContext,
};
use pulse_core::selection::SelectionStateMachine;
use pulse_shared::AppError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the session routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/months/all", post(select_all_months))
        .route("/sessions/{id}/months/{month}/toggle", post(toggle_month))
        .route("/sessions/{id}/quarters/all", post(select_all_quarters))
        .route("/sessions/{id}/quarters/{quarter}/toggle", post(toggle_quarter))
        .route("/sessions/{id}/clear", post(clear_selection))
        .route("/sessions/{id}/year", put(set_year))
        .route("/sessions/{id}/comparison", get(get_comparison))
}

/// Selection state as seen by clients.
#[derive(Debug, Serialize)]
pub struct SelectionView {
    /// Session id.
    pub session_id: Uuid,
    /// Selected months, calendar order.
    pub months: Vec<Month>,
    /// Selected quarters, canonical order.
    pub quarters: Vec<Quarter>,
    /// Active financial year.
    pub year: FinancialYear,
    /// Filter badge label.
    pub label: String,
    /// Label framed against the baseline.
    pub comparison_label: String,
    /// Months picked individually.
    pub is_custom_mode: bool,
    /// All twelve months selected.
    pub is_full_year: bool,
    /// Live month selected.
    pub is_live: bool,
    /// Classification.
    pub context: TimeSelectionContext,
    /// Metric card captions.
    pub metric_description: MetricDescription,
}

impl SelectionView {
    fn build(session_id: Uuid, machine: &SelectionStateMachine) -> ApiResult<Self> {
        let projection = machine.projection()?;
        let selection = projection.selection();
        Ok(Self {
            session_id,
            months: selection.months.clone(),
            quarters: selection.quarters.clone(),
            year: selection.year.clone(),
            label: projection.display_label(),
            comparison_label: projection.comparison_label(),
            is_custom_mode: projection.is_custom_mode(),
            is_full_year: projection.is_full_year(),
            is_live: projection.is_live(),
            metric_description: PeriodResolver::metric_description(projection.context()),
            context: projection.context().clone(),
        })
    }
}

/// Request body for switching financial year.
#[derive(Debug, Deserialize)]
pub struct SetYearRequest {
    /// Financial year label, e.g. `FY2025`.
    pub year: String,
}

/// Query for the comparison endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ComparisonQuery {
    /// `yoy` for a year-over-year baseline; omitted for the derived one.
    pub mode: Option<String>,
}

/// Primary period with its baseline.
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    /// Session id.
    pub session_id: Uuid,
    /// Label framed against the baseline.
    pub label: String,
    /// Primary and baseline periods.
    #[serde(flatten)]
    pub period: ComparisonPeriod,
}

/// POST `/sessions` - Create a session in the default state.
async fn create_session(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<SelectionView>)> {
    let machine = SelectionStateMachine::new(state.calendar.clone(), state.live.clone())?;
    let id = state.sessions.create(machine);
    let view = state
        .sessions
        .with_session(id, |machine| SelectionView::build(id, machine))?;

    info!(session_id = %id, sessions = state.sessions.len(), "Session created");
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET `/sessions/{id}` - Current selection.
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SelectionView>> {
    let view = state
        .sessions
        .with_session(id, |machine| SelectionView::build(id, machine))?;
    Ok(Json(view))
}

/// DELETE `/sessions/{id}` - Drop a session.
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.sessions.remove(id) {
        info!(session_id = %id, "Session dropped");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("session {id}")).into())
    }
}

/// POST `/sessions/{id}/months/{month}/toggle` - Toggle one month.
async fn toggle_month(
    State(state): State<AppState>,
    Path((id, month)): Path<(Uuid, String)>,
) -> ApiResult<Json<SelectionView>> {
    let month = Month::from_str(&month)?;
    mutate(&state, id, |machine| Ok(machine.toggle_month(month)?))
        .inspect(|_| debug!(session_id = %id, %month, "Month toggled"))
}

/// POST `/sessions/{id}/quarters/{quarter}/toggle` - Toggle one quarter.
async fn toggle_quarter(
    State(state): State<AppState>,
    Path((id, quarter)): Path<(Uuid, String)>,
) -> ApiResult<Json<SelectionView>> {
    let quarter = Quarter::from_str(&quarter)?;
    mutate(&state, id, |machine| Ok(machine.toggle_quarter(quarter)?))
        .inspect(|_| debug!(session_id = %id, %quarter, "Quarter toggled"))
}

/// POST `/sessions/{id}/months/all` - Select every month of the year.
async fn select_all_months(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SelectionView>> {
    mutate(&state, id, |machine| {
        machine.select_all_months();
        Ok(())
    })
}

/// POST `/sessions/{id}/quarters/all` - Select every quarter of the year.
async fn select_all_quarters(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SelectionView>> {
    mutate(&state, id, |machine| {
        machine.select_all_quarters();
        Ok(())
    })
}

/// POST `/sessions/{id}/clear` - Reset to the default selection.
async fn clear_selection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SelectionView>> {
    mutate(&state, id, |machine| {
        machine.clear_selection();
        Ok(())
    })
}

/// PUT `/sessions/{id}/year` - Switch financial year.
async fn set_year(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetYearRequest>,
) -> ApiResult<Json<SelectionView>> {
    let year = FinancialYear::new(payload.year)?;
    debug!(session_id = %id, %year, "Switching year");
    mutate(&state, id, move |machine| Ok(machine.set_year(year)?))
}

/// GET `/sessions/{id}/comparison` - Baseline for the selection.
async fn get_comparison(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ComparisonQuery>,
) -> ApiResult<Json<ComparisonResponse>> {
    let year_over_year = match query.mode.as_deref() {
        None | Some("default") => false,
        Some(mode) if mode.eq_ignore_ascii_case("yoy") => true,
        Some(other) => {
            return Err(AppError::Validation(format!("Unknown comparison mode: {other}")).into());
        }
    };

    let response = state.sessions.with_session(id, |machine| {
        let mut context = machine.context()?;
        let period = if year_over_year {
            context.comparison_mode = ComparisonMode::YearOverYear;
            machine.year_over_year()?
        } else {
            machine.comparison_period()?
        };
        Ok(ComparisonResponse {
            session_id: id,
            label: PeriodResolver::comparison_label(&context),
            period,
        })
    })?;
    Ok(Json(response))
}

/// Applies one transition and returns the resulting view.
fn mutate(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut SelectionStateMachine) -> ApiResult<()>,
) -> ApiResult<Json<SelectionView>> {
    let view = state.sessions.with_session(id, |machine| {
        f(machine)?;
        SelectionView::build(id, machine)
    })?;
    Ok(Json(view))
}
