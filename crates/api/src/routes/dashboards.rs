//! Department dashboard routes.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use pulse_core::dashboard::{DashboardSummary, Department};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/sessions/{id}/dashboards/{department}",
            get(get_dashboard),
        )
        .route("/dashboards/refresh", post(refresh_all))
        .route("/dashboards/{department}/refresh", post(refresh_department))
}

/// Dashboard data for one department under a session's selection.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Department slug.
    pub department: Department,
    /// Filter badge label.
    pub label: String,
    /// Label framed against the baseline.
    pub comparison_label: String,
    /// Rows, totals, baseline and per-KPI breakdown.
    #[serde(flatten)]
    pub summary: DashboardSummary,
}

/// Row count after a refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Department slug.
    pub department: Department,
    /// Rows now cached.
    pub rows: usize,
}

/// GET `/sessions/{id}/dashboards/{department}` - Rows filtered by the
/// selection, with totals and the comparison baseline.
async fn get_dashboard(
    State(state): State<AppState>,
    Path((id, department)): Path<(Uuid, String)>,
) -> ApiResult<Json<DashboardResponse>> {
    let department = Department::from_str(&department)?;

    // Snapshot the selection first; the session lock is never held across
    // the row fetch.
    let (projection, period) = state.sessions.with_session(id, |machine| {
        Ok((machine.projection()?, machine.comparison_period()?))
    })?;

    let rows = state.data_store.rows(department).await?;
    let summary = DashboardSummary::build(&rows, &projection, &period);

    info!(
        session_id = %id,
        %department,
        rows = summary.rows.len(),
        "Dashboard served"
    );

    Ok(Json(DashboardResponse {
        department,
        label: projection.display_label(),
        comparison_label: projection.comparison_label(),
        summary,
    }))
}

/// POST `/dashboards/{department}/refresh` - Reload one department.
async fn refresh_department(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> ApiResult<Json<RefreshResponse>> {
    let department = Department::from_str(&department)?;
    let rows = state.data_store.refresh(department).await?;

    info!(%department, rows = rows.len(), "Department refreshed");
    Ok(Json(RefreshResponse {
        department,
        rows: rows.len(),
    }))
}

/// POST `/dashboards/refresh` - Reload every department.
async fn refresh_all(State(state): State<AppState>) -> ApiResult<Json<Vec<RefreshResponse>>> {
    let counts = state.data_store.refresh_all().await?;

    info!(departments = counts.len(), "All departments refreshed");
    Ok(Json(
        counts
            .into_iter()
            .map(|(department, rows)| RefreshResponse { department, rows })
            .collect(),
    ))
}
