//! Health check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Backend serving department rows.
    pub row_store: &'static str,
    /// Live period the dashboards default to.
    pub live_period: String,
    /// Open selection sessions.
    pub sessions: u64,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let live = &state.live;
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        row_store: state.data_store.source_name(),
        live_period: format!("{} {} {}", live.month, live.quarter, live.year),
        sessions: state.sessions.len(),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
