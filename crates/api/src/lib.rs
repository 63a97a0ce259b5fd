//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for selection sessions and dashboards
//! - Session storage with idle eviction and one lock per session
//! - Error responses
//! - Startup wiring from configuration

pub mod error;
pub mod routes;
pub mod session;
pub mod setup;

use std::sync::Arc;

use axum::Router;
use pulse_core::calendar::{CalendarModel, LivePeriod};
use pulse_core::dashboard::DashboardDataStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use session::SessionStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Financial calendar.
    pub calendar: Arc<CalendarModel>,
    /// Configured live period.
    pub live: LivePeriod,
    /// Selection sessions.
    pub sessions: Arc<SessionStore>,
    /// Cached department rows.
    pub data_store: DashboardDataStore,
}

impl AppState {
    /// Creates state with no sessions.
    #[must_use]
    pub fn new(
        calendar: Arc<CalendarModel>,
        live: LivePeriod,
        data_store: DashboardDataStore,
    ) -> Self {
        Self {
            calendar,
            live,
            sessions: Arc::new(SessionStore::new()),
            data_store,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
