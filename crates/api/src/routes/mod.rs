//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod calendar;
pub mod dashboards;
pub mod health;
pub mod sessions;


/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(calendar::routes())
        .merge(sessions::routes())
        .merge(dashboards::routes())
}
