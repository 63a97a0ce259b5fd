//! Pulse API Server
//!
//! Main entry point for the Pulse dashboard backend.

use anyhow::Context;
use chrono::Local;
use pulse_core::calendar::{LivePeriod, Month};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse_api::{AppState, create_router};
use pulse_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "pulse=debug,pulse_api=debug,pulse_db=debug,tower_http=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let state = AppState::from_config(&config).context("Invalid configuration")?;
    warn_if_live_period_lags(&state.live);

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Warns when the configured live month is not the wall-clock month.
fn warn_if_live_period_lags(live: &LivePeriod) {
    let today = Local::now().date_naive();
    let current = Month::of_date(today);
    if current != live.month {
        warn!(
            live = %live.month_ref(),
            wall_clock = %current,
            "Configured live month differs from the calendar month"
        );
    }
}
