// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HistoricMe Progress API Server
//!
//! Serves XP, level, badge, daily task and streak bookkeeping for the
//! HistoricMe mobile app.

use historicme_progress::{
    config::Config,
    db::{FileStore, KeyValueStore, MemoryStore, ProgressDb},
    services::{GamificationService, LogFeedback},
    time_utils::{Clock, SystemClock},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting HistoricMe Progress API");

    // Open the key-value store
    let store: Arc<dyn KeyValueStore> = match &config.store_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using file store");
            Arc::new(FileStore::open(path).await?)
        }
        None => {
            tracing::warn!("PROGRESS_STORE_PATH not set, progress is kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    // Calendar used for streaks and daily tasks
    let clock: Arc<dyn Clock> = match config.utc_offset_minutes {
        Some(minutes) => Arc::new(
            SystemClock::with_utc_offset_minutes(minutes)
                .ok_or("PROGRESS_UTC_OFFSET_MINUTES out of range")?,
        ),
        None => Arc::new(SystemClock::local()),
    };
    tracing::info!(
        utc_offset_minutes = ?config.utc_offset_minutes,
        "Day boundary configured"
    );

    let gamification =
        GamificationService::new(ProgressDb::new(store), clock, Arc::new(LogFeedback));

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        gamification,
    });

    // Build router
    let app = historicme_progress::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("historicme_progress=debug,info")
            }),
        )
        .with(format)
        .init();
}
