//! ISP portal admin API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use portal_core::AppError;
use portal_infrastructure::TokioShutdownScheduler;
use tokio::sync::Notify;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, init_tracing};
use crate::api_router::build_router;
use crate::api_services::{build_app_state, connect_and_migrate};

const SHUTDOWN_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let pool = connect_and_migrate(&config.database_url).await?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let shutdown_scheduler = TokioShutdownScheduler::new();
    let app_state = build_app_state(pool, &config, shutdown_scheduler.clone())?;
    let app = build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "portal-api listening");

    let shutdown_started = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown({
            let shutdown_started = shutdown_started.clone();
            async move {
                shutdown_signal(shutdown_scheduler).await;
                shutdown_started.notify_one();
            }
        })
        .into_future();

    // Live log streams never end on their own.
    let drain_deadline = async {
        shutdown_started.notified().await;
        tokio::time::sleep(SHUTDOWN_DRAIN_TIMEOUT).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(|error| AppError::Internal(format!("api server error: {error}")))?;
        }
        () = drain_deadline => {
            warn!(
                timeout_ms = SHUTDOWN_DRAIN_TIMEOUT.as_millis() as u64,
                "closing connections still open after shutdown deadline"
            );
        }
    }

    info!("portal-api stopped");
    Ok(())
}

async fn shutdown_signal(shutdown_scheduler: TokioShutdownScheduler) {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(error = %error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => info!("received ctrl-c, shutting down"),
        () = shutdown_scheduler.requested() => info!("restart requested, shutting down"),
    }
}
