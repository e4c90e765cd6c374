use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use portal_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let admin_routes = Router::new()
        .route(
            "/api/admin/terminal/execute",
            post(handlers::terminal::execute_command_handler),
        )
        .route(
            "/api/admin/logs",
            get(handlers::audit::list_admin_logs_handler),
        )
        .route(
            "/api/admin/activity-logs",
            get(handlers::audit::list_admin_logs_handler),
        )
        .route(
            "/api/admin/overview",
            get(handlers::dashboard::overview_handler),
        )
        .route(
            "/api/admin/statistics",
            get(handlers::dashboard::statistics_handler),
        )
        .route("/api/admin/uptime", get(handlers::dashboard::uptime_handler))
        .route(
            "/api/admin/server-status",
            get(handlers::dashboard::server_status_handler),
        )
        .route(
            "/api/admin/uptime-history",
            get(handlers::dashboard::uptime_history_handler),
        )
        .route(
            "/api/admin/system-logs",
            get(handlers::dashboard::system_logs_handler),
        )
        .route(
            "/api/admin/live-logs",
            get(handlers::live_logs::live_logs_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_admin,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(admin_routes)
        .fallback(handlers::health::not_found_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
