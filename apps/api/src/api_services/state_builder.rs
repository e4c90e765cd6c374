use std::sync::Arc;

use portal_application::{
    AdminAuthService, AuditLogService, LiveViewDependencies, LiveViewService,
    TerminalDependencies, TerminalService,
};
use portal_core::AppError;
use portal_infrastructure::{
    FileSystemLogSource, PostgresAdminTokenRepository, PostgresAuditLogRepository,
    PostgresPortalStatsRepository, SimulatedUptimeHistory, SysinfoProcessMetrics,
    TokioScriptRunner, TokioShutdownScheduler,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(
    pool: PgPool,
    config: &ApiConfig,
    shutdown_scheduler: TokioShutdownScheduler,
) -> Result<AppState, AppError> {
    let audit_log_service =
        AuditLogService::new(Arc::new(PostgresAuditLogRepository::new(pool.clone())));
    let stats_repository = Arc::new(PostgresPortalStatsRepository::new(pool.clone()));
    let metrics_provider = Arc::new(SysinfoProcessMetrics::new()?);

    let terminal_service = TerminalService::new(
        &config.terminal,
        TerminalDependencies {
            script_runner: Arc::new(TokioScriptRunner::new()),
            stats_repository: stats_repository.clone(),
            metrics_provider: metrics_provider.clone(),
            shutdown_scheduler: Arc::new(shutdown_scheduler),
        },
        audit_log_service.clone(),
    );

    let live_view_service = LiveViewService::new(
        config.live_view.clone(),
        LiveViewDependencies {
            stats_repository,
            metrics_provider,
            uptime_history: Arc::new(SimulatedUptimeHistory),
            system_log: Arc::new(FileSystemLogSource::new(config.system_log_path.clone())),
        },
        audit_log_service.clone(),
    );

    Ok(AppState {
        admin_auth_service: AdminAuthService::new(Arc::new(PostgresAdminTokenRepository::new(
            pool,
        ))),
        audit_log_service,
        terminal_service,
        live_view_service,
    })
}
