use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::IntoResponse;

use portal_application::{
    AdminAuthService, AdminTokenRepository, AuditLogService, LiveViewDependencies,
    LiveViewService, LiveViewSettings, PortalStatistics, PortalStatsRepository, ProcessMetrics,
    ProcessMetricsProvider, ProcessOutput, ProcessStatus, ScriptInvocation, ScriptRunner,
    ShutdownScheduler, TerminalDependencies, TerminalService, TerminalSettings,
};
use portal_core::{AdminIdentity, AppResult};
use portal_domain::AdminAction;
use portal_infrastructure::{
    FileSystemLogSource, InMemoryAuditLogRepository, SimulatedUptimeHistory,
};

use tower::ServiceExt;

use crate::api_router::build_router;
use crate::dto::{AdminLogsQuery, ExecuteCommandRequest};
use crate::state::AppState;

use super::audit::list_admin_logs_handler;
use super::dashboard::{overview_handler, uptime_history_handler};
use super::health::not_found_handler;
use super::live_logs::live_logs_handler;
use super::terminal::execute_command_handler;

struct StaticTokens(Option<AdminIdentity>);

#[async_trait]
impl AdminTokenRepository for StaticTokens {
    async fn find_admin_by_token_hash(
        &self,
        _token_hash: &str,
    ) -> AppResult<Option<AdminIdentity>> {
        Ok(self.0.clone())
    }
}

struct StaticStats;

#[async_trait]
impl PortalStatsRepository for StaticStats {
    async fn statistics(&self) -> AppResult<PortalStatistics> {
        Ok(PortalStatistics {
            total_users: 5,
            active_users: 4,
            total_support_tickets: 2,
            open_support_tickets: 1,
        })
    }
}

struct StaticMetrics;

impl ProcessMetricsProvider for StaticMetrics {
    fn snapshot(&self) -> AppResult<ProcessMetrics> {
        Ok(ProcessMetrics {
            uptime: Duration::from_secs(600),
            resident_memory_bytes: 32 * 1024 * 1024,
            virtual_memory_bytes: 256 * 1024 * 1024,
            pid: 99,
        })
    }
}

struct EchoRunner;

#[async_trait]
impl ScriptRunner for EchoRunner {
    async fn run(&self, invocation: ScriptInvocation) -> AppResult<ProcessOutput> {
        Ok(ProcessOutput {
            stdout: format!("ran {}\n", invocation.args.join(" ")),
            stderr: String::new(),
            status: ProcessStatus::Exited(0),
        })
    }
}

struct NoShutdown;

impl ShutdownScheduler for NoShutdown {
    fn schedule_shutdown(&self, _grace: Duration) {}
}

fn admin() -> AdminIdentity {
    AdminIdentity::new(1, "root", "admin")
}

fn test_state() -> (AppState, Arc<InMemoryAuditLogRepository>) {
    test_state_with_tokens(StaticTokens(None))
}

fn test_state_with_tokens(tokens: StaticTokens) -> (AppState, Arc<InMemoryAuditLogRepository>) {
    let repository = Arc::new(InMemoryAuditLogRepository::with_admin_names(HashMap::from([
        (1, "root".to_owned()),
    ])));
    let audit_log_service = AuditLogService::new(repository.clone());

    let terminal_service = TerminalService::new(
        &TerminalSettings::default(),
        TerminalDependencies {
            script_runner: Arc::new(EchoRunner),
            stats_repository: Arc::new(StaticStats),
            metrics_provider: Arc::new(StaticMetrics),
            shutdown_scheduler: Arc::new(NoShutdown),
        },
        audit_log_service.clone(),
    );
    let live_view_service = LiveViewService::new(
        LiveViewSettings::default(),
        LiveViewDependencies {
            stats_repository: Arc::new(StaticStats),
            metrics_provider: Arc::new(StaticMetrics),
            uptime_history: Arc::new(SimulatedUptimeHistory),
            system_log: Arc::new(FileSystemLogSource::new(
                std::env::temp_dir().join("portal-api-handler-tests-missing.log"),
            )),
        },
        audit_log_service.clone(),
    );

    (
        AppState {
            admin_auth_service: AdminAuthService::new(Arc::new(tokens)),
            audit_log_service,
            terminal_service,
            live_view_service,
        },
        repository,
    )
}

async fn execute(state: &AppState, command: Option<&str>) -> axum::response::Response {
    execute_command_handler(
        State(state.clone()),
        Extension(admin()),
        Json(ExecuteCommandRequest {
            command: command.map(ToOwned::to_owned),
        }),
    )
    .await
    .into_response()
}

#[tokio::test]
async fn server_status_command_succeeds_and_is_audited() {
    let (state, repository) = test_state();

    let result = execute_command_handler(
        State(state.clone()),
        Extension(admin()),
        Json(ExecuteCommandRequest {
            command: Some("server status".to_owned()),
        }),
    )
    .await;

    assert!(matches!(
        result,
        Ok(Json(ref response)) if response.success
            && response.output.contains("Uptime: 10 minutes")
            && response.output.contains("Memory: 32 MB")
            && response.output.contains("Port: 3000")
    ));
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn unknown_and_missing_commands_are_bad_requests() {
    let (state, repository) = test_state();

    let unknown = execute(&state, Some("bogus")).await;
    let missing = execute(&state, None).await;

    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn admin_logs_are_filtered_by_action() {
    let (state, _) = test_state();
    let _ = execute(&state, Some("server status")).await;
    let _ = execute(&state, Some("db stats")).await;
    let _ = execute(&state, Some("help")).await;

    let listed = list_admin_logs_handler(
        State(state.clone()),
        Query(AdminLogsQuery {
            action: Some("DB_STATS".to_owned()),
            ..AdminLogsQuery::default()
        }),
    )
    .await;

    assert!(matches!(
        listed,
        Ok(Json(ref entries)) if entries.len() == 1
            && entries[0].action == "DB_STATS"
            && entries[0].details == "Users: 5, Tickets: 2"
            && entries[0].actor_display_name.as_deref() == Some("root")
    ));
}

#[tokio::test]
async fn admin_logs_reject_unknown_action_filters() {
    let (state, _) = test_state();

    let response = list_admin_logs_handler(
        State(state),
        Query(AdminLogsQuery {
            action: Some("DROP_TABLES".to_owned()),
            ..AdminLogsQuery::default()
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn overview_includes_recent_terminal_activity() {
    let (state, _) = test_state();
    state
        .audit_log_service
        .record(Some(1), AdminAction::VerifyRun, "Verify script executed")
        .await;

    let overview = overview_handler(State(state)).await;

    assert!(matches!(
        overview,
        Ok(Json(ref overview)) if overview.statistics.total_users == 5
            && overview.server_status.pid == 99
            && overview.recent_entries.len() == 1
    ));
}

#[tokio::test]
async fn uptime_history_returns_a_day_of_samples() {
    let (state, _) = test_state();

    let Json(history) = uptime_history_handler(State(state)).await;

    assert_eq!(history.len(), 24);
}

#[tokio::test]
async fn live_logs_respond_with_an_event_stream() {
    let (state, _) = test_state();

    let response = live_logs_handler(State(state.clone()), Extension(admin()))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/event-stream")
    );
    assert_eq!(state.live_view_service.active_subscriptions(), 1);
    drop(response);
    assert_eq!(state.live_view_service.active_subscriptions(), 0);
}

#[tokio::test]
async fn unmatched_routes_are_not_found() {
    let response = not_found_handler().await.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

async fn routed(tokens: StaticTokens, authorization: Option<&str>) -> (StatusCode, String) {
    let (state, _) = test_state_with_tokens(tokens);
    let router = match build_router(state, "http://localhost:3000") {
        Ok(router) => router,
        Err(error) => panic!("router should build: {error}"),
    };

    let mut request = Request::builder().uri("/api/admin/statistics");
    if let Some(authorization) = authorization {
        request = request.header(header::AUTHORIZATION, authorization);
    }
    let request = match request.body(Body::empty()) {
        Ok(request) => request,
        Err(error) => panic!("request should build: {error}"),
    };

    let response = match router.oneshot(request).await {
        Ok(response) => response,
        Err(error) => match error {},
    };
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default();

    (status, body)
}

#[tokio::test]
async fn admin_routes_require_a_bearer_token() {
    let (status, body) = routed(StaticTokens(Some(admin())), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    assert_eq!(body["error"], "No token provided");
}

#[tokio::test]
async fn admin_routes_reject_non_admin_tokens() {
    let support = AdminIdentity::new(2, "support", "user");

    let (status, body) = routed(StaticTokens(Some(support)), Some("Bearer support-token")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    assert_eq!(body["error"], "Admin access required");
}

#[tokio::test]
async fn admin_routes_reject_unknown_tokens() {
    let (status, body) = routed(StaticTokens(None), Some("Bearer stale-token")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn admin_tokens_reach_the_handler() {
    let (status, body) = routed(StaticTokens(Some(admin())), Some("Bearer root-token")).await;

    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    assert_eq!(body["total_users"], 5);
}
