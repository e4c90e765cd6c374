use portal_application::{AdminAuthService, AuditLogService, LiveViewService, TerminalService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub admin_auth_service: AdminAuthService,
    pub audit_log_service: AuditLogService,
    pub terminal_service: TerminalService,
    pub live_view_service: LiveViewService,
}
