//! Application services and ports.

#![forbid(unsafe_code)]

mod admin_auth_service;
mod audit_log_ports;
mod audit_log_service;
mod live_view_service;
mod system_ports;
mod terminal_service;

#[cfg(test)]
mod test_fakes;

pub use admin_auth_service::{AdminAuthService, AdminTokenRepository, hash_token};
pub use audit_log_ports::{AuditLogEntry, AuditLogQuery, AuditLogRepository, NewAuditLogEntry};
pub use audit_log_service::AuditLogService;
pub use live_view_service::{
    LiveLogFrame, LiveLogLevel, LiveLogLine, LiveLogStream, LiveViewDependencies,
    LiveViewService, LiveViewSettings, Overview, ServerStatusSnapshot, SystemLogTail,
    UptimeSnapshot, format_uptime,
};
pub use system_ports::{
    PortalStatistics, PortalStatsRepository, ProcessMetrics, ProcessMetricsProvider,
    ProcessOutput, ProcessStatus, ScriptInvocation, ScriptRunner, ShutdownScheduler,
    SystemLogSource, UptimeHistorySource, UptimeSample,
};
pub use terminal_service::{
    CommandContext, CommandDefinition, CommandExecution, CommandHandler, CommandOutcome,
    CommandRegistry, DeferredAction, TerminalDependencies, TerminalError, TerminalService,
    TerminalSettings,
};
