//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod file_system_log_source;
mod in_memory_audit_log_repository;
mod postgres_admin_token_repository;
mod postgres_audit_log_repository;
mod postgres_portal_stats_repository;
mod simulated_uptime_history;
mod sysinfo_process_metrics;
mod tokio_script_runner;
mod tokio_shutdown_scheduler;

pub use file_system_log_source::FileSystemLogSource;
pub use in_memory_audit_log_repository::InMemoryAuditLogRepository;
pub use postgres_admin_token_repository::PostgresAdminTokenRepository;
pub use postgres_audit_log_repository::PostgresAuditLogRepository;
pub use postgres_portal_stats_repository::PostgresPortalStatsRepository;
pub use simulated_uptime_history::SimulatedUptimeHistory;
pub use sysinfo_process_metrics::SysinfoProcessMetrics;
pub use tokio_script_runner::TokioScriptRunner;
pub use tokio_shutdown_scheduler::TokioShutdownScheduler;
