use std::path::PathBuf;
use std::time::Duration;

/// Bound for the verification script.
pub(super) const VERIFY_TIMEOUT: Duration = Duration::from_secs(30);
/// Bound for the log-viewing script.
pub(super) const LOGS_SHOW_TIMEOUT: Duration = Duration::from_secs(10);
/// Bound for the storage file listing used by `db stats`.
pub(super) const DB_LISTING_TIMEOUT: Duration = Duration::from_secs(5);

/// Host-specific inputs for the built-in commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSettings {
    /// Working directory for external scripts.
    pub project_root: PathBuf,
    /// Verification script, relative to the project root.
    pub verify_script: String,
    /// Log-viewing script, relative to the project root.
    pub log_script: String,
    /// Storage file listed by `db stats`; `None` reports `N/A`.
    pub database_file: Option<PathBuf>,
    /// Listener port reported by `server status`.
    pub server_port: u16,
    /// Delay between the `restart` response and shutdown.
    pub restart_grace: Duration,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            verify_script: "verify.sh".to_owned(),
            log_script: "log.sh".to_owned(),
            database_file: None,
            server_port: 3000,
            restart_grace: Duration::from_millis(1_000),
        }
    }
}
