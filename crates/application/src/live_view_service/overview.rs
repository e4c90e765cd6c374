use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::{AuditLogEntry, PortalStatistics, ProcessMetrics};

/// Dashboard snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    /// User and ticket counts.
    pub statistics: PortalStatistics,
    /// Process uptime and memory.
    pub server_status: ServerStatusSnapshot,
    /// Newest audit entries.
    pub recent_entries: Vec<AuditLogEntry>,
}

/// Process uptime as of `server_time`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UptimeSnapshot {
    /// Time since the server started.
    pub uptime: Duration,
    /// `"{h}h {m}m {s}s"`.
    pub formatted: String,
    /// Wall clock at sampling time.
    pub server_time: DateTime<Utc>,
}

/// Process status block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatusSnapshot {
    /// Always `online` while the process answers.
    pub status: &'static str,
    /// Time since the server started.
    pub uptime: Duration,
    /// Wall clock at sampling time.
    pub timestamp: DateTime<Utc>,
    /// Resident set size in bytes.
    pub resident_memory_bytes: u64,
    /// Virtual memory size in bytes.
    pub virtual_memory_bytes: u64,
    /// Operating system process id.
    pub pid: u32,
}

impl ServerStatusSnapshot {
    pub(super) fn online(metrics: ProcessMetrics, timestamp: DateTime<Utc>) -> Self {
        Self {
            status: "online",
            uptime: metrics.uptime,
            timestamp,
            resident_memory_bytes: metrics.resident_memory_bytes,
            virtual_memory_bytes: metrics.virtual_memory_bytes,
            pid: metrics.pid,
        }
    }
}

/// Newest-first slice of the system log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemLogTail {
    /// Returned lines, newest first.
    pub lines: Vec<String>,
    /// Non-empty lines in the whole file.
    pub total: usize,
}

impl SystemLogTail {
    pub(super) fn from_lines(lines: Vec<String>, limit: usize) -> Self {
        let mut lines: Vec<String> = lines
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect();
        let total = lines.len();
        lines.reverse();
        lines.truncate(limit);

        Self { lines, total }
    }
}

/// Formats an uptime as whole hours, minutes and seconds.
#[must_use]
pub fn format_uptime(uptime: Duration) -> String {
    let seconds = uptime.as_secs();
    format!(
        "{}h {}m {}s",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
