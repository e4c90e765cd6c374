use std::time::Duration;

use chrono::{DateTime, Utc};

use portal_core::AppResult;

/// Point-in-time process introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMetrics {
    /// Time since the server started.
    pub uptime: Duration,
    /// Resident set size in bytes.
    pub resident_memory_bytes: u64,
    /// Virtual memory size in bytes.
    pub virtual_memory_bytes: u64,
    /// Operating system process id.
    pub pid: u32,
}

impl ProcessMetrics {
    /// Resident memory rounded to whole mebibytes.
    #[must_use]
    pub fn resident_memory_mb(&self) -> u64 {
        (self.resident_memory_bytes as f64 / 1024.0 / 1024.0).round() as u64
    }

    /// Uptime rounded to whole minutes.
    #[must_use]
    pub fn uptime_minutes(&self) -> u64 {
        (self.uptime.as_secs_f64() / 60.0).round() as u64
    }
}

/// Port for reading the current process metrics.
pub trait ProcessMetricsProvider: Send + Sync {
    /// Takes a fresh snapshot.
    fn snapshot(&self) -> AppResult<ProcessMetrics>;
}

/// Port for terminating the host process after the response is flushed.
pub trait ShutdownScheduler: Send + Sync {
    /// Schedules a graceful shutdown once `grace` has elapsed.
    fn schedule_shutdown(&self, grace: Duration);
}

/// One hourly availability sample.
#[derive(Debug, Clone, PartialEq)]
pub struct UptimeSample {
    /// Start of the sampled hour.
    pub timestamp: DateTime<Utc>,
    /// Availability percentage.
    pub uptime_percent: f64,
}

/// Port for availability history.
///
/// The shipped adapter generates placeholder values; callers must not treat
/// them as measured SLA data.
pub trait UptimeHistorySource: Send + Sync {
    /// Returns hourly samples ending at `now`, oldest first.
    fn history(&self, now: DateTime<Utc>) -> Vec<UptimeSample>;
}
