//! Port fakes shared by the service tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Mutex;

use portal_core::{AdminIdentity, AppError, AppResult};

use crate::{
    AuditLogEntry, AuditLogQuery, AuditLogRepository, NewAuditLogEntry, PortalStatistics,
    PortalStatsRepository, ProcessMetrics, ProcessMetricsProvider, ProcessOutput, ProcessStatus,
    ScriptInvocation, ScriptRunner, ShutdownScheduler, SystemLogSource, UptimeHistorySource,
    UptimeSample,
};

pub(crate) fn admin(admin_id: i64) -> AdminIdentity {
    AdminIdentity::new(admin_id, format!("admin{admin_id}"), "admin")
}

pub(crate) fn fixed_time(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, second)
        .single()
        .unwrap_or_default()
}

#[derive(Default)]
pub(crate) struct FakeAuditLogRepository {
    pub(crate) entries: Mutex<Vec<AuditLogEntry>>,
    pub(crate) unavailable: AtomicBool,
}

impl FakeAuditLogRepository {
    pub(crate) async fn count(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub(crate) async fn actions(&self) -> Vec<String> {
        self.entries
            .lock()
            .await
            .iter()
            .map(|entry| entry.action.clone())
            .collect()
    }

    pub(crate) fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuditLogRepository for FakeAuditLogRepository {
    async fn append_entry(&self, entry: NewAuditLogEntry) -> AppResult<AuditLogEntry> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Internal("audit store unavailable".to_owned()));
        }

        let mut entries = self.entries.lock().await;
        let id = i64::try_from(entries.len()).unwrap_or(i64::MAX) + 1;
        let stored = AuditLogEntry {
            id,
            actor_id: entry.actor_id,
            actor_display_name: entry.actor_id.map(|actor_id| format!("admin{actor_id}")),
            action: entry.action.as_str().to_owned(),
            details: entry.details,
            timestamp: fixed_time(0),
        };
        entries.push(stored.clone());
        Ok(stored)
    }

    async fn list_recent_entries(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        let mut entries: Vec<AuditLogEntry> = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|entry| query.action.as_deref().is_none_or(|action| entry.action == action))
            .filter(|entry| query.actor_id.is_none_or(|actor_id| entry.actor_id == Some(actor_id)))
            .cloned()
            .collect();
        entries.sort_by(|left, right| {
            right
                .timestamp
                .cmp(&left.timestamp)
                .then(right.id.cmp(&left.id))
        });
        entries.truncate(query.limit);
        Ok(entries)
    }
}

pub(crate) struct FakeStatsRepository {
    pub(crate) statistics: Option<PortalStatistics>,
}

impl FakeStatsRepository {
    pub(crate) fn with_counts(users: i64, tickets: i64) -> Self {
        Self {
            statistics: Some(PortalStatistics {
                total_users: users,
                active_users: users,
                total_support_tickets: tickets,
                open_support_tickets: tickets,
            }),
        }
    }

    pub(crate) fn failing() -> Self {
        Self { statistics: None }
    }
}

#[async_trait]
impl PortalStatsRepository for FakeStatsRepository {
    async fn statistics(&self) -> AppResult<PortalStatistics> {
        self.statistics
            .clone()
            .ok_or_else(|| AppError::Internal("statistics query failed".to_owned()))
    }
}

pub(crate) struct FakeMetrics;

impl ProcessMetricsProvider for FakeMetrics {
    fn snapshot(&self) -> AppResult<ProcessMetrics> {
        Ok(ProcessMetrics {
            uptime: Duration::from_secs(3 * 3600 + 25 * 60 + 7),
            resident_memory_bytes: 48 * 1024 * 1024,
            virtual_memory_bytes: 512 * 1024 * 1024,
            pid: 4242,
        })
    }
}

/// Script runner that answers every invocation with one canned result.
pub(crate) struct FakeScriptRunner {
    pub(crate) result: Result<ProcessOutput, String>,
    pub(crate) invocations: Mutex<Vec<ScriptInvocation>>,
    pub(crate) delay: Option<Duration>,
}

impl FakeScriptRunner {
    pub(crate) fn exiting(code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            result: Ok(ProcessOutput {
                stdout: stdout.to_owned(),
                stderr: stderr.to_owned(),
                status: ProcessStatus::Exited(code),
            }),
            invocations: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub(crate) fn timing_out(partial_stdout: &str) -> Self {
        Self {
            result: Ok(ProcessOutput {
                stdout: partial_stdout.to_owned(),
                stderr: String::new(),
                status: ProcessStatus::TimedOut,
            }),
            invocations: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn unable_to_spawn(message: &str) -> Self {
        Self {
            result: Err(message.to_owned()),
            invocations: Mutex::new(Vec::new()),
            delay: None,
        }
    }
}

#[async_trait]
impl ScriptRunner for FakeScriptRunner {
    async fn run(&self, invocation: ScriptInvocation) -> AppResult<ProcessOutput> {
        self.invocations.lock().await.push(invocation);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone().map_err(AppError::Internal)
    }
}

#[derive(Default)]
pub(crate) struct FakeShutdownScheduler {
    pub(crate) scheduled: std::sync::Mutex<Vec<Duration>>,
}

impl FakeShutdownScheduler {
    pub(crate) fn scheduled(&self) -> Vec<Duration> {
        self.scheduled
            .lock()
            .map(|scheduled| scheduled.clone())
            .unwrap_or_default()
    }
}

impl ShutdownScheduler for FakeShutdownScheduler {
    fn schedule_shutdown(&self, grace: Duration) {
        if let Ok(mut scheduled) = self.scheduled.lock() {
            scheduled.push(grace);
        }
    }
}

pub(crate) struct FakeUptimeHistory;

impl UptimeHistorySource for FakeUptimeHistory {
    fn history(&self, now: DateTime<Utc>) -> Vec<UptimeSample> {
        vec![UptimeSample {
            timestamp: now,
            uptime_percent: 99.5,
        }]
    }
}

pub(crate) struct FakeSystemLog {
    pub(crate) lines: Vec<String>,
}

#[async_trait]
impl SystemLogSource for FakeSystemLog {
    async fn read_lines(&self) -> AppResult<Vec<String>> {
        Ok(self.lines.clone())
    }
}

pub(crate) fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
