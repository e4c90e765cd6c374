//! Read-only projections over the audit log and process metrics used by the
//! admin dashboard and the terminal's live tail.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::Utc;

use portal_core::AppResult;

use crate::{
    AuditLogService, PortalStatistics, PortalStatsRepository, ProcessMetricsProvider,
    SystemLogSource, UptimeHistorySource, UptimeSample,
};

mod overview;
mod stream;


pub use overview::{Overview, ServerStatusSnapshot, SystemLogTail, UptimeSnapshot, format_uptime};
pub use stream::{LiveLogFrame, LiveLogLevel, LiveLogLine, LiveLogStream};

use stream::SubscriptionGuard;

/// Most lines returned by a system log tail.
const SYSTEM_LOG_TAIL_MAX: usize = 100;

/// Tunables for the live view feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveViewSettings {
    /// Period between keep-alive frames on the live stream.
    pub keepalive_interval: Duration,
    /// Whether appended audit entries are pushed onto the live stream.
    pub push_audit_entries: bool,
    /// Number of audit entries included in the overview.
    pub overview_recent_entries: usize,
}

impl Default for LiveViewSettings {
    fn default() -> Self {
        Self {
            keepalive_interval: Duration::from_secs(30),
            push_audit_entries: false,
            overview_recent_entries: 10,
        }
    }
}

/// Ports read by the live view feed.
#[derive(Clone)]
pub struct LiveViewDependencies {
    /// User and ticket counts.
    pub stats_repository: Arc<dyn PortalStatsRepository>,
    /// Process uptime and memory.
    pub metrics_provider: Arc<dyn ProcessMetricsProvider>,
    /// Placeholder availability history.
    pub uptime_history: Arc<dyn UptimeHistorySource>,
    /// Plain-text system log.
    pub system_log: Arc<dyn SystemLogSource>,
}

/// Polling and streaming views for the admin dashboard.
#[derive(Clone)]
pub struct LiveViewService {
    settings: LiveViewSettings,
    dependencies: LiveViewDependencies,
    audit_log_service: AuditLogService,
    subscriptions: Arc<AtomicUsize>,
}

impl LiveViewService {
    /// Creates the feed.
    #[must_use]
    pub fn new(
        settings: LiveViewSettings,
        dependencies: LiveViewDependencies,
        audit_log_service: AuditLogService,
    ) -> Self {
        Self {
            settings,
            dependencies,
            audit_log_service,
            subscriptions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns counts, process status and the newest audit entries, computed
    /// fresh on every call.
    pub async fn overview(&self) -> AppResult<Overview> {
        let statistics = self.statistics().await?;
        let server_status = self.server_status()?;
        let recent_entries = self
            .audit_log_service
            .list_recent(self.settings.overview_recent_entries)
            .await?;

        Ok(Overview {
            statistics,
            server_status,
            recent_entries,
        })
    }

    /// Returns user and ticket counts.
    pub async fn statistics(&self) -> AppResult<PortalStatistics> {
        self.dependencies.stats_repository.statistics().await
    }

    /// Returns process uptime with its formatted form.
    pub fn uptime(&self) -> AppResult<UptimeSnapshot> {
        let metrics = self.dependencies.metrics_provider.snapshot()?;
        Ok(UptimeSnapshot {
            uptime: metrics.uptime,
            formatted: format_uptime(metrics.uptime),
            server_time: Utc::now(),
        })
    }

    /// Returns the process status block.
    pub fn server_status(&self) -> AppResult<ServerStatusSnapshot> {
        let metrics = self.dependencies.metrics_provider.snapshot()?;
        Ok(ServerStatusSnapshot::online(metrics, Utc::now()))
    }

    /// Returns placeholder hourly availability samples, oldest first.
    #[must_use]
    pub fn uptime_history(&self) -> Vec<UptimeSample> {
        self.dependencies.uptime_history.history(Utc::now())
    }

    /// Returns up to `limit` non-empty system log lines, newest first.
    pub async fn system_log_tail(&self, limit: usize) -> AppResult<SystemLogTail> {
        let lines = self.dependencies.system_log.read_lines().await?;
        Ok(SystemLogTail::from_lines(
            lines,
            limit.min(SYSTEM_LOG_TAIL_MAX),
        ))
    }

    /// Opens a live tail.
    ///
    /// The stream starts with a connection line and then emits keep-alive
    /// frames until dropped. Audit entries are interleaved only when
    /// pushing is enabled.
    #[must_use]
    pub fn subscribe(&self) -> LiveLogStream {
        let audit_entries = self
            .settings
            .push_audit_entries
            .then(|| self.audit_log_service.subscribe());

        LiveLogStream::open(
            self.settings.keepalive_interval,
            audit_entries,
            SubscriptionGuard::new(self.subscriptions.clone()),
        )
    }

    /// Returns the number of live tails still held by clients.
    #[must_use]
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }
}
