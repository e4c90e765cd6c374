use chrono::{DateTime, SecondsFormat, Utc};
use portal_application::{
    AuditLogEntry, LiveLogLine, Overview, PortalStatistics, ServerStatusSnapshot, SystemLogTail,
    UptimeSample, UptimeSnapshot,
};

use super::types::{
    AuditLogEntryResponse, LiveLogEventResponse, MemoryUsageResponse, OverviewResponse,
    ServerStatusResponse, StatisticsResponse, SystemLogResponse, UptimeResponse,
    UptimeSampleResponse,
};

fn iso_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<AuditLogEntry> for AuditLogEntryResponse {
    fn from(value: AuditLogEntry) -> Self {
        Self {
            id: value.id,
            actor_id: value.actor_id,
            actor_display_name: value.actor_display_name,
            action: value.action,
            details: value.details,
            timestamp: iso_timestamp(value.timestamp),
        }
    }
}

impl From<PortalStatistics> for StatisticsResponse {
    fn from(value: PortalStatistics) -> Self {
        Self {
            total_users: value.total_users,
            active_users: value.active_users,
            open_support_tickets: value.open_support_tickets,
        }
    }
}

impl From<UptimeSnapshot> for UptimeResponse {
    fn from(value: UptimeSnapshot) -> Self {
        Self {
            uptime_seconds: value.uptime.as_secs_f64(),
            uptime_formatted: value.formatted,
            server_time: iso_timestamp(value.server_time),
        }
    }
}

impl From<ServerStatusSnapshot> for ServerStatusResponse {
    fn from(value: ServerStatusSnapshot) -> Self {
        Self {
            status: value.status,
            uptime: value.uptime.as_secs_f64(),
            timestamp: iso_timestamp(value.timestamp),
            memory: MemoryUsageResponse {
                rss: value.resident_memory_bytes,
                virtual_memory: value.virtual_memory_bytes,
            },
            pid: value.pid,
        }
    }
}

impl From<UptimeSample> for UptimeSampleResponse {
    fn from(value: UptimeSample) -> Self {
        Self {
            timestamp: iso_timestamp(value.timestamp),
            uptime: value.uptime_percent,
        }
    }
}

impl From<Overview> for OverviewResponse {
    fn from(value: Overview) -> Self {
        Self {
            statistics: value.statistics.into(),
            server_status: value.server_status.into(),
            recent_entries: value
                .recent_entries
                .into_iter()
                .map(AuditLogEntryResponse::from)
                .collect(),
        }
    }
}

impl From<SystemLogTail> for SystemLogResponse {
    fn from(value: SystemLogTail) -> Self {
        Self {
            logs: value.lines,
            total: value.total,
        }
    }
}

impl From<LiveLogLine> for LiveLogEventResponse {
    fn from(value: LiveLogLine) -> Self {
        Self {
            timestamp: iso_timestamp(value.timestamp),
            level: value.level.as_str(),
            message: value.message,
        }
    }
}
