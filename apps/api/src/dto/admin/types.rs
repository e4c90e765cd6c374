use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query parameters for admin log listings.
#[derive(Debug, Default, Deserialize)]
pub struct AdminLogsQuery {
    pub limit: Option<usize>,
    pub action: Option<String>,
    pub actor_id: Option<i64>,
}

/// API representation of an audit log entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-log-entry-response.ts"
)]
pub struct AuditLogEntryResponse {
    pub id: i64,
    pub actor_id: Option<i64>,
    pub actor_display_name: Option<String>,
    pub action: String,
    pub details: String,
    pub timestamp: String,
}

/// User and ticket counts.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/statistics-response.ts"
)]
pub struct StatisticsResponse {
    pub total_users: i64,
    pub active_users: i64,
    pub open_support_tickets: i64,
}

/// Process uptime.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/uptime-response.ts"
)]
pub struct UptimeResponse {
    pub uptime_seconds: f64,
    pub uptime_formatted: String,
    pub server_time: String,
}

/// Process memory in bytes.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/memory-usage-response.ts"
)]
pub struct MemoryUsageResponse {
    pub rss: u64,
    pub virtual_memory: u64,
}

/// Process status block.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/server-status-response.ts"
)]
pub struct ServerStatusResponse {
    pub status: &'static str,
    pub uptime: f64,
    pub timestamp: String,
    pub memory: MemoryUsageResponse,
    pub pid: u32,
}

/// One placeholder availability sample.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/uptime-sample-response.ts"
)]
pub struct UptimeSampleResponse {
    pub timestamp: String,
    pub uptime: f64,
}

/// Dashboard snapshot.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/overview-response.ts"
)]
pub struct OverviewResponse {
    pub statistics: StatisticsResponse,
    pub server_status: ServerStatusResponse,
    pub recent_entries: Vec<AuditLogEntryResponse>,
}

/// System log tail, newest first.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/system-log-response.ts"
)]
pub struct SystemLogResponse {
    pub logs: Vec<String>,
    pub total: usize,
}

/// Data frame of the live log stream.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/live-log-event-response.ts"
)]
pub struct LiveLogEventResponse {
    pub timestamp: String,
    pub level: &'static str,
    pub message: String,
}
