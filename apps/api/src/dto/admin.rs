mod conversions;
mod types;

pub use types::{
    AdminLogsQuery, AuditLogEntryResponse, LiveLogEventResponse, MemoryUsageResponse,
    OverviewResponse, ServerStatusResponse, StatisticsResponse, SystemLogResponse,
    UptimeResponse, UptimeSampleResponse,
};
