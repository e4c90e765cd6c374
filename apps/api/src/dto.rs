mod admin;
mod common;
mod terminal;

pub use admin::{
    AdminLogsQuery, AuditLogEntryResponse, LiveLogEventResponse, MemoryUsageResponse,
    OverviewResponse, ServerStatusResponse, StatisticsResponse, SystemLogResponse,
    UptimeResponse, UptimeSampleResponse,
};
pub use common::HealthResponse;
pub use terminal::{ExecuteCommandRequest, ExecuteCommandResponse};
