mod metrics;
mod process;
mod storage;

pub use metrics::{
    ProcessMetrics, ProcessMetricsProvider, ShutdownScheduler, UptimeHistorySource, UptimeSample,
};
pub use process::{ProcessOutput, ProcessStatus, ScriptInvocation, ScriptRunner};
pub use storage::{PortalStatistics, PortalStatsRepository, SystemLogSource};
