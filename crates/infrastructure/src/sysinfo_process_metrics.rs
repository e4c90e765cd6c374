use std::sync::Mutex;
use std::time::Instant;

use sysinfo::{Pid, ProcessesToUpdate, System};

use portal_application::{ProcessMetrics, ProcessMetricsProvider};
use portal_core::{AppError, AppResult};

/// Process metrics for the running server read through `sysinfo`.
///
/// Uptime is measured from construction, which happens at startup.
pub struct SysinfoProcessMetrics {
    system: Mutex<System>,
    pid: Pid,
    started_at: Instant,
}

impl SysinfoProcessMetrics {
    /// Creates a provider for the current process.
    pub fn new() -> AppResult<Self> {
        let pid = sysinfo::get_current_pid().map_err(|error| {
            AppError::Internal(format!("failed to resolve current process id: {error}"))
        })?;

        Ok(Self {
            system: Mutex::new(System::new()),
            pid,
            started_at: Instant::now(),
        })
    }
}

impl ProcessMetricsProvider for SysinfoProcessMetrics {
    fn snapshot(&self) -> AppResult<ProcessMetrics> {
        let mut system = self
            .system
            .lock()
            .map_err(|_| AppError::Internal("process metrics lock poisoned".to_owned()))?;
        system.refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);

        let process = system.process(self.pid).ok_or_else(|| {
            AppError::Internal(format!("process {} is not visible", self.pid))
        })?;

        Ok(ProcessMetrics {
            uptime: self.started_at.elapsed(),
            resident_memory_bytes: process.memory(),
            virtual_memory_bytes: process.virtual_memory(),
            pid: self.pid.as_u32(),
        })
    }
}

#[cfg(test)]
mod tests {
    use portal_application::ProcessMetricsProvider;

    use super::SysinfoProcessMetrics;

    #[test]
    fn snapshot_describes_the_current_process() {
        let snapshot = SysinfoProcessMetrics::new().and_then(|metrics| metrics.snapshot());

        assert!(matches!(
            snapshot,
            Ok(ref metrics) if metrics.pid == std::process::id()
                && metrics.resident_memory_bytes > 0
        ));
    }
}
