use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing::info;

use portal_application::ShutdownScheduler;

/// Deferred shutdown driven by a tokio timer.
///
/// `schedule_shutdown` must be called from inside a tokio runtime. The
/// server awaits [`TokioShutdownScheduler::requested`] as part of its
/// graceful-shutdown future.
#[derive(Debug, Clone, Default)]
pub struct TokioShutdownScheduler {
    notify: Arc<Notify>,
}

impl TokioShutdownScheduler {
    /// Creates a scheduler with no pending shutdown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves once a scheduled shutdown's grace period has elapsed.
    pub async fn requested(&self) {
        self.notify.notified().await;
    }
}

impl ShutdownScheduler for TokioShutdownScheduler {
    fn schedule_shutdown(&self, grace: Duration) {
        let notify = self.notify.clone();
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            info!("shutdown grace period elapsed");
            notify.notify_one();
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use portal_application::ShutdownScheduler;

    use super::TokioShutdownScheduler;

    #[tokio::test(start_paused = true)]
    async fn fires_after_the_grace_period() {
        let scheduler = TokioShutdownScheduler::new();
        let started_at = tokio::time::Instant::now();

        scheduler.schedule_shutdown(Duration::from_millis(1_000));
        scheduler.requested().await;

        assert_eq!(started_at.elapsed(), Duration::from_millis(1_000));
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_without_a_schedule() {
        let scheduler = TokioShutdownScheduler::new();

        let fired =
            tokio::time::timeout(Duration::from_secs(60), scheduler.requested()).await;

        assert!(fired.is_err());
    }
}
