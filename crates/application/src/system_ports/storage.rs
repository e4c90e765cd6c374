use async_trait::async_trait;

use portal_core::AppResult;

/// Row counts over the customer-facing tables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PortalStatistics {
    /// All customer accounts.
    pub total_users: i64,
    /// Accounts with status `active`.
    pub active_users: i64,
    /// All support tickets.
    pub total_support_tickets: i64,
    /// Tickets with status `open`.
    pub open_support_tickets: i64,
}

/// Read-only port over the account and ticket tables.
#[async_trait]
pub trait PortalStatsRepository: Send + Sync {
    /// Counts users and tickets.
    async fn statistics(&self) -> AppResult<PortalStatistics>;
}

/// Port for the plain-text system log file.
#[async_trait]
pub trait SystemLogSource: Send + Sync {
    /// Returns every line in file order; a missing file yields no lines.
    async fn read_lines(&self) -> AppResult<Vec<String>>;
}
