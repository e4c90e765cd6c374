use async_trait::async_trait;
use chrono::{DateTime, Utc};

use portal_core::AppResult;
use portal_domain::AdminAction;

/// Immutable audit log row as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    /// Store-assigned, monotonically increasing identifier.
    pub id: i64,
    /// Admin that performed the action; `None` for system entries.
    pub actor_id: Option<i64>,
    /// Username of the actor, resolved at read time.
    pub actor_display_name: Option<String>,
    /// Stable action tag.
    pub action: String,
    /// Free-text supplementary payload, possibly empty.
    pub details: String,
    /// Creation time set by the store.
    pub timestamp: DateTime<Utc>,
}

/// Payload for one audit append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditLogEntry {
    /// Admin that performed the action.
    pub actor_id: Option<i64>,
    /// Stable action tag.
    pub action: AdminAction,
    /// Supplementary payload.
    pub details: String,
}

/// Query parameters for audit log listing.
///
/// Results are always newest first by timestamp, ties broken by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogQuery {
    /// Maximum rows returned.
    pub limit: usize,
    /// Optional action filter.
    pub action: Option<String>,
    /// Optional actor filter.
    pub actor_id: Option<i64>,
}

impl AuditLogQuery {
    /// Unfiltered query for the newest `limit` entries.
    #[must_use]
    pub fn recent(limit: usize) -> Self {
        Self {
            limit,
            action: None,
            actor_id: None,
        }
    }
}

/// Port for the append-only audit log store.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Appends one entry atomically and returns the stored row.
    async fn append_entry(&self, entry: NewAuditLogEntry) -> AppResult<AuditLogEntry>;

    /// Lists entries newest first, honoring the query filters and limit.
    async fn list_recent_entries(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>>;
}
