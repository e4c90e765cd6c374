use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::warn;

use portal_core::AppResult;
use portal_domain::AdminAction;

use crate::{AuditLogEntry, AuditLogQuery, AuditLogRepository, NewAuditLogEntry};


const PUBLISH_CAPACITY: usize = 64;

/// Application service over the audit log store.
///
/// Appends never fail the caller: a storage failure is reported on the
/// diagnostic log and the triggering action proceeds without an audit row.
/// Every stored entry is also published to live subscribers.
#[derive(Clone)]
pub struct AuditLogService {
    repository: Arc<dyn AuditLogRepository>,
    publisher: broadcast::Sender<AuditLogEntry>,
}

impl AuditLogService {
    /// Creates a service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn AuditLogRepository>) -> Self {
        let (publisher, _) = broadcast::channel(PUBLISH_CAPACITY);
        Self {
            repository,
            publisher,
        }
    }

    /// Appends one entry and returns its id, or `None` if storage failed.
    pub async fn record(
        &self,
        actor_id: Option<i64>,
        action: AdminAction,
        details: impl Into<String>,
    ) -> Option<i64> {
        let entry = NewAuditLogEntry {
            actor_id,
            action,
            details: details.into(),
        };

        match self.repository.append_entry(entry).await {
            Ok(stored) => {
                let id = stored.id;
                // No receivers is the normal case.
                let _ = self.publisher.send(stored);
                Some(id)
            }
            Err(error) => {
                warn!(
                    actor_id = ?actor_id,
                    action = %action,
                    error = %error,
                    "failed to append audit log entry"
                );
                None
            }
        }
    }

    /// Returns at most `limit` entries, newest first.
    pub async fn list_recent(&self, limit: usize) -> AppResult<Vec<AuditLogEntry>> {
        self.list(AuditLogQuery::recent(limit)).await
    }

    /// Returns the newest entries written by one admin.
    pub async fn list_by_actor(&self, actor_id: i64, limit: usize) -> AppResult<Vec<AuditLogEntry>> {
        self.list(AuditLogQuery {
            limit,
            action: None,
            actor_id: Some(actor_id),
        })
        .await
    }

    /// Returns the newest entries with one action tag.
    pub async fn list_by_action(
        &self,
        action: AdminAction,
        limit: usize,
    ) -> AppResult<Vec<AuditLogEntry>> {
        self.list(AuditLogQuery {
            limit,
            action: Some(action.as_str().to_owned()),
            actor_id: None,
        })
        .await
    }

    /// Returns entries matching an arbitrary query.
    pub async fn list(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        if query.limit == 0 {
            return Ok(Vec::new());
        }

        let limit = query.limit;
        let mut entries = self.repository.list_recent_entries(query).await?;
        entries.truncate(limit);
        Ok(entries)
    }

    /// Subscribes to entries appended after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuditLogEntry> {
        self.publisher.subscribe()
    }
}
