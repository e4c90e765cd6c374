use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use portal_application::{AuditLogEntry, AuditLogQuery, AuditLogRepository, NewAuditLogEntry};
use portal_core::AppResult;
use tokio::sync::RwLock;

/// In-memory audit log store for tests and database-less runs.
///
/// Ids are assigned under the write lock, so concurrent appends never
/// collide and ids increase in append order.
#[derive(Debug, Default)]
pub struct InMemoryAuditLogRepository {
    state: RwLock<AuditLogState>,
    admin_names: HashMap<i64, String>,
}

#[derive(Debug, Default)]
struct AuditLogState {
    last_id: i64,
    entries: Vec<AuditLogEntry>,
}

impl InMemoryAuditLogRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that resolves actor ids to usernames.
    #[must_use]
    pub fn with_admin_names(admin_names: impl IntoIterator<Item = (i64, String)>) -> Self {
        Self {
            state: RwLock::default(),
            admin_names: admin_names.into_iter().collect(),
        }
    }

    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    /// Returns whether nothing was stored yet.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn append_entry(&self, entry: NewAuditLogEntry) -> AppResult<AuditLogEntry> {
        let mut state = self.state.write().await;
        state.last_id += 1;

        let stored = AuditLogEntry {
            id: state.last_id,
            actor_id: entry.actor_id,
            actor_display_name: entry
                .actor_id
                .and_then(|actor_id| self.admin_names.get(&actor_id).cloned()),
            action: entry.action.as_str().to_owned(),
            details: entry.details,
            timestamp: Utc::now(),
        };
        state.entries.push(stored.clone());

        Ok(stored)
    }

    async fn list_recent_entries(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        let state = self.state.read().await;

        let mut values: Vec<AuditLogEntry> = state
            .entries
            .iter()
            .filter(|entry| {
                query
                    .action
                    .as_deref()
                    .is_none_or(|action| entry.action == action)
                    && query
                        .actor_id
                        .is_none_or(|actor_id| entry.actor_id == Some(actor_id))
            })
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            right
                .timestamp
                .cmp(&left.timestamp)
                .then(right.id.cmp(&left.id))
        });
        values.truncate(query.limit);

        Ok(values)
    }
}
