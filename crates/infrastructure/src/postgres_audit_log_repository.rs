use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use portal_application::{AuditLogEntry, AuditLogQuery, AuditLogRepository, NewAuditLogEntry};
use portal_core::{AppError, AppResult};


const MAX_LIST_LIMIT: usize = 500;

/// PostgreSQL-backed repository for the `admin_logs` table.
#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: i64,
    admin_id: Option<i64>,
    username: Option<String>,
    action: String,
    details: String,
    timestamp: DateTime<Utc>,
}

impl From<AuditLogRow> for AuditLogEntry {
    fn from(row: AuditLogRow) -> Self {
        Self {
            id: row.id,
            actor_id: row.admin_id,
            actor_display_name: row.username,
            action: row.action,
            details: row.details,
            timestamp: row.timestamp,
        }
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn append_entry(&self, entry: NewAuditLogEntry) -> AppResult<AuditLogEntry> {
        let row = sqlx::query_as::<_, AuditLogRow>(
            r#"
            WITH inserted AS (
                INSERT INTO admin_logs (admin_id, action, details)
                VALUES ($1, $2, $3)
                RETURNING id, admin_id, action, details, timestamp
            )
            SELECT
                inserted.id,
                inserted.admin_id,
                admins.username,
                inserted.action,
                inserted.details,
                inserted.timestamp
            FROM inserted
            LEFT JOIN admins ON admins.id = inserted.admin_id
            "#,
        )
        .bind(entry.actor_id)
        .bind(entry.action.as_str())
        .bind(entry.details)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append audit log entry: {error}")))?;

        Ok(row.into())
    }

    async fn list_recent_entries(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        let capped_limit = query.limit.clamp(1, MAX_LIST_LIMIT) as i64;
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT
                admin_logs.id,
                admin_logs.admin_id,
                admins.username,
                admin_logs.action,
                admin_logs.details,
                admin_logs.timestamp
            FROM admin_logs
            LEFT JOIN admins ON admins.id = admin_logs.admin_id
            WHERE ($1::TEXT IS NULL OR admin_logs.action = $1)
                AND ($2::BIGINT IS NULL OR admin_logs.admin_id = $2)
            ORDER BY admin_logs.timestamp DESC, admin_logs.id DESC
            LIMIT $3
            "#,
        )
        .bind(query.action)
        .bind(query.actor_id)
        .bind(capped_limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list audit log entries: {error}"))
        })?;

        Ok(rows.into_iter().map(AuditLogEntry::from).collect())
    }
}
