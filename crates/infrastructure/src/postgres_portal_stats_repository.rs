use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use portal_application::{PortalStatistics, PortalStatsRepository};
use portal_core::{AppError, AppResult};

/// PostgreSQL-backed counts over `users` and `support_tickets`.
#[derive(Clone)]
pub struct PostgresPortalStatsRepository {
    pool: PgPool,
}

impl PostgresPortalStatsRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StatisticsRow {
    total_users: i64,
    active_users: i64,
    total_support_tickets: i64,
    open_support_tickets: i64,
}

#[async_trait]
impl PortalStatsRepository for PostgresPortalStatsRepository {
    async fn statistics(&self) -> AppResult<PortalStatistics> {
        let row = sqlx::query_as::<_, StatisticsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM users WHERE status = 'active') AS active_users,
                (SELECT COUNT(*) FROM support_tickets) AS total_support_tickets,
                (SELECT COUNT(*) FROM support_tickets WHERE status = 'open')
                    AS open_support_tickets
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to count portal records: {error}")))?;

        Ok(PortalStatistics {
            total_users: row.total_users,
            active_users: row.active_users,
            total_support_tickets: row.total_support_tickets,
            open_support_tickets: row.open_support_tickets,
        })
    }
}
