use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use portal_application::AdminTokenRepository;
use portal_core::{AdminIdentity, AppError, AppResult};

/// PostgreSQL-backed lookup of admin bearer tokens.
#[derive(Clone)]
pub struct PostgresAdminTokenRepository {
    pool: PgPool,
}

impl PostgresAdminTokenRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AdminRow {
    id: i64,
    username: String,
    role: String,
}

#[async_trait]
impl AdminTokenRepository for PostgresAdminTokenRepository {
    async fn find_admin_by_token_hash(
        &self,
        token_hash: &str,
    ) -> AppResult<Option<AdminIdentity>> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT admins.id, admins.username, admins.role
            FROM admin_access_tokens
            INNER JOIN admins ON admins.id = admin_access_tokens.admin_id
            WHERE admin_access_tokens.token_hash = $1
                AND (
                    admin_access_tokens.expires_at IS NULL
                    OR admin_access_tokens.expires_at > now()
                )
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to resolve admin token: {error}")))?;

        Ok(row.map(|row| AdminIdentity::new(row.id, row.username, row.role)))
    }
}
