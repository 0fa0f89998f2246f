//! PostgreSQL implementation of the token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;

/// PostgreSQL repository for login token hashes.
pub struct PgTokenRepository {
    pool: Arc<PgPool>,
}

impl PgTokenRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TokenUserRow {
    id: i64,
    email: String,
    username: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn create(&self, user_id: i64, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("INSERT INTO auth_tokens (user_id, token_hash) VALUES ($1, $2)")
            .bind(user_id)
            .bind(token_hash)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn find_user(&self, token_hash: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, TokenUserRow>(
            "SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.created_at
             FROM auth_tokens t
             JOIN users u ON u.id = t.user_id
             WHERE t.token_hash = $1 AND t.revoked_at IS NULL",
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| User {
            id: r.id,
            email: r.email,
            username: r.username,
            first_name: r.first_name,
            last_name: r.last_name,
            created_at: r.created_at,
        }))
    }

    async fn revoke(&self, token_hash: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE auth_tokens SET revoked_at = NOW() WHERE token_hash = $1 AND revoked_at IS NULL")
                .bind(token_hash)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
