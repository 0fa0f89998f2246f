//! PostgreSQL implementation of the subscription repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::SubscriptionRepository;
use crate::error::AppError;

/// PostgreSQL repository for follow relationships.
pub struct PgSubscriptionRepository {
    pool: Arc<PgPool>,
}

impl PgSubscriptionRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    email: String,
    username: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn create(&self, user_id: i64, author_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO subscriptions (user_id, author_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(author_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: i64, author_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE user_id = $1 AND author_id = $2")
            .bind(user_id)
            .bind(author_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn authors_for(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            "SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.created_at
             FROM subscriptions s
             JOIN users u ON u.id = s.author_id
             WHERE s.user_id = $1
             ORDER BY u.id
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| User {
                id: r.id,
                email: r.email,
                username: r.username,
                first_name: r.first_name,
                last_name: r.last_name,
                created_at: r.created_at,
            })
            .collect())
    }

    async fn count_authors(&self, user_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn subscribed_among(
        &self,
        user_id: i64,
        author_ids: &[i64],
    ) -> Result<Vec<i64>, AppError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT author_id FROM subscriptions WHERE user_id = $1 AND author_id = ANY($2)",
        )
        .bind(user_id)
        .bind(author_ids.to_vec())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }
}
