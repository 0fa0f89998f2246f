//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Credentials, NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// PostgreSQL repository for account storage.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    username: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    id: i64,
    email: String,
    username: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
    password_hash: String,
}

const USER_COLUMNS: &str = "id, email, username, first_name, last_name, created_at";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (email, username, first_name, last_name, password_hash)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, email, username, first_name, last_name, created_at",
        )
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.password_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credentials>, AppError> {
        let row = sqlx::query_as::<_, CredentialsRow>(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| Credentials {
            user: User {
                id: r.id,
                email: r.email,
                username: r.username,
                first_name: r.first_name,
                last_name: r.last_name,
                created_at: r.created_at,
            },
            password_hash: r.password_hash,
        }))
    }

    async fn email_taken(&self, email: &str) -> Result<bool, AppError> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(taken)
    }

    async fn username_taken(&self, username: &str) -> Result<bool, AppError> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(taken)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn password_hash(&self, user_id: i64) -> Result<Option<String>, AppError> {
        let hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(hash)
    }

    async fn update_password(&self, user_id: i64, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
