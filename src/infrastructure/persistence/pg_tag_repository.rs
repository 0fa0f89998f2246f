//! PostgreSQL implementation of the tag repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewTag, Tag};
use crate::domain::repositories::TagRepository;
use crate::error::AppError;

/// PostgreSQL repository for the tag catalog.
pub struct PgTagRepository {
    pool: Arc<PgPool>,
}

impl PgTagRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TagRow {
    id: i64,
    name: String,
    color: String,
    slug: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: row.id,
            name: row.name,
            color: row.color,
            slug: row.slug,
        }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, AppError> {
        let rows =
            sqlx::query_as::<_, TagRow>("SELECT id, name, color, slug FROM tags ORDER BY name")
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError> {
        let row =
            sqlx::query_as::<_, TagRow>("SELECT id, name, color, slug FROM tags WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Tag>, AppError> {
        let rows = sqlx::query_as::<_, TagRow>(
            "SELECT id, name, color, slug FROM tags WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids.to_vec())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, new_tag: NewTag) -> Result<Tag, AppError> {
        let row = sqlx::query_as::<_, TagRow>(
            "INSERT INTO tags (name, color, slug) VALUES ($1, $2, $3)
             RETURNING id, name, color, slug",
        )
        .bind(&new_tag.name)
        .bind(&new_tag.color)
        .bind(&new_tag.slug)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }
}
