//! PostgreSQL implementation of the mark repository.
//!
//! Favorites and the shopping cart share one table shape; queries are
//! parameterized by table name (a fixed string chosen from [`MarkKind`],
//! never client input).

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{MarkKind, ShoppingListItem};
use crate::domain::repositories::MarkRepository;
use crate::error::AppError;

/// PostgreSQL repository for the favorites and shopping-cart tables.
pub struct PgMarkRepository {
    pool: Arc<PgPool>,
}

impl PgMarkRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn table(kind: MarkKind) -> &'static str {
    match kind {
        MarkKind::Favorite => "favorites",
        MarkKind::ShoppingCart => "shopping_cart",
    }
}

#[derive(sqlx::FromRow)]
struct ShoppingListRow {
    name: String,
    measurement_unit: String,
    total: i64,
}

#[async_trait]
impl MarkRepository for PgMarkRepository {
    async fn add(&self, kind: MarkKind, user_id: i64, recipe_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(&format!(
            "INSERT INTO {} (user_id, recipe_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            table(kind)
        ))
        .bind(user_id)
        .bind(recipe_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(
        &self,
        kind: MarkKind,
        user_id: i64,
        recipe_id: i64,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE user_id = $1 AND recipe_id = $2",
            table(kind)
        ))
        .bind(user_id)
        .bind(recipe_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn marked_ids(
        &self,
        kind: MarkKind,
        user_id: i64,
        recipe_ids: &[i64],
    ) -> Result<Vec<i64>, AppError> {
        let ids: Vec<i64> = sqlx::query_scalar(&format!(
            "SELECT recipe_id FROM {} WHERE user_id = $1 AND recipe_id = ANY($2)",
            table(kind)
        ))
        .bind(user_id)
        .bind(recipe_ids.to_vec())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(ids)
    }

    async fn cart_summary(&self, user_id: i64) -> Result<Vec<ShoppingListItem>, AppError> {
        let rows = sqlx::query_as::<_, ShoppingListRow>(
            "SELECT i.name, i.measurement_unit, SUM(ri.amount)::BIGINT AS total
             FROM shopping_cart sc
             JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
             JOIN ingredients i ON i.id = ri.ingredient_id
             WHERE sc.user_id = $1
             GROUP BY i.name, i.measurement_unit
             ORDER BY i.name",
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ShoppingListItem {
                name: r.name,
                measurement_unit: r.measurement_unit,
                total: r.total,
            })
            .collect())
    }
}
