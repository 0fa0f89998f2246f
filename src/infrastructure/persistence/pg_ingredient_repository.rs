//! PostgreSQL implementation of the ingredient repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Ingredient, NewIngredient};
use crate::domain::repositories::IngredientRepository;
use crate::error::AppError;

/// PostgreSQL repository for the ingredient catalog.
pub struct PgIngredientRepository {
    pool: Arc<PgPool>,
}

impl PgIngredientRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IngredientRow {
    id: i64,
    name: String,
    measurement_unit: String,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Ingredient {
            id: row.id,
            name: row.name,
            measurement_unit: row.measurement_unit,
        }
    }
}

#[async_trait]
impl IngredientRepository for PgIngredientRepository {
    async fn list<'a>(&self, name_prefix: Option<&'a str>) -> Result<Vec<Ingredient>, AppError> {
        let rows = match name_prefix {
            Some(prefix) => {
                sqlx::query_as::<_, IngredientRow>(
                    "SELECT id, name, measurement_unit FROM ingredients
                     WHERE name ILIKE $1 || '%' ORDER BY name",
                )
                .bind(prefix)
                .fetch_all(self.pool.as_ref())
                .await?
            }
            None => {
                sqlx::query_as::<_, IngredientRow>(
                    "SELECT id, name, measurement_unit FROM ingredients ORDER BY name",
                )
                .fetch_all(self.pool.as_ref())
                .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError> {
        let row = sqlx::query_as::<_, IngredientRow>(
            "SELECT id, name, measurement_unit FROM ingredients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Ingredient>, AppError> {
        let rows = sqlx::query_as::<_, IngredientRow>(
            "SELECT id, name, measurement_unit FROM ingredients WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids.to_vec())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, new_ingredient: NewIngredient) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT unique_name_measurement_unit DO NOTHING",
        )
        .bind(&new_ingredient.name)
        .bind(&new_ingredient.measurement_unit)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
