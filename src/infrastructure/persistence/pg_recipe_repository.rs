//! PostgreSQL implementation of the recipe repository.
//!
//! Create and update run inside one transaction so the recipe row and
//! its tag/ingredient links never diverge. List filters are composed
//! with `QueryBuilder` so every value stays a bound parameter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{
    IngredientAmount, NewRecipe, Recipe, RecipeFilter, RecipeIngredientInput, RecipeUpdate, Tag,
    User,
};
use crate::domain::repositories::RecipeRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for recipes and their relation tables.
pub struct PgRecipeRepository {
    pool: Arc<PgPool>,
}

impl PgRecipeRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: i64,
    name: String,
    image: String,
    text: String,
    cooking_time: i16,
    created_at: DateTime<Utc>,
    author_id: i64,
    author_email: String,
    author_username: String,
    author_first_name: String,
    author_last_name: String,
    author_created_at: DateTime<Utc>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            author: User {
                id: row.author_id,
                email: row.author_email,
                username: row.author_username,
                first_name: row.author_first_name,
                last_name: row.author_last_name,
                created_at: row.author_created_at,
            },
            name: row.name,
            image: row.image,
            text: row.text,
            cooking_time: row.cooking_time,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RecipeTagRow {
    recipe_id: i64,
    id: i64,
    name: String,
    color: String,
    slug: String,
}

#[derive(sqlx::FromRow)]
struct RecipeIngredientRow {
    recipe_id: i64,
    id: i64,
    name: String,
    measurement_unit: String,
    amount: i16,
}

const RECIPE_SELECT: &str = "SELECT r.id, r.name, r.image, r.text, r.cooking_time, r.created_at, \
     u.id AS author_id, u.email AS author_email, u.username AS author_username, \
     u.first_name AS author_first_name, u.last_name AS author_last_name, \
     u.created_at AS author_created_at \
     FROM recipes r JOIN users u ON u.id = r.author_id";

/// Appends the list filters as `AND` clauses. The builder must already
/// contain a `WHERE` clause.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &RecipeFilter) {
    if let Some(author_id) = filter.author_id {
        qb.push(" AND r.author_id = ").push_bind(author_id);
    }

    if !filter.tag_slugs.is_empty() {
        qb.push(
            " AND r.id IN (SELECT rt.recipe_id FROM recipe_tags rt \
             JOIN tags t ON t.id = rt.tag_id WHERE t.slug = ANY(",
        )
        .push_bind(filter.tag_slugs.clone())
        .push("))");
    }

    if let Some(user_id) = filter.favorited_by {
        qb.push(" AND r.id IN (SELECT recipe_id FROM favorites WHERE user_id = ")
            .push_bind(user_id)
            .push(")");
    }

    if let Some(user_id) = filter.in_cart_of {
        qb.push(" AND r.id IN (SELECT recipe_id FROM shopping_cart WHERE user_id = ")
            .push_bind(user_id)
            .push(")");
    }
}

/// Bulk-inserts the tag and ingredient links for a recipe.
async fn insert_links(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    recipe_id: i64,
    tag_ids: &[i64],
    ingredients: &[RecipeIngredientInput],
) -> Result<(), sqlx::Error> {
    if !tag_ids.is_empty() {
        let mut qb = QueryBuilder::new("INSERT INTO recipe_tags (recipe_id, tag_id) ");
        qb.push_values(tag_ids, |mut b, tag_id| {
            b.push_bind(recipe_id).push_bind(*tag_id);
        });
        qb.build().execute(&mut **tx).await?;
    }

    if !ingredients.is_empty() {
        let mut qb =
            QueryBuilder::new("INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) ");
        qb.push_values(ingredients, |mut b, item| {
            b.push_bind(recipe_id)
                .push_bind(item.ingredient_id)
                .push_bind(item.amount);
        });
        qb.build().execute(&mut **tx).await?;
    }

    Ok(())
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn create(&self, new_recipe: NewRecipe) -> Result<Recipe, AppError> {
        let mut tx = self.pool.begin().await?;

        let recipe_id: i64 = sqlx::query_scalar(
            "INSERT INTO recipes (author_id, name, image, text, cooking_time)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(new_recipe.author_id)
        .bind(&new_recipe.name)
        .bind(&new_recipe.image)
        .bind(&new_recipe.text)
        .bind(new_recipe.cooking_time)
        .fetch_one(&mut *tx)
        .await?;

        insert_links(
            &mut tx,
            recipe_id,
            &new_recipe.tag_ids,
            &new_recipe.ingredients,
        )
        .await?;

        tx.commit().await?;

        self.find_by_id(recipe_id).await?.ok_or_else(|| {
            AppError::internal("Created recipe disappeared", json!({ "id": recipe_id }))
        })
    }

    async fn update(&self, id: i64, update: RecipeUpdate) -> Result<Recipe, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE recipes
             SET name = $1, text = $2, cooking_time = $3, image = COALESCE($4, image)
             WHERE id = $5",
        )
        .bind(&update.name)
        .bind(&update.text)
        .bind(update.cooking_time)
        .bind(update.image.as_deref())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Recipe not found", json!({ "id": id })));
        }

        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_links(&mut tx, id, &update.tag_ids, &update.ingredients).await?;

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Updated recipe disappeared", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!("{RECIPE_SELECT} WHERE r.id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Recipe>, AppError> {
        let mut qb = QueryBuilder::new(format!("{RECIPE_SELECT} WHERE TRUE"));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY r.created_at DESC, r.id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<RecipeRow> = qb
            .build_query_as()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &RecipeFilter) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM recipes r WHERE TRUE");
        push_filters(&mut qb, filter);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn tags_for(&self, recipe_ids: &[i64]) -> Result<Vec<(i64, Tag)>, AppError> {
        let rows = sqlx::query_as::<_, RecipeTagRow>(
            "SELECT rt.recipe_id, t.id, t.name, t.color, t.slug
             FROM recipe_tags rt
             JOIN tags t ON t.id = rt.tag_id
             WHERE rt.recipe_id = ANY($1)
             ORDER BY rt.recipe_id, t.name",
        )
        .bind(recipe_ids.to_vec())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    r.recipe_id,
                    Tag {
                        id: r.id,
                        name: r.name,
                        color: r.color,
                        slug: r.slug,
                    },
                )
            })
            .collect())
    }

    async fn ingredients_for(
        &self,
        recipe_ids: &[i64],
    ) -> Result<Vec<(i64, IngredientAmount)>, AppError> {
        let rows = sqlx::query_as::<_, RecipeIngredientRow>(
            "SELECT ri.recipe_id, i.id, i.name, i.measurement_unit, ri.amount
             FROM recipe_ingredients ri
             JOIN ingredients i ON i.id = ri.ingredient_id
             WHERE ri.recipe_id = ANY($1)
             ORDER BY ri.recipe_id, i.name",
        )
        .bind(recipe_ids.to_vec())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    r.recipe_id,
                    IngredientAmount {
                        id: r.id,
                        name: r.name,
                        measurement_unit: r.measurement_unit,
                        amount: r.amount,
                    },
                )
            })
            .collect())
    }

    async fn list_by_author(
        &self,
        author_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<Recipe>, AppError> {
        // LIMIT NULL means "no limit" in PostgreSQL.
        let rows = sqlx::query_as::<_, RecipeRow>(&format!(
            "{RECIPE_SELECT} WHERE r.author_id = $1 ORDER BY r.created_at DESC, r.id DESC LIMIT $2"
        ))
        .bind(author_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
