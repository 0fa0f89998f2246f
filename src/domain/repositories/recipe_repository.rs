//! Repository trait for recipe data access.

use crate::domain::entities::{
    IngredientAmount, NewRecipe, Recipe, RecipeFilter, RecipeUpdate, Tag,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recipes and their tag/ingredient links.
///
/// Writes that touch the link tables (create, update) are atomic: the
/// recipe row and all of its links commit together or not at all.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRecipeRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Creates a recipe together with its tag and ingredient links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Referential
    /// problems (unknown tag or ingredient ids) are expected to be
    /// caught by the caller before this point.
    async fn create(&self, new_recipe: NewRecipe) -> Result<Recipe, AppError>;

    /// Rewrites a recipe, replacing its tag and ingredient links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no recipe matches `id`.
    async fn update(&self, id: i64, update: RecipeUpdate) -> Result<Recipe, AppError>;

    /// Deletes a recipe. Returns `Ok(false)` when it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Finds a recipe (with author) by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError>;

    /// Lists recipes matching the filter, newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Recipe>, AppError>;

    /// Counts recipes matching the filter.
    async fn count(&self, filter: &RecipeFilter) -> Result<i64, AppError>;

    /// Returns `(recipe_id, tag)` pairs for the given recipes.
    async fn tags_for(&self, recipe_ids: &[i64]) -> Result<Vec<(i64, Tag)>, AppError>;

    /// Returns `(recipe_id, ingredient-with-amount)` pairs for the given
    /// recipes.
    async fn ingredients_for(
        &self,
        recipe_ids: &[i64],
    ) -> Result<Vec<(i64, IngredientAmount)>, AppError>;

    /// Lists an author's recipes, newest first, optionally truncated.
    async fn list_by_author(
        &self,
        author_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<Recipe>, AppError>;

    /// Counts an author's recipes.
    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError>;
}
