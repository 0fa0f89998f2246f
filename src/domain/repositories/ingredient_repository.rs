//! Repository trait for ingredient catalog data access.

use crate::domain::entities::{Ingredient, NewIngredient};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the ingredient catalog.
///
/// The HTTP API exposes ingredients read-only; `create` backs fixture
/// loading.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Lists ingredients, optionally filtered by a case-insensitive
    /// name prefix, ordered by name.
    async fn list<'a>(&self, name_prefix: Option<&'a str>) -> Result<Vec<Ingredient>, AppError>;

    /// Finds an ingredient by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError>;

    /// Finds the subset of the given ids that exist, in id order.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Ingredient>, AppError>;

    /// Creates an ingredient, ignoring exact duplicates.
    ///
    /// Returns `Ok(true)` when a row was inserted, `Ok(false)` when the
    /// `(name, measurement_unit)` pair already existed.
    async fn create(&self, new_ingredient: NewIngredient) -> Result<bool, AppError>;
}
