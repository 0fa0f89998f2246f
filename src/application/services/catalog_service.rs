//! Read-only access to the tag and ingredient catalogs.

use std::sync::Arc;

use crate::domain::entities::{Ingredient, Tag};
use crate::domain::repositories::{IngredientRepository, TagRepository};
use crate::error::AppError;
use serde_json::json;

/// Service for the reference catalogs behind recipes. Both are managed
/// out of band (fixture loading); the API only reads them.
pub struct CatalogService<T: TagRepository, I: IngredientRepository> {
    tag_repository: Arc<T>,
    ingredient_repository: Arc<I>,
}

impl<T: TagRepository, I: IngredientRepository> CatalogService<T, I> {
    pub fn new(tag_repository: Arc<T>, ingredient_repository: Arc<I>) -> Self {
        Self {
            tag_repository,
            ingredient_repository,
        }
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, AppError> {
        self.tag_repository.list().await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no tag matches `id`.
    pub async fn tag(&self, id: i64) -> Result<Tag, AppError> {
        self.tag_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found", json!({ "id": id })))
    }

    pub async fn ingredients(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, AppError> {
        self.ingredient_repository.list(name_prefix).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no ingredient matches `id`.
    pub async fn ingredient(&self, id: i64) -> Result<Ingredient, AppError> {
        self.ingredient_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Ingredient not found", json!({ "id": id })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockIngredientRepository, MockTagRepository};

    #[tokio::test]
    async fn test_unknown_tag_is_not_found() {
        let mut tag_repo = MockTagRepository::new();
        tag_repo.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = CatalogService::new(Arc::new(tag_repo), Arc::new(MockIngredientRepository::new()));

        let result = service.tag(77).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_ingredient_prefix_is_forwarded() {
        let tag_repo = MockTagRepository::new();
        let mut ingredient_repo = MockIngredientRepository::new();

        ingredient_repo
            .expect_list()
            .withf(|prefix| *prefix == Some("sal"))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = CatalogService::new(Arc::new(tag_repo), Arc::new(ingredient_repo));

        let result = service.ingredients(Some("sal")).await.unwrap();

        assert!(result.is_empty());
    }
}
