//! Recipe CRUD, per-user markers, and shopping-list aggregation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{
    IngredientAmount, MarkKind, NewRecipe, Profile, Recipe, RecipeDetails, RecipeFilter,
    RecipeIngredientInput, RecipeUpdate, ShoppingListItem, Tag, User,
};
use crate::domain::repositories::{
    IngredientRepository, MarkRepository, RecipeRepository, SubscriptionRepository, TagRepository,
};
use crate::error::AppError;
use serde_json::json;

/// Validated recipe payload with the image already stored on disk.
///
/// `image` is `None` only on updates that keep the existing picture.
#[derive(Debug, Clone)]
pub struct RecipeInput {
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i16,
    pub tag_ids: Vec<i64>,
    pub ingredients: Vec<RecipeIngredientInput>,
}

/// List-endpoint query as requested by the client. Viewer-scoped flags
/// are resolved against the authenticated user (and ignored for
/// anonymous callers).
#[derive(Debug, Clone, Default)]
pub struct RecipeListQuery {
    pub author_id: Option<i64>,
    pub tag_slugs: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Service for recipes: CRUD with relation replacement, favorites and
/// shopping-cart toggles, and the aggregated shopping list.
pub struct RecipeService<R, T, I, M, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    M: MarkRepository,
    S: SubscriptionRepository,
{
    recipe_repository: Arc<R>,
    tag_repository: Arc<T>,
    ingredient_repository: Arc<I>,
    mark_repository: Arc<M>,
    subscription_repository: Arc<S>,
}

impl<R, T, I, M, S> RecipeService<R, T, I, M, S>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
    M: MarkRepository,
    S: SubscriptionRepository,
{
    pub fn new(
        recipe_repository: Arc<R>,
        tag_repository: Arc<T>,
        ingredient_repository: Arc<I>,
        mark_repository: Arc<M>,
        subscription_repository: Arc<S>,
    ) -> Self {
        Self {
            recipe_repository,
            tag_repository,
            ingredient_repository,
            mark_repository,
            subscription_repository,
        }
    }

    /// Creates a recipe for `author` and returns its read representation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when tags or ingredients repeat
    /// or reference unknown catalog entries.
    pub async fn create(&self, author: &User, input: RecipeInput) -> Result<RecipeDetails, AppError> {
        self.validate_tags(&input.tag_ids).await?;
        self.validate_ingredients(&input.ingredients).await?;

        let image = input.image.ok_or_else(|| {
            AppError::bad_request("A recipe picture is required", json!({ "field": "image" }))
        })?;

        let recipe = self
            .recipe_repository
            .create(NewRecipe {
                author_id: author.id,
                name: input.name,
                image,
                text: input.text,
                cooking_time: input.cooking_time,
                tag_ids: input.tag_ids,
                ingredients: input.ingredients,
            })
            .await?;

        metrics::counter!("foodgram_recipes_created_total").increment(1);
        tracing::info!(recipe_id = recipe.id, author_id = author.id, "Recipe created");

        self.details(Some(author), recipe).await
    }

    /// Rewrites a recipe, replacing its tags and ingredients.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - unknown recipe
    /// - [`AppError::Forbidden`] - caller is not the author
    /// - [`AppError::Validation`] - bad tags or ingredients
    pub async fn update(
        &self,
        viewer: &User,
        id: i64,
        input: RecipeInput,
    ) -> Result<RecipeDetails, AppError> {
        let existing = self.require(id).await?;
        self.require_author(viewer, &existing)?;

        self.validate_tags(&input.tag_ids).await?;
        self.validate_ingredients(&input.ingredients).await?;

        let recipe = self
            .recipe_repository
            .update(
                id,
                RecipeUpdate {
                    name: input.name,
                    image: input.image,
                    text: input.text,
                    cooking_time: input.cooking_time,
                    tag_ids: input.tag_ids,
                    ingredients: input.ingredients,
                },
            )
            .await?;

        self.details(Some(viewer), recipe).await
    }

    /// Deletes a recipe.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - unknown recipe
    /// - [`AppError::Forbidden`] - caller is not the author
    pub async fn delete(&self, viewer: &User, id: i64) -> Result<(), AppError> {
        let existing = self.require(id).await?;
        self.require_author(viewer, &existing)?;

        self.recipe_repository.delete(id).await?;
        Ok(())
    }

    /// Returns one recipe's read representation.
    pub async fn get(&self, viewer: Option<&User>, id: i64) -> Result<RecipeDetails, AppError> {
        let recipe = self.require(id).await?;
        self.details(viewer, recipe).await
    }

    /// Returns one page of recipes plus the total match count.
    pub async fn list(
        &self,
        viewer: Option<&User>,
        query: &RecipeListQuery,
        offset: i64,
        limit: i64,
    ) -> Result<(i64, Vec<RecipeDetails>), AppError> {
        let filter = RecipeFilter {
            author_id: query.author_id,
            tag_slugs: query.tag_slugs.clone(),
            favorited_by: viewer.filter(|_| query.is_favorited).map(|v| v.id),
            in_cart_of: viewer.filter(|_| query.is_in_shopping_cart).map(|v| v.id),
        };

        let count = self.recipe_repository.count(&filter).await?;
        let recipes = self.recipe_repository.list(&filter, offset, limit).await?;

        let details = self.assemble(viewer, recipes).await?;
        Ok((count, details))
    }

    /// Adds a favorite/cart marker and returns the marked recipe.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - unknown recipe
    /// - [`AppError::Validation`] - already marked
    pub async fn add_mark(
        &self,
        viewer: &User,
        kind: MarkKind,
        recipe_id: i64,
    ) -> Result<Recipe, AppError> {
        let recipe = self.require(recipe_id).await?;

        if !self.mark_repository.add(kind, viewer.id, recipe.id).await? {
            return Err(AppError::bad_request(
                format!("Recipe is already in {}", kind.noun()),
                json!({ "recipe_id": recipe.id }),
            ));
        }

        Ok(recipe)
    }

    /// Removes a favorite/cart marker.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - unknown recipe
    /// - [`AppError::Validation`] - marker was not set
    pub async fn remove_mark(
        &self,
        viewer: &User,
        kind: MarkKind,
        recipe_id: i64,
    ) -> Result<(), AppError> {
        let recipe = self.require(recipe_id).await?;

        if !self
            .mark_repository
            .remove(kind, viewer.id, recipe.id)
            .await?
        {
            return Err(AppError::bad_request(
                format!("Recipe is not in {}", kind.noun()),
                json!({ "recipe_id": recipe.id }),
            ));
        }

        Ok(())
    }

    /// Aggregates the caller's shopping cart into one line per ingredient.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the cart is empty.
    pub async fn shopping_list(&self, viewer: &User) -> Result<Vec<ShoppingListItem>, AppError> {
        let items = self.mark_repository.cart_summary(viewer.id).await?;

        if items.is_empty() {
            return Err(AppError::bad_request("Shopping cart is empty", json!({})));
        }

        Ok(items)
    }

    async fn require(&self, id: i64) -> Result<Recipe, AppError> {
        self.recipe_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe not found", json!({ "id": id })))
    }

    fn require_author(&self, viewer: &User, recipe: &Recipe) -> Result<(), AppError> {
        if recipe.author.id != viewer.id {
            return Err(AppError::forbidden(
                "Only the author may modify this recipe",
                json!({ "recipe_id": recipe.id }),
            ));
        }
        Ok(())
    }

    async fn validate_tags(&self, tag_ids: &[i64]) -> Result<(), AppError> {
        if tag_ids.is_empty() {
            return Err(AppError::bad_request(
                "At least one tag is required",
                json!({ "field": "tags" }),
            ));
        }

        let mut seen = tag_ids.to_vec();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != tag_ids.len() {
            return Err(AppError::bad_request(
                "Tags must not repeat",
                json!({ "field": "tags" }),
            ));
        }

        let found = self.tag_repository.find_by_ids(&seen).await?;
        if found.len() != seen.len() {
            let known: Vec<i64> = found.iter().map(|t| t.id).collect();
            let missing: Vec<i64> = seen.into_iter().filter(|id| !known.contains(id)).collect();
            return Err(AppError::bad_request(
                "Unknown tag",
                json!({ "missing": missing }),
            ));
        }

        Ok(())
    }

    async fn validate_ingredients(
        &self,
        ingredients: &[RecipeIngredientInput],
    ) -> Result<(), AppError> {
        if ingredients.is_empty() {
            return Err(AppError::bad_request(
                "At least one ingredient is required",
                json!({ "field": "ingredients" }),
            ));
        }

        let mut ids: Vec<i64> = ingredients.iter().map(|i| i.ingredient_id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != ingredients.len() {
            return Err(AppError::bad_request(
                "Ingredients must not repeat",
                json!({ "field": "ingredients" }),
            ));
        }

        let found = self.ingredient_repository.find_by_ids(&ids).await?;
        if found.len() != ids.len() {
            let known: Vec<i64> = found.iter().map(|i| i.id).collect();
            let missing: Vec<i64> = ids.into_iter().filter(|id| !known.contains(id)).collect();
            return Err(AppError::bad_request(
                "Unknown ingredient",
                json!({ "missing": missing }),
            ));
        }

        Ok(())
    }

    async fn details(
        &self,
        viewer: Option<&User>,
        recipe: Recipe,
    ) -> Result<RecipeDetails, AppError> {
        let mut assembled = self.assemble(viewer, vec![recipe]).await?;
        assembled
            .pop()
            .ok_or_else(|| AppError::internal("Recipe assembly produced no rows", json!({})))
    }

    /// Resolves relations and viewer flags for a page of recipes with a
    /// fixed number of queries, independent of page size.
    async fn assemble(
        &self,
        viewer: Option<&User>,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<RecipeDetails>, AppError> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();

        let tag_pairs = self.recipe_repository.tags_for(&ids).await?;
        let ingredient_pairs = self.recipe_repository.ingredients_for(&ids).await?;

        let (favorited, in_cart, subscribed) = match viewer {
            Some(viewer) => {
                let mut author_ids: Vec<i64> = recipes.iter().map(|r| r.author.id).collect();
                author_ids.sort_unstable();
                author_ids.dedup();

                (
                    self.mark_repository
                        .marked_ids(MarkKind::Favorite, viewer.id, &ids)
                        .await?,
                    self.mark_repository
                        .marked_ids(MarkKind::ShoppingCart, viewer.id, &ids)
                        .await?,
                    self.subscription_repository
                        .subscribed_among(viewer.id, &author_ids)
                        .await?,
                )
            }
            None => (Vec::new(), Vec::new(), Vec::new()),
        };

        let mut tags_by_recipe: HashMap<i64, Vec<Tag>> = HashMap::new();
        for (recipe_id, tag) in tag_pairs {
            tags_by_recipe.entry(recipe_id).or_default().push(tag);
        }

        let mut ingredients_by_recipe: HashMap<i64, Vec<IngredientAmount>> = HashMap::new();
        for (recipe_id, item) in ingredient_pairs {
            ingredients_by_recipe
                .entry(recipe_id)
                .or_default()
                .push(item);
        }

        Ok(recipes
            .into_iter()
            .map(|recipe| RecipeDetails {
                author: Profile {
                    user: recipe.author.clone(),
                    is_subscribed: subscribed.contains(&recipe.author.id),
                },
                tags: tags_by_recipe.remove(&recipe.id).unwrap_or_default(),
                ingredients: ingredients_by_recipe
                    .remove(&recipe.id)
                    .unwrap_or_default(),
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                recipe,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockIngredientRepository, MockMarkRepository, MockRecipeRepository,
        MockSubscriptionRepository, MockTagRepository,
    };
    use chrono::Utc;

    fn test_user(id: i64) -> User {
        User {
            id,
            email: format!("user{id}@example.com"),
            username: format!("user{id}"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            created_at: Utc::now(),
        }
    }

    fn test_recipe(id: i64, author_id: i64) -> Recipe {
        Recipe {
            id,
            author: test_user(author_id),
            name: "Borscht".to_string(),
            image: "recipes/abc.png".to_string(),
            text: "Simmer slowly.".to_string(),
            cooking_time: 90,
            created_at: Utc::now(),
        }
    }

    fn input(tag_ids: Vec<i64>, ingredients: Vec<RecipeIngredientInput>) -> RecipeInput {
        RecipeInput {
            name: "Borscht".to_string(),
            image: Some("recipes/abc.png".to_string()),
            text: "Simmer slowly.".to_string(),
            cooking_time: 90,
            tag_ids,
            ingredients,
        }
    }

    fn service(
        recipe_repo: MockRecipeRepository,
        tag_repo: MockTagRepository,
        ingredient_repo: MockIngredientRepository,
        mark_repo: MockMarkRepository,
        sub_repo: MockSubscriptionRepository,
    ) -> RecipeService<
        MockRecipeRepository,
        MockTagRepository,
        MockIngredientRepository,
        MockMarkRepository,
        MockSubscriptionRepository,
    > {
        RecipeService::new(
            Arc::new(recipe_repo),
            Arc::new(tag_repo),
            Arc::new(ingredient_repo),
            Arc::new(mark_repo),
            Arc::new(sub_repo),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_repeated_tags() {
        let svc = service(
            MockRecipeRepository::new(),
            MockTagRepository::new(),
            MockIngredientRepository::new(),
            MockMarkRepository::new(),
            MockSubscriptionRepository::new(),
        );

        let result = svc
            .create(
                &test_user(1),
                input(
                    vec![1, 1],
                    vec![RecipeIngredientInput {
                        ingredient_id: 1,
                        amount: 5,
                    }],
                ),
            )
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("repeat"));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_tags() {
        let svc = service(
            MockRecipeRepository::new(),
            MockTagRepository::new(),
            MockIngredientRepository::new(),
            MockMarkRepository::new(),
            MockSubscriptionRepository::new(),
        );

        let result = svc.create(&test_user(1), input(vec![], vec![])).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_ingredient() {
        let mut tag_repo = MockTagRepository::new();
        tag_repo.expect_find_by_ids().times(1).returning(|ids| {
            Ok(ids
                .iter()
                .map(|&id| Tag {
                    id,
                    name: format!("tag{id}"),
                    color: format!("#0000{id:02x}"),
                    slug: format!("tag{id}"),
                })
                .collect())
        });

        let mut ingredient_repo = MockIngredientRepository::new();
        ingredient_repo
            .expect_find_by_ids()
            .times(1)
            .returning(|_| Ok(vec![]));

        let svc = service(
            MockRecipeRepository::new(),
            tag_repo,
            ingredient_repo,
            MockMarkRepository::new(),
            MockSubscriptionRepository::new(),
        );

        let result = svc
            .create(
                &test_user(1),
                input(
                    vec![1],
                    vec![RecipeIngredientInput {
                        ingredient_id: 42,
                        amount: 5,
                    }],
                ),
            )
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("Unknown ingredient"));
    }

    #[tokio::test]
    async fn test_create_rejects_repeated_ingredients() {
        let mut tag_repo = MockTagRepository::new();
        tag_repo.expect_find_by_ids().times(1).returning(|ids| {
            Ok(ids
                .iter()
                .map(|&id| Tag {
                    id,
                    name: format!("tag{id}"),
                    color: format!("#0000{id:02x}"),
                    slug: format!("tag{id}"),
                })
                .collect())
        });

        let svc = service(
            MockRecipeRepository::new(),
            tag_repo,
            MockIngredientRepository::new(),
            MockMarkRepository::new(),
            MockSubscriptionRepository::new(),
        );

        let repeated = RecipeIngredientInput {
            ingredient_id: 7,
            amount: 5,
        };
        let result = svc
            .create(&test_user(1), input(vec![1], vec![repeated, repeated]))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_by_non_author_is_forbidden() {
        let mut recipe_repo = MockRecipeRepository::new();
        recipe_repo
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_recipe(id, 1))));

        let svc = service(
            recipe_repo,
            MockTagRepository::new(),
            MockIngredientRepository::new(),
            MockMarkRepository::new(),
            MockSubscriptionRepository::new(),
        );

        let result = svc
            .update(
                &test_user(2),
                10,
                input(
                    vec![1],
                    vec![RecipeIngredientInput {
                        ingredient_id: 1,
                        amount: 5,
                    }],
                ),
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_delete_unknown_recipe() {
        let mut recipe_repo = MockRecipeRepository::new();
        recipe_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let svc = service(
            recipe_repo,
            MockTagRepository::new(),
            MockIngredientRepository::new(),
            MockMarkRepository::new(),
            MockSubscriptionRepository::new(),
        );

        let result = svc.delete(&test_user(1), 10).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_add_mark_twice_is_rejected() {
        let mut recipe_repo = MockRecipeRepository::new();
        recipe_repo
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_recipe(id, 1))));

        let mut mark_repo = MockMarkRepository::new();
        mark_repo.expect_add().times(1).returning(|_, _, _| Ok(false));

        let svc = service(
            recipe_repo,
            MockTagRepository::new(),
            MockIngredientRepository::new(),
            mark_repo,
            MockSubscriptionRepository::new(),
        );

        let result = svc.add_mark(&test_user(2), MarkKind::Favorite, 10).await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("favorites"));
    }

    #[tokio::test]
    async fn test_remove_missing_mark_is_rejected() {
        let mut recipe_repo = MockRecipeRepository::new();
        recipe_repo
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_recipe(id, 1))));

        let mut mark_repo = MockMarkRepository::new();
        mark_repo
            .expect_remove()
            .times(1)
            .returning(|_, _, _| Ok(false));

        let svc = service(
            recipe_repo,
            MockTagRepository::new(),
            MockIngredientRepository::new(),
            mark_repo,
            MockSubscriptionRepository::new(),
        );

        let result = svc
            .remove_mark(&test_user(2), MarkKind::ShoppingCart, 10)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_shopping_list_empty_cart_is_rejected() {
        let mut mark_repo = MockMarkRepository::new();
        mark_repo
            .expect_cart_summary()
            .times(1)
            .returning(|_| Ok(vec![]));

        let svc = service(
            MockRecipeRepository::new(),
            MockTagRepository::new(),
            MockIngredientRepository::new(),
            mark_repo,
            MockSubscriptionRepository::new(),
        );

        let result = svc.shopping_list(&test_user(1)).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_list_flags_ignored_for_anonymous_viewer() {
        let mut recipe_repo = MockRecipeRepository::new();
        recipe_repo
            .expect_count()
            .withf(|filter| filter.favorited_by.is_none() && filter.in_cart_of.is_none())
            .times(1)
            .returning(|_| Ok(0));
        recipe_repo
            .expect_list()
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let svc = service(
            recipe_repo,
            MockTagRepository::new(),
            MockIngredientRepository::new(),
            MockMarkRepository::new(),
            MockSubscriptionRepository::new(),
        );

        let query = RecipeListQuery {
            is_favorited: true,
            is_in_shopping_cart: true,
            ..Default::default()
        };

        let (count, details) = svc.list(None, &query, 0, 6).await.unwrap();

        assert_eq!(count, 0);
        assert!(details.is_empty());
    }
}
