//! Subscription (follow) management service.

use std::sync::Arc;

use crate::domain::entities::{AuthorWithRecipes, User};
use crate::domain::repositories::{RecipeRepository, SubscriptionRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;

/// Service for following authors and listing followed authors.
pub struct SubscriptionService<S, U, R>
where
    S: SubscriptionRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    subscription_repository: Arc<S>,
    user_repository: Arc<U>,
    recipe_repository: Arc<R>,
}

impl<S, U, R> SubscriptionService<S, U, R>
where
    S: SubscriptionRepository,
    U: UserRepository,
    R: RecipeRepository,
{
    pub fn new(
        subscription_repository: Arc<S>,
        user_repository: Arc<U>,
        recipe_repository: Arc<R>,
    ) -> Self {
        Self {
            subscription_repository,
            user_repository,
            recipe_repository,
        }
    }

    /// Subscribes the caller to an author and returns the subscription
    /// entry (author + recipes trimmed to `recipes_limit`).
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - unknown author
    /// - [`AppError::Validation`] - self-subscription or duplicate
    pub async fn subscribe(
        &self,
        user: &User,
        author_id: i64,
        recipes_limit: Option<i64>,
    ) -> Result<AuthorWithRecipes, AppError> {
        let author = self
            .user_repository
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": author_id })))?;

        if author.id == user.id {
            return Err(AppError::bad_request(
                "Cannot subscribe to yourself",
                json!({}),
            ));
        }

        if !self
            .subscription_repository
            .create(user.id, author.id)
            .await?
        {
            return Err(AppError::bad_request(
                "Already subscribed to this author",
                json!({ "author_id": author.id }),
            ));
        }

        tracing::info!(user_id = user.id, author_id = author.id, "Subscribed");

        self.entry(author, recipes_limit).await
    }

    /// Removes a subscription.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - unknown author
    /// - [`AppError::Validation`] - no subscription existed
    pub async fn unsubscribe(&self, user: &User, author_id: i64) -> Result<(), AppError> {
        if self.user_repository.find_by_id(author_id).await?.is_none() {
            return Err(AppError::not_found(
                "User not found",
                json!({ "id": author_id }),
            ));
        }

        if !self
            .subscription_repository
            .delete(user.id, author_id)
            .await?
        {
            return Err(AppError::bad_request(
                "Subscription does not exist",
                json!({ "author_id": author_id }),
            ));
        }

        Ok(())
    }

    /// Returns one page of the caller's subscriptions plus the total.
    pub async fn subscriptions(
        &self,
        user: &User,
        offset: i64,
        limit: i64,
        recipes_limit: Option<i64>,
    ) -> Result<(i64, Vec<AuthorWithRecipes>), AppError> {
        let count = self.subscription_repository.count_authors(user.id).await?;
        let authors = self
            .subscription_repository
            .authors_for(user.id, offset, limit)
            .await?;

        let mut entries = Vec::with_capacity(authors.len());
        for author in authors {
            entries.push(self.entry(author, recipes_limit).await?);
        }

        Ok((count, entries))
    }

    async fn entry(
        &self,
        author: User,
        recipes_limit: Option<i64>,
    ) -> Result<AuthorWithRecipes, AppError> {
        let recipes = self
            .recipe_repository
            .list_by_author(author.id, recipes_limit)
            .await?;
        let recipes_count = self.recipe_repository.count_by_author(author.id).await?;

        Ok(AuthorWithRecipes {
            author,
            recipes,
            recipes_count,
        })
    }
}
