//! Repository trait for subscription (follow) data access.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for follow relationships between users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Subscribes `user_id` to `author_id`.
    ///
    /// Returns `Ok(false)` when the subscription already exists. The
    /// self-subscription ban is enforced by the caller (and backed by a
    /// schema check).
    async fn create(&self, user_id: i64, author_id: i64) -> Result<bool, AppError>;

    /// Removes a subscription. Returns `Ok(false)` when none existed.
    async fn delete(&self, user_id: i64, author_id: i64) -> Result<bool, AppError>;

    /// Lists the authors `user_id` follows, ordered by author id.
    async fn authors_for(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError>;

    /// Counts the authors `user_id` follows.
    async fn count_authors(&self, user_id: i64) -> Result<i64, AppError>;

    /// Returns which of the given authors `user_id` follows.
    async fn subscribed_among(
        &self,
        user_id: i64,
        author_ids: &[i64],
    ) -> Result<Vec<i64>, AppError>;
}
