//! Repository trait for per-user recipe markers (favorites, cart).

use crate::domain::entities::{MarkKind, ShoppingListItem};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the favorites and shopping-cart tables.
///
/// Both markers share one shape (a unique `(user, recipe)` pair), so a
/// single interface keyed by [`MarkKind`] covers them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarkRepository: Send + Sync {
    /// Adds a marker. Returns `Ok(false)` when the pair already exists.
    async fn add(&self, kind: MarkKind, user_id: i64, recipe_id: i64) -> Result<bool, AppError>;

    /// Removes a marker. Returns `Ok(false)` when the pair did not exist.
    async fn remove(&self, kind: MarkKind, user_id: i64, recipe_id: i64)
    -> Result<bool, AppError>;

    /// Returns which of the given recipes carry the marker for this user.
    async fn marked_ids(
        &self,
        kind: MarkKind,
        user_id: i64,
        recipe_ids: &[i64],
    ) -> Result<Vec<i64>, AppError>;

    /// Aggregates the user's cart: one line per ingredient with the
    /// summed amount over every recipe in the cart, ordered by name.
    async fn cart_summary(&self, user_id: i64) -> Result<Vec<ShoppingListItem>, AppError>;
}
