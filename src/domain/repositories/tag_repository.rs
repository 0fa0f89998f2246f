//! Repository trait for tag data access.

use crate::domain::entities::{NewTag, Tag};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the tag catalog.
///
/// The HTTP API exposes tags read-only; `create` backs fixture loading.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Lists all tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, AppError>;

    /// Finds a tag by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError>;

    /// Finds the subset of the given ids that exist, in id order.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Tag>, AppError>;

    /// Creates a tag. Duplicate name/color/slug is a validation error.
    async fn create(&self, new_tag: NewTag) -> Result<Tag, AppError>;
}
