//! Repository trait for auth token data access.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for login tokens.
///
/// Tokens are stored only as keyed hashes; the raw value never reaches
/// the database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Stores a new token hash for a user.
    async fn create(&self, user_id: i64, token_hash: &str) -> Result<(), AppError>;

    /// Resolves a token hash to its owner, skipping revoked tokens.
    async fn find_user(&self, token_hash: &str) -> Result<Option<User>, AppError>;

    /// Revokes a token by hash.
    ///
    /// Returns `Ok(true)` if a live token was revoked, `Ok(false)` when
    /// no live token matched.
    async fn revoke(&self, token_hash: &str) -> Result<bool, AppError>;
}
