//! Repository trait for user account data access.

use crate::domain::entities::{Credentials, NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for account storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email or username is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds an account by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds an account with its password hash by email, for login.
    async fn find_by_email(&self, email: &str) -> Result<Option<Credentials>, AppError>;

    /// Returns whether an account with this email exists.
    async fn email_taken(&self, email: &str) -> Result<bool, AppError>;

    /// Returns whether an account with this username exists.
    async fn username_taken(&self, username: &str) -> Result<bool, AppError>;

    /// Lists accounts ordered by id.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError>;

    /// Counts all accounts.
    async fn count(&self) -> Result<i64, AppError>;

    /// Returns the stored password hash for an account.
    async fn password_hash(&self, user_id: i64) -> Result<Option<String>, AppError>;

    /// Replaces the stored password hash for an account.
    async fn update_password(&self, user_id: i64, password_hash: &str) -> Result<(), AppError>;
}
