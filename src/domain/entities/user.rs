//! User account entity.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// The password hash never travels with this struct; credential lookups
/// use [`Credentials`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Account together with its stored password hash, for login checks.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: User,
    pub password_hash: String,
}

/// A user as seen by a specific viewer.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub is_subscribed: bool,
}
