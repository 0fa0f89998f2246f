//! Password hashing with Argon2.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde_json::json;

use crate::error::AppError;

/// Hashes a password with Argon2 and a fresh random salt.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails (extremely rare).
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))
}

/// Verifies a password against a stored Argon2 hash.
///
/// An unparseable stored hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
