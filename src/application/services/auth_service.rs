//! Authentication service: login, logout, and token validation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::verify_password;
use crate::utils::token::generate_token;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Service for issuing and validating login tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// storage and comparison. An attacker with read-only access to the
/// database cannot verify or forge tokens without the server-side secret.
pub struct AuthService<T: TokenRepository, U: UserRepository> {
    token_repository: Arc<T>,
    user_repository: Arc<U>,
    signing_secret: String,
}

impl<T: TokenRepository, U: UserRepository> AuthService<T, U> {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` must match the value used when existing tokens
    /// were issued, or every stored token becomes invalid.
    pub fn new(token_repository: Arc<T>, user_repository: Arc<U>, signing_secret: String) -> Self {
        Self {
            token_repository,
            user_repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verifies credentials and issues a fresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the email is unknown or the
    /// password does not match. Both cases produce the same message so
    /// the endpoint does not leak which emails are registered.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let invalid = || {
            AppError::bad_request(
                "Unable to log in with provided credentials",
                json!({}),
            )
        };

        let credentials = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &credentials.password_hash) {
            return Err(invalid());
        }

        let token = generate_token();
        let token_hash = self.hash_token(&token);
        self.token_repository
            .create(credentials.user.id, &token_hash)
            .await?;

        metrics::counter!("foodgram_logins_total").increment(1);
        tracing::info!(user_id = credentials.user.id, "User logged in");

        Ok(token)
    }

    /// Revokes the presented token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the token is unknown or
    /// already revoked.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let token_hash = self.hash_token(token);

        if !self.token_repository.revoke(&token_hash).await? {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or revoked token" }),
            ));
        }

        Ok(())
    }

    /// Resolves a raw token to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the token hash does not
    /// match any live stored token.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let token_hash = self.hash_token(token);

        self.token_repository
            .find_user(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or revoked token" }),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Credentials;
    use crate::domain::repositories::{MockTokenRepository, MockUserRepository};
    use crate::utils::password::hash_password;
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn test_user(id: i64) -> User {
        User {
            id,
            email: "cook@example.com".to_string(),
            username: "cook".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_login_success_stores_token_hash() {
        let mut token_repo = MockTokenRepository::new();
        let mut user_repo = MockUserRepository::new();

        let hash = hash_password("secret-password").unwrap();
        user_repo.expect_find_by_email().times(1).returning(move |_| {
            Ok(Some(Credentials {
                user: test_user(1),
                password_hash: hash.clone(),
            }))
        });

        token_repo
            .expect_create()
            .withf(|user_id, token_hash| *user_id == 1 && token_hash.len() == 64)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = AuthService::new(Arc::new(token_repo), Arc::new(user_repo), test_secret());

        let token = service.login("cook@example.com", "secret-password").await;

        assert_eq!(token.unwrap().len(), 48);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let token_repo = MockTokenRepository::new();
        let mut user_repo = MockUserRepository::new();

        let hash = hash_password("secret-password").unwrap();
        user_repo.expect_find_by_email().times(1).returning(move |_| {
            Ok(Some(Credentials {
                user: test_user(1),
                password_hash: hash.clone(),
            }))
        });

        let service = AuthService::new(Arc::new(token_repo), Arc::new(user_repo), test_secret());

        let result = service.login("cook@example.com", "wrong").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let token_repo = MockTokenRepository::new();
        let mut user_repo = MockUserRepository::new();

        user_repo
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(token_repo), Arc::new(user_repo), test_secret());

        let result = service.login("ghost@example.com", "whatever").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut token_repo = MockTokenRepository::new();
        let user_repo = MockUserRepository::new();

        token_repo
            .expect_find_user()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(token_repo), Arc::new(user_repo), test_secret());

        let result = service.authenticate("bogus-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_logout_revoked_token_is_unauthorized() {
        let mut token_repo = MockTokenRepository::new();
        let user_repo = MockUserRepository::new();

        token_repo.expect_revoke().times(1).returning(|_| Ok(false));

        let service = AuthService::new(Arc::new(token_repo), Arc::new(user_repo), test_secret());

        let result = service.logout("already-revoked").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_hash_token_consistency() {
        let service = AuthService::new(
            Arc::new(MockTokenRepository::new()),
            Arc::new(MockUserRepository::new()),
            test_secret(),
        );

        let hash1 = service.hash_token("test-token");
        let hash2 = service.hash_token("test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[tokio::test]
    async fn test_hash_token_secret_matters() {
        let svc1 = AuthService::new(
            Arc::new(MockTokenRepository::new()),
            Arc::new(MockUserRepository::new()),
            "secret-a".to_string(),
        );
        let svc2 = AuthService::new(
            Arc::new(MockTokenRepository::new()),
            Arc::new(MockUserRepository::new()),
            "secret-b".to_string(),
        );

        assert_ne!(svc1.hash_token("token"), svc2.hash_token("token"));
    }
}
