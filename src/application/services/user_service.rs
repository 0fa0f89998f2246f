//! Account registration and profile service.

use std::sync::Arc;

use crate::domain::entities::{NewUser, Profile, User};
use crate::domain::repositories::{SubscriptionRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use serde_json::json;

/// Validated registration input (field formats are checked at the DTO
/// boundary; this struct carries the raw password to be hashed here).
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Service for account management and viewer-scoped profiles.
pub struct UserService<U: UserRepository, S: SubscriptionRepository> {
    user_repository: Arc<U>,
    subscription_repository: Arc<S>,
}

impl<U: UserRepository, S: SubscriptionRepository> UserService<U, S> {
    pub fn new(user_repository: Arc<U>, subscription_repository: Arc<S>) -> Self {
        Self {
            user_repository,
            subscription_repository,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the email or username is
    /// already taken.
    pub async fn register(&self, input: RegisterInput) -> Result<User, AppError> {
        if self.user_repository.email_taken(&input.email).await? {
            return Err(AppError::bad_request(
                "A user with this email already exists",
                json!({ "email": input.email }),
            ));
        }

        if self.user_repository.username_taken(&input.username).await? {
            return Err(AppError::bad_request(
                "A user with this username already exists",
                json!({ "username": input.username }),
            ));
        }

        let password_hash = hash_password(&input.password)?;

        let user = self
            .user_repository
            .create(NewUser {
                email: input.email,
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
                password_hash,
            })
            .await?;

        metrics::counter!("foodgram_users_registered_total").increment(1);
        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Returns one profile as seen by `viewer`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no account matches `id`.
    pub async fn profile(&self, viewer: Option<&User>, id: i64) -> Result<Profile, AppError> {
        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;

        let is_subscribed = match viewer {
            Some(viewer) => !self
                .subscription_repository
                .subscribed_among(viewer.id, &[user.id])
                .await?
                .is_empty(),
            None => false,
        };

        Ok(Profile {
            user,
            is_subscribed,
        })
    }

    /// Returns one page of profiles plus the total account count.
    pub async fn list_profiles(
        &self,
        viewer: Option<&User>,
        offset: i64,
        limit: i64,
    ) -> Result<(i64, Vec<Profile>), AppError> {
        let count = self.user_repository.count().await?;
        let users = self.user_repository.list(offset, limit).await?;

        let subscribed = match viewer {
            Some(viewer) => {
                let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
                self.subscription_repository
                    .subscribed_among(viewer.id, &ids)
                    .await?
            }
            None => Vec::new(),
        };

        let profiles = users
            .into_iter()
            .map(|user| Profile {
                is_subscribed: subscribed.contains(&user.id),
                user,
            })
            .collect();

        Ok((count, profiles))
    }

    /// Changes the caller's password after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the current password does
    /// not match.
    pub async fn set_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let stored = self
            .user_repository
            .password_hash(user.id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user.id })))?;

        if !verify_password(current_password, &stored) {
            return Err(AppError::bad_request(
                "Current password is incorrect",
                json!({}),
            ));
        }

        let password_hash = hash_password(new_password)?;
        self.user_repository
            .update_password(user.id, &password_hash)
            .await?;

        Ok(())
    }
}
