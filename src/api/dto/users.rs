//! DTOs for account endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{Profile, User};

/// Compiled regex for username validation (letters, digits, `@.+-_`).
static USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").unwrap());

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email address"))]
    #[validate(length(max = 254))]
    pub email: String,

    #[validate(length(min = 1, max = 150))]
    #[validate(regex(
        path = "*USERNAME_REGEX",
        message = "Username may contain only letters, digits and @/./+/-/_"
    ))]
    pub username: String,

    #[validate(length(min = 1, max = 150))]
    pub first_name: String,

    #[validate(length(min = 1, max = 150))]
    pub last_name: String,

    #[validate(length(min = 8, max = 150))]
    pub password: String,
}

/// Registration response: the created account without viewer flags.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Profile as seen by the requesting user.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.user.id,
            email: profile.user.email,
            username: profile.user.username,
            first_name: profile.user.first_name,
            last_name: profile.user.last_name,
            is_subscribed: profile.is_subscribed,
        }
    }
}

/// Password change request.
#[derive(Debug, Deserialize, Validate)]
pub struct SetPasswordRequest {
    #[validate(length(min = 8, max = 150))]
    pub new_password: String,

    #[validate(length(min = 1))]
    pub current_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: "cook@example.com".to_string(),
            username: username.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password: "long-enough-password".to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("ada.lovelace").validate().is_ok());
    }

    #[test]
    fn test_username_with_forbidden_characters() {
        assert!(request("ada lovelace").validate().is_err());
        assert!(request("ada#1").validate().is_err());
    }

    #[test]
    fn test_username_allows_at_dot_plus_dash() {
        assert!(request("a.b@c+d-e_f").validate().is_ok());
    }

    #[test]
    fn test_short_password_is_rejected() {
        let mut req = request("ada");
        req.password = "short".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let mut req = request("ada");
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }
}
