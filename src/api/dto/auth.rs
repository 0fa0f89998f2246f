//! DTOs for token login/logout endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Token login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    #[validate(length(min = 1, max = 150))]
    pub password: String,
}

/// Token login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub auth_token: String,
}
