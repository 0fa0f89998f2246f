//! Handlers for token login/logout endpoints.

use axum::{Json, extract::State, http::StatusCode};
use axum_auth::AuthBearer;
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, TokenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges email + password for an auth token.
///
/// # Endpoint
///
/// `POST /api/auth/token/login/`
///
/// # Errors
///
/// Returns 400 Bad Request on unknown email or wrong password (the same
/// message for both).
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let auth_token = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(TokenResponse { auth_token }))
}

/// Revokes the presented token.
///
/// # Endpoint
///
/// `POST /api/auth/token/logout/`
///
/// # Errors
///
/// Returns 401 Unauthorized when the token is missing, unknown, or
/// already revoked.
pub async fn logout_handler(
    State(state): State<AppState>,
    AuthBearer(token): AuthBearer,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(&token).await?;

    Ok(StatusCode::NO_CONTENT)
}
