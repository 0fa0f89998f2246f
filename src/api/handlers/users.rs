//! Handlers for account endpoints (register, list, profile, password).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::{Page, PaginationParams, offset_limit};
use crate::api::dto::users::{
    CreateUserRequest, ProfileResponse, SetPasswordRequest, UserResponse,
};
use crate::api::middleware::{CurrentUser, MaybeUser};
use crate::application::services::RegisterInput;
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /api/users/`
///
/// # Errors
///
/// Returns 400 Bad Request on field validation failures or duplicate
/// email/username.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .register(RegisterInput {
            email: payload.email,
            username: payload.username,
            first_name: payload.first_name,
            last_name: payload.last_name,
            password: payload.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Lists accounts with pagination.
///
/// # Endpoint
///
/// `GET /api/users/`
pub async fn user_list_handler(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<ProfileResponse>>, AppError> {
    let (page, limit) = params
        .resolve(state.page_size)
        .map_err(|msg| AppError::bad_request(msg, json!({})))?;
    let (offset, page_limit) = offset_limit(page, limit);

    let (count, profiles) = state
        .user_service
        .list_profiles(viewer.as_ref(), offset, page_limit)
        .await?;

    Ok(Json(Page::new(
        "/api/users",
        page,
        limit,
        count,
        profiles.into_iter().map(Into::into).collect(),
    )))
}

/// Returns one profile.
///
/// # Endpoint
///
/// `GET /api/users/{id}/`
///
/// # Errors
///
/// Returns 404 Not Found for unknown accounts.
pub async fn user_detail_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.user_service.profile(viewer.as_ref(), id).await?;

    Ok(Json(profile.into()))
}

/// Returns the caller's own profile.
///
/// # Endpoint
///
/// `GET /api/users/me/`
pub async fn me_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.user_service.profile(Some(&user), user.id).await?;

    Ok(Json(profile.into()))
}

/// Changes the caller's password.
///
/// # Endpoint
///
/// `POST /api/users/set_password/`
///
/// # Errors
///
/// Returns 400 Bad Request when the current password does not match.
pub async fn set_password_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<SetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;

    state
        .user_service
        .set_password(&user, &payload.current_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
