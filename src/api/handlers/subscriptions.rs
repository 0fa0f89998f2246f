//! Handlers for subscription endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::pagination::{Page, offset_limit};
use crate::api::dto::subscriptions::{
    RecipesLimitParams, SubscriptionParams, SubscriptionResponse,
};
use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use serde_json::json;

/// Lists the authors the caller follows.
///
/// # Endpoint
///
/// `GET /api/users/subscriptions/`
///
/// Each entry carries the author's recipes (trimmed by the
/// `recipes_limit` query parameter) and their total recipe count.
pub async fn subscriptions_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<SubscriptionParams>,
) -> Result<Json<Page<SubscriptionResponse>>, AppError> {
    let (page, limit) = params
        .pagination
        .resolve(state.page_size)
        .map_err(|msg| AppError::bad_request(msg, json!({})))?;
    let (offset, page_limit) = offset_limit(page, limit);

    let (count, entries) = state
        .subscription_service
        .subscriptions(&user, offset, page_limit, params.recipes_limit)
        .await?;

    Ok(Json(Page::new(
        "/api/users/subscriptions",
        page,
        limit,
        count,
        entries.into_iter().map(Into::into).collect(),
    )))
}

/// Subscribes the caller to an author.
///
/// # Endpoint
///
/// `POST /api/users/{id}/subscribe/`
///
/// # Errors
///
/// - 404 Not Found - unknown author
/// - 400 Bad Request - self-subscription or already subscribed
pub async fn subscribe_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<RecipesLimitParams>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    let entry = state
        .subscription_service
        .subscribe(&user, id, params.recipes_limit)
        .await?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// Unsubscribes the caller from an author.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}/subscribe/`
///
/// # Errors
///
/// - 404 Not Found - unknown author
/// - 400 Bad Request - no subscription existed
pub async fn unsubscribe_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    state.subscription_service.unsubscribe(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
