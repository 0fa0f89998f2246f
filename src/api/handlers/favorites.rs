//! Handlers for the favorites toggle.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::recipes::RecipeMinResponse;
use crate::api::middleware::CurrentUser;
use crate::domain::entities::MarkKind;
use crate::error::AppError;
use crate::state::AppState;

/// Adds a recipe to the caller's favorites.
///
/// # Endpoint
///
/// `POST /api/recipes/{id}/favorite/`
///
/// # Errors
///
/// - 404 Not Found - unknown recipe
/// - 400 Bad Request - already favorited
pub async fn favorite_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<(StatusCode, Json<RecipeMinResponse>), AppError> {
    let recipe = state
        .recipe_service
        .add_mark(&user, MarkKind::Favorite, id)
        .await?;

    Ok((StatusCode::CREATED, Json(recipe.into())))
}

/// Removes a recipe from the caller's favorites.
///
/// # Endpoint
///
/// `DELETE /api/recipes/{id}/favorite/`
///
/// # Errors
///
/// - 404 Not Found - unknown recipe
/// - 400 Bad Request - not favorited
pub async fn unfavorite_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    state
        .recipe_service
        .remove_mark(&user, MarkKind::Favorite, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
