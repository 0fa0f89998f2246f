//! Handlers for ingredient endpoints (read-only).

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::ingredients::{IngredientListParams, IngredientResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists ingredients, optionally filtered by name prefix, unpaginated.
///
/// # Endpoint
///
/// `GET /api/ingredients/?name=<prefix>`
pub async fn ingredient_list_handler(
    State(state): State<AppState>,
    Query(params): Query<IngredientListParams>,
) -> Result<Json<Vec<IngredientResponse>>, AppError> {
    let ingredients = state
        .catalog_service
        .ingredients(params.name.as_deref())
        .await?;

    Ok(Json(ingredients.into_iter().map(Into::into).collect()))
}

/// Returns one ingredient.
///
/// # Endpoint
///
/// `GET /api/ingredients/{id}/`
pub async fn ingredient_detail_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<IngredientResponse>, AppError> {
    let ingredient = state.catalog_service.ingredient(id).await?;

    Ok(Json(ingredient.into()))
}
