//! Handlers for recipe CRUD endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::{Page, PaginationParams, offset_limit};
use crate::api::dto::recipes::{
    CreateRecipeRequest, RecipeIngredientDto, RecipeListParams, RecipeResponse,
    UpdateRecipeRequest,
};
use crate::api::middleware::{CurrentUser, MaybeUser};
use crate::application::services::{RecipeInput, RecipeListQuery};
use crate::domain::entities::RecipeIngredientInput;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::image::{ImageError, store_data_uri};
use serde_json::json;

/// Lists recipes, newest first, with pagination and filters.
///
/// # Endpoint
///
/// `GET /api/recipes/`
///
/// # Filters
///
/// - `author=<id>`
/// - `tags=<slug>` (repeatable, OR-combined)
/// - `is_favorited=1` / `is_in_shopping_cart=1` (authenticated callers
///   only; ignored for anonymous requests)
pub async fn recipe_list_handler(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    params: RecipeListParams,
) -> Result<Json<Page<RecipeResponse>>, AppError> {
    let pagination = PaginationParams {
        page: params.page,
        limit: params.limit,
    };
    let (page, limit) = pagination
        .resolve(state.page_size)
        .map_err(|msg| AppError::bad_request(msg, json!({})))?;
    let (offset, page_limit) = offset_limit(page, limit);

    let query = RecipeListQuery {
        author_id: params.author,
        tag_slugs: params.tags,
        is_favorited: params.is_favorited,
        is_in_shopping_cart: params.is_in_shopping_cart,
    };

    let (count, details) = state
        .recipe_service
        .list(viewer.as_ref(), &query, offset, page_limit)
        .await?;

    Ok(Json(Page::new(
        "/api/recipes",
        page,
        limit,
        count,
        details.into_iter().map(Into::into).collect(),
    )))
}

/// Creates a recipe.
///
/// # Endpoint
///
/// `POST /api/recipes/`
///
/// # Request Body
///
/// ```json
/// {
///   "ingredients": [{"id": 3, "amount": 10}],
///   "tags": [1, 2],
///   "image": "data:image/png;base64,...",
///   "name": "Borscht",
///   "text": "Simmer slowly.",
///   "cooking_time": 90
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request on validation failures: repeated or unknown
/// tags/ingredients, out-of-range amounts or cooking time, or a broken
/// image payload.
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), AppError> {
    payload.validate()?;

    let image = store_data_uri(&state.media_root, &payload.image)
        .await
        .map_err(map_image_error)?;

    let details = state
        .recipe_service
        .create(
            &user,
            RecipeInput {
                name: payload.name,
                image: Some(image),
                text: payload.text,
                cooking_time: payload.cooking_time as i16,
                tag_ids: payload.tags,
                ingredients: ingredient_inputs(payload.ingredients),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(details.into())))
}

/// Returns one recipe's read representation.
///
/// # Endpoint
///
/// `GET /api/recipes/{id}/`
pub async fn recipe_detail_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
) -> Result<Json<RecipeResponse>, AppError> {
    let details = state.recipe_service.get(viewer.as_ref(), id).await?;

    Ok(Json(details.into()))
}

/// Rewrites a recipe, replacing its tags and ingredients.
///
/// # Endpoint
///
/// `PATCH /api/recipes/{id}/`
///
/// The picture may be omitted to keep the stored one.
///
/// # Errors
///
/// - 404 Not Found - unknown recipe
/// - 403 Forbidden - caller is not the author
/// - 400 Bad Request - validation failures
pub async fn update_recipe_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, AppError> {
    payload.validate()?;

    let image = match &payload.image {
        Some(data) => Some(
            store_data_uri(&state.media_root, data)
                .await
                .map_err(map_image_error)?,
        ),
        None => None,
    };

    let details = state
        .recipe_service
        .update(
            &user,
            id,
            RecipeInput {
                name: payload.name,
                image,
                text: payload.text,
                cooking_time: payload.cooking_time as i16,
                tag_ids: payload.tags,
                ingredients: ingredient_inputs(payload.ingredients),
            },
        )
        .await?;

    Ok(Json(details.into()))
}

/// Deletes a recipe.
///
/// # Endpoint
///
/// `DELETE /api/recipes/{id}/`
///
/// # Errors
///
/// - 404 Not Found - unknown recipe
/// - 403 Forbidden - caller is not the author
pub async fn delete_recipe_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    state.recipe_service.delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn ingredient_inputs(items: Vec<RecipeIngredientDto>) -> Vec<RecipeIngredientInput> {
    items
        .into_iter()
        .map(|item| RecipeIngredientInput {
            ingredient_id: item.id,
            amount: item.amount as i16,
        })
        .collect()
}

/// Broken payloads are the client's fault; filesystem trouble is ours.
fn map_image_error(e: ImageError) -> AppError {
    match e {
        ImageError::Io(_) => AppError::internal("Failed to store image", json!({})),
        other => AppError::bad_request(other.to_string(), json!({ "field": "image" })),
    }
}
