//! Handlers for the shopping cart and its downloadable summary.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::recipes::RecipeMinResponse;
use crate::api::middleware::CurrentUser;
use crate::domain::entities::{MarkKind, ShoppingListItem};
use crate::error::AppError;
use crate::state::AppState;

/// Adds a recipe to the caller's shopping cart.
///
/// # Endpoint
///
/// `POST /api/recipes/{id}/shopping_cart/`
///
/// # Errors
///
/// - 404 Not Found - unknown recipe
/// - 400 Bad Request - already in the cart
pub async fn shopping_cart_add_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<(StatusCode, Json<RecipeMinResponse>), AppError> {
    let recipe = state
        .recipe_service
        .add_mark(&user, MarkKind::ShoppingCart, id)
        .await?;

    Ok((StatusCode::CREATED, Json(recipe.into())))
}

/// Removes a recipe from the caller's shopping cart.
///
/// # Endpoint
///
/// `DELETE /api/recipes/{id}/shopping_cart/`
///
/// # Errors
///
/// - 404 Not Found - unknown recipe
/// - 400 Bad Request - not in the cart
pub async fn shopping_cart_remove_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    state
        .recipe_service
        .remove_mark(&user, MarkKind::ShoppingCart, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Downloads the caller's shopping list as a plain-text attachment.
///
/// # Endpoint
///
/// `GET /api/recipes/download_shopping_cart/`
///
/// Amounts are summed per ingredient over every recipe in the cart.
///
/// # Errors
///
/// Returns 400 Bad Request when the cart is empty.
pub async fn download_shopping_cart_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let items = state.recipe_service.shopping_list(&user).await?;

    let body = render_shopping_list(&items);
    let filename = format!("{}_shopping_cart.txt", user.username);

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/plain; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

fn render_shopping_list(items: &[ShoppingListItem]) -> String {
    let mut out = String::from("Shopping list:\n");
    for item in items {
        out.push_str(&format!(
            "{} ({}): {}\n",
            item.name, item.measurement_unit, item.total
        ));
    }
    out
}
