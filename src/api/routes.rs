//! API route configuration.
//!
//! Every route lives in one router because several paths mix public and
//! protected methods (`GET /recipes` is public, `POST /recipes` is
//! not). The [`crate::api::middleware::auth::identify`] layer resolves
//! the caller once; handlers state their requirement through the
//! [`CurrentUser`](crate::api::middleware::CurrentUser) /
//! [`MaybeUser`](crate::api::middleware::MaybeUser) extractors.

use crate::api::handlers::{
    create_recipe_handler, create_user_handler, delete_recipe_handler, favorite_handler,
    ingredient_detail_handler, ingredient_list_handler, login_handler, logout_handler, me_handler,
    recipe_detail_handler, recipe_list_handler, set_password_handler,
    shopping_cart_add_handler, shopping_cart_remove_handler, subscribe_handler,
    subscriptions_handler, tag_detail_handler, tag_list_handler, unfavorite_handler,
    unsubscribe_handler, update_recipe_handler, user_detail_handler, user_list_handler,
    download_shopping_cart_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /tags`                General   - List tags
/// - `GET    /tags/{id}`           General   - Tag details
/// - `GET    /ingredients`         General   - List ingredients (name prefix filter)
/// - `GET    /ingredients/{id}`    General   - Ingredient details
/// - `GET    /recipes`             General   - List recipes (paginated, filtered)
/// - `POST   /recipes`             Auth      - Create a recipe
/// - `GET    /recipes/{id}`        General   - Recipe details
/// - `PATCH  /recipes/{id}`        Author    - Update a recipe
/// - `DELETE /recipes/{id}`        Author    - Delete a recipe
/// - `POST   /recipes/{id}/favorite`        Auth - Add to favorites
/// - `DELETE /recipes/{id}/favorite`        Auth - Remove from favorites
/// - `POST   /recipes/{id}/shopping_cart`   Auth - Add to the cart
/// - `DELETE /recipes/{id}/shopping_cart`   Auth - Remove from the cart
/// - `GET    /recipes/download_shopping_cart` Auth - Download the shopping list
/// - `POST   /users`               General   - Register
/// - `GET    /users`               General   - List accounts (paginated)
/// - `GET    /users/{id}`          General   - Profile
/// - `GET    /users/me`            Auth      - Own profile
/// - `POST   /users/set_password`  Auth      - Change password
/// - `GET    /users/subscriptions` Auth      - List followed authors
/// - `POST   /users/{id}/subscribe`  Auth    - Follow an author
/// - `DELETE /users/{id}/subscribe`  Auth    - Unfollow an author
/// - `POST   /auth/token/login`    General   - Obtain a token
/// - `POST   /auth/token/logout`   Auth      - Revoke the token
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(tag_list_handler))
        .route("/tags/{id}", get(tag_detail_handler))
        .route("/ingredients", get(ingredient_list_handler))
        .route("/ingredients/{id}", get(ingredient_detail_handler))
        .route(
            "/recipes",
            get(recipe_list_handler).post(create_recipe_handler),
        )
        .route(
            "/recipes/download_shopping_cart",
            get(download_shopping_cart_handler),
        )
        .route(
            "/recipes/{id}",
            get(recipe_detail_handler)
                .patch(update_recipe_handler)
                .delete(delete_recipe_handler),
        )
        .route(
            "/recipes/{id}/favorite",
            post(favorite_handler).delete(unfavorite_handler),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(shopping_cart_add_handler).delete(shopping_cart_remove_handler),
        )
        .route(
            "/users",
            get(user_list_handler).post(create_user_handler),
        )
        .route("/users/me", get(me_handler))
        .route("/users/set_password", post(set_password_handler))
        .route("/users/subscriptions", get(subscriptions_handler))
        .route("/users/{id}", get(user_detail_handler))
        .route(
            "/users/{id}/subscribe",
            post(subscribe_handler).delete(unsubscribe_handler),
        )
        .route("/auth/token/login", post(login_handler))
        .route("/auth/token/logout", post(logout_handler))
}
