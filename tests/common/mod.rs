#![allow(dead_code)]

use axum::Router;
use foodgram_api::state::AppState;
use foodgram_api::utils::password::hash_password;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

// 1x1 transparent PNG
pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(pool),
        TEST_SECRET.to_string(),
        std::env::temp_dir().join("foodgram-test-media"),
        6,
    )
}

/// The API router as served in production, minus rate limiting.
pub fn test_app(state: AppState) -> Router {
    foodgram_api::api::routes::api_routes()
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            foodgram_api::api::middleware::auth::identify,
        ))
        .with_state(state)
}

pub async fn create_user(pool: &PgPool, email: &str, username: &str) -> i64 {
    let password_hash = hash_password(TEST_PASSWORD).unwrap();

    sqlx::query_scalar(
        "INSERT INTO users (email, username, first_name, last_name, password_hash)
         VALUES ($1, $2, 'Test', 'User', $3) RETURNING id",
    )
    .bind(email)
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Issues a token for a user by inserting its hash directly, the same
/// way the auth service stores them.
pub async fn token_for(pool: &PgPool, user_id: i64) -> String {
    let token = format!("test-token-for-user-{user_id}");
    let token_hash = hash_token(&token);

    sqlx::query("INSERT INTO auth_tokens (user_id, token_hash) VALUES ($1, $2)")
        .bind(user_id)
        .bind(token_hash)
        .execute(pool)
        .await
        .unwrap();

    token
}

fn hash_token(token: &str) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(TEST_SECRET.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub async fn create_tag(pool: &PgPool, name: &str, color: &str, slug: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO tags (name, color, slug) VALUES ($1, $2, $3) RETURNING id")
        .bind(name)
        .bind(color)
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_ingredient(pool: &PgPool, name: &str, unit: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(unit)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_recipe(pool: &PgPool, author_id: i64, name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO recipes (author_id, name, image, text, cooking_time)
         VALUES ($1, $2, 'recipes/fixture.png', 'Cook well.', 30) RETURNING id",
    )
    .bind(author_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn link_tag(pool: &PgPool, recipe_id: i64, tag_id: i64) {
    sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
        .bind(recipe_id)
        .bind(tag_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn link_ingredient(pool: &PgPool, recipe_id: i64, ingredient_id: i64, amount: i16) {
    sqlx::query(
        "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
    )
    .bind(recipe_id)
    .bind(ingredient_id)
    .bind(amount)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn add_favorite(pool: &PgPool, user_id: i64, recipe_id: i64) {
    sqlx::query("INSERT INTO favorites (user_id, recipe_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn add_to_cart(pool: &PgPool, user_id: i64, recipe_id: i64) {
    sqlx::query("INSERT INTO shopping_cart (user_id, recipe_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn subscribe(pool: &PgPool, user_id: i64, author_id: i64) {
    sqlx::query("INSERT INTO subscriptions (user_id, author_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(author_id)
        .execute(pool)
        .await
        .unwrap();
}
