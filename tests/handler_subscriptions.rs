mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use sqlx::PgPool;

#[sqlx::test]
async fn test_subscribe_success(pool: PgPool) {
    let user = common::create_user(&pool, "viewer@example.com", "viewer").await;
    let author = common::create_user(&pool, "author@example.com", "author").await;
    common::create_recipe(&pool, author, "Borscht").await;
    let token = common::token_for(&pool, user).await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server
        .post(&format!("/users/{author}/subscribe"))
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["id"], author);
    assert_eq!(json["username"], "author");
    assert_eq!(json["is_subscribed"], true);
    assert_eq!(json["recipes_count"], 1);
    assert_eq!(json["recipes"][0]["name"], "Borscht");
}

#[sqlx::test]
async fn test_subscribe_to_self_is_rejected(pool: PgPool) {
    let user = common::create_user(&pool, "viewer@example.com", "viewer").await;
    let token = common::token_for(&pool, user).await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server
        .post(&format!("/users/{user}/subscribe"))
        .authorization_bearer(&token)
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_subscribe_twice_is_rejected(pool: PgPool) {
    let user = common::create_user(&pool, "viewer@example.com", "viewer").await;
    let author = common::create_user(&pool, "author@example.com", "author").await;
    common::subscribe(&pool, user, author).await;
    let token = common::token_for(&pool, user).await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server
        .post(&format!("/users/{author}/subscribe"))
        .authorization_bearer(&token)
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_subscribe_unknown_author(pool: PgPool) {
    let user = common::create_user(&pool, "viewer@example.com", "viewer").await;
    let token = common::token_for(&pool, user).await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server
        .post("/users/999/subscribe")
        .authorization_bearer(&token)
        .await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_unsubscribe(pool: PgPool) {
    let user = common::create_user(&pool, "viewer@example.com", "viewer").await;
    let author = common::create_user(&pool, "author@example.com", "author").await;
    common::subscribe(&pool, user, author).await;
    let token = common::token_for(&pool, user).await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server
        .delete(&format!("/users/{author}/subscribe"))
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    // A second delete finds nothing to remove.
    let again = server
        .delete(&format!("/users/{author}/subscribe"))
        .authorization_bearer(&token)
        .await;
    again.assert_status_bad_request();
}

#[sqlx::test]
async fn test_subscriptions_list(pool: PgPool) {
    let user = common::create_user(&pool, "viewer@example.com", "viewer").await;
    let first = common::create_user(&pool, "first@example.com", "first").await;
    let second = common::create_user(&pool, "second@example.com", "second").await;
    common::create_user(&pool, "stranger@example.com", "stranger").await;
    common::subscribe(&pool, user, first).await;
    common::subscribe(&pool, user, second).await;
    let token = common::token_for(&pool, user).await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server
        .get("/users/subscriptions")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["count"], 2);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["username"], "first");
    assert_eq!(results[0]["is_subscribed"], true);
}

#[sqlx::test]
async fn test_subscriptions_recipes_limit(pool: PgPool) {
    let user = common::create_user(&pool, "viewer@example.com", "viewer").await;
    let author = common::create_user(&pool, "author@example.com", "author").await;
    for i in 0..5 {
        common::create_recipe(&pool, author, &format!("Recipe {i}")).await;
    }
    common::subscribe(&pool, user, author).await;
    let token = common::token_for(&pool, user).await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server
        .get("/users/subscriptions")
        .add_query_param("recipes_limit", "2")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let entry = &json["results"][0];
    assert_eq!(entry["recipes"].as_array().unwrap().len(), 2);
    // The count reflects every recipe, not the trimmed list.
    assert_eq!(entry["recipes_count"], 5);
}

#[sqlx::test]
async fn test_subscriptions_require_authentication(pool: PgPool) {
    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/users/subscriptions").await;

    response.assert_status_unauthorized();
}
