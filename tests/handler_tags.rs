mod common;

use axum_test::TestServer;
use sqlx::PgPool;

#[sqlx::test]
async fn test_tag_list_empty(pool: PgPool) {
    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/tags").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[sqlx::test]
async fn test_tag_list_ordered_by_name(pool: PgPool) {
    common::create_tag(&pool, "Dinner", "#0000FF", "dinner").await;
    common::create_tag(&pool, "Breakfast", "#FF0000", "breakfast").await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/tags").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let tags = json.as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0]["name"], "Breakfast");
    assert_eq!(tags[0]["slug"], "breakfast");
    assert_eq!(tags[0]["color"], "#FF0000");
    assert_eq!(tags[1]["name"], "Dinner");
}

#[sqlx::test]
async fn test_tag_detail(pool: PgPool) {
    let tag_id = common::create_tag(&pool, "Breakfast", "#FF0000", "breakfast").await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get(&format!("/tags/{tag_id}")).await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["id"], tag_id);
    assert_eq!(json["name"], "Breakfast");
}

#[sqlx::test]
async fn test_tag_detail_not_found(pool: PgPool) {
    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/tags/999").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}
