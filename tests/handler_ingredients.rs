mod common;

use axum_test::TestServer;
use sqlx::PgPool;

#[sqlx::test]
async fn test_ingredient_list(pool: PgPool) {
    common::create_ingredient(&pool, "salt", "g").await;
    common::create_ingredient(&pool, "beet", "pcs").await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/ingredients").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "beet");
    assert_eq!(items[0]["measurement_unit"], "pcs");
}

#[sqlx::test]
async fn test_ingredient_list_name_prefix_filter(pool: PgPool) {
    common::create_ingredient(&pool, "salt", "g").await;
    common::create_ingredient(&pool, "salmon", "g").await;
    common::create_ingredient(&pool, "beet", "pcs").await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/ingredients").add_query_param("name", "sal").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "salmon");
    assert_eq!(items[1]["name"], "salt");
}

#[sqlx::test]
async fn test_ingredient_prefix_filter_is_case_insensitive(pool: PgPool) {
    common::create_ingredient(&pool, "Salt", "g").await;

    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/ingredients").add_query_param("name", "sa").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[sqlx::test]
async fn test_ingredient_detail_not_found(pool: PgPool) {
    let state = common::create_test_state(pool);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/ingredients/999").await;

    response.assert_status_not_found();
}
