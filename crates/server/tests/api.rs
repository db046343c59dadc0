use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;
use server::ServerState;

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    for username in ["alice", "bob", "carol"] {
        add_user(&db, username).await;
    }
    let engine = engine::Engine::builder().database(db.clone()).build();
    server::router(ServerState {
        engine: Arc::new(engine),
        db,
    })
}

async fn add_user(db: &DatabaseConnection, username: &str) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password, name) VALUES (?, ?, ?)",
        vec![username.into(), "password".into(), username.into()],
    ))
    .await
    .unwrap();
}

fn basic_auth(username: &str, password: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    user: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth(user, "password"));

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_group(router: &Router, members: &[&str]) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/groups",
        "alice",
        Some(json!({ "name": "Trip", "member_ids": members })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn requests_without_credentials_are_rejected() {
    let router = test_router().await;

    let request = Request::builder()
        .method("GET")
        .uri("/groups")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .method("GET")
        .uri("/groups")
        .header(header::AUTHORIZATION, basic_auth("alice", "wrong"))
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_the_caller_profile() {
    let router = test_router().await;
    let (status, body) = send(&router, "GET", "/users/me", "alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["name"], "alice");
}

#[tokio::test]
async fn group_lifecycle_create_list_detail() {
    let router = test_router().await;
    let group_id = create_group(&router, &["bob", "carol"]).await;

    let (status, body) = send(&router, "GET", "/groups", "alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["groups"].as_array().unwrap().len(), 1);

    let (status, body) = send(&router, "GET", &format!("/groups/{group_id}"), "bob", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["member_count"], 3);
    assert_eq!(body["members"][0]["user_id"], "alice");
    assert_eq!(body["members"][0]["role"], "owner");

    let (status, _) = send(&router, "GET", &format!("/groups/{group_id}"), "carol", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn non_members_get_403_and_unknown_groups_404() {
    let router = test_router().await;
    let group_id = create_group(&router, &["bob"]).await;

    let (status, _) = send(&router, "GET", &format!("/groups/{group_id}"), "carol", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&router, "GET", "/groups/missing/balance", "alice", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expense_with_explicit_items_is_created() {
    let router = test_router().await;
    let group_id = create_group(&router, &["bob", "carol"]).await;

    let (status, body) = send(
        &router,
        "POST",
        &format!("/groups/{group_id}/expenses"),
        "alice",
        Some(json!({
            "amount_minor": 9000,
            "currency": "EUR",
            "description": "hotel",
            "date": "2026-08-01T12:00:00+02:00",
            "items": [
                { "user_id": "alice", "amount_minor": 3000 },
                { "user_id": "bob", "amount_minor": 3000 },
                { "user_id": "carol", "amount_minor": 3000 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["paid_by"], "alice");
    assert_eq!(body["items"].as_array().unwrap().len(), 3);

    let (status, body) = send(
        &router,
        "GET",
        &format!("/groups/{group_id}/expenses"),
        "bob",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expenses"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn mismatched_item_sum_is_a_400() {
    let router = test_router().await;
    let group_id = create_group(&router, &["bob"]).await;

    // 10.00 total against items summing to 10.02.
    let (status, body) = send(
        &router,
        "POST",
        &format!("/groups/{group_id}/expenses"),
        "alice",
        Some(json!({
            "amount_minor": 1000,
            "currency": "EUR",
            "description": "dinner",
            "date": "2026-08-01T20:00:00+02:00",
            "items": [
                { "user_id": "alice", "amount_minor": 500 },
                { "user_id": "bob", "amount_minor": 502 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("item amounts"));
}

#[tokio::test]
async fn omitted_items_split_equally_with_remainder_on_first_member() {
    let router = test_router().await;
    let group_id = create_group(&router, &["bob", "carol"]).await;

    let (status, body) = send(
        &router,
        "POST",
        &format!("/groups/{group_id}/expenses"),
        "bob",
        Some(json!({
            "amount_minor": 1000,
            "currency": "EUR",
            "description": "taxi",
            "date": "2026-08-02T09:00:00+02:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["user_id"], "alice");
    assert_eq!(items[0]["amount_minor"], 334);
    assert_eq!(items[1]["amount_minor"], 333);
    assert_eq!(items[2]["amount_minor"], 333);
}

#[tokio::test]
async fn balance_view_reflects_expenses_and_settlements() {
    let router = test_router().await;
    let group_id = create_group(&router, &["bob", "carol"]).await;

    let (status, _) = send(
        &router,
        "POST",
        &format!("/groups/{group_id}/expenses"),
        "alice",
        Some(json!({
            "amount_minor": 9000,
            "currency": "EUR",
            "description": "hotel",
            "date": "2026-08-01T12:00:00+02:00",
            "items": [
                { "user_id": "alice", "amount_minor": 3000 },
                { "user_id": "bob", "amount_minor": 3000 },
                { "user_id": "carol", "amount_minor": 3000 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &router,
        "POST",
        &format!("/groups/{group_id}/settlements"),
        "bob",
        Some(json!({
            "to_user_id": "alice",
            "amount_minor": 3000,
            "currency": "EUR"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["from_user_id"], "bob");

    let (status, body) = send(
        &router,
        "GET",
        &format!("/groups/{group_id}/balance"),
        "carol",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let balances = body["balances"].as_array().unwrap();
    let net = |user: &str| {
        balances
            .iter()
            .find(|b| b["user_id"] == user)
            .unwrap()["net_balance_minor"]
            .as_i64()
            .unwrap()
    };
    // The settlement is still pending, so nothing moved yet.
    assert_eq!(net("alice"), 6000);
    assert_eq!(net("bob"), -3000);
    assert_eq!(net("carol"), -3000);
    assert_eq!(body["settlements"].as_array().unwrap().len(), 1);
    assert!(body["former_members"].is_null());
}

#[tokio::test]
async fn settlement_to_self_is_rejected() {
    let router = test_router().await;
    let group_id = create_group(&router, &["bob"]).await;

    let (status, _) = send(
        &router,
        "POST",
        &format!("/groups/{group_id}/settlements"),
        "alice",
        Some(json!({
            "to_user_id": "alice",
            "amount_minor": 100,
            "currency": "EUR"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
