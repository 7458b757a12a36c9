//! Handler tests for the Skeleton domain
//!
//! These drive the item router end to end over a mocked sea-orm connection:
//! - Caller identity via the trusted `x-user-id` header
//! - Request validation and pagination clamping
//! - HTTP status codes and error bodies
//!
//! The database is a `MockDatabase`, so no container is needed.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Router, middleware};
use axum_helpers::{USER_ID_HEADER, trusted_identity_header};
use chrono::Utc;
use domain_skeleton::*;
use http_body_util::BodyExt;
use sea_orm::{
    DatabaseConnection, DbBackend, DbErr, MockDatabase, MockExecResult, Value,
};
use serde_json::{Value as Json, json};
use std::collections::BTreeMap;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

type Row = BTreeMap<&'static str, Value>;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(db: DatabaseConnection) -> Router {
    let service = ItemService::new(PgItemRepository::new(db), SkeletonConfig::default());
    handlers::router(service).layer(middleware::from_fn(trusted_identity_header))
}

fn affected(rows: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: rows,
    }
}

fn item_row(item: &Item) -> Row {
    BTreeMap::from([
        ("id", item.id.into()),
        ("name", item.name.clone().into()),
        ("description", item.description.clone().into()),
        ("user_id", item.user_id.into()),
        ("active", item.active.into()),
        ("created_at", item.created_at.into()),
        ("updated_at", item.updated_at.into()),
    ])
}

fn count_row(total: i64) -> Row {
    BTreeMap::from([("total", total.into())])
}

fn stored_item(user_id: Uuid, name: &str) -> Item {
    Item {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: String::new(),
        user_id,
        active: false,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn request(method: &str, uri: &str, caller: Option<&str>, body: Option<Json>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
        builder = builder.header(USER_ID_HEADER, caller);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_item_returns_201() {
    let builder = TestDataBuilder::from_test_name("handler_create_201");
    let owner = builder.user_id();
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_exec_results([affected(1)])
        .into_connection();

    let response = app(db)
        .oneshot(request(
            "POST",
            "/",
            Some(&owner.to_string()),
            Some(json!({ "name": builder.name("item", "main") })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let item: Item = json_body(response.into_body()).await;
    assert_eq!(item.name, builder.name("item", "main"));
    assert_eq!(item.user_id, owner);
    assert_eq!(item.description, "");
    assert!(!item.active);
    assert!(item.updated_at.is_none());
}

#[tokio::test]
async fn test_create_item_validates_input() {
    let owner = Uuid::new_v4().to_string();
    let db = MockDatabase::new(DbBackend::Postgres).into_connection();

    let response = app(db)
        .oneshot(request("POST", "/", Some(&owner), Some(json!({ "name": "" }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Json = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn test_create_item_with_malformed_body_returns_400() {
    let owner = Uuid::new_v4().to_string();

    for body in [json!({}), json!({ "name": 5 }), json!({ "name": "x", "active": "yes" })] {
        let db = MockDatabase::new(DbBackend::Postgres).into_connection();
        let response = app(db.clone())
            .oneshot(request("POST", "/", Some(&owner), Some(body.clone())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");

        let error: Json = json_body(response.into_body()).await;
        assert_eq!(error["error"], "JSON_EXTRACTION");
        assert!(db.into_transaction_log().is_empty());
    }
}

#[tokio::test]
async fn test_create_item_without_content_type_returns_400() {
    let owner = Uuid::new_v4().to_string();
    let db = MockDatabase::new(DbBackend::Postgres).into_connection();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(USER_ID_HEADER, owner)
        .body(Body::from(json!({ "name": "widget" }).to_string()))
        .unwrap();
    let response = app(db).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Json = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_create_item_without_identity_returns_401() {
    let db = MockDatabase::new(DbBackend::Postgres).into_connection();

    let response = app(db)
        .oneshot(request("POST", "/", None, Some(json!({ "name": "widget" }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Json = json_body(response.into_body()).await;
    assert_eq!(body["message"], "User not authenticated");
}

#[tokio::test]
async fn test_non_uuid_identity_returns_400() {
    let db = MockDatabase::new(DbBackend::Postgres).into_connection();

    let response = app(db)
        .oneshot(request(
            "POST",
            "/",
            Some("not-a-uuid"),
            Some(json!({ "name": "widget" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Json = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Invalid user ID");
}

#[tokio::test]
async fn test_storage_failure_hides_database_detail() {
    let owner = Uuid::new_v4().to_string();
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_exec_errors([DbErr::Custom(
            "relation \"skeleton_items\" does not exist".to_string(),
        )])
        .into_connection();

    let response = app(db)
        .oneshot(request("POST", "/", Some(&owner), Some(json!({ "name": "widget" }))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Json = json_body(response.into_body()).await;
    assert_eq!(body["error"], "DATABASE_ERROR");
    assert_eq!(body["message"], "Database error occurred");
    assert!(!body.to_string().contains("skeleton_items"));
}

// ============================================================================
// Get
// ============================================================================

#[tokio::test]
async fn test_get_item_returns_stored_item_to_any_caller() {
    let item = stored_item(Uuid::new_v4(), "widget");
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_results([vec![item_row(&item)]])
        .into_connection();

    let response = app(db)
        .oneshot(request("GET", &format!("/{}", item.id), None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let found: Item = json_body(response.into_body()).await;
    assert_eq!(found, item);
}

#[tokio::test]
async fn test_get_missing_item_returns_404() {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_results([Vec::<Row>::new()])
        .into_connection();

    let response = app(db)
        .oneshot(request("GET", &format!("/{}", Uuid::new_v4()), None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Json = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Item not found");
}

#[tokio::test]
async fn test_get_with_invalid_id_returns_400() {
    let db = MockDatabase::new(DbBackend::Postgres).into_connection();

    let response = app(db)
        .oneshot(request("GET", "/not-a-uuid", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Json = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_UUID");
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_items_returns_envelope() {
    let owner = Uuid::new_v4();
    let items = vec![stored_item(owner, "b"), stored_item(owner, "a")];
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_results([vec![count_row(5)]])
        .append_query_results([items.iter().map(item_row).collect::<Vec<_>>()])
        .into_connection();

    let response = app(db)
        .oneshot(request(
            "GET",
            "/?limit=2&offset=3",
            Some(&owner.to_string()),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let list: ItemList = json_body(response.into_body()).await;
    assert_eq!(list.items, items);
    assert_eq!(list.total, 5);
    assert_eq!(list.limit, 2);
    assert_eq!(list.offset, 3);
}

#[tokio::test]
async fn test_list_items_clamps_pagination() {
    let owner = Uuid::new_v4().to_string();
    let cases = [
        ("/?limit=500", 100, 0),
        ("/?limit=-5", 20, 0),
        ("/?offset=-1", 20, 0),
        ("/?limit=abc&offset=xyz", 20, 0),
    ];

    for (uri, want_limit, want_offset) in cases {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![count_row(0)]])
            .append_query_results([Vec::<Row>::new()])
            .into_connection();

        let response = app(db)
            .oneshot(request("GET", uri, Some(&owner), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "uri={uri}");

        let list: ItemList = json_body(response.into_body()).await;
        assert_eq!(list.limit, want_limit, "uri={uri}");
        assert_eq!(list.offset, want_offset, "uri={uri}");
    }
}

#[tokio::test]
async fn test_list_items_requires_identity() {
    let db = MockDatabase::new(DbBackend::Postgres).into_connection();

    let response = app(db)
        .oneshot(request("GET", "/", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_item_returns_reread_item() {
    let owner = Uuid::new_v4();
    let mut item = stored_item(owner, "renamed");
    item.updated_at = Some(Utc::now());
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_exec_results([affected(1)])
        .append_query_results([vec![item_row(&item)]])
        .into_connection();

    let response = app(db)
        .oneshot(request(
            "PUT",
            &format!("/{}", item.id),
            Some(&owner.to_string()),
            Some(json!({ "name": "renamed" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let updated: Item = json_body(response.into_body()).await;
    assert_eq!(updated.name, "renamed");
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn test_update_without_fields_returns_400() {
    let owner = Uuid::new_v4().to_string();
    let db = MockDatabase::new(DbBackend::Postgres).into_connection();

    let response = app(db.clone())
        .oneshot(request(
            "PUT",
            &format!("/{}", Uuid::new_v4()),
            Some(&owner),
            Some(json!({})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Json = json_body(response.into_body()).await;
    assert_eq!(body["message"], "No fields to update");
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn test_update_with_mistyped_field_returns_400() {
    let owner = Uuid::new_v4().to_string();
    let db = MockDatabase::new(DbBackend::Postgres).into_connection();

    let response = app(db.clone())
        .oneshot(request(
            "PUT",
            &format!("/{}", Uuid::new_v4()),
            Some(&owner),
            Some(json!({ "active": "yes" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn test_update_foreign_item_returns_404() {
    let owner = Uuid::new_v4().to_string();
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_exec_results([affected(0)])
        .into_connection();

    let response = app(db)
        .oneshot(request(
            "PUT",
            &format!("/{}", Uuid::new_v4()),
            Some(&owner),
            Some(json!({ "active": true })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Json = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Item not found or permission denied");
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_item_returns_204() {
    let owner = Uuid::new_v4().to_string();
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_exec_results([affected(1)])
        .into_connection();

    let response = app(db)
        .oneshot(request(
            "DELETE",
            &format!("/{}", Uuid::new_v4()),
            Some(&owner),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_delete_foreign_and_missing_items_look_the_same() {
    let builder = TestDataBuilder::from_test_name("handler_delete_foreign");
    let mut bodies = Vec::new();

    // Both a row owned by someone else and a missing row match zero rows.
    for caller in [builder.user_id(), builder.other_user_id()] {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([affected(0)])
            .into_connection();

        let response = app(db)
            .oneshot(request(
                "DELETE",
                &format!("/{}", Uuid::new_v4()),
                Some(&caller.to_string()),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        bodies.push(json_body::<Json>(response.into_body()).await);
    }

    assert_eq!(bodies[0], bodies[1]);
}
