//! End-to-end tests for the work order endpoints, driven through the full
//! application router (middleware included) against a real database.

mod common;

use axum::http::StatusCode;
use axum::Router;
use serde_json::json;
use sqlx::PgPool;

use common::{build_test_app, expect_json, get, post_json};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_line(app: &Router, name: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/production-lines",
        json!({
            "name": name,
            "type": "packaging",
            "target_output_per_hour": 120.0,
            "output_unit": "kg",
        }),
    )
    .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    body["data"]["id"].as_i64().unwrap()
}

async fn create_work_order(app: &Router, number: &str, line_id: i64) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/v1/work-orders",
        json!({
            "work_order_number": number,
            "item_number": "PK-500",
            "item_name": "House Blend 500g",
            "production_line_id": line_id,
            "planned_quantity": 1000.0,
            "planned_start_time": "2026-08-28T06:00:00Z",
        }),
    )
    .await;
    let body = expect_json(response, StatusCode::CREATED).await;
    body["data"].clone()
}

async fn start(app: &Router, order_id: i64, line_id: i64) -> axum::response::Response {
    post_json(
        app,
        &format!("/api/v1/work-orders/{order_id}/start"),
        json!({ "production_line_id": line_id }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Test: health endpoint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_ok(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/health").await;
    let body = expect_json(response, StatusCode::OK).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
}

// ---------------------------------------------------------------------------
// Test: full lifecycle through the API
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_start_declare_complete_lifecycle(pool: PgPool) {
    let app = build_test_app(pool);
    let line_id = create_line(&app, "Pack Line 1").await;

    let order = create_work_order(&app, "WO-1001", line_id).await;
    let order_id = order["id"].as_i64().unwrap();
    assert_eq!(order["status"], "planned");
    assert_eq!(order["actual_quantity"], serde_json::Value::Null);
    // Joined display fields from the item that was auto-provisioned.
    assert_eq!(order["item_number"], "PK-500");
    assert_eq!(order["production_line_name"], "Pack Line 1");

    let body = expect_json(start(&app, order_id, line_id).await, StatusCode::OK).await;
    assert_eq!(body["data"]["status"], "started");
    assert!(!body["data"]["actual_start_time"].is_null());

    // The line now points at the running item.
    let lines = expect_json(get(&app, "/api/v1/production-lines").await, StatusCode::OK).await;
    let line = lines["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["id"].as_i64() == Some(line_id))
        .unwrap();
    assert_eq!(line["current_item_id"], order["item_id"]);

    // Two partial declarations accumulate.
    let body = expect_json(
        post_json(
            &app,
            &format!("/api/v1/work-orders/{order_id}/declare"),
            json!({ "quantity": 600.0 }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["data"]["actual_quantity"], 600.0);
    assert_eq!(body["data"]["status"], "started");

    let body = expect_json(
        post_json(
            &app,
            &format!("/api/v1/work-orders/{order_id}/declare"),
            json!({ "quantity": 400.0, "complete": true }),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["data"]["actual_quantity"], 1000.0);
    assert_eq!(body["data"]["status"], "completed");
    assert!(!body["data"]["actual_end_time"].is_null());

    // Closed orders show up in the completed list, not the active one.
    let active = expect_json(
        get(
            &app,
            &format!("/api/v1/work-orders?production_line_id={line_id}"),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert!(active["data"].as_array().unwrap().is_empty());

    let completed = expect_json(
        get(
            &app,
            &format!("/api/v1/work-orders/completed?production_line_id={line_id}"),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(completed["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: item auto-provisioning is visible through the catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn creating_a_work_order_provisions_the_item(pool: PgPool) {
    let app = build_test_app(pool);
    let line_id = create_line(&app, "Pack Line 1").await;

    create_work_order(&app, "WO-1001", line_id).await;

    let items = expect_json(get(&app, "/api/v1/items?search=PK-500").await, StatusCode::OK).await;
    let rows = items["data"]["items"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["number"], "PK-500");
    assert_eq!(rows[0]["type"], "PACK");
    assert_eq!(rows[0]["is_active"], true);
}

// ---------------------------------------------------------------------------
// Test: start conflicts and invalid states
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn starting_on_a_busy_line_conflicts(pool: PgPool) {
    let app = build_test_app(pool);
    let line_id = create_line(&app, "Pack Line 1").await;

    let order_a = create_work_order(&app, "WO-A", line_id).await;
    let order_b = create_work_order(&app, "WO-B", line_id).await;
    let a_id = order_a["id"].as_i64().unwrap();
    let b_id = order_b["id"].as_i64().unwrap();

    expect_json(start(&app, a_id, line_id).await, StatusCode::OK).await;

    let body = expect_json(start(&app, b_id, line_id).await, StatusCode::CONFLICT).await;
    assert_eq!(body["code"], "CONFLICT");

    // B is untouched by the rejected start.
    let b = expect_json(
        get(&app, &format!("/api/v1/work-orders/{b_id}")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(b["data"]["status"], "planned");
    assert!(b["data"]["actual_start_time"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn starting_a_completed_order_is_invalid_state(pool: PgPool) {
    let app = build_test_app(pool);
    let line_id = create_line(&app, "Pack Line 1").await;

    let order = create_work_order(&app, "WO-1001", line_id).await;
    let order_id = order["id"].as_i64().unwrap();

    expect_json(start(&app, order_id, line_id).await, StatusCode::OK).await;
    expect_json(
        post_json(
            &app,
            &format!("/api/v1/work-orders/{order_id}/declare"),
            json!({ "quantity": 10.0, "complete": true }),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    let body = expect_json(start(&app, order_id, line_id).await, StatusCode::CONFLICT).await;
    assert_eq!(body["code"], "INVALID_STATE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn starting_on_the_wrong_line_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let line_a = create_line(&app, "Pack Line 1").await;
    let line_b = create_line(&app, "Pack Line 2").await;

    let order = create_work_order(&app, "WO-1001", line_a).await;
    let order_id = order["id"].as_i64().unwrap();

    let body = expect_json(start(&app, order_id, line_b).await, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: declaration guards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn declaring_against_a_planned_order_is_invalid_state(pool: PgPool) {
    let app = build_test_app(pool);
    let line_id = create_line(&app, "Pack Line 1").await;

    let order = create_work_order(&app, "WO-1001", line_id).await;
    let order_id = order["id"].as_i64().unwrap();

    let body = expect_json(
        post_json(
            &app,
            &format!("/api/v1/work-orders/{order_id}/declare"),
            json!({ "quantity": 10.0 }),
        )
        .await,
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(body["code"], "INVALID_STATE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_positive_and_oversized_quantities_are_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let line_id = create_line(&app, "Pack Line 1").await;

    let order = create_work_order(&app, "WO-1001", line_id).await;
    let order_id = order["id"].as_i64().unwrap();
    expect_json(start(&app, order_id, line_id).await, StatusCode::OK).await;

    for quantity in [0.0, -5.0, 100_001.0] {
        let body = expect_json(
            post_json(
                &app,
                &format!("/api/v1/work-orders/{order_id}/declare"),
                json!({ "quantity": quantity }),
            )
            .await,
            StatusCode::BAD_REQUEST,
        )
        .await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    // The rejected declarations left no trace.
    let current = expect_json(
        get(&app, &format!("/api/v1/work-orders/{order_id}")).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(current["data"]["actual_quantity"], serde_json::Value::Null);
}

// ---------------------------------------------------------------------------
// Test: cancellation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn cancel_closes_the_order_and_is_not_repeatable(pool: PgPool) {
    let app = build_test_app(pool);
    let line_id = create_line(&app, "Pack Line 1").await;

    let order = create_work_order(&app, "WO-1001", line_id).await;
    let order_id = order["id"].as_i64().unwrap();

    let body = expect_json(
        post_json(
            &app,
            &format!("/api/v1/work-orders/{order_id}/cancel"),
            json!({}),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(body["data"]["status"], "cancelled");
    assert!(!body["data"]["actual_end_time"].is_null());

    let body = expect_json(
        post_json(
            &app,
            &format!("/api/v1/work-orders/{order_id}/cancel"),
            json!({}),
        )
        .await,
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(body["code"], "INVALID_STATE");
}

// ---------------------------------------------------------------------------
// Test: creation validation and missing references
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_bad_input_and_unknown_lines(pool: PgPool) {
    let app = build_test_app(pool);
    let line_id = create_line(&app, "Pack Line 1").await;

    // Non-positive planned quantity.
    let body = expect_json(
        post_json(
            &app,
            "/api/v1/work-orders",
            json!({
                "work_order_number": "WO-1001",
                "item_number": "PK-500",
                "item_name": "House Blend 500g",
                "production_line_id": line_id,
                "planned_quantity": 0.0,
                "planned_start_time": "2026-08-28T06:00:00Z",
            }),
        )
        .await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Unknown production line.
    let body = expect_json(
        post_json(
            &app,
            "/api/v1/work-orders",
            json!({
                "work_order_number": "WO-1001",
                "item_number": "PK-500",
                "item_name": "House Blend 500g",
                "production_line_id": 999_999,
                "planned_quantity": 100.0,
                "planned_start_time": "2026-08-28T06:00:00Z",
            }),
        )
        .await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(body["code"], "NOT_FOUND");

    // Duplicate work order number.
    create_work_order(&app, "WO-1001", line_id).await;
    let body = expect_json(
        post_json(
            &app,
            "/api/v1/work-orders",
            json!({
                "work_order_number": "WO-1001",
                "item_number": "PK-500",
                "item_name": "House Blend 500g",
                "production_line_id": line_id,
                "planned_quantity": 100.0,
                "planned_start_time": "2026-08-28T06:00:00Z",
            }),
        )
        .await,
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(body["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Test: unknown work order id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_work_order_returns_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/api/v1/work-orders/999999").await;
    let body = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: item list rejects unknown sort columns
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn item_list_rejects_unknown_sort_column(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/api/v1/items?sort=evil_column").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
