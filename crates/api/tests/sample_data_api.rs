//! Integration tests for sample data generation.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_empty, post_json, post_raw};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn generates_full_batch(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/sample-data", json!({ "seed": 7 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Sample data generated");
    assert_eq!(json["events_created"], 576);

    let metrics = body_json(get(app, "/api/v1/metrics").await).await;
    assert_eq!(metrics["factory"]["total_events"], 576);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn regenerating_replaces_existing_events(pool: PgPool) {
    let app = common::build_test_app(pool);

    post_json(
        app.clone(),
        "/api/v1/events",
        json!({
            "timestamp": "2020-01-01T00:00:00Z",
            "worker_id": "W1",
            "workstation_id": "S1",
            "event_type": "idle",
        }),
    )
    .await;
    post_json(app.clone(), "/api/v1/sample-data", json!({ "seed": 1 })).await;

    let json = body_json(post_json(app.clone(), "/api/v1/sample-data", json!({ "seed": 2 })).await).await;
    assert_eq!(json["events_deleted"], 576);
    assert_eq!(json["events_created"], 576);

    let metrics = body_json(get(app, "/api/v1/metrics").await).await;
    assert_eq!(metrics["factory"]["total_events"], 576);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn body_is_optional(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_empty(app, "/api/v1/sample-data").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["events_created"], 576);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_body_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_raw(app, "/api/v1/sample-data", "{\"seed\": \"abc\"}").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
