//! Integration tests for the dashboard metrics endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;

async fn ingest(app: &axum::Router, ts: &str, worker: &str, station: &str, kind: &str, count: i32) {
    let response = post_json(
        app.clone(),
        "/api/v1/events",
        json!({
            "timestamp": ts,
            "worker_id": worker,
            "workstation_id": station,
            "event_type": kind,
            "confidence": 0.9,
            "count": count,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// W1 at S1: idle, 3 units, then two working intervals.
async fn seed_shift(app: &axum::Router) {
    ingest(app, "2024-05-01T08:00:00Z", "W1", "S1", "idle", 1).await;
    ingest(app, "2024-05-01T08:05:00Z", "W1", "S1", "product_count", 3).await;
    ingest(app, "2024-05-01T08:10:00Z", "W1", "S1", "working", 1).await;
    ingest(app, "2024-05-01T08:15:00Z", "W1", "S1", "working", 1).await;
}

fn find<'a>(list: &'a serde_json::Value, key: &str, id: &str) -> &'a serde_json::Value {
    list.as_array()
        .unwrap()
        .iter()
        .find(|entry| entry[key] == id)
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_store_reports_full_roster_with_zeroes(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let factory = &json["factory"];
    assert_eq!(factory["total_workers"], 6);
    assert_eq!(factory["total_workstations"], 6);
    assert_eq!(factory["active_workers"], 0);
    assert_eq!(factory["total_events"], 0);
    assert_eq!(factory["avg_confidence"], 0);

    let workers = json["workers"].as_array().unwrap();
    assert_eq!(workers.len(), 6);
    assert_eq!(workers[0]["worker_id"], "W1");
    assert_eq!(workers[0]["last_event_type"], "absent");
    assert_eq!(workers[0]["total_active_minutes"], 0);
    assert_eq!(workers[0]["last_seen"], serde_json::Value::Null);

    assert_eq!(json["workstations"].as_array().unwrap().len(), 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn metrics_reflect_ingested_events(pool: PgPool) {
    let app = common::build_test_app(pool);
    seed_shift(&app).await;

    let json = body_json(get(app, "/api/v1/metrics").await).await;

    let w1 = find(&json["workers"], "worker_id", "W1");
    assert_eq!(w1["name"], "Maria Santos");
    assert_eq!(w1["total_active_minutes"], 10);
    assert_eq!(w1["total_idle_minutes"], 5);
    assert_eq!(w1["utilization_percentage"], 67);
    assert_eq!(w1["total_units_produced"], 3);
    assert_eq!(w1["units_per_hour"], 18.0);
    assert_eq!(w1["last_event_type"], "working");

    let s1 = find(&json["workstations"], "station_id", "S1");
    assert_eq!(s1["type"], "assembly");
    assert_eq!(s1["unique_workers"], 1);
    assert_eq!(s1["total_units_produced"], 3);

    let factory = &json["factory"];
    assert_eq!(factory["active_workers"], 1);
    assert_eq!(factory["active_workstations"], 1);
    assert_eq!(factory["overall_utilization"], 11);
    assert_eq!(factory["total_units_produced"], 3);
    assert_eq!(factory["total_events"], 4);
    assert_eq!(factory["avg_confidence"], 90);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filter_restricts_events_but_keeps_roster(pool: PgPool) {
    let app = common::build_test_app(pool);
    seed_shift(&app).await;
    ingest(&app, "2024-05-01T08:00:00Z", "W2", "S2", "working", 1).await;

    let json = body_json(get(app, "/api/v1/metrics?worker_id=W2").await).await;

    assert_eq!(json["factory"]["total_events"], 1);
    assert_eq!(json["workers"].as_array().unwrap().len(), 6);

    let w1 = find(&json["workers"], "worker_id", "W1");
    assert_eq!(w1["total_active_minutes"], 0);
    let w2 = find(&json["workers"], "worker_id", "W2");
    assert_eq!(w2["total_active_minutes"], 5);
    assert_eq!(w2["utilization_percentage"], 100);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_filter_value_is_ignored(pool: PgPool) {
    let app = common::build_test_app(pool);
    seed_shift(&app).await;

    let json = body_json(get(app, "/api/v1/metrics?worker_id=&workstation_id=").await).await;

    assert_eq!(json["factory"]["total_events"], 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn events_from_unregistered_workers_count_only_at_factory_level(pool: PgPool) {
    let app = common::build_test_app(pool);
    ingest(&app, "2024-05-01T08:00:00Z", "W99", "S1", "working", 1).await;

    let json = body_json(get(app, "/api/v1/metrics").await).await;

    assert_eq!(json["factory"]["total_events"], 1);
    assert_eq!(json["workers"].as_array().unwrap().len(), 6);
    assert_eq!(json["factory"]["active_workers"], 0);
    let s1 = find(&json["workstations"], "station_id", "S1");
    assert_eq!(s1["unique_workers"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn registry_endpoints_list_seeded_rows(pool: PgPool) {
    let app = common::build_test_app(pool);

    let workers = body_json(get(app.clone(), "/api/v1/workers").await).await;
    assert_eq!(workers["data"].as_array().unwrap().len(), 6);
    assert_eq!(workers["data"][0]["worker_id"], "W1");

    let stations = body_json(get(app, "/api/v1/workstations").await).await;
    assert_eq!(stations["data"].as_array().unwrap().len(), 6);
    assert_eq!(stations["data"][2]["type"], "inspection");
}
