pub mod events;
pub mod health;
pub mod metrics;
pub mod registry;
pub mod sample_data;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /metrics                 dashboard metrics (GET, ?worker_id, ?workstation_id)
///
/// /events                  list (GET), ingest (POST), clear all (DELETE)
///
/// /sample-data             regenerate sample events (POST)
///
/// /workers                 worker registry (GET)
/// /workstations            workstation registry (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/metrics", metrics::router())
        .nest("/events", events::router())
        .nest("/sample-data", sample_data::router())
        .merge(registry::router())
}
