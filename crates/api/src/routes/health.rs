//! Liveness probe for load balancers and the dashboard status badge.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use floorpulse_db::repositories::AiEventRepo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the event store answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Rows in the event store; `null` when the store is unreachable.
    pub events_stored: Option<i64>,
}

/// GET /health
///
/// Counting events doubles as the database round-trip, so an unreachable
/// store shows up as `db_healthy: false` rather than an error status.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let events_stored = match AiEventRepo::count(&state.pool).await {
        Ok(count) => Some(count),
        Err(err) => {
            tracing::warn!(error = %err, "Event store unreachable during health check");
            None
        }
    };
    let db_healthy = events_stored.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        events_stored,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
