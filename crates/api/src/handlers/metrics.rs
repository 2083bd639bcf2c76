//! Handler for the aggregated activity metrics.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use floorpulse_core::metrics::{compute_dashboard, EventFilter};
use floorpulse_db::repositories::{AiEventRepo, WorkerRepo, WorkstationRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/metrics
///
/// Reads both registries and the event set, then returns
/// `{ factory, workers, workstations }`. `?worker_id=` and
/// `?workstation_id=` restrict the events that feed the aggregation.
pub async fn get_metrics(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> AppResult<impl IntoResponse> {
    let (workers, stations, events) = tokio::try_join!(
        WorkerRepo::list_all(&state.pool),
        WorkstationRepo::list_all(&state.pool),
        AiEventRepo::list_all(&state.pool),
    )?;

    let metrics = compute_dashboard(&workers, &stations, &events, &filter);

    tracing::debug!(
        workers = workers.len(),
        workstations = stations.len(),
        events = metrics.factory.total_events,
        "Computed dashboard metrics",
    );

    Ok(Json(metrics))
}
