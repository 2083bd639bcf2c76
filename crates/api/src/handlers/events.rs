//! Handlers for event ingestion, listing and clearing.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use floorpulse_core::ingest::IngestEventRequest;
use floorpulse_db::models::ai_event::{EventListParams, InsertOutcome};
use floorpulse_db::repositories::AiEventRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::{DataResponse, IngestResponse};
use crate::state::AppState;

/// Response body for `DELETE /events`.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: &'static str,
    pub events_deleted: u64,
}

/// POST /api/v1/events
///
/// Validate and store one event. Idempotent on the event hash:
/// - `201` with the new id when stored,
/// - `200` with the existing id when an identical event is already stored,
/// - `400` when required fields are missing or malformed.
pub async fn ingest_event(
    State(state): State<AppState>,
    payload: Result<Json<IngestEventRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = payload?;
    let event = request.into_new_event()?;

    let response = match AiEventRepo::insert(&state.pool, &event).await? {
        InsertOutcome::Created(id) => {
            tracing::info!(
                id,
                worker_id = %event.worker_id,
                workstation_id = %event.workstation_id,
                event_type = %event.event_type,
                "Event ingested",
            );
            (
                StatusCode::CREATED,
                Json(IngestResponse {
                    message: "Event ingested",
                    id,
                }),
            )
        }
        InsertOutcome::Duplicate(id) => {
            tracing::info!(id, event_hash = %event.event_hash, "Duplicate event ignored");
            (
                StatusCode::OK,
                Json(IngestResponse {
                    message: "Duplicate event ignored",
                    id,
                }),
            )
        }
    };

    Ok(response)
}

/// GET /api/v1/events
///
/// Recent events, newest first. Supports `worker_id`, `workstation_id`,
/// `limit` (default 50, max 500) and `offset`.
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let events = AiEventRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: events }))
}

/// DELETE /api/v1/events
///
/// Remove every stored event.
pub async fn clear_events(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let deleted = AiEventRepo::delete_all(&state.pool).await?;

    tracing::info!(deleted, "All events cleared");

    Ok(Json(ClearResponse {
        message: "All events cleared",
        events_deleted: deleted,
    }))
}
