//! Handlers for the worker and workstation registries.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use floorpulse_db::repositories::{WorkerRepo, WorkstationRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/workers
pub async fn list_workers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workers = WorkerRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: workers }))
}

/// GET /api/v1/workstations
pub async fn list_workstations(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stations = WorkstationRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: stations }))
}
