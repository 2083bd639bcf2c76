//! Handler for synthetic sample data generation.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use floorpulse_core::sample::generate_sample_events;
use floorpulse_db::repositories::AiEventRepo;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Optional request body for `POST /sample-data`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateSampleRequest {
    /// Seed for a reproducible batch. Omit for a random one.
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct GenerateSampleResponse {
    pub message: &'static str,
    pub events_deleted: u64,
    pub events_created: u64,
}

/// POST /api/v1/sample-data
///
/// Clear all events, then store a fresh eight-hour sample batch.
pub async fn generate_sample_data(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let request: GenerateSampleRequest = if body.iter().all(u8::is_ascii_whitespace) {
        GenerateSampleRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?
    };

    let now = chrono::Utc::now();
    let events = match request.seed {
        Some(seed) => generate_sample_events(&mut StdRng::seed_from_u64(seed), now),
        None => generate_sample_events(&mut rand::rng(), now),
    };

    let deleted = AiEventRepo::delete_all(&state.pool).await?;
    let created = AiEventRepo::insert_batch(&state.pool, &events).await?;

    tracing::info!(
        deleted,
        created,
        seed = ?request.seed,
        "Sample data generated",
    );

    Ok(Json(GenerateSampleResponse {
        message: "Sample data generated",
        events_deleted: deleted,
        events_created: created,
    }))
}
