//! Shared response envelope types for API handlers.
//!
//! Collection endpoints wrap their payload as `{ "data": ... }`. The metrics
//! and mutation endpoints return their documented shapes directly.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ..., "id": ... }` returned by event ingestion.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub message: &'static str,
    pub id: floorpulse_core::types::DbId,
}
