//! Worker registry model.

use floorpulse_core::metrics::WorkerRecord;
use floorpulse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `workers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Worker {
    pub id: DbId,
    pub worker_id: String,
    pub name: String,
    pub created_at: Timestamp,
}

impl WorkerRecord for Worker {
    fn worker_id(&self) -> &str {
        &self.worker_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
