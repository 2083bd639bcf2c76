//! Classification event model and list parameters.

use floorpulse_core::metrics::EventRecord;
use floorpulse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `ai_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiEvent {
    pub id: DbId,
    #[sqlx(rename = "occurred_at")]
    pub timestamp: Timestamp,
    pub worker_id: String,
    pub workstation_id: String,
    pub event_type: String,
    pub confidence: f64,
    pub count: i32,
    pub event_hash: String,
    pub created_at: Timestamp,
}

impl EventRecord for AiEvent {
    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn worker_id(&self) -> &str {
        &self.worker_id
    }

    fn workstation_id(&self) -> &str {
        &self.workstation_id
    }

    fn event_type(&self) -> &str {
        &self.event_type
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }

    fn count(&self) -> i32 {
        self.count
    }
}

// ---------------------------------------------------------------------------
// Outcomes and parameters
// ---------------------------------------------------------------------------

/// Result of inserting a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was stored.
    Created(DbId),
    /// An event with the same hash already existed; carries its id.
    Duplicate(DbId),
}

impl InsertOutcome {
    pub fn id(self) -> DbId {
        match self {
            Self::Created(id) | Self::Duplicate(id) => id,
        }
    }
}

/// Query parameters for `GET /events`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListParams {
    pub worker_id: Option<String>,
    pub workstation_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
