//! Workstation registry model.

use floorpulse_core::metrics::WorkstationRecord;
use floorpulse_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `workstations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workstation {
    pub id: DbId,
    pub station_id: String,
    pub name: String,
    /// Free-form category (assembly, inspection, ...).
    #[serde(rename = "type")]
    pub station_type: Option<String>,
    pub created_at: Timestamp,
}

impl WorkstationRecord for Workstation {
    fn station_id(&self) -> &str {
        &self.station_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn station_type(&self) -> Option<&str> {
        self.station_type.as_deref()
    }
}
