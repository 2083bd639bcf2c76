//! Repository for the `workstations` table.

use sqlx::PgPool;

use crate::models::workstation::Workstation;

/// Column list for `workstations` queries.
const COLUMNS: &str = "id, station_id, name, station_type, created_at";

/// Read access to the workstation registry.
pub struct WorkstationRepo;

impl WorkstationRepo {
    /// List all workstations ordered by their external id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Workstation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workstations ORDER BY station_id");
        sqlx::query_as::<_, Workstation>(&query).fetch_all(pool).await
    }
}
