//! Repository for the `workers` table.

use sqlx::PgPool;

use crate::models::worker::Worker;

/// Column list for `workers` queries.
const COLUMNS: &str = "id, worker_id, name, created_at";

/// Read access to the worker registry.
pub struct WorkerRepo;

impl WorkerRepo {
    /// List all workers ordered by their external id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Worker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workers ORDER BY worker_id");
        sqlx::query_as::<_, Worker>(&query).fetch_all(pool).await
    }
}
