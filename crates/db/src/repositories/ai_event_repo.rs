//! Repository for the `ai_events` table.
//!
//! Deduplication is enforced by the `uq_ai_events_event_hash` constraint:
//! inserts use `ON CONFLICT (event_hash) DO NOTHING` and fall back to looking
//! up the existing row, so there is no check-then-insert window.

use floorpulse_core::ingest::NewEvent;
use floorpulse_core::paging::{clamp_limit, clamp_offset, DEFAULT_EVENT_LIMIT, MAX_EVENT_LIMIT};
use floorpulse_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::BulkOpError;
use crate::models::ai_event::{AiEvent, EventListParams, InsertOutcome};

/// Column list for `ai_events` queries.
const COLUMNS: &str = "id, occurred_at, worker_id, workstation_id, event_type, \
                       confidence, count, event_hash, created_at";

/// Newest first; equal timestamps keep insertion order.
const ORDER: &str = "ORDER BY occurred_at DESC, id ASC";

/// Rows per multi-row insert statement.
pub const INSERT_CHUNK_SIZE: usize = 100;

/// Rows removed per delete statement.
pub const DELETE_CHUNK_SIZE: i64 = 1000;

/// Provides read/write operations for classification events.
pub struct AiEventRepo;

impl AiEventRepo {
    /// Insert an event unless one with the same hash exists.
    ///
    /// If the conflicting row disappears between the insert and the lookup
    /// (a concurrent clear), the insert is retried once.
    pub async fn insert(pool: &PgPool, event: &NewEvent) -> Result<InsertOutcome, sqlx::Error> {
        for _ in 0..2 {
            let inserted: Option<DbId> = sqlx::query_scalar(
                "INSERT INTO ai_events \
                    (occurred_at, worker_id, workstation_id, event_type, confidence, count, event_hash) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) \
                 ON CONFLICT (event_hash) DO NOTHING \
                 RETURNING id",
            )
            .bind(event.timestamp)
            .bind(&event.worker_id)
            .bind(&event.workstation_id)
            .bind(event.event_type.as_str())
            .bind(event.confidence)
            .bind(event.count)
            .bind(&event.event_hash)
            .fetch_optional(pool)
            .await?;

            if let Some(id) = inserted {
                return Ok(InsertOutcome::Created(id));
            }

            if let Some(id) = Self::find_id_by_hash(pool, &event.event_hash).await? {
                return Ok(InsertOutcome::Duplicate(id));
            }
        }

        Err(sqlx::Error::RowNotFound)
    }

    /// Look up the id of the event carrying `event_hash`.
    pub async fn find_id_by_hash(
        pool: &PgPool,
        event_hash: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM ai_events WHERE event_hash = $1")
            .bind(event_hash)
            .fetch_optional(pool)
            .await
    }

    /// Find a single event by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AiEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ai_events WHERE id = $1");
        sqlx::query_as::<_, AiEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load every stored event, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<AiEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ai_events {ORDER}");
        sqlx::query_as::<_, AiEvent>(&query).fetch_all(pool).await
    }

    /// List a page of events, newest first, optionally filtered by worker
    /// and/or workstation.
    pub async fn list(pool: &PgPool, params: &EventListParams) -> Result<Vec<AiEvent>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_EVENT_LIMIT, MAX_EVENT_LIMIT);
        let offset = clamp_offset(params.offset);

        let query = format!(
            "SELECT {COLUMNS} FROM ai_events \
             WHERE ($1::TEXT IS NULL OR worker_id = $1) \
               AND ($2::TEXT IS NULL OR workstation_id = $2) \
             {ORDER} LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, AiEvent>(&query)
            .bind(non_empty(params.worker_id.as_deref()))
            .bind(non_empty(params.workstation_id.as_deref()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of stored events.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM ai_events")
            .fetch_one(pool)
            .await
    }

    /// Insert many events in chunks of [`INSERT_CHUNK_SIZE`].
    ///
    /// Rows whose hash already exists are skipped. Returns the number of
    /// rows stored. On failure the error reports how many rows earlier
    /// chunks stored.
    pub async fn insert_batch(pool: &PgPool, events: &[NewEvent]) -> Result<u64, BulkOpError> {
        let mut inserted = 0u64;

        for (index, chunk) in events.chunks(INSERT_CHUNK_SIZE).enumerate() {
            let rows = Self::insert_chunk(pool, chunk)
                .await
                .map_err(|source| BulkOpError {
                    operation: "insert",
                    completed: inserted,
                    source,
                })?;
            inserted += rows;
            tracing::debug!(chunk = index, rows, total = inserted, "Inserted event chunk");
        }

        Ok(inserted)
    }

    async fn insert_chunk(pool: &PgPool, chunk: &[NewEvent]) -> Result<u64, sqlx::Error> {
        let timestamps: Vec<Timestamp> = chunk.iter().map(|e| e.timestamp).collect();
        let worker_ids: Vec<&str> = chunk.iter().map(|e| e.worker_id.as_str()).collect();
        let station_ids: Vec<&str> = chunk.iter().map(|e| e.workstation_id.as_str()).collect();
        let event_types: Vec<&str> = chunk.iter().map(|e| e.event_type.as_str()).collect();
        let confidences: Vec<f64> = chunk.iter().map(|e| e.confidence).collect();
        let counts: Vec<i32> = chunk.iter().map(|e| e.count).collect();
        let hashes: Vec<&str> = chunk.iter().map(|e| e.event_hash.as_str()).collect();

        let result = sqlx::query(
            "INSERT INTO ai_events \
                (occurred_at, worker_id, workstation_id, event_type, confidence, count, event_hash) \
             SELECT * FROM UNNEST($1::timestamptz[], $2::text[], $3::text[], $4::text[], \
                                  $5::float8[], $6::int4[], $7::text[]) \
             ON CONFLICT (event_hash) DO NOTHING",
        )
        .bind(&timestamps)
        .bind(&worker_ids)
        .bind(&station_ids)
        .bind(&event_types)
        .bind(&confidences)
        .bind(&counts)
        .bind(&hashes)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete every event in chunks of [`DELETE_CHUNK_SIZE`].
    ///
    /// Returns the number of rows removed. On failure the error reports how
    /// many rows earlier chunks removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, BulkOpError> {
        let mut deleted = 0u64;

        loop {
            let result = sqlx::query(
                "DELETE FROM ai_events \
                 WHERE id IN (SELECT id FROM ai_events ORDER BY id LIMIT $1)",
            )
            .bind(DELETE_CHUNK_SIZE)
            .execute(pool)
            .await
            .map_err(|source| BulkOpError {
                operation: "delete",
                completed: deleted,
                source,
            })?;

            let rows = result.rows_affected();
            if rows == 0 {
                break;
            }
            deleted += rows;
            tracing::debug!(rows, total = deleted, "Deleted event chunk");
        }

        Ok(deleted)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
