//! Errors specific to chunked bulk operations.

/// A chunked bulk operation stopped part-way through.
///
/// `completed` is the number of rows the earlier chunks already affected;
/// those changes are committed and are not rolled back.
#[derive(Debug, thiserror::Error)]
#[error("bulk {operation} failed after {completed} rows: {source}")]
pub struct BulkOpError {
    pub operation: &'static str,
    pub completed: u64,
    #[source]
    pub source: sqlx::Error,
}
