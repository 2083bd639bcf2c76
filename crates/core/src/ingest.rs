//! Ingestion payload validation and normalization.
//!
//! [`IngestEventRequest`] is the loosely-typed record posted by the vision
//! system. [`IngestEventRequest::into_new_event`] validates it and produces a
//! [`NewEvent`] with defaults applied, the timestamp normalized, and the
//! deduplication hash computed.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::activity::EventType;
use crate::error::CoreError;
use crate::event_hash::{event_hash, normalize_timestamp, HASH_FIELD_SEPARATOR};
use crate::types::Timestamp;

/// Confidence stored when the producer does not report one.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Unit count stored when the producer does not report one (or reports 0).
pub const DEFAULT_COUNT: i32 = 1;

// ---------------------------------------------------------------------------
// Request payload
// ---------------------------------------------------------------------------

/// Raw ingestion payload. Every field is optional at the serde level so that
/// missing fields surface as validation errors rather than decode failures.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct IngestEventRequest {
    #[validate(required(message = "timestamp is required"))]
    pub timestamp: Option<String>,

    #[validate(required(message = "worker_id is required"))]
    pub worker_id: Option<String>,

    #[validate(required(message = "workstation_id is required"))]
    pub workstation_id: Option<String>,

    #[validate(required(message = "event_type is required"))]
    pub event_type: Option<String>,

    /// Accepts a JSON number or a numeric string.
    #[serde(default, deserialize_with = "lenient_f64")]
    #[validate(range(min = 0.0, max = 1.0, message = "confidence must be between 0 and 1"))]
    pub confidence: Option<f64>,

    #[validate(range(min = 0, message = "count must not be negative"))]
    pub count: Option<i32>,
}

impl IngestEventRequest {
    /// Validate the payload and build the normalized event to persist.
    pub fn into_new_event(self) -> Result<NewEvent, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let timestamp = parse_timestamp(self.timestamp.as_deref().unwrap_or_default())?;
        let worker_id = non_blank("worker_id", self.worker_id)?;
        let workstation_id = non_blank("workstation_id", self.workstation_id)?;
        let event_type: EventType = non_blank("event_type", self.event_type)?.parse()?;

        let confidence = self.confidence.unwrap_or(DEFAULT_CONFIDENCE);
        let count = match self.count {
            None | Some(0) => DEFAULT_COUNT,
            Some(n) => n,
        };

        Ok(NewEvent::new(
            timestamp,
            worker_id,
            workstation_id,
            event_type,
            confidence,
            count,
        ))
    }
}

/// Trimmed, non-empty identifier that cannot collide in the hash key.
fn non_blank(field: &str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(v) if v.contains(HASH_FIELD_SEPARATOR) => Err(CoreError::Validation(format!(
            "{field} must not contain '{HASH_FIELD_SEPARATOR}'"
        ))),
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, CoreError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            CoreError::Validation(format!("timestamp '{raw}' is not a valid RFC 3339 date: {e}"))
        })
}

/// Deserialize an optional float that may arrive as a number or a string.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    let value = match Option::<NumberOrString>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(NumberOrString::Number(n)) => n,
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("confidence '{s}' is not a number")))?,
    };

    if !value.is_finite() {
        return Err(D::Error::custom("confidence must be a finite number"));
    }
    Ok(Some(value))
}

// ---------------------------------------------------------------------------
// Normalized event
// ---------------------------------------------------------------------------

/// A validated event ready to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvent {
    pub timestamp: Timestamp,
    pub worker_id: String,
    pub workstation_id: String,
    pub event_type: EventType,
    pub confidence: f64,
    pub count: i32,
    pub event_hash: String,
}

impl NewEvent {
    /// Build an event, truncating the timestamp to millisecond precision and
    /// deriving its hash from the normalized fields.
    pub fn new(
        timestamp: Timestamp,
        worker_id: String,
        workstation_id: String,
        event_type: EventType,
        confidence: f64,
        count: i32,
    ) -> Self {
        let timestamp = normalize_timestamp(timestamp);
        let event_hash = event_hash(timestamp, &worker_id, &workstation_id, event_type.as_str());
        Self {
            timestamp,
            worker_id,
            workstation_id,
            event_type,
            confidence,
            count,
            event_hash,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
