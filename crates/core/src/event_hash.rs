//! Deduplication key for activity events.
//!
//! The key is a plain concatenation of the four identifying fields. Exact
//! duplicates are the only thing it has to catch, so no digest is involved.

use chrono::{SecondsFormat, SubsecRound};

use crate::types::Timestamp;

/// Separator between the hashed fields. Ingestion rejects identifiers
/// containing it, which keeps the key unambiguous.
pub const HASH_FIELD_SEPARATOR: char = '|';

/// Truncate a timestamp to the millisecond precision used for storage and
/// hashing.
pub fn normalize_timestamp(ts: Timestamp) -> Timestamp {
    ts.trunc_subsecs(3)
}

/// Canonical string form of a timestamp: RFC 3339, UTC, three fractional
/// digits, `Z` suffix (e.g. `2024-05-01T08:00:00.000Z`).
pub fn canonical_timestamp(ts: Timestamp) -> String {
    normalize_timestamp(ts).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Compute the deduplication key for an event.
pub fn event_hash(
    timestamp: Timestamp,
    worker_id: &str,
    workstation_id: &str,
    event_type: &str,
) -> String {
    let sep = HASH_FIELD_SEPARATOR;
    format!(
        "{}{sep}{worker_id}{sep}{workstation_id}{sep}{event_type}",
        canonical_timestamp(timestamp)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(s: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn canonical_form_has_millis_and_z_suffix() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        assert_eq!(canonical_timestamp(t), "2024-05-01T08:00:00.000Z");
    }

    #[test]
    fn same_fields_produce_same_hash() {
        let t = ts("2024-05-01T08:00:00Z");
        assert_eq!(
            event_hash(t, "W1", "S1", "working"),
            event_hash(t, "W1", "S1", "working")
        );
    }

    #[test]
    fn equivalent_timestamp_spellings_hash_identically() {
        let a = event_hash(ts("2024-05-01T10:00:00+02:00"), "W1", "S1", "idle");
        let b = event_hash(ts("2024-05-01T08:00:00.000Z"), "W1", "S1", "idle");
        assert_eq!(a, b);
    }

    #[test]
    fn sub_millisecond_noise_is_ignored() {
        let a = event_hash(ts("2024-05-01T08:00:00.123456Z"), "W1", "S1", "idle");
        let b = event_hash(ts("2024-05-01T08:00:00.123Z"), "W1", "S1", "idle");
        assert_eq!(a, b);
    }

    #[test]
    fn any_field_change_changes_hash() {
        let t = ts("2024-05-01T08:00:00Z");
        let base = event_hash(t, "W1", "S1", "working");
        assert_ne!(base, event_hash(ts("2024-05-01T08:05:00Z"), "W1", "S1", "working"));
        assert_ne!(base, event_hash(t, "W2", "S1", "working"));
        assert_ne!(base, event_hash(t, "W1", "S2", "working"));
        assert_ne!(base, event_hash(t, "W1", "S1", "idle"));
    }

    #[test]
    fn hash_layout() {
        let t = ts("2024-05-01T08:00:00Z");
        assert_eq!(
            event_hash(t, "W1", "S1", "working"),
            "2024-05-01T08:00:00.000Z|W1|S1|working"
        );
    }
}
