//! Synthetic activity data for demos and tests.
//!
//! Produces a fixed-size batch covering the last eight hours at five-minute
//! intervals for the seeded roster. The random source is injected so callers
//! can seed it for reproducible batches.

use chrono::Duration;
use rand::Rng;

use crate::activity::{EventType, EVENT_DURATION_MINUTES};
use crate::ingest::NewEvent;
use crate::types::Timestamp;

/// Number of intervals generated (8 hours of 5-minute windows).
pub const SAMPLE_INTERVALS: i64 = 96;

/// Worker roster used for sample data (matches the seeded registry).
pub const SAMPLE_WORKERS: &[&str] = &["W1", "W2", "W3", "W4", "W5", "W6"];

/// Station roster used for sample data (matches the seeded registry).
pub const SAMPLE_STATIONS: &[&str] = &["S1", "S2", "S3", "S4", "S5", "S6"];

/// Lower bound of generated confidence values.
pub const MIN_SAMPLE_CONFIDENCE: f64 = 0.85;
/// Upper bound of generated confidence values.
pub const MAX_SAMPLE_CONFIDENCE: f64 = 0.99;

/// Largest unit count carried by a generated product_count event.
pub const MAX_SAMPLE_UNITS: i32 = 5;

/// Total events produced by [`generate_sample_events`].
pub fn sample_batch_size() -> usize {
    SAMPLE_INTERVALS as usize * SAMPLE_WORKERS.len()
}

/// Pick an event type: 50% working, 20% idle, 10% absent, 20% product_count.
pub fn weighted_event_type<R: Rng>(rng: &mut R) -> EventType {
    let roll: f64 = rng.random();
    if roll < 0.5 {
        EventType::Working
    } else if roll < 0.7 {
        EventType::Idle
    } else if roll < 0.8 {
        EventType::Absent
    } else {
        EventType::ProductCount
    }
}

/// Uniform confidence in `[0.85, 0.99]`, rounded to two decimals.
fn sample_confidence<R: Rng>(rng: &mut R) -> f64 {
    let spread = MAX_SAMPLE_CONFIDENCE - MIN_SAMPLE_CONFIDENCE;
    let raw = MIN_SAMPLE_CONFIDENCE + rng.random::<f64>() * spread;
    (raw * 100.0).round() / 100.0
}

/// Generate the sample batch ending at `now`, newest interval first.
///
/// Workers map round-robin onto stations.
pub fn generate_sample_events<R: Rng>(rng: &mut R, now: Timestamp) -> Vec<NewEvent> {
    let mut events = Vec::with_capacity(sample_batch_size());

    for interval in 0..SAMPLE_INTERVALS {
        let timestamp = now - Duration::minutes(interval * EVENT_DURATION_MINUTES);

        for (idx, worker_id) in SAMPLE_WORKERS.iter().enumerate() {
            let station_id = SAMPLE_STATIONS[idx % SAMPLE_STATIONS.len()];
            let event_type = weighted_event_type(rng);
            let confidence = sample_confidence(rng);
            let count = match event_type {
                EventType::ProductCount => rng.random_range(1..=MAX_SAMPLE_UNITS),
                _ => 1,
            };

            events.push(NewEvent::new(
                timestamp,
                (*worker_id).to_string(),
                station_id.to_string(),
                event_type,
                confidence,
                count,
            ));
        }
    }

    events
}
