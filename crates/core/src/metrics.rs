//! Activity metrics aggregation.
//!
//! Reduces the raw event stream plus the worker/workstation registries into
//! per-worker, per-workstation and factory-wide statistics. Pure and
//! synchronous: inputs are only read, and every division by zero resolves
//! to `0`.
//!
//! Inputs are accessed through the [`WorkerRecord`], [`WorkstationRecord`]
//! and [`EventRecord`] traits so database rows can be aggregated in place.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::activity::{
    EVENT_DURATION_MINUTES, EVENT_TYPE_ABSENT, EVENT_TYPE_IDLE, EVENT_TYPE_PRODUCT_COUNT,
    EVENT_TYPE_WORKING,
};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Input traits
// ---------------------------------------------------------------------------

/// Read access to a worker registry entry.
pub trait WorkerRecord {
    fn worker_id(&self) -> &str;
    fn name(&self) -> &str;
}

/// Read access to a workstation registry entry.
pub trait WorkstationRecord {
    fn station_id(&self) -> &str;
    fn name(&self) -> &str;
    fn station_type(&self) -> Option<&str>;
}

/// Read access to a stored classification event.
pub trait EventRecord {
    fn timestamp(&self) -> Timestamp;
    fn worker_id(&self) -> &str;
    fn workstation_id(&self) -> &str;
    fn event_type(&self) -> &str;
    fn confidence(&self) -> f64;
    fn count(&self) -> i32;
}

impl<T: EventRecord + ?Sized> EventRecord for &T {
    fn timestamp(&self) -> Timestamp {
        (**self).timestamp()
    }
    fn worker_id(&self) -> &str {
        (**self).worker_id()
    }
    fn workstation_id(&self) -> &str {
        (**self).workstation_id()
    }
    fn event_type(&self) -> &str {
        (**self).event_type()
    }
    fn confidence(&self) -> f64 {
        (**self).confidence()
    }
    fn count(&self) -> i32 {
        (**self).count()
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Time accounting shared by worker and workstation metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub total_active_minutes: i64,
    pub total_idle_minutes: i64,
    pub utilization_percentage: i64,
    pub total_units_produced: i64,
    pub units_per_hour: f64,
    /// Type of the most recent event, `"absent"` when there are none.
    pub last_event_type: String,
    pub last_seen: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerMetrics {
    pub worker_id: String,
    pub name: String,
    #[serde(flatten)]
    pub activity: ActivitySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkstationMetrics {
    pub station_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub station_type: Option<String>,
    #[serde(flatten)]
    pub activity: ActivitySummary,
    /// Distinct workers observed at this station.
    pub unique_workers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactoryMetrics {
    pub total_workers: usize,
    pub active_workers: usize,
    pub total_workstations: usize,
    pub active_workstations: usize,
    pub overall_utilization: i64,
    pub total_units_produced: i64,
    pub total_events: usize,
    /// Mean event confidence as a whole percentage.
    pub avg_confidence: i64,
}

/// Everything the dashboard needs from one aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub factory: FactoryMetrics,
    pub workers: Vec<WorkerMetrics>,
    pub workstations: Vec<WorkstationMetrics>,
}

// ---------------------------------------------------------------------------
// Event filter
// ---------------------------------------------------------------------------

/// Optional restriction of the event set before aggregation.
///
/// Only events are filtered; registries always come through whole, so
/// entities outside the filter report zeroed metrics. Empty strings are
/// treated as "no filter".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    pub worker_id: Option<String>,
    pub workstation_id: Option<String>,
}

impl EventFilter {
    pub fn worker(&self) -> Option<&str> {
        self.worker_id.as_deref().filter(|s| !s.is_empty())
    }

    pub fn workstation(&self) -> Option<&str> {
        self.workstation_id.as_deref().filter(|s| !s.is_empty())
    }

    pub fn matches<E: EventRecord>(&self, event: &E) -> bool {
        self.worker().map_or(true, |w| event.worker_id() == w)
            && self.workstation().map_or(true, |s| event.workstation_id() == s)
    }

    /// Borrow the matching events, preserving input order.
    pub fn apply<'a, E: EventRecord>(&self, events: &'a [E]) -> Vec<&'a E> {
        events.iter().filter(|e| self.matches(*e)).collect()
    }
}

// ---------------------------------------------------------------------------
// Rounding helpers
// ---------------------------------------------------------------------------

/// `round(100 * part / whole)`, or 0 when `whole` is 0.
pub fn percentage(part: i64, whole: i64) -> i64 {
    if whole <= 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round() as i64
}

/// Round half-up to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A non-positive count on a product_count event still records one unit.
fn effective_count(count: i32) -> i64 {
    if count > 0 {
        i64::from(count)
    } else {
        1
    }
}

// ---------------------------------------------------------------------------
// Per-entity tally
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ActivityTally<'a> {
    working: i64,
    idle: i64,
    units: i64,
    last: Option<(Timestamp, &'a str)>,
    workers: HashSet<&'a str>,
}

impl<'a> ActivityTally<'a> {
    fn record<E: EventRecord>(&mut self, event: &'a E) {
        match event.event_type() {
            EVENT_TYPE_WORKING => self.working += 1,
            EVENT_TYPE_IDLE => self.idle += 1,
            EVENT_TYPE_PRODUCT_COUNT => self.units += effective_count(event.count()),
            _ => {}
        }

        // Strictly newer only: on equal timestamps the earlier input wins.
        let ts = event.timestamp();
        if self.last.map_or(true, |(seen, _)| ts > seen) {
            self.last = Some((ts, event.event_type()));
        }

        self.workers.insert(event.worker_id());
    }

    fn summary(&self) -> ActivitySummary {
        let active = self.working * EVENT_DURATION_MINUTES;
        let idle = self.idle * EVENT_DURATION_MINUTES;

        let units_per_hour = if active > 0 {
            round_to_tenth(self.units as f64 / (active as f64 / 60.0))
        } else {
            0.0
        };

        ActivitySummary {
            total_active_minutes: active,
            total_idle_minutes: idle,
            utilization_percentage: percentage(active, active + idle),
            total_units_produced: self.units,
            units_per_hour,
            last_event_type: self
                .last
                .map_or(EVENT_TYPE_ABSENT, |(_, kind)| kind)
                .to_string(),
            last_seen: self.last.map(|(ts, _)| ts),
        }
    }
}

fn tally_by<'a, E, F>(events: &'a [E], key: F) -> HashMap<&'a str, ActivityTally<'a>>
where
    E: EventRecord,
    F: Fn(&'a E) -> &'a str,
{
    let mut tallies: HashMap<&str, ActivityTally<'_>> = HashMap::new();
    for event in events {
        tallies.entry(key(event)).or_default().record(event);
    }
    tallies
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute metrics for every worker in the registry, in registry order.
pub fn compute_worker_metrics<W, E>(workers: &[W], events: &[E]) -> Vec<WorkerMetrics>
where
    W: WorkerRecord,
    E: EventRecord,
{
    let tallies = tally_by(events, |e| e.worker_id());
    let empty = ActivityTally::default();

    workers
        .iter()
        .map(|worker| {
            let tally = tallies.get(worker.worker_id()).unwrap_or(&empty);
            WorkerMetrics {
                worker_id: worker.worker_id().to_string(),
                name: worker.name().to_string(),
                activity: tally.summary(),
            }
        })
        .collect()
}

/// Compute metrics for every workstation in the registry, in registry order.
pub fn compute_workstation_metrics<S, E>(stations: &[S], events: &[E]) -> Vec<WorkstationMetrics>
where
    S: WorkstationRecord,
    E: EventRecord,
{
    let tallies = tally_by(events, |e| e.workstation_id());
    let empty = ActivityTally::default();

    stations
        .iter()
        .map(|station| {
            let tally = tallies.get(station.station_id()).unwrap_or(&empty);
            WorkstationMetrics {
                station_id: station.station_id().to_string(),
                name: station.name().to_string(),
                station_type: station.station_type().map(str::to_string),
                activity: tally.summary(),
                unique_workers: tally.workers.len(),
            }
        })
        .collect()
}

/// Compute factory-wide metrics from the per-entity results.
pub fn compute_factory_metrics<W, S, E>(
    workers: &[W],
    stations: &[S],
    events: &[E],
    worker_metrics: &[WorkerMetrics],
    station_metrics: &[WorkstationMetrics],
) -> FactoryMetrics
where
    W: WorkerRecord,
    S: WorkstationRecord,
    E: EventRecord,
{
    let active_workers = worker_metrics
        .iter()
        .filter(|w| w.activity.last_event_type == EVENT_TYPE_WORKING)
        .count();

    let active_workstations = station_metrics
        .iter()
        .filter(|s| s.activity.utilization_percentage > 0)
        .count();

    let overall_utilization = if worker_metrics.is_empty() {
        0
    } else {
        let total: i64 = worker_metrics
            .iter()
            .map(|w| w.activity.utilization_percentage)
            .sum();
        (total as f64 / worker_metrics.len() as f64).round() as i64
    };

    let total_units_produced = worker_metrics
        .iter()
        .map(|w| w.activity.total_units_produced)
        .sum();

    let avg_confidence = if events.is_empty() {
        0
    } else {
        let sum: f64 = events
            .iter()
            .map(|e| e.confidence())
            .filter(|c| c.is_finite())
            .sum();
        (100.0 * sum / events.len() as f64).round() as i64
    };

    FactoryMetrics {
        total_workers: workers.len(),
        active_workers,
        total_workstations: stations.len(),
        active_workstations,
        overall_utilization,
        total_units_produced,
        total_events: events.len(),
        avg_confidence,
    }
}

/// Run the full aggregation over the (optionally filtered) event set.
pub fn compute_dashboard<W, S, E>(
    workers: &[W],
    stations: &[S],
    events: &[E],
    filter: &EventFilter,
) -> DashboardMetrics
where
    W: WorkerRecord,
    S: WorkstationRecord,
    E: EventRecord,
{
    let events = filter.apply(events);

    let worker_metrics = compute_worker_metrics(workers, &events);
    let station_metrics = compute_workstation_metrics(stations, &events);
    let factory = compute_factory_metrics(
        workers,
        stations,
        &events,
        &worker_metrics,
        &station_metrics,
    );

    DashboardMetrics {
        factory,
        workers: worker_metrics,
        workstations: station_metrics,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
