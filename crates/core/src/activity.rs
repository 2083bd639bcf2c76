//! Activity event type constants, parsing, and validation.
//!
//! The vision system classifies each observation window into one of four
//! event types. They are stored as TEXT (guarded by a CHECK constraint), so
//! the string constants here are the source of truth for both directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Event type constants
// ---------------------------------------------------------------------------

pub const EVENT_TYPE_WORKING: &str = "working";
pub const EVENT_TYPE_IDLE: &str = "idle";
pub const EVENT_TYPE_ABSENT: &str = "absent";
pub const EVENT_TYPE_PRODUCT_COUNT: &str = "product_count";
pub const VALID_EVENT_TYPES: &[&str] = &[
    EVENT_TYPE_WORKING,
    EVENT_TYPE_IDLE,
    EVENT_TYPE_ABSENT,
    EVENT_TYPE_PRODUCT_COUNT,
];

/// Minutes of activity represented by a single classification event.
pub const EVENT_DURATION_MINUTES: i64 = 5;

// ---------------------------------------------------------------------------
// EventType
// ---------------------------------------------------------------------------

/// Classification attached to a single observation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Working,
    Idle,
    Absent,
    ProductCount,
}

impl EventType {
    /// Stored / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Working => EVENT_TYPE_WORKING,
            Self::Idle => EVENT_TYPE_IDLE,
            Self::Absent => EVENT_TYPE_ABSENT,
            Self::ProductCount => EVENT_TYPE_PRODUCT_COUNT,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            EVENT_TYPE_WORKING => Ok(Self::Working),
            EVENT_TYPE_IDLE => Ok(Self::Idle),
            EVENT_TYPE_ABSENT => Ok(Self::Absent),
            EVENT_TYPE_PRODUCT_COUNT => Ok(Self::ProductCount),
            other => Err(CoreError::Validation(format!(
                "Invalid event type '{other}'. Must be one of: {}",
                VALID_EVENT_TYPES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
