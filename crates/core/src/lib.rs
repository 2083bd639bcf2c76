//! Domain logic for the Floorpulse activity service.
//!
//! Everything in this crate is pure: no database access and no I/O. The
//! `db` and `api` crates build on these types and functions.

pub mod activity;
pub mod error;
pub mod event_hash;
pub mod ingest;
pub mod metrics;
pub mod paging;
pub mod sample;
pub mod types;
