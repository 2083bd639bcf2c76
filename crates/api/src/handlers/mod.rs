pub mod events;
pub mod metrics;
pub mod registry;
pub mod sample_data;
