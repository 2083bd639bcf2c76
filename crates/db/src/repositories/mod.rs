//! Repository layer: one stateless struct per table.

pub mod ai_event_repo;
pub mod worker_repo;
pub mod workstation_repo;

pub use ai_event_repo::AiEventRepo;
pub use worker_repo::WorkerRepo;
pub use workstation_repo::WorkstationRepo;
