pub mod ai_event;
pub mod worker;
pub mod workstation;
