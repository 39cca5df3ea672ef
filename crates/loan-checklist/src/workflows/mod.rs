pub mod checklist;
pub mod mismo;
