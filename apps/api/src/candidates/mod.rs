//! Candidate store access and profile ingestion.

pub mod handlers;
pub mod store;
