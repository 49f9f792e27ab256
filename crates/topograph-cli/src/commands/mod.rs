//! CLI commands

pub mod ingest;
pub mod stats;
