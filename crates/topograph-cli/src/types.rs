//! Command types shared between main and library

use clap::ValueEnum;

/// Where reported CIs go
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Keep in memory and print a summary
    Memory,
    /// JSON Lines, to `--output` or stdout
    Jsonl,
    /// Upsert into Neo4j
    Neo4j,
}
