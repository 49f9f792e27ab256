//! Command-line definition

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use topograph_core::reporter::DEFAULT_MAX_BATCH_OBJECTS;
use topograph_core::Neo4jConfig;

use crate::types::SinkKind;

#[derive(Parser)]
#[command(name = "topograph")]
#[command(author, version, about = "Network topology deduplication and CMDB graph building", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest raw discovery batches and report the CI graph
    Ingest(IngestArgs),

    /// Show counts of CIs stored in Neo4j
    Stats(Neo4jArgs),
}

#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    /// JSON files, each holding one batch object or an array of batches
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Sink to report CIs to
    #[arg(long, value_enum, default_value_t = SinkKind::Jsonl)]
    pub sink: SinkKind,

    /// Output file for the jsonl sink (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum CI objects per sink batch
    #[arg(long, default_value_t = DEFAULT_MAX_BATCH_OBJECTS)]
    pub batch_size: usize,

    /// Input files read concurrently
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// Do not report physical ports
    #[arg(long)]
    pub no_physical_ports: bool,

    /// Do not report VLANs
    #[arg(long)]
    pub no_vlans: bool,

    /// Do not synthesize layer-2 connections
    #[arg(long)]
    pub no_layer2: bool,

    #[command(flatten)]
    pub neo4j: Neo4jArgs,
}

#[derive(Args, Debug, Clone)]
pub struct Neo4jArgs {
    /// Neo4j connection URI
    #[arg(long, default_value = "bolt://localhost:7687")]
    pub neo4j_uri: String,

    /// Neo4j username
    #[arg(long, default_value = "neo4j")]
    pub neo4j_user: String,

    /// Neo4j password
    #[arg(long)]
    pub neo4j_password: Option<String>,

    /// Neo4j database name
    #[arg(long)]
    pub neo4j_database: Option<String>,

    /// Maximum pooled Neo4j connections
    #[arg(long)]
    pub neo4j_max_connections: Option<usize>,

    /// Rows fetched per Neo4j round trip
    #[arg(long)]
    pub neo4j_fetch_size: Option<usize>,
}

impl Neo4jArgs {
    /// Connection configuration
    ///
    /// # Errors
    /// Returns an error if no password was given.
    pub fn config(&self) -> Result<Neo4jConfig> {
        let password = self
            .neo4j_password
            .as_deref()
            .context("--neo4j-password is required to use Neo4j")?;

        let mut config = Neo4jConfig::new(&self.neo4j_uri, &self.neo4j_user, password);
        if let Some(database) = &self.neo4j_database {
            config = config.with_database(database);
        }
        if let Some(max) = self.neo4j_max_connections {
            config = config.with_max_connections(max);
        }
        if let Some(rows) = self.neo4j_fetch_size {
            config = config.with_fetch_size(rows);
        }
        Ok(config)
    }
}
