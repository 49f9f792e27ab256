//! topograph-core: Deduplicating topology engine for CMDB discovery
//!
//! Raw records supplied by discovery collaborators (database rows, SOAP
//! responses, SNMP walks, shell output) are folded into one consistent
//! entity graph per discovery run, turned into a graph of Configuration
//! Items, and streamed to a sink in bounded batches.
//!
//! # Stages
//!
//! - **identity** - natural keys and the deduplication index
//! - **model** - devices, ports, VLANs, modules, configs, connectivity
//! - **roles** - alias / channel / VLAN capabilities attached to ports
//! - **context** - per-run entity store fed by raw record batches
//! - **topology** - CI graph assembly and layer-2 connection synthesis
//! - **reporter** - batched, exactly-once emission to a [`CiSink`]
//! - **store** - Neo4j persistence of the CI graph

pub mod context;
pub mod error;
pub mod identity;
pub mod model;
pub mod pipeline;
pub mod reporter;
pub mod roles;
pub mod store;
pub mod topology;

// Re-export commonly used types
pub use context::{DiscoveryContext, IngestSummary, PortLookup};
pub use error::{ConfigurationError, DataQualityIssue, SinkError, TopologyError};
pub use model::RawBatch;
pub use pipeline::{BatchOutcome, DiscoveryRun, RunSummary};
pub use reporter::{CiSink, IncrementalReporter, JsonLinesSink, MemorySink, ReporterConfig};
pub use store::{Neo4jClient, Neo4jConfig};
pub use topology::{BuildOptions, CiEdge, CiGraph, CiKind, CiNode, EdgeKind, TopologyBuilder};
