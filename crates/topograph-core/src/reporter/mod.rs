//! Reporter module: Batched, exactly-once delivery of the CI graph
//!
//! The [`IncrementalReporter`] walks a built [`CiGraph`](crate::topology::CiGraph)
//! and stages every object not yet emitted in this run. Staged objects are
//! delivered to a [`CiSink`] in batches of at most
//! [`ReporterConfig::max_batch_objects`] objects. Each object moves through
//! [`EmitPhase::NotBuilt`] → [`EmitPhase::Built`] → [`EmitPhase::Sent`] once;
//! graphs rebuilt after later input batches never re-send it.

mod config;
mod emitter;
mod jsonl;
mod sink;

pub use config::{ReporterConfig, DEFAULT_MAX_BATCH_OBJECTS};
pub use emitter::{EmitPhase, IncrementalReporter, ReportSummary};
pub use jsonl::JsonLinesSink;
pub use sink::{CiBatch, CiSink, MemorySink};

#[cfg(test)]
mod tests;
