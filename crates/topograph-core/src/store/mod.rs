//! Store module: Neo4j persistence of the CI graph
//!
//! [`Neo4jClient`] implements [`CiSink`](crate::reporter::CiSink): each
//! batch is written with one `UNWIND ... MERGE` query per node label and
//! per relationship type, so re-delivering an object updates it in place.

mod neo4j;
mod queries;

pub use neo4j::{Neo4jClient, Neo4jConfig, Neo4jError};
pub use queries::CiStats;

#[cfg(test)]
mod tests;
