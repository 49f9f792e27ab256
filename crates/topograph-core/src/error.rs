//! Error taxonomy for discovery runs
//!
//! Three severities exist. [`DataQualityIssue`] is recoverable: the affected
//! entity or edge is skipped and the run continues. [`ConfigurationError`]
//! aborts a single entity. [`SinkError`] is the only condition that ends a
//! run.

use thiserror::Error;

use crate::model::EntityKind;
use crate::roles::RoleKind;

/// Recoverable data problems found while ingesting or building
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataQualityIssue {
    #[error("{entity} record has no usable natural key")]
    MissingNaturalKey { entity: EntityKind },

    #[error("port {port} has no parseable board/port index (location: {location:?})")]
    UnparseablePortIndex {
        port: String,
        location: Option<String>,
    },

    #[error("connectivity endpoint {device}/{port} does not resolve to a discovered port")]
    UnresolvedEndpoint { device: String, port: String },

    #[error("port {port} referenced by {context} record was never discovered")]
    UnresolvedPort { port: String, context: EntityKind },

    #[error("port id {port} in {context} record names ports on several devices: {}", .devices.join(", "))]
    AmbiguousPort {
        port: String,
        context: EntityKind,
        devices: Vec<String>,
    },

    #[error("port {port} already carries a {kind} role")]
    DuplicateRole { port: String, kind: RoleKind },

    #[error("port {port} cannot take a {requested} role while it carries a {existing} role")]
    RoleConflict {
        port: String,
        existing: RoleKind,
        requested: RoleKind,
    },

    #[error("connectivity from {device}/{port} names neither a neighbour nor a segment")]
    IncompleteConnectivity { device: String, port: String },
}

/// Malformed values that make a single entity unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("invalid VLAN tag {0:?}")]
    InvalidVlanTag(String),

    #[error("invalid MAC address {0:?}")]
    InvalidMac(String),

    #[error("invalid IP address {0:?}")]
    InvalidIp(String),
}

/// Failures reported by the sink a run reports into
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Batch rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Neo4j(#[from] crate::store::Neo4jError),
}

/// Why a single raw record could not be applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error(transparent)]
    DataQuality(#[from] DataQualityIssue),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Any error a discovery stage can produce
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("data quality: {0}")]
    DataQuality(#[from] DataQualityIssue),

    #[error("configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("sink: {0}")]
    Sink(#[from] SinkError),
}

impl From<RecordError> for TopologyError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::DataQuality(issue) => Self::DataQuality(issue),
            RecordError::Configuration(err) => Self::Configuration(err),
        }
    }
}

impl TopologyError {
    /// Whether this error must abort the whole run
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Sink(_))
    }
}
