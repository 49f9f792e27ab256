//! Neighbour observations between ports

use serde::{Deserialize, Serialize};

/// One side of a neighbour observation, as the source names it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Endpoint {
    pub device_id: String,
    pub port_id: String,
}

impl Endpoint {
    #[must_use]
    pub fn new(device_id: impl Into<String>, port_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            port_id: port_id.into(),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.device_id, self.port_id)
    }
}

/// Undirected identity of the link an observation describes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkToken {
    /// Point-to-point link, endpoints in sorted order
    Pair(Endpoint, Endpoint),
    /// Shared medium named by the source
    Segment(String),
}

/// "Port `local` reports neighbour `remote`" (and/or membership of a segment)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Connectivity {
    pub local: Endpoint,
    pub remote: Option<Endpoint>,
    pub segment: Option<String>,
}

impl Connectivity {
    /// Undirected token: reciprocal observations of one link share it
    #[must_use]
    pub fn token(&self) -> Option<LinkToken> {
        if let Some(segment) = &self.segment {
            return Some(LinkToken::Segment(segment.clone()));
        }
        self.remote.as_ref().map(|remote| {
            if self.local <= *remote {
                LinkToken::Pair(self.local.clone(), remote.clone())
            } else {
                LinkToken::Pair(remote.clone(), self.local.clone())
            }
        })
    }
}
