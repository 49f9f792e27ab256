//! Natural keys used to recognise entities across batches

use std::net::IpAddr;

use crate::model::MacAddress;

/// An externally sourced identifier for an entity
///
/// Address keys hold parsed values, so differently formatted spellings of
/// one address compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NaturalKey {
    SourceId(String),
    Mac(MacAddress),
    Ip(IpAddr),
    Composite(Vec<String>),
}

impl NaturalKey {
    /// Source id key from a raw value; blank values give no key
    #[must_use]
    pub fn source_id(raw: Option<&str>) -> Option<Self> {
        super::non_blank(raw).map(|id| Self::SourceId(id.to_string()))
    }

    #[must_use]
    pub fn composite<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Composite(parts.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceId(id) => write!(f, "id:{id}"),
            Self::Mac(mac) => write!(f, "mac:{}", mac.key()),
            Self::Ip(ip) => write!(f, "ip:{ip}"),
            Self::Composite(parts) => write!(f, "composite:{}", parts.join("|")),
        }
    }
}
