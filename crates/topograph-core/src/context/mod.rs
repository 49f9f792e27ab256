//! Context module: The entity store of one discovery run
//!
//! A [`DiscoveryContext`] owns every device (and through them every port,
//! VLAN, module and config) observed during a run, the identity indexes
//! used to deduplicate them, and the neighbour observations awaiting
//! topology synthesis. It lives exactly as long as the run.

mod ingest;
mod quality;

use std::collections::{BTreeMap, BTreeSet};

pub use ingest::{IngestSummary, Observation};
pub use quality::QualityLog;

use crate::error::DataQualityIssue;
use crate::identity::{non_blank, IdentityIndex, NaturalKey};
use crate::model::{
    Connectivity, Device, EntityKind, Endpoint, LinkToken, Port, PortRef, RawAlias, RawChannel,
    RawVlan,
};

/// What a source port id resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortLookup {
    Found(PortRef),
    Unknown,
    /// The id names a port on more than one device
    Ambiguous(Vec<PortRef>),
}

/// A role or membership record waiting for ports that have not been seen yet
#[derive(Debug, Clone)]
enum Deferred {
    Alias(RawAlias),
    Channel(RawChannel),
    Vlan(RawVlan),
}

/// Per-run store of deduplicated entities
#[derive(Debug, Default)]
pub struct DiscoveryContext {
    devices: BTreeMap<String, Device>,
    device_index: IdentityIndex<String>,
    port_index: IdentityIndex<PortRef>,
    /// Ports carrying each source port id, across devices
    port_ids: BTreeMap<String, BTreeSet<PortRef>>,
    connectivity: BTreeSet<Connectivity>,
    pending: Vec<Deferred>,
    quality: QualityLog,
}

impl DiscoveryContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    #[must_use]
    pub fn device(&self, key: &str) -> Option<&Device> {
        self.devices.get(key)
    }

    /// Device key a source device id resolves to
    #[must_use]
    pub fn device_key(&self, source_id: &str) -> Option<&str> {
        self.device_index
            .resolve(&NaturalKey::SourceId(source_id.trim().to_string()))
            .map(String::as_str)
    }

    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn port(&self, port: &PortRef) -> Option<&Port> {
        self.devices.get(&port.device)?.port(&port.port)
    }

    pub(crate) fn port_mut(&mut self, port: &PortRef) -> Option<&mut Port> {
        self.devices.get_mut(&port.device)?.port_mut(&port.port)
    }

    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.devices.values().flat_map(|d| d.ports.values())
    }

    #[must_use]
    pub fn port_count(&self) -> usize {
        self.devices.values().map(|d| d.ports.len()).sum()
    }

    /// Port with this source id on the device with this key
    #[must_use]
    pub fn port_on(&self, device_key: &str, source_id: &str) -> Option<PortRef> {
        let key = NaturalKey::composite([device_key, source_id.trim()]);
        self.port_index.resolve(&key).cloned()
    }

    /// Resolve a source port id that arrives without its device
    ///
    /// A port on `scope` wins. Otherwise the id must name a port on exactly
    /// one device.
    #[must_use]
    pub fn lookup_port(&self, source_id: &str, scope: Option<&str>) -> PortLookup {
        let id = source_id.trim();
        if let Some(port) = scope.and_then(|device| self.port_on(device, id)) {
            return PortLookup::Found(port);
        }

        let Some(ports) = self.port_ids.get(id) else {
            return PortLookup::Unknown;
        };
        if ports.len() > 1 {
            return PortLookup::Ambiguous(ports.iter().cloned().collect());
        }
        ports
            .iter()
            .next()
            .cloned()
            .map_or(PortLookup::Unknown, PortLookup::Found)
    }

    /// Resolve a neighbour endpoint to a port owned by the named device
    #[must_use]
    pub fn resolve_endpoint(&self, endpoint: &Endpoint) -> Option<PortRef> {
        let device = self.device_key(&endpoint.device_id)?;
        self.port_on(device, &endpoint.port_id)
    }

    pub fn connectivity(&self) -> impl Iterator<Item = &Connectivity> {
        self.connectivity.iter()
    }

    /// Number of distinct links the observations describe
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.connectivity
            .iter()
            .filter_map(Connectivity::token)
            .collect::<BTreeSet<LinkToken>>()
            .len()
    }

    #[must_use]
    pub fn quality(&self) -> &QualityLog {
        &self.quality
    }

    /// Records still waiting for ports
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Retry deferred records against the ports known now
    ///
    /// Returns the number of records that no longer wait for anything.
    pub fn settle(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let mut resolved = 0;

        for item in pending {
            let result = match item {
                Deferred::Alias(raw) => self.observe_alias(raw),
                Deferred::Channel(raw) => self.observe_channel(raw),
                Deferred::Vlan(raw) => self.observe_vlan(raw),
            };
            match result {
                Ok(Observation::Deferred) => {}
                Ok(_) => resolved += 1,
                Err(err) => self.quality.record(err),
            }
        }

        resolved
    }

    /// One issue per port id that deferred records still wait for
    #[must_use]
    pub fn unresolved_issues(&self) -> Vec<DataQualityIssue> {
        let mut missing: BTreeSet<(String, EntityKind)> = BTreeSet::new();

        for item in &self.pending {
            let (context, ids): (EntityKind, Vec<&str>) = match item {
                Deferred::Alias(raw) => (
                    EntityKind::Alias,
                    [raw.child_port_id.as_deref(), raw.parent_port_id.as_deref()]
                        .into_iter()
                        .flatten()
                        .collect(),
                ),
                Deferred::Channel(raw) => (
                    EntityKind::Channel,
                    raw.channel_port_id
                        .as_deref()
                        .into_iter()
                        .chain(raw.member_port_ids.iter().map(String::as_str))
                        .collect(),
                ),
                Deferred::Vlan(raw) => (
                    EntityKind::Vlan,
                    raw.member_port_ids.iter().map(String::as_str).collect(),
                ),
            };

            for id in ids.into_iter().filter_map(|id| non_blank(Some(id))) {
                if self.lookup_port(id, None) == PortLookup::Unknown {
                    missing.insert((id.to_string(), context));
                }
            }
        }

        missing
            .into_iter()
            .map(|(port, context)| DataQualityIssue::UnresolvedPort { port, context })
            .collect()
    }
}

#[cfg(test)]
mod tests;
