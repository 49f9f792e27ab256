//! Applying raw records to the discovery context

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::{Deferred, DiscoveryContext, PortLookup};
use crate::error::{DataQualityIssue, RecordError};
use crate::identity::{non_blank, Merge, NaturalKey};
use crate::model::{
    parse_optional_ip, Config, Connectivity, Device, DeviceAttributes, Endpoint, EntityKind,
    MacAddress, Module, ModuleAttributes, PortAttributes, PortRef, RawAlias, RawBatch,
    RawChannel, RawConfig, RawConnectivity, RawDevice, RawModule, RawPort, RawVlan, VlanAttributes,
    VlanRef, VlanTag,
};
use crate::roles::{AliasPortRole, PortChannelRole, Role, VlanPortRole};

/// What applying one record did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// A new entity (or link observation) was registered
    Created,
    /// An existing entity gained or refined attributes
    Merged,
    /// The record added nothing new
    Unchanged,
    /// The record waits for ports that have not been seen yet
    Deferred,
}

impl Observation {
    fn from_flags(created: bool, changed: bool) -> Self {
        match (created, changed) {
            (true, _) => Self::Created,
            (false, true) => Self::Merged,
            (false, false) => Self::Unchanged,
        }
    }
}

/// Counts for one ingested batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub records: usize,
    pub created: usize,
    pub merged: usize,
    pub unchanged: usize,
    pub deferred: usize,
    pub skipped: usize,
    pub rejected: usize,
    /// Records deferred earlier that the batch made resolvable
    pub resolved_later: usize,
}

impl IngestSummary {
    fn tally(&mut self, result: &Result<Observation, RecordError>) {
        match result {
            Ok(Observation::Created) => self.created += 1,
            Ok(Observation::Merged) => self.merged += 1,
            Ok(Observation::Unchanged) => self.unchanged += 1,
            Ok(Observation::Deferred) => self.deferred += 1,
            Err(RecordError::DataQuality(_)) => self.skipped += 1,
            Err(RecordError::Configuration(_)) => self.rejected += 1,
        }
    }
}

fn owned(raw: Option<&str>) -> Option<String> {
    non_blank(raw).map(str::to_string)
}

impl DiscoveryContext {
    /// Apply a batch of raw records, then retry deferred records
    ///
    /// Record-level problems are logged and counted; they never abort the
    /// batch. Devices are applied first and connectivity last, but the
    /// result does not depend on the order records arrive in across batches.
    pub fn ingest(&mut self, batch: RawBatch) -> IngestSummary {
        let mut summary = IngestSummary {
            records: batch.record_count(),
            ..IngestSummary::default()
        };

        for raw in batch.devices {
            let result = self.observe_device(raw);
            self.apply(&mut summary, result);
        }
        for raw in batch.modules {
            let result = self.observe_module(raw);
            self.apply(&mut summary, result);
        }
        for raw in batch.configs {
            let result = self.observe_config(raw);
            self.apply(&mut summary, result);
        }
        for raw in batch.ports {
            let result = self.observe_port(raw);
            self.apply(&mut summary, result);
        }
        summary.resolved_later = self.settle();

        for raw in batch.aliases {
            let result = self.observe_alias(raw);
            self.apply(&mut summary, result);
        }
        for raw in batch.channels {
            let result = self.observe_channel(raw);
            self.apply(&mut summary, result);
        }
        for raw in batch.vlans {
            let result = self.observe_vlan(raw);
            self.apply(&mut summary, result);
        }
        for raw in batch.connectivity {
            let result = self.observe_connectivity(raw);
            self.apply(&mut summary, result);
        }

        info!(
            "Ingested {} records: {} created, {} merged, {} deferred, {} skipped, {} rejected",
            summary.records,
            summary.created,
            summary.merged,
            summary.deferred,
            summary.skipped,
            summary.rejected
        );
        summary
    }

    fn apply(&mut self, summary: &mut IngestSummary, result: Result<Observation, RecordError>) {
        summary.tally(&result);
        if let Err(err) = result {
            self.quality.record(err);
        }
    }

    /// Resolve a device by source id, creating a placeholder if unseen
    ///
    /// Ports and other dependents may arrive before their device; the
    /// placeholder is filled in when the device record shows up.
    fn ensure_device(&mut self, source_id: &str) -> String {
        let keys = [NaturalKey::SourceId(source_id.to_string())];
        let key = self
            .device_index
            .resolve_or_register(&keys, || source_id.to_string())
            .map_or_else(|| source_id.to_string(), |r| r.into_handle());

        self.devices.entry(key.clone()).or_insert_with(|| {
            debug!("Placeholder device {} created", key);
            let mut device = Device::new(key.clone());
            device.source_id = Some(source_id.to_string());
            device
        });
        key
    }

    /// Apply a device record
    ///
    /// # Errors
    /// Returns a data-quality error when the record has neither id nor IP,
    /// or a configuration error for a malformed IP.
    pub fn observe_device(&mut self, raw: RawDevice) -> Result<Observation, RecordError> {
        let ip = parse_optional_ip(raw.ip_address.as_deref())?;
        let source_id = owned(raw.id.as_deref());

        let Some(fallback) = source_id
            .clone()
            .or_else(|| ip.map(|ip| format!("ip:{ip}")))
        else {
            return Err(DataQualityIssue::MissingNaturalKey {
                entity: EntityKind::Device,
            }
            .into());
        };

        let keys: Vec<NaturalKey> = source_id
            .iter()
            .map(|id| NaturalKey::SourceId(id.clone()))
            .chain(ip.map(NaturalKey::Ip))
            .collect();

        let resolution = self
            .device_index
            .resolve_or_register(&keys, || fallback)
            .ok_or(DataQualityIssue::MissingNaturalKey {
                entity: EntityKind::Device,
            })?;
        let created = resolution.is_created();
        let key = resolution.into_handle();

        let device = self
            .devices
            .entry(key.clone())
            .or_insert_with(|| Device::new(key.clone()));
        if device.source_id.is_none() {
            device.source_id = source_id;
        }
        device.observed = true;

        let changed = device.attributes.merge(DeviceAttributes {
            name: raw.name,
            device_type: raw.device_type,
            vendor: raw.vendor,
            model: raw.model,
            serial: raw.serial,
            version: raw.version,
            memory_bytes: raw.memory_bytes,
            ip_address: ip,
        });

        debug!("Device {} observed (created: {}, changed: {})", key, created, changed);
        Ok(Observation::from_flags(created, changed))
    }

    /// Apply a port record
    ///
    /// # Errors
    /// Returns a data-quality error when the record names no device or has
    /// neither id nor MAC, or a configuration error for a malformed MAC.
    pub fn observe_port(&mut self, raw: RawPort) -> Result<Observation, RecordError> {
        let missing_key = || DataQualityIssue::MissingNaturalKey {
            entity: EntityKind::Port,
        };

        let device_id = owned(raw.device_id.as_deref()).ok_or_else(missing_key)?;
        let mac = MacAddress::parse_optional(raw.mac_address.as_deref())?;
        let source_id = owned(raw.id.as_deref());
        if source_id.is_none() && mac.is_none() {
            return Err(missing_key().into());
        }

        let device_key = self.ensure_device(&device_id);

        // Port ids are only unique within a device. MACs are shared by
        // sub-interfaces, so they key a port only when the source gives no id.
        let port_key = match (&source_id, mac) {
            (Some(id), _) => id.clone(),
            (None, Some(mac)) => format!("mac:{}", mac.key()),
            (None, None) => return Err(missing_key().into()),
        };

        let keys = [NaturalKey::composite([device_key.clone(), port_key.clone()])];
        let candidate = PortRef::new(device_key, port_key);
        let resolution = self
            .port_index
            .resolve_or_register(&keys, || candidate)
            .ok_or_else(missing_key)?;
        let created = resolution.is_created();
        let port_ref = resolution.into_handle();

        if let Some(id) = &source_id {
            self.port_ids
                .entry(id.clone())
                .or_default()
                .insert(port_ref.clone());
        }

        let device = self
            .devices
            .entry(port_ref.device.clone())
            .or_insert_with(|| Device::new(port_ref.device.clone()));
        let port = device.port_entry(&port_ref.port);
        if port.source_id.is_none() {
            port.source_id = source_id;
        }

        let changed = port.absorb(PortAttributes {
            name: raw.name,
            mac,
            port_type: raw.port_type,
            state: raw.state,
            status: raw.status,
            slot: raw.slot_number.map(|s| s.to_text()),
            physical_location: raw.physical_location,
        });

        debug!("Port {} observed (created: {}, changed: {})", port_ref, created, changed);
        Ok(Observation::from_flags(created, changed))
    }

    /// Apply an alias-of record
    ///
    /// # Errors
    /// Returns a data-quality error when an id is missing or the child
    /// already carries a different alias or a channel role.
    pub fn observe_alias(&mut self, raw: RawAlias) -> Result<Observation, RecordError> {
        let (Some(child_id), Some(parent_id)) = (
            owned(raw.child_port_id.as_deref()),
            owned(raw.parent_port_id.as_deref()),
        ) else {
            return Err(DataQualityIssue::MissingNaturalKey {
                entity: EntityKind::Alias,
            }
            .into());
        };

        // The parent is looked up on the child's device first
        let Some(child) = self.find_port(&child_id, None, EntityKind::Alias)? else {
            self.pending.push(Deferred::Alias(raw));
            return Ok(Observation::Deferred);
        };
        let Some(parent) = self.find_port(&parent_id, Some(&child.device), EntityKind::Alias)?
        else {
            self.pending.push(Deferred::Alias(raw));
            return Ok(Observation::Deferred);
        };

        let port = self.port_mut(&child).ok_or(DataQualityIssue::UnresolvedPort {
            port: child_id,
            context: EntityKind::Alias,
        })?;

        if port.roles().alias().is_some_and(|role| role.parent == parent) {
            return Ok(Observation::Unchanged);
        }

        port.add_role(Role::Alias(AliasPortRole { parent }))
            .map_err(|e| e.into_issue(child.to_string()))?;
        Ok(Observation::Merged)
    }

    /// Apply a channel-of record
    ///
    /// Members not yet seen are deferred; members already known are added to
    /// the channel role, which is created on first use.
    ///
    /// # Errors
    /// Returns a data-quality error when the channel id is missing or
    /// ambiguous, or the port already carries an alias role.
    pub fn observe_channel(&mut self, raw: RawChannel) -> Result<Observation, RecordError> {
        let Some(channel_id) = owned(raw.channel_port_id.as_deref()) else {
            return Err(DataQualityIssue::MissingNaturalKey {
                entity: EntityKind::Channel,
            }
            .into());
        };

        let Some(channel) = self.find_port(&channel_id, None, EntityKind::Channel)? else {
            self.pending.push(Deferred::Channel(raw));
            return Ok(Observation::Deferred);
        };

        let (resolved, unresolved) =
            self.partition_ports(&raw.member_port_ids, Some(&channel.device), EntityKind::Channel);

        let port = self.port_mut(&channel).ok_or(DataQualityIssue::UnresolvedPort {
            port: channel_id.clone(),
            context: EntityKind::Channel,
        })?;

        let changed = match port.roles_mut().channel_mut() {
            Some(role) => resolved
                .into_iter()
                .fold(false, |changed, member| role.add_member(member) | changed),
            None => {
                port.add_role(Role::Channel(PortChannelRole::new(resolved)))
                    .map_err(|e| e.into_issue(channel.to_string()))?;
                true
            }
        };

        if !unresolved.is_empty() {
            self.pending.push(Deferred::Channel(RawChannel {
                channel_port_id: Some(channel_id),
                member_port_ids: unresolved,
            }));
            return Ok(Observation::Deferred);
        }

        Ok(Observation::from_flags(false, changed))
    }

    /// Apply a VLAN record
    ///
    /// The VLAN is scoped to `device_id` when the record names one, and
    /// otherwise to the device of each member port.
    ///
    /// # Errors
    /// Returns a configuration error for a malformed tag, or a data-quality
    /// error when neither a device nor any member port is named.
    pub fn observe_vlan(&mut self, raw: RawVlan) -> Result<Observation, RecordError> {
        let tag_raw = raw
            .vlan_tag
            .as_ref()
            .ok_or(DataQualityIssue::MissingNaturalKey {
                entity: EntityKind::Vlan,
            })?;
        let tag = VlanTag::parse(tag_raw)?;

        let scope = owned(raw.device_id.as_deref()).map(|id| self.ensure_device(&id));
        let (resolved, unresolved) =
            self.partition_ports(&raw.member_port_ids, scope.as_deref(), EntityKind::Vlan);

        if scope.is_none() && resolved.is_empty() && unresolved.is_empty() {
            return Err(DataQualityIssue::MissingNaturalKey {
                entity: EntityKind::Vlan,
            }
            .into());
        }

        let mut groups: BTreeMap<String, Vec<PortRef>> = BTreeMap::new();
        if let Some(device) = &scope {
            groups.entry(device.clone()).or_default().extend(resolved);
        } else {
            for member in resolved {
                groups.entry(member.device.clone()).or_default().push(member);
            }
        }

        let attributes = VlanAttributes {
            name: raw.name.clone(),
            status: raw.status.clone(),
            mtu: raw.mtu,
        };

        let mut created = false;
        let mut changed = false;
        for (device_key, members) in groups {
            let vlan_ref = {
                let device = self
                    .devices
                    .entry(device_key.clone())
                    .or_insert_with(|| Device::new(device_key.clone()));
                created |= !device.vlans.contains_key(&tag);
                let vlan = device.vlan_entry(tag);
                changed |= vlan.attributes.merge(attributes.clone());
                for member in &members {
                    changed |= vlan.members.insert(member.clone());
                }
                vlan.reference()
            };

            for member in members {
                changed |= self.attach_vlan(&member, vlan_ref.clone())?;
            }
        }

        if !unresolved.is_empty() {
            self.pending.push(Deferred::Vlan(RawVlan {
                member_port_ids: unresolved,
                ..raw
            }));
            return Ok(Observation::Deferred);
        }

        Ok(Observation::from_flags(created, changed))
    }

    fn attach_vlan(&mut self, member: &PortRef, vlan: VlanRef) -> Result<bool, RecordError> {
        let port = self
            .port_mut(member)
            .ok_or_else(|| DataQualityIssue::UnresolvedPort {
                port: member.to_string(),
                context: EntityKind::Vlan,
            })?;

        if let Some(role) = port.roles_mut().vlans_mut() {
            return Ok(role.add_vlan(vlan));
        }

        port.add_role(Role::Vlan(VlanPortRole::new([vlan])))
            .map_err(|e| e.into_issue(member.to_string()))?;
        Ok(true)
    }

    /// Apply a module record
    ///
    /// # Errors
    /// Returns a data-quality error when the device id or slot is missing.
    pub fn observe_module(&mut self, raw: RawModule) -> Result<Observation, RecordError> {
        let slot = raw.slot.as_ref().map(|s| s.to_text());
        let (Some(device_id), Some(slot)) = (owned(raw.device_id.as_deref()), owned(slot.as_deref()))
        else {
            return Err(DataQualityIssue::MissingNaturalKey {
                entity: EntityKind::Module,
            }
            .into());
        };

        let device_key = self.ensure_device(&device_id);
        let device = self
            .devices
            .entry(device_key.clone())
            .or_insert_with(|| Device::new(device_key.clone()));

        let created = !device.modules.contains_key(&slot);
        let module = device
            .modules
            .entry(slot.clone())
            .or_insert_with(|| Module::new(device_key.clone(), slot));
        let changed = module.attributes.merge(ModuleAttributes {
            model: raw.model,
            serial: raw.serial,
            firmware: raw.firmware,
        });

        Ok(Observation::from_flags(created, changed))
    }

    /// Apply a configuration document record
    ///
    /// An older document than the one already held is ignored.
    ///
    /// # Errors
    /// Returns a data-quality error when the device id is missing.
    pub fn observe_config(&mut self, raw: RawConfig) -> Result<Observation, RecordError> {
        let Some(device_id) = owned(raw.device_id.as_deref()) else {
            return Err(DataQualityIssue::MissingNaturalKey {
                entity: EntityKind::Config,
            }
            .into());
        };
        let Some(content) = raw.content.filter(|c| !c.trim().is_empty()) else {
            return Ok(Observation::Unchanged);
        };

        let device_key = self.ensure_device(&device_id);
        let device = self
            .devices
            .entry(device_key.clone())
            .or_insert_with(|| Device::new(device_key.clone()));

        let incoming = Config {
            content,
            last_modified: raw.last_modified,
        };

        let outcome = match &device.config {
            None => Observation::Created,
            Some(current) if *current == incoming => Observation::Unchanged,
            Some(current) if incoming.supersedes(current) => Observation::Merged,
            Some(_) => {
                debug!("Ignoring older config for device {}", device_key);
                Observation::Unchanged
            }
        };

        if outcome != Observation::Unchanged {
            device.config = Some(incoming);
        }
        Ok(outcome)
    }

    /// Record a neighbour observation
    ///
    /// # Errors
    /// Returns a data-quality error when the local endpoint is incomplete or
    /// the record names neither a complete neighbour nor a segment.
    pub fn observe_connectivity(
        &mut self,
        raw: RawConnectivity,
    ) -> Result<Observation, RecordError> {
        let (Some(device_id), Some(port_id)) = (
            owned(raw.device_id.as_deref()),
            owned(raw.port_id.as_deref()),
        ) else {
            return Err(DataQualityIssue::MissingNaturalKey {
                entity: EntityKind::Connectivity,
            }
            .into());
        };

        let remote = match (
            owned(raw.remote_device_id.as_deref()),
            owned(raw.remote_port_id.as_deref()),
        ) {
            (Some(device), Some(port)) => Some(Endpoint::new(device, port)),
            _ => None,
        };
        let segment = owned(raw.segment_id.as_deref());

        if remote.is_none() && segment.is_none() {
            return Err(DataQualityIssue::IncompleteConnectivity {
                device: device_id,
                port: port_id,
            }
            .into());
        }

        let observation = Connectivity {
            local: Endpoint::new(device_id, port_id),
            remote,
            segment,
        };

        if self.connectivity.insert(observation) {
            Ok(Observation::Created)
        } else {
            Ok(Observation::Unchanged)
        }
    }

    /// Resolve a device-less port id; `None` while the port is unseen
    fn find_port(
        &self,
        id: &str,
        scope: Option<&str>,
        context: EntityKind,
    ) -> Result<Option<PortRef>, DataQualityIssue> {
        match self.lookup_port(id, scope) {
            PortLookup::Found(port) => Ok(Some(port)),
            PortLookup::Unknown => Ok(None),
            PortLookup::Ambiguous(ports) => Err(ambiguous(id, context, &ports)),
        }
    }

    /// Split source port ids into known references and ids not seen yet
    ///
    /// Ambiguous ids are dropped and logged as data-quality issues.
    fn partition_ports(
        &mut self,
        ids: &[String],
        scope: Option<&str>,
        context: EntityKind,
    ) -> (Vec<PortRef>, Vec<String>) {
        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();

        for id in ids {
            let Some(id) = non_blank(Some(id)) else {
                continue;
            };
            match self.lookup_port(id, scope) {
                PortLookup::Found(port) => resolved.push(port),
                PortLookup::Unknown => unresolved.push(id.to_string()),
                PortLookup::Ambiguous(ports) => {
                    self.quality.record_issue(ambiguous(id, context, &ports));
                }
            }
        }

        (resolved, unresolved)
    }
}

fn ambiguous(id: &str, context: EntityKind, ports: &[PortRef]) -> DataQualityIssue {
    DataQualityIssue::AmbiguousPort {
        port: id.to_string(),
        context,
        devices: ports.iter().map(|p| p.device.clone()).collect(),
    }
}
