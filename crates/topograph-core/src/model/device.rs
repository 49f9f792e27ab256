//! Devices: network elements owning ports, VLANs, modules and a config

use std::collections::BTreeMap;
use std::net::IpAddr;

use super::{Config, Module, Port, Vlan, VlanTag};
use crate::identity::{merge_text, merge_value, Merge};

/// Attributes of a device that may be refined by later observations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceAttributes {
    pub name: Option<String>,
    pub device_type: Option<String>,
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub version: Option<String>,
    pub memory_bytes: Option<u64>,
    pub ip_address: Option<IpAddr>,
}

impl Merge for DeviceAttributes {
    fn merge(&mut self, incoming: Self) -> bool {
        let mut changed = merge_text(&mut self.name, incoming.name);
        changed |= merge_text(&mut self.device_type, incoming.device_type);
        changed |= merge_text(&mut self.vendor, incoming.vendor);
        changed |= merge_text(&mut self.model, incoming.model);
        changed |= merge_text(&mut self.serial, incoming.serial);
        changed |= merge_text(&mut self.version, incoming.version);
        // Zero memory is what several sources report when they do not know
        changed |= merge_value(&mut self.memory_bytes, incoming.memory_bytes.filter(|m| *m > 0));
        changed |= merge_value(&mut self.ip_address, incoming.ip_address);
        changed
    }
}

/// A discovered network element
#[derive(Debug, Clone)]
pub struct Device {
    /// Stable key for the run: the source id, or `ip:<address>` when the
    /// first observation carried only an address
    pub key: String,
    pub source_id: Option<String>,
    pub attributes: DeviceAttributes,
    pub ports: BTreeMap<String, Port>,
    pub vlans: BTreeMap<VlanTag, Vlan>,
    pub modules: BTreeMap<String, Module>,
    pub config: Option<Config>,
    /// Set once a device record itself was seen, not only its dependents
    pub observed: bool,
}

impl Device {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source_id: None,
            attributes: DeviceAttributes::default(),
            ports: BTreeMap::new(),
            vlans: BTreeMap::new(),
            modules: BTreeMap::new(),
            config: None,
            observed: false,
        }
    }

    /// Created for a port, module, config or VLAN before its device record
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        !self.observed
    }

    #[must_use]
    pub fn port(&self, key: &str) -> Option<&Port> {
        self.ports.get(key)
    }

    pub fn port_mut(&mut self, key: &str) -> Option<&mut Port> {
        self.ports.get_mut(key)
    }

    /// Get the port with this key, creating an empty one if needed
    pub fn port_entry(&mut self, key: &str) -> &mut Port {
        let device = self.key.clone();
        self.ports
            .entry(key.to_string())
            .or_insert_with(|| Port::new(device, key))
    }

    /// Get the VLAN with this tag, creating an empty one if needed
    pub fn vlan_entry(&mut self, tag: VlanTag) -> &mut Vlan {
        let device = self.key.clone();
        self.vlans
            .entry(tag)
            .or_insert_with(|| Vlan::new(device, tag))
    }

    /// Module occupying the slot a port reports, if any
    #[must_use]
    pub fn module_for(&self, port: &Port) -> Option<&Module> {
        port.attributes
            .slot
            .as_deref()
            .and_then(|slot| self.modules.get(slot.trim()))
    }
}
