//! Ports, their physical index, and the key used to reference them

use serde::{Deserialize, Serialize};

use super::MacAddress;
use crate::identity::{merge_text, merge_value, Merge};
use crate::roles::{PortCategory, Role, RoleError, RoleKind, RoleSet};

/// Reference to a port by owning device key and port key
///
/// Roles hold these instead of pointers; the port is looked up in the
/// discovery context when it is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortRef {
    pub device: String,
    pub port: String,
}

impl PortRef {
    #[must_use]
    pub fn new(device: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            port: port.into(),
        }
    }
}

impl std::fmt::Display for PortRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.device, self.port)
    }
}

/// Board and port numbers derived from a physical location string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortIndex {
    pub board: u32,
    pub port: u32,
}

impl PortIndex {
    /// Derive the index from a location such as `"2/14"`, `"Gi1/0/24"` or
    /// `"Slot 3 Port 7"`, falling back to the slot number when the location
    /// only carries the port number.
    #[must_use]
    pub fn derive(location: Option<&str>, slot: Option<&str>) -> Option<Self> {
        let numbers = location.map(numeric_groups).unwrap_or_default();
        match numbers.as_slice() {
            [] => None,
            [port] => slot
                .and_then(|s| s.trim().parse().ok())
                .map(|board| Self { board, port: *port }),
            [board, .., port] => Some(Self {
                board: *board,
                port: *port,
            }),
        }
    }
}

fn numeric_groups(text: &str) -> Vec<u32> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|group| !group.is_empty())
        .filter_map(|group| group.parse().ok())
        .collect()
}

/// Attributes of a port that may be refined by later observations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortAttributes {
    pub name: Option<String>,
    pub mac: Option<MacAddress>,
    pub port_type: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
    pub slot: Option<String>,
    pub physical_location: Option<String>,
}

impl Merge for PortAttributes {
    fn merge(&mut self, incoming: Self) -> bool {
        let mut changed = merge_text(&mut self.name, incoming.name);
        changed |= merge_value(&mut self.mac, incoming.mac);
        changed |= merge_text(&mut self.port_type, incoming.port_type);
        changed |= merge_text(&mut self.state, incoming.state);
        changed |= merge_text(&mut self.status, incoming.status);
        changed |= merge_text(&mut self.slot, incoming.slot);
        changed |= merge_text(&mut self.physical_location, incoming.physical_location);
        changed
    }
}

/// A physical or logical port owned by a device
#[derive(Debug, Clone)]
pub struct Port {
    /// Stable key within the owning device
    pub key: String,
    /// Port id in the source system, when the source supplied one
    pub source_id: Option<String>,
    /// Key of the owning device
    pub device: String,
    pub attributes: PortAttributes,
    index: Option<PortIndex>,
    roles: RoleSet,
}

impl Port {
    #[must_use]
    pub fn new(device: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source_id: None,
            device: device.into(),
            attributes: PortAttributes::default(),
            index: None,
            roles: RoleSet::default(),
        }
    }

    /// Reference to this port
    #[must_use]
    pub fn reference(&self) -> PortRef {
        PortRef::new(self.device.clone(), self.key.clone())
    }

    /// Merge refined attributes and re-derive the board/port index
    pub fn absorb(&mut self, attributes: PortAttributes) -> bool {
        let changed = self.attributes.merge(attributes);
        if changed || self.index.is_none() {
            self.index = PortIndex::derive(
                self.attributes.physical_location.as_deref(),
                self.attributes.slot.as_deref(),
            );
        }
        changed
    }

    /// Board/port index, if the physical location could be parsed
    #[must_use]
    pub fn index(&self) -> Option<PortIndex> {
        self.index
    }

    /// Attach a role; each role kind can be attached once
    ///
    /// # Errors
    /// Returns [`RoleError`] if the kind is already attached or conflicts
    /// with an attached role.
    pub fn add_role(&mut self, role: Role) -> Result<(), RoleError> {
        self.roles.add(role)
    }

    #[must_use]
    pub fn has_role(&self, kind: RoleKind) -> bool {
        self.roles.has(kind)
    }

    #[must_use]
    pub fn role(&self, kind: RoleKind) -> Option<&Role> {
        self.roles.get(kind)
    }

    #[must_use]
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    pub(crate) fn roles_mut(&mut self) -> &mut RoleSet {
        &mut self.roles
    }

    /// Regular, alias or channel; decided by the attached roles
    #[must_use]
    pub fn category(&self) -> PortCategory {
        self.roles.category()
    }
}
