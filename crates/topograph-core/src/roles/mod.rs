//! Roles module: Capabilities attached to ports
//!
//! A port is not subclassed into alias/channel/VLAN kinds. It carries a
//! [`RoleSet`] holding at most one [`Role`] per [`RoleKind`], and the
//! topology builder branches on the kinds present.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DataQualityIssue;
use crate::model::{PortRef, VlanRef, VlanTag};

/// Kind of role a port can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    Alias,
    Channel,
    Vlan,
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Alias => "alias",
            Self::Channel => "channel",
            Self::Vlan => "vlan",
        };
        write!(f, "{s}")
    }
}

/// The port is a logical sub-interface of `parent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasPortRole {
    pub parent: PortRef,
}

/// The port aggregates `members`, in the order they were reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortChannelRole {
    members: Vec<PortRef>,
}

impl PortChannelRole {
    #[must_use]
    pub fn new(members: impl IntoIterator<Item = PortRef>) -> Self {
        let mut role = Self::default();
        for member in members {
            role.add_member(member);
        }
        role
    }

    /// Add a member; returns false if it was already aggregated
    pub fn add_member(&mut self, member: PortRef) -> bool {
        if self.members.contains(&member) {
            return false;
        }
        self.members.push(member);
        true
    }

    #[must_use]
    pub fn members(&self) -> &[PortRef] {
        &self.members
    }
}

/// The port carries the VLANs in `vlans`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VlanPortRole {
    vlans: BTreeMap<VlanTag, VlanRef>,
}

impl VlanPortRole {
    #[must_use]
    pub fn new(vlans: impl IntoIterator<Item = VlanRef>) -> Self {
        let mut role = Self::default();
        for vlan in vlans {
            role.add_vlan(vlan);
        }
        role
    }

    /// Add a VLAN; returns false if the tag was already present
    pub fn add_vlan(&mut self, vlan: VlanRef) -> bool {
        if self.vlans.contains_key(&vlan.tag) {
            return false;
        }
        self.vlans.insert(vlan.tag, vlan);
        true
    }

    pub fn vlans(&self) -> impl Iterator<Item = &VlanRef> {
        self.vlans.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vlans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vlans.is_empty()
    }
}

/// A role attached to a port
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Alias(AliasPortRole),
    Channel(PortChannelRole),
    Vlan(VlanPortRole),
}

impl Role {
    #[must_use]
    pub fn kind(&self) -> RoleKind {
        match self {
            Self::Alias(_) => RoleKind::Alias,
            Self::Channel(_) => RoleKind::Channel,
            Self::Vlan(_) => RoleKind::Vlan,
        }
    }
}

/// Mutually exclusive classification of a port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortCategory {
    Regular,
    Alias,
    Channel,
}

/// Errors raised when attaching roles
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    #[error("a {0} role is already attached")]
    AlreadyAttached(RoleKind),

    #[error("a {requested} role conflicts with the attached {existing} role")]
    Conflict {
        existing: RoleKind,
        requested: RoleKind,
    },
}

impl RoleError {
    /// Attach the port the error occurred on
    #[must_use]
    pub fn into_issue(self, port: impl Into<String>) -> DataQualityIssue {
        match self {
            Self::AlreadyAttached(kind) => DataQualityIssue::DuplicateRole {
                port: port.into(),
                kind,
            },
            Self::Conflict {
                existing,
                requested,
            } => DataQualityIssue::RoleConflict {
                port: port.into(),
                existing,
                requested,
            },
        }
    }
}

/// The roles carried by one port
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: BTreeMap<RoleKind, Role>,
}

impl RoleSet {
    /// Attach a role
    ///
    /// # Errors
    /// Returns [`RoleError::AlreadyAttached`] if a role of the same kind is
    /// present, or [`RoleError::Conflict`] when attaching alias to a channel
    /// port or channel to an alias port. The set is left untouched on error.
    pub fn add(&mut self, role: Role) -> Result<(), RoleError> {
        let kind = role.kind();
        if self.roles.contains_key(&kind) {
            return Err(RoleError::AlreadyAttached(kind));
        }

        let exclusive = match kind {
            RoleKind::Alias => Some(RoleKind::Channel),
            RoleKind::Channel => Some(RoleKind::Alias),
            RoleKind::Vlan => None,
        };
        if let Some(existing) = exclusive.filter(|other| self.roles.contains_key(other)) {
            return Err(RoleError::Conflict {
                existing,
                requested: kind,
            });
        }

        self.roles.insert(kind, role);
        Ok(())
    }

    #[must_use]
    pub fn has(&self, kind: RoleKind) -> bool {
        self.roles.contains_key(&kind)
    }

    #[must_use]
    pub fn get(&self, kind: RoleKind) -> Option<&Role> {
        self.roles.get(&kind)
    }

    #[must_use]
    pub fn alias(&self) -> Option<&AliasPortRole> {
        match self.roles.get(&RoleKind::Alias) {
            Some(Role::Alias(role)) => Some(role),
            _ => None,
        }
    }

    #[must_use]
    pub fn channel(&self) -> Option<&PortChannelRole> {
        match self.roles.get(&RoleKind::Channel) {
            Some(Role::Channel(role)) => Some(role),
            _ => None,
        }
    }

    #[must_use]
    pub fn vlans(&self) -> Option<&VlanPortRole> {
        match self.roles.get(&RoleKind::Vlan) {
            Some(Role::Vlan(role)) => Some(role),
            _ => None,
        }
    }

    pub(crate) fn channel_mut(&mut self) -> Option<&mut PortChannelRole> {
        match self.roles.get_mut(&RoleKind::Channel) {
            Some(Role::Channel(role)) => Some(role),
            _ => None,
        }
    }

    pub(crate) fn vlans_mut(&mut self) -> Option<&mut VlanPortRole> {
        match self.roles.get_mut(&RoleKind::Vlan) {
            Some(Role::Vlan(role)) => Some(role),
            _ => None,
        }
    }

    /// Classify the port from the roles present
    #[must_use]
    pub fn category(&self) -> PortCategory {
        if self.has(RoleKind::Alias) {
            PortCategory::Alias
        } else if self.has(RoleKind::Channel) {
            PortCategory::Channel
        } else {
            PortCategory::Regular
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = RoleKind> + '_ {
        self.roles.keys().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests;
