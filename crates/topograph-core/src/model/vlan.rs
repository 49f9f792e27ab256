//! VLANs, scoped to the device that declares them

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{PortRef, Scalar};
use crate::error::ConfigurationError;
use crate::identity::{merge_text, merge_value, Merge};

/// An 802.1Q VLAN tag in the range 1..=4094
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VlanTag(u16);

impl VlanTag {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 4094;

    /// # Errors
    /// Returns [`ConfigurationError::InvalidVlanTag`] outside 1..=4094.
    pub fn new(tag: u16) -> Result<Self, ConfigurationError> {
        if (Self::MIN..=Self::MAX).contains(&tag) {
            Ok(Self(tag))
        } else {
            Err(ConfigurationError::InvalidVlanTag(tag.to_string()))
        }
    }

    /// Parse a tag from its textual or numeric raw form
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidVlanTag`] when the value is not
    /// an integer in 1..=4094.
    pub fn parse(raw: &Scalar) -> Result<Self, ConfigurationError> {
        let text = raw.to_text();
        let tag: u16 = text
            .trim()
            .parse()
            .map_err(|_| ConfigurationError::InvalidVlanTag(text.clone()))?;
        Self::new(tag).map_err(|_| ConfigurationError::InvalidVlanTag(text))
    }

    #[must_use]
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for VlanTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a VLAN: owning device key plus tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VlanRef {
    pub device: String,
    pub tag: VlanTag,
}

/// Attributes of a VLAN that may be refined by later observations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VlanAttributes {
    pub name: Option<String>,
    pub status: Option<String>,
    pub mtu: Option<u32>,
}

impl Merge for VlanAttributes {
    fn merge(&mut self, incoming: Self) -> bool {
        let mut changed = merge_text(&mut self.name, incoming.name);
        changed |= merge_text(&mut self.status, incoming.status);
        changed |= merge_value(&mut self.mtu, incoming.mtu);
        changed
    }
}

/// A VLAN declared on one device
#[derive(Debug, Clone)]
pub struct Vlan {
    pub device: String,
    pub tag: VlanTag,
    pub attributes: VlanAttributes,
    /// Member ports, by reference
    pub members: BTreeSet<PortRef>,
}

impl Vlan {
    #[must_use]
    pub fn new(device: impl Into<String>, tag: VlanTag) -> Self {
        Self {
            device: device.into(),
            tag,
            attributes: VlanAttributes::default(),
            members: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn reference(&self) -> VlanRef {
        VlanRef {
            device: self.device.clone(),
            tag: self.tag,
        }
    }
}
