//! Raw records as delivered by discovery collaborators
//!
//! Field names follow the collaborators' camelCase JSON. Every field is
//! optional at this layer; the discovery context decides what is usable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A value some sources send as a string and others as a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(i64),
    Text(String),
}

impl Scalar {
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDevice {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub version: Option<String>,
    pub memory_bytes: Option<u64>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPort {
    pub id: Option<String>,
    pub device_id: Option<String>,
    pub mac_address: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub port_type: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
    pub slot_number: Option<Scalar>,
    pub physical_location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawConnectivity {
    pub device_id: Option<String>,
    pub port_id: Option<String>,
    pub remote_device_id: Option<String>,
    pub remote_port_id: Option<String>,
    pub segment_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawVlan {
    pub vlan_tag: Option<Scalar>,
    pub device_id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub mtu: Option<u32>,
    pub member_port_ids: Vec<String>,
}

/// `child_port_id` is a logical sub-interface of `parent_port_id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAlias {
    pub child_port_id: Option<String>,
    pub parent_port_id: Option<String>,
}

/// `channel_port_id` aggregates `member_port_ids`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawChannel {
    pub channel_port_id: Option<String>,
    pub member_port_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawModule {
    pub device_id: Option<String>,
    pub slot: Option<Scalar>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub firmware: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawConfig {
    pub device_id: Option<String>,
    pub content: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// One batch of raw records from a collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBatch {
    pub devices: Vec<RawDevice>,
    pub ports: Vec<RawPort>,
    pub connectivity: Vec<RawConnectivity>,
    pub vlans: Vec<RawVlan>,
    pub aliases: Vec<RawAlias>,
    pub channels: Vec<RawChannel>,
    pub modules: Vec<RawModule>,
    pub configs: Vec<RawConfig>,
}

impl RawBatch {
    /// Total number of records in the batch
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.devices.len()
            + self.ports.len()
            + self.connectivity.len()
            + self.vlans.len()
            + self.aliases.len()
            + self.channels.len()
            + self.modules.len()
            + self.configs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}
