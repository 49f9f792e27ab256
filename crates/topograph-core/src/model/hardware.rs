//! Modules (boards) and configuration documents

use chrono::{DateTime, Utc};

use crate::identity::{merge_text, Merge};

/// Attributes of a hardware module
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleAttributes {
    pub model: Option<String>,
    pub serial: Option<String>,
    pub firmware: Option<String>,
}

impl Merge for ModuleAttributes {
    fn merge(&mut self, incoming: Self) -> bool {
        let mut changed = merge_text(&mut self.model, incoming.model);
        changed |= merge_text(&mut self.serial, incoming.serial);
        changed |= merge_text(&mut self.firmware, incoming.firmware);
        changed
    }
}

/// A board occupying a slot of a device
#[derive(Debug, Clone)]
pub struct Module {
    pub device: String,
    pub slot: String,
    pub attributes: ModuleAttributes,
}

impl Module {
    #[must_use]
    pub fn new(device: impl Into<String>, slot: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            slot: slot.into(),
            attributes: ModuleAttributes::default(),
        }
    }
}

/// A device configuration document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub content: String,
    pub last_modified: Option<DateTime<Utc>>,
}

impl Config {
    /// Whether this document should replace `other`
    ///
    /// Dated documents win over undated ones; among dated documents the newer
    /// one wins.
    #[must_use]
    pub fn supersedes(&self, other: &Config) -> bool {
        match (self.last_modified, other.last_modified) {
            (Some(new), Some(old)) => new > old,
            (Some(_), None) | (None, None) => true,
            (None, Some(_)) => false,
        }
    }
}
