//! Model module: Discovered entities and the raw records they come from
//!
//! Entities are attribute bags with a stable identity. They reference each
//! other by key ([`PortRef`], [`VlanRef`]), never by pointer, so the
//! alias/channel graphs between ports cannot form ownership cycles.

mod address;
mod connectivity;
mod device;
mod hardware;
mod port;
mod raw;
mod vlan;

pub use address::{parse_ip, parse_optional_ip, MacAddress};
pub use connectivity::{Connectivity, Endpoint, LinkToken};
pub use device::{Device, DeviceAttributes};
pub use hardware::{Config, Module, ModuleAttributes};
pub use port::{Port, PortAttributes, PortIndex, PortRef};
pub use raw::{
    RawAlias, RawBatch, RawChannel, RawConfig, RawConnectivity, RawDevice, RawModule, RawPort,
    RawVlan, Scalar,
};
pub use vlan::{Vlan, VlanAttributes, VlanRef, VlanTag};

/// Kind of discovered entity, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Device,
    Port,
    Vlan,
    Module,
    Config,
    Connectivity,
    Alias,
    Channel,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Device => "device",
            Self::Port => "port",
            Self::Vlan => "vlan",
            Self::Module => "module",
            Self::Config => "config",
            Self::Connectivity => "connectivity",
            Self::Alias => "alias",
            Self::Channel => "channel",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests;
