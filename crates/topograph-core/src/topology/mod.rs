//! Topology module: CI graph assembly
//!
//! Turns the deduplicated, role-annotated entities of a
//! [`DiscoveryContext`](crate::context::DiscoveryContext) into the
//! externally visible CI graph: devices, interfaces, physical ports, VLAN
//! memberships and layer-2 connections.

mod builder;
mod graph;
mod ids;
mod layer2;

pub use builder::{BuildOptions, BuildOutput, TopologyBuilder};
pub use graph::{CiEdge, CiGraph, CiKind, CiNode, CiObject, EdgeKind};
pub use ids::{
    concentrator_id, config_id, device_id, interface_id, layer2_connection_id, module_id,
    physical_port_id, sha256_hex, vlan_id,
};

#[cfg(test)]
mod tests;
