//! Tests for CI graph assembly

#![allow(clippy::unwrap_used)]

use super::{context_from, device, port};
use crate::error::DataQualityIssue;
use crate::model::{
    RawAlias, RawBatch, RawChannel, RawConfig, RawDevice, RawModule, RawPort, RawVlan, Scalar,
};
use crate::topology::{sha256_hex, BuildOptions, CiKind, EdgeKind, TopologyBuilder};

/// One switch with a line card, an alias, a port channel and a VLAN
fn switch_batch() -> RawBatch {
    RawBatch {
        devices: vec![RawDevice {
            name: Some("core-1".to_string()),
            memory_bytes: Some(2048),
            ..device("sw1")
        }],
        modules: vec![RawModule {
            device_id: Some("sw1".to_string()),
            slot: Some(Scalar::Number(1)),
            model: Some("LC-48".to_string()),
            ..RawModule::default()
        }],
        configs: vec![RawConfig {
            device_id: Some("sw1".to_string()),
            content: Some("hostname core-1".to_string()),
            last_modified: None,
        }],
        ports: vec![
            RawPort {
                slot_number: Some(Scalar::Number(1)),
                ..port("p1", "sw1", Some("00:11:22:33:44:55"), Some("1/1"))
            },
            port("p1.10", "sw1", Some("00:11:22:33:44:55"), None),
            port("po1", "sw1", None, None),
            port("p2", "sw1", None, Some("1/2")),
            port("p3", "sw1", None, Some("1/3")),
            port("p4", "sw1", None, None),
        ],
        aliases: vec![RawAlias {
            child_port_id: Some("p1.10".to_string()),
            parent_port_id: Some("p1".to_string()),
        }],
        channels: vec![RawChannel {
            channel_port_id: Some("po1".to_string()),
            member_port_ids: vec!["p2".to_string(), "p3".to_string()],
        }],
        vlans: vec![RawVlan {
            vlan_tag: Some(Scalar::Number(10)),
            device_id: Some("sw1".to_string()),
            name: Some("users".to_string()),
            member_port_ids: vec!["p1.10".to_string(), "po1".to_string(), "p4".to_string()],
            ..RawVlan::default()
        }],
        ..RawBatch::default()
    }
}

#[test]
fn test_device_module_and_config_nodes() {
    let context = context_from(switch_batch());
    let graph = TopologyBuilder::new(&context).build().graph;

    let device = graph.node("device:sw1").unwrap();
    assert_eq!(device.kind, CiKind::Device);
    assert_eq!(device.attr("name"), Some("core-1"));
    assert_eq!(device.attr("memory_bytes"), Some("2048"));

    let module = graph.node("module:sw1:1").unwrap();
    assert_eq!(module.attr("model"), Some("LC-48"));
    assert!(graph.has_edge(EdgeKind::Containment, "device:sw1", "module:sw1:1"));

    let config = graph.node("config:sw1").unwrap();
    assert_eq!(
        config.attr("content_hash"),
        Some(sha256_hex("hostname core-1").as_str())
    );
    assert!(graph.has_edge(EdgeKind::Containment, "device:sw1", "config:sw1"));
}

#[test]
fn test_every_port_gets_an_interface() {
    let context = context_from(switch_batch());
    let graph = TopologyBuilder::new(&context).build().graph;

    assert_eq!(graph.nodes_of_kind(CiKind::Interface).count(), 6);
    assert!(graph.has_edge(EdgeKind::Containment, "device:sw1", "interface:sw1:p4"));
    assert_eq!(
        graph.node("interface:sw1:p1").unwrap().attr("mac_address"),
        Some("00:11:22:33:44:55")
    );
}

#[test]
fn test_regular_ports_get_physical_ports() {
    let context = context_from(switch_batch());
    let graph = TopologyBuilder::new(&context).build().graph;

    let physical: Vec<&str> = graph
        .nodes_of_kind(CiKind::PhysicalPort)
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(physical, vec!["port:sw1:p1", "port:sw1:p2", "port:sw1:p3"]);

    let p1 = graph.node("port:sw1:p1").unwrap();
    assert_eq!(p1.attr("board_index"), Some("1"));
    assert_eq!(p1.attr("port_index"), Some("1"));
    assert!(graph.has_edge(EdgeKind::Realization, "port:sw1:p1", "interface:sw1:p1"));

    // p1 reports slot 1, which holds a module; p2 reports no slot
    assert!(graph.has_edge(EdgeKind::Containment, "module:sw1:1", "port:sw1:p1"));
    assert!(graph.has_edge(EdgeKind::Containment, "device:sw1", "port:sw1:p2"));
}

#[test]
fn test_port_without_index_is_reported() {
    let context = context_from(switch_batch());
    let output = TopologyBuilder::new(&context).build();

    assert_eq!(
        output.issues,
        vec![DataQualityIssue::UnparseablePortIndex {
            port: "sw1/p4".to_string(),
            location: None,
        }]
    );
    assert!(output.graph.node("port:sw1:p4").is_none());
}

#[test]
fn test_alias_is_realized_both_ways() {
    let context = context_from(switch_batch());
    let graph = TopologyBuilder::new(&context).build().graph;

    assert!(graph.has_edge(EdgeKind::Realization, "interface:sw1:p1", "interface:sw1:p1.10"));
    assert!(graph.has_edge(EdgeKind::Realization, "interface:sw1:p1.10", "interface:sw1:p1"));
    assert!(graph.node("port:sw1:p1.10").is_none());
}

#[test]
fn test_channel_aggregates_members() {
    let context = context_from(switch_batch());
    let graph = TopologyBuilder::new(&context).build().graph;

    assert!(graph.has_edge(EdgeKind::Membership, "interface:sw1:po1", "interface:sw1:p2"));
    assert!(graph.has_edge(EdgeKind::Membership, "interface:sw1:po1", "interface:sw1:p3"));
    assert!(graph.node("port:sw1:po1").is_none());
}

#[test]
fn test_vlan_membership_targets_real_ports() {
    let context = context_from(switch_batch());
    let graph = TopologyBuilder::new(&context).build().graph;

    let vlan = graph.node("vlan:sw1:10").unwrap();
    assert_eq!(vlan.attr("vlan_id"), Some("10"));
    assert_eq!(vlan.attr("name"), Some("users"));
    assert!(graph.has_edge(EdgeKind::Containment, "device:sw1", "vlan:sw1:10"));

    let mut members: Vec<&str> = graph
        .edges_from("vlan:sw1:10")
        .filter(|e| e.kind == EdgeKind::Membership)
        .map(|e| e.target_id.as_str())
        .collect();
    members.sort_unstable();
    assert_eq!(
        members,
        vec![
            "interface:sw1:p4",
            "port:sw1:p1",
            "port:sw1:p2",
            "port:sw1:p3"
        ]
    );
    assert_eq!(graph.nodes_of_kind(CiKind::Vlan).count(), 1);
}

#[test]
fn test_options_leave_out_parts() {
    let context = context_from(switch_batch());
    let options = BuildOptions::default()
        .with_physical_ports(false)
        .with_vlans(false);
    let output = TopologyBuilder::new(&context).with_options(options).build();

    assert_eq!(output.graph.nodes_of_kind(CiKind::PhysicalPort).count(), 0);
    assert_eq!(output.graph.nodes_of_kind(CiKind::Vlan).count(), 0);
    assert!(output.issues.is_empty());
}

#[test]
fn test_build_is_repeatable() {
    let context = context_from(switch_batch());
    let first = TopologyBuilder::new(&context).build().graph;
    let second = TopologyBuilder::new(&context).build().graph;

    assert_eq!(first.nodes(), second.nodes());
    assert_eq!(first.edges(), second.edges());
}
