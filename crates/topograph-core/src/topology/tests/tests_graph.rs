//! Tests for the CI graph container

#![allow(clippy::unwrap_used)]

use crate::topology::{CiEdge, CiGraph, CiKind, CiNode, CiObject, EdgeKind};

fn graph_with(ids: &[&str]) -> CiGraph {
    let mut graph = CiGraph::new();
    for id in ids {
        graph.add_node(CiNode::new(*id, CiKind::Interface));
    }
    graph
}

#[test]
fn test_first_node_with_an_id_wins() {
    let mut graph = CiGraph::new();
    assert!(graph.add_node(CiNode::new("a", CiKind::Device).with_attr("name", Some("one"))));
    assert!(!graph.add_node(CiNode::new("a", CiKind::Device).with_attr("name", Some("two"))));

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.node("a").and_then(|n| n.attr("name")), Some("one"));
}

#[test]
fn test_edges_never_dangle() {
    let mut graph = graph_with(&["a"]);
    assert!(!graph.add_edge(CiEdge::new(EdgeKind::Membership, "a", "missing")));
    assert!(!graph.add_edge(CiEdge::new(EdgeKind::Membership, "missing", "a")));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_duplicate_edges_are_ignored() {
    let mut graph = graph_with(&["a", "b"]);
    assert!(graph.add_edge(CiEdge::new(EdgeKind::Realization, "a", "b")));
    assert!(!graph.add_edge(CiEdge::new(EdgeKind::Realization, "a", "b")));
    assert!(graph.add_edge(CiEdge::new(EdgeKind::Realization, "b", "a")));
    assert!(graph.add_edge(CiEdge::new(EdgeKind::Membership, "a", "b")));

    assert_eq!(graph.edge_count(), 3);
    assert!(graph.has_edge(EdgeKind::Realization, "b", "a"));
    assert_eq!(graph.edges_from("a").count(), 2);
}

#[test]
fn test_absent_attributes_are_left_out() {
    let node = CiNode::new("a", CiKind::Device)
        .with_attr("name", None::<String>)
        .with_attr("memory_bytes", Some(4096u64));
    assert_eq!(node.attr("name"), None);
    assert_eq!(node.attr("memory_bytes"), Some("4096"));
}

#[test]
fn test_objects_list_nodes_before_edges() {
    let mut graph = graph_with(&["a", "b"]);
    graph.add_edge(CiEdge::new(EdgeKind::Membership, "a", "b"));

    let objects: Vec<CiObject> = graph.objects().collect();
    assert_eq!(objects.len(), 3);
    assert!(matches!(objects[0], CiObject::Node(_)));
    assert!(matches!(objects[2], CiObject::Edge(_)));
    assert_eq!(objects[2].id(), "MEMBERSHIP:a->b");
}

#[test]
fn test_fingerprint_tracks_attributes() {
    let plain = CiObject::Node(CiNode::new("a", CiKind::Device));
    let named = CiObject::Node(CiNode::new("a", CiKind::Device).with_attr("name", Some("x")));
    assert_eq!(plain.id(), named.id());
    assert_ne!(plain.fingerprint(), named.fingerprint());
}

#[test]
fn test_kind_names() {
    assert_eq!(CiKind::PhysicalPort.to_string(), "physical_port");
    assert_eq!(CiKind::Layer2Connection.label(), "Layer2Connection");
    assert_eq!(EdgeKind::Containment.to_string(), "CONTAINMENT");
}

#[test]
fn test_object_serialises_with_tag() {
    let object = CiObject::Edge(CiEdge::new(EdgeKind::Realization, "a", "b"));
    let json = serde_json::to_value(&object).unwrap();
    assert_eq!(json["object"], "edge");
    assert_eq!(json["kind"], "REALIZATION");
}
