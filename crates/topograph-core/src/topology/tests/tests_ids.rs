//! Tests for CI identifiers

#![allow(clippy::unwrap_used)]

use crate::model::{PortRef, VlanTag};
use crate::topology::{
    concentrator_id, device_id, interface_id, layer2_connection_id, physical_port_id, sha256_hex,
    vlan_id,
};

#[test]
fn test_sha256_hex_known_value() {
    assert_eq!(
        sha256_hex("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_layer2_id_ignores_endpoint_order() {
    let forward = layer2_connection_id(&["001122334455", "66778899aabb"]);
    let backward = layer2_connection_id(&["66778899aabb", "001122334455"]);
    assert_eq!(forward, backward);
    assert_eq!(forward, sha256_hex("00112233445566778899aabb"));
}

#[test]
fn test_concentrator_id_is_prefixed() {
    let keys = ["b", "a", "c"];
    assert_eq!(
        concentrator_id(&keys),
        format!("concentrator:{}", sha256_hex("abc"))
    );
}

#[test]
fn test_entity_ids() {
    let port = PortRef::new("sw1", "p1");
    assert_eq!(device_id("sw1"), "device:sw1");
    assert_eq!(interface_id(&port), "interface:sw1:p1");
    assert_eq!(physical_port_id(&port), "port:sw1:p1");
    assert_eq!(
        vlan_id("sw1", VlanTag::new(10).unwrap()),
        "vlan:sw1:10"
    );
}
