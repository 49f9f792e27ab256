//! Tests for Neo4jClient against a live database

#![allow(clippy::unwrap_used)]

use serial_test::serial;

use crate::reporter::{CiBatch, CiSink};
use crate::store::{Neo4jClient, Neo4jConfig};
use crate::topology::{CiEdge, CiKind, CiNode, CiObject, EdgeKind};

async fn create_test_client() -> Neo4jClient {
    let config = Neo4jConfig::new("bolt://localhost:7687", "neo4j", "topograph_dev_password");
    Neo4jClient::connect(&config).await.unwrap()
}

#[tokio::test]
async fn test_connect_to_unreachable_host_fails() {
    let config = Neo4jConfig::new("bolt://invalid-host:7687", "neo4j", "password");
    assert!(Neo4jClient::connect(&config).await.is_err());
}

#[tokio::test]
#[serial]
#[ignore] // Requires a running Neo4j instance
async fn test_send_batch_is_idempotent() {
    let mut client = create_test_client().await;
    let batch = CiBatch {
        sequence: 0,
        objects: vec![
            CiObject::Node(
                CiNode::new("device:test-sw1", CiKind::Device).with_attr("name", Some("sw1")),
            ),
            CiObject::Node(CiNode::new("interface:test-sw1:p1", CiKind::Interface)),
            CiObject::Edge(CiEdge::new(
                EdgeKind::Containment,
                "device:test-sw1",
                "interface:test-sw1:p1",
            )),
        ],
    };

    client.send(&batch).await.unwrap();
    let first = client.stats().await.unwrap();
    client.send(&batch).await.unwrap();
    let second = client.stats().await.unwrap();

    assert_eq!(first, second);
    assert!(second.nodes >= 2);
    assert!(second.edges >= 1);
    assert!(second.by_edge_type.contains_key("CONTAINMENT"));
}
