//! Tests for Neo4jConfig

use crate::store::{Neo4jConfig, Neo4jError};

#[test]
fn test_neo4j_config_new() {
    let config = Neo4jConfig::new("bolt://localhost:7687", "neo4j", "password");
    assert_eq!(config.uri, "bolt://localhost:7687");
    assert_eq!(config.user, "neo4j");
    assert_eq!(config.password, "password");
    assert_eq!(config.database, None);
}

#[test]
fn test_neo4j_config_with_database() {
    let config =
        Neo4jConfig::new("bolt://localhost:7687", "neo4j", "password").with_database("cmdb");
    assert_eq!(config.database, Some("cmdb".to_string()));
}

#[test]
fn test_neo4j_error_display() {
    let err = Neo4jError::Connection("refused".to_string());
    assert_eq!(err.to_string(), "Connection error: refused");
}

#[test]
fn test_neo4j_error_converts_to_sink_error() {
    let err: crate::error::SinkError = Neo4jError::Query("bad cypher".to_string()).into();
    assert_eq!(err.to_string(), "Query error: bad cypher");
}

#[test]
fn test_neo4j_config_pool_tuning() {
    let config = Neo4jConfig::new("bolt://localhost:7687", "neo4j", "password")
        .with_max_connections(8)
        .with_fetch_size(0);
    assert_eq!(config.max_connections, Some(8));
    assert_eq!(config.fetch_size, Some(1));
}

#[test]
fn test_neo4j_config_defaults_leave_driver_settings() {
    let config = Neo4jConfig::new("bolt://localhost:7687", "neo4j", "password");
    assert_eq!(config.max_connections, None);
    assert_eq!(config.fetch_size, None);
}
