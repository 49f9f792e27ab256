//! CI write and read queries

use std::collections::{BTreeMap, HashMap};

use futures::future::try_join_all;
use neo4rs::{BoltType, Query};
use tracing::debug;

use super::neo4j::{Neo4jClient, Neo4jError};
use crate::error::SinkError;
use crate::reporter::{CiBatch, CiSink};
use crate::topology::{CiEdge, CiKind, CiNode, CiObject, EdgeKind};

/// Counts of stored CIs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiStats {
    pub nodes: i64,
    pub edges: i64,
    /// Node count per `kind` property
    pub by_kind: BTreeMap<String, i64>,
    /// Relationship count per type
    pub by_edge_type: BTreeMap<String, i64>,
}

impl Neo4jClient {
    /// Upsert nodes, one `UNWIND` query per kind, run concurrently
    ///
    /// # Errors
    /// Returns an error if a query fails.
    pub async fn merge_nodes(&self, nodes: &[&CiNode]) -> Result<(), Neo4jError> {
        let mut by_kind: BTreeMap<CiKind, Vec<&CiNode>> = BTreeMap::new();
        for node in nodes {
            by_kind.entry(node.kind).or_default().push(node);
        }

        let queries = by_kind.into_iter().map(|(kind, nodes)| {
            let node_data: Vec<HashMap<&str, BoltType>> = nodes
                .iter()
                .map(|n| {
                    let attributes: HashMap<&str, BoltType> = n
                        .attributes
                        .iter()
                        .map(|(k, v)| (k.as_str(), BoltType::String(v.clone().into())))
                        .collect();

                    let mut map = HashMap::new();
                    map.insert("id", BoltType::String(n.id.clone().into()));
                    map.insert("attributes", BoltType::from(attributes));
                    map
                })
                .collect();

            let label = kind.label();
            let query_str = format!(
                r#"
                UNWIND $nodes AS node
                MERGE (c:CI {{id: node.id}})
                SET c:{label}, c.kind = $kind
                SET c += node.attributes
                "#
            );

            let query = Query::new(query_str)
                .param("kind", kind.to_string())
                .param("nodes", node_data);

            self.graph().run(query)
        });

        try_join_all(queries).await?;
        Ok(())
    }

    /// Upsert edges, one `UNWIND` query per relationship type
    ///
    /// Edges whose endpoints are not stored yet are not created.
    ///
    /// # Errors
    /// Returns an error if a query fails.
    pub async fn merge_edges(&self, edges: &[&CiEdge]) -> Result<(), Neo4jError> {
        let mut by_kind: BTreeMap<EdgeKind, Vec<&CiEdge>> = BTreeMap::new();
        for edge in edges {
            by_kind.entry(edge.kind).or_default().push(edge);
        }

        let queries = by_kind.into_iter().map(|(kind, edges)| {
            let edge_data: Vec<HashMap<&str, BoltType>> = edges
                .iter()
                .map(|e| {
                    let mut map = HashMap::new();
                    map.insert("source_id", BoltType::String(e.source_id.clone().into()));
                    map.insert("target_id", BoltType::String(e.target_id.clone().into()));
                    map
                })
                .collect();

            let rel_type = kind.to_string();
            let query_str = format!(
                r#"
                UNWIND $edges AS edge
                MATCH (source:CI {{id: edge.source_id}})
                MATCH (target:CI {{id: edge.target_id}})
                MERGE (source)-[:{rel_type}]->(target)
                "#
            );

            let query = Query::new(query_str).param("edges", edge_data);
            self.graph().run(query)
        });

        try_join_all(queries).await?;
        Ok(())
    }

    /// Count stored CIs and relationships
    ///
    /// # Errors
    /// Returns an error if a query fails.
    pub async fn stats(&self) -> Result<CiStats, Neo4jError> {
        let query = Query::new(
            r#"
            MATCH (c:CI)
            WITH c.kind as kind, count(c) as cnt
            RETURN kind, cnt
            ORDER BY kind
            "#
            .to_string(),
        );

        let mut result = self.graph().execute(query).await?;
        let mut stats = CiStats::default();

        while let Some(row) = result.next().await? {
            let kind: String = row.get("kind").unwrap_or_default();
            let count: i64 = row
                .get("cnt")
                .map_err(|e| Neo4jError::Query(format!("CI count: {e}")))?;
            stats.nodes += count;
            stats.by_kind.insert(kind, count);
        }

        let rel_query = Query::new(
            r#"
            MATCH (:CI)-[r]->(:CI)
            WITH type(r) as rel, count(r) as cnt
            RETURN rel, cnt
            ORDER BY rel
            "#
            .to_string(),
        );

        let mut rel_result = self.graph().execute(rel_query).await?;
        while let Some(row) = rel_result.next().await? {
            let rel: String = row.get("rel").unwrap_or_default();
            let count: i64 = row
                .get("cnt")
                .map_err(|e| Neo4jError::Query(format!("relationship count: {e}")))?;
            stats.edges += count;
            stats.by_edge_type.insert(rel, count);
        }

        Ok(stats)
    }
}

impl CiSink for Neo4jClient {
    async fn send(&mut self, batch: &CiBatch) -> Result<(), SinkError> {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for object in &batch.objects {
            match object {
                CiObject::Node(node) => nodes.push(node),
                CiObject::Edge(edge) => edges.push(edge),
            }
        }

        debug!(
            "Writing batch {}: {} nodes, {} edges",
            batch.sequence,
            nodes.len(),
            edges.len()
        );

        self.merge_nodes(&nodes).await?;
        self.merge_edges(&edges).await?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
