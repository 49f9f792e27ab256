//! Connection to the Neo4j database CIs are stored in

use neo4rs::{ConfigBuilder, Graph, Query};
use thiserror::Error;
use tracing::{debug, info};

use crate::topology::CiKind;

/// Errors raised by the CI store
#[derive(Debug, Error)]
pub enum Neo4jError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),
}

/// Where and how to reach the CI store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: Option<String>,
    /// Connection pool size; driver default when unset
    pub max_connections: Option<usize>,
    /// Rows pulled per round trip; driver default when unset
    pub fetch_size: Option<usize>,
}

impl Neo4jConfig {
    #[must_use]
    pub fn new(
        uri: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
            database: None,
            max_connections: None,
            fetch_size: None,
        }
    }

    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    #[must_use]
    pub fn with_max_connections(mut self, max: usize) -> Self {
        self.max_connections = Some(max.max(1));
        self
    }

    #[must_use]
    pub fn with_fetch_size(mut self, rows: usize) -> Self {
        self.fetch_size = Some(rows.max(1));
        self
    }
}

/// Handle on the CI store
///
/// Every CI is stored under the `CI` label plus the label of its kind, keyed
/// by its `id`.
#[derive(Clone)]
pub struct Neo4jClient {
    graph: Graph,
}

impl Neo4jClient {
    /// Connect and create the CI schema if it is missing
    ///
    /// # Errors
    /// Returns [`Neo4jError::Connection`] if the store cannot be reached, or
    /// a query error if the schema cannot be created.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self, Neo4jError> {
        let mut builder = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password);
        if let Some(db) = &config.database {
            builder = builder.db(db.as_str());
        }
        if let Some(max) = config.max_connections {
            builder = builder.max_connections(max);
        }
        if let Some(rows) = config.fetch_size {
            builder = builder.fetch_size(rows);
        }

        let driver_config = builder
            .build()
            .map_err(|e| Neo4jError::Connection(format!("{}: {e}", config.uri)))?;
        let graph = Graph::connect(driver_config)
            .await
            .map_err(|e| Neo4jError::Connection(format!("{}: {e}", config.uri)))?;

        let client = Self { graph };
        client.ensure_schema().await?;

        info!("Connected to CI store at {}", config.uri);
        Ok(client)
    }

    /// Uniqueness of `CI.id`, plus lookup indexes per kind label
    async fn ensure_schema(&self) -> Result<(), Neo4jError> {
        let mut statements = vec![
            "CREATE CONSTRAINT ci_id IF NOT EXISTS FOR (c:CI) REQUIRE c.id IS UNIQUE".to_string(),
            "CREATE INDEX ci_kind IF NOT EXISTS FOR (c:CI) ON (c.kind)".to_string(),
        ];
        statements.extend(CiKind::ALL.iter().map(|kind| {
            format!(
                "CREATE INDEX {kind}_id IF NOT EXISTS FOR (c:{}) ON (c.id)",
                kind.label()
            )
        }));

        for statement in statements {
            debug!("{}", statement);
            self.graph.run(Query::new(statement)).await?;
        }

        Ok(())
    }

    pub(super) fn graph(&self) -> &Graph {
        &self.graph
    }
}
