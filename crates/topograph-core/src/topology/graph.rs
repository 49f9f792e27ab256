//! CI graph types

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::ids::sha256_hex;

/// Kind of configuration item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CiKind {
    Device,
    PhysicalPort,
    Interface,
    Vlan,
    Layer2Connection,
    Concentrator,
    Module,
    Config,
}

impl CiKind {
    pub const ALL: [Self; 8] = [
        Self::Device,
        Self::PhysicalPort,
        Self::Interface,
        Self::Vlan,
        Self::Layer2Connection,
        Self::Concentrator,
        Self::Module,
        Self::Config,
    ];

    /// Node label used by graph stores
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Device => "Device",
            Self::PhysicalPort => "PhysicalPort",
            Self::Interface => "Interface",
            Self::Vlan => "Vlan",
            Self::Layer2Connection => "Layer2Connection",
            Self::Concentrator => "Concentrator",
            Self::Module => "Module",
            Self::Config => "Config",
        }
    }
}

impl std::fmt::Display for CiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Device => "device",
            Self::PhysicalPort => "physical_port",
            Self::Interface => "interface",
            Self::Vlan => "vlan",
            Self::Layer2Connection => "layer2_connection",
            Self::Concentrator => "concentrator",
            Self::Module => "module",
            Self::Config => "config",
        };
        write!(f, "{s}")
    }
}

/// A configuration item in the output graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiNode {
    /// Unique identifier
    pub id: String,
    /// Kind of item
    pub kind: CiKind,
    /// Reported attributes; absent values are left out
    pub attributes: BTreeMap<String, String>,
}

impl CiNode {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: CiKind) -> Self {
        Self {
            id: id.into(),
            kind,
            attributes: BTreeMap::new(),
        }
    }

    /// Set an attribute when a value is present
    #[must_use]
    pub fn with_attr<V: ToString>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.attributes.insert(name.to_string(), value.to_string());
        }
        self
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Kind of edge/relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    Realization,
    Membership,
    Containment,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Realization => "REALIZATION",
            Self::Membership => "MEMBERSHIP",
            Self::Containment => "CONTAINMENT",
        };
        write!(f, "{s}")
    }
}

/// An edge in the graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CiEdge {
    /// Source node ID
    pub source_id: String,
    /// Target node ID
    pub target_id: String,
    /// Kind of relationship
    pub kind: EdgeKind,
}

impl CiEdge {
    #[must_use]
    pub fn new(kind: EdgeKind, source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind,
        }
    }

    /// Identity of the edge: kind plus direction
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}->{}", self.kind, self.source_id, self.target_id)
    }
}

/// A node or an edge, as delivered to a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum CiObject {
    Node(CiNode),
    Edge(CiEdge),
}

impl CiObject {
    /// Identity used to emit the object once per run
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Node(node) => node.id.clone(),
            Self::Edge(edge) => edge.key(),
        }
    }

    /// Content hash of the object's reported state
    #[must_use]
    pub fn fingerprint(&self) -> String {
        match self {
            Self::Node(node) => {
                let mut content = format!("{}\n{}", node.kind, node.id);
                for (name, value) in &node.attributes {
                    content.push('\n');
                    content.push_str(name);
                    content.push('=');
                    content.push_str(value);
                }
                sha256_hex(&content)
            }
            Self::Edge(edge) => sha256_hex(&edge.key()),
        }
    }
}

/// The CI graph: nodes in insertion order, edges never dangling
#[derive(Debug, Clone, Default)]
pub struct CiGraph {
    nodes: Vec<CiNode>,
    node_index: HashMap<String, usize>,
    edges: Vec<CiEdge>,
    edge_keys: HashSet<String>,
    /// Nodes built from placeholders whose own record has not arrived
    provisional: HashSet<String>,
}

impl CiGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; returns false if a node with the same id exists
    pub fn add_node(&mut self, node: CiNode) -> bool {
        if self.node_index.contains_key(&node.id) {
            return false;
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Add an edge between two nodes already in the graph
    ///
    /// Returns false (and adds nothing) if either endpoint is missing or the
    /// same edge was already added.
    pub fn add_edge(&mut self, edge: CiEdge) -> bool {
        if !self.contains_node(&edge.source_id) || !self.contains_node(&edge.target_id) {
            return false;
        }
        if !self.edge_keys.insert(edge.key()) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Mark a node whose attributes are still expected from a later record
    pub fn mark_provisional(&mut self, id: &str) {
        if self.contains_node(id) {
            self.provisional.insert(id.to_string());
        }
    }

    #[must_use]
    pub fn is_provisional(&self, id: &str) -> bool {
        self.provisional.contains(id)
    }

    /// Whether the object is, or touches, a provisional node
    #[must_use]
    pub fn depends_on_provisional(&self, object: &CiObject) -> bool {
        match object {
            CiObject::Node(node) => self.is_provisional(&node.id),
            CiObject::Edge(edge) => {
                self.is_provisional(&edge.source_id) || self.is_provisional(&edge.target_id)
            }
        }
    }

    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&CiNode> {
        self.node_index.get(id).and_then(|&i| self.nodes.get(i))
    }

    #[must_use]
    pub fn nodes(&self) -> &[CiNode] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[CiEdge] {
        &self.edges
    }

    pub fn nodes_of_kind(&self, kind: CiKind) -> impl Iterator<Item = &CiNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &CiEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// Edges leaving `source_id`
    pub fn edges_from<'a>(&'a self, source_id: &'a str) -> impl Iterator<Item = &'a CiEdge> {
        self.edges.iter().filter(move |e| e.source_id == source_id)
    }

    #[must_use]
    pub fn has_edge(&self, kind: EdgeKind, source_id: &str, target_id: &str) -> bool {
        self.edge_keys
            .contains(&CiEdge::new(kind, source_id, target_id).key())
    }

    /// Nodes followed by edges, the order sinks receive them in
    pub fn objects(&self) -> impl Iterator<Item = CiObject> + '_ {
        self.nodes
            .iter()
            .cloned()
            .map(CiObject::Node)
            .chain(self.edges.iter().cloned().map(CiObject::Edge))
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
