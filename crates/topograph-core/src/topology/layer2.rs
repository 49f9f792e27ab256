//! Layer-2 connection synthesis
//!
//! Neighbour observations are grouped into links with a union-find over
//! resolved ports and named segments. A group of two ports is a
//! point-to-point [`CiKind::Layer2Connection`]; a larger group is a shared
//! medium represented by a [`CiKind::Concentrator`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use super::graph::{CiEdge, CiGraph, CiKind, CiNode, EdgeKind};
use super::ids::{concentrator_id, interface_id, layer2_connection_id};
use crate::context::DiscoveryContext;
use crate::error::DataQualityIssue;
use crate::model::{Endpoint, Port, PortRef};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Token {
    Port(PortRef),
    Segment(String),
}

/// Disjoint sets over link tokens
#[derive(Debug, Default)]
struct Segments {
    slots: HashMap<Token, usize>,
    parent: Vec<usize>,
}

impl Segments {
    fn slot(&mut self, token: Token) -> usize {
        if let Some(&slot) = self.slots.get(&token) {
            return slot;
        }
        let slot = self.parent.len();
        self.parent.push(slot);
        self.slots.insert(token, slot);
        slot
    }

    fn find(&mut self, mut slot: usize) -> usize {
        while self.parent[slot] != slot {
            self.parent[slot] = self.parent[self.parent[slot]];
            slot = self.parent[slot];
        }
        slot
    }

    fn union(&mut self, a: usize, b: usize) {
        let (a, b) = (self.find(a), self.find(b));
        if a != b {
            self.parent[a.max(b)] = a.min(b);
        }
    }

    /// Ports per connected group, each group sorted
    fn groups(mut self) -> Vec<Vec<PortRef>> {
        let ports: Vec<(PortRef, usize)> = self
            .slots
            .iter()
            .filter_map(|(token, &slot)| match token {
                Token::Port(port) => Some((port.clone(), slot)),
                Token::Segment(_) => None,
            })
            .collect();

        let mut groups: BTreeMap<usize, BTreeSet<PortRef>> = BTreeMap::new();
        for (port, slot) in ports {
            let root = self.find(slot);
            groups.entry(root).or_default().insert(port);
        }

        let mut groups: Vec<Vec<PortRef>> = groups
            .into_values()
            .map(|members| members.into_iter().collect())
            .collect();
        groups.sort();
        groups
    }
}

/// Add layer-2 connections and concentrators to `graph`
pub(super) fn synthesize(
    context: &DiscoveryContext,
    graph: &mut CiGraph,
    issues: &mut Vec<DataQualityIssue>,
) {
    let mut segments = Segments::default();
    let mut unresolved: BTreeSet<Endpoint> = BTreeSet::new();

    for observation in context.connectivity() {
        let local = resolve(context, &observation.local, &mut unresolved);
        let remote = observation
            .remote
            .as_ref()
            .and_then(|remote| resolve(context, remote, &mut unresolved));

        let mut tokens: Vec<Token> = local.into_iter().chain(remote).map(Token::Port).collect();
        if let Some(segment) = &observation.segment {
            tokens.push(Token::Segment(segment.clone()));
        }

        let mut tokens = tokens.into_iter();
        let Some(first) = tokens.next() else {
            continue;
        };
        let anchor = segments.slot(first);
        for token in tokens {
            let slot = segments.slot(token);
            segments.union(anchor, slot);
        }
    }

    let mut connections = 0;
    let mut concentrators = 0;

    for members in segments.groups() {
        if members.len() < 2 {
            continue;
        }

        let ports: Vec<&Port> = members.iter().filter_map(|r| context.port(r)).collect();
        let keys: Vec<String> = ports.iter().copied().map(endpoint_key).collect();

        let (id, kind) = if members.len() == 2 {
            connections += 1;
            (layer2_connection_id(&keys), CiKind::Layer2Connection)
        } else {
            concentrators += 1;
            (concentrator_id(&keys), CiKind::Concentrator)
        };

        graph.add_node(
            CiNode::new(&id, kind).with_attr("endpoint_count", Some(members.len())),
        );
        for member in &members {
            graph.add_edge(CiEdge::new(
                EdgeKind::Membership,
                &id,
                interface_id(member),
            ));
        }
    }

    debug!(
        "Synthesized {} layer-2 connections and {} concentrators",
        connections, concentrators
    );

    issues.extend(
        unresolved
            .into_iter()
            .map(|endpoint| DataQualityIssue::UnresolvedEndpoint {
                device: endpoint.device_id,
                port: endpoint.port_id,
            }),
    );
}

fn resolve(
    context: &DiscoveryContext,
    endpoint: &Endpoint,
    unresolved: &mut BTreeSet<Endpoint>,
) -> Option<PortRef> {
    let port = context.resolve_endpoint(endpoint);
    if port.is_none() && unresolved.insert(endpoint.clone()) {
        debug!("Neighbour endpoint {} does not resolve to a port", endpoint);
    }
    port
}

/// Key an endpoint contributes to a connection id
///
/// Depends on the endpoint's own port only, so a link keeps its id whatever
/// else the run discovers later.
fn endpoint_key(port: &Port) -> String {
    match port.attributes.mac {
        Some(mac) => mac.key(),
        None => format!("{}|{}|", port.device, port.key),
    }
}
