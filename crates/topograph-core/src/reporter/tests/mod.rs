mod tests_config;
mod tests_jsonl;

use crate::topology::{CiEdge, CiGraph, CiKind, CiNode, EdgeKind};

/// Graph with `nodes` interfaces and an edge between each consecutive pair
pub(super) fn chain(nodes: usize) -> CiGraph {
    let mut graph = CiGraph::new();
    for i in 0..nodes {
        graph.add_node(CiNode::new(format!("n{i}"), CiKind::Interface));
    }
    for i in 1..nodes {
        graph.add_edge(CiEdge::new(
            EdgeKind::Membership,
            format!("n{}", i - 1),
            format!("n{i}"),
        ));
    }
    graph
}
