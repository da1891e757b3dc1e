//! 图视图：拓扑、位置与样式合在一起，可直接绘制

use std::collections::BTreeMap;

use super::types::{GraphKind, GraphView, VizEdge, VizNode};
use crate::config::MapConfig;
use crate::layout::Point;
use crate::topo::{EdgeStyle, NodeId, PathEdge, Topology};

fn nodes(topo: &Topology, ids: &[NodeId], pos: &BTreeMap<NodeId, Point>, cfg: &MapConfig) -> Vec<VizNode> {
    ids.iter()
        .map(|&id| {
            let p = pos.get(&id).copied().unwrap_or(Point::new(0.0, 0.0));
            let sink = id == topo.sink;
            VizNode {
                id,
                x: p.x,
                y: p.y,
                color: if sink { cfg.sink_color.clone() } else { cfg.node_color.clone() },
                state: topo.node_states.get(&id).copied().unwrap_or_default(),
                sink,
            }
        })
        .collect()
}

fn edge(from: NodeId, to: NodeId, rssi: i32, style: &EdgeStyle, cfg: &MapConfig, labels: bool) -> VizEdge {
    VizEdge {
        from,
        to,
        rssi: Some(rssi),
        line: style.line,
        alpha: style.alpha,
        label: if labels { style.label.clone() } else { String::new() },
        color: if style.active {
            cfg.active_edge_color.clone()
        } else {
            cfg.inactive_edge_color.clone()
        },
    }
}

pub fn tree_view(topo: &Topology, pos: &BTreeMap<NodeId, Point>, cfg: &MapConfig) -> GraphView {
    GraphView {
        kind: GraphKind::NetworkTree,
        title: "Network Tree".to_string(),
        directed: true,
        nodes: nodes(topo, &topo.tree_nodes(), pos, cfg),
        edges: topo
            .routing_tree
            .iter()
            .map(|e| edge(e.source, e.address, e.rssi, &e.style, cfg, true))
            .collect(),
    }
}

pub fn adjacency_view(topo: &Topology, pos: &BTreeMap<NodeId, Point>, cfg: &MapConfig) -> GraphView {
    GraphView {
        kind: GraphKind::AdjacencyGraph,
        title: "Adjacency Graph".to_string(),
        directed: false,
        nodes: nodes(topo, &topo.adjacency_nodes(), pos, cfg),
        edges: topo
            .adjacency
            .iter()
            .map(|e| edge(e.a, e.b, e.rssi, &e.style, cfg, true))
            .collect(),
    }
}

/// Routing-tree edges (adjacency edges when the tree is empty) over the
/// geographic positions, unlabeled.
pub fn geo_view(topo: &Topology, pos: &BTreeMap<NodeId, Point>, cfg: &MapConfig) -> GraphView {
    let (ids, edges) = if topo.routing_tree.is_empty() {
        (
            topo.adjacency_nodes(),
            topo.adjacency
                .iter()
                .map(|e| edge(e.a, e.b, e.rssi, &e.style, cfg, false))
                .collect(),
        )
    } else {
        (
            topo.tree_nodes(),
            topo.routing_tree
                .iter()
                .map(|e| edge(e.source, e.address, e.rssi, &e.style, cfg, false))
                .collect(),
        )
    };
    GraphView {
        kind: GraphKind::NodePositions,
        title: "Node Positions".to_string(),
        directed: false,
        nodes: nodes(topo, &ids, pos, cfg),
        edges,
    }
}

pub fn path_view(topo: &Topology, paths: &[PathEdge], pos: &BTreeMap<NodeId, Point>, cfg: &MapConfig) -> GraphView {
    let mut ids: Vec<NodeId> = paths.iter().flat_map(|e| [e.from, e.to]).collect();
    ids.sort();
    ids.dedup();
    GraphView {
        kind: GraphKind::RoutingPath,
        title: "Routing Path".to_string(),
        directed: true,
        nodes: nodes(topo, &ids, pos, cfg),
        edges: paths
            .iter()
            .map(|e| VizEdge {
                from: e.from,
                to: e.to,
                rssi: e.label.parse().ok(),
                line: cfg.active_edge_style,
                alpha: 1.0,
                label: e.label.clone(),
                color: cfg.active_edge_color.clone(),
            })
            .collect(),
    }
}
