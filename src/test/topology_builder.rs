use std::collections::BTreeSet;

use super::{active, row};
use crate::config::{LineStyle, MapConfig};
use crate::ingest::{TimeUnit, read_observations};
use crate::topo::{EdgeKey, LinkKind, NodeId, NodeState, Observation, Topology, TopologyBuilder};

fn build(rows: &[Observation]) -> Topology {
    TopologyBuilder::new(NodeId(1), &MapConfig::default()).build(rows)
}

fn mixed_batch() -> Vec<Observation> {
    vec![
        active(0, 10, 2, 1, -40, LinkKind::Parent),
        active(1, 10, 3, 1, -48, LinkKind::Parent),
        active(2, 11, 3, 2, -62, LinkKind::Neighbor),
        active(3, 12, 4, 3, -66, LinkKind::Parent),
        active(4, 12, 4, 2, -71, LinkKind::Parent),
        row(5, 13, 1, 4, -80, NodeState::Inactive, LinkKind::Neighbor),
        active(6, 14, 1, 2, -41, LinkKind::Child),
        active(7, 15, 5, 0, -50, LinkKind::Parent),
        row(8, 16, 6, 7, -30, NodeState::Unknown, LinkKind::Parent),
    ]
}

#[test]
fn builder_keeps_one_next_hop_per_source() {
    let topo = build(&mixed_batch());
    assert!(topo.has_single_next_hops());
    let sources: BTreeSet<NodeId> = topo.routing_tree.iter().map(|e| e.source).collect();
    assert_eq!(sources.len(), topo.routing_tree.len());
}

#[test]
fn builder_never_emits_sentinel_endpoints() {
    let topo = build(&mixed_batch());
    assert!(topo.routing_tree.iter().all(|e| e.source.0 != 0 && e.address.0 != 0));
    assert!(topo.adjacency.iter().all(|e| e.a.0 != 0 && e.b.0 != 0));
}

#[test]
fn edges_touching_inactive_nodes_are_dimmed() {
    let cfg = MapConfig::default();
    let topo = build(&mixed_batch());
    assert_eq!(topo.node_states[&NodeId(4)], NodeState::Inactive);

    let touching_4 = |a: NodeId, b: NodeId| a == NodeId(4) || b == NodeId(4);
    let tree_styles = topo
        .routing_tree
        .iter()
        .filter(|e| touching_4(e.source, e.address))
        .map(|e| &e.style);
    let adj_styles = topo
        .adjacency
        .iter()
        .filter(|e| touching_4(e.a, e.b))
        .map(|e| &e.style);
    let styles: Vec<_> = tree_styles.chain(adj_styles).collect();
    assert!(!styles.is_empty());
    for s in styles {
        assert!(!s.active);
        assert_eq!(s.alpha, cfg.inactive_edge_alpha);
        assert_eq!(s.line, LineStyle::Dotted);
        assert!(s.label.is_empty());
    }
}

#[test]
fn building_twice_gives_identical_output() {
    let rows = mixed_batch();
    let a = build(&rows);
    let b = build(&rows);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a.routing_tree).unwrap(),
        serde_json::to_string(&b.routing_tree).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&a.adjacency).unwrap(),
        serde_json::to_string(&b.adjacency).unwrap()
    );
}

#[test]
fn later_parent_report_beats_older_child_report() {
    let rows = vec![
        active(0, 10, 2, 1, -40, LinkKind::Parent),
        active(1, 5, 1, 2, -42, LinkKind::Child),
    ];
    let topo = build(&rows);
    assert_eq!(topo.routing_tree.len(), 1);
    let e = &topo.routing_tree[0];
    assert_eq!((e.source, e.address, e.rssi), (NodeId(2), NodeId(1), -40));
}

#[test]
fn unknown_node_contributes_no_edges() {
    let rows = vec![row(0, 10, 5, 1, -40, NodeState::Unknown, LinkKind::Parent).with_parent(NodeId(1), -40)];
    let topo = build(&rows);
    assert!(topo.routing_tree.is_empty());
    assert!(topo.adjacency.is_empty());
}

#[test]
fn header_only_input_yields_lone_sink() {
    let csv = "Timestamp,Source,Address,Role,RSSI,State\n";
    let (_, rows) = read_observations(csv.as_bytes(), TimeUnit::Seconds).unwrap();
    let topo = build(&rows);
    assert!(topo.routing_tree.is_empty());
    assert!(topo.adjacency.is_empty());
    assert_eq!(topo.tree_nodes(), vec![NodeId(1)]);
    assert_eq!(topo.adjacency_nodes(), vec![NodeId(1)]);
}

fn assert_dimmed(topo: &Topology, node: NodeId) {
    let cfg = MapConfig::default();
    let tree = topo
        .routing_tree
        .iter()
        .filter(|e| e.source == node || e.address == node)
        .map(|e| &e.style);
    let adj = topo
        .adjacency
        .iter()
        .filter(|e| e.a == node || e.b == node)
        .map(|e| &e.style);
    let styles: Vec<_> = tree.chain(adj).collect();
    assert!(!styles.is_empty(), "no edge touches {node}");
    for s in styles {
        assert!(!s.active, "edge touching {node} drawn active");
        assert_eq!(s.alpha, cfg.inactive_edge_alpha);
        assert_eq!(s.line, cfg.inactive_edge_style);
        assert!(s.label.is_empty());
    }
}

#[test]
fn parent_only_node_edges_are_dimmed() {
    let rows = vec![
        active(0, 10, 1, 4, -60, LinkKind::Neighbor).with_parent(NodeId(3), -50),
        active(1, 10, 4, 1, -60, LinkKind::Neighbor),
    ];
    let topo = build(&rows);
    assert_eq!(topo.node_states[&NodeId(3)], NodeState::Unknown);
    assert!(topo.inactive.contains(&NodeId(3)));

    let e = &topo.routing_tree[0];
    assert_eq!((e.source, e.address), (NodeId(4), NodeId(3)));
    assert_dimmed(&topo, NodeId(3));

    let live: Vec<_> = topo.adjacency.iter().filter(|e| e.key() == EdgeKey(NodeId(1), NodeId(4))).collect();
    assert_eq!(live.len(), 1);
    assert!(live[0].style.active);
}

#[test]
fn unreported_source_edges_are_dimmed() {
    let rows = vec![
        active(0, 10, 2, 1, -40, LinkKind::Parent),
        active(1, 10, 5, 1, -45, LinkKind::Parent),
        active(2, 11, 3, 2, -60, LinkKind::Neighbor),
    ];
    let topo = build(&rows);
    for n in [NodeId(3), NodeId(5)] {
        assert_eq!(topo.node_states[&n], NodeState::Unknown);
        assert_dimmed(&topo, n);
    }
    // 2 is reported by 3, so its next-hop stays live
    let e21 = topo.routing_tree.iter().find(|e| e.source == NodeId(2)).unwrap();
    assert!(e21.style.active);
    assert_eq!(e21.style.label, "-40");
}
