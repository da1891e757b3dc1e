use std::collections::BTreeSet;

use super::{active, row};
use crate::config::{LineStyle, MapConfig};
use crate::topo::{
    LinkKind, NodeId, NodeState, TieBreak, extract_parent_observations, resolve_adjacency_graph,
    resolve_routing_tree,
};

fn graph(rows: &[crate::topo::Observation]) -> Vec<(u32, u32, i32)> {
    let cfg = MapConfig::default();
    let pool = extract_parent_observations(rows);
    let tree = resolve_routing_tree(&pool, &BTreeSet::new(), &cfg, TieBreak::FirstSeen);
    resolve_adjacency_graph(rows, &tree, &BTreeSet::new(), &cfg, TieBreak::FirstSeen)
        .into_iter()
        .map(|e| (e.a.0, e.b.0, e.rssi))
        .collect()
}

#[test]
fn newest_report_wins_per_pair() {
    let rows = vec![
        active(0, 10, 2, 3, -70, LinkKind::Neighbor),
        active(1, 30, 3, 2, -55, LinkKind::Neighbor),
        active(2, 20, 2, 3, -60, LinkKind::Neighbor),
    ];
    assert_eq!(graph(&rows), vec![(2, 3, -55)]);
}

#[test]
fn routing_edge_rssi_overrides_adjacency_report() {
    let rows = vec![
        active(0, 10, 2, 1, -40, LinkKind::Parent),
        active(1, 50, 1, 2, -80, LinkKind::Neighbor),
    ];
    let cfg = MapConfig::default();
    let pool = extract_parent_observations(&rows);
    let tree = resolve_routing_tree(&pool, &BTreeSet::new(), &cfg, TieBreak::FirstSeen);
    let adj = resolve_adjacency_graph(&rows, &tree, &BTreeSet::new(), &cfg, TieBreak::FirstSeen);

    assert_eq!(adj.len(), 1);
    assert_eq!(adj[0].rssi, -40);
    assert_eq!(adj[0].style.line, LineStyle::Solid);
}

#[test]
fn plain_links_are_drawn_with_the_undirected_style() {
    let rows = vec![active(0, 10, 2, 3, -60, LinkKind::Neighbor)];
    let cfg = MapConfig::default();
    let adj = resolve_adjacency_graph(&rows, &[], &BTreeSet::new(), &cfg, TieBreak::FirstSeen);
    assert_eq!(adj[0].style.line, cfg.inactive_edge_style);
    assert_eq!(adj[0].style.alpha, cfg.active_edge_alpha);
    assert_eq!(adj[0].style.label, "-60");
}

#[test]
fn indirect_parent_pairs_join_the_graph() {
    let rows = vec![active(0, 10, 4, 9, -70, LinkKind::Neighbor).with_parent(NodeId(3), -50)];
    let cfg = MapConfig::default();
    let adj = resolve_adjacency_graph(&rows, &[], &BTreeSet::new(), &cfg, TieBreak::FirstSeen);
    let pairs: Vec<(u32, u32, i32)> = adj.iter().map(|e| (e.a.0, e.b.0, e.rssi)).collect();
    assert_eq!(pairs, vec![(3, 9, -50), (4, 9, -70)]);
}

#[test]
fn unknown_rows_and_sentinel_are_excluded() {
    let rows = vec![
        row(0, 10, 5, 6, -40, NodeState::Unknown, LinkKind::Neighbor),
        active(1, 10, 2, 0, -40, LinkKind::Neighbor),
        active(2, 10, 2, 2, -40, LinkKind::Neighbor),
    ];
    assert!(graph(&rows).is_empty());
}

#[test]
fn edges_come_out_in_key_order() {
    let rows = vec![
        active(0, 10, 9, 4, -60, LinkKind::Neighbor),
        active(1, 10, 3, 2, -60, LinkKind::Neighbor),
        active(2, 10, 5, 2, -60, LinkKind::Neighbor),
    ];
    assert_eq!(graph(&rows), vec![(2, 3, -60), (2, 5, -60), (4, 9, -60)]);
}
