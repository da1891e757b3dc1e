//! 邻接图
//!
//! 当前可观测到的所有链路，每对节点一条边。

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::id::{EdgeKey, NodeId};
use super::observation::{NodeState, Observation};
use super::routing::{DirectedEdge, TieBreak};
use super::style::{EdgeStyle, style_edge};
use crate::config::MapConfig;
use crate::ingest::Stamp;

/// 无向链路，`a < b`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndirectedEdge {
    pub a: NodeId,
    pub b: NodeId,
    pub rssi: i32,
    pub timestamp: Option<Stamp>,
    pub style: EdgeStyle,
}

impl UndirectedEdge {
    pub fn key(&self) -> EdgeKey {
        EdgeKey(self.a, self.b)
    }
}

struct Link {
    key: EdgeKey,
    timestamp: Option<Stamp>,
    rssi: i32,
    seq: usize,
}

/// 由所有已知状态的上报和间接 `Parent` 节点对构建邻接图。
///
/// 路由树也覆盖的节点对直接沿用路由边，RSSI 以它为准并保留路由样式；
/// 其他节点对保留最近一次上报。
#[tracing::instrument(skip_all, fields(rows = observations.len(), tree_edges = routing_tree.len()))]
pub fn resolve_adjacency_graph(
    observations: &[Observation],
    routing_tree: &[DirectedEdge],
    inactive: &BTreeSet<NodeId>,
    cfg: &MapConfig,
    tie: TieBreak,
) -> Vec<UndirectedEdge> {
    let known: Vec<&Observation> = observations
        .iter()
        .filter(|o| o.state != NodeState::Unknown)
        .collect();

    let mut links: Vec<Link> = known
        .iter()
        .map(|o| (o.timestamp, o.source, o.address, o.rssi))
        .chain(known.iter().filter_map(|o| match (o.parent, o.parent_rssi) {
            (Some(p), Some(rssi)) => Some((o.timestamp, o.address, p, rssi)),
            _ => None,
        }))
        .filter(|(_, x, y, _)| EdgeKey::is_valid_pair(*x, *y))
        .enumerate()
        .map(|(seq, (timestamp, x, y, rssi))| Link {
            key: EdgeKey::new(x, y),
            timestamp,
            rssi,
            seq,
        })
        .collect();
    links.sort_by(|x, y| tie.newest_first((x.timestamp, x.seq), (y.timestamp, y.seq)));

    let mut graph: BTreeMap<EdgeKey, UndirectedEdge> = routing_tree
        .iter()
        .map(|e| {
            let key = e.key();
            let edge = UndirectedEdge {
                a: key.0,
                b: key.1,
                rssi: e.rssi,
                timestamp: e.timestamp,
                style: e.style.clone(),
            };
            (key, edge)
        })
        .collect();

    for link in links {
        graph.entry(link.key).or_insert_with(|| UndirectedEdge {
            a: link.key.0,
            b: link.key.1,
            rssi: link.rssi,
            timestamp: link.timestamp,
            style: style_edge(link.key.0, link.key.1, link.rssi, false, inactive, cfg),
        });
    }

    info!(edges = graph.len(), "邻接图已构建");
    graph.into_values().collect()
}
