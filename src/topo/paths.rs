//! 端到端上报的路由路径（`Path` 列，例如 `"1-4-7"`）。

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::adjacency::UndirectedEdge;
use super::id::{EdgeKey, NodeId};

/// 带路径的一行路由表
#[derive(Debug, Clone, PartialEq)]
pub struct PathRow {
    /// 相对日志开始的秒数
    pub time: Option<f64>,
    pub source: NodeId,
    pub address: NodeId,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// RSSI of the hop from the adjacency graph, empty when unknown.
    pub label: String,
}

fn parse_hops(path: &str) -> Option<Vec<NodeId>> {
    path.split('-')
        .map(|tok| tok.trim().parse::<u32>().ok().map(NodeId))
        .collect()
}

/// 每个 `(Source, Address)` 取最新路径拆成的各跳；同一跳只保留第一次出现。
#[tracing::instrument(skip_all, fields(rows = rows.len()))]
pub fn resolve_path_graph(rows: &[PathRow], adjacency: &[UndirectedEdge]) -> Vec<PathEdge> {
    let mut newest: BTreeMap<(NodeId, NodeId), (usize, &PathRow)> = BTreeMap::new();
    for (idx, row) in rows.iter().enumerate() {
        if row.path.trim().is_empty() {
            continue;
        }
        let newer = |cur: &PathRow| match (row.time, cur.time) {
            (Some(t), Some(c)) => t > c,
            (Some(_), None) => true,
            _ => false,
        };
        newest
            .entry((row.source, row.address))
            .and_modify(|cur| {
                if newer(cur.1) {
                    *cur = (idx, row);
                }
            })
            .or_insert((idx, row));
    }

    let mut latest: Vec<(usize, &PathRow)> = newest.into_values().collect();
    latest.sort_by(|(ia, a), (ib, b)| {
        b.time
            .partial_cmp(&a.time)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(ia.cmp(ib))
    });

    let rssi: HashMap<EdgeKey, i32> = adjacency.iter().map(|e| (e.key(), e.rssi)).collect();
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for (_, row) in latest {
        let Some(hops) = parse_hops(&row.path) else {
            warn!(path = %row.path, source = %row.source, "无法解析的路径，跳过");
            continue;
        };
        for pair in hops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if !EdgeKey::is_valid_pair(from, to) || !seen.insert((from, to)) {
                continue;
            }
            let label = rssi
                .get(&EdgeKey::new(from, to))
                .map(|r| r.to_string())
                .unwrap_or_default();
            edges.push(PathEdge { from, to, label });
        }
    }
    info!(edges = edges.len(), "路由路径图已构建");
    edges
}
