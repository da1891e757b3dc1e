//! 路由树重建
//!
//! 每个节点最多一个下一跳：先只保留各 source 最新时刻的候选，
//! 再按无向键去重（同一条物理链路从两端观测到时合并），
//! 最后保证每个 source 只剩一条出边。

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::candidates::Candidate;
use super::id::{EdgeKey, NodeId};
use super::style::{EdgeStyle, style_edge};
use crate::config::MapConfig;
use crate::ingest::Stamp;

/// 同一时间戳的多行只能留一行时的取舍规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The row that comes first in input (merge) order wins.
    #[default]
    FirstSeen,
    /// The row that comes last in input (merge) order wins.
    LastSeen,
}

impl TieBreak {
    /// Newest first; equal timestamps ordered by `seq` according to the policy.
    pub fn newest_first(self, a: (Option<Stamp>, usize), b: (Option<Stamp>, usize)) -> Ordering {
        b.0.cmp(&a.0).then_with(|| match self {
            TieBreak::FirstSeen => a.1.cmp(&b.1),
            TieBreak::LastSeen => b.1.cmp(&a.1),
        })
    }
}

/// `source`'s current next-hop is `address`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectedEdge {
    pub source: NodeId,
    pub address: NodeId,
    pub rssi: i32,
    pub timestamp: Option<Stamp>,
    pub style: EdgeStyle,
}

impl DirectedEdge {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source, self.address)
    }
}

/// 把候选池解析成路由树，按边键排序
#[tracing::instrument(skip_all, fields(candidates = pool.len(), tie_break = ?tie))]
pub fn resolve_routing_tree(
    pool: &[Candidate],
    inactive: &BTreeSet<NodeId>,
    cfg: &MapConfig,
    tie: TieBreak,
) -> Vec<DirectedEdge> {
    let mut newest: HashMap<NodeId, Option<Stamp>> = HashMap::new();
    for c in pool {
        newest
            .entry(c.source)
            .and_modify(|t| {
                if c.timestamp > *t {
                    *t = c.timestamp;
                }
            })
            .or_insert(c.timestamp);
    }

    // Older reports for a source are stale once it has reported something newer.
    let mut fresh: Vec<&Candidate> = pool
        .iter()
        .filter(|c| newest.get(&c.source) == Some(&c.timestamp))
        .collect();
    fresh.sort_by(|x, y| tie.newest_first((x.timestamp, x.merge_seq), (y.timestamp, y.merge_seq)));

    let mut seen_keys = HashSet::new();
    let by_key: Vec<&Candidate> = fresh
        .into_iter()
        .filter(|c| seen_keys.insert(c.key()))
        .collect();

    let mut seen_sources = HashSet::new();
    let mut edges: Vec<DirectedEdge> = by_key
        .into_iter()
        .filter(|c| {
            let first = seen_sources.insert(c.source);
            if !first {
                debug!(source = %c.source, address = %c.address, "丢弃同一时刻的第二个下一跳");
            }
            first
        })
        .map(|c| DirectedEdge {
            source: c.source,
            address: c.address,
            rssi: c.rssi,
            timestamp: c.timestamp,
            style: style_edge(c.source, c.address, c.rssi, true, inactive, cfg),
        })
        .collect();
    edges.sort_by_key(|e| e.key());

    info!(edges = edges.len(), "路由树已重建");
    edges
}
