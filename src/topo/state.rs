//! 节点状态
//!
//! 每个地址取最近一次上报的状态。

use std::collections::{BTreeMap, BTreeSet};

use super::id::NodeId;
use super::observation::{NodeState, Observation};

pub type NodeStateMap = BTreeMap<NodeId, NodeState>;

/// 每个地址的最新状态；时间戳相同时保留较早的行。
///
/// 从未作为 address 出现的 source 与 `Parent` 节点也会得到一项（`Unknown`），
/// 保证后续图中的每个节点都有状态。
#[tracing::instrument(skip_all, fields(rows = observations.len()))]
pub fn compute_node_states(observations: &[Observation]) -> NodeStateMap {
    let mut latest: BTreeMap<NodeId, &Observation> = BTreeMap::new();
    for obs in observations {
        if obs.address.is_sentinel() {
            continue;
        }
        latest
            .entry(obs.address)
            .and_modify(|cur| {
                if obs.timestamp > cur.timestamp {
                    *cur = obs;
                }
            })
            .or_insert(obs);
    }

    let mut states: NodeStateMap = latest
        .into_iter()
        .map(|(node, obs)| (node, obs.state))
        .collect();
    // 只作为 source 或 Parent 出现的节点：状态未知
    for obs in observations {
        let named = std::iter::once(obs.source).chain(obs.parent);
        for node in named.filter(|n| !n.is_sentinel()) {
            states.entry(node).or_default();
        }
    }
    tracing::debug!(nodes = states.len(), "节点状态已计算");
    states
}

/// 状态不是 `Active` 的节点
pub fn inactive_nodes(states: &NodeStateMap) -> BTreeSet<NodeId> {
    states
        .iter()
        .filter(|(_, s)| !s.is_active())
        .map(|(n, _)| *n)
        .collect()
}
