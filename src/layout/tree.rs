//! 路由树的树形布局

use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::Point;
use crate::topo::{DirectedEdge, NodeId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeLayoutOptions {
    /// 兄弟节点的水平间距
    pub spacing: f64,
    /// 层间垂直距离；`rssi_scaled` 时不用
    pub level_gap: f64,
    /// Place each child `rssi` below its parent instead of one level down.
    pub rssi_scaled: bool,
}

impl Default for TreeLayoutOptions {
    fn default() -> Self {
        Self {
            spacing: 5.0,
            level_gap: 1.0,
            rssi_scaled: false,
        }
    }
}

impl TreeLayoutOptions {
    pub fn rssi_scaled() -> Self {
        Self {
            spacing: 1.0,
            level_gap: 1.0,
            rssi_scaled: true,
        }
    }
}

/// 从 `root` 自上而下布局 `edges`
///
/// Children of a node are the nodes whose next-hop it is, in ascending id
/// order, spread symmetrically under their parent. Every node is placed
/// once, so a cycle in the input cannot loop. Nodes the root cannot reach
/// are laid out as further trees to the right: nodes without a next-hop
/// first, then whatever is left (cycle members), each in id order.
pub fn tree_layout(edges: &[DirectedEdge], root: NodeId, opts: &TreeLayoutOptions) -> BTreeMap<NodeId, Point> {
    let mut children: BTreeMap<NodeId, Vec<(NodeId, i32)>> = BTreeMap::new();
    let mut all: BTreeSet<NodeId> = BTreeSet::from([root]);
    let mut has_next_hop: HashSet<NodeId> = HashSet::new();
    for e in edges {
        children.entry(e.address).or_default().push((e.source, e.rssi));
        all.insert(e.source);
        all.insert(e.address);
        has_next_hop.insert(e.source);
    }
    for list in children.values_mut() {
        list.sort_by_key(|(n, _)| *n);
    }

    let mut pos = BTreeMap::new();
    place_subtree(root, Point::new(0.0, 0.0), &children, opts, &mut pos);

    let orphans: Vec<NodeId> = all
        .iter()
        .filter(|n| !has_next_hop.contains(*n))
        .chain(all.iter().filter(|n| has_next_hop.contains(*n)))
        .copied()
        .collect();
    for node in orphans {
        if pos.contains_key(&node) {
            continue;
        }
        let right = pos.values().map(|p: &Point| p.x).fold(f64::MIN, f64::max);
        place_subtree(node, Point::new(right + opts.spacing, 0.0), &children, opts, &mut pos);
    }
    pos
}

fn place_subtree(
    top: NodeId,
    at: Point,
    children: &BTreeMap<NodeId, Vec<(NodeId, i32)>>,
    opts: &TreeLayoutOptions,
    pos: &mut BTreeMap<NodeId, Point>,
) {
    let mut stack = vec![(top, at)];
    while let Some((node, p)) = stack.pop() {
        if pos.contains_key(&node) {
            continue;
        }
        pos.insert(node, p);

        let Some(kids) = children.get(&node) else {
            continue;
        };
        let n = kids.len() as f64;
        for (i, (child, rssi)) in kids.iter().enumerate().rev() {
            if pos.contains_key(child) {
                continue;
            }
            let x = p.x + (i as f64 - (n - 1.0) / 2.0) * opts.spacing;
            let y = if opts.rssi_scaled {
                p.y + f64::from(*rssi)
            } else {
                p.y - opts.level_gap
            };
            stack.push((*child, Point::new(x, y)));
        }
    }
}
