//! 布局模块
//!
//! 纯函数：输入边集与根节点，输出节点坐标，不依赖任何全局状态。

mod geo;
mod tree;

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::topo::{DirectedEdge, NodeId};

pub use geo::{geo_layout, load_node_positions, read_node_positions};
pub use tree::{TreeLayoutOptions, tree_layout};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    #[default]
    Circular,
    Tree,
    RssiTree,
}

/// 节点按 id 升序均匀分布在单位圆上，从角度 0 开始；只有一个节点时放在原点。
pub fn circular_layout(nodes: &[NodeId]) -> BTreeMap<NodeId, Point> {
    let mut sorted = nodes.to_vec();
    sorted.sort();
    sorted.dedup();
    if sorted.len() == 1 {
        return BTreeMap::from([(sorted[0], Point::new(0.0, 0.0))]);
    }
    let n = sorted.len() as f64;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, node)| {
            let theta = TAU * i as f64 / n;
            (node, Point::new(theta.cos(), theta.sin()))
        })
        .collect()
}

/// Positions for a routing-tree view.
pub fn layout_tree_view(kind: LayoutKind, edges: &[DirectedEdge], root: NodeId, nodes: &[NodeId]) -> BTreeMap<NodeId, Point> {
    match kind {
        LayoutKind::Circular => circular_layout(nodes),
        LayoutKind::Tree => tree_layout(edges, root, &TreeLayoutOptions::default()),
        LayoutKind::RssiTree => tree_layout(edges, root, &TreeLayoutOptions::rssi_scaled()),
    }
}
