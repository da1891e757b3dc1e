use serde::{Deserialize, Serialize};

use crate::config::{LineStyle, MapConfig};
use crate::metrics::{DelayReport, MetricPanel};
use crate::topo::{NodeId, NodeState};

/// 图的种类（决定渲染端的标题与画法）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    /// 路由树（有向，每个节点最多一个下一跳）
    NetworkTree,
    /// 邻接图（无向）
    AdjacencyGraph,
    /// 端到端路由路径
    RoutingPath,
    /// 地理位置叠加
    NodePositions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub state: NodeState,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub sink: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizEdge {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rssi: Option<i32>,
    pub line: LineStyle,
    pub alpha: f64,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub kind: GraphKind,
    pub title: String,
    pub directed: bool,
    pub nodes: Vec<VizNode>,
    pub edges: Vec<VizEdge>,
}

/// 拓扑图文档（`network_graph.json`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyDocument {
    pub title: String,
    pub generated_at: String,
    pub sink: NodeId,
    pub config: MapConfig,
    pub graphs: Vec<GraphView>,
}

/// 指标曲线文档（`routing.json` / `mac.json`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsDocument {
    pub title: String,
    pub generated_at: String,
    pub layer: String,
    pub panels: Vec<MetricPanel>,
}

/// 时延文档（`msg_delay.json`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayDocument {
    pub title: String,
    pub generated_at: String,
    pub report: DelayReport,
}
