//! 拓扑重建模块
//!
//! 把带噪声、重复、按时间排列的观测记录（谁能听到谁、谁是谁的父节点）
//! 归并为一棵有向路由树和一张无向邻接图。

// 子模块声明
mod id;
mod observation;
mod state;
mod style;
mod candidates;
mod routing;
mod adjacency;
mod paths;
mod builder;

// 重新导出公共接口
pub use id::{EdgeKey, NodeId};
pub use observation::{LinkKind, NodeState, Observation};
pub use state::{NodeStateMap, compute_node_states, inactive_nodes};
pub use style::{EdgeStyle, style_edge};
pub use candidates::{Candidate, CandidateOrigin, extract_parent_observations};
pub use routing::{DirectedEdge, TieBreak, resolve_routing_tree};
pub use adjacency::{UndirectedEdge, resolve_adjacency_graph};
pub use paths::{PathEdge, PathRow, resolve_path_graph};
pub use builder::{Topology, TopologyBuilder};
