use std::collections::BTreeSet;

use tracing::info;

use super::adjacency::{UndirectedEdge, resolve_adjacency_graph};
use super::candidates::extract_parent_observations;
use super::id::NodeId;
use super::observation::Observation;
use super::routing::{DirectedEdge, TieBreak, resolve_routing_tree};
use super::state::{NodeStateMap, compute_node_states, inactive_nodes};
use crate::config::MapConfig;

/// 由一批网络观测推导出的全部结果
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    pub sink: NodeId,
    pub node_states: NodeStateMap,
    pub inactive: BTreeSet<NodeId>,
    pub routing_tree: Vec<DirectedEdge>,
    pub adjacency: Vec<UndirectedEdge>,
}

impl Topology {
    /// sink 加上路由树的所有端点，升序
    pub fn tree_nodes(&self) -> Vec<NodeId> {
        let mut nodes = BTreeSet::from([self.sink]);
        for e in &self.routing_tree {
            nodes.insert(e.source);
            nodes.insert(e.address);
        }
        nodes.into_iter().collect()
    }

    /// sink 加上邻接图的所有端点，升序
    pub fn adjacency_nodes(&self) -> Vec<NodeId> {
        let mut nodes = BTreeSet::from([self.sink]);
        for e in &self.adjacency {
            nodes.insert(e.a);
            nodes.insert(e.b);
        }
        nodes.into_iter().collect()
    }

    /// True when every source in the routing tree has exactly one next-hop.
    pub fn has_single_next_hops(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.routing_tree.iter().all(|e| seen.insert(e.source))
    }
}

/// Derives the node states, routing tree and adjacency graph for one sink.
#[derive(Debug, Clone)]
pub struct TopologyBuilder {
    sink: NodeId,
    cfg: MapConfig,
    tie: TieBreak,
}

impl TopologyBuilder {
    pub fn new(sink: NodeId, cfg: &MapConfig) -> Self {
        Self {
            sink,
            cfg: cfg.clone(),
            tie: TieBreak::default(),
        }
    }

    pub fn with_tie_break(mut self, tie: TieBreak) -> Self {
        self.tie = tie;
        self
    }

    #[tracing::instrument(skip_all, fields(sink = %self.sink, rows = observations.len()))]
    pub fn build(&self, observations: &[Observation]) -> Topology {
        let node_states = compute_node_states(observations);
        let inactive = inactive_nodes(&node_states);

        let pool = extract_parent_observations(observations);
        let routing_tree = resolve_routing_tree(&pool, &inactive, &self.cfg, self.tie);
        let adjacency =
            resolve_adjacency_graph(observations, &routing_tree, &inactive, &self.cfg, self.tie);

        info!(
            nodes = node_states.len(),
            inactive = inactive.len(),
            tree_edges = routing_tree.len(),
            adjacency_edges = adjacency.len(),
            "拓扑已重建"
        );
        Topology {
            sink: self.sink,
            node_states,
            inactive,
            routing_tree,
            adjacency,
        }
    }
}
