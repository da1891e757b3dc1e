mod adjacency_graph;
mod log_ingest;
mod map_config;
mod msg_delay;
mod topology_builder;

use crate::ingest::Stamp;
use crate::topo::{LinkKind, NodeId, NodeState, Observation};

/// One network.csv row; `t` in seconds, `seq` is the row index.
pub(crate) fn row(seq: usize, t: i64, src: u32, addr: u32, rssi: i32, state: NodeState, link: LinkKind) -> Observation {
    Observation::new(seq, Some(Stamp::from_secs(t)), NodeId(src), NodeId(addr), rssi, state).with_link(link)
}

pub(crate) fn active(seq: usize, t: i64, src: u32, addr: u32, rssi: i32, link: LinkKind) -> Observation {
    row(seq, t, src, addr, rssi, NodeState::Active, link)
}
