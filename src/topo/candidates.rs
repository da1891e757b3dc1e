//! 父节点边候选
//!
//! The loggers describe the same next-hop relation in several ways: a node
//! naming its parent, a parent naming its child, a node carrying a
//! `Parent`/`ParentRSSI` pair, or a link marked bidirectional. All of them
//! are brought into one `source → address` shape here.

use tracing::debug;

use super::id::{EdgeKey, NodeId};
use super::observation::{LinkKind, NodeState, Observation};
use crate::ingest::Stamp;

/// 候选来自哪种编码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    DirectParent,
    DirectChild,
    IndirectParent,
    Bidirectional,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub timestamp: Option<Stamp>,
    pub source: NodeId,
    pub address: NodeId,
    pub rssi: i32,
    /// 在合并后候选池中的位置
    pub merge_seq: usize,
    pub origin: CandidateOrigin,
}

impl Candidate {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source, self.address)
    }
}

/// Builds the candidate pool in merge order: direct parents, swapped
/// children, indirect parents, then bidirectional links and their mirrors.
/// Rows in `Unknown` state never contribute.
#[tracing::instrument(skip_all, fields(rows = observations.len()))]
pub fn extract_parent_observations(observations: &[Observation]) -> Vec<Candidate> {
    let known = || observations.iter().filter(|o| o.state != NodeState::Unknown);
    let mut raw: Vec<(Option<Stamp>, NodeId, NodeId, i32, CandidateOrigin)> = Vec::new();

    raw.extend(
        known()
            .filter(|o| o.link == LinkKind::Parent)
            .map(|o| (o.timestamp, o.source, o.address, o.rssi, CandidateOrigin::DirectParent)),
    );
    raw.extend(
        known()
            .filter(|o| o.link == LinkKind::Child)
            .map(|o| (o.timestamp, o.address, o.source, o.rssi, CandidateOrigin::DirectChild)),
    );
    raw.extend(known().filter_map(|o| match (o.parent, o.parent_rssi) {
        (Some(parent), Some(rssi)) => Some((o.timestamp, o.address, parent, rssi, CandidateOrigin::IndirectParent)),
        _ => None,
    }));
    let bidir: Vec<&Observation> = known().filter(|o| o.link == LinkKind::Bidirectional).collect();
    raw.extend(
        bidir
            .iter()
            .map(|o| (o.timestamp, o.source, o.address, o.rssi, CandidateOrigin::Bidirectional)),
    );
    raw.extend(
        bidir
            .iter()
            .map(|o| (o.timestamp, o.address, o.source, o.rssi, CandidateOrigin::Bidirectional)),
    );

    let total = raw.len();
    let pool: Vec<Candidate> = raw
        .into_iter()
        .filter(|(_, s, a, _, _)| EdgeKey::is_valid_pair(*s, *a))
        .enumerate()
        .map(|(merge_seq, (timestamp, source, address, rssi, origin))| Candidate {
            timestamp,
            source,
            address,
            rssi,
            merge_seq,
            origin,
        })
        .collect();
    debug!(candidates = pool.len(), dropped = total - pool.len(), "父节点候选已提取");
    pool
}
