//! 网络日志中的一行

use serde::{Deserialize, Serialize};

use super::id::NodeId;
use crate::ingest::Stamp;

/// 上报的节点存活状态；整数编码与日志程序写出的一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    #[default]
    Unknown,
    Inactive,
    Active,
}

impl NodeState {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Unknown),
            0 => Some(Self::Inactive),
            1 => Some(Self::Active),
            _ => None,
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

/// `source` 上报的它与 `address` 之间的关系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// 普通邻居（`Role = NODE`，`LinkType = IDLE`）
    #[default]
    Neighbor,
    /// `address` 是 `source` 的子节点（`Role = CHILD`，`LinkType = INBOUND`）
    Child,
    /// `address` 是 `source` 的下一跳（`Role = NEXTHOP`，`LinkType = OUTBOUND`）
    Parent,
    /// 双向流量（`LinkType = INOUTBOUND`）
    Bidirectional,
}

impl LinkKind {
    /// 解码 STRP 日志的 `Role` 列
    pub fn from_role(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Neighbor),
            1 => Some(Self::Child),
            2 => Some(Self::Parent),
            _ => None,
        }
    }

    /// Decodes the `LinkType` column used by the generic routing monitor.
    pub fn from_link_type(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Neighbor),
            1 => Some(Self::Child),
            2 => Some(Self::Parent),
            3 => Some(Self::Bidirectional),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// 在输入中的位置，所有稳定排序都靠它打破平局
    pub seq: usize,
    /// 只有前面没有行可以补齐时才为 `None`；排序时视为最旧。
    pub timestamp: Option<Stamp>,
    pub source: NodeId,
    pub address: NodeId,
    pub rssi: i32,
    pub state: NodeState,
    pub link: LinkKind,
    pub parent: Option<NodeId>,
    pub parent_rssi: Option<i32>,
}

impl Observation {
    /// Bare neighbor report; the builder-style setters below fill the rest.
    pub fn new(seq: usize, timestamp: Option<Stamp>, source: NodeId, address: NodeId, rssi: i32, state: NodeState) -> Self {
        Self {
            seq,
            timestamp,
            source,
            address,
            rssi,
            state,
            link: LinkKind::Neighbor,
            parent: None,
            parent_rssi: None,
        }
    }

    pub fn with_link(mut self, link: LinkKind) -> Self {
        self.link = link;
        self
    }

    pub fn with_parent(mut self, parent: NodeId, parent_rssi: i32) -> Self {
        self.parent = Some(parent);
        self.parent_rssi = Some(parent_rssi);
        self
    }
}
