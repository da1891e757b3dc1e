//! 标识符类型
//!
//! 节点地址与无向边的规范键。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 节点地址（`0` 为保留的无效地址）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Address `0` never names a real node.
    pub const SENTINEL: NodeId = NodeId(0);

    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 无向边键：两个端点按升序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey(pub NodeId, pub NodeId);

impl EdgeKey {
    pub fn new(x: NodeId, y: NodeId) -> Self {
        if x <= y { EdgeKey(x, y) } else { EdgeKey(y, x) }
    }

    /// Whether an edge between `x` and `y` may appear in an output graph.
    pub fn is_valid_pair(x: NodeId, y: NodeId) -> bool {
        !x.is_sentinel() && !y.is_sentinel() && x != y
    }
}
