//! 两张图共用的边样式

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::id::NodeId;
use crate::config::{LineStyle, MapConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub line: LineStyle,
    pub alpha: f64,
    /// 存活链路显示 RSSI，否则为空
    pub label: String,
    pub active: bool,
}

/// Styles the edge `a`–`b`.
///
/// An edge touching an inactive node is dimmed and unlabeled no matter how
/// good its RSSI is. Live undirected edges keep the inactive line style so
/// that only routing edges are drawn solid.
pub fn style_edge(
    a: NodeId,
    b: NodeId,
    rssi: i32,
    directed: bool,
    inactive: &BTreeSet<NodeId>,
    cfg: &MapConfig,
) -> EdgeStyle {
    let is_inactive = inactive.contains(&a) || inactive.contains(&b);
    if is_inactive {
        return EdgeStyle {
            line: cfg.inactive_edge_style,
            alpha: cfg.inactive_edge_alpha,
            label: String::new(),
            active: false,
        };
    }
    EdgeStyle {
        line: if directed {
            cfg.active_edge_style
        } else {
            cfg.inactive_edge_style
        },
        alpha: cfg.active_edge_alpha,
        label: rssi.to_string(),
        active: true,
    }
}
