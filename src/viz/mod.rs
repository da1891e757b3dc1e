//! 可视化文档（用于离线渲染）
//!
//! 设计目标：
//! - **结构化**：输出 JSON 文档而不是直接画图
//! - **轻量**：渲染端（HTML/绘图脚本）只负责画，不再做任何去重或推断
//! - **可复现**：同一输入得到同样的节点、边和样式顺序

mod graph;
mod types;

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

pub use graph::{adjacency_view, geo_view, path_view, tree_view};
pub use types::{DelayDocument, GraphKind, GraphView, MetricsDocument, TopologyDocument, VizEdge, VizNode};

#[derive(Debug, thiserror::Error)]
pub enum VizError {
    #[error("write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("serialize: {0}")]
    Json(#[from] serde_json::Error),
}

/// 以格式化 JSON 写出 `doc`，必要时创建父目录
pub fn write_json<T: Serialize>(path: &Path, doc: &T) -> Result<(), VizError> {
    let io_err = |source: std::io::Error| VizError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let raw = serde_json::to_string_pretty(doc)?;
    fs::write(path, raw).map_err(io_err)?;
    info!(path = %path.display(), "可视化文档已写出");
    Ok(())
}
