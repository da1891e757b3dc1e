//! 地图绘制配置（`map_config.json`）
//!
//! 所有键都是可选的。缺失或无法解析的键保留默认值，文件中其余的键照常生效。

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// 绘图端认识的线型名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dotted,
    Dashed,
    Dashdot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub active_edge_color: String,
    pub node_color: String,
    pub sink_color: String,
    pub node_size: u32,
    pub font_size: u32,
    pub inactive_edge_color: String,
    pub inactive_edge_style: LineStyle,
    pub active_edge_style: LineStyle,
    pub active_edge_alpha: f64,
    pub inactive_edge_alpha: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            active_edge_color: "k".to_string(),
            node_color: "#1f78b4".to_string(),
            sink_color: "green".to_string(),
            node_size: 1500,
            font_size: 10,
            inactive_edge_color: "gray".to_string(),
            inactive_edge_style: LineStyle::Dotted,
            active_edge_style: LineStyle::Solid,
            active_edge_alpha: 0.9,
            inactive_edge_alpha: 0.2,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config must be a JSON object")]
    NotAnObject,
}

impl MapConfig {
    /// 把 JSON 对象中的键逐个覆盖到默认值上
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Object(map) = value else {
            return Err(ConfigError::NotAnObject);
        };
        let mut cfg = Self::default();
        overlay(&map, "active_edge_color", &mut cfg.active_edge_color);
        overlay(&map, "node_color", &mut cfg.node_color);
        overlay(&map, "sink_color", &mut cfg.sink_color);
        overlay(&map, "node_size", &mut cfg.node_size);
        overlay(&map, "font_size", &mut cfg.font_size);
        overlay(&map, "inactive_edge_color", &mut cfg.inactive_edge_color);
        overlay(&map, "inactive_edge_style", &mut cfg.inactive_edge_style);
        overlay(&map, "active_edge_style", &mut cfg.active_edge_style);
        overlay(&map, "active_edge_alpha", &mut cfg.active_edge_alpha);
        overlay(&map, "inactive_edge_alpha", &mut cfg.inactive_edge_alpha);
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// 不会失败：文件缺失或损坏时返回默认配置
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(cfg) => {
                debug!(path = %path.display(), "加载地图配置");
                cfg
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "读取配置文件失败，使用默认配置");
                Self::default()
            }
        }
    }
}

fn overlay<T: DeserializeOwned>(map: &Map<String, Value>, key: &str, slot: &mut T) {
    let Some(v) = map.get(key) else {
        return;
    };
    match serde_json::from_value::<T>(v.clone()) {
        Ok(parsed) => *slot = parsed,
        Err(e) => warn!(key, error = %e, "配置项无效，保留默认值"),
    }
}
