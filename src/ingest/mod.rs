//! 日志读取模块
//!
//! 此模块负责读取仿真输出的 CSV 日志：表头检查、时间戳单位解析、
//! 纪元零值的前向填充以及相对时间计算。

// 子模块声明
mod cell;
mod error;
mod network;
mod table;
mod time;

// 重新导出公共接口
pub use error::IngestError;
pub use network::{REQUIRED_COLUMNS, Schema, read_observations, read_observations_from_path};
pub use table::{MetricRow, MetricTable, read_table, read_table_from_path};
pub use time::{Stamp, StampError, TimeUnit, forward_fill, parse_stamp, relative_seconds};
