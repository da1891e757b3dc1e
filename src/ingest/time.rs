//! 日志时间戳类型
//!
//! 定义日志时间戳及其单位解析、前向填充与相对时间。

use chrono::{DateTime, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 日志时间戳（自 Unix 纪元起的毫秒数）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stamp(pub i64);

impl Stamp {
    pub const EPOCH: Stamp = Stamp(0);
    pub fn from_millis(ms: i64) -> Stamp {
        Stamp(ms)
    }
    pub fn from_secs(s: i64) -> Stamp {
        Stamp(s.saturating_mul(1_000))
    }
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000.0
    }
}

/// `Timestamp` 列的编码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    /// Integer or decimal seconds since the epoch.
    #[default]
    Seconds,
    /// Integer or decimal milliseconds since the epoch.
    Millis,
    /// ISO-8601 / RFC 3339 datetime text, interpreted as UTC when no offset is given.
    Iso,
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unparseable timestamp {raw:?} for unit {unit:?}")]
pub struct StampError {
    pub raw: String,
    pub unit: TimeUnit,
}

/// 解析一个时间戳单元格
///
/// 空单元格与纪元零值（节点时钟尚未同步时日志写出的值）返回 `Ok(None)`。
pub fn parse_stamp(raw: &str, unit: TimeUnit) -> Result<Option<Stamp>, StampError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let parsed = match unit {
        TimeUnit::Seconds => numeric(raw, Stamp::from_secs, 1_000.0),
        TimeUnit::Millis => numeric(raw, Stamp::from_millis, 1.0),
        TimeUnit::Iso => parse_iso(raw),
    };
    let stamp = parsed.ok_or_else(|| StampError {
        raw: raw.to_string(),
        unit,
    })?;
    if stamp == Stamp::EPOCH {
        return Ok(None);
    }
    Ok(Some(stamp))
}

/// 整数走单位构造函数；小数按 `millis_per_unit` 换算后取整到毫秒
fn numeric(raw: &str, from_int: fn(i64) -> Stamp, millis_per_unit: f64) -> Option<Stamp> {
    if let Ok(v) = raw.parse::<i64>() {
        return Some(from_int(v));
    }
    let v = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(Stamp::from_millis((v * millis_per_unit).round() as i64))
}

fn parse_iso(raw: &str) -> Option<Stamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Stamp::from_millis(dt.timestamp_millis()));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| Stamp::from_millis(dt.and_utc().timestamp_millis()))
}

/// 前向填充：缺失值取上一个有效值，开头的缺失保持 `None`
pub fn forward_fill(stamps: &mut [Option<Stamp>]) {
    let mut last = None;
    for s in stamps.iter_mut() {
        if s.is_some() {
            last = *s;
        } else {
            *s = last;
        }
    }
}

/// 相对最早时间戳的秒数；`None` 保持 `None`
pub fn relative_seconds(stamps: &[Option<Stamp>]) -> Vec<Option<f64>> {
    let Some(min) = stamps.iter().flatten().min().copied() else {
        return vec![None; stamps.len()];
    };
    stamps
        .iter()
        .map(|s| s.map(|v| Stamp(v.0 - min.0).as_secs_f64()))
        .collect()
}
