//! CSV 读取共用的单元格解析

use crate::topo::NodeId;

/// 整数单元格，`-40` 和 `-40.0` 都接受
pub(crate) fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 {
        Some(v as i64)
    } else {
        None
    }
}

/// Node address cell; zero-padded text such as `05` is fine.
pub(crate) fn parse_node(raw: &str) -> Option<NodeId> {
    parse_int(raw)
        .and_then(|v| u32::try_from(v).ok())
        .map(NodeId)
}

pub(crate) fn parse_rssi(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Some(v) = parse_int(raw) {
        return i32::try_from(v).ok();
    }
    let v = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(v.round() as i32)
}

pub(crate) fn parse_f64(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
