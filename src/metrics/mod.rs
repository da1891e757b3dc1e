//! 指标
//!
//! 为绘图端准备的指标序列与时延统计。

mod delay;
mod series;

pub use delay::{DelayError, DelayReport, DelayStats, PairDelay, delay_report};
pub use series::{MetricPanel, Series, TOTAL_LOST, metric_panels};
