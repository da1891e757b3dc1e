//! benchmark 消息的端到端时延（`benchmark/recv.csv`）

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ingest::{MetricTable, TimeUnit};
use crate::topo::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum DelayError {
    #[error("missing column {0:?}")]
    MissingColumn(&'static str),
    #[error("delay needs numeric timestamps, got unit {0:?}")]
    UnsupportedUnit(TimeUnit),
}

/// 秒，保留两位小数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayStats {
    pub avg: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl DelayStats {
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };
        Some(Self {
            avg: round2(sorted.iter().sum::<f64>() / n as f64),
            median: round2(median),
            min: round2(sorted[0]),
            max: round2(sorted[n - 1]),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairDelay {
    pub source: NodeId,
    pub address: NodeId,
    /// Sender → receiver.
    pub label: String,
    pub stats: DelayStats,
    /// `[SeqId, delay seconds]`
    pub delay: Vec<[f64; 2]>,
    /// `[SeqId, seconds from the first logged message to reception]`
    pub arrival: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayReport {
    pub pairs: Vec<PairDelay>,
    pub aggregate: Option<DelayStats>,
}

struct Sample {
    seq_id: f64,
    delay: f64,
    arrival: f64,
}

/// 按节点对和整体统计时延，`RecvTimestamp - SentTimestamp`。
/// 缺少任一时间戳或 `SeqId` 的行跳过。
#[tracing::instrument(skip_all, fields(rows = table.rows.len()))]
pub fn delay_report(table: &MetricTable) -> Result<DelayReport, DelayError> {
    let scale = match table.unit {
        TimeUnit::Seconds => 1.0,
        TimeUnit::Millis => 0.001,
        TimeUnit::Iso => return Err(DelayError::UnsupportedUnit(table.unit)),
    };
    let col = |name: &'static str| table.column(name).ok_or(DelayError::MissingColumn(name));
    let (sent_idx, recv_idx, seq_idx) = (col("SentTimestamp")?, col("RecvTimestamp")?, col("SeqId")?);
    let start = table
        .rows
        .iter()
        .filter_map(|r| r.timestamp)
        .min()
        .map_or(0.0, |s| s.as_secs_f64());

    let mut groups: BTreeMap<(NodeId, NodeId), Vec<Sample>> = BTreeMap::new();
    for row in &table.rows {
        let (Some(sent), Some(recv), Some(seq_id)) = (row.values[sent_idx], row.values[recv_idx], row.values[seq_idx]) else {
            continue;
        };
        groups.entry((row.source, row.address)).or_default().push(Sample {
            seq_id,
            delay: (recv - sent) * scale,
            arrival: recv * scale - start,
        });
    }

    let all: Vec<f64> = groups.values().flatten().map(|s| s.delay).collect();
    let pairs: Vec<PairDelay> = groups
        .into_iter()
        .filter_map(|((source, address), samples)| {
            let delays: Vec<f64> = samples.iter().map(|s| s.delay).collect();
            let stats = DelayStats::from_samples(&delays)?;
            Some(PairDelay {
                source,
                address,
                label: format!("{address}→{source}"),
                stats,
                delay: samples.iter().map(|s| [s.seq_id, s.delay]).collect(),
                arrival: samples.iter().map(|s| [s.seq_id, s.arrival]).collect(),
            })
        })
        .collect();

    info!(pairs = pairs.len(), samples = all.len(), "时延统计完成");
    Ok(DelayReport {
        pairs,
        aggregate: DelayStats::from_samples(&all),
    })
}
