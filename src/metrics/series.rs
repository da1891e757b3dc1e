//! 路由层和 MAC 层的逐链路指标序列

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ingest::{MetricRow, MetricTable};
use crate::topo::NodeId;

pub const TOTAL_LOST: &str = "TotalLost";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub source: NodeId,
    pub address: NodeId,
    pub label: String,
    /// `[seconds since start, value]`
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPanel {
    pub metric: String,
    pub series: Vec<Series>,
}

/// 接收侧指标由接收方针对发送方上报
fn reversed_label(metric: &str) -> bool {
    let m = metric.to_lowercase();
    m.ends_with("recv") || m.ends_with("latency")
}

fn is_cumulative(metric: &str) -> bool {
    metric.to_lowercase().starts_with("total")
}

fn by_pair(table: &MetricTable) -> BTreeMap<(NodeId, NodeId), Vec<&MetricRow>> {
    let mut groups: BTreeMap<(NodeId, NodeId), Vec<&MetricRow>> = BTreeMap::new();
    for row in &table.rows {
        groups.entry((row.source, row.address)).or_default().push(row);
    }
    groups
}

fn positive_max(values: impl Iterator<Item = f64>) -> bool {
    values.fold(f64::MIN, f64::max) > 0.0
}

/// One panel per metric whose maximum is positive, one series per
/// `(Source, Address)` pair with a positive maximum, pairs in ascending
/// order. `Total*` metrics are plotted as running sums. A `TotalLost` panel
/// is appended when the table has `TotalSent` and `TotalRecv`.
#[tracing::instrument(skip_all, fields(columns = table.columns.len(), rows = table.rows.len()))]
pub fn metric_panels(table: &MetricTable) -> Vec<MetricPanel> {
    let groups = by_pair(table);
    let mut panels = Vec::new();

    for (ci, metric) in table.columns.iter().enumerate() {
        if !positive_max(table.rows.iter().filter_map(|r| r.values[ci])) {
            debug!(metric, "跳过全零指标");
            continue;
        }
        let series: Vec<Series> = groups
            .iter()
            .filter(|(_, rows)| positive_max(rows.iter().filter_map(|r| r.values[ci])))
            .map(|(&(source, address), rows)| {
                let mut acc = 0.0;
                let points = rows
                    .iter()
                    .filter_map(|r| Some([r.time?, r.values[ci]?]))
                    .map(|[t, v]| {
                        if is_cumulative(metric) {
                            acc += v;
                            [t, acc]
                        } else {
                            [t, v]
                        }
                    })
                    .collect();
                let label = if reversed_label(metric) {
                    format!("Node {address} → {source}")
                } else {
                    format!("Node {source} → {address}")
                };
                Series {
                    source,
                    address,
                    label,
                    points,
                }
            })
            .collect();
        if !series.is_empty() {
            panels.push(MetricPanel {
                metric: metric.clone(),
                series,
            });
        }
    }

    if let Some(panel) = lost_panel(table) {
        panels.push(panel);
    }
    panels
}

enum Event {
    Sent(f64),
    Recv(f64),
}

/// Packets sent `s → a` minus packets `a` reports having received from `s`.
fn lost_panel(table: &MetricTable) -> Option<MetricPanel> {
    let sent_idx = table.column("TotalSent")?;
    let recv_idx = table.column("TotalRecv")?;

    let mut events: BTreeMap<(NodeId, NodeId), Vec<(f64, usize, Event)>> = BTreeMap::new();
    for (order, row) in table.rows.iter().enumerate() {
        let Some(t) = row.time else { continue };
        if let Some(v) = row.values[sent_idx] {
            events.entry((row.source, row.address)).or_default().push((t, order, Event::Sent(v)));
        }
        if let Some(v) = row.values[recv_idx] {
            events.entry((row.address, row.source)).or_default().push((t, order, Event::Recv(v)));
        }
    }

    let series: Vec<Series> = events
        .into_iter()
        .filter(|(_, evs)| positive_max(evs.iter().filter_map(|(_, _, e)| match e {
            Event::Sent(v) => Some(*v),
            Event::Recv(_) => None,
        })))
        .filter_map(|((source, address), mut evs)| {
            // Sent before received at the same instant.
            evs.sort_by(|a, b| {
                a.0.total_cmp(&b.0)
                    .then_with(|| matches!(a.2, Event::Recv(_)).cmp(&matches!(b.2, Event::Recv(_))))
                    .then(a.1.cmp(&b.1))
            });
            let (mut sent, mut recv) = (0.0, 0.0);
            let mut points = Vec::new();
            for (t, _, e) in evs {
                match e {
                    Event::Sent(v) => sent += v,
                    Event::Recv(v) => {
                        recv += v;
                        let lost = sent - recv;
                        if sent > 0.0 && lost > -1.0 {
                            points.push([t, lost]);
                        }
                    }
                }
            }
            (!points.is_empty()).then(|| Series {
                source,
                address,
                label: format!("Node {source} → {address}"),
                points,
            })
        })
        .collect();

    (!series.is_empty()).then(|| MetricPanel {
        metric: TOTAL_LOST.to_string(),
        series,
    })
}
