//! 指标表（`routing.csv`、`mac.csv`、`benchmark/recv.csv`）
//!
//! `Timestamp, Source, Address` are required; every other column except
//! `Path` and `RelativeTime` is a numeric metric. Cells that do not parse as
//! numbers are treated as missing.

use std::cmp::Ordering;
use std::fs::File;
use std::io;
use std::path::Path;

use csv::Trim;
use tracing::info;

use super::cell::{parse_f64, parse_node};
use super::error::IngestError;
use super::time::{Stamp, TimeUnit, forward_fill, parse_stamp, relative_seconds};
use crate::topo::{NodeId, PathRow};

const META_COLUMNS: [&str; 5] = ["Timestamp", "Source", "Address", "Path", "RelativeTime"];

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub timestamp: Option<Stamp>,
    /// 相对表中最早时间戳的秒数
    pub time: Option<f64>,
    pub source: NodeId,
    pub address: NodeId,
    /// One entry per [`MetricTable::columns`].
    pub values: Vec<Option<f64>>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable {
    pub unit: TimeUnit,
    /// Metric column names in header order.
    pub columns: Vec<String>,
    /// 按 `time` 排序，没有时间的行排在最后
    pub rows: Vec<MetricRow>,
}

impl MetricTable {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_paths(&self) -> bool {
        self.rows.iter().any(|r| r.path.is_some())
    }

    pub fn path_rows(&self) -> Vec<PathRow> {
        self.rows
            .iter()
            .filter_map(|r| {
                r.path.as_ref().map(|p| PathRow {
                    time: r.time,
                    source: r.source,
                    address: r.address,
                    path: p.clone(),
                })
            })
            .collect()
    }
}

fn by_time(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[tracing::instrument(skip_all, fields(unit = ?unit))]
pub fn read_table<R: io::Read>(reader: R, unit: TimeUnit) -> Result<MetricTable, IngestError> {
    let mut rdr = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let find = |name: &'static str| headers.iter().position(|h| h == name).ok_or(IngestError::MissingColumn(name));
    let (ts_idx, src_idx, addr_idx) = (find("Timestamp")?, find("Source")?, find("Address")?);
    let path_idx = headers.iter().position(|h| h == "Path");
    let metric_idx: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !META_COLUMNS.contains(h))
        .map(|(i, _)| i)
        .collect();

    let mut rows = Vec::new();
    let mut stamps = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let cell = |i: usize| record.get(i).unwrap_or("").trim();
        let node = |i: usize, column: &'static str| {
            parse_node(cell(i)).ok_or_else(|| IngestError::InvalidValue {
                line,
                column,
                value: cell(i).to_string(),
            })
        };

        let stamp = parse_stamp(cell(ts_idx), unit).map_err(|source| IngestError::Timestamp { line, source })?;
        stamps.push(stamp);
        rows.push(MetricRow {
            timestamp: stamp,
            time: None,
            source: node(src_idx, "Source")?,
            address: node(addr_idx, "Address")?,
            values: metric_idx.iter().map(|&i| parse_f64(cell(i))).collect(),
            path: path_idx.map(cell).filter(|p| !p.is_empty()).map(str::to_string),
        });
    }

    forward_fill(&mut stamps);
    for (row, (stamp, time)) in rows.iter_mut().zip(stamps.iter().zip(relative_seconds(&stamps))) {
        row.timestamp = *stamp;
        row.time = time;
    }
    rows.sort_by(|a, b| by_time(a.time, b.time));

    let columns = metric_idx.iter().map(|&i| headers[i].to_string()).collect();
    info!(rows = rows.len(), "指标表已读取");
    Ok(MetricTable { unit, columns, rows })
}

pub fn read_table_from_path(path: &Path, unit: TimeUnit) -> Result<MetricTable, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(file, unit)
}
