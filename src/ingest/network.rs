//! `network.csv` 读取
//!
//! 按列名匹配，顺序任意。`Timestamp, Source, Address, RSSI, State` 必须存在；
//! `Role`、`LinkType` 以及 `Parent`/`ParentRSSI` 是可选列，多余的列忽略。

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{StringRecord, Trim};
use tracing::{debug, info};

use super::cell::{parse_int, parse_node, parse_rssi};
use super::error::IngestError;
use super::time::{Stamp, TimeUnit, forward_fill, parse_stamp};
use crate::topo::{LinkKind, NodeState, Observation};

pub const REQUIRED_COLUMNS: [&str; 5] = ["Timestamp", "Source", "Address", "RSSI", "State"];

const ROLE_NAMES: [(&str, LinkKind); 4] = [
    ("NODE", LinkKind::Neighbor),
    ("CHILD", LinkKind::Child),
    ("PARENT", LinkKind::Parent),
    ("NEXTHOP", LinkKind::Parent),
];

const LINK_TYPE_NAMES: [(&str, LinkKind); 4] = [
    ("IDLE", LinkKind::Neighbor),
    ("INBOUND", LinkKind::Child),
    ("OUTBOUND", LinkKind::Parent),
    ("INOUTBOUND", LinkKind::Bidirectional),
];

const STATE_NAMES: [(&str, NodeState); 3] = [
    ("UNKNOWN", NodeState::Unknown),
    ("INACTIVE", NodeState::Inactive),
    ("ACTIVE", NodeState::Active),
];

/// 表头中出现的可选编码
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub role: bool,
    pub link_type: bool,
    /// Both `Parent` and `ParentRSSI` exist.
    pub parent: bool,
}

struct Columns {
    timestamp: usize,
    source: usize,
    address: usize,
    rssi: usize,
    state: usize,
    role: Option<usize>,
    link_type: Option<usize>,
    parent: Option<(usize, usize)>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, IngestError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &'static str| find(name).ok_or(IngestError::MissingColumn(name));
        Ok(Self {
            timestamp: required(REQUIRED_COLUMNS[0])?,
            source: required(REQUIRED_COLUMNS[1])?,
            address: required(REQUIRED_COLUMNS[2])?,
            rssi: required(REQUIRED_COLUMNS[3])?,
            state: required(REQUIRED_COLUMNS[4])?,
            role: find("Role"),
            link_type: find("LinkType"),
            parent: find("Parent").zip(find("ParentRSSI")),
        })
    }

    fn schema(&self) -> Schema {
        Schema {
            role: self.role.is_some(),
            link_type: self.link_type.is_some(),
            parent: self.parent.is_some(),
        }
    }
}

fn decode<T: Copy>(raw: &str, from_code: fn(i64) -> Option<T>, names: &[(&str, T)]) -> Option<T> {
    if let Some(code) = parse_int(raw) {
        return from_code(code);
    }
    names
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(raw.trim()))
        .map(|(_, v)| *v)
}

struct Row<'a> {
    record: &'a StringRecord,
    line: u64,
}

impl<'a> Row<'a> {
    fn cell(&self, idx: usize) -> &'a str {
        self.record.get(idx).unwrap_or("").trim()
    }

    fn invalid(&self, column: &'static str, idx: usize) -> IngestError {
        IngestError::InvalidValue {
            line: self.line,
            column,
            value: self.cell(idx).to_string(),
        }
    }

    fn required<T>(&self, column: &'static str, idx: usize, parse: impl Fn(&str) -> Option<T>) -> Result<T, IngestError> {
        parse(self.cell(idx)).ok_or_else(|| self.invalid(column, idx))
    }

    /// Empty cell → `None`; anything else must parse.
    fn optional<T>(&self, column: &'static str, idx: Option<usize>, parse: impl Fn(&str) -> Option<T>) -> Result<Option<T>, IngestError> {
        match idx {
            Some(i) if !self.cell(i).is_empty() => parse(self.cell(i)).map(Some).ok_or_else(|| self.invalid(column, i)),
            _ => Ok(None),
        }
    }
}

/// 读取网络日志的每一行；缺失或为零的时间戳用上一行补齐。
#[tracing::instrument(skip_all, fields(unit = ?unit))]
pub fn read_observations<R: io::Read>(reader: R, unit: TimeUnit) -> Result<(Schema, Vec<Observation>), IngestError> {
    let mut rdr = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let cols = Columns::from_headers(rdr.headers()?)?;
    let schema = cols.schema();
    debug!(?schema, "网络日志表头已解析");

    let mut stamps: Vec<Option<Stamp>> = Vec::new();
    let mut observations = Vec::new();
    for (seq, record) in rdr.records().enumerate() {
        let record = record?;
        let row = Row {
            record: &record,
            line: record.position().map_or(0, |p| p.line()),
        };

        let stamp = parse_stamp(row.cell(cols.timestamp), unit).map_err(|source| IngestError::Timestamp { line: row.line, source })?;
        let source = row.required("Source", cols.source, parse_node)?;
        let address = row.required("Address", cols.address, parse_node)?;
        let rssi = row.required("RSSI", cols.rssi, parse_rssi)?;
        let state = row.required("State", cols.state, |c| decode(c, NodeState::from_code, &STATE_NAMES))?;
        let role = row.optional("Role", cols.role, |c| decode(c, LinkKind::from_role, &ROLE_NAMES))?;
        let link_type = row.optional("LinkType", cols.link_type, |c| decode(c, LinkKind::from_link_type, &LINK_TYPE_NAMES))?;

        let mut obs = Observation::new(seq, stamp, source, address, rssi, state)
            .with_link(link_type.or(role).unwrap_or_default());
        if let Some((p_idx, r_idx)) = cols.parent {
            let parent = row.optional("Parent", Some(p_idx), parse_node)?;
            let parent_rssi = row.optional("ParentRSSI", Some(r_idx), parse_rssi)?;
            if let (Some(p), Some(r)) = (parent, parent_rssi) {
                obs = obs.with_parent(p, r);
            }
        }
        stamps.push(stamp);
        observations.push(obs);
    }

    forward_fill(&mut stamps);
    for (obs, stamp) in observations.iter_mut().zip(stamps) {
        obs.timestamp = stamp;
    }
    info!(rows = observations.len(), "网络日志已读取");
    Ok((schema, observations))
}

pub fn read_observations_from_path(path: &Path, unit: TimeUnit) -> Result<(Schema, Vec<Observation>), IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_observations(file, unit)
}
