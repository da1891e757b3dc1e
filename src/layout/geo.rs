//! 地理视图，位置来自 `node_pos.csv`（`Node, Lat, Long`）

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::Path;

use serde::Deserialize;

use super::Point;
use crate::ingest::IngestError;
use crate::topo::NodeId;

#[derive(Debug, Deserialize)]
struct NodePosRecord {
    #[serde(rename = "Node")]
    node: u32,
    #[serde(rename = "Lat")]
    lat: f64,
    #[serde(rename = "Long")]
    long: f64,
}

pub fn read_node_positions<R: io::Read>(reader: R) -> Result<BTreeMap<NodeId, Point>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let records = rdr
        .deserialize()
        .collect::<Result<Vec<NodePosRecord>, _>>()?;
    Ok(records
        .into_iter()
        .map(|r| (NodeId(r.node), Point::new(r.lat, r.long)))
        .collect())
}

pub fn load_node_positions(path: &Path) -> Result<BTreeMap<NodeId, Point>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_node_positions(file)
}

/// Positions for exactly `nodes`, or the ids that have none.
pub fn geo_layout(positions: &BTreeMap<NodeId, Point>, nodes: &[NodeId]) -> Result<BTreeMap<NodeId, Point>, Vec<NodeId>> {
    let missing: Vec<NodeId> = nodes
        .iter()
        .filter(|n| !positions.contains_key(*n))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(missing);
    }
    Ok(nodes.iter().map(|n| (*n, positions[n])).collect())
}
