use crate::ingest::{IngestError, Stamp, TimeUnit, read_observations, read_table};
use crate::topo::{LinkKind, NodeId, NodeState};

#[test]
fn network_log_requires_core_columns() {
    let csv = "Timestamp,Source,RSSI,State\n10,2,-40,1\n";
    let err = read_observations(csv.as_bytes(), TimeUnit::Seconds).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn("Address")));
}

#[test]
fn network_log_reads_optional_columns_in_any_order() {
    let csv = "\
State,RSSI,Address,Source,Timestamp,Parent,ParentRSSI,Extra
1,-40,1,2,10,,,x
1,-45.6,3,2,11,1,-52,y
";
    let (schema, rows) = read_observations(csv.as_bytes(), TimeUnit::Seconds).unwrap();
    assert!(schema.parent);
    assert!(!schema.role);
    assert!(!schema.link_type);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].parent, None);
    assert_eq!(rows[1].rssi, -46);
    assert_eq!(rows[1].parent, Some(NodeId(1)));
    assert_eq!(rows[1].parent_rssi, Some(-52));
    assert_eq!(rows[1].timestamp, Some(Stamp::from_secs(11)));
}

#[test]
fn role_and_state_accept_names_and_codes() {
    let csv = "\
Timestamp,Source,Address,Role,RSSI,State
10,02,01,PARENT,-40,ACTIVE
10,1,2,1,-41,1
10,3,4,NODE,-60,inactive
10,3,5,NEXTHOP,-60,-1
";
    let (_, rows) = read_observations(csv.as_bytes(), TimeUnit::Seconds).unwrap();
    let got: Vec<(u32, u32, LinkKind, NodeState)> = rows
        .iter()
        .map(|o| (o.source.0, o.address.0, o.link, o.state))
        .collect();
    assert_eq!(
        got,
        vec![
            (2, 1, LinkKind::Parent, NodeState::Active),
            (1, 2, LinkKind::Child, NodeState::Active),
            (3, 4, LinkKind::Neighbor, NodeState::Inactive),
            (3, 5, LinkKind::Parent, NodeState::Unknown),
        ]
    );
}

#[test]
fn link_type_takes_precedence_over_role() {
    let csv = "\
Timestamp,Source,Address,Role,LinkType,RSSI,State
10,2,1,0,3,-40,1
10,2,3,2,,-40,1
";
    let (schema, rows) = read_observations(csv.as_bytes(), TimeUnit::Seconds).unwrap();
    assert!(schema.role && schema.link_type);
    assert_eq!(rows[0].link, LinkKind::Bidirectional);
    assert_eq!(rows[1].link, LinkKind::Parent);
}

#[test]
fn bad_cells_report_line_and_column() {
    let csv = "Timestamp,Source,Address,RSSI,State\n10,2,1,-40,1\n11,x,1,-40,1\n";
    let err = read_observations(csv.as_bytes(), TimeUnit::Seconds).unwrap_err();
    match err {
        IngestError::InvalidValue { line, column, value } => {
            assert_eq!(line, 3);
            assert_eq!(column, "Source");
            assert_eq!(value, "x");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn epoch_timestamps_are_forward_filled() {
    let csv = "Timestamp,Source,Address,RSSI,State\n100,2,1,-40,1\n0,3,1,-40,1\n,4,1,-40,1\n";
    let (_, rows) = read_observations(csv.as_bytes(), TimeUnit::Seconds).unwrap();
    assert!(rows.iter().all(|o| o.timestamp == Some(Stamp::from_secs(100))));
}

#[test]
fn metric_table_splits_meta_and_metric_columns() {
    let csv = "\
Timestamp,Source,Address,TotalSent,Path,RelativeTime
20,2,1,3,2-1,99
10,3,1,n/a,,98
";
    let table = read_table(csv.as_bytes(), TimeUnit::Seconds).unwrap();
    assert_eq!(table.columns, vec!["TotalSent".to_string()]);
    assert_eq!(table.rows.len(), 2);

    // sorted by relative time
    assert_eq!(table.rows[0].source, NodeId(3));
    assert_eq!(table.rows[0].time, Some(0.0));
    assert_eq!(table.rows[0].values, vec![None]);
    assert_eq!(table.rows[1].time, Some(10.0));
    assert_eq!(table.rows[1].values, vec![Some(3.0)]);

    assert!(table.has_paths());
    let paths = table.path_rows();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].path, "2-1");
}

#[test]
fn metric_table_requires_timestamp_source_address() {
    let csv = "Timestamp,Address,TotalSent\n10,1,3\n";
    let err = read_table(csv.as_bytes(), TimeUnit::Seconds).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn("Source")));
}
