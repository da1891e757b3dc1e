use crate::ingest::{MetricTable, TimeUnit, read_table};
use crate::metrics::{DelayError, DelayStats, delay_report};
use crate::topo::NodeId;

const RECV_CSV: &str = "\
Timestamp,Source,Address,SentTimestamp,RecvTimestamp,SeqId
1000,1,2,1000,1250,1
2000,1,2,2000,2150,2
3000,1,3,2500,3000,1
3500,1,3,,3500,2
";

#[test]
fn stats_round_to_two_decimals() {
    let s = DelayStats::from_samples(&[0.123, 0.456, 0.789, 1.0]).unwrap();
    assert_eq!(s.avg, 0.59);
    assert_eq!(s.median, 0.62);
    assert_eq!(s.min, 0.12);
    assert_eq!(s.max, 1.0);
    assert!(DelayStats::from_samples(&[]).is_none());
}

#[test]
fn delay_is_grouped_per_pair() {
    let table = read_table(RECV_CSV.as_bytes(), TimeUnit::Millis).unwrap();
    let report = delay_report(&table).unwrap();

    assert_eq!(report.pairs.len(), 2);
    let first = &report.pairs[0];
    assert_eq!((first.source, first.address), (NodeId(1), NodeId(2)));
    assert_eq!(first.label, "2→1");
    assert_eq!(first.stats.avg, 0.2);
    assert_eq!(first.stats.min, 0.15);
    assert_eq!(first.stats.max, 0.25);
    assert_eq!(first.delay.len(), 2);
    assert!((first.arrival[0][1] - 0.25).abs() < 1e-9);

    // row without SentTimestamp is skipped
    assert_eq!(report.pairs[1].delay.len(), 1);
    assert_eq!(report.pairs[1].stats.median, 0.5);

    let all = report.aggregate.unwrap();
    assert_eq!(all.avg, 0.3);
    assert_eq!(all.median, 0.25);
    assert_eq!(all.max, 0.5);
}

#[test]
fn delay_needs_its_columns_and_numeric_time() {
    let csv = "Timestamp,Source,Address,SentTimestamp,RecvTimestamp\n1000,1,2,1000,1250\n";
    let table = read_table(csv.as_bytes(), TimeUnit::Millis).unwrap();
    assert!(matches!(delay_report(&table), Err(DelayError::MissingColumn("SeqId"))));

    let iso = MetricTable {
        unit: TimeUnit::Iso,
        ..MetricTable::default()
    };
    assert!(matches!(delay_report(&iso), Err(DelayError::UnsupportedUnit(TimeUnit::Iso))));
}
