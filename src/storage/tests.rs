use super::{ReportStorage, Storage};
use crate::aggregation::{AggregateRow, AnalyticsError, MetricOp};
use crate::models::Field;
use crate::report::ReportTable;
use crate::types::Value;
use anyhow::{anyhow, Result};

fn create_table(branch: &str) -> ReportTable {
    ReportTable::Aggregates(vec![AggregateRow {
        key: vec![(Field::Branch, Value::from(branch))],
        metrics: vec![("count".to_string(), Value::Integer(1))]
    }])
}

#[test]
fn test_storage_basic_load_and_save_operations() -> Result<()> {
    let storage = ReportStorage::new();

    assert!(storage.load("monthly_revenue").is_none());

    storage.save("monthly_revenue", Ok(create_table("A")));

    let retrieved = storage.load("monthly_revenue").ok_or_else(|| anyhow!("Report not found in storage"))??;

    assert_eq!(retrieved, create_table("A"));

    Ok(())
}

#[test]
fn test_storage_keeps_failures_apart_from_tables() {
    let storage = ReportStorage::new();
    storage.save("good", Ok(create_table("A")));
    storage.save("bad", Err(AnalyticsError::unsupported_metric(MetricOp::Sum, Some(Field::City))));

    let report = storage.to_report(1, 2);

    assert_eq!(storage.len(), 2);
    assert!(report.tables.contains_key("good"));
    assert!(report.errors.contains_key("bad"));
    assert_eq!(report.row_count, 1);
    assert_eq!(report.skipped_records, 2);
}

#[test]
fn test_storage_marks_second_save_under_same_name_as_duplicate() {
    let storage = ReportStorage::new();
    storage.save("revenue", Ok(create_table("A")));
    storage.save("revenue", Ok(create_table("B")));

    assert!(matches!(storage.load("revenue"), Some(Err(AnalyticsError::DuplicateReport { .. }))));
}
